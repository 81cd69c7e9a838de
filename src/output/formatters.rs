//! Output Formatters Implementation
//!
//! 各出力形式の実装を提供するモジュール。

use std::io::Write;

use super::OutputRow;
use crate::error::XlsxSpecError;

/// CSVのヘッダー行
const CSV_HEADER: [&str; 3] = ["SKU", "Region", "HTML"];

/// JSON形式のフォーマッター
///
/// 行オブジェクトの配列を整形して出力します。
pub(crate) struct JsonFormatter;

impl JsonFormatter {
    pub fn render<W: Write>(&self, rows: &[OutputRow], writer: &mut W) -> Result<(), XlsxSpecError> {
        serde_json::to_writer_pretty(&mut *writer, rows)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// CSV形式のフォーマッター
pub(crate) struct CsvFormatter;

impl CsvFormatter {
    pub fn render<W: Write>(&self, rows: &[OutputRow], writer: &mut W) -> Result<(), XlsxSpecError> {
        write_record(writer, &CSV_HEADER)?;
        for row in rows {
            write_record(writer, &[row.sku.as_str(), row.region.as_str(), row.html.as_str()])?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// 1レコードをCRLF区切りで出力
fn write_record<W: Write>(writer: &mut W, fields: &[&str]) -> Result<(), XlsxSpecError> {
    let line: Vec<String> = fields.iter().map(|field| escape_csv(field)).collect();
    write!(writer, "{}\r\n", line.join(","))?;
    Ok(())
}

/// CSV文字列をエスケープ
///
/// ダブルクォート、改行、カンマを含む場合はダブルクォートで囲み、
/// 内部のダブルクォートは2つにエスケープします。
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
