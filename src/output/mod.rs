//! Output Table Module
//!
//! 変換結果（SKU / Region / HTML）のテーブルを書き出すモジュール。
//! 出力形式ごとのフォーマッターをenumで切り替えます。

mod formatters;

use std::io::Write;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::api::OutputFormat;
use crate::error::XlsxSpecError;

pub(crate) use formatters::{CsvFormatter, JsonFormatter};

/// 出力テーブルの1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    /// SKU識別子
    #[serde(rename = "SKU")]
    pub sku: String,

    /// 出力先の地域名（`default`、`canada`など）
    #[serde(rename = "Region")]
    pub region: String,

    /// レンダリング済みのHTML断片
    #[serde(rename = "HTML")]
    pub html: String,
}

/// 出力フォーマッター
#[derive(Debug, Clone, Copy)]
pub(crate) enum OutputFormatter {
    Json,
    Csv,
}

impl OutputFormatter {
    /// 出力形式からフォーマッターを生成
    pub fn from_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => OutputFormatter::Json,
            OutputFormat::Csv => OutputFormatter::Csv,
        }
    }

    /// 行を指定された形式で出力する
    pub fn render<W: Write>(&self, rows: &[OutputRow], writer: &mut W) -> Result<(), XlsxSpecError> {
        match self {
            OutputFormatter::Json => JsonFormatter.render(rows, writer),
            OutputFormatter::Csv => CsvFormatter.render(rows, writer),
        }
    }
}

/// 出力ファイル名を生成
///
/// `{入力ファイルの拡張子なしの名前}_output_{YYYYMMDD_HHMMSS}.{json|csv}`
///
/// # 引数
///
/// * `input_name` - 入力ファイルのパス（ディレクトリ部分は無視）
/// * `timestamp` - ファイル名に埋め込む日時
/// * `format` - 書き出し形式（拡張子を決める）
///
/// # 使用例
///
/// ```rust
/// use chrono::NaiveDate;
/// use xlsxspec::{output_file_name, OutputFormat};
///
/// let at = NaiveDate::from_ymd_opt(2024, 3, 5)
///     .unwrap()
///     .and_hms_opt(9, 7, 1)
///     .unwrap();
/// assert_eq!(
///     output_file_name("specs/Summer Range.xlsx", at, OutputFormat::Csv),
///     "Summer Range_output_20240305_090701.csv"
/// );
/// ```
pub fn output_file_name(
    input_name: impl AsRef<Path>,
    timestamp: NaiveDateTime,
    format: OutputFormat,
) -> String {
    let stem = input_name
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!(
        "{}_output_{}.{}",
        stem,
        timestamp.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}
