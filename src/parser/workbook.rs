//! Workbook Reader Module
//!
//! calamineのラッパーとして、シート選択と行の抽出を提供します。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets, Xlsx};
use std::io::{Cursor, Read, Seek};

use crate::api::SheetSelector;
use crate::error::XlsxSpecError;
use crate::normalize::CellNormalizer;
use crate::security::SecurityConfig;
use crate::types::Row;

/// ワークブックリーダー
///
/// 入力全体をメモリに読み込み、XLSX形式のワークブックとして開きます。
pub(crate) struct WorkbookReader {
    /// calamineのワークブック（XLSX形式のみサポート）
    workbook: Xlsx<Cursor<Vec<u8>>>,
}

impl WorkbookReader {
    /// ワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - Excelファイルを読み込むためのリーダー（Read + Seekトレイトを実装）
    /// * `security` - 入力サイズの上限を含むセキュリティ設定
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookReader)` - ワークブックの読み込みに成功した場合
    /// * `Err(XlsxSpecError::SecurityViolation)` - 入力サイズが上限を超えた場合
    /// * `Err(XlsxSpecError::Parse)` - ワークブックの読み込みに失敗した場合
    /// * `Err(XlsxSpecError::Config)` - XLSX形式でない場合
    pub fn open<R: Read + Seek>(
        mut reader: R,
        security: &SecurityConfig,
    ) -> Result<Self, XlsxSpecError> {
        // 上限+1バイトまでしか読まない
        let mut buffer = Vec::new();
        let limit = security.max_input_file_size.saturating_add(1);
        let bytes_read = reader.by_ref().take(limit).read_to_end(&mut buffer)?;
        security.check_input_size(bytes_read as u64)?;

        let sheets = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        match sheets {
            Sheets::Xlsx(workbook) => Ok(Self { workbook }),
            _ => Err(XlsxSpecError::Config(
                "Only XLSX format is supported".to_string(),
            )),
        }
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// シート選択方式に基づいてシートを選択
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 選択されたシート名
    /// * `Err(XlsxSpecError::Config)` - シートが見つからない、またはインデックスが範囲外の場合
    pub fn select_sheet(&self, selector: &SheetSelector) -> Result<String, XlsxSpecError> {
        let names = self.sheet_names();

        match selector {
            SheetSelector::First => names
                .into_iter()
                .next()
                .ok_or_else(|| XlsxSpecError::Config("Workbook has no sheets".to_string())),

            SheetSelector::Index(index) => {
                let total = names.len();
                names.into_iter().nth(*index).ok_or_else(|| {
                    XlsxSpecError::Config(format!(
                        "Sheet index {} is out of range (total: {})",
                        index, total
                    ))
                })
            }

            SheetSelector::Name(name) => {
                if names.contains(name) {
                    Ok(name.clone())
                } else {
                    Err(XlsxSpecError::Config(format!("Sheet '{}' not found", name)))
                }
            }
        }
    }

    /// シートを読み込み、正規化済みの行に変換
    ///
    /// 使用範囲がA1から始まらない場合でも、インデックス0がA列、
    /// 先頭要素が1行目になるように空セル・空行で補完します。
    pub fn read_rows(&mut self, sheet_name: &str) -> Result<Vec<Row>, XlsxSpecError> {
        let range = self
            .workbook
            .worksheet_range(sheet_name)
            .map_err(|e| XlsxSpecError::Parse(e.into()))?;
        log::debug!(
            "Reading sheet '{}' ({} x {})",
            sheet_name,
            range.height(),
            range.width()
        );
        Ok(range_to_rows(&range))
    }
}

/// calamineの範囲を行のリストに変換
fn range_to_rows(range: &Range<Data>) -> Vec<Row> {
    let normalizer = CellNormalizer;
    let (row_offset, col_offset) = range
        .start()
        .map(|(row, col)| (row as usize, col as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Row> = vec![Vec::new(); row_offset];
    rows.extend(range.rows().map(|cells| {
        let mut row = vec![String::new(); col_offset];
        row.extend(cells.iter().map(|cell| normalizer.normalize(cell)));
        row
    }));
    rows
}
