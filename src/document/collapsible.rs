//! Collapsible Extractor Module
//!
//! タブ内の行から"Start"〜"End"の区間を見つけ、折りたたみセクションに置き換えるモジュール。
//!
//! 地域ごとに列スライスが異なるため、抽出は地域ごとに独立して実行されます。

use crate::api::RegionColumns;
use crate::classify::{classify, RowKind};
use crate::document::model::{BlockItem, CollapsibleSection};
use crate::normalize::process_cell;
use crate::types::{cell, is_blank, DiagnosticKind};

/// 折りたたみ抽出の結果
#[derive(Debug, Default)]
pub(crate) struct Extraction<'a> {
    /// 生の行と折りたたみセクションが混在した要素列
    pub items: Vec<BlockItem<'a>>,

    /// 構造上の警告
    pub warnings: Vec<DiagnosticKind>,
}

/// タブの行から折りたたみセクションを抽出
///
/// "Start"の直前に出力された要素がタイトル付きの生の行であれば、その行をラベルとして
/// "End"行まで（"End"行を含む）を1つのセクションとして消費します。
/// 条件を満たさない"Start"や対応する"End"のない"Start"は通常の行として残ります。
///
/// マーカー列とこの地域のスライスがともに空の行は、この地域では何も寄与しないため
/// 要素列に含めません。
pub(crate) fn extract<'a>(rows: &'a [Vec<String>], columns: RegionColumns) -> Extraction<'a> {
    let mut extraction = Extraction::default();
    let mut cursor = 0;

    while cursor < rows.len() {
        let row = rows[cursor].as_slice();

        if is_blank(cell(row, 0)) && columns.is_blank(row) {
            cursor += 1;
            continue;
        }

        if classify(row) != RowKind::StartMarker {
            extraction.items.push(BlockItem::Row(row));
            cursor += 1;
            continue;
        }

        let label = match extraction.items.last() {
            Some(BlockItem::Row(prev)) if !is_blank(columns.title_cell(prev)) => {
                process_cell(columns.title_cell(prev), false)
            }
            _ => {
                extraction
                    .warnings
                    .push(DiagnosticKind::InvalidStart { row: cursor });
                extraction.items.push(BlockItem::Row(row));
                cursor += 1;
                continue;
            }
        };

        match find_end(rows, cursor) {
            Some(end) => {
                extraction.items.pop();
                extraction
                    .items
                    .push(BlockItem::Details(build_section(rows, cursor, end, label, columns)));
                cursor = end + 1;
            }
            None => {
                extraction
                    .warnings
                    .push(DiagnosticKind::UnmatchedStart { label });
                extraction.items.push(BlockItem::Row(row));
                cursor += 1;
            }
        }
    }

    extraction
}

/// "Start"より後で最初の"End"行のインデックスを探す
fn find_end(rows: &[Vec<String>], start: usize) -> Option<usize> {
    rows.iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, row)| classify(row) == RowKind::EndMarker)
        .map(|(index, _)| index)
}

fn build_section(
    rows: &[Vec<String>],
    start: usize,
    end: usize,
    label: String,
    columns: RegionColumns,
) -> CollapsibleSection {
    let mut header: Vec<String> = columns
        .slice(&rows[start])
        .iter()
        .map(|c| process_cell(c, false))
        .collect();
    while header.last().is_some_and(|c| c.is_empty()) {
        header.pop();
    }

    let mut data = Vec::new();
    for row in &rows[start + 1..end] {
        let cells = columns.slice(row);
        if cells.iter().any(|c| !is_blank(c)) {
            data.push(cells.iter().map(|c| process_cell(c, true)).collect());
        }
    }
    data.push(
        columns
            .slice(&rows[end])
            .iter()
            .map(|c| process_cell(c, true))
            .collect(),
    );

    CollapsibleSection {
        label,
        header,
        data,
    }
}
