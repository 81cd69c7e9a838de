//! Spec Document Builder Module
//!
//! 折りたたみ抽出後の要素列を1地域分走査し、タブの文書モデルを構築するモジュール。

use crate::api::RegionColumns;
use crate::document::model::{
    BlockItem, CareBlock, CareEntry, CollapsibleSection, NoteBlock, SpecRow, SpecSection,
    SpecValue, TabDocument,
};
use crate::normalize::process_cell;
use crate::types::is_blank;

/// 注記行の接頭辞
const NOTE_PREFIX: &str = "note:";

/// 値の受け付け中のヘッダー
#[derive(Debug)]
struct OpenHeader {
    label: String,
    values: Vec<String>,
}

/// 出力先のストリーム
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    /// 仕様セクション
    Specs,

    /// お手入れ情報（一度入ると同じタブの終わりまで継続）
    Care {
        /// 末尾の箇条書きに項目を追加できるかどうか
        list_open: bool,
    },
}

/// 仕様文書ビルダー
///
/// 状態は「値を受け付け中のヘッダー」と「出力先ストリーム」の組で表されます。
/// ヘッダーは詳細セクション、お手入れ行、注記、セクションタイトル、次のヘッダー、
/// ストリームの終端のいずれかで`flush()`されます。
#[derive(Debug)]
pub(crate) struct SpecDocumentBuilder<'v> {
    columns: RegionColumns,
    care_headers: &'v [String],
    sections: Vec<SpecSection>,
    current: SpecSection,
    open_header: Option<OpenHeader>,
    stream: Stream,
    care: CareBlock,
    header_lengths: Vec<usize>,
}

impl<'v> SpecDocumentBuilder<'v> {
    /// 新しいビルダーを生成
    ///
    /// # 引数
    ///
    /// * `columns` - 地域の列配置
    /// * `care_headers` - お手入れ見出しの語彙（小文字）
    pub fn new(columns: RegionColumns, care_headers: &'v [String]) -> Self {
        Self {
            columns,
            care_headers,
            sections: Vec::new(),
            current: SpecSection::default(),
            open_header: None,
            stream: Stream::Specs,
            care: CareBlock::default(),
            header_lengths: Vec::new(),
        }
    }

    /// 要素を1つ処理
    pub fn push(&mut self, item: BlockItem<'_>) {
        match item {
            BlockItem::Details(section) => self.push_details(section),
            BlockItem::Row(row) => self.push_row(row),
        }
    }

    /// ストリームを終了し、文書を返す
    pub fn finish(mut self) -> TabDocument {
        self.flush();
        self.sections.push(std::mem::take(&mut self.current));

        TabDocument {
            sections: self.sections,
            care: self.care,
            header_lengths: self.header_lengths,
        }
    }

    /// 受け付け中のヘッダーを現在のセクションの行として確定
    fn flush(&mut self) {
        if let Some(header) = self.open_header.take() {
            self.current.rows.push(SpecRow {
                header: header.label,
                value: SpecValue::Text(header.values),
            });
        }
    }

    fn push_details(&mut self, section: CollapsibleSection) {
        self.flush();
        self.header_lengths.push(section.label.chars().count());
        self.current.rows.push(SpecRow {
            header: section.label.clone(),
            value: SpecValue::Details(section),
        });
    }

    fn push_row(&mut self, row: &[String]) {
        let title = process_cell(self.columns.title_cell(row), false);
        let values = self.columns.values(row);

        if self.is_care_header(&title) || matches!(self.stream, Stream::Care { .. }) {
            self.flush();
            self.push_care(&title, values);
            return;
        }

        if is_note(&title) {
            self.flush();
            self.current.notes.push(note_block(&title, values));
            return;
        }

        let has_values = values.iter().any(|v| !is_blank(v));

        if !title.is_empty() && !has_values {
            self.flush();
            if !self.current.is_empty() {
                self.sections.push(std::mem::take(&mut self.current));
            }
            self.current.title = Some(title);
        } else if !title.is_empty() {
            self.flush();
            self.header_lengths.push(title.chars().count());
            self.open_header = Some(OpenHeader {
                label: title,
                values: processed_values(values),
            });
        } else if let Some(header) = self.open_header.as_mut() {
            header.values.extend(processed_values(values));
        }
    }

    fn push_care(&mut self, title: &str, values: &[String]) {
        let list_open = match self.stream {
            Stream::Care { list_open } => list_open,
            Stream::Specs => false,
        };

        if self.is_care_header(title) {
            self.care.entries.push(CareEntry::Heading(title.to_string()));
            let items = values
                .iter()
                .flat_map(|v| split_lines(&process_cell(v, true)))
                .collect();
            self.care.entries.push(CareEntry::List(items));
            self.stream = Stream::Care { list_open: true };
        } else if is_note(title) {
            self.care.entries.push(CareEntry::Note(note_block(title, values)));
            self.stream = Stream::Care { list_open: false };
        } else {
            let text = process_cell(&join_with_values(title, values), true);
            let items = split_lines(&text);
            if items.is_empty() {
                return;
            }
            match self.care.entries.last_mut() {
                Some(CareEntry::List(list)) if list_open => list.extend(items),
                _ => self.care.entries.push(CareEntry::List(items)),
            }
            self.stream = Stream::Care { list_open: true };
        }
    }

    fn is_care_header(&self, title: &str) -> bool {
        let lowered = title.to_lowercase();
        self.care_headers.iter().any(|header| *header == lowered)
    }
}

/// タイトルが"note:"で始まるかどうか（大文字小文字を区別しない）
fn is_note(title: &str) -> bool {
    title
        .get(..NOTE_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(NOTE_PREFIX))
}

/// タイトルと空でない値をスペースで結合
fn join_with_values(title: &str, values: &[String]) -> String {
    let mut text = title.to_string();
    for value in values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()) {
        text.push(' ');
        text.push_str(value);
    }
    text
}

/// 注記行から注記を生成（接頭辞を除去）
fn note_block(title: &str, values: &[String]) -> NoteBlock {
    let text = join_with_values(title, values);
    let body = text.get(NOTE_PREFIX.len()..).unwrap_or("");
    NoteBlock {
        text: process_cell(body, true),
    }
}

/// 空でない値を、それぞれ複数行結合して返す
fn processed_values(values: &[String]) -> Vec<String> {
    values
        .iter()
        .filter(|v| !is_blank(v))
        .map(|v| process_cell(v, true))
        .collect()
}

/// `<br>`で区切られた行のうち空でないもの
fn split_lines(text: &str) -> Vec<String> {
    text.split("<br>")
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// 要素列から文書を構築
pub(crate) fn build_document(
    items: Vec<BlockItem<'_>>,
    columns: RegionColumns,
    care_headers: &[String],
) -> TabDocument {
    let mut builder = SpecDocumentBuilder::new(columns, care_headers);
    for item in items {
        builder.push(item);
    }
    builder.finish()
}
