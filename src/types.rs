//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use std::fmt;

use crate::api::Region;

/// スプレッドシートの1行（トリム済み文字列セルの列）
///
/// インデックス0はマーカー列（A列）です。
pub type Row = Vec<String>;

/// 行の指定インデックスのセルを取得（範囲外は空文字列）
pub(crate) fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// セルが空白のみかどうかを判定
pub(crate) fn is_blank(cell: &str) -> bool {
    cell.trim().is_empty()
}

/// 1つの製品またはパッケージ
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SkuGroup {
    /// SKU識別子（最初の行のマーカー列から取得、空でない）
    pub id: String,

    /// タブブロックのリスト
    pub tabs: Vec<TabBlock>,
}

impl SkuGroup {
    /// 新しいSKUグループを生成
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tabs: Vec::new(),
        }
    }

    /// いずれかのタブが行を持つかどうか
    pub fn has_rows(&self) -> bool {
        self.tabs.iter().any(|tab| !tab.rows.is_empty())
    }

    /// すべてのタブの行数の合計
    pub fn row_count(&self) -> usize {
        self.tabs.iter().map(|tab| tab.rows.len()).sum()
    }
}

/// SKU内のタブ（タイトルと生の行のリスト）
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TabBlock {
    /// タブのタイトル（既定値は "Tab N" または "Details"）
    pub title: String,

    /// このタブに属する生の行
    pub rows: Vec<Row>,
}

impl TabBlock {
    /// 空のタブを生成
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }
}

/// 構造上の警告の種類
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DiagnosticKind {
    /// "Start"に対応する"End"がタブ内に存在しない
    UnmatchedStart {
        /// セクションのラベル（"Start"の直前の行のタイトル）
        label: String,
    },

    /// "Start"の直前に有効なタイトル行が存在しない
    InvalidStart {
        /// タブ内での"Start"行のインデックス（0始まり）
        row: usize,
    },
}

/// 構造上の警告
///
/// 警告が発生しても処理は継続され、該当する行は通常のデータとして扱われます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// SKU識別子
    pub sku: String,

    /// 地域
    pub region: Region,

    /// タブの位置（1始まり）
    pub tab: usize,

    /// 警告の種類
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::UnmatchedStart { label } => write!(
                f,
                "SKU '{}' tab {} ({}): 'Start' found for '{}' but no matching 'End' marker",
                self.sku,
                self.tab,
                self.region.dom_key(),
                label
            ),
            DiagnosticKind::InvalidStart { row } => write!(
                f,
                "SKU '{}' tab {} ({}): 'Start' marker at row {} has no valid preceding title row",
                self.sku,
                self.tab,
                self.region.dom_key(),
                row
            ),
        }
    }
}
