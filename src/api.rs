//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use serde::{Deserialize, Serialize};

/// 出力対象の地域
///
/// 同じ行集合から、地域ごとに異なる列スライスを使って独立に文書を構築します。
///
/// - `Us`: B列がタイトル列、C〜D列が値列
/// - `Uk`: E列がタイトル列、F列以降が値列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// US/CA向け（B〜D列）
    Us,

    /// UK/AU/NZ向け（E/F列以降）
    Uk,
}

impl Region {
    /// 地域の列配置を取得
    pub fn columns(self) -> RegionColumns {
        match self {
            Region::Us => RegionColumns {
                title: 1,
                value_start: 2,
                end: Some(4),
            },
            Region::Uk => RegionColumns {
                title: 4,
                value_start: 5,
                end: None,
            },
        }
    }

    /// DOM idに使用する短い識別子（`us` / `uk`）
    pub fn dom_key(self) -> &'static str {
        match self {
            Region::Us => "us",
            Region::Uk => "uk",
        }
    }
}

/// 地域ごとの列インデックス（0始まり）
///
/// パイプライン全体はこの値オブジェクトを1回受け取るだけで、
/// US/UKで分岐するロジックを持ちません。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionColumns {
    /// タイトル列のインデックス
    pub title: usize,

    /// 値列の開始インデックス
    pub value_start: usize,

    /// 地域スライスの終端（排他的、`None`は行末まで）
    ///
    /// US側のスライスはUK側の列（E列以降）に重ならないように終端を持ちます。
    pub end: Option<usize>,
}

impl RegionColumns {
    /// タイトル列のセル（範囲外は空文字列）
    pub fn title_cell(self, row: &[String]) -> &str {
        row.get(self.title).map(String::as_str).unwrap_or("")
    }

    /// タイトル列から終端までのセル
    pub fn slice(self, row: &[String]) -> &[String] {
        self.range(row, self.title)
    }

    /// 値列のセル
    pub fn values(self, row: &[String]) -> &[String] {
        self.range(row, self.value_start)
    }

    /// 地域スライスのすべてのセルが空かどうか
    pub fn is_blank(self, row: &[String]) -> bool {
        self.slice(row).iter().all(|c| c.trim().is_empty())
    }

    fn range(self, row: &[String], start: usize) -> &[String] {
        let end = self.end.map_or(row.len(), |end| end.min(row.len()));
        row.get(start..end).unwrap_or(&[])
    }
}

/// SKU行自体の扱い
///
/// SKU行（A列にSKUがある行）のB列以降を、最初のタブのデータとして
/// 扱うかどうかを指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum SkuRowPolicy {
    /// SKU行は識別子としてのみ使用し、データには含めない（デフォルト）
    #[default]
    IdentifierOnly,

    /// SKU行を最初のタブのデータ行としても扱う
    FirstTabData,
}

/// ワークブック入力時のシート選択方式
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum SheetSelector {
    /// 先頭のシート（デフォルト）
    #[default]
    First,

    /// インデックス指定（0始まり）
    ///
    /// 例: `SheetSelector::Index(1)` は2番目のシートを選択
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("Specs".to_string())`
    Name(String),
}

/// 出力テーブル（SKU / Region / HTML）の書き出し形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutputFormat {
    /// JSON形式
    ///
    /// 行オブジェクトの配列として出力します。
    ///
    /// ```json
    /// [
    ///   {"SKU": "SKU1", "Region": "default", "HTML": "<style>..."}
    /// ]
    /// ```
    Json,

    /// CSV形式
    ///
    /// ヘッダー行 `SKU,Region,HTML` に続けて各行を出力します。
    /// HTMLは改行やカンマを含むため、常にダブルクォートで囲まれます。
    Csv,
}

impl OutputFormat {
    /// 出力ファイルの拡張子（ドットなし）
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}
