//! Document Module
//!
//! タブの生の行から、1地域分の文書モデルを構築するモジュール。

pub(crate) mod builder;
pub(crate) mod collapsible;
pub(crate) mod model;

use crate::api::RegionColumns;
use crate::types::{DiagnosticKind, Row};

pub(crate) use model::TabDocument;

/// タブの行から文書モデルを構築
///
/// 折りたたみ抽出と文書構築を順に実行し、文書と構造上の警告を返します。
pub(crate) fn build_tab(
    rows: &[Row],
    columns: RegionColumns,
    care_headers: &[String],
) -> (TabDocument, Vec<DiagnosticKind>) {
    let extraction = collapsible::extract(rows, columns);
    let document = builder::build_document(extraction.items, columns, care_headers);
    (document, extraction.warnings)
}
