//! Row Classifier Module
//!
//! マーカー列（A列）の内容から、行の種類を判定するモジュール。

use crate::normalize::is_numeric;
use crate::types::{cell, is_blank};

/// 行の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowKind {
    /// 新しいSKUの開始（マーカー列が空でなく、他のどの種類にも該当しない）
    SkuStart,

    /// タブマーカー（マーカー列が有限の数値）
    TabMarker,

    /// 折りたたみセクションの開始（"start"）
    StartMarker,

    /// 折りたたみセクションの終了（"end"）
    EndMarker,

    /// 地域プレースホルダー（"US"/"UK"のみで他のセルがすべて空）
    RegionPlaceholder,

    /// 通常のデータ行（マーカー列が空）
    Data,
}

/// 行を分類
///
/// 判定の優先順位は、プレースホルダー → タブマーカー → Start/End → SKU → データ行です。
/// マーカー列の比較は、トリム後に大文字小文字を区別せずに行います。
pub(crate) fn classify(row: &[String]) -> RowKind {
    let marker = cell(row, 0).trim();
    let lowered = marker.to_lowercase();

    if (lowered == "us" || lowered == "uk") && row.iter().skip(1).all(|c| is_blank(c)) {
        return RowKind::RegionPlaceholder;
    }
    if is_numeric(marker) {
        return RowKind::TabMarker;
    }
    match lowered.as_str() {
        "start" => RowKind::StartMarker,
        "end" => RowKind::EndMarker,
        "" => RowKind::Data,
        _ => RowKind::SkuStart,
    }
}
