//! Block Segmenter Module
//!
//! 分類済みの行ストリームを、SKUごと・タブごとの行グループに分割するモジュール。

use crate::api::SkuRowPolicy;
use crate::classify::{classify, RowKind};
use crate::normalize::parse_numeric;
use crate::types::{cell, is_blank, Row, SkuGroup, TabBlock};

/// タブマーカーがない場合に合成されるタブのタイトル
pub(crate) const DEFAULT_TAB_TITLE: &str = "Details";

/// セグメンターの状態
#[derive(Debug)]
enum SegmentState {
    /// SKUが開かれていない
    NoActiveSku,

    /// SKUが開かれている
    ActiveSku {
        /// 構築中のSKUグループ
        group: SkuGroup,
        /// 直近のタブにまだ格納されていない行
        pending: Vec<Row>,
    },
}

/// ブロックセグメンター
///
/// 行を1つずつ受け取り、SKUの境界で`SkuGroup`を確定します。
/// 確定したグループは`finish()`で取り出します。
#[derive(Debug)]
pub(crate) struct BlockSegmenter {
    state: SegmentState,
    policy: SkuRowPolicy,
    groups: Vec<SkuGroup>,
}

impl BlockSegmenter {
    /// 新しいセグメンターを生成
    pub fn new(policy: SkuRowPolicy) -> Self {
        Self {
            state: SegmentState::NoActiveSku,
            policy,
            groups: Vec::new(),
        }
    }

    /// 1行を処理
    pub fn push(&mut self, row: &[String]) {
        // すべてのセルが空の行はデータを持たない
        if row.iter().all(|c| is_blank(c)) {
            return;
        }

        match classify(row) {
            RowKind::RegionPlaceholder => {}
            RowKind::SkuStart => self.on_sku_start(row),
            RowKind::TabMarker => self.on_tab_marker(row),
            RowKind::StartMarker | RowKind::EndMarker | RowKind::Data => {
                if let SegmentState::ActiveSku { pending, .. } = &mut self.state {
                    pending.push(row.to_vec());
                }
                // SKUが開かれる前のデータ行は所属先がないため破棄
            }
        }
    }

    /// 入力の終端を処理し、確定したすべてのSKUグループを返す
    pub fn finish(mut self) -> Vec<SkuGroup> {
        self.close_current();
        self.groups
    }

    fn on_sku_start(&mut self, row: &[String]) {
        let id = cell(row, 0).trim();

        if let SegmentState::ActiveSku { group, pending } = &mut self.state {
            if group.id == id {
                pending.push(row.to_vec());
                return;
            }
        }

        self.close_current();
        log::debug!("Opened SKU '{}'", id);

        let mut pending = Vec::new();
        if self.policy == SkuRowPolicy::FirstTabData {
            pending.push(row.to_vec());
        }
        self.state = SegmentState::ActiveSku {
            group: SkuGroup::new(id),
            pending,
        };
    }

    fn on_tab_marker(&mut self, row: &[String]) {
        let SegmentState::ActiveSku { group, pending } = &mut self.state else {
            return;
        };

        flush_pending(group, pending);

        let title = cell(row, 1).trim();
        let title = if title.is_empty() {
            let number = parse_numeric(cell(row, 0)).map(f64::trunc).unwrap_or_default();
            format!("Tab {}", number as i64)
        } else {
            title.to_string()
        };

        log::debug!("SKU '{}': opened tab '{}'", group.id, title);
        group.tabs.push(TabBlock::new(title));
    }

    fn close_current(&mut self) {
        let state = std::mem::replace(&mut self.state, SegmentState::NoActiveSku);
        if let SegmentState::ActiveSku {
            mut group,
            mut pending,
        } = state
        {
            flush_pending(&mut group, &mut pending);
            if group.tabs.is_empty() {
                group.tabs.push(TabBlock::new(DEFAULT_TAB_TITLE));
            }
            log::debug!(
                "Closed SKU '{}' ({} tabs, {} rows)",
                group.id,
                group.tabs.len(),
                group.row_count()
            );
            self.groups.push(group);
        }
    }
}

/// 保留中の行を直近のタブに格納
///
/// 行が残っていてタブがまだない場合は"Details"タブを合成します。
fn flush_pending(group: &mut SkuGroup, pending: &mut Vec<Row>) {
    if pending.is_empty() {
        return;
    }
    match group.tabs.last_mut() {
        Some(tab) => tab.rows.append(pending),
        None => {
            let mut tab = TabBlock::new(DEFAULT_TAB_TITLE);
            tab.rows.append(pending);
            group.tabs.push(tab);
        }
    }
}

/// 行の列全体をSKUグループに分割
///
/// # 引数
///
/// * `rows` - 入力行（インデックス0がマーカー列）
/// * `policy` - SKU行自体の扱い
///
/// # 戻り値
///
/// 入力順のSKUグループ。各グループは少なくとも1つのタブを持ちます。
pub(crate) fn segment(rows: &[Row], policy: SkuRowPolicy) -> Vec<SkuGroup> {
    let mut segmenter = BlockSegmenter::new(policy);
    for row in rows {
        segmenter.push(row);
    }
    segmenter.finish()
}
