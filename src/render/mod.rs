//! HTML Renderer Module
//!
//! SKUグループの全タブを1地域分のHTML断片にレンダリングするモジュール。
//!
//! # レンダリング方式
//!
//! - アクティブなタブが0個: プレースホルダー文字列（スタイルなし）
//! - アクティブなタブが1個: スタイルブロックと単一ラッパー
//! - アクティブなタブが2個以上: スタイルブロックとCSSのみのタブ切り替え

pub mod beautify;
pub(crate) mod style;

use std::fmt::{self, Write};

use crate::api::Region;
use crate::brand::BrandPreset;
use crate::document::model::{
    CareEntry, CollapsibleSection, NoteBlock, SpecRow, SpecValue, TabDocument,
};
use crate::document::build_tab;
use crate::error::{SkuError, XlsxSpecError};
use crate::normalize::process_cell;
use crate::types::{Diagnostic, SkuGroup};

use self::beautify::MarkupBeautifier;
use self::style::{style_block, Layout};

/// アクティブなタブがない場合の出力
pub(crate) const NO_DATA_PLACEHOLDER: &str =
    "<p>No specification data available for this product in this region.</p>";

/// ヘッダー文字数のサンプルがない場合の列幅
pub(crate) const DEFAULT_WIDTH: &str = "180px";

/// 自動列幅の下限（px）
const MIN_WIDTH_PX: f64 = 150.0;

/// 1文字あたりの平均幅（px）
const AVG_CHAR_PX: f64 = 7.5;

/// パディングの余裕（px）
const PADDING_PX: f64 = 30.0;

/// ネストテーブルのヘッダーセルのクラス
const NESTED_HEADER_CLASSES: [&str; 5] = [
    "th-nested-1",
    "th-nested-2",
    "th-nested-3",
    "th-nested-4",
    "th-nested-5",
];

/// 仕様ヘッダー列の幅の指定方法
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WidthSetting {
    /// ヘッダー文字数から自動計算
    Auto,

    /// 指定されたCSS値をそのまま使用（空の場合は既定値）
    Manual(String),
}

/// ヘッダー文字数の最大値から列幅（px）を計算
///
/// `max(150, max_len × 7.5 + 30)`を10px単位に丸めます（偶数丸め）。
pub(crate) fn compute_column_width(max_len: usize) -> u32 {
    let raw = (max_len as f64 * AVG_CHAR_PX + PADDING_PX).max(MIN_WIDTH_PX);
    ((raw / 10.0).round_ties_even() * 10.0) as u32
}

/// 列幅のCSS値を決定
pub(crate) fn resolve_width(setting: &WidthSetting, samples: &[usize]) -> String {
    match setting {
        WidthSetting::Auto => samples
            .iter()
            .max()
            .map(|&max_len| format!("{}px", compute_column_width(max_len)))
            .unwrap_or_else(|| DEFAULT_WIDTH.to_string()),
        WidthSetting::Manual(value) if value.trim().is_empty() => DEFAULT_WIDTH.to_string(),
        WidthSetting::Manual(value) => value.trim().to_string(),
    }
}

/// 1地域分のレンダリング結果
#[derive(Debug, Clone)]
pub(crate) struct RegionRender {
    pub html: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// アクティブなタブ
struct ActiveTab<'g> {
    /// 元のタブ位置（1始まり）
    position: usize,
    title: &'g str,
    document: TabDocument,
}

/// HTMLレンダラー
#[derive(Debug, Clone, Copy)]
pub(crate) struct HtmlRenderer<'a> {
    brand: &'a BrandPreset,
    width: &'a WidthSetting,
    beautifier: Option<&'a dyn MarkupBeautifier>,
}

impl<'a> HtmlRenderer<'a> {
    /// 新しいレンダラーを生成
    ///
    /// `beautifier`が`None`の場合、整形せずに出力します。
    pub fn new(
        brand: &'a BrandPreset,
        width: &'a WidthSetting,
        beautifier: Option<&'a dyn MarkupBeautifier>,
    ) -> Self {
        Self {
            brand,
            width,
            beautifier,
        }
    }

    /// SKUグループを1地域分レンダリング
    ///
    /// # 戻り値
    ///
    /// * `Ok(RegionRender)` - HTML断片と構造上の警告
    /// * `Err(SkuError)` - マークアップの書き込みに失敗した場合（`XlsxSpecError::Render`）
    pub fn render(&self, group: &SkuGroup, region: Region) -> Result<RegionRender, SkuError> {
        let columns = region.columns();
        let mut diagnostics = Vec::new();
        let mut active = Vec::new();

        for (index, tab) in group.tabs.iter().enumerate() {
            let (document, warnings) = build_tab(&tab.rows, columns, self.brand.care_headers());

            for kind in warnings {
                let diagnostic = Diagnostic {
                    sku: group.id.clone(),
                    region,
                    tab: index + 1,
                    kind,
                };
                log::warn!("{}", diagnostic);
                diagnostics.push(diagnostic);
            }

            if document.is_active() {
                active.push(ActiveTab {
                    position: index + 1,
                    title: &tab.title,
                    document,
                });
            }
        }

        if active.is_empty() {
            return Ok(RegionRender {
                html: NO_DATA_PLACEHOLDER.to_string(),
                diagnostics,
            });
        }

        let raw = self
            .render_tabs(&active, region)
            .map_err(|e| {
                SkuError::new(XlsxSpecError::Render {
                    sku: group.id.clone(),
                    message: format!("failed to write {} markup: {}", region.dom_key(), e),
                })
            })?;

        Ok(RegionRender {
            html: self.beautify(raw, &group.id),
            diagnostics,
        })
    }

    fn render_tabs(&self, active: &[ActiveTab<'_>], region: Region) -> Result<String, fmt::Error> {
        let samples: Vec<usize> = active
            .iter()
            .flat_map(|tab| tab.document.header_lengths.iter().copied())
            .collect();
        let width = resolve_width(self.width, &samples);
        let palette = self.brand.palette();

        if let [only] = active {
            let mut inner = String::new();
            write_tab_fragments(&mut inner, &only.document)?;

            let mut html = style_block(palette, &width, Layout::Single)?;
            write!(
                html,
                "\n\n<div class=\"content-wrapper\">\n{}\n</div>",
                inner.trim()
            )?;
            return Ok(html);
        }

        let key = region.dom_key();
        let ids: Vec<(String, String)> = active
            .iter()
            .map(|tab| {
                (
                    format!("tab{}{}", key, tab.position),
                    format!("content{}{}", key, tab.position),
                )
            })
            .collect();

        let mut radios = Vec::with_capacity(active.len());
        let mut labels = Vec::with_capacity(active.len());
        let mut panes = Vec::with_capacity(active.len());

        for (index, (tab, (tab_id, content_id))) in active.iter().zip(&ids).enumerate() {
            radios.push(format!(
                "<input type=\"radio\" id=\"{}\" name=\"tabs{}\"{}>",
                tab_id,
                key,
                if index == 0 { " checked" } else { "" }
            ));
            labels.push(format!(
                "<label for=\"{}\">{}</label>",
                tab_id,
                process_cell(tab.title, true)
            ));

            let mut pane = format!("<div class=\"tab-content\" id=\"{}\">\n", content_id);
            write_tab_fragments(&mut pane, &tab.document)?;
            pane.push_str("</div>");
            panes.push(pane);
        }

        let mut html = style_block(palette, &width, Layout::Tabs(&ids))?;
        html.push_str("\n\n<div class=\"tabs\">\n");
        html.push_str("    <!-- Tab Radio Buttons (Hidden) -->\n");
        writeln!(html, "    {}\n", radios.join("\n    "))?;
        html.push_str("    <!-- Tab Labels -->\n");
        writeln!(html, "    {}\n", labels.join("\n    "))?;
        html.push_str("    <!-- Tab Content Panes -->\n");
        writeln!(html, "    {}", panes.join("\n    "))?;
        html.push_str("</div> <!-- end tabs -->\n");

        Ok(html)
    }

    /// 整形器を通す（失敗時は未整形の出力を返す）
    fn beautify(&self, raw: String, sku: &str) -> String {
        let Some(beautifier) = self.beautifier else {
            return raw;
        };

        match beautifier.beautify(&raw) {
            Ok(pretty) if !pretty.trim().is_empty() => pretty,
            Ok(_) => {
                log::warn!(
                    "Beautifier returned empty markup for SKU '{}'; using raw HTML",
                    sku
                );
                raw
            }
            Err(e) => {
                log::warn!("{} for SKU '{}'; using raw HTML", e, sku);
                raw
            }
        }
    }
}

/// タブの仕様ボックスとお手入れボックスを書き出す（それぞれ末尾に改行）
fn write_tab_fragments(out: &mut String, document: &TabDocument) -> fmt::Result {
    if document.has_specs() {
        write_specs(out, document)?;
        out.push('\n');
    }
    if document.has_care() {
        write_care(out, document)?;
        out.push('\n');
    }
    Ok(())
}

fn write_specs(out: &mut String, document: &TabDocument) -> fmt::Result {
    out.push_str("<div class=\"newSpecificationBox specs-box\">\n<div class=\"productDetails\">\n");

    for section in &document.sections {
        if let Some(title) = section.title.as_deref().filter(|t| !t.is_empty()) {
            writeln!(out, "<h3>{}</h3>", title)?;
        }
        if !section.rows.is_empty() {
            out.push_str("<table class=\"productDetailsSection\">\n<tbody>\n");
            for (index, row) in section.rows.iter().enumerate() {
                if index > 0 {
                    out.push('\n');
                }
                write_spec_row(out, row)?;
            }
            out.push_str("\n</tbody>\n</table>\n");
        }
        for note in &section.notes {
            write_note(out, note)?;
            out.push('\n');
        }
    }

    out.push_str("</div>\n</div>");
    Ok(())
}

fn write_spec_row(out: &mut String, row: &SpecRow) -> fmt::Result {
    write!(
        out,
        "<tr>\n<th class=\"th150\" style=\"text-align: left;\">{}</th>\n<td>",
        row.header
    )?;
    match &row.value {
        SpecValue::Text(values) => out.push_str(&values.join("<br>")),
        SpecValue::Details(section) => write_details(out, section)?,
    }
    out.push_str("</td>\n</tr>");
    Ok(())
}

fn write_details(out: &mut String, section: &CollapsibleSection) -> fmt::Result {
    out.push_str("<details>\n<summary>Click to view</summary>\n");

    if !section.header.is_empty() {
        out.push_str("<table>\n<thead>\n<tr>\n");
        for (index, text) in section.header.iter().enumerate() {
            match NESTED_HEADER_CLASSES.get(index) {
                Some(class) => writeln!(out, "<th class=\"{}\">{}</th>", class, text)?,
                None => writeln!(out, "<th>{}</th>", text)?,
            }
        }
        out.push_str("</tr>\n</thead>\n<tbody>\n");

        let column_count = section.header.len();
        for row in section.visible_rows() {
            out.push_str("<tr>\n");
            for index in 0..column_count {
                writeln!(out, "<td>{}</td>", row.get(index).map_or("", String::as_str))?;
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody>\n</table>\n");
    } else if section.has_content() {
        out.push_str("<table>\n<tbody>\n");
        for row in section.visible_rows() {
            out.push_str("<tr>\n");
            for text in row {
                writeln!(out, "<td>{}</td>", text)?;
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody>\n</table>\n");
    } else {
        out.push_str("<p style=\"margin-left: 20px; margin-top: 10px;\">No details available.</p>\n");
    }

    out.push_str("</details>");
    Ok(())
}

fn write_note(out: &mut String, note: &NoteBlock) -> fmt::Result {
    write!(out, "<p class=\"note\"><strong>Note:</strong> {}</p>", note.text)
}

fn write_care(out: &mut String, document: &TabDocument) -> fmt::Result {
    let mut parts = Vec::new();

    for entry in document.care.visible_entries() {
        match entry {
            CareEntry::Heading(text) => parts.push(format!("<h3>{}</h3>", text)),
            CareEntry::List(items) => {
                parts.push("<ul>".to_string());
                parts.extend(items.iter().map(|item| format!("<li>{}</li>", item)));
                parts.push("</ul>".to_string());
            }
            CareEntry::Note(note) => {
                let mut part = String::new();
                write_note(&mut part, note)?;
                parts.push(part);
            }
        }
    }

    write!(
        out,
        "<div class=\"newSpecificationBox care-box\">\n<div class=\"productDetails\">\n{}\n</div>\n</div>",
        parts.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DiagnosticKind, Row, TabBlock};

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn group(tabs: Vec<(&str, Vec<Row>)>) -> SkuGroup {
        let mut group = SkuGroup::new("SKU1");
        for (title, rows) in tabs {
            let mut tab = TabBlock::new(title);
            tab.rows = rows;
            group.tabs.push(tab);
        }
        group
    }

    fn render(group: &SkuGroup, region: Region) -> RegionRender {
        let brand = BrandPreset::sage();
        let width = WidthSetting::Auto;
        HtmlRenderer::new(&brand, &width, None)
            .render(group, region)
            .unwrap()
    }

    #[test]
    fn test_compute_column_width() {
        assert_eq!(compute_column_width(0), 150);
        assert_eq!(compute_column_width(16), 150);
        // 20 × 7.5 + 30 = 180
        assert_eq!(compute_column_width(20), 180);
        // 21 × 7.5 + 30 = 187.5 → 190
        assert_eq!(compute_column_width(21), 190);
        // 22 × 7.5 + 30 = 195 → 19.5は偶数丸めで20
        assert_eq!(compute_column_width(22), 200);
        // 26 × 7.5 + 30 = 225 → 22.5は偶数丸めで22
        assert_eq!(compute_column_width(26), 220);
    }

    #[test]
    fn test_resolve_width() {
        assert_eq!(resolve_width(&WidthSetting::Auto, &[]), "180px");
        assert_eq!(resolve_width(&WidthSetting::Auto, &[4, 20, 5]), "180px");
        assert_eq!(resolve_width(&WidthSetting::Auto, &[40]), "330px");
        assert_eq!(
            resolve_width(&WidthSetting::Manual("25%".to_string()), &[40]),
            "25%"
        );
        assert_eq!(
            resolve_width(&WidthSetting::Manual(" ".to_string()), &[40]),
            "180px"
        );
    }

    #[test]
    fn test_single_tab_wrapper() {
        let g = group(vec![(
            "Details",
            vec![row(&["", "Color", "Red"]), row(&["", "Size", "Large"])],
        )]);
        let result = render(&g, Region::Us);

        assert!(result.html.starts_with("<style>"));
        assert!(result.html.contains("\n\n<div class=\"content-wrapper\">\n<div class=\"newSpecificationBox specs-box\">"));
        assert!(result.html.contains(
            "<tr>\n<th class=\"th150\" style=\"text-align: left;\">Color</th>\n<td>Red</td>\n</tr>"
        ));
        assert!(result.html.ends_with("</div>\n</div>\n</div>"));
        assert!(!result.html.contains("class=\"tabs\""));
        assert!(!result.html.contains("care-box\">"));
    }

    #[test]
    fn test_placeholder_for_empty_region() {
        let g = group(vec![("Details", vec![row(&["", "Color", "Red"])])]);
        let result = render(&g, Region::Uk);
        assert_eq!(result.html, NO_DATA_PLACEHOLDER);
    }

    #[test]
    fn test_multi_tab_switcher() {
        let g = group(vec![
            ("Frame", vec![row(&["", "Material", "Aluminum"])]),
            ("Empty", vec![row(&["", "", "", "", "UK only", "x"])]),
            ("Canopy", vec![row(&["", "Fabric", "Polyester"])]),
        ]);
        let html = render(&g, Region::Us).html;

        assert!(html.contains("<input type=\"radio\" id=\"tabus1\" name=\"tabsus\" checked>"));
        assert!(html.contains("<input type=\"radio\" id=\"tabus3\" name=\"tabsus\">"));
        assert!(!html.contains("tabus2"));
        assert!(html.contains("<label for=\"tabus1\">Frame</label>"));
        assert!(html.contains("<label for=\"tabus3\">Canopy</label>"));
        assert!(html.contains("<div class=\"tab-content\" id=\"contentus3\">"));
        assert!(html.contains("#tabus1:checked ~ #contentus1, #tabus3:checked ~ #contentus3"));
        assert!(html.ends_with("</div> <!-- end tabs -->\n"));
    }

    #[test]
    fn test_details_markup() {
        let g = group(vec![(
            "Details",
            vec![
                row(&["", "Dimensions"]),
                row(&["Start", "Part", "Width"]),
                row(&["", "Pole", "10", "ignored"]),
                row(&["End", "Base"]),
            ],
        )]);
        let html = render(&g, Region::Us).html;

        assert!(html.contains("<details>\n<summary>Click to view</summary>\n<table>\n<thead>"));
        assert!(html.contains("<th class=\"th-nested-1\">Part</th>\n<th class=\"th-nested-2\">Width</th>"));
        // ヘッダーの列数に切り詰め・補完される
        assert!(html.contains("<tr>\n<td>Pole</td>\n<td>10</td>\n</tr>"));
        assert!(html.contains("<tr>\n<td>Base</td>\n<td></td>\n</tr>"));
        assert!(html.contains(">Dimensions</th>\n<td><details>"));
    }

    #[test]
    fn test_details_without_content() {
        let g = group(vec![(
            "Details",
            vec![row(&["", "Extras"]), row(&["Start"]), row(&["End"])],
        )]);
        let html = render(&g, Region::Us).html;
        assert!(html.contains("No details available."));
    }

    #[test]
    fn test_care_and_notes_markup() {
        let g = group(vec![(
            "Details",
            vec![
                row(&["", "Color", "Red"]),
                row(&["", "Note:", "Handle with care"]),
                row(&["", "Washing Instructions", "Hand wash"]),
            ],
        )]);
        let html = render(&g, Region::Us).html;

        assert!(html.contains("<p class=\"note\"><strong>Note:</strong> Handle with care</p>"));
        assert!(html.contains(
            "<div class=\"newSpecificationBox care-box\">\n<div class=\"productDetails\">\n<h3>Washing Instructions</h3>\n<ul>\n<li>Hand wash</li>\n</ul>\n</div>\n</div>"
        ));
    }

    #[test]
    fn test_unmatched_start_is_reported() {
        let g = group(vec![(
            "Details",
            vec![row(&["", "Dimensions"]), row(&["Start", "W", "H"])],
        )]);
        let result = render(&g, Region::Us);

        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].tab, 1);
        assert!(matches!(
            result.diagnostics[0].kind,
            DiagnosticKind::UnmatchedStart { .. }
        ));
        assert!(result.html.contains(">W</th>\n<td>H</td>"));
    }

    #[test]
    fn test_manual_width_used_verbatim() {
        let g = group(vec![("Details", vec![row(&["", "Color", "Red"])])]);
        let brand = BrandPreset::neutral();
        let width = WidthSetting::Manual("12em".to_string());
        let html = HtmlRenderer::new(&brand, &width, None)
            .render(&g, Region::Us)
            .unwrap()
            .html;
        assert!(html.contains("width: 12em;"));
    }

    #[derive(Debug)]
    struct FailingBeautifier;

    impl MarkupBeautifier for FailingBeautifier {
        fn beautify(&self, _html: &str) -> Result<String, XlsxSpecError> {
            Err(XlsxSpecError::Beautify("boom".to_string()))
        }
    }

    #[test]
    fn test_beautifier_failure_falls_back_to_raw() {
        let g = group(vec![("Details", vec![row(&["", "Color", "Red"])])]);
        let brand = BrandPreset::sage();
        let width = WidthSetting::Auto;

        let raw = HtmlRenderer::new(&brand, &width, None)
            .render(&g, Region::Us)
            .unwrap()
            .html;
        let fallback = HtmlRenderer::new(&brand, &width, Some(&FailingBeautifier))
            .render(&g, Region::Us)
            .unwrap()
            .html;

        assert_eq!(raw, fallback);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_width_is_monotonic(a in 0usize..400, b in 0usize..400) {
                let (short, long) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(compute_column_width(short) <= compute_column_width(long));
            }

            #[test]
            fn test_width_is_rounded_and_bounded(len in 0usize..1000) {
                let width = compute_column_width(len);
                prop_assert_eq!(width % 10, 0);
                prop_assert!(width >= 150);
            }
        }
    }
}
