//! Style Module
//!
//! ブランドのパレットと列幅から`<style>`ブロックを生成するモジュール。

use std::fmt::Write;

use crate::brand::Palette;

/// スタイルブロックのレイアウト
#[derive(Debug, Clone, Copy)]
pub(crate) enum Layout<'a> {
    /// タブなしの単一ラッパー
    Single,

    /// CSSのみのタブ切り替え（アクティブなタブのDOM idと、対応するペインのid）
    Tabs(&'a [(String, String)]),
}

/// 全ページ共通のリセット
const RESET_CSS: &str = "    * { font-family: nunitoregular, sans-serif; font-size: 14px; box-sizing: border-box; margin: 0; padding: 0; }\n";

/// 単一ラッパー用
const WRAPPER_CSS: &str = r#"    .content-wrapper {
        border: 1px solid var(--border-color);
        border-radius: 5px;
        padding: 25px 20px;
        background: var(--panel-bg);
        position: relative;
        width: 100%;
        clear: both;
    }
"#;

/// タブ切り替え用（選択状態のセレクタは別途生成）
const TABS_CSS: &str = r#"    .tabs { width: 100%; margin-bottom: 20px; position: relative; clear: both; }
    .tabs input[type="radio"] { display: none; }
    .tabs label {
        display: inline-block;
        padding: 10px 18px;
        background: var(--chip-bg);
        border: 1px solid var(--border-color);
        color: var(--text-color);
        border-bottom: none;
        border-radius: 5px 5px 0 0;
        margin-top: 10px;
        margin-right: 3px;
        margin-left: 3px;
        margin-bottom: -1px;
        cursor: pointer;
        font-weight: bold;
        position: relative;
        z-index: 1;
        transition: background-color 0.2s ease, color 0.2s ease;
    }
    .tabs label:hover {
        background-color: var(--chip-hover-bg);
        color: var(--chip-hover-text);
    }
    .tabs .tab-content {
        display: none;
        border: 1px solid var(--border-color);
        border-radius: 0 5px 5px 5px;
        padding: 25px 20px;
        background: var(--panel-bg);
        position: relative;
        width: 100%;
        clear: both;
        margin-top: 0;
    }
"#;

/// 選択中のタブラベル
const ACTIVE_LABEL_CSS: &str = r#" {
        background: var(--panel-bg);
        border-bottom: 1px solid var(--panel-bg);
        border-top: 2px solid var(--accent-color);
        padding-top: 9px;
        color: var(--accent-color);
        z-index: 2;
    }
"#;

/// 仕様ボックス・表・見出し・注記・折りたたみ
const CONTENT_CSS: &str = r#"    .newSpecificationBox {
        box-shadow: 0 1px 3px var(--shadow-color);
        background-color: transparent;
        margin-bottom: 25px;
        padding: 0;
        border: none;
        border-radius: 0;
    }
    .newSpecificationBox.care-box { padding: 0 5px; }
    .newSpecificationBox:last-child { margin-bottom: 0; border-bottom: 2px solid var(--rule-color); }
    .productDetails { width: 100%; }
    .productDetailsSection {
        width: 100%;
        border-collapse: collapse;
        margin-bottom: 20px;
    }
    .productDetails > h3 + .productDetailsSection { margin-top: 0px; }
    .productDetails > *:last-child { margin-bottom: 0 !important; }
    .productDetailsSection tr:nth-child(odd) td, .productDetailsSection tr:nth-child(odd) th {
        background-color: var(--stripe-bg);
    }
    .productDetailsSection tr:nth-child(even) td, .productDetailsSection tr:nth-child(even) th {
        background-color: var(--panel-bg);
    }
    .productDetailsSection th, .productDetailsSection td {
        padding: 14px 18px;
        border-bottom: 1px solid var(--rule-color);
        text-align: left;
        vertical-align: top;
    }
    .productDetailsSection tr:last-child th, .productDetailsSection tr:last-child td {
        border-bottom: none;
    }
"#;

const TYPOGRAPHY_CSS: &str = r#"    h3 {
        font-size: 14px;
        font-weight: bold;
        margin-top: 30px;
        margin-bottom: 12px;
        color: var(--text-color);
    }
    .productDetails > h3:first-child { margin-top: 0; }
    .care-box h3 { margin-top: 0; }
    ul { margin: 0 0 15px 0; padding-left: 25px; list-style: disc; }
    li { margin-bottom: 6px; line-height: 1.5; }
    p.note {
        margin-top: 15px; margin-bottom: 15px;
        font-style: italic;
        color: var(--muted-text);
        background-color: var(--stripe-bg);
        padding: 12px 15px;
        border-left: 4px solid var(--note-border);
    }
    .productDetails > p.note:first-child { margin-top: 0; }
    summary {
        cursor: pointer;
        display: inline-block;
        padding: 5px 10px;
        border-radius: 4px;
        background-color: var(--chip-bg);
        border: 1px solid var(--border-color);
        margin-bottom: 8px;
        margin-top: -8px;
        font-weight: normal;
        transition: background-color 0.2s ease, color 0.2s ease;
        color: var(--text-color);
    }
    summary:hover {
        background-color: var(--chip-hover-bg);
        color: var(--chip-hover-text);
    }
    summary::marker { display: none; content: ""; }
    details { margin-top: 5px; }
    details[open] > summary { margin-bottom: 10px; }
    details > table {
        margin-top: 10px;
        width: 98%;
        max-width: 700px;
        border-collapse: collapse;
        margin-left: 5px;
        border: 1px solid var(--border-color);
        font-size: 13px;
    }
    details > table th, details > table td {
        border: 1px solid var(--rule-color);
        padding: 8px 10px;
        text-align: left;
        vertical-align: middle;
        background-color: var(--panel-bg);
    }
    details > table th {
        background-color: var(--chip-bg);
        color: var(--text-color);
        font-weight: bold;
        border-bottom: 2px solid var(--border-color);
    }
    details > table tbody tr:nth-child(even) td {
        background-color: var(--stripe-bg);
    }
    a {
        color: var(--accent-color);
        text-decoration: none;
    }
    a:hover {
        color: var(--text-color);
        text-decoration: underline;
    }
"#;

/// `<style>`ブロックを生成
///
/// # 引数
///
/// * `palette` - ブランドのパレット
/// * `width` - 仕様ヘッダー列（`.th150`）の幅（CSS値）
/// * `layout` - 単一ラッパーまたはタブ切り替え
pub(crate) fn style_block(
    palette: &Palette,
    width: &str,
    layout: Layout<'_>,
) -> Result<String, std::fmt::Error> {
    let mut css = String::with_capacity(8 * 1024);

    css.push_str("<style>\n    :root {\n");
    for (name, value) in palette.variables() {
        writeln!(css, "        {}: {};", name, value)?;
    }
    css.push_str("    }\n\n");
    css.push_str(RESET_CSS);

    match layout {
        Layout::Single => css.push_str(WRAPPER_CSS),
        Layout::Tabs(ids) => {
            css.push_str(TABS_CSS);

            let panes: Vec<String> = ids
                .iter()
                .map(|(tab, content)| format!("#{}:checked ~ #{}", tab, content))
                .collect();
            writeln!(css, "    {} {{ display: block; }}", panes.join(", "))?;

            let labels: Vec<String> = ids
                .iter()
                .map(|(tab, _)| format!("#{}:checked ~ label[for=\"{}\"]", tab, tab))
                .collect();
            write!(css, "    {}", labels.join(", "))?;
            css.push_str(ACTIVE_LABEL_CSS);
        }
    }

    css.push_str(CONTENT_CSS);
    write!(
        css,
        "    .th150 {{\n        width: {};\n        padding-right: 25px;\n        font-weight: normal;\n        vertical-align: top;\n    }}\n",
        width
    )?;
    css.push_str(TYPOGRAPHY_CSS);
    css.push_str("</style>");

    Ok(css)
}
