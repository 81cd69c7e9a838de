//! Markup Beautifier Module
//!
//! 生成したHTML断片をインデント付きで整形するモジュール。
//! 整形に失敗した場合、呼び出し元は未整形の出力にフォールバックします。

use std::fmt::Debug;

use quick_xml::events::{BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::XlsxSpecError;

/// 終了タグを持たない要素
const VOID_ELEMENTS: [&[u8]; 6] = [b"br", b"input", b"hr", b"img", b"meta", b"link"];

/// マークアップ整形器
///
/// 独自の整形器を`ConverterBuilder::with_beautifier()`で差し替えられます。
///
/// # 使用例
///
/// ```rust
/// use xlsxspec::{MarkupBeautifier, XlsxSpecError};
///
/// #[derive(Debug)]
/// struct Passthrough;
///
/// impl MarkupBeautifier for Passthrough {
///     fn beautify(&self, html: &str) -> Result<String, XlsxSpecError> {
///         Ok(html.to_string())
///     }
/// }
/// ```
pub trait MarkupBeautifier: Send + Sync + Debug {
    /// HTML断片を整形
    fn beautify(&self, html: &str) -> Result<String, XlsxSpecError>;
}

/// `quick-xml`によるイベント単位の整形器
///
/// 2スペースでインデントし、空要素（`<br>`など）を自己終了タグで出力し、
/// 空白のみの行を除去します。
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlBeautifier;

impl MarkupBeautifier for XmlBeautifier {
    fn beautify(&self, html: &str) -> Result<String, XlsxSpecError> {
        let mut reader = Reader::from_reader(html.as_bytes());
        reader.check_end_names(false);

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        let mut buf = Vec::new();
        let mut depth: usize = 0;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Eof => break,
                Event::Start(e) => {
                    if is_void(e.name().as_ref()) {
                        writer.write_event(Event::Empty(e))?;
                    } else {
                        depth += 1;
                        writer.write_event(Event::Start(e))?;
                    }
                }
                Event::End(e) => {
                    if is_void(e.name().as_ref()) {
                        continue;
                    }
                    depth = depth.checked_sub(1).ok_or_else(|| {
                        XlsxSpecError::Beautify(format!(
                            "unexpected closing tag at byte {}",
                            reader.buffer_position()
                        ))
                    })?;
                    writer.write_event(Event::End(e))?;
                }
                Event::Text(e) => {
                    let raw = std::str::from_utf8(&e)
                        .map_err(|err| XlsxSpecError::Beautify(err.to_string()))?;
                    let text = trim_line_breaks(raw);
                    if !text.trim().is_empty() {
                        writer.write_event(Event::Text(BytesText::from_escaped(text)))?;
                    }
                }
                event => writer.write_event(event)?,
            }
            buf.clear();
        }

        if depth != 0 {
            return Err(XlsxSpecError::Beautify(format!(
                "{} unclosed element(s)",
                depth
            )));
        }

        let output = String::from_utf8(writer.into_inner())
            .map_err(|err| XlsxSpecError::Beautify(err.to_string()))?;

        Ok(output
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

fn is_void(name: &[u8]) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(name))
}

/// 改行を含む前後の空白を除去（行内の空白は保持）
fn trim_line_breaks(text: &str) -> &str {
    let mut result = text;

    let leading = result.len() - result.trim_start().len();
    if result[..leading].contains('\n') {
        result = &result[leading..];
    }

    let trailing_start = result.trim_end().len();
    if result[trailing_start..].contains('\n') {
        result = &result[..trailing_start];
    }

    result
}
