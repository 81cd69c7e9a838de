//! Cell Normalizer Module
//!
//! セル値を文字列に正規化するモジュール。
//! 数値文字列の判定と、複数行セルの`<br>`結合もここで扱います。

use calamine::Data;
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// 1日の秒数
const SECONDS_PER_DAY: f64 = 86_400.0;

/// 整数として表示する浮動小数点数の上限（これ以上は指数表記を避けられない）
const MAX_INTEGRAL_FLOAT: f64 = 1e15;

/// セルノーマライザー
///
/// 表形式リーダーから受け取ったセル値を、トリム済み文字列に変換します。
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct CellNormalizer;

impl CellNormalizer {
    /// calamineのセル値をトリム済み文字列に変換
    ///
    /// # 変換規則
    ///
    /// - 文字列: 前後の空白を除去
    /// - 整数および小数部のない浮動小数点数: 小数点なしで出力（`5.0` → `"5"`）
    /// - 浮動小数点数: 最短の往復可能表現
    /// - 論理値: `True` / `False`
    /// - 日時: `YYYY-MM-DD HH:MM:SS`（1900年エポック）
    /// - ISO日時・期間文字列: そのまま
    /// - エラー値: `#DIV/0!` などのリテラル
    /// - 空セル: 空文字列
    pub fn normalize(&self, data: &Data) -> String {
        match data {
            Data::Empty => String::new(),
            Data::String(s) => s.trim().to_string(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => format_float(*f),
            Data::Bool(b) => if *b { "True" } else { "False" }.to_string(),
            Data::DateTime(dt) => {
                let serial = dt.as_f64();
                match serial_to_datetime(serial) {
                    Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
                    None => format_float(serial),
                }
            }
            Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
            Data::Error(e) => e.to_string(),
        }
    }
}

/// 浮動小数点数を文字列化
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_INTEGRAL_FLOAT {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Excelのシリアル値を日時に変換（1900年エポック）
///
/// 1899-12-30を起点とします。Excelの1900年うるう年バグにより、
/// シリアル値60以前の日付は1日ずれます。
fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let days = serial.floor();
    let seconds = ((serial - days) * SECONDS_PER_DAY).round() as i64;

    epoch
        .checked_add_signed(Duration::days(days as i64))?
        .checked_add_signed(Duration::seconds(seconds))
}

/// マーカー文字列が有限の数値として解釈できるかを判定
///
/// 整数・小数を受け付けます。`NaN`や無限大は数値として扱いません。
pub(crate) fn is_numeric(s: &str) -> bool {
    parse_numeric(s).is_some()
}

/// マーカー文字列を有限の数値として解釈
pub(crate) fn parse_numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// セル内容を処理
///
/// # 引数
///
/// * `content` - セル内容
/// * `join_lines` - `true`の場合、空でない行が2行以上あれば各行をトリムして`<br>`で結合
///
/// # 戻り値
///
/// 処理済み文字列。空白のみのセルは空文字列になります。
pub(crate) fn process_cell(content: &str, join_lines: bool) -> String {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if !join_lines {
        return trimmed.to_string();
    }

    let lines: Vec<&str> = trimmed
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() > 1 {
        lines.join("<br>")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn test_normalize_string_is_trimmed() {
        let normalizer = CellNormalizer;
        assert_eq!(
            normalizer.normalize(&Data::String("  Red \n".to_string())),
            "Red"
        );
        assert_eq!(normalizer.normalize(&Data::String("   ".to_string())), "");
        assert_eq!(normalizer.normalize(&Data::Empty), "");
    }

    #[test]
    fn test_normalize_numbers() {
        let normalizer = CellNormalizer;
        assert_eq!(normalizer.normalize(&Data::Int(2)), "2");
        assert_eq!(normalizer.normalize(&Data::Float(1.0)), "1");
        assert_eq!(normalizer.normalize(&Data::Float(0.5)), "0.5");
        assert_eq!(normalizer.normalize(&Data::Float(-12.25)), "-12.25");
    }

    #[test]
    fn test_normalize_bool_and_error() {
        let normalizer = CellNormalizer;
        assert_eq!(normalizer.normalize(&Data::Bool(true)), "True");
        assert_eq!(normalizer.normalize(&Data::Bool(false)), "False");
        assert_eq!(
            normalizer.normalize(&Data::Error(CellErrorType::Div0)),
            "#DIV/0!"
        );
    }

    #[test]
    fn test_serial_to_datetime() {
        // 45000 = 2023-03-15
        let datetime = serial_to_datetime(45000.0).unwrap();
        assert_eq!(datetime.format("%Y-%m-%d").to_string(), "2023-03-15");

        // 正午
        let noon = serial_to_datetime(45000.5).unwrap();
        assert_eq!(noon.format("%H:%M:%S").to_string(), "12:00:00");

        assert!(serial_to_datetime(-1.0).is_none());
        assert!(serial_to_datetime(f64::NAN).is_none());
    }

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric("1"));
        assert!(is_numeric(" 2 "));
        assert!(is_numeric("3.5"));
        assert!(is_numeric("-1"));
        assert!(is_numeric("1e3"));

        assert!(!is_numeric(""));
        assert!(!is_numeric("SKU1"));
        assert!(!is_numeric("NaN"));
        assert!(!is_numeric("inf"));
        assert!(!is_numeric("-infinity"));
        assert!(!is_numeric("1,000"));
    }

    #[test]
    fn test_process_cell_without_joining() {
        assert_eq!(process_cell("  Color  ", false), "Color");
        assert_eq!(process_cell("a\nb", false), "a\nb");
        assert_eq!(process_cell("   ", false), "");
    }

    #[test]
    fn test_process_cell_joins_lines() {
        assert_eq!(process_cell("Line 1\nLine 2", true), "Line 1<br>Line 2");
        assert_eq!(process_cell(" a \n\n  b \n c", true), "a<br>b<br>c");
        // 1行のみの場合はトリム済み文字列
        assert_eq!(process_cell("  single  ", true), "single");
        assert_eq!(process_cell("", true), "");
    }
}
