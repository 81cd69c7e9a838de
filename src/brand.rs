//! Brand Preset Module
//!
//! ブランドごとのスタイル（CSSトークン）、お手入れ見出しの語彙、
//! 出力先の地域名リストをまとめたプリセットを定義するモジュール。

use serde::{Deserialize, Serialize};

use crate::api::Region;

/// すべてのブランドに共通するお手入れ見出し
const BASE_CARE_HEADERS: [&str; 5] = [
    "graphic care instructions",
    "washing instructions",
    "washing options",
    "drying options",
    "removing wrinkles",
];

/// CSSの色トークン
///
/// 各フィールドはスタイルブロックの`:root`でCSS変数として宣言されます。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// 見出しや本文の色（`--text-color`）
    pub text: String,
    /// 注記の文字色（`--muted-text`）
    pub muted_text: String,
    /// リンクと選択中タブの強調色（`--accent-color`）
    pub accent: String,
    /// コンテンツ領域の背景色（`--panel-bg`）
    pub panel_background: String,
    /// 表の縞模様と注記の背景色（`--stripe-bg`）
    pub stripe: String,
    /// タブラベルと折りたたみボタンの背景色（`--chip-bg`）
    pub chip: String,
    /// ホバー時の背景色（`--chip-hover-bg`）
    pub chip_hover: String,
    /// ホバー時の文字色（`--chip-hover-text`）
    pub chip_hover_text: String,
    /// 枠線の色（`--border-color`）
    pub border: String,
    /// 表の行区切りの色（`--rule-color`）
    pub rule: String,
    /// 注記の左罫線の色（`--note-border`）
    pub note_border: String,
    /// 影の色（`--shadow-color`）
    pub shadow: String,
}

impl Palette {
    /// グレー系のパレット
    pub fn neutral() -> Self {
        Self {
            text: "#333".to_string(),
            muted_text: "#555".to_string(),
            accent: "#333".to_string(),
            panel_background: "#fff".to_string(),
            stripe: "#f9f9f9".to_string(),
            chip: "#f0f0f0".to_string(),
            chip_hover: "#e0e0e0".to_string(),
            chip_hover_text: "#333".to_string(),
            border: "#ccc".to_string(),
            rule: "#eee".to_string(),
            note_border: "#ccc".to_string(),
            shadow: "rgba(0, 0, 0, 0.1)".to_string(),
        }
    }

    /// セージ系のパレット（オレンジのアクセント）
    pub fn sage() -> Self {
        Self {
            text: "#2C3413".to_string(),
            muted_text: "#2C3413".to_string(),
            accent: "#DE6E26".to_string(),
            panel_background: "#F2EFE4".to_string(),
            stripe: "#f9f7f1".to_string(),
            chip: "#dde2d4".to_string(),
            chip_hover: "#707A5C".to_string(),
            chip_hover_text: "#FFFFFF".to_string(),
            border: "#b8bfab".to_string(),
            rule: "#dde2d4".to_string(),
            note_border: "#707A5C".to_string(),
            shadow: "rgba(44, 52, 19, 0.15)".to_string(),
        }
    }

    /// CSS変数名と値の組
    pub(crate) fn variables(&self) -> [(&'static str, &str); 12] {
        [
            ("--text-color", self.text.as_str()),
            ("--muted-text", self.muted_text.as_str()),
            ("--accent-color", self.accent.as_str()),
            ("--panel-bg", self.panel_background.as_str()),
            ("--stripe-bg", self.stripe.as_str()),
            ("--chip-bg", self.chip.as_str()),
            ("--chip-hover-bg", self.chip_hover.as_str()),
            ("--chip-hover-text", self.chip_hover_text.as_str()),
            ("--border-color", self.border.as_str()),
            ("--rule-color", self.rule.as_str()),
            ("--note-border", self.note_border.as_str()),
            ("--shadow-color", self.shadow.as_str()),
        ]
    }
}

/// 出力先（ストアの地域名と、その内容の元になる地域）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanOutTarget {
    /// 出力テーブルの`Region`列に書かれる名前
    pub name: String,

    /// レンダリング元の地域
    pub region: Region,
}

impl FanOutTarget {
    pub fn new(name: impl Into<String>, region: Region) -> Self {
        Self {
            name: name.into(),
            region,
        }
    }
}

/// ブランドプリセット
///
/// # 使用例
///
/// ```rust
/// use xlsxspec::BrandPreset;
///
/// let brand = BrandPreset::neutral().with_care_header("Storage");
/// assert!(brand.care_headers().iter().any(|h| h == "storage"));
/// assert_eq!(brand.fan_out().len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandPreset {
    name: String,
    palette: Palette,
    care_headers: Vec<String>,
    fan_out: Vec<FanOutTarget>,
}

impl BrandPreset {
    /// 任意の名前とパレットでプリセットを生成
    ///
    /// お手入れ見出しは共通の5語、出力先は既定の5地域になります。
    pub fn new(name: impl Into<String>, palette: Palette) -> Self {
        Self {
            name: name.into(),
            palette,
            care_headers: BASE_CARE_HEADERS.iter().map(|s| s.to_string()).collect(),
            fan_out: default_fan_out(),
        }
    }

    /// グレー系のプリセット
    pub fn neutral() -> Self {
        Self::new("neutral", Palette::neutral())
    }

    /// セージ系のプリセット（"care essentials"と"maintenance"を語彙に追加）
    pub fn sage() -> Self {
        Self::new("sage", Palette::sage())
            .with_care_header("care essentials")
            .with_care_header("maintenance")
    }

    /// お手入れ見出しを追加（小文字で保持、重複は無視）
    pub fn with_care_header(mut self, label: impl AsRef<str>) -> Self {
        let lowered = label.as_ref().trim().to_lowercase();
        if !lowered.is_empty() && !self.care_headers.contains(&lowered) {
            self.care_headers.push(lowered);
        }
        self
    }

    /// 出力先のリストを置き換える
    pub fn with_fan_out(mut self, fan_out: Vec<FanOutTarget>) -> Self {
        self.fan_out = fan_out;
        self
    }

    /// パレットを置き換える
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// お手入れ見出しの語彙（小文字）
    pub fn care_headers(&self) -> &[String] {
        &self.care_headers
    }

    pub fn fan_out(&self) -> &[FanOutTarget] {
        &self.fan_out
    }

    /// 出力先リストの検証
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.fan_out.is_empty() {
            return Err(format!("Brand '{}' has an empty fan-out list", self.name));
        }
        for (index, target) in self.fan_out.iter().enumerate() {
            if target.name.trim().is_empty() {
                return Err(format!(
                    "Brand '{}' has an empty region name at fan-out index {}",
                    self.name, index
                ));
            }
            if self.fan_out[..index].iter().any(|t| t.name == target.name) {
                return Err(format!(
                    "Brand '{}' has a duplicate fan-out region '{}'",
                    self.name, target.name
                ));
            }
        }
        Ok(())
    }
}

impl Default for BrandPreset {
    fn default() -> Self {
        Self::neutral()
    }
}

/// 既定の出力先（US: default/canada、UK: unitedkingdom/australia/newzealand）
fn default_fan_out() -> Vec<FanOutTarget> {
    vec![
        FanOutTarget::new("default", Region::Us),
        FanOutTarget::new("canada", Region::Us),
        FanOutTarget::new("unitedkingdom", Region::Uk),
        FanOutTarget::new("australia", Region::Uk),
        FanOutTarget::new("newzealand", Region::Uk),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_vocabulary() {
        let brand = BrandPreset::neutral();
        assert_eq!(brand.care_headers().len(), 5);
        assert!(brand
            .care_headers()
            .iter()
            .any(|h| h == "graphic care instructions"));
    }

    #[test]
    fn test_sage_vocabulary_extends_base() {
        let brand = BrandPreset::sage();
        assert_eq!(brand.care_headers().len(), 7);
        assert!(brand.care_headers().iter().any(|h| h == "care essentials"));
        assert!(brand.care_headers().iter().any(|h| h == "maintenance"));
    }

    #[test]
    fn test_with_care_header_lowercases_and_dedups() {
        let brand = BrandPreset::neutral()
            .with_care_header("  Storage ")
            .with_care_header("STORAGE")
            .with_care_header("Washing Options");
        assert_eq!(brand.care_headers().len(), 6);
        assert_eq!(brand.care_headers()[5], "storage");
    }

    #[test]
    fn test_default_is_neutral() {
        let brand = BrandPreset::default();
        assert_eq!(brand, BrandPreset::neutral());
        assert!(!brand.care_headers().iter().any(|h| h == "maintenance"));
        assert!(!brand.care_headers().iter().any(|h| h == "care essentials"));
    }

    #[test]
    fn test_default_fan_out() {
        let brand = BrandPreset::default();
        let names: Vec<&str> = brand.fan_out().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["default", "canada", "unitedkingdom", "australia", "newzealand"]
        );
        assert_eq!(brand.fan_out()[1].region, Region::Us);
        assert_eq!(brand.fan_out()[4].region, Region::Uk);
    }

    #[test]
    fn test_validate() {
        assert!(BrandPreset::sage().validate().is_ok());

        let empty = BrandPreset::sage().with_fan_out(vec![]);
        assert!(empty.validate().unwrap_err().contains("empty fan-out"));

        let blank = BrandPreset::sage().with_fan_out(vec![FanOutTarget::new(" ", Region::Us)]);
        assert!(blank.validate().unwrap_err().contains("empty region name"));

        let duplicate = BrandPreset::sage().with_fan_out(vec![
            FanOutTarget::new("default", Region::Us),
            FanOutTarget::new("default", Region::Uk),
        ]);
        assert!(duplicate.validate().unwrap_err().contains("duplicate"));
    }

    #[test]
    fn test_preset_roundtrip_through_json() {
        let brand = BrandPreset::neutral().with_care_header("storage");
        let json = serde_json::to_string(&brand).unwrap();
        assert!(json.contains("\"region\":\"us\""));

        let loaded: BrandPreset = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, brand);
    }

    #[test]
    fn test_palette_variables() {
        let palette = Palette::sage();
        let vars = palette.variables();
        assert_eq!(vars[2], ("--accent-color", "#DE6E26"));
        assert!(vars.iter().all(|(name, _)| name.starts_with("--")));
    }
}
