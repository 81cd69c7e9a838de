//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use std::io::{Read, Seek, Write};
use std::sync::Arc;

use rayon::prelude::*;

use crate::api::{OutputFormat, Region, SheetSelector, SkuRowPolicy};
use crate::brand::BrandPreset;
use crate::error::{SkuError, XlsxSpecError};
use crate::output::{OutputFormatter, OutputRow};
use crate::parser::WorkbookReader;
use crate::render::beautify::{MarkupBeautifier, XmlBeautifier};
use crate::render::{HtmlRenderer, WidthSetting};
use crate::security::SecurityConfig;
use crate::segment::segment;
use crate::types::{Diagnostic, Row, SkuGroup};

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// 仕様ヘッダー列の幅を自動計算するか
    pub auto_width: bool,

    /// 自動計算しない場合に使用するCSS値
    pub manual_width: String,

    /// ブランドプリセット
    pub brand: BrandPreset,

    /// SKU行自体の扱い
    pub sku_row_policy: SkuRowPolicy,

    /// 出力を整形するか
    pub pretty_print: bool,

    /// マークアップ整形器
    pub beautifier: Arc<dyn MarkupBeautifier>,

    /// シート選択方式（ワークブック入力時）
    pub sheet_selector: SheetSelector,

    /// SKUグループを並列にレンダリングするか
    pub parallel: bool,

    /// 入力の制限
    pub security: SecurityConfig,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            auto_width: true,
            manual_width: String::new(),
            brand: BrandPreset::default(),
            sku_row_policy: SkuRowPolicy::default(),
            pretty_print: true,
            beautifier: Arc::new(XmlBeautifier),
            sheet_selector: SheetSelector::default(),
            parallel: true,
            security: SecurityConfig::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Converter`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust
/// use xlsxspec::{BrandPreset, ConverterBuilder, SkuRowPolicy};
///
/// # fn main() -> Result<(), xlsxspec::XlsxSpecError> {
/// let converter = ConverterBuilder::new()
///     .with_brand(BrandPreset::neutral())
///     .with_sku_row_policy(SkuRowPolicy::FirstTabData)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 列幅: 自動計算
    /// - ブランド: `BrandPreset::neutral()`（お手入れ見出しは共通の5語のみ）
    /// - SKU行: 識別子としてのみ使用
    /// - 整形: `XmlBeautifier`で整形する
    /// - シート選択: 先頭のシート
    /// - 並列レンダリング: 有効
    pub fn new() -> Self {
        Self::default()
    }

    /// 仕様ヘッダー列の幅を自動計算するかを指定する
    pub fn with_auto_width(mut self, enabled: bool) -> Self {
        self.config.auto_width = enabled;
        self
    }

    /// 自動計算しない場合の列幅を指定する
    ///
    /// `with_auto_width(false)`の場合のみ使用されます。値は検証されずにそのまま
    /// CSSに書き込まれます（`px`/`%`で終わらない場合は警告ログのみ）。
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use xlsxspec::ConverterBuilder;
    ///
    /// let builder = ConverterBuilder::new()
    ///     .with_auto_width(false)
    ///     .with_manual_width("220px");
    /// ```
    pub fn with_manual_width(mut self, width: impl Into<String>) -> Self {
        self.config.manual_width = width.into();
        self
    }

    /// ブランドプリセットを指定する
    pub fn with_brand(mut self, brand: BrandPreset) -> Self {
        self.config.brand = brand;
        self
    }

    /// SKU行自体の扱いを指定する
    pub fn with_sku_row_policy(mut self, policy: SkuRowPolicy) -> Self {
        self.config.sku_row_policy = policy;
        self
    }

    /// 出力を整形するかを指定する
    pub fn with_pretty_print(mut self, enabled: bool) -> Self {
        self.config.pretty_print = enabled;
        self
    }

    /// マークアップ整形器を差し替える
    pub fn with_beautifier(mut self, beautifier: Arc<dyn MarkupBeautifier>) -> Self {
        self.config.beautifier = beautifier;
        self
    }

    /// 変換対象のシートを選択する
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use xlsxspec::{ConverterBuilder, SheetSelector};
    ///
    /// // シートをインデックスで指定
    /// let builder = ConverterBuilder::new()
    ///     .with_sheet_selector(SheetSelector::Index(1));
    ///
    /// // シートを名前で指定
    /// let builder = ConverterBuilder::new()
    ///     .with_sheet_selector(SheetSelector::Name("Specs".to_string()));
    /// ```
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// SKUグループを並列にレンダリングするかを指定する
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.config.parallel = enabled;
        self
    }

    /// 入力の制限を指定する
    pub fn with_security_config(mut self, security: SecurityConfig) -> Self {
        self.config.security = security;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Converter)`: 設定が有効な場合、Converterインスタンス
    /// * `Err(XlsxSpecError::Config)`: 設定が無効な場合
    ///
    /// # 発生し得るエラー
    ///
    /// * `XlsxSpecError::Config(String)`: 設定の検証に失敗した場合
    ///   * ブランドの出力先リストが空、名前が空、または重複している
    ///   * 入力サイズまたはSKU行数の上限が0
    pub fn build(self) -> Result<Converter, XlsxSpecError> {
        // 1. ブランドの検証
        self.config.brand.validate().map_err(XlsxSpecError::Config)?;

        // 2. 制限値の検証
        self.config.security.validate()?;

        // 3. 手動列幅の確認（値はそのまま使用する）
        let manual = self.config.manual_width.trim();
        if !self.config.auto_width
            && !manual.is_empty()
            && !manual.ends_with("px")
            && !manual.ends_with('%')
        {
            log::warn!(
                "Manual width '{}' does not end with 'px' or '%'; it is used as given",
                manual
            );
        }

        Ok(Converter::new(self.config))
    }
}

/// 1つのSKUの変換失敗
#[derive(Debug, Clone)]
pub struct SkuFailure {
    /// SKU識別子
    pub sku: String,

    /// エラーメッセージ
    pub message: String,

    /// エラーを生成した箇所で取得したバックトレース
    pub trace: String,
}

/// 変換結果
#[derive(Debug, Clone, Default)]
pub struct ConversionReport {
    /// 出力テーブルの行（SKUごとに出力先の数だけ並ぶ）
    pub rows: Vec<OutputRow>,

    /// 変換に失敗したSKU
    pub failures: Vec<SkuFailure>,

    /// 構造上の警告
    pub diagnostics: Vec<Diagnostic>,
}

impl ConversionReport {
    /// 出力テーブルを指定された形式で書き出す
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use xlsxspec::{ConverterBuilder, OutputFormat};
    ///
    /// # fn main() -> Result<(), xlsxspec::XlsxSpecError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let rows = vec![
    ///     vec!["SKU1".to_string()],
    ///     vec!["".to_string(), "Color".to_string(), "Red".to_string()],
    /// ];
    /// let report = converter.convert_rows(&rows)?;
    ///
    /// let mut csv = Vec::new();
    /// report.write(OutputFormat::Csv, &mut csv)?;
    /// assert!(csv.starts_with(b"SKU,Region,HTML"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn write<W: Write>(&self, format: OutputFormat, mut writer: W) -> Result<(), XlsxSpecError> {
        OutputFormatter::from_format(format).render(&self.rows, &mut writer)
    }
}

/// 1つのSKUグループの処理結果
enum GroupOutcome {
    /// 出力行と警告
    Rendered(Vec<OutputRow>, Vec<Diagnostic>),

    /// レンダリング対象の行がない
    Empty,

    Failed(SkuFailure),
}

/// 変換処理のファサード
///
/// 行の列（またはXLSXワークブック）を、SKU / Region / HTMLのテーブルに変換する
/// メインエントリーポイントです。`ConverterBuilder`で構築された設定に基づいて
/// 変換処理を実行します。
///
/// # 使用例
///
/// ```rust
/// use xlsxspec::ConverterBuilder;
///
/// # fn main() -> Result<(), xlsxspec::XlsxSpecError> {
/// let converter = ConverterBuilder::new().build()?;
/// let rows: Vec<Vec<String>> = vec![
///     vec!["SKU1".into(), "Color".into(), "Red".into()],
///     vec!["".into(), "Size".into(), "Large".into()],
/// ];
///
/// let report = converter.convert_rows(&rows)?;
/// assert_eq!(report.rows.len(), 5);
/// assert_eq!(report.rows[0].region, "default");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,

    /// 列幅の指定方法
    width: WidthSetting,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        let width = if config.auto_width {
            WidthSetting::Auto
        } else {
            WidthSetting::Manual(config.manual_width.clone())
        };
        Self { config, width }
    }

    /// 行の列を変換
    ///
    /// # 引数
    ///
    /// * `rows` - 入力行（インデックス0がA列、セルはトリム済み文字列）
    ///
    /// # 戻り値
    ///
    /// * `Ok(ConversionReport)` - 1行以上出力された場合
    /// * `Err(XlsxSpecError::NoValidData)` - 出力が1行もない場合
    ///
    /// # 処理フロー
    ///
    /// 1. 行をSKUグループとタブに分割
    /// 2. 各SKUグループをUS/UKの2地域分レンダリング（並列化可能）
    /// 3. 地域ごとのHTMLを出力先の地域名に展開
    ///
    /// 1つのSKUの失敗は他のSKUの処理を中断しません。
    pub fn convert_rows(&self, rows: &[Row]) -> Result<ConversionReport, XlsxSpecError> {
        let groups = segment(rows, self.config.sku_row_policy);
        let beautifier = if self.config.pretty_print {
            Some(self.config.beautifier.as_ref())
        } else {
            None
        };
        let renderer = HtmlRenderer::new(&self.config.brand, &self.width, beautifier);

        let outcomes: Vec<GroupOutcome> = if self.config.parallel {
            groups
                .par_iter()
                .map(|group| self.process_group(&renderer, group))
                .collect()
        } else {
            groups
                .iter()
                .map(|group| self.process_group(&renderer, group))
                .collect()
        };

        let mut report = ConversionReport::default();
        for outcome in outcomes {
            match outcome {
                GroupOutcome::Rendered(rows, diagnostics) => {
                    report.rows.extend(rows);
                    report.diagnostics.extend(diagnostics);
                }
                GroupOutcome::Empty => {}
                GroupOutcome::Failed(failure) => report.failures.push(failure),
            }
        }

        log::info!(
            "Converted {} SKU(s): {} output row(s), {} failure(s)",
            groups.len(),
            report.rows.len(),
            report.failures.len()
        );

        if report.rows.is_empty() {
            return Err(XlsxSpecError::no_valid_data());
        }
        Ok(report)
    }

    /// XLSXワークブックを変換
    ///
    /// # 引数
    ///
    /// * `input` - Excelファイルを読み込むためのリーダー（Read + Seekトレイトを実装）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use std::fs::File;
    /// use xlsxspec::{ConverterBuilder, OutputFormat};
    ///
    /// # fn main() -> Result<(), xlsxspec::XlsxSpecError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let report = converter.convert(File::open("specs.xlsx")?)?;
    /// report.write(OutputFormat::Json, File::create("specs.json")?)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert<R: Read + Seek>(&self, input: R) -> Result<ConversionReport, XlsxSpecError> {
        let mut reader = WorkbookReader::open(input, &self.config.security)?;
        let sheet = reader.select_sheet(&self.config.sheet_selector)?;
        let rows = reader.read_rows(&sheet)?;
        self.convert_rows(&rows)
    }

    /// 1つのSKUグループを処理
    fn process_group(&self, renderer: &HtmlRenderer<'_>, group: &SkuGroup) -> GroupOutcome {
        if !group.has_rows() {
            log::info!("SKU '{}' has no renderable tab rows", group.id);
            return GroupOutcome::Empty;
        }

        match self.render_group(renderer, group) {
            Ok((rows, diagnostics)) => GroupOutcome::Rendered(rows, diagnostics),
            Err(e) => {
                log::error!("Failed to convert SKU '{}': {}", group.id, e.error);
                GroupOutcome::Failed(SkuFailure {
                    sku: group.id.clone(),
                    message: e.error.to_string(),
                    trace: e.trace.to_string(),
                })
            }
        }
    }

    /// 2地域分をレンダリングし、出力先に展開
    fn render_group(
        &self,
        renderer: &HtmlRenderer<'_>,
        group: &SkuGroup,
    ) -> Result<(Vec<OutputRow>, Vec<Diagnostic>), SkuError> {
        self.config
            .security
            .check_sku_rows(&group.id, group.row_count())?;

        let us = renderer.render(group, Region::Us)?;
        let uk = renderer.render(group, Region::Uk)?;

        let rows = self
            .config
            .brand
            .fan_out()
            .iter()
            .map(|target| OutputRow {
                sku: group.id.clone(),
                region: target.name.clone(),
                html: match target.region {
                    Region::Us => us.html.clone(),
                    Region::Uk => uk.html.clone(),
                },
            })
            .collect();

        let mut diagnostics = us.diagnostics;
        diagnostics.extend(uk.diagnostics);
        Ok((rows, diagnostics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::FanOutTarget;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_converter_builder_new() {
        let builder = ConverterBuilder::new();
        assert!(builder.config.auto_width);
        assert!(builder.config.manual_width.is_empty());
        assert_eq!(builder.config.brand.name(), "neutral");
        assert_eq!(builder.config.sku_row_policy, SkuRowPolicy::IdentifierOnly);
        assert!(builder.config.pretty_print);
        assert_eq!(builder.config.sheet_selector, SheetSelector::First);
        assert!(builder.config.parallel);
    }

    #[test]
    fn test_builder_method_chaining() {
        let builder = ConverterBuilder::new()
            .with_auto_width(false)
            .with_manual_width("25%")
            .with_brand(BrandPreset::neutral())
            .with_sku_row_policy(SkuRowPolicy::FirstTabData)
            .with_pretty_print(false)
            .with_sheet_selector(SheetSelector::Name("Specs".to_string()))
            .with_parallel(false);

        assert!(!builder.config.auto_width);
        assert_eq!(builder.config.manual_width, "25%");
        assert_eq!(builder.config.brand.name(), "neutral");
        assert_eq!(builder.config.sku_row_policy, SkuRowPolicy::FirstTabData);
        assert!(!builder.config.pretty_print);
        assert!(!builder.config.parallel);
    }

    #[test]
    fn test_build_success() {
        assert!(ConverterBuilder::new().build().is_ok());
    }

    #[test]
    fn test_build_with_manual_width_without_unit() {
        // 警告のみで構築は成功する
        let converter = ConverterBuilder::new()
            .with_auto_width(false)
            .with_manual_width("12em")
            .build()
            .unwrap();
        assert_eq!(converter.width, WidthSetting::Manual("12em".to_string()));
    }

    #[test]
    fn test_build_rejects_invalid_brand() {
        let result = ConverterBuilder::new()
            .with_brand(BrandPreset::neutral().with_fan_out(vec![]))
            .build();
        assert!(matches!(result, Err(XlsxSpecError::Config(_))));

        let result = ConverterBuilder::new()
            .with_brand(BrandPreset::neutral().with_fan_out(vec![
                FanOutTarget::new("default", Region::Us),
                FanOutTarget::new("default", Region::Uk),
            ]))
            .build();
        assert!(matches!(result, Err(XlsxSpecError::Config(_))));
    }

    #[test]
    fn test_build_rejects_zero_limits() {
        let result = ConverterBuilder::new()
            .with_security_config(SecurityConfig {
                max_rows_per_sku: 0,
                ..SecurityConfig::default()
            })
            .build();
        assert!(matches!(result, Err(XlsxSpecError::Config(_))));
    }

    #[test]
    fn test_convert_rows_fans_out() {
        let converter = ConverterBuilder::new().build().unwrap();
        let rows = vec![row(&["SKU1", "Color", "Red"]), row(&["", "Size", "Large"])];

        let report = converter.convert_rows(&rows).unwrap();
        let regions: Vec<&str> = report.rows.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(
            regions,
            vec!["default", "canada", "unitedkingdom", "australia", "newzealand"]
        );
        assert!(report.rows.iter().all(|r| r.sku == "SKU1"));
        assert_eq!(report.rows[0].html, report.rows[1].html);
        assert_eq!(report.rows[2].html, report.rows[4].html);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_custom_fan_out() {
        let converter = ConverterBuilder::new()
            .with_brand(BrandPreset::neutral().with_fan_out(vec![FanOutTarget::new(
                "ireland",
                Region::Uk,
            )]))
            .build()
            .unwrap();
        let rows = vec![row(&["SKU1"]), row(&["", "", "", "", "Colour", "Red"])];

        let report = converter.convert_rows(&rows).unwrap();
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].region, "ireland");
        assert!(report.rows[0].html.contains("Colour"));
    }

    #[test]
    fn test_sku_without_rows_produces_no_output() {
        let converter = ConverterBuilder::new().build().unwrap();
        let rows = vec![
            row(&["SKU1"]),
            row(&["SKU2", "Color", "Red"]),
            row(&["", "Size", "M"]),
        ];

        let report = converter.convert_rows(&rows).unwrap();
        assert_eq!(report.rows.len(), 5);
        assert!(report.rows.iter().all(|r| r.sku == "SKU2"));
    }

    #[test]
    fn test_failure_is_isolated_per_sku() {
        let converter = ConverterBuilder::new()
            .with_security_config(SecurityConfig {
                max_rows_per_sku: 2,
                ..SecurityConfig::default()
            })
            .build()
            .unwrap();
        let rows = vec![
            row(&["BIG"]),
            row(&["", "A", "1"]),
            row(&["", "B", "2"]),
            row(&["", "C", "3"]),
            row(&["SMALL"]),
            row(&["", "A", "1"]),
        ];

        let report = converter.convert_rows(&rows).unwrap();
        assert_eq!(report.rows.len(), 5);
        assert!(report.rows.iter().all(|r| r.sku == "SMALL"));
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].sku, "BIG");
        assert!(report.failures[0].message.contains("Security violation"));
        // 行数を検証した箇所のバックトレースが残る
        assert!(report.failures[0].trace.contains("check_sku_rows"));
    }

    #[test]
    fn test_no_valid_data() {
        let converter = ConverterBuilder::new().build().unwrap();
        let rows = vec![row(&["", "Orphan", "x"]), row(&["US"])];

        let result = converter.convert_rows(&rows);
        assert!(matches!(result, Err(XlsxSpecError::NoValidData(_))));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let rows: Vec<Row> = (0..20)
            .flat_map(|i| {
                vec![
                    row(&[format!("SKU{}", i).as_str(), "Color", "Red"]),
                    row(&["", "Size", i.to_string().as_str()]),
                ]
            })
            .collect();

        let parallel = ConverterBuilder::new().build().unwrap();
        let sequential = ConverterBuilder::new().with_parallel(false).build().unwrap();

        let a = parallel.convert_rows(&rows).unwrap();
        let b = sequential.convert_rows(&rows).unwrap();
        assert_eq!(a.rows, b.rows);
        assert_eq!(a.rows[0].sku, "SKU0");
        assert_eq!(a.rows[95].sku, "SKU19");
    }

    #[test]
    fn test_pretty_print_disabled_keeps_raw_markup() {
        let converter = ConverterBuilder::new().with_pretty_print(false).build().unwrap();
        let rows = vec![row(&["SKU1"]), row(&["", "Color", "Red"])];

        let report = converter.convert_rows(&rows).unwrap();
        assert!(report.rows[0]
            .html
            .contains("\n\n<div class=\"content-wrapper\">\n"));
    }
}
