//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use std::backtrace::Backtrace;
use std::fmt;

use thiserror::Error;

/// データが1件も出力されなかった場合に利用者へ提示するガイダンス
pub(crate) const NO_VALID_DATA_GUIDANCE: &str = "Conversion finished, but NO valid SKU data resulted in HTML output.\n\
Please check:\n\
- Did the input contain a SKU in column A on the first row of each product group?\n\
- Are tab markers numeric (1, 2, ...) in column A with the tab title in column B?\n\
- Was data present in the expected US/UK columns (B/C+ for US, E/F+ for UK)?\n\
- Are \"Start\"/\"End\" markers in column A, with the section title on the row above \"Start\"?";

/// xlsxspecクレート全体で使用するエラー型
///
/// スプレッドシートの読み込み、文書モデルの構築、HTMLレンダリング中に発生する
/// すべてのエラーを統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー
/// - `Parse`: Excelファイルの解析中に発生したエラー（calamine由来）
/// - `Config`: 設定の検証に失敗したエラー
/// - `SecurityViolation`: 入力サイズなどの制限に違反したエラー
/// - `Render`: 1つのSKUのレンダリングに失敗したエラー
/// - `Beautify`: 整形処理の失敗（呼び出し元には返らず、未整形出力にフォールバック）
/// - `Serialize`: 出力テーブルのシリアライズに失敗したエラー
/// - `NoValidData`: 入力全体から1行も出力されなかった
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxspec::XlsxSpecError;
/// use std::fs::File;
///
/// fn open_sheet(path: &str) -> Result<(), XlsxSpecError> {
///     let _file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum XlsxSpecError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Excelファイルの解析中に発生したエラー
    ///
    /// `#[from]`属性により、`calamine::Error`から自動的に変換されます。
    #[error("Failed to parse Excel file: {0}")]
    Parse(#[from] calamine::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。例えば、ブランドの出力先リストが空の場合などです。
    ///
    /// ```rust,no_run
    /// use xlsxspec::{BrandPreset, ConverterBuilder, XlsxSpecError};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_brand(BrandPreset::neutral().with_fan_out(vec![]))
    ///     .build();
    ///
    /// if let Err(XlsxSpecError::Config(msg)) = result {
    ///     println!("設定エラー: {}", msg);
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// 入力の制限に違反したエラー
    ///
    /// 入力ファイルサイズの上限や、1つのSKUに含まれる行数の上限を
    /// 超えた場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),

    /// 1つのSKUの文書構築またはレンダリングに失敗したエラー
    ///
    /// このエラーは変換全体を中断しません。該当SKUは出力行を持たず、
    /// `ConversionReport::failures`に記録されます。
    #[error("Failed to render SKU '{sku}': {message}")]
    Render {
        /// 失敗したSKUの識別子
        sku: String,
        /// エラーの詳細メッセージ
        message: String,
    },

    /// マークアップ整形の失敗
    #[error("Markup beautifier failed: {0}")]
    Beautify(String),

    /// 出力テーブルのシリアライズに失敗したエラー
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// 入力全体から1行も出力されなかった
    ///
    /// クラッシュではなく、入力のレイアウトに関するガイダンスを含みます。
    #[error("No valid data: {0}")]
    NoValidData(String),
}

impl XlsxSpecError {
    /// ガイダンス付きの`NoValidData`エラーを生成
    pub(crate) fn no_valid_data() -> Self {
        XlsxSpecError::NoValidData(NO_VALID_DATA_GUIDANCE.to_string())
    }
}

/// 1つのSKUの処理中に発生したエラー
///
/// エラーを生成した箇所でバックトレースを取得します。変換全体は中断せず、
/// `SkuFailure`として結果に記録されます。
#[derive(Debug)]
pub(crate) struct SkuError {
    pub error: XlsxSpecError,
    pub trace: Backtrace,
}

impl SkuError {
    /// エラーを包み、呼び出し箇所のバックトレースを取得
    pub fn new(error: XlsxSpecError) -> Self {
        Self {
            error,
            trace: Backtrace::force_capture(),
        }
    }
}

impl fmt::Display for SkuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl From<quick_xml::Error> for XlsxSpecError {
    fn from(e: quick_xml::Error) -> Self {
        XlsxSpecError::Beautify(e.to_string())
    }
}

impl From<serde_json::Error> for XlsxSpecError {
    fn from(e: serde_json::Error) -> Self {
        XlsxSpecError::Serialize(e.to_string())
    }
}
