//! Security Module
//!
//! 入力に対する制限を定義するモジュール。
//! 巨大な入力ファイルや、区切りのない巨大なSKUグループによる
//! メモリ・処理時間の浪費を防ぎます。

use crate::error::{SkuError, XlsxSpecError};

/// セキュリティ設定
///
/// 入力処理時の制限を定義します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    /// デフォルト: 2GB (2_147_483_648 bytes)
    pub max_input_file_size: u64,

    /// 1つのSKUグループに含まれる最大行数
    /// デフォルト: 100000
    ///
    /// 超過したSKUは変換に失敗し、`ConversionReport::failures`に記録されます。
    pub max_rows_per_sku: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: 2_147_483_648, // 2GB
            max_rows_per_sku: 100_000,
        }
    }
}

impl SecurityConfig {
    /// デフォルトのセキュリティ設定を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 設定値の検証（0の上限は拒否）
    pub(crate) fn validate(&self) -> Result<(), XlsxSpecError> {
        if self.max_input_file_size == 0 {
            return Err(XlsxSpecError::Config(
                "max_input_file_size must be greater than 0".to_string(),
            ));
        }
        if self.max_rows_per_sku == 0 {
            return Err(XlsxSpecError::Config(
                "max_rows_per_sku must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// 入力サイズの検証
    pub(crate) fn check_input_size(&self, bytes: u64) -> Result<(), XlsxSpecError> {
        if bytes > self.max_input_file_size {
            return Err(XlsxSpecError::SecurityViolation(format!(
                "Input file size exceeds maximum: {} bytes (max: {} bytes)",
                bytes, self.max_input_file_size
            )));
        }
        Ok(())
    }

    /// SKUグループの行数の検証
    pub(crate) fn check_sku_rows(&self, sku: &str, rows: usize) -> Result<(), SkuError> {
        if rows > self.max_rows_per_sku {
            return Err(SkuError::new(XlsxSpecError::SecurityViolation(format!(
                "SKU '{}' has {} rows (max: {})",
                sku, rows, self.max_rows_per_sku
            ))));
        }
        Ok(())
    }
}
