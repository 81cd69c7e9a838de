//! xlsxspec - Pure-Rust converter from product specification spreadsheets to storefront HTML
//!
//! This crate turns a spreadsheet of product specifications (one group of rows per SKU,
//! with US data in columns B..D and UK data in columns E onward) into self-contained,
//! styled HTML fragments, one per SKU and storefront region.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxspec::{ConverterBuilder, OutputFormat};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a converter with default settings
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     // Convert the first sheet of the workbook
//!     let report = converter.convert(File::open("specs.xlsx")?)?;
//!
//!     // Write the SKU / Region / HTML table
//!     report.write(OutputFormat::Csv, File::create("specs.csv")?)?;
//!
//!     for failure in &report.failures {
//!         eprintln!("{}: {}", failure.sku, failure.message);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Rows that are already in memory can be converted directly:
//!
//! ```rust
//! use xlsxspec::ConverterBuilder;
//!
//! # fn main() -> Result<(), xlsxspec::XlsxSpecError> {
//! let rows: Vec<Vec<String>> = [
//!     vec!["PKG1", "Desc", "..."],
//!     vec!["1", "Frame"],
//!     vec!["", "Material", "Aluminum"],
//!     vec!["2", "Canopy"],
//!     vec!["", "Fabric", "Polyester"],
//! ]
//! .iter()
//! .map(|row| row.iter().map(|cell| cell.to_string()).collect())
//! .collect();
//!
//! let converter = ConverterBuilder::new().build()?;
//! let report = converter.convert_rows(&rows)?;
//!
//! assert_eq!(report.rows.len(), 5);
//! assert!(report.rows[0].html.contains("Canopy"));
//! # Ok(())
//! # }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxspec::{BrandPreset, ConverterBuilder, SheetSelector, SkuRowPolicy};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new()
//!         .with_brand(BrandPreset::neutral().with_care_header("storage"))
//!         .with_auto_width(false)
//!         .with_manual_width("220px")
//!         .with_sku_row_policy(SkuRowPolicy::FirstTabData)
//!         .with_sheet_selector(SheetSelector::Name("Specs".to_string()))
//!         .build()?;
//!
//!     let report = converter.convert(File::open("specs.xlsx")?)?;
//!     println!("{} rows", report.rows.len());
//!
//!     Ok(())
//! }
//! ```

mod api;
mod brand;
mod builder;
mod classify;
mod document;
mod error;
mod normalize;
mod output;
mod parser;
mod render;
mod security;
mod segment;
mod types;

// 公開API
pub use api::{OutputFormat, Region, RegionColumns, SheetSelector, SkuRowPolicy};
pub use brand::{BrandPreset, FanOutTarget, Palette};
pub use builder::{ConversionReport, Converter, ConverterBuilder, SkuFailure};
pub use error::XlsxSpecError;
pub use output::{output_file_name, OutputRow};
pub use render::beautify::{MarkupBeautifier, XmlBeautifier};
pub use security::SecurityConfig;
pub use types::{Diagnostic, DiagnosticKind, Row};
