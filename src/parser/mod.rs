//! Parser Module
//!
//! calamineを使用したワークブックの読み込み。
//! 選択したシートを、正規化済みの文字列行のリストに変換します。

mod workbook;

pub(crate) use workbook::WorkbookReader;
