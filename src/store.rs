//! 商品テーブルとCSV入出力
//!
//! 実行中は追記専用のインメモリテーブルに蓄積し、終了時に一括で
//! フラットファイルへ書き出す

use std::path::Path;

use tracing::debug;

use crate::error::ScraperError;
use crate::valentino::{CategoryRecord, ProductRecord};

/// 実行全体で商品レコードを蓄積するテーブル
///
/// 明示的に引き回す前提のアキュムレータで、グローバル状態は持たない
#[derive(Debug, Default)]
pub struct ProductTable {
    records: Vec<ProductRecord>,
}

impl ProductTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1カテゴリ分のレコードを追記する（追加のみ、マージはしない）
    pub fn update(&mut self, records: Vec<ProductRecord>) -> &mut Self {
        debug!("Appending {} records to product table", records.len());
        self.records.extend(records);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    /// テーブル全体をCSVへ書き出す（既存ファイルは上書き）
    pub fn flush(&self, path: &Path) -> Result<(), ScraperError> {
        let mut writer = csv::Writer::from_path(path)?;
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// カテゴリ一覧をCSVへ書き出す（既存ファイルは上書き）
pub fn write_menu(records: &[CategoryRecord], path: &Path) -> Result<(), ScraperError> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// 保存済みのカテゴリ一覧を読み戻す
pub fn read_menu(path: &Path) -> Result<Vec<CategoryRecord>, ScraperError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for result in reader.deserialize() {
        records.push(result?);
    }
    Ok(records)
}

/// 生の商品CSVを読み戻す
pub fn read_products(path: &Path) -> Result<Vec<ProductRecord>, ScraperError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for result in reader.deserialize() {
        records.push(result?);
    }
    Ok(records)
}
