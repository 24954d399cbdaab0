//! データクリーニング
//!
//! 保存済みの生商品CSVを読み込み、重複除去と価格分割を行って分析用の
//! CSVへ書き直す。スクレイプ実行からは完全に独立したパス

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ScraperError;
use crate::store;
use crate::valentino::ProductRecord;

/// クリーニング済みレコード
///
/// フィールド順がクリーニング済みCSVの列順になる
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedRecord {
    pub product_id: Option<String>,
    pub product_code: String,
    pub product_type: String,
    pub item_name: String,
    pub color: Option<String>,
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "Value")]
    pub value: Option<String>,
}

/// 価格文字列を通貨と金額に分割する
///
/// 最初の'$'までを通貨、残りを桁区切りカンマ除去済みの金額とする。
/// '$'が無い場合は金額を欠損のまま通す（エラーにしない）
pub fn split_price(price: &str) -> (String, Option<String>) {
    match price.find('$') {
        Some(index) => {
            let currency = price[..index + 1].to_string();
            let value = price[index + 1..].replace(',', "");
            (currency, Some(value))
        }
        None => (price.to_string(), None),
    }
}

/// product_type以外の全フィールドの値一致で重複を除去する（先勝ち）
pub fn dedup_records(records: Vec<ProductRecord>) -> Vec<ProductRecord> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for record in records {
        let key = (
            record.product_id.clone(),
            record.product_code.clone(),
            record.item_name.clone(),
            record.color.clone(),
            record.price.clone(),
            record.image_url.clone(),
        );
        if seen.insert(key) {
            unique.push(record);
        }
    }
    unique
}

/// 生CSVをクリーニングして書き出し、クリーニング後の行数を返す
///
/// 出力先の既存ファイルは上書きされる
pub fn clean(source: &Path, dest: &Path) -> Result<usize, ScraperError> {
    let raw = store::read_products(source)?;
    let total = raw.len();

    let cleaned: Vec<CleanedRecord> = dedup_records(raw)
        .into_iter()
        .map(|record| {
            let (currency, value) = split_price(&record.price);
            CleanedRecord {
                product_id: record.product_id,
                product_code: record.product_code,
                product_type: record.product_type,
                item_name: record.item_name,
                color: record.color,
                currency,
                value,
            }
        })
        .collect();

    let mut writer = csv::Writer::from_path(dest)?;
    for record in &cleaned {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!(
        "Cleaned {} raw rows into {} rows -> {:?}",
        total,
        cleaned.len(),
        dest
    );
    Ok(cleaned.len())
}
