//! Valentino ECサイト向けスクレイパーモジュール
//!
//! ナビゲーションメニューのカテゴリ一覧と、各カテゴリの商品詳細を抽出する

mod menu;
mod products;
mod scraper;
mod types;

pub use self::menu::{extract_menu, secure_site};
pub use self::products::{collect_item_links, extract_products, parse_detail};
pub use self::scraper::ValentinoScraper;
pub use self::types::{CategoryRecord, ColorModel, ProductRecord};
