//! Valentino商品スクレイパーライブラリ
//!
//! - トップページのナビゲーションメニューからカテゴリ一覧を抽出してCSVに保存
//! - 各カテゴリページを「もっと見る」展開しながら商品詳細を収集
//! - 生CSVを重複除去・価格分割した分析用CSVに変換
//!
//! # サービス経由の使用例
//!
//! ```rust,ignore
//! use valentino_scraper::{ScraperService, ScrapeRequest};
//! use tower::Service;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut service = ScraperService::new();
//!
//!     let request = ScrapeRequest::new()
//!         .with_data_dir("./data")
//!         .with_headless(true);
//!
//!     let result = service.call(request).await.unwrap();
//!     println!("Cleaned CSV: {:?}", result.clean_csv_path);
//! }
//! ```
//!
//! # パイプラインを直接実行する例
//!
//! ```rust,ignore
//! use valentino_scraper::{cleaner, Scraper, ScraperConfig, ValentinoScraper};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScraperConfig::new().with_headless(true);
//!     let mut scraper = ValentinoScraper::new(config.clone()).unwrap();
//!
//!     let raw_csv = scraper.execute().await.unwrap();
//!     cleaner::clean(&raw_csv, &config.clean_csv_path).unwrap();
//! }
//! ```

pub mod browser;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod fetch;
pub mod service;
pub mod store;
pub mod traits;
pub mod valentino;

// 主要な型をリエクスポート
pub use browser::BrowserDriver;
pub use cleaner::{clean, CleanedRecord};
pub use config::ScraperConfig;
pub use error::ScraperError;
pub use fetch::HttpFetcher;
pub use service::{ScrapeRequest, ScrapeResult, ScraperService};
pub use store::ProductTable;
pub use traits::Scraper;
pub use valentino::{CategoryRecord, ColorModel, ProductRecord, ValentinoScraper};
