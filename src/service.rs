use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};

use chrono::{DateTime, Utc};
use tower::Service;
use tracing::info;

use crate::cleaner;
use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::traits::Scraper;
use crate::valentino::ValentinoScraper;

/// スクレイピングリクエスト
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    pub data_dir: PathBuf,
    pub headless: bool,
    pub debug: bool,
}

impl ScrapeRequest {
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            headless: true,
            debug: false,
        }
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl Default for ScrapeRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ScrapeRequest> for ScraperConfig {
    fn from(req: ScrapeRequest) -> Self {
        ScraperConfig::new()
            .with_data_dir(req.data_dir)
            .with_headless(req.headless)
            .with_debug(req.debug)
    }
}

/// スクレイピング結果
#[derive(Debug, Clone)]
pub struct ScrapeResult {
    pub raw_csv_path: PathBuf,
    pub clean_csv_path: PathBuf,
    pub product_count: usize,
    pub scraped_at: DateTime<Utc>,
}

/// tower::Serviceを実装したスクレイパーサービス
#[derive(Debug, Clone, Default)]
pub struct ScraperService {
    // 将来的な拡張用（レートリミット、キャッシュなど）
}

impl ScraperService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Service<ScrapeRequest> for ScraperService {
    type Response = ScrapeResult;
    type Error = ScraperError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ScrapeRequest) -> Self::Future {
        info!("スクレイピングリクエスト受信: data_dir={:?}", req.data_dir);

        Box::pin(async move {
            let config: ScraperConfig = req.into();
            let mut scraper = ValentinoScraper::new(config.clone())?;

            // スクレイピング実行
            let raw_csv_path = scraper.execute().await?;

            // クリーニングは保存済みファイルを読む独立パス
            let product_count = cleaner::clean(&raw_csv_path, &config.clean_csv_path)?;

            let result = ScrapeResult {
                raw_csv_path,
                clean_csv_path: config.clean_csv_path,
                product_count,
                scraped_at: Utc::now(),
            };

            info!(
                "スクレイピング完了: path={:?}, products={}",
                result.clean_csv_path, result.product_count
            );

            Ok(result)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrape_request_builder() {
        let req = ScrapeRequest::new()
            .with_data_dir("/tmp/valentino")
            .with_headless(false)
            .with_debug(true);

        assert_eq!(req.data_dir, PathBuf::from("/tmp/valentino"));
        assert!(!req.headless);
        assert!(req.debug);
    }

    #[test]
    fn test_scrape_request_to_config() {
        let req = ScrapeRequest::new().with_data_dir("/tmp/valentino");
        let config: ScraperConfig = req.into();

        assert_eq!(
            config.menu_csv_path,
            PathBuf::from("/tmp/valentino/menu_items.csv")
        );
        assert_eq!(
            config.raw_csv_path,
            PathBuf::from("/tmp/valentino/valentino_products.csv")
        );
        assert_eq!(
            config.clean_csv_path,
            PathBuf::from("/tmp/valentino/valentino_data.csv")
        );
        assert!(config.headless);
    }
}
