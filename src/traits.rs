use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::ScraperError;
use crate::valentino::CategoryRecord;

#[async_trait]
pub trait Scraper: Send + Sync {
    /// ブラウザ初期化
    async fn initialize(&mut self) -> Result<(), ScraperError>;

    /// ナビゲーションメニューからカテゴリ一覧を抽出してCSVに保存
    async fn collect_menu(&mut self) -> Result<Vec<CategoryRecord>, ScraperError>;

    /// 各カテゴリの商品を抽出し、生CSVのパスを返す
    async fn collect_products(
        &mut self,
        categories: &[CategoryRecord],
    ) -> Result<PathBuf, ScraperError>;

    /// リソース解放
    async fn close(&mut self) -> Result<(), ScraperError>;

    /// 一括実行（initialize → collect_menu → collect_products → close）
    ///
    /// エラー経路でも必ずclose()を呼び、ブラウザセッションを解放する
    async fn execute(&mut self) -> Result<PathBuf, ScraperError> {
        self.initialize().await?;

        let result = match self.collect_menu().await {
            Ok(categories) => self.collect_products(&categories).await,
            Err(e) => Err(e),
        };

        let closed = self.close().await;
        let path = result?;
        closed?;
        Ok(path)
    }
}
