//! レンダリングドライバ
//!
//! 1つのChromeセッションでカテゴリページを開き、「もっと見る」ボタンの
//! クリックや末尾スクロールで全商品タイルを表示させてからマークアップを返す

use std::sync::Arc;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::ClearBrowserCookiesParams;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::error::ScraperError;

/// 「もっと見る」ボタンのセレクタ
const LOAD_MORE_SELECTOR: &str =
    "button.ctaButton.ctaButton--lightBorder.loadMoreShelvesProducts";

/// 「もっと見る」ボタン出現待ちのタイムアウト（秒）
const LOAD_MORE_WAIT_SECS: u64 = 10;
/// ボタン出現確認のポーリング間隔（ミリ秒）
const LOAD_MORE_POLL_INTERVAL_MS: u64 = 500;
/// クリック後に新しいタイルの描画を待つ時間（秒）
const LOAD_MORE_PAUSE_SECS: u64 = 3;
/// スクロール後に追加コンテンツを待つ時間（秒）
const SCROLL_PAUSE_SECS: u64 = 2;

/// 1ブラウザインスタンスを包むステートフルなセッション
///
/// 実行開始時に1回だけ起動し、全カテゴリで使い回して終了時に1回だけ
/// 解放する
pub struct BrowserDriver {
    config: ScraperConfig,
    browser: Option<Browser>,
    page: Option<Arc<Page>>,
}

impl BrowserDriver {
    pub fn new(config: ScraperConfig) -> Self {
        Self {
            config,
            browser: None,
            page: None,
        }
    }

    fn get_page(&self) -> Result<&Arc<Page>, ScraperError> {
        self.page
            .as_ref()
            .ok_or_else(|| ScraperError::BrowserInit("ブラウザが初期化されていません".into()))
    }

    /// ブラウザを起動してページを1枚開く
    pub async fn initialize(&mut self) -> Result<(), ScraperError> {
        info!("Initializing browser...");

        let mut builder = BrowserConfig::builder()
            .window_size(1280, 800)
            .no_sandbox()
            .request_timeout(self.config.timeout)
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu");

        if !self.config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| ScraperError::BrowserInit(format!("ブラウザ設定エラー: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        // ブラウザイベントハンドラをバックグラウンドで実行
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                debug!("Browser event: {:?}", event);
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        self.browser = Some(browser);
        self.page = Some(Arc::new(page));

        info!("Browser initialized successfully");
        Ok(())
    }

    /// URLを開き、「もっと見る」ボタンが消えるまでクリックを繰り返してから
    /// 全体のマークアップを返す
    ///
    /// ボタンのルックアップが構造的に失敗した場合は診断を出し、その時点の
    /// マークアップを返して実行を続ける
    pub async fn render_with_pagination(&self, url: &str) -> Result<String, ScraperError> {
        let page = self.get_page()?.clone();
        info!("Rendering category page: {}", url);

        page.goto(url)
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;

        let mut clicks = 0u32;
        while self.is_load_more_displayed(&page).await {
            match self.click_load_more(&page).await {
                Ok(true) => {
                    clicks += 1;
                    debug!("Clicked load more ({} total): {}", clicks, url);
                }
                Ok(false) => {
                    warn!("Could not locate more items for product site: {}", url);
                    break;
                }
                Err(e) => {
                    warn!("Could not locate more items for product site {}: {}", url, e);
                    break;
                }
            }
            self.idle(Duration::from_secs(LOAD_MORE_PAUSE_SECS)).await;
        }

        if self.config.debug {
            self.debug_screenshot(&page).await;
        }

        let markup = page
            .content()
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;

        info!(
            "Rendered {} bytes after {} load-more clicks: {}",
            markup.len(),
            clicks,
            url
        );
        Ok(markup)
    }

    /// 無限スクロールページ向けの代替戦略
    ///
    /// ページ高さが変化しなくなるまで末尾へのスクロールを繰り返す
    pub async fn render_with_scroll(&self, url: &str) -> Result<String, ScraperError> {
        let page = self.get_page()?.clone();
        info!("Rendering with infinite scroll: {}", url);

        page.goto(url)
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;

        let mut last_height = self.document_height(&page).await?;
        loop {
            page.evaluate("window.scrollTo(0, document.body.scrollHeight);")
                .await
                .map_err(|e| ScraperError::JavaScript(e.to_string()))?;

            self.idle(Duration::from_secs(SCROLL_PAUSE_SECS)).await;

            let new_height = self.document_height(&page).await?;
            if new_height == last_height {
                break;
            }
            last_height = new_height;
        }

        page.content()
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))
    }

    /// カテゴリ間でセッションを持ち越さないよう全Cookieを削除する
    pub async fn reset(&self) -> Result<(), ScraperError> {
        let page = self.get_page()?.clone();
        page.execute(ClearBrowserCookiesParams::default())
            .await
            .map_err(|e| ScraperError::Session(e.to_string()))?;
        debug!("Browser cookies cleared");
        Ok(())
    }

    /// 指定時間の待機（下限のみ保証するベストエフォート）
    pub async fn idle(&self, duration: Duration) {
        sleep(duration).await;
    }

    /// ブラウザセッションを解放する
    ///
    /// 異常終了経路を含め、実行終了時に必ず1回呼ぶこと
    pub async fn close(&mut self) -> Result<(), ScraperError> {
        info!("Closing browser...");
        self.page = None;
        self.browser = None;
        info!("Browser closed");
        Ok(())
    }

    /// 「もっと見る」ボタンが存在して可視になるまでポーリングする
    ///
    /// タイムアウトした場合は「これ以上ページなし」とみなしてfalseを返す
    async fn is_load_more_displayed(&self, page: &Page) -> bool {
        let probe = format!(
            r#"
            (() => {{
                const btn = document.querySelector('{}');
                if (!btn) return false;
                const style = window.getComputedStyle(btn);
                const rect = btn.getBoundingClientRect();
                return style.display !== 'none' &&
                       style.visibility !== 'hidden' &&
                       (rect.width > 0 || rect.height > 0);
            }})()
        "#,
            LOAD_MORE_SELECTOR
        );

        let start = std::time::Instant::now();
        let timeout = Duration::from_secs(LOAD_MORE_WAIT_SECS);

        while start.elapsed() < timeout {
            match page.evaluate(probe.as_str()).await {
                Ok(val) => {
                    if val.into_value::<bool>().unwrap_or(false) {
                        return true;
                    }
                }
                Err(e) => debug!("Load more probe error: {}", e),
            }
            sleep(Duration::from_millis(LOAD_MORE_POLL_INTERVAL_MS)).await;
        }

        debug!("Load more button not displayed after {:?}", start.elapsed());
        false
    }

    /// JavaScriptで「もっと見る」ボタンをクリックする
    async fn click_load_more(&self, page: &Page) -> Result<bool, ScraperError> {
        let script = format!(
            r#"
            (() => {{
                const btn = document.querySelector('{}');
                if (btn) {{
                    btn.click();
                    return true;
                }}
                return false;
            }})()
        "#,
            LOAD_MORE_SELECTOR
        );

        let clicked = page
            .evaluate(script.as_str())
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?;

        Ok(clicked.into_value::<bool>().unwrap_or(false))
    }

    async fn document_height(&self, page: &Page) -> Result<i64, ScraperError> {
        let height = page
            .evaluate("document.body.scrollHeight")
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?;
        Ok(height.into_value::<i64>().unwrap_or(0))
    }

    /// デバッグ用フルページスクリーンショット
    async fn debug_screenshot(&self, page: &Page) {
        if let Ok(screenshot) = page
            .screenshot(ScreenshotParams::builder().full_page(true).build())
            .await
        {
            use base64::Engine;
            let encoded = base64::engine::general_purpose::STANDARD.encode(&screenshot);
            debug!("Category screenshot: data:image/png;base64,{}", encoded);
        }
    }
}
