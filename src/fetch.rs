//! HTTPフェッチャー
//!
//! 固定のブラウザUser-Agentを持つ持続セッションでページを取得し、
//! DOMハンドルにパースして返す

use scraper::Html;

use crate::error::ScraperError;

/// 固定のデスクトップブラウザUser-Agent
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:82.0) Gecko/20100101 Firefox/82.0";

/// reqwestセッションを保持するHTTPフェッチャー
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Cookieストア付きの持続セッションを作成する
    pub fn new() -> Result<Self, ScraperError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .build()?;
        Ok(Self { client })
    }

    /// 対象URLへGETリクエストを送り、レスポンスボディをDOMとして返す
    ///
    /// ステータスコード確認もリトライも行わない。転送エラーは
    /// そのまま呼び出し元へ伝播する。
    pub async fn fetch(&self, url: &str) -> Result<Html, ScraperError> {
        let body = self.client.get(url).send().await?.text().await?;
        Ok(Html::parse_document(&body))
    }

    /// レンダリングドライバが生成したマークアップをDOMにパースする
    pub fn parse(&self, markup: &str) -> Html {
        Html::parse_document(markup)
    }
}
