use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("ブラウザ初期化エラー: {0}")]
    BrowserInit(String),

    #[error("ナビゲーションエラー: {0}")]
    Navigation(String),

    #[error("JavaScript実行エラー: {0}")]
    JavaScript(String),

    #[error("セッションエラー: {0}")]
    Session(String),

    #[error("ナビゲーションメニューが見つかりません: {0}")]
    MenuNotFound(String),

    #[error("要素が見つかりません: {0}")]
    ElementNotFound(String),

    #[error("HTTPリクエストエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV入出力エラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("ファイル操作エラー: {0}")]
    FileIO(#[from] std::io::Error),
}
