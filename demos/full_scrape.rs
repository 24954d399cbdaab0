use tower::Service;
use valentino_scraper::{ScrapeRequest, ScraperService};

#[tokio::main]
async fn main() {
    // ログ設定
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let request = ScrapeRequest::new()
        .with_data_dir("./data")
        .with_headless(false); // デバッグ用に表示モード

    let mut service = ScraperService::new();

    println!("=== Valentino Scraper ===");

    match service.call(request).await {
        Ok(result) => {
            println!("成功! 商品数: {}", result.product_count);
            println!("生CSV: {:?}", result.raw_csv_path);
            println!("クリーニング済みCSV: {:?}", result.clean_csv_path);
            println!("実行時刻: {}", result.scraped_at);
        }
        Err(e) => {
            eprintln!("エラー: {}", e);
        }
    }
}
