use std::path::Path;

use valentino_scraper::cleaner;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let source = Path::new("./data/valentino_products.csv");
    let dest = Path::new("./data/valentino_data.csv");

    match cleaner::clean(source, dest) {
        Ok(count) => println!("クリーニング完了: {}行 -> {:?}", count, dest),
        Err(e) => eprintln!("エラー: {}", e),
    }
}
