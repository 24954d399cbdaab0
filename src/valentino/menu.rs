//! メニュー抽出
//!
//! トップページのナビゲーションをたどり、カテゴリリンクの一覧を作る

use scraper::{Html, Selector};
use tracing::info;

use crate::error::ScraperError;

use super::types::CategoryRecord;

/// ナビゲーションのトップレベルリスト（これが無いと実行を続けられない）
const NAV_SELECTOR: &str = "ul.level-0";
/// 展開可能なカテゴリ項目
const MENU_ITEM_SELECTOR: &str = "li.hasChildren";

const HTTPS: &str = "https://";
const VALENTINO_HOST: &str = "www.valentino.com";

/// 除外するカテゴリラベル（集約ページと部門見出し）
const EXCLUDED_CATEGORIES: [&str; 8] = [
    "View all",
    "New Arrivals",
    "READY TO WEAR",
    "BAGS",
    "SHOES",
    "ACCESSORIES",
    "VALENTINO ROSSO",
    "Digital Card",
];

/// 相対リンクを絶対HTTPSのURLに補正する
///
/// すでに絶対URLであれば入力をそのまま返す
pub fn secure_site(href: &str) -> String {
    if href.contains(HTTPS) {
        href.to_string()
    } else {
        format!("{}{}{}", HTTPS, VALENTINO_HOST, href)
    }
}

/// ナビゲーションメニューからカテゴリレコードを抽出する
///
/// 除外リストに載ったラベルを落とし、遭遇順のまま先頭max_categories件に
/// 切り詰める。トップレベルリストが見つからない場合は致命的エラー
pub fn extract_menu(
    document: &Html,
    max_categories: usize,
) -> Result<Vec<CategoryRecord>, ScraperError> {
    let nav_selector = Selector::parse(NAV_SELECTOR).unwrap();
    let item_selector = Selector::parse(MENU_ITEM_SELECTOR).unwrap();
    let anchor_selector = Selector::parse("a").unwrap();
    let label_selector = Selector::parse("span").unwrap();

    let nav_bar = document
        .select(&nav_selector)
        .next()
        .ok_or_else(|| ScraperError::MenuNotFound(NAV_SELECTOR.to_string()))?;

    let mut records = Vec::new();
    for menu_item in nav_bar.select(&item_selector) {
        for anchor in menu_item.select(&anchor_selector) {
            let href = anchor.value().attr("href").ok_or_else(|| {
                ScraperError::ElementNotFound("メニューアンカーのhref".to_string())
            })?;
            let label: String = anchor
                .select(&label_selector)
                .next()
                .ok_or_else(|| {
                    ScraperError::ElementNotFound(format!("メニューラベルspan: {}", href))
                })?
                .text()
                .collect();

            records.push(CategoryRecord {
                link: secure_site(href),
                product_category: label,
            });
        }
    }

    records.retain(|record| !EXCLUDED_CATEGORIES.contains(&record.product_category.as_str()));
    records.truncate(max_categories);

    info!("Extracted {} menu categories", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENU_HTML: &str = r#"
        <html><body>
        <nav>
          <ul class="level-0">
            <li class="hasChildren">
              <a href="/en-ca/shop/pumps"><span>Pumps</span></a>
              <a href="/en-ca/shop/view-all"><span>View all</span></a>
              <a href="https://www.valentino.com/en-ca/shop/sneakers"><span>Sneakers</span></a>
            </li>
            <li class="hasChildren">
              <a href="/en-ca/shop/bags"><span>BAGS</span></a>
              <a href="/en-ca/shop/totes"><span>Totes</span></a>
              <a href="/en-ca/shop/minis"><span>Mini Bags</span></a>
            </li>
            <li>
              <a href="/en-ca/ignored"><span>No children</span></a>
            </li>
          </ul>
        </nav>
        </body></html>
    "#;

    #[test]
    fn test_secure_site_relative() {
        assert_eq!(
            secure_site("/en-ca/foo"),
            "https://www.valentino.com/en-ca/foo"
        );
    }

    #[test]
    fn test_secure_site_absolute_unchanged() {
        let absolute = "https://www.valentino.com/en-ca/shop/sneakers";
        assert_eq!(secure_site(absolute), absolute);
    }

    #[test]
    fn test_extract_menu_filters_excluded_labels() {
        let document = Html::parse_document(MENU_HTML);
        let records = extract_menu(&document, 103).unwrap();

        let labels: Vec<&str> = records
            .iter()
            .map(|record| record.product_category.as_str())
            .collect();
        assert_eq!(labels, vec!["Pumps", "Sneakers", "Totes", "Mini Bags"]);

        for excluded in EXCLUDED_CATEGORIES {
            assert!(!labels.contains(&excluded));
        }
    }

    #[test]
    fn test_extract_menu_resolves_links() {
        let document = Html::parse_document(MENU_HTML);
        let records = extract_menu(&document, 103).unwrap();

        assert_eq!(records[0].link, "https://www.valentino.com/en-ca/shop/pumps");
        assert_eq!(
            records[1].link,
            "https://www.valentino.com/en-ca/shop/sneakers"
        );
    }

    #[test]
    fn test_extract_menu_truncates_to_cap() {
        let document = Html::parse_document(MENU_HTML);
        let records = extract_menu(&document, 2).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].product_category, "Pumps");
        assert_eq!(records[1].product_category, "Sneakers");
    }

    #[test]
    fn test_extract_menu_missing_nav_is_fatal() {
        let document = Html::parse_document("<html><body><ul class=\"other\"></ul></body></html>");
        let result = extract_menu(&document, 103);

        assert!(matches!(result, Err(ScraperError::MenuNotFound(_))));
    }

    #[test]
    fn test_extract_menu_skips_items_without_children() {
        let document = Html::parse_document(MENU_HTML);
        let records = extract_menu(&document, 103).unwrap();

        assert!(records
            .iter()
            .all(|record| record.product_category != "No children"));
    }
}
