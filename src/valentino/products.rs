//! 商品抽出
//!
//! レンダリング済みカテゴリページの商品タイルをたどり、各詳細ページから
//! 商品フィールドを取り出す

use scraper::{Html, Selector};
use tracing::warn;

use crate::error::ScraperError;
use crate::fetch::HttpFetcher;

use super::menu::secure_site;
use super::types::{ColorModel, ProductRecord};

const PRODUCT_LIST_SELECTOR: &str = "ul.products__list";
const ITEM_INFO_SELECTOR: &str = "div.item__info";
const MODEL_NAME_SELECTOR: &str = "span.modelName";
const PRICE_SELECTOR: &str = "span.price";
const CURRENCY_SELECTOR: &str = "span.currency";
const VALUE_SELECTOR: &str = "span.value";
const MODEL_FABRIC_COLOR_SELECTOR: &str = "div.item-description__modelfabricolor";
const SELECTED_VARIANT_SELECTOR: &str = "li.is-selected";
const COLOR_MODEL_ATTR: &str = "data-ytos-color-model";

/// カテゴリページの全商品タイルから詳細ページへのリンクを集める
pub fn collect_item_links(document: &Html) -> Vec<String> {
    let list_selector = Selector::parse(PRODUCT_LIST_SELECTOR).unwrap();
    let item_selector = Selector::parse(ITEM_INFO_SELECTOR).unwrap();
    let anchor_selector = Selector::parse("a").unwrap();

    let mut links = Vec::new();
    for product_list in document.select(&list_selector) {
        for item in product_list.select(&item_selector) {
            match item
                .select(&anchor_selector)
                .next()
                .and_then(|anchor| anchor.value().attr("href"))
            {
                Some(href) => links.push(secure_site(href)),
                None => warn!("Product tile without a detail link, skipping"),
            }
        }
    }
    links
}

/// 詳細リンクごとに詳細ページを取得してレコードを作る
///
/// 1件の失敗がカテゴリ全体を止めないよう、項目単位のエラーは失敗した
/// リンク名を添えてログに出し、その項目だけをスキップする
pub async fn extract_products(
    fetcher: &HttpFetcher,
    links: &[String],
    product_type: &str,
) -> Vec<ProductRecord> {
    let mut records = Vec::new();
    for link in links {
        match extract_one(fetcher, link, product_type).await {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("Unable to extract text from page source: {} ({})", link, e);
            }
        }
    }
    records
}

async fn extract_one(
    fetcher: &HttpFetcher,
    link: &str,
    product_type: &str,
) -> Result<ProductRecord, ScraperError> {
    let document = fetcher.fetch(link).await?;
    parse_detail(&document, product_type)
}

/// 商品詳細ページから1件のレコードを取り出す
///
/// product_typeは呼び出し元が与えるカテゴリラベルで、ページからは読まない。
/// 選択中バリアントのペイロードが無い場合、依存する3フィールドは欠損の
/// まま成立させる
pub fn parse_detail(document: &Html, product_type: &str) -> Result<ProductRecord, ScraperError> {
    let model_name_selector = Selector::parse(MODEL_NAME_SELECTOR).unwrap();
    let price_selector = Selector::parse(PRICE_SELECTOR).unwrap();
    let currency_selector = Selector::parse(CURRENCY_SELECTOR).unwrap();
    let value_selector = Selector::parse(VALUE_SELECTOR).unwrap();
    let fabric_selector = Selector::parse(MODEL_FABRIC_COLOR_SELECTOR).unwrap();
    let variant_selector = Selector::parse(SELECTED_VARIANT_SELECTOR).unwrap();

    let item_name: String = document
        .select(&model_name_selector)
        .next()
        .ok_or_else(|| ScraperError::ElementNotFound(format!("商品名 ({})", MODEL_NAME_SELECTOR)))?
        .text()
        .collect();

    let price_element = document
        .select(&price_selector)
        .next()
        .ok_or_else(|| ScraperError::ElementNotFound(format!("価格 ({})", PRICE_SELECTOR)))?;
    let currency: String = price_element
        .select(&currency_selector)
        .next()
        .ok_or_else(|| ScraperError::ElementNotFound(format!("通貨 ({})", CURRENCY_SELECTOR)))?
        .text()
        .collect();
    let value: String = price_element
        .select(&value_selector)
        .next()
        .ok_or_else(|| ScraperError::ElementNotFound(format!("金額 ({})", VALUE_SELECTOR)))?
        .text()
        .collect();

    let product_code: String = document
        .select(&fabric_selector)
        .next()
        .ok_or_else(|| {
            ScraperError::ElementNotFound(format!("商品コード ({})", MODEL_FABRIC_COLOR_SELECTOR))
        })?
        .select(&value_selector)
        .next()
        .ok_or_else(|| {
            ScraperError::ElementNotFound(format!("商品コード値 ({})", VALUE_SELECTOR))
        })?
        .text()
        .collect();

    // 選択中バリアントの構造化ペイロードがあればid・色・画像URLを読む
    let variant = document
        .select(&variant_selector)
        .next()
        .and_then(|element| element.value().attr(COLOR_MODEL_ATTR))
        .and_then(|raw| serde_json::from_str::<ColorModel>(raw).ok());

    let (product_id, color, image_url) = match variant {
        Some(model) => (Some(model.product_id), Some(model.label), Some(model.image)),
        None => (None, None, None),
    };

    Ok(ProductRecord {
        product_id,
        product_code,
        product_type: product_type.to_string(),
        item_name,
        color,
        price: format!("{}{}", currency, value),
        image_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATEGORY_HTML: &str = r#"
        <html><body>
        <ul class="products__list">
          <div class="item__info">
            <a href="/en-ca/p/rockstud-pump">Rockstud Pump</a>
          </div>
          <div class="item__info">
            <a href="https://www.valentino.com/en-ca/p/one-stud-sneaker">One Stud</a>
          </div>
          <div class="item__info">
            <p>tile without link</p>
          </div>
        </ul>
        <ul class="products__list">
          <div class="item__info">
            <a href="/en-ca/p/vlogo-belt">VLogo Belt</a>
          </div>
        </ul>
        </body></html>
    "#;

    const DETAIL_HTML: &str = r#"
        <html><body>
        <span class="modelName">ROCKSTUD PUMP</span>
        <span class="price">
          <span class="currency">CA$</span>
          <span class="value">1,290</span>
        </span>
        <div class="item-description__modelfabricolor">
          <span class="label">Model</span>
          <span class="value">2W2S0393VCE</span>
        </div>
        <ul class="colors">
          <li class="is-selected" data-ytos-color-model='{"ProductId":"2W2S0393","Label":"Poudre","Image":"https://cdn.example/2w2s0393.jpg"}'></li>
          <li data-ytos-color-model='{"ProductId":"OTHER","Label":"Nero","Image":"https://cdn.example/other.jpg"}'></li>
        </ul>
        </body></html>
    "#;

    const DETAIL_HTML_NO_VARIANT: &str = r#"
        <html><body>
        <span class="modelName">PLAIN LOAFER</span>
        <span class="price">
          <span class="currency">CA$</span>
          <span class="value">980</span>
        </span>
        <div class="item-description__modelfabricolor">
          <span class="value">3W2S0100XYZ</span>
        </div>
        </body></html>
    "#;

    const DETAIL_HTML_NO_PRICE: &str = r#"
        <html><body>
        <span class="modelName">BROKEN ITEM</span>
        <div class="item-description__modelfabricolor">
          <span class="value">0W0S0000AAA</span>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_collect_item_links() {
        let document = Html::parse_document(CATEGORY_HTML);
        let links = collect_item_links(&document);

        assert_eq!(
            links,
            vec![
                "https://www.valentino.com/en-ca/p/rockstud-pump",
                "https://www.valentino.com/en-ca/p/one-stud-sneaker",
                "https://www.valentino.com/en-ca/p/vlogo-belt",
            ]
        );
    }

    #[test]
    fn test_parse_detail_full_record() {
        let document = Html::parse_document(DETAIL_HTML);
        let record = parse_detail(&document, "Pumps").unwrap();

        assert_eq!(record.item_name, "ROCKSTUD PUMP");
        assert_eq!(record.price, "CA$1,290");
        assert_eq!(record.product_code, "2W2S0393VCE");
        assert_eq!(record.product_type, "Pumps");
        assert_eq!(record.product_id.as_deref(), Some("2W2S0393"));
        assert_eq!(record.color.as_deref(), Some("Poudre"));
        assert_eq!(
            record.image_url.as_deref(),
            Some("https://cdn.example/2w2s0393.jpg")
        );
    }

    #[test]
    fn test_parse_detail_without_variant_payload() {
        let document = Html::parse_document(DETAIL_HTML_NO_VARIANT);
        let record = parse_detail(&document, "Loafers").unwrap();

        assert_eq!(record.item_name, "PLAIN LOAFER");
        assert_eq!(record.price, "CA$980");
        assert!(record.product_id.is_none());
        assert!(record.color.is_none());
        assert!(record.image_url.is_none());
    }

    #[test]
    fn test_parse_detail_missing_price_is_item_error() {
        let document = Html::parse_document(DETAIL_HTML_NO_PRICE);
        let result = parse_detail(&document, "Pumps");

        assert!(matches!(result, Err(ScraperError::ElementNotFound(_))));
    }

    #[test]
    fn test_parse_detail_malformed_payload_leaves_fields_empty() {
        let html = DETAIL_HTML.replace(
            r#"{"ProductId":"2W2S0393","Label":"Poudre","Image":"https://cdn.example/2w2s0393.jpg"}"#,
            "not-json",
        );
        let document = Html::parse_document(&html);
        let record = parse_detail(&document, "Pumps").unwrap();

        assert!(record.product_id.is_none());
        assert!(record.color.is_none());
        assert!(record.image_url.is_none());
        assert_eq!(record.price, "CA$1,290");
    }
}
