//! Valentino 関連の型定義

use serde::{Deserialize, Serialize};

/// ナビゲーションメニュー1項目分のカテゴリレコード
///
/// linkは常に絶対HTTPSのURL（相対リンクは抽出時に補正される）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(rename = "links")]
    pub link: String,
    pub product_category: String,
}

/// 商品詳細ページ1件分のレコード
///
/// フィールド順が生CSVの列順になる。product_id・color・image_urlは
/// 選択中バリアントのペイロードが無いページでは欠損する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_id: Option<String>,
    pub product_code: String,
    pub product_type: String,
    pub item_name: String,
    pub color: Option<String>,
    pub price: String,
    pub image_url: Option<String>,
}

/// 選択中カラーバリアント要素のJSONペイロード (data-ytos-color-model)
#[derive(Debug, Clone, Deserialize)]
pub struct ColorModel {
    #[serde(rename = "ProductId")]
    pub product_id: String,
    #[serde(rename = "Label")]
    pub label: String,
    #[serde(rename = "Image")]
    pub image: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_model_payload() {
        let raw = r#"{"ProductId":"VW2S0V01","Label":"Rouge Pur","Image":"https://cdn.example/vw2s0v01.jpg"}"#;
        let model: ColorModel = serde_json::from_str(raw).unwrap();

        assert_eq!(model.product_id, "VW2S0V01");
        assert_eq!(model.label, "Rouge Pur");
        assert_eq!(model.image, "https://cdn.example/vw2s0v01.jpg");
    }
}
