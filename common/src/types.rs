//! 店舗データと検索条件の型定義
//!
//! 検索APIから受け取る型:
//! - Restaurant: 店舗1件（読み取り専用、描画後は破棄）
//! - SearchResponse: `/restaurants` のレスポンス
//!
//! UI側から渡される型:
//! - Filters: 検索開始時に取得する選択条件のスナップショット
//! - GeoPoint: 現在地座標

use serde::{Deserialize, Serialize};

/// 「すべて」を表すフィルタ値。サーバへはそのまま渡す
pub const FILTER_ALL: &str = "すべて";

/// 店舗1件
///
/// サーバ側の項目が欠けていても描画できるよう全フィールドdefault。
/// loc_x = 経度、loc_y = 緯度。座標が無い店舗は距離表示を省略する
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Restaurant {
    pub id: Option<String>,
    pub name: String,
    pub addr: String,
    pub kind: String,
    pub open: bool,
    pub loc_x: Option<f64>,
    pub loc_y: Option<f64>,
}

/// `/restaurants` のレスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub total: u32,
    pub count: u32,
    pub items: Vec<Restaurant>,
}

/// 検索条件のスナップショット
///
/// load開始時にUIコントロールから読み取り、ラダー走査中は不変
#[derive(Debug, Clone, PartialEq)]
pub struct Filters {
    pub area: String,
    pub category: String,
    pub distance_m: u32,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            area: FILTER_ALL.to_string(),
            category: FILTER_ALL.to_string(),
            distance_m: 1000,
        }
    }
}

/// 現在地座標
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restaurant_deserialize_full() {
        let json = r#"{
            "id": "r-001",
            "name": "しんじゅく食堂",
            "addr": "新宿区西新宿1-1-1",
            "kind": "和食",
            "open": true,
            "loc_x": 139.6917,
            "loc_y": 35.6895
        }"#;
        let item: Restaurant = serde_json::from_str(json).unwrap();
        assert_eq!(item.id.as_deref(), Some("r-001"));
        assert_eq!(item.name, "しんじゅく食堂");
        assert!(item.open);
        assert_eq!(item.loc_x, Some(139.6917));
    }

    #[test]
    fn test_restaurant_deserialize_missing_fields() {
        // 座標もidも無いレスポンスをそのまま受ける
        let json = r#"{"name": "名無し", "addr": "どこか"}"#;
        let item: Restaurant = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, None);
        assert_eq!(item.kind, "");
        assert!(!item.open);
        assert_eq!(item.loc_x, None);
        assert_eq!(item.loc_y, None);
    }

    #[test]
    fn test_search_response_deserialize() {
        let json = r#"{"total": 42, "count": 2, "items": [
            {"name": "A", "addr": "a"},
            {"name": "B", "addr": "b"}
        ]}"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.total, 42);
        assert_eq!(resp.count, 2);
        assert_eq!(resp.items.len(), 2);
    }

    #[test]
    fn test_search_response_empty() {
        let resp: SearchResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.total, 0);
        assert!(resp.items.is_empty());
    }

    #[test]
    fn test_filters_default() {
        let filters = Filters::default();
        assert_eq!(filters.area, FILTER_ALL);
        assert_eq!(filters.category, FILTER_ALL);
        assert_eq!(filters.distance_m, 1000);
    }
}
