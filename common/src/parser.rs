//! APIレスポンスパーサー
//!
//! fetchで受け取った本文文字列を型に落とす。Web側はここを通すだけ

use crate::error::{Error, Result};
use crate::types::{Restaurant, SearchResponse};

/// `/restaurants` のレスポンスをパース
///
/// # Arguments
/// * `body` - レスポンス本文（JSON文字列）
///
/// # Returns
/// * `Ok(SearchResponse)` - パース成功
/// * `Err` - JSONとして不正な場合
pub fn parse_search_response(body: &str) -> Result<SearchResponse> {
    let resp: SearchResponse = serde_json::from_str(body)?;
    Ok(resp)
}

/// `/restaurants/random` のレスポンスをパース
///
/// countを付けると配列、省くと単品オブジェクトが返る。
/// どちらもVecに揃える
///
/// # Arguments
/// * `body` - レスポンス本文（JSON文字列）
///
/// # Returns
/// * `Ok(Vec<Restaurant>)` - パース成功（単品は1要素のVec）
/// * `Err` - 配列でもオブジェクトでもない場合
pub fn parse_random_response(body: &str) -> Result<Vec<Restaurant>> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if value.is_array() {
        let items: Vec<Restaurant> = serde_json::from_value(value)?;
        return Ok(items);
    }
    if value.is_object() {
        let item: Restaurant = serde_json::from_value(value)?;
        return Ok(vec![item]);
    }
    Err(Error::Response(
        "配列でもオブジェクトでもありません".to_string(),
    ))
}
