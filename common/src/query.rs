//! クエリURL構築
//!
//! 純粋関数のみ。ネットワークにもDOMにも触らない。
//! キャッシュバスタとシードは呼び出し側から渡し、出力を決定的に保つ

use crate::ladder::Tier;
use crate::types::{Filters, GeoPoint};

/// 1ページの取得件数
pub const PAGE_LIMIT: u32 = 20;

/// excludeパラメータに載せる表示済みキーの上限。
/// リクエストサイズを抑えるため直近分のみ送る
pub const EXCLUDE_CAP: usize = 200;

/// ランダムフォールバックで取得する件数
pub const RANDOM_SAMPLE_COUNT: u32 = 5;

/// 検索クエリの材料一式
#[derive(Debug, Clone)]
pub struct SearchRequest<'a> {
    pub filters: &'a Filters,
    pub tier: Tier,
    pub geo: GeoPoint,
    /// 表示済みキー（挿入順）。tier.excludeが立っている段でのみ送られる
    pub exclude: &'a [String],
    pub offset: u32,
    pub randomize: bool,
    pub seed: u32,
    pub cb: u64,
}

/// `/restaurants` の完全なURLを組み立てる
pub fn search_url(base: &str, req: &SearchRequest) -> String {
    let mut params: Vec<(&str, String)> = vec![
        ("area", req.filters.area.clone()),
        ("kind", req.filters.category.clone()),
        ("open_only", "true".to_string()),
        ("curr_loc_x", req.geo.lon.to_string()),
        ("curr_loc_y", req.geo.lat.to_string()),
    ];

    if let Some(distance) = req.tier.effective_distance(req.filters.distance_m) {
        params.push(("distance", distance.to_string()));
    }

    params.push(("limit", PAGE_LIMIT.to_string()));
    params.push(("offset", req.offset.to_string()));

    if req.randomize {
        params.push(("order", "random".to_string()));
        params.push(("seed", req.seed.to_string()));
    } else {
        params.push(("order", "distance".to_string()));
    }

    params.push(("cb", req.cb.to_string()));

    if req.tier.exclude {
        let start = req.exclude.len().saturating_sub(EXCLUDE_CAP);
        for key in &req.exclude[start..] {
            params.push(("exclude", key.clone()));
        }
    }

    format!("{}/restaurants?{}", base, encode_params(&params))
}

/// `/restaurants/random` のURL。countを省くと単品レスポンスになる
pub fn random_url(base: &str, count: Option<u32>, cb: u64) -> String {
    match count {
        Some(n) => format!("{}/restaurants/random?count={}&cb={}", base, n, cb),
        None => format!("{}/restaurants/random?cb={}", base, cb),
    }
}

/// 店舗写真のURL。<img>のsrcにそのまま入れる
pub fn photo_url(base: &str, addr: &str) -> String {
    format!("{}/photo/street?addr={}", base, urlencoding::encode(addr))
}

/// 外部地図検索のURL。店名と住所で検索する
pub fn map_search_url(name: &str, addr: &str) -> String {
    let query = format!("{} {}", name, addr);
    format!("https://map.naver.com/p/search/{}", urlencoding::encode(&query))
}

fn encode_params(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
