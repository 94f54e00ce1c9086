//! Machimeshi Common Library
//!
//! Web(WASM)側と共有される型と検索ロジック:
//! - 店舗データの型とレスポンスパース
//! - 重複排除キーと表示済みキー集合
//! - フォールバックラダーの状態機械
//! - 距離計算・クエリURL構築

pub mod dedup;
pub mod error;
pub mod geo;
pub mod ladder;
pub mod parser;
pub mod query;
pub mod session;
pub mod types;

pub use dedup::{dedup_key, ShownKeys};
pub use error::{Error, Result};
pub use geo::{distance_m, format_distance, DEFAULT_POSITION};
pub use ladder::{LadderWalk, LoadMode, Offer, Tier, TierDistance, WalkStep, LADDER};
pub use parser::{parse_random_response, parse_search_response};
pub use query::{map_search_url, photo_url, random_url, search_url, SearchRequest};
pub use session::{Session, WalkToken};
pub use types::{Filters, GeoPoint, Restaurant, SearchResponse, FILTER_ALL};
