//! リモート検索APIクライアント

pub mod restaurants;

pub use restaurants::{fetch_random, fetch_search, FetchError, API_BASE};
