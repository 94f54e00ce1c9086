//! 検索APIへのfetch呼び出し
//!
//! URL構築とレスポンスパースはcommon側の純粋関数に任せ、
//! ここではブラウザのfetchとキャンセル分類だけを扱う

use machimeshi_common::{parse_random_response, parse_search_response, Restaurant, SearchResponse};
use std::fmt;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortSignal, DomException, Request, RequestInit, RequestMode, Response};

/// バックエンドのベースURL（コンパイル時定数）
pub const API_BASE: &str = "http://172.31.99.114:8000";

/// fetch失敗の分類
///
/// Cancelledは「後続の呼び出しに取って代わられた」印で、
/// ログにも出さず静かに握りつぶす。それ以外はログを残して走査を止める
#[derive(Debug)]
pub enum FetchError {
    /// AbortControllerによる中断
    Cancelled,
    /// 2xx以外のステータス
    Status(u16),
    /// 接続エラーなどの転送失敗
    Network(String),
    /// 本文が期待した形式でない
    Decode(String),
}

impl FetchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Cancelled => write!(f, "リクエスト中断"),
            FetchError::Status(code) => write!(f, "HTTP {}", code),
            FetchError::Network(msg) => write!(f, "転送エラー: {}", msg),
            FetchError::Decode(msg) => write!(f, "レスポンス不正: {}", msg),
        }
    }
}

/// `/restaurants` を叩く。signalで中断できる
pub async fn fetch_search(url: &str, signal: &AbortSignal) -> Result<SearchResponse, FetchError> {
    let body = fetch_text(url, Some(signal)).await?;
    parse_search_response(&body).map_err(|e| FetchError::Decode(e.to_string()))
}

/// `/restaurants/random` を叩く。単品・配列どちらのレスポンスも受ける
pub async fn fetch_random(
    url: &str,
    signal: Option<&AbortSignal>,
) -> Result<Vec<Restaurant>, FetchError> {
    let body = fetch_text(url, signal).await?;
    parse_random_response(&body).map_err(|e| FetchError::Decode(e.to_string()))
}

async fn fetch_text(url: &str, signal: Option<&AbortSignal>) -> Result<String, FetchError> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);
    opts.set_signal(signal);

    let request = Request::new_with_str_and_init(url, &opts).map_err(network)?;

    let window = web_sys::window().ok_or_else(|| FetchError::Network("no window".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(classify)?;
    let resp: Response = resp_value.dyn_into().map_err(network)?;

    if !resp.ok() {
        return Err(FetchError::Status(resp.status()));
    }

    // 本文読み込み中の中断もここで拾う
    let text = JsFuture::from(resp.text().map_err(network)?)
        .await
        .map_err(classify)?;
    text.as_string()
        .ok_or_else(|| FetchError::Decode("本文が文字列ではありません".to_string()))
}

/// fetchの例外をFetchErrorに分類する。AbortErrorだけを中断として扱う
fn classify(err: JsValue) -> FetchError {
    if let Some(dom) = err.dyn_ref::<DomException>() {
        if dom.name() == "AbortError" {
            return FetchError::Cancelled;
        }
    }
    network(err)
}

fn network(err: JsValue) -> FetchError {
    FetchError::Network(format!("{:?}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        assert_eq!(format!("{}", FetchError::Cancelled), "リクエスト中断");
        assert_eq!(format!("{}", FetchError::Status(503)), "HTTP 503");
        assert!(format!("{}", FetchError::Network("x".into())).contains("転送エラー"));
        assert!(format!("{}", FetchError::Decode("y".into())).contains("レスポンス不正"));
    }

    #[test]
    fn test_is_cancelled() {
        assert!(FetchError::Cancelled.is_cancelled());
        assert!(!FetchError::Status(404).is_cancelled());
        assert!(!FetchError::Network(String::new()).is_cancelled());
    }
}
