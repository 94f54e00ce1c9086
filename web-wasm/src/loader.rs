//! 結果ローダー
//!
//! フォールバックラダーを順に歩き、未表示の店舗が得られた段で
//! 描画して終了する。判定そのものはcommon側の純粋な状態機械が行い、
//! ここはfetchの発行とシグナル更新だけを受け持つ

use crate::api::{self, FetchError, API_BASE};
use crate::flight::FlightSlot;
use gloo::console;
use leptos::prelude::*;
use machimeshi_common::query::RANDOM_SAMPLE_COUNT;
use machimeshi_common::{
    random_url, search_url, Filters, LadderWalk, LoadMode, Offer, Restaurant, SearchRequest,
    Session, WalkStep, WalkToken,
};

/// 新規検索時のプレースホルダ数
pub const PLACEHOLDER_REPLACE: usize = 6;
/// 追記時のプレースホルダ数
pub const PLACEHOLDER_APPEND: usize = 3;

/// ローダーが読み書きするシグナル束
#[derive(Clone, Copy)]
pub struct LoaderHandles {
    pub session: RwSignal<Session>,
    pub items: RwSignal<Vec<Restaurant>>,
    pub placeholders: RwSignal<usize>,
    pub total: RwSignal<Option<u32>>,
}

/// 検索または「もっと見る」の実行
///
/// 進行中なら何もせずログだけ残す。キャンセルされた呼び出しは
/// 描画も状態更新もしない
pub async fn load(
    h: LoaderHandles,
    slot: FlightSlot,
    filters: Filters,
    mode: LoadMode,
    randomize: bool,
) {
    if mode == LoadMode::Append && h.session.with_untracked(|s| s.no_more) {
        console::log!("これ以上の結果はありません");
        return;
    }
    let Some(token) = h.session.try_update(|s| s.try_begin()).flatten() else {
        console::log!("読み込み中のため無視します");
        return;
    };
    h.placeholders.set(match mode {
        LoadMode::Replace => PLACEHOLDER_REPLACE,
        LoadMode::Append => PLACEHOLDER_APPEND,
    });

    let controller = slot.begin();
    let signal = controller.signal();
    let geo = h.session.with_untracked(|s| s.geo);
    let offset = match mode {
        LoadMode::Replace => 0,
        LoadMode::Append => h.session.with_untracked(|s| s.shown.len() as u32),
    };
    let mut walk = h.session.with_untracked(|s| LadderWalk::new(mode, &s.shown));

    loop {
        match walk.next_step() {
            WalkStep::Tier(tier) => {
                let url = {
                    let exclude = h.session.with_untracked(|s| s.shown.keys().to_vec());
                    let req = SearchRequest {
                        filters: &filters,
                        tier,
                        geo,
                        exclude: &exclude,
                        offset,
                        randomize,
                        seed: random_seed(),
                        cb: cache_buster(),
                    };
                    search_url(API_BASE, &req)
                };
                match api::fetch_search(&url, &signal).await {
                    Ok(resp) => {
                        let offer =
                            h.session.with_untracked(|s| walk.offer(&resp.items, &s.shown));
                        match offer {
                            Offer::Accepted(fresh) => {
                                let Some(accepted) = h
                                    .session
                                    .try_update(|s| s.apply(token, mode, &fresh))
                                    .flatten()
                                else {
                                    return;
                                };
                                render(h, mode, accepted);
                                h.total.set(Some(resp.total));
                                h.session.update(|s| s.note_page(token, resp.items.len()));
                                finish_ui(h, token);
                                return;
                            }
                            Offer::Next => continue,
                        }
                    }
                    Err(e) => {
                        fail(h, token, e);
                        return;
                    }
                }
            }
            WalkStep::RandomFallback => {
                let url = random_url(API_BASE, Some(RANDOM_SAMPLE_COUNT), cache_buster());
                match api::fetch_random(&url, Some(&signal)).await {
                    Ok(items) => {
                        // 全段外れの最終手段。空でも無条件に全置換する
                        let Some(accepted) = h
                            .session
                            .try_update(|s| s.apply(token, LoadMode::Replace, &items))
                            .flatten()
                        else {
                            return;
                        };
                        render(h, LoadMode::Replace, accepted);
                        h.total.set(None);
                        finish_ui(h, token);
                    }
                    Err(e) => fail(h, token, e),
                }
                return;
            }
        }
    }
}

/// ランダムに1軒（フィルタ無視）
///
/// メインのラダーとは独立したリクエスト寿命を持ち、中断スロットを
/// 共有しない。共有するのはコントロールの無効化状態だけ
pub async fn random_pick(h: LoaderHandles) {
    let Some(token) = h.session.try_update(|s| s.try_begin()).flatten() else {
        console::log!("読み込み中のため無視します");
        return;
    };
    h.placeholders.set(1);

    let url = random_url(API_BASE, None, cache_buster());
    match api::fetch_random(&url, None).await {
        Ok(items) => {
            let Some(accepted) = h
                .session
                .try_update(|s| s.apply(token, LoadMode::Replace, &items))
                .flatten()
            else {
                return;
            };
            render(h, LoadMode::Replace, accepted);
            h.total.set(None);
            finish_ui(h, token);
        }
        Err(e) => fail(h, token, e),
    }
}

fn render(h: LoaderHandles, mode: LoadMode, accepted: Vec<Restaurant>) {
    h.items.update(|list| {
        if mode == LoadMode::Replace {
            list.clear();
        }
        list.extend(accepted);
    });
}

/// 現行世代の操作だけがUIを閉じられる。後続に取って代わられた
/// 呼び出しはプレースホルダにも読み込み中フラグにも触らない
fn finish_ui(h: LoaderHandles, token: WalkToken) {
    if !h.session.with_untracked(|s| s.is_current(token)) {
        return;
    }
    h.session.update(|s| s.finish(token));
    h.placeholders.set(0);
}

fn fail(h: LoaderHandles, token: WalkToken, e: FetchError) {
    // 中断は想定内なのでログも出さない
    if !e.is_cancelled() {
        console::error!("検索に失敗しました:", e.to_string());
    }
    finish_ui(h, token);
}

fn cache_buster() -> u64 {
    js_sys::Date::now() as u64
}

fn random_seed() -> u32 {
    (js_sys::Math::random() * u32::MAX as f64) as u32
}
