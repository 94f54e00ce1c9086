//! 検索結果リストコンポーネント
//!
//! 重複排除はローダー側の責務。ここは受け取った店舗列を
//! そのまま描画し、距離・カテゴリ絵文字・営業バッジを添える

use crate::api::API_BASE;
use leptos::prelude::*;
use machimeshi_common::{
    dedup_key, distance_m, format_distance, map_search_url, photo_url, GeoPoint, Restaurant,
};

/// カテゴリの絵文字。未知のカテゴリには汎用アイコン
fn category_emoji(kind: &str) -> &'static str {
    match kind {
        "和食" => "🍱",
        "中華" => "🥟",
        "イタリアン" => "🍝",
        "カフェ" => "☕",
        "焼肉" => "🥩",
        "ラーメン" => "🍜",
        "寿司" => "🍣",
        "洋食" => "🍽️",
        _ => "🍴",
    }
}

#[component]
pub fn ResultList<FM>(
    items: ReadSignal<Vec<Restaurant>>,
    geo: ReadSignal<GeoPoint>,
    placeholders: ReadSignal<usize>,
    busy: Signal<bool>,
    no_more: Signal<bool>,
    on_more: FM,
) -> impl IntoView
where
    FM: Fn(()) + 'static + Clone,
{
    view! {
        <ul class="result_list">
            <Show when=move || {
                items.with(|v| v.is_empty()) && placeholders.get() == 0 && !busy.get()
            }>
                <li class="result_item empty">"結果がありません"</li>
            </Show>
            <For
                each=move || items.get()
                key=|item| dedup_key(item)
                children=move |item| {
                    view! { <RestaurantCard item=item geo=geo /> }
                }
            />
            {move || {
                (0..placeholders.get())
                    .map(|_| view! { <li class="result_item placeholder"></li> })
                    .collect_view()
            }}
        </ul>
        <div class="load-more">
            <button
                class="btn btn-secondary"
                disabled=move || busy.get() || no_more.get()
                on:click={
                    let on_more = on_more.clone();
                    move |_| on_more(())
                }
            >
                {move || if no_more.get() { "これ以上ありません" } else { "もっと見る" }}
            </button>
        </div>
    }
}

#[component]
fn RestaurantCard(item: Restaurant, geo: ReadSignal<GeoPoint>) -> impl IntoView {
    let emoji = category_emoji(&item.kind);
    let photo = photo_url(API_BASE, &item.addr);
    let map_url = map_search_url(&item.name, &item.addr);

    // 座標が無い店舗は距離表示を省略
    let loc = match (item.loc_x, item.loc_y) {
        (Some(x), Some(y)) => Some(GeoPoint { lat: y, lon: x }),
        _ => None,
    };
    let distance_label =
        move || loc.map(|p| format_distance(distance_m(geo.get(), p)));

    let badge_class = if item.open { "badge open" } else { "badge closed" };
    let badge_text = if item.open { "営業中" } else { "営業時間外" };

    view! {
        <li class="result_item">
            <img src=photo alt="店舗写真" />
            <div class="item_info">
                <h3 class="name">{item.name.clone()}</h3>
                <p class="address">{item.addr.clone()}</p>
                <p class="category">
                    <span class="category_icon">{emoji}</span>
                    {item.kind.clone()}
                    <span class=badge_class>{badge_text}</span>
                    <span class="distance">{distance_label}</span>
                </p>
                <button
                    class="btn_select"
                    on:click=move |_| open_map(&map_url)
                >
                    "地図で見る"
                </button>
            </div>
        </li>
    }
}

/// 外部地図検索を別タブで開く
fn open_map(url: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.open_with_url_and_target(url, "_blank");
    }
}
