//! 検索条件パネルコンポーネント

use leptos::prelude::*;
use machimeshi_common::FILTER_ALL;

/// エリアの選択肢
pub const AREAS: [&str; 7] = [FILTER_ALL, "新宿", "渋谷", "池袋", "上野", "中野", "吉祥寺"];

/// カテゴリの選択肢
pub const CATEGORIES: [&str; 9] = [
    FILTER_ALL,
    "和食",
    "中華",
    "イタリアン",
    "カフェ",
    "焼肉",
    "ラーメン",
    "寿司",
    "洋食",
];

/// 距離の選択肢（メートル, 表示）
pub const DISTANCES: [(u32, &str); 4] = [(500, "500m"), (1000, "1km"), (2000, "2km"), (5000, "5km")];

#[component]
pub fn FilterPanel<FS, FR>(
    area: ReadSignal<String>,
    set_area: WriteSignal<String>,
    category: ReadSignal<String>,
    set_category: WriteSignal<String>,
    distance_m: ReadSignal<u32>,
    set_distance_m: WriteSignal<u32>,
    busy: Signal<bool>,
    on_search: FS,
    on_random: FR,
) -> impl IntoView
where
    FS: Fn(()) + 'static + Clone,
    FR: Fn(()) + 'static + Clone,
{
    view! {
        <div class="filter-panel">
            <div class="form-group">
                <label for="area">"エリア"</label>
                <select
                    id="area"
                    on:change=move |ev| {
                        set_area.set(event_target_value(&ev));
                    }
                >
                    {AREAS
                        .iter()
                        .copied()
                        .map(|a| {
                            view! {
                                <option value=a selected=move || area.get() == a>
                                    {a}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="form-group">
                <label for="category">"カテゴリ"</label>
                <select
                    id="category"
                    on:change=move |ev| {
                        set_category.set(event_target_value(&ev));
                    }
                >
                    {CATEGORIES
                        .iter()
                        .copied()
                        .map(|c| {
                            view! {
                                <option value=c selected=move || category.get() == c>
                                    {c}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="form-group">
                <label for="distance">"距離"</label>
                <select
                    id="distance"
                    on:change=move |ev| {
                        let value: u32 = event_target_value(&ev).parse().unwrap_or(1000);
                        set_distance_m.set(value);
                    }
                >
                    {DISTANCES
                        .iter()
                        .copied()
                        .map(|(m, label)| {
                            view! {
                                <option value=m.to_string() selected=move || distance_m.get() == m>
                                    {label}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="filter-actions">
                <button
                    id="search"
                    class="btn btn-primary"
                    disabled=move || busy.get()
                    on:click={
                        let on_search = on_search.clone();
                        move |_| on_search(())
                    }
                >
                    {move || if busy.get() { "検索中..." } else { "検索" }}
                </button>
                <button
                    id="random"
                    class="btn btn-secondary"
                    disabled=move || busy.get()
                    on:click={
                        let on_random = on_random.clone();
                        move |_| on_random(())
                    }
                >
                    "ランダムに1軒"
                </button>
            </div>
        </div>
    }
}
