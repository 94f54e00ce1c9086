//! メインアプリケーションコンポーネント

use crate::components::{filter_panel::FilterPanel, header::Header, result_list::ResultList};
use crate::flight::FlightSlot;
use crate::{geolocation, loader};
use leptos::prelude::*;
use machimeshi_common::{Filters, LoadMode, Restaurant, Session, DEFAULT_POSITION, FILTER_ALL};
use wasm_bindgen_futures::spawn_local;

/// 件数サマリの表示文字列
///
/// ランダム取得では総数が分からないので件数だけ出す
fn summary_text(total: Option<u32>, shown: usize) -> String {
    match total {
        Some(total) => format!("全{}件中 {}件を表示", total, shown),
        None if shown > 0 => format!("{}件を表示", shown),
        None => String::new(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 検索条件
    let (area, set_area) = signal(FILTER_ALL.to_string());
    let (category, set_category) = signal(FILTER_ALL.to_string());
    let (distance_m, set_distance_m) = signal(1000u32);

    // セッション状態と表示データ。最初の読み込みが必ず走るので
    // プレースホルダは置換分で初期化しておく
    let session = RwSignal::new(Session::new(DEFAULT_POSITION));
    let items = RwSignal::new(Vec::<Restaurant>::new());
    let placeholders = RwSignal::new(loader::PLACEHOLDER_REPLACE);
    let total = RwSignal::new(None::<u32>);
    let (geo, set_geo) = signal(DEFAULT_POSITION);

    let busy = Signal::derive(move || session.with(|s| s.is_loading()));
    let no_more = Signal::derive(move || session.with(|s| s.no_more));

    let handles = loader::LoaderHandles {
        session,
        items,
        placeholders,
        total,
    };
    let slot = FlightSlot::new();

    // 読み込み開始時点の条件スナップショット
    let current_filters = move || Filters {
        area: area.get_untracked(),
        category: category.get_untracked(),
        distance_m: distance_m.get_untracked(),
    };

    // 検索: 置換モード
    let on_search = {
        let slot = slot.clone();
        move |_| {
            let slot = slot.clone();
            let filters = current_filters();
            spawn_local(loader::load(handles, slot, filters, LoadMode::Replace, false));
        }
    };

    // もっと見る: 追記モード
    let on_more = {
        let slot = slot.clone();
        move |_| {
            let slot = slot.clone();
            let filters = current_filters();
            spawn_local(loader::load(handles, slot, filters, LoadMode::Append, false));
        }
    };

    // ランダムに1軒
    let on_random = move |_| {
        spawn_local(loader::random_pick(handles));
    };

    // 起動時: 現在地を解決してから最初の読み込み。
    // 拒否・未対応でも既定座標で即座に読み込む
    {
        let slot = slot.clone();
        geolocation::locate(move |point| {
            if let Some(p) = point {
                set_geo.set(p);
                session.update(|s| s.geo = p);
            }
            let filters = current_filters();
            spawn_local(loader::load(handles, slot, filters, LoadMode::Replace, true));
        });
    }

    view! {
        <div class="container">
            <Header />

            <FilterPanel
                area=area
                set_area=set_area
                category=category
                set_category=set_category
                distance_m=distance_m
                set_distance_m=set_distance_m
                busy=busy
                on_search=on_search
                on_random=on_random
            />

            <p class="result_summary">
                {move || summary_text(total.get(), items.with(|v| v.len()))}
            </p>

            <ResultList
                items=items.read_only()
                geo=geo
                placeholders=placeholders.read_only()
                busy=busy
                no_more=no_more
                on_more=on_more
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_with_total() {
        assert_eq!(summary_text(Some(42), 20), "全42件中 20件を表示");
    }

    #[test]
    fn test_summary_without_total() {
        assert_eq!(summary_text(None, 5), "5件を表示");
    }

    #[test]
    fn test_summary_initial_state_is_blank() {
        assert_eq!(summary_text(None, 0), "");
    }
}
