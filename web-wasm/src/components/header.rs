//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"マチメシ - 近くの飲食店さがし"</h1>
        </header>
    }
}
