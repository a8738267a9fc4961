//! Loading Component
//!
//! Spinner and placeholder rendering for [`Listing`]s.

use aide::view::Listing;
use leptos::*;

/// Inline loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="loading">
            <div class="loading-spinner" />
        </div>
    }
}

/// Render a listing: spinner, placeholder line, or one row per item
pub fn listing_view<T, F, V>(listing: &Listing<T>, row: F) -> View
where
    T: Clone,
    F: Fn(T) -> V,
    V: IntoView,
{
    match listing {
        Listing::Loading => view! { <Loading /> }.into_view(),
        Listing::Failed(text) => view! { <p class="placeholder error">{text.clone()}</p> }.into_view(),
        Listing::Empty(text) => view! { <p class="placeholder">{text.clone()}</p> }.into_view(),
        Listing::Items(items) => items.iter().cloned().map(row).collect_view(),
    }
}
