//! Navigation Component
//!
//! One control per top-level view.

use aide::bindings::Trigger;
use aide::view::View;
use leptos::*;

use crate::state::use_app;

/// Navigation bar component
#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="view-nav">
            {View::ALL.into_iter().map(|view| view! { <NavButton view=view /> }).collect_view()}
        </nav>
    }
}

/// Individual navigation control, `active` while its view is shown
#[component]
fn NavButton(view: View) -> impl IntoView {
    let app = use_app();
    let active = app.ui.select(move |state| state.is_nav_active(view));

    view! {
        <button
            id=view.nav_id()
            class="nav-item"
            class:active=move || active.get()
            on:click=move |_| app.fire(Trigger::Click(view.nav_id()))
        >
            {view.label()}
        </button>
    }
}
