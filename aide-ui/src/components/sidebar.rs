//! Sidebar Component
//!
//! New-chat control, chat sessions and upcoming calendar events.

use aide::bindings::{Trigger, NEW_CHAT_BUTTON, REFRESH_CALENDAR};
use aide::view::{EventRow, SessionItem};
use aide::Action;
use leptos::*;

use super::listing_view;
use crate::state::use_app;

#[component]
pub fn Sidebar() -> impl IntoView {
    let app = use_app();

    let new_chat = app.clone();
    let sessions = app.ui.select(|state| state.sessions.clone());
    let events = app.ui.select(|state| state.events.sidebar.clone());

    view! {
        <aside class="sidebar">
            <button
                id=NEW_CHAT_BUTTON
                class="new-chat-btn"
                on:click=move |_| new_chat.fire(Trigger::Click(NEW_CHAT_BUTTON))
            >
                "+ New Chat"
            </button>

            <h3 class="sidebar-heading">"Chats"</h3>
            <ul id="session-list" class="session-list">
                {move || {
                    sessions
                        .get()
                        .into_iter()
                        .map(|item| view! { <SessionEntry item=item /> })
                        .collect_view()
                }}
            </ul>

            <div class="sidebar-heading">
                <h3>"Upcoming"</h3>
                <button
                    id=REFRESH_CALENDAR
                    class="icon-btn"
                    title="Refresh"
                    on:click=move |_| app.fire(Trigger::Click(REFRESH_CALENDAR))
                >
                    "⟳"
                </button>
            </div>
            <ul id="events-list" class="events-list">
                {move || {
                    events.with(|listing| {
                        listing_view(listing, |row: EventRow| {
                            view! {
                                <li class="event-item">
                                    <span class="event-time">{row.time}</span>
                                    <span class="event-title">{row.title}</span>
                                </li>
                            }
                        })
                    })
                }}
            </ul>
        </aside>
    }
}

/// One session: click opens it, the delete control removes it
#[component]
fn SessionEntry(item: SessionItem) -> impl IntoView {
    let app = use_app();
    let open = app.clone();
    let open_id = item.id.clone();
    let delete_id = item.id;

    view! {
        <li
            class="session-item"
            class:active=item.active
            on:click=move |_| open.dispatch(Action::LoadSession(open_id.clone()))
        >
            <span class="session-title">{item.title}</span>
            <button
                class="delete-session-btn"
                title="Delete chat"
                on:click=move |ev| {
                    ev.stop_propagation();
                    app.dispatch(Action::DeleteSession(delete_id.clone()));
                }
            >
                "×"
            </button>
        </li>
    }
}
