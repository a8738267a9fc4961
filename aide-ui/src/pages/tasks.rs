//! Tasks Page
//!
//! Today's calendar events as checkable tasks, plus manual tasks.

use aide::bindings::{Trigger, ADD_TASK_BUTTON, NEW_TASK_INPUT};
use aide::view::{ManualTaskRow, TaskRow};
use aide::Action;
use leptos::*;

use crate::components::listing_view;
use crate::state::use_app;

#[component]
pub fn Tasks() -> impl IntoView {
    let app = use_app();
    let typing = app.clone();
    let enter = app.clone();
    let today = app.ui.select(|state| state.events.today.clone());
    let manual = app.ui.select(|state| state.manual_tasks.clone());
    let input = app.ui.select(|state| state.task_input.clone());

    view! {
        <h2>"Today's Tasks"</h2>
        <ul id="calendar-tasks" class="task-list">
            {move || {
                today.with(|listing| {
                    listing_view(listing, |row: TaskRow| view! { <CalendarTask row=row /> })
                })
            }}
        </ul>

        <h2>"My Tasks"</h2>
        <div class="add-task">
            <input
                type="text"
                id=NEW_TASK_INPUT
                placeholder="Add a task..."
                prop:value=move || input.get()
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    typing.edit(|state| state.task_input = text);
                }
                on:keydown=move |ev: ev::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        enter.fire(Trigger::EnterKey(NEW_TASK_INPUT));
                    }
                }
            />
            <button
                id=ADD_TASK_BUTTON
                on:click=move |_| app.fire(Trigger::Click(ADD_TASK_BUTTON))
            >
                "Add"
            </button>
        </div>
        <ul id="manual-tasks" class="task-list">
            {move || {
                manual.with(|listing| {
                    listing_view(listing, |row: ManualTaskRow| {
                        view! {
                            <li class="task-item" class:completed=row.completed>
                                <span class="task-title">{row.text}</span>
                            </li>
                        }
                    })
                })
            }}
        </ul>
    }
}

/// Checkbox toggles completion; completed tasks can be deleted
#[component]
fn CalendarTask(row: TaskRow) -> impl IntoView {
    let app = use_app();
    let delete = app.clone();

    let toggle = Action::ToggleEventCompletion {
        event_id: row.event_id.clone(),
        summary: row.summary.clone(),
    };
    let remove = Action::DeleteCalendarEvent {
        event_id: row.event_id.clone(),
        summary: row.summary.clone(),
    };
    let struck = row.is_struck_through();
    let checked = row.is_checked();
    let delete_button = row.can_delete().then(|| {
        view! {
            <button
                class="delete-task-btn"
                title="Delete event"
                on:click=move |_| delete.dispatch(remove.clone())
            >
                "🗑"
            </button>
        }
    });

    view! {
        <li class="task-item" class:completed=struck>
            <input
                type="checkbox"
                prop:checked=checked
                on:change=move |_| app.dispatch(toggle.clone())
            />
            <div class="task-body">
                <span class="task-title">{row.summary}</span>
                <span class="task-meta">{row.meta}</span>
            </div>
            {delete_button}
        </li>
    }
}
