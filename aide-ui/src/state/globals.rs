//! Page-global functions on `window`, for inline handlers and the console.

use aide::Action;
use wasm_bindgen::prelude::*;

use super::AppContext;

fn expose(name: &str, function: &JsValue) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if js_sys::Reflect::set(&window, &JsValue::from_str(name), function).is_err() {
        tracing::warn!("could not expose window.{}", name);
    }
}

/// Install `startNewChat`, `switchView`, `toggleEventCompletion` and
/// `deleteCalendarEvent`. The closures live for the page's lifetime.
pub fn install(context: &AppContext) {
    let app = context.clone();
    let start_new_chat = Closure::<dyn Fn()>::new(move || app.dispatch(Action::StartNewChat));
    expose("startNewChat", start_new_chat.as_ref());
    start_new_chat.forget();

    let app = context.clone();
    let switch_view =
        Closure::<dyn Fn(String)>::new(move |name: String| app.dispatch(Action::SwitchView(name)));
    expose("switchView", switch_view.as_ref());
    switch_view.forget();

    let app = context.clone();
    let toggle = Closure::<dyn Fn(String, String)>::new(move |event_id: String, summary: String| {
        app.dispatch(Action::ToggleEventCompletion { event_id, summary })
    });
    expose("toggleEventCompletion", toggle.as_ref());
    toggle.forget();

    let app = context.clone();
    let delete = Closure::<dyn Fn(String, String)>::new(move |event_id: String, summary: String| {
        app.dispatch(Action::DeleteCalendarEvent { event_id, summary })
    });
    expose("deleteCalendarEvent", delete.as_ref());
    delete.forget();
}
