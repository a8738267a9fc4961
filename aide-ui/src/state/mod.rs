//! State Management
//!
//! The controller and its reactive view of [`UiState`], provided to every
//! component through context.

pub mod globals;

use std::cell::RefCell;
use std::rc::Rc;

use aide::bindings::{Bindings, Trigger};
use aide::view::{StateCell, SystemClock};
use aide::{Action, Controller, Dialogs, UiState};
use leptos::*;

use crate::api::GlooBackend;

/// [`UiState`] behind a reactive trigger. Controller writes notify;
/// components subscribe through [`UiSignal::select`].
#[derive(Clone)]
pub struct UiSignal {
    cell: Rc<RefCell<UiState>>,
    changed: leptos::Trigger,
}

impl UiSignal {
    pub fn new(state: UiState) -> Self {
        Self {
            cell: Rc::new(RefCell::new(state)),
            changed: create_trigger(),
        }
    }

    /// Tracked read for use inside reactive closures
    pub fn with<R>(&self, f: impl FnOnce(&UiState) -> R) -> R {
        self.changed.track();
        StateCell::read(&*self.cell, f)
    }

    /// Slice of the state that only notifies its readers when it changes,
    /// so an edit in one pane does not re-render the others
    pub fn select<T>(&self, f: impl Fn(&UiState) -> T + 'static) -> Memo<T>
    where
        T: PartialEq + 'static,
    {
        let ui = self.clone();
        create_memo(move |_| ui.with(&f))
    }
}

impl StateCell for UiSignal {
    fn update<R>(&self, f: impl FnOnce(&mut UiState) -> R) -> R {
        let out = StateCell::update(&*self.cell, f);
        self.changed.notify();
        out
    }

    fn read<R>(&self, f: impl FnOnce(&UiState) -> R) -> R {
        StateCell::read(&*self.cell, f)
    }
}

/// `window.confirm` / `window.alert`
pub struct BrowserDialogs;

impl Dialogs for BrowserDialogs {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            if window.alert_with_message(message).is_err() {
                tracing::warn!("alert suppressed: {}", message);
            }
        }
    }
}

pub type AppController = Controller<UiSignal, GlooBackend, BrowserDialogs, SystemClock>;

/// Everything components need, cheap to clone
#[derive(Clone)]
pub struct AppContext {
    pub controller: Rc<AppController>,
    pub ui: UiSignal,
    pub bindings: Rc<Bindings>,
}

impl AppContext {
    /// Run an action in the background
    pub fn dispatch(&self, action: Action) {
        let controller = Rc::clone(&self.controller);
        spawn_local(async move { controller.dispatch(action).await });
    }

    /// Dispatch whatever the bindings table maps `trigger` to
    pub fn fire(&self, trigger: Trigger) {
        match self.bindings.resolve(trigger) {
            Some(action) => self.dispatch(action),
            None => tracing::debug!(?trigger, "unbound trigger"),
        }
    }

    /// Synchronous state edit (input boxes)
    pub fn edit(&self, f: impl FnOnce(&mut UiState)) {
        self.ui.update(f);
    }
}

/// Build the controller and provide it to the component tree
pub fn provide_app_context() -> AppContext {
    let ui = UiSignal::new(UiState::default());
    let controller = Rc::new(Controller::new(
        ui.clone(),
        GlooBackend::from_storage(),
        BrowserDialogs,
        SystemClock,
    ));
    let context = AppContext {
        controller,
        ui,
        bindings: Rc::new(Bindings::standard()),
    };

    provide_context(context.clone());
    context
}

pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_select_ignores_unrelated_edits() {
        let runtime = create_runtime();
        let ui = UiSignal::new(UiState::default());
        let uploads = ui.select(|state| state.quiz.uploads.clone());

        let renders = Rc::new(Cell::new(0));
        let counter = Rc::clone(&renders);
        create_isomorphic_effect(move |_| {
            uploads.with(|_| ());
            counter.set(counter.get() + 1);
        });
        assert_eq!(renders.get(), 1);

        // typing in the composer leaves the upload picker alone
        ui.update(|state| state.composer = "hello".to_string());
        ui.update(|state| state.composer.push('!'));
        assert_eq!(renders.get(), 1);

        ui.update(|state| state.quiz.uploads = vec!["notes.pdf".to_string()]);
        assert_eq!(renders.get(), 2);
        assert_eq!(uploads.get_untracked(), vec!["notes.pdf".to_string()]);

        runtime.dispose();
    }
}
