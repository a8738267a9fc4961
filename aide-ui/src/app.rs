//! App Root Component
//!
//! Sidebar plus the four top-level views, of which exactly one is shown.

use aide::view::View;
use leptos::*;

use crate::components::{Nav, Sidebar};
use crate::pages::{Chat, Dashboard, Quizzes, Tasks};
use crate::state::{globals, provide_app_context, use_app};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let context = provide_app_context();
    globals::install(&context);

    // Calendar, sessions, manual tasks and dashboard load once on mount
    let controller = context.controller.clone();
    spawn_local(async move { controller.initialize().await });

    view! {
        <div class="app-container">
            <Sidebar />

            <main class="main-content">
                <Nav />

                <ViewContainer view=View::Chat>
                    <Chat />
                </ViewContainer>
                <ViewContainer view=View::Tasks>
                    <Tasks />
                </ViewContainer>
                <ViewContainer view=View::Dashboard>
                    <Dashboard />
                </ViewContainer>
                <ViewContainer view=View::Quizzes>
                    <Quizzes />
                </ViewContainer>
            </main>
        </div>
    }
}

/// Root element of one view, hidden unless it is the active view
#[component]
fn ViewContainer(view: View, children: Children) -> impl IntoView {
    let visible = use_app().ui.select(move |state| state.is_visible(view));
    let hidden = move || !visible.get();

    view! {
        <section id=view.container_id() class="view" class:hidden=hidden>
            {children()}
        </section>
    }
}
