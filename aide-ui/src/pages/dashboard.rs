//! Dashboard Page
//!
//! Greeting, usage counters, knowledge profile and upcoming events.

use aide::view::{DashboardView, KnowledgeBar, UpcomingRow};
use leptos::*;

use crate::components::{listing_view, Loading};
use crate::state::use_app;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let dashboard = use_app().ui.select(|state| state.dashboard.clone());

    view! {
        {move || match dashboard.get() {
            Some(dashboard) => view! { <Stats dashboard=dashboard /> }.into_view(),
            None => view! { <Loading /> }.into_view(),
        }}
    }
}

#[component]
fn Stats(dashboard: DashboardView) -> impl IntoView {
    view! {
        <header class="dashboard-header">
            <h1 id="dashboard-greeting">{dashboard.greeting}</h1>
            <p id="dashboard-date" class="muted">{dashboard.date}</p>
        </header>

        <div class="stat-grid">
            <StatCard id="stat-chats" label="Chats" value=dashboard.total_chats />
            <StatCard id="stat-files" label="Files" value=dashboard.total_files />
            <StatCard id="stat-events" label="Upcoming Events" value=dashboard.upcoming_events_count />
        </div>

        <div class="dashboard-columns">
            <section class="card">
                <h2>"Knowledge Profile"</h2>
                <div id="knowledge-profile">
                    {listing_view(&dashboard.knowledge, |bar: KnowledgeBar| {
                        view! {
                            <div class="knowledge-row">
                                <div class="knowledge-labels">
                                    <span>{bar.topic.clone()}</span>
                                    <span>{bar.label.clone()}</span>
                                </div>
                                <div class="progress">
                                    <div class="progress-fill" style=bar.width_style() />
                                </div>
                            </div>
                        }
                    })}
                </div>
            </section>

            <section class="card">
                <h2>"Upcoming"</h2>
                <ul id="dashboard-upcoming">
                    {listing_view(&dashboard.upcoming, |row: UpcomingRow| {
                        view! {
                            <li class="upcoming-item">
                                <div class="date-box">
                                    <span class="month">{row.month}</span>
                                    <span class="day">{row.day}</span>
                                </div>
                                <div>
                                    <span class="upcoming-title">{row.title}</span>
                                    <span class="upcoming-time">{row.time}</span>
                                </div>
                            </li>
                        }
                    })}
                </ul>
            </section>
        </div>
    }
}

#[component]
fn StatCard(id: &'static str, label: &'static str, value: u64) -> impl IntoView {
    view! {
        <div class="stat-card">
            <span id=id class="stat-value">{value}</span>
            <span class="stat-label">{label}</span>
        </div>
    }
}
