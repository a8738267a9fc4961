//! View routing
//!
//! Exactly one of the four top-level views is visible at a time.

use std::fmt;
use std::str::FromStr;

use super::{Effect, UiState};

/// Top-level views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Chat,
    Tasks,
    Dashboard,
    Quizzes,
}

impl View {
    pub const ALL: [View; 4] = [View::Chat, View::Tasks, View::Dashboard, View::Quizzes];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Chat => "chat",
            View::Tasks => "tasks",
            View::Dashboard => "dashboard",
            View::Quizzes => "quizzes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            View::Chat => "Chat",
            View::Tasks => "Tasks",
            View::Dashboard => "Dashboard",
            View::Quizzes => "Quizzes",
        }
    }

    /// DOM id of the view's root container
    pub fn container_id(&self) -> &'static str {
        match self {
            View::Chat => "chat-area",
            View::Tasks => "tasks-view",
            View::Dashboard => "dashboard-view",
            View::Quizzes => "quizzes-view",
        }
    }

    /// DOM id of the view's navigation control
    pub fn nav_id(&self) -> &'static str {
        match self {
            View::Chat => "nav-chat",
            View::Tasks => "nav-tasks",
            View::Dashboard => "nav-dashboard",
            View::Quizzes => "nav-quizzes",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A view name that is not one of the four known views
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view: {0}")]
pub struct UnknownView(pub String);

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|view| view.as_str() == s)
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}

impl UiState {
    /// Switch by name. Unknown names leave everything as it is.
    pub fn switch_view(&mut self, name: &str) -> Vec<Effect> {
        match name.parse::<View>() {
            Ok(view) => self.show(view),
            Err(e) => {
                tracing::debug!("ignoring view switch: {}", e);
                Vec::new()
            }
        }
    }

    /// Make `view` the visible view and request its refresh
    pub fn show(&mut self, view: View) -> Vec<Effect> {
        tracing::debug!(from = %self.active_view, to = %view, "switching view");
        self.active_view = view;

        match view {
            View::Chat => Vec::new(),
            View::Tasks => vec![Effect::FetchEvents, Effect::LoadManualTasks],
            View::Dashboard => vec![Effect::LoadDashboard],
            View::Quizzes => {
                self.quiz.back_to_selection();
                Vec::new()
            }
        }
    }

    pub fn is_visible(&self, view: View) -> bool {
        self.active_view == view
    }

    pub fn is_nav_active(&self, view: View) -> bool {
        self.active_view == view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::QuizScreen;

    #[test]
    fn test_exactly_one_view_visible() {
        let mut state = UiState::default();
        for target in View::ALL {
            state.show(target);
            let visible: Vec<View> = View::ALL
                .into_iter()
                .filter(|v| state.is_visible(*v))
                .collect();
            assert_eq!(visible, vec![target]);

            let active_navs = View::ALL.into_iter().filter(|v| state.is_nav_active(*v)).count();
            assert_eq!(active_navs, 1);
            assert!(state.is_nav_active(target));
        }
    }

    #[test]
    fn test_refresh_effects_per_view() {
        let mut state = UiState::default();
        assert_eq!(
            state.switch_view("tasks"),
            vec![Effect::FetchEvents, Effect::LoadManualTasks]
        );
        assert_eq!(state.switch_view("dashboard"), vec![Effect::LoadDashboard]);
        assert!(state.switch_view("chat").is_empty());
        assert!(state.switch_view("quizzes").is_empty());
    }

    #[test]
    fn test_unknown_view_is_noop() {
        let mut state = UiState::default();
        state.show(View::Tasks);
        assert!(state.switch_view("settings").is_empty());
        assert_eq!(state.active_view, View::Tasks);
        assert!(state.switch_view("Dashboard").is_empty());
        assert_eq!(state.active_view, View::Tasks);
    }

    #[test]
    fn test_quizzes_resets_to_selection() {
        let mut state = UiState::default();
        state.quiz.screen = QuizScreen::Content;
        state.switch_view("quizzes");
        assert_eq!(state.quiz.screen, QuizScreen::Selection);
    }
}
