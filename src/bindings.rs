//! UI Bindings
//!
//! Declarative table from static page controls to controller actions,
//! built once when the shell mounts. Dynamic controls (session entries,
//! task checkboxes, quiz options) carry their own data and build their
//! [`Action`] directly.

use std::collections::HashMap;

use crate::api::QuizRequest;
use crate::controller::Action;
use crate::view::View;

pub const NEW_CHAT_BUTTON: &str = "new-chat-btn";
pub const CHAT_FORM: &str = "chat-form";
pub const REFRESH_CALENDAR: &str = "refresh-calendar";
pub const ADD_TASK_BUTTON: &str = "add-task-btn";
pub const NEW_TASK_INPUT: &str = "new-task-input";
pub const BACK_TO_QUIZ_SELECTION: &str = "back-to-quiz-selection";
pub const RECALL_QUIZ_BUTTON: &str = "start-recall-quiz";

/// DOM event on an element, by element id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Click(&'static str),
    Submit(&'static str),
    /// Enter pressed in a text input
    EnterKey(&'static str),
}

pub struct Bindings {
    table: HashMap<Trigger, Action>,
}

impl Bindings {
    /// Bindings of the assistant page
    pub fn standard() -> Self {
        let mut table = HashMap::new();

        table.insert(Trigger::Click(NEW_CHAT_BUTTON), Action::StartNewChat);
        table.insert(Trigger::Submit(CHAT_FORM), Action::SubmitChat);
        for view in View::ALL {
            table.insert(
                Trigger::Click(view.nav_id()),
                Action::SwitchView(view.as_str().to_string()),
            );
        }
        table.insert(Trigger::Click(REFRESH_CALENDAR), Action::FetchEvents);
        table.insert(Trigger::Click(ADD_TASK_BUTTON), Action::AddManualTask);
        table.insert(Trigger::EnterKey(NEW_TASK_INPUT), Action::AddManualTask);
        table.insert(Trigger::Click(BACK_TO_QUIZ_SELECTION), Action::BackToQuizSelection);
        table.insert(
            Trigger::Click(RECALL_QUIZ_BUTTON),
            Action::StartQuiz(QuizRequest::recall()),
        );

        Self { table }
    }

    pub fn resolve(&self, trigger: Trigger) -> Option<Action> {
        self.table.get(&trigger).cloned()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_controls_switch_views() {
        let bindings = Bindings::standard();
        assert_eq!(
            bindings.resolve(Trigger::Click("nav-dashboard")),
            Some(Action::SwitchView("dashboard".to_string()))
        );
        assert_eq!(
            bindings.resolve(Trigger::Click("nav-quizzes")),
            Some(Action::SwitchView("quizzes".to_string()))
        );
    }

    #[test]
    fn test_task_input_bound_twice() {
        let bindings = Bindings::standard();
        assert_eq!(bindings.resolve(Trigger::Click(ADD_TASK_BUTTON)), Some(Action::AddManualTask));
        assert_eq!(
            bindings.resolve(Trigger::EnterKey(NEW_TASK_INPUT)),
            Some(Action::AddManualTask)
        );
        assert_eq!(bindings.resolve(Trigger::Click(NEW_TASK_INPUT)), None);
    }

    #[test]
    fn test_unbound_trigger() {
        let bindings = Bindings::standard();
        assert_eq!(bindings.resolve(Trigger::Submit("search-form")), None);
        assert_eq!(bindings.len(), 11);
    }
}
