//! Manual to-do list kept by the backend next to the calendar tasks

use super::{Effect, Listing, UiState};
use crate::api::{ApiResult, ManualTask};

pub const NO_MANUAL_TASKS: &str = "No manual tasks yet.";
pub const MANUAL_TASKS_FAILED: &str = "Failed to load tasks";
pub const ADD_TASK_FAILED: &str = "Failed to add task";

#[derive(Debug, Clone, PartialEq)]
pub struct ManualTaskRow {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl From<ManualTask> for ManualTaskRow {
    fn from(task: ManualTask) -> Self {
        Self {
            id: task.id,
            text: task.text,
            completed: task.completed,
        }
    }
}

impl UiState {
    pub fn finish_load_manual_tasks(&mut self, result: ApiResult<Vec<ManualTask>>) {
        self.manual_tasks = match result {
            Ok(tasks) => Listing::from_items(
                tasks.into_iter().map(ManualTaskRow::from).collect(),
                NO_MANUAL_TASKS,
            ),
            Err(e) => {
                tracing::error!("Error loading manual tasks: {}", e);
                Listing::Failed(MANUAL_TASKS_FAILED.to_string())
            }
        };
    }

    /// Text of the task to add, or `None` for blank input
    pub fn begin_add_task(&mut self) -> Option<String> {
        let text = self.task_input.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    pub fn finish_add_task(&mut self, result: ApiResult<bool>) -> Vec<Effect> {
        match result {
            Ok(true) => {
                self.task_input.clear();
                vec![Effect::LoadManualTasks]
            }
            Ok(false) => vec![Effect::Alert(ADD_TASK_FAILED.to_string())],
            Err(e) => {
                tracing::error!("Error adding task: {}", e);
                vec![Effect::Alert(ADD_TASK_FAILED.to_string())]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    #[test]
    fn test_manual_task_listing() {
        let mut state = UiState::default();
        state.finish_load_manual_tasks(Ok(vec![ManualTask {
            id: "1".to_string(),
            text: "Buy milk".to_string(),
            completed: true,
        }]));
        assert_eq!(state.manual_tasks.items()[0].text, "Buy milk");
        assert!(state.manual_tasks.items()[0].completed);

        state.finish_load_manual_tasks(Ok(Vec::new()));
        assert_eq!(state.manual_tasks.placeholder(), Some(NO_MANUAL_TASKS));

        state.finish_load_manual_tasks(Err(ApiError::Decode("bad".to_string())));
        assert_eq!(state.manual_tasks.placeholder(), Some(MANUAL_TASKS_FAILED));
    }

    #[test]
    fn test_blank_task_not_submitted() {
        let mut state = UiState::default();
        state.task_input = "   ".to_string();
        assert!(state.begin_add_task().is_none());

        state.task_input = "  call mum ".to_string();
        assert_eq!(state.begin_add_task().as_deref(), Some("call mum"));
    }

    #[test]
    fn test_add_task_outcomes() {
        let mut state = UiState::default();
        state.task_input = "call mum".to_string();

        assert_eq!(
            state.finish_add_task(Ok(false)),
            vec![Effect::Alert(ADD_TASK_FAILED.to_string())]
        );
        assert_eq!(state.task_input, "call mum");

        assert_eq!(state.finish_add_task(Ok(true)), vec![Effect::LoadManualTasks]);
        assert!(state.task_input.is_empty());
    }
}
