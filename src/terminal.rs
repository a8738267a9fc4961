//! Terminal Front End
//!
//! Plain-text renderings of the view state and stdin-backed dialogs for
//! the `aide` binary.

use std::io::{self, BufRead, Write};

use crate::controller::Dialogs;
use crate::view::{DashboardView, Listing, QuizScreen, QuizView, Sender, TranscriptEntry, UiState};

/// `confirm`/`alert` on the controlling terminal
pub struct TerminalDialogs {
    /// Answer every confirmation with yes without prompting
    pub assume_yes: bool,
}

impl Dialogs for TerminalDialogs {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{} [y/N] ", message);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => matches!(line.trim(), "y" | "Y" | "yes" | "Yes"),
            Err(e) => {
                tracing::warn!("Cannot read confirmation: {}", e);
                false
            }
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("! {}", message);
    }
}

fn push_listing<T>(out: &mut Vec<String>, listing: &Listing<T>, row: impl Fn(&T) -> String) {
    match listing {
        Listing::Loading => out.push("  ...".to_string()),
        Listing::Items(items) => out.extend(items.iter().map(row)),
        Listing::Empty(text) | Listing::Failed(text) => out.push(format!("  {}", text)),
    }
}

pub fn render_transcript(state: &UiState) -> String {
    render_entries(state.transcript.entries())
}

/// Transcript slice, one line per paragraph
pub fn render_entries(entries: &[TranscriptEntry]) -> String {
    let mut lines = Vec::new();
    for entry in entries {
        match entry {
            TranscriptEntry::Message(message) => {
                let who = match message.sender {
                    Sender::User => "you",
                    Sender::Agent => "aide",
                };
                for (i, paragraph) in message.paragraphs.iter().enumerate() {
                    let prefix = if i == 0 { format!("{:>5}:", who) } else { "      ".to_string() };
                    lines.push(format!("{} {}", prefix, paragraph));
                }
            }
            TranscriptEntry::Thinking(_) => lines.push(" aide: ...".to_string()),
        }
    }
    lines.join("\n")
}

pub fn render_sessions(state: &UiState) -> String {
    if state.sessions.is_empty() {
        return "No chat sessions yet.".to_string();
    }

    let mut lines = vec![
        format!("  {:<36} {}", "ID", "Title"),
        "-".repeat(60),
    ];
    for session in &state.sessions {
        let marker = if session.active { "*" } else { " " };
        lines.push(format!("{} {:<36} {}", marker, session.id.as_str(), session.title));
    }
    lines.join("\n")
}

pub fn render_events(state: &UiState) -> String {
    let mut lines = vec!["Upcoming events".to_string()];
    push_listing(&mut lines, &state.events.sidebar, |row| {
        format!("  {:<9} {}", row.time, row.title)
    });

    lines.push(String::new());
    lines.push("Today".to_string());
    push_listing(&mut lines, &state.events.today, |task| {
        let check = if task.is_checked() { "[x]" } else { "[ ]" };
        format!("  {} {:<30} {}  ({})", check, task.summary, task.meta, task.event_id)
    });
    lines.join("\n")
}

pub fn render_manual_tasks(state: &UiState) -> String {
    let mut lines = vec!["My tasks".to_string()];
    push_listing(&mut lines, &state.manual_tasks, |task| {
        let check = if task.completed { "[x]" } else { "[ ]" };
        format!("  {} {}", check, task.text)
    });
    lines.join("\n")
}

pub fn render_dashboard(view: &DashboardView) -> String {
    let mut lines = vec![
        view.greeting.clone(),
        view.date.clone(),
        String::new(),
        format!(
            "Chats: {}   Files: {}   Upcoming events: {}",
            view.total_chats, view.total_files, view.upcoming_events_count
        ),
        String::new(),
        "Knowledge profile".to_string(),
    ];
    push_listing(&mut lines, &view.knowledge, |bar| {
        let filled = (bar.width.clamp(0.0, 100.0) / 5.0).round() as usize;
        format!(
            "  {:<20} {:<20} {:>4}",
            bar.topic,
            "#".repeat(filled),
            bar.label
        )
    });

    lines.push(String::new());
    lines.push("Upcoming".to_string());
    push_listing(&mut lines, &view.upcoming, |row| {
        format!("  {} {:>2}  {:<9} {}", row.month, row.day, row.time, row.title)
    });
    lines.join("\n")
}

pub fn render_quiz(quiz: &QuizView) -> String {
    if quiz.screen == QuizScreen::Selection {
        return "No quiz in progress.".to_string();
    }

    let mut lines = Vec::new();
    if let Some(mode) = quiz.mode {
        lines.push(mode.label().to_string());
    }
    if let Some(topics) = &quiz.topics {
        lines.push(format!("Topics: {}", topics));
    }
    match &quiz.questions {
        Listing::Items(cards) => {
            for (i, card) in cards.iter().enumerate() {
                lines.push(String::new());
                lines.push(format!("{}. {}", i + 1, card.prompt));
                for (j, option) in card.options.iter().enumerate() {
                    let letter = (b'A' + (j as u8 % 26)) as char;
                    let picked = if card.chosen == Some(j) { ">" } else { " " };
                    lines.push(format!("  {} {}) {}", picked, letter, option));
                }
                match card.is_correct() {
                    Some(true) => lines.push("  Correct!".to_string()),
                    Some(false) => lines.push(format!(
                        "  Incorrect. Answer: {}",
                        card.answer.as_deref().unwrap_or("-")
                    )),
                    None => {}
                }
            }
            let (correct, total) = quiz.score();
            lines.push(String::new());
            lines.push(format!("Score: {} / {}", correct, total));
        }
        other => push_listing(&mut lines, other, |_| String::new()),
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SessionId;
    use crate::view::{ChatMessage, SessionItem};

    #[test]
    fn test_transcript_indents_paragraphs() {
        let mut state = UiState::default();
        state.transcript.push(ChatMessage::new(Sender::User, "hi"));
        state.transcript.push(ChatMessage::new(Sender::Agent, "hello\nwhat's up?"));
        state.transcript.show_thinking();

        assert_eq!(
            render_transcript(&state),
            "  you: hi\n aide: hello\n       what's up?\n aide: ..."
        );
    }

    #[test]
    fn test_sessions_mark_active() {
        let mut state = UiState::default();
        assert_eq!(render_sessions(&state), "No chat sessions yet.");

        state.sessions.push(SessionItem {
            id: SessionId::new("s1"),
            title: "Trip".to_string(),
            active: true,
        });
        let out = render_sessions(&state);
        assert!(out.lines().last().unwrap().starts_with("* s1"));
    }

    #[test]
    fn test_listing_placeholders_render() {
        let mut state = UiState::default();
        state.manual_tasks = Listing::Empty("No manual tasks yet.".to_string());
        assert_eq!(render_manual_tasks(&state), "My tasks\n  No manual tasks yet.");
        assert_eq!(render_quiz(&state.quiz), "No quiz in progress.");
    }
}
