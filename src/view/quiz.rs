//! Quiz hub
//!
//! A selection screen offering the quiz modes and a content screen
//! showing one generated quiz.

use super::{Listing, UiState};
use crate::api::{ApiResult, Quiz, QuizMode, QuizQuestion, QuizRequest, UploadedFile};

pub const NO_QUESTIONS: &str = "No questions were generated.";
pub const QUIZ_FAILED: &str = "Failed to generate quiz";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuizScreen {
    #[default]
    Selection,
    Content,
}

/// One rendered question
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionCard {
    pub prompt: String,
    pub options: Vec<String>,
    pub answer: Option<String>,
    /// Index into `options` picked by the user
    pub chosen: Option<usize>,
}

impl From<QuizQuestion> for QuestionCard {
    fn from(question: QuizQuestion) -> Self {
        Self {
            prompt: question.question,
            options: question.options,
            answer: question.answer,
            chosen: None,
        }
    }
}

impl QuestionCard {
    /// Index of the correct option. The answer is either the option text
    /// or its letter (`A`, `b)`, ...).
    pub fn correct_index(&self) -> Option<usize> {
        let answer = self.answer.as_deref()?.trim();
        if let Some(i) = self
            .options
            .iter()
            .position(|option| option.trim().eq_ignore_ascii_case(answer))
        {
            return Some(i);
        }

        let letter = answer.trim_end_matches([')', '.', ':']);
        let mut chars = letter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                let i = (c.to_ascii_uppercase() as u8 - b'A') as usize;
                (i < self.options.len()).then_some(i)
            }
            _ => None,
        }
    }

    /// `None` until answered, or when the backend sent no usable answer
    pub fn is_correct(&self) -> Option<bool> {
        let chosen = self.chosen?;
        self.correct_index().map(|i| i == chosen)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizView {
    pub screen: QuizScreen,
    /// File names offered by the upload-quiz picker
    pub uploads: Vec<String>,
    /// Mode of the quiz on the content screen
    pub mode: Option<QuizMode>,
    pub topics: Option<String>,
    pub questions: Listing<QuestionCard>,
}

impl QuizView {
    pub fn back_to_selection(&mut self) {
        self.screen = QuizScreen::Selection;
    }

    pub fn begin_quiz(&mut self, request: &QuizRequest) {
        self.screen = QuizScreen::Content;
        self.mode = Some(request.mode);
        self.topics = None;
        self.questions = Listing::Loading;
    }

    pub fn finish_quiz(&mut self, result: ApiResult<Quiz>) {
        match result {
            Ok(quiz) => {
                self.topics = quiz.topics_label();
                self.questions = if quiz.questions.is_empty() {
                    let reason = quiz
                        .error
                        .filter(|e| !e.trim().is_empty())
                        .unwrap_or_else(|| NO_QUESTIONS.to_string());
                    tracing::warn!("Quiz generation returned no questions: {}", reason);
                    Listing::Empty(reason)
                } else {
                    Listing::Items(quiz.questions.into_iter().map(QuestionCard::from).collect())
                };
            }
            Err(e) => {
                tracing::error!("Error generating quiz: {}", e);
                self.questions = Listing::Failed(QUIZ_FAILED.to_string());
            }
        }
    }

    /// Record a choice. Answered questions and out-of-range picks are ignored.
    pub fn answer(&mut self, index: usize, choice: usize) -> bool {
        match self.questions.items_mut().get_mut(index) {
            Some(card) if card.chosen.is_none() && choice < card.options.len() => {
                card.chosen = Some(choice);
                true
            }
            _ => false,
        }
    }

    /// `(correct, total)` over the rendered questions
    pub fn score(&self) -> (usize, usize) {
        let cards = self.questions.items();
        let correct = cards.iter().filter(|c| c.is_correct() == Some(true)).count();
        (correct, cards.len())
    }

    pub fn finish_load_uploads(&mut self, result: ApiResult<Vec<UploadedFile>>) {
        match result {
            Ok(files) => self.uploads = files.into_iter().map(|f| f.name).collect(),
            Err(e) => {
                tracing::error!("Error loading uploads: {}", e);
                self.uploads.clear();
            }
        }
    }
}

impl UiState {
    pub fn begin_quiz(&mut self, request: &QuizRequest) {
        self.quiz.begin_quiz(request);
    }

    pub fn finish_quiz(&mut self, result: ApiResult<Quiz>) {
        self.quiz.finish_quiz(result);
    }
}
