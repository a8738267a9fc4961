//! Quizzes Page
//!
//! Mode selection cards, then the generated questions with scoring.

use aide::api::QuizRequest;
use aide::bindings::{Trigger, BACK_TO_QUIZ_SELECTION, RECALL_QUIZ_BUTTON};
use aide::view::{Listing, QuestionCard, QuizScreen};
use aide::Action;
use leptos::*;

use crate::components::listing_view;
use crate::state::use_app;

#[component]
pub fn Quizzes() -> impl IntoView {
    let screen = use_app().ui.select(|state| state.quiz.screen);

    view! {
        {move || match screen.get() {
            QuizScreen::Selection => view! { <Selection /> }.into_view(),
            QuizScreen::Content => view! { <Content /> }.into_view(),
        }}
    }
}

#[component]
fn Selection() -> impl IntoView {
    let app = use_app();
    let recall = app.clone();
    let interview = app.clone();
    let uploads = app.clone();

    let (job_role, set_job_role) = create_signal(String::new());
    let (file, set_file) = create_signal(String::new());
    let upload_names = app.ui.select(|state| state.quiz.uploads.clone());

    // Fill the upload picker whenever the selection screen opens
    app.dispatch(Action::LoadUploads);

    view! {
        <div id="quiz-selection" class="quiz-grid">
            <div class="quiz-card">
                <h3>"Daily Recall"</h3>
                <p class="muted">"Questions from your recent conversations."</p>
                <button
                    id=RECALL_QUIZ_BUTTON
                    on:click=move |_| recall.fire(Trigger::Click(RECALL_QUIZ_BUTTON))
                >
                    "Start"
                </button>
            </div>

            <div class="quiz-card">
                <h3>"Mock Interview"</h3>
                <input
                    type="text"
                    id="job-role-input"
                    placeholder="Job role, e.g. Frontend Developer"
                    prop:value=job_role
                    on:input=move |ev| set_job_role.set(event_target_value(&ev))
                />
                <button
                    id="start-interview-quiz"
                    on:click=move |_| {
                        let role = job_role.get_untracked().trim().to_string();
                        if !role.is_empty() {
                            interview.dispatch(Action::StartQuiz(QuizRequest::interview(role)));
                        }
                    }
                >
                    "Start"
                </button>
            </div>

            <div class="quiz-card">
                <h3>"Quiz My Uploads"</h3>
                <select
                    id="upload-select"
                    prop:value=move || file.get()
                    on:change=move |ev| set_file.set(event_target_value(&ev))
                >
                    <option value="">"Choose a file"</option>
                    {move || {
                        upload_names
                            .get()
                            .into_iter()
                            .map(|name| {
                                let selected = file.get_untracked() == name;
                                view! { <option value=name.clone() selected=selected>{name}</option> }
                            })
                            .collect_view()
                    }}
                </select>
                <button
                    id="start-upload-quiz"
                    on:click=move |_| {
                        let name = file.get_untracked();
                        // a file that has dropped out of the list cannot be started
                        if upload_names.with_untracked(|names| names.contains(&name)) {
                            uploads.dispatch(Action::StartQuiz(QuizRequest::upload(name)));
                        }
                    }
                >
                    "Start"
                </button>
            </div>
        </div>
    }
}

#[component]
fn Content() -> impl IntoView {
    let app = use_app();
    let header = app.ui.select(|state| (state.quiz.mode, state.quiz.topics.clone()));
    let questions = app.ui.select(|state| state.quiz.questions.clone());
    let score = app.ui.select(|state| state.quiz.score());

    view! {
        <div id="quiz-content">
            <button
                id=BACK_TO_QUIZ_SELECTION
                class="back-btn"
                on:click=move |_| app.fire(Trigger::Click(BACK_TO_QUIZ_SELECTION))
            >
                "← Back"
            </button>

            {move || {
                let (mode, topics) = header.get();
                let title = mode.map(|mode| mode.label()).unwrap_or("Quiz");
                view! {
                    <h2>{title}</h2>
                    {topics.map(|topics| view! { <p class="muted">"Topics: " {topics}</p> })}
                }
            }}

            <div id="quiz-questions">
                {move || {
                    questions.with(|listing| match listing {
                        Listing::Items(cards) => cards
                            .iter()
                            .cloned()
                            .enumerate()
                            .map(|(index, card)| view! { <Question index=index card=card /> })
                            .collect_view(),
                        other => listing_view(other, |_: QuestionCard| ()),
                    })
                }}
            </div>

            {move || {
                let (correct, total) = score.get();
                (total > 0).then(|| view! { <p id="quiz-score">{format!("Score: {correct}/{total}")}</p> })
            }}
        </div>
    }
}

/// One question; options lock once one is picked
#[component]
fn Question(index: usize, card: QuestionCard) -> impl IntoView {
    let app = use_app();
    let correct = card.correct_index();
    let chosen = card.chosen;
    let verdict = card.is_correct();

    view! {
        <div class="question-card">
            <p class="question">{format!("{}. {}", index + 1, card.prompt)}</p>
            <div class="options">
                {card
                    .options
                    .into_iter()
                    .enumerate()
                    .map(|(choice, option)| {
                        let app = app.clone();
                        let picked = chosen == Some(choice);
                        let reveal = chosen.is_some() && correct == Some(choice);
                        view! {
                            <button
                                class="option"
                                class:selected=picked
                                class:correct=reveal
                                class:wrong=picked && verdict == Some(false)
                                disabled=chosen.is_some()
                                on:click=move |_| app.dispatch(Action::AnswerQuestion { index, choice })
                            >
                                {option}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
