//! Aide CLI
//!
//! Terminal client for the assistant backend. Every subcommand drives the
//! same controller the browser shell uses and prints the resulting view.
//!
//! # Configuration
//!
//! Read from `--config`, `~/.config/aide/config.toml` or `./config.toml`.
//! Environment variables:
//! - `AIDE_BACKEND_URL`: Backend base URL (default: http://127.0.0.1:5000)
//! - `AIDE_REQUEST_TIMEOUT_SECS`: Per-request timeout (default: none)
//! - `AIDE_USER_NAME`: Name in the dashboard greeting (default: User)
//! - `AIDE_LOG_LEVEL`, `AIDE_LOG_FORMAT`: Logging (default: warn, pretty)
//! - `RUST_LOG`: Overrides the log filter entirely

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use aide::api::{FileUpload, HttpBackend, QuizMode, QuizRequest, SessionId};
use aide::config::{generate_default_config, Config, Discovered, LoggingConfig};
use aide::controller::{Action, Controller};
use aide::terminal::{self, TerminalDialogs};
use aide::view::{Listing, StateCell, SystemClock, UiState};
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type CliController = Controller<RefCell<UiState>, HttpBackend, TerminalDialogs, SystemClock>;

#[derive(Parser)]
#[command(name = "aide")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Chat, calendar tasks, dashboard and quizzes from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/aide/config.toml, then ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides the config file
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a chat message
    Chat {
        /// Message text
        #[arg(required = true)]
        message: Vec<String>,
        /// Continue an existing session
        #[arg(short, long)]
        session: Option<String>,
    },

    /// List chat sessions
    Sessions,

    /// Show the messages of a session
    History {
        /// Session ID
        id: String,
    },

    /// Delete a chat session
    DeleteSession {
        /// Session ID
        id: String,
    },

    /// Show upcoming events and today's tasks
    Events,

    /// Toggle completion of one of today's events
    Toggle {
        /// Event ID
        event_id: String,
        /// Current summary, completion marker included
        summary: String,
    },

    /// Delete a calendar event
    DeleteEvent {
        /// Event ID
        event_id: String,
        /// Summary shown in the confirmation
        summary: String,
    },

    /// List manual tasks
    Tasks,

    /// Add a manual task
    AddTask {
        /// Task text
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Show the dashboard
    Dashboard,

    /// Upload a document
    Upload {
        /// Path to the file
        path: PathBuf,
    },

    /// List uploaded documents
    Uploads,

    /// Generate and take a quiz
    Quiz {
        /// recall, interview or upload
        mode: QuizMode,
        /// Job role for interview quizzes
        #[arg(long)]
        job_role: Option<String>,
        /// Uploaded file name for upload quizzes
        #[arg(long)]
        file: Option<String>,
    },

    /// Generate default config file
    InitConfig {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::InitConfig { output } = &cli.command {
        return init_config(output.as_deref());
    }

    let discovered = match &cli.config {
        Some(path) => Discovered {
            config: Config::load_with_env(path)?,
            source: Some(path.clone()),
            skipped: Vec::new(),
        },
        None => Config::load_default(),
    };
    init_tracing(&discovered.config.logging);
    discovered.report();

    let mut config = discovered.config;
    if let Some(url) = &cli.backend_url {
        config.backend.url = url.clone();
    }
    tracing::debug!(backend = %config.backend.url, "starting");

    let backend = HttpBackend::new(&config.backend).context("cannot build HTTP client")?;
    let controller = Controller::new(
        RefCell::new(UiState::new(config.ui.user_name.clone())),
        backend,
        TerminalDialogs { assume_yes: cli.yes },
        SystemClock,
    );

    run(&controller, cli.command).await
}

async fn run(controller: &CliController, command: Commands) -> anyhow::Result<()> {
    let state = controller.state();

    match command {
        Commands::Chat { message, session } => {
            if let Some(id) = session {
                controller.dispatch(Action::LoadSession(SessionId::new(id))).await;
            }
            let before = state.read(|s| s.transcript.len());
            state.update(|s| s.composer = message.join(" "));
            controller.dispatch(Action::SubmitChat).await;

            state.read(|s| {
                println!("{}", terminal::render_entries(&s.transcript.entries()[before..]));
                if let Some(id) = &s.current_session {
                    println!("\n(session {})", id);
                }
            });
        }

        Commands::Sessions => {
            controller.dispatch(Action::LoadSessions).await;
            println!("{}", state.read(terminal::render_sessions));
        }

        Commands::History { id } => {
            controller.dispatch(Action::LoadSession(SessionId::new(id))).await;
            println!("{}", state.read(terminal::render_transcript));
        }

        Commands::DeleteSession { id } => {
            controller.dispatch(Action::DeleteSession(SessionId::new(id))).await;
            println!("{}", state.read(terminal::render_sessions));
        }

        Commands::Events => {
            controller.dispatch(Action::FetchEvents).await;
            println!("{}", state.read(terminal::render_events));
        }

        Commands::Toggle { event_id, summary } => {
            controller
                .dispatch(Action::ToggleEventCompletion { event_id, summary })
                .await;
            if !state.read(|s| s.events.today.is_loading()) {
                println!("{}", state.read(terminal::render_events));
            }
        }

        Commands::DeleteEvent { event_id, summary } => {
            controller
                .dispatch(Action::DeleteCalendarEvent { event_id, summary })
                .await;
            if !state.read(|s| s.events.today.is_loading()) {
                println!("{}", state.read(terminal::render_events));
            }
        }

        Commands::Tasks => {
            controller.dispatch(Action::LoadManualTasks).await;
            println!("{}", state.read(terminal::render_manual_tasks));
        }

        Commands::AddTask { text } => {
            state.update(|s| s.task_input = text.join(" "));
            controller.dispatch(Action::AddManualTask).await;
            if !state.read(|s| s.manual_tasks.is_loading()) {
                println!("{}", state.read(terminal::render_manual_tasks));
            }
        }

        Commands::Dashboard => {
            controller.dispatch(Action::SwitchView("dashboard".to_string())).await;
            match state.read(|s| s.dashboard.clone()) {
                Some(view) => println!("{}", terminal::render_dashboard(&view)),
                None => bail!("dashboard unavailable, see the log for details"),
            }
        }

        Commands::Upload { path } => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("cannot read {:?}", path))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .context("upload path has no file name")?;
            controller
                .dispatch(Action::UploadFile(FileUpload::new(name, bytes)))
                .await;
            if let Some(notice) = state.read(|s| s.transcript.messages().last().map(|m| m.text())) {
                println!("{}", notice);
            }
        }

        Commands::Uploads => {
            controller.dispatch(Action::LoadUploads).await;
            let uploads = state.read(|s| s.quiz.uploads.clone());
            if uploads.is_empty() {
                println!("No uploaded files.");
            }
            for name in uploads {
                println!("{}", name);
            }
        }

        Commands::Quiz { mode, job_role, file } => {
            let request = match mode {
                QuizMode::Recall => QuizRequest::recall(),
                QuizMode::Interview => {
                    QuizRequest::interview(job_role.context("--job-role is required for interview quizzes")?)
                }
                QuizMode::Upload => {
                    QuizRequest::upload(file.context("--file is required for upload quizzes")?)
                }
            };
            controller.dispatch(Action::SwitchView("quizzes".to_string())).await;
            controller.dispatch(Action::StartQuiz(request)).await;
            take_quiz(controller).await?;
            println!("{}", state.read(|s| terminal::render_quiz(&s.quiz)));
        }

        Commands::InitConfig { output } => init_config(output.as_deref())?,
    }

    Ok(())
}

fn init_config(output: Option<&Path>) -> anyhow::Result<()> {
    let config = generate_default_config();
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", config),
    }
    Ok(())
}

/// Prompt for each question's answer on stdin
async fn take_quiz(controller: &CliController) -> anyhow::Result<()> {
    let cards = controller.state().read(|s| match &s.quiz.questions {
        Listing::Items(cards) => cards.clone(),
        _ => Vec::new(),
    });

    let stdin = std::io::stdin();
    for (index, card) in cards.iter().enumerate() {
        println!("\n{}. {}", index + 1, card.prompt);
        for (j, option) in card.options.iter().enumerate() {
            println!("   {}) {}", (b'A' + (j as u8 % 26)) as char, option);
        }
        print!("Answer (Enter to skip): ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let choice = match line.trim().chars().next() {
            Some(c) if c.is_ascii_alphabetic() => (c.to_ascii_uppercase() as u8 - b'A') as usize,
            _ => continue,
        };
        controller
            .dispatch(Action::AnswerQuestion { index, choice })
            .await;
    }
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("aide={}", logging.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
