use anyhow::{Context, Result};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tubesum_auth::{
    AuthenticatedClient, FileSessionStore, MemorySessionStore, ServerAuthClient, SessionStore,
    Settings,
};

use crate::app_core::{AppCore, DataEventHandler};
use crate::background::{data_loader::DataLoader, BackgroundTaskManager};
use crate::cli::Command;
use crate::commands::executor;
use crate::events::{AppCommand, DataEvent};
use crate::state::{validators, AppState, Notice};
use crate::ui;

type Store = Arc<dyn SessionStore>;

/// Command handler backed by the real API client and tokio tasks
pub struct TaskHandler<S> {
    task_manager: BackgroundTaskManager,
    data_loader: DataLoader<S>,
}

impl<S: SessionStore + 'static> TaskHandler<S> {
    pub fn new(data_loader: DataLoader<S>) -> Self {
        Self {
            task_manager: BackgroundTaskManager::new(),
            data_loader,
        }
    }

    pub async fn wait_idle(&mut self) {
        self.task_manager.wait_idle().await;
    }
}

impl<S: SessionStore + 'static> DataEventHandler for TaskHandler<S> {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState) {
        executor::execute_command(command, state, &mut self.task_manager, &self.data_loader);
    }
}

pub struct App {
    settings: Settings,
    ephemeral: bool,
}

impl App {
    pub fn new(settings: Settings, ephemeral: bool) -> Self {
        Self {
            settings,
            ephemeral,
        }
    }

    fn session_store(&self) -> Result<Store> {
        if self.ephemeral {
            tracing::info!("Using in-memory session store");
            return Ok(Arc::new(MemorySessionStore::new()));
        }
        let store = FileSessionStore::new().context("Failed to open session storage")?;
        Ok(Arc::new(store))
    }

    pub async fn run(&self, command: Option<Command>) -> Result<()> {
        tracing::info!(api_url = %self.settings.api_url, "tubesum starting");

        let auth_client =
            ServerAuthClient::with_timeout(&self.settings.api_url, self.settings.request_timeout())?;
        let client = Arc::new(
            AuthenticatedClient::new(self.session_store()?, auth_client)
                .with_request_timeout(self.settings.request_timeout()),
        );

        let (data_tx, mut data_rx) = unbounded_channel();
        let data_loader = DataLoader::new(client, Arc::new(self.settings.clone()), data_tx);
        let mut core = AppCore::new(TaskHandler::new(data_loader));

        match command {
            None | Some(Command::Shell) => run_shell(&mut core, &mut data_rx).await,
            Some(command) => run_once(&mut core, &mut data_rx, command).await,
        }
    }
}

fn show_prompt() {
    print!("{}", ui::PROMPT);
    // A failed flush only delays the prompt
    let _ = std::io::stdout().flush();
}

/// Print the pending notice and help, if any
fn print_pending(core: &mut AppCore<TaskHandler<Store>>) {
    if core.take_help() {
        println!("{}", ui::render_help());
    }
    if let Some(notice) = core.take_notice() {
        match notice {
            Notice::Info(_) => println!("{}", ui::render_notice(&notice)),
            Notice::Error(_) => eprintln!("{}", ui::render_notice(&notice)),
        }
    }
}

fn apply_event(core: &mut AppCore<TaskHandler<Store>>, event: DataEvent) -> Option<String> {
    tracing::debug!(?event, "Data event");
    core.handle_data_event(event.clone());
    ui::render_update(core.state(), &event)
}

async fn run_shell(
    core: &mut AppCore<TaskHandler<Store>>,
    data_rx: &mut UnboundedReceiver<DataEvent>,
) -> Result<()> {
    println!("tubesum: YouTube comment summaries. Type `help` for commands.");
    core.handle_command(AppCommand::RestoreSession { load_videos: true });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    tracing::info!("Entering shell loop");
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    // EOF
                    println!();
                    break;
                };
                core.handle_input_line(&line);
                print_pending(core);
                if core.should_quit() {
                    break;
                }
                if !core.state().is_busy() {
                    show_prompt();
                }
            }
            Some(event) = data_rx.recv() => {
                if let Some(text) = apply_event(core, event) {
                    println!("{}", text);
                }
                print_pending(core);
                if !core.state().is_busy() {
                    show_prompt();
                }
            }
        }
    }

    tracing::info!("Leaving shell");
    Ok(())
}

/// Wait for outstanding work and apply its events.
///
/// Returns the first error notice raised along the way.
async fn settle(
    core: &mut AppCore<TaskHandler<Store>>,
    data_rx: &mut UnboundedReceiver<DataEvent>,
    render: bool,
) -> Option<String> {
    core.handler_mut().wait_idle().await;

    let mut failure = None;
    while let Ok(event) = data_rx.try_recv() {
        let text = apply_event(core, event);
        if let (true, Some(text)) = (render, text) {
            println!("{}", text);
        }
        match core.take_notice() {
            Some(Notice::Error(message)) if failure.is_none() => failure = Some(message),
            Some(notice @ Notice::Info(_)) if render => println!("{}", ui::render_notice(&notice)),
            _ => {}
        }
    }
    failure
}

async fn run_once(
    core: &mut AppCore<TaskHandler<Store>>,
    data_rx: &mut UnboundedReceiver<DataEvent>,
    command: Command,
) -> Result<()> {
    core.handle_command(AppCommand::RestoreSession { load_videos: false });
    if let Some(message) = settle(core, data_rx, false).await {
        anyhow::bail!(message);
    }

    // List positions refer to the current video list
    let by_position = command
        .video_selection()
        .is_some_and(|video| video.trim().parse::<usize>().is_ok());
    if by_position && core.state().is_logged_in() {
        core.handle_command(AppCommand::LoadVideos);
        if let Some(message) = settle(core, data_rx, false).await {
            anyhow::bail!(message);
        }
    }

    let command = match command {
        Command::Shell => return Ok(()),
        Command::Login => AppCommand::Login,
        Command::Logout => AppCommand::Logout,
        Command::Whoami => AppCommand::LoadUser,
        Command::Videos => AppCommand::LoadVideos,
        Command::Comments { video } => {
            match validators::resolve_video(&video, &core.state().videos) {
                Ok((video_id, title)) => AppCommand::LoadComments { video_id, title },
                Err(e) => AppCommand::ReportInputError(e),
            }
        }
        Command::Summarize { video, prompt } => {
            match validators::resolve_video(&video, &core.state().videos) {
                Ok((video_id, title)) => AppCommand::Summarize {
                    video_id,
                    title,
                    prompt: prompt.join(" "),
                },
                Err(e) => AppCommand::ReportInputError(e),
            }
        }
    };

    core.handle_command(command);
    match core.take_notice() {
        Some(Notice::Error(message)) => anyhow::bail!(message),
        Some(notice) => println!("{}", ui::render_notice(&notice)),
        None => {}
    }

    match settle(core, data_rx, true).await {
        Some(message) => anyhow::bail!(message),
        None => Ok(()),
    }
}
