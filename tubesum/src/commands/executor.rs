use crate::background::{data_loader::DataLoader, BackgroundTaskManager, TaskKind};
use crate::events::AppCommand;
use crate::state::*;
use tubesum_api::endpoints::VideoId;
use tubesum_auth::SessionStore;

const LOGIN_HINT: &str = "Not logged in. Type `login` to sign in with Google.";

/// Background work a command needs after its state changes are applied
#[derive(Debug, Clone, PartialEq)]
enum Task {
    RestoreSession { load_videos: bool },
    Login,
    Logout,
    LoadVideos,
    LoadUser,
    LoadComments { video_id: VideoId },
    Summarize { video_id: VideoId, prompt: String },
}

/// Execute a command by updating state and spawning background tasks
pub fn execute_command<S: SessionStore + 'static>(
    command: AppCommand,
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader<S>,
) {
    let Some(task) = apply_command(command, state) else {
        return;
    };

    let loader = data_loader.clone();
    match task {
        Task::RestoreSession { load_videos } => {
            task_manager.spawn_task(TaskKind::Session, async move {
                loader.restore_session(load_videos).await;
            });
        }
        Task::Login => {
            task_manager.spawn_task(TaskKind::Session, async move {
                loader.login().await;
            });
        }
        Task::Logout => {
            task_manager.spawn_task(TaskKind::Session, async move {
                loader.logout().await;
            });
        }
        Task::LoadVideos => {
            task_manager.spawn_task(TaskKind::Videos, async move {
                loader.load_videos().await;
            });
        }
        Task::LoadUser => {
            task_manager.spawn_task(TaskKind::User, async move {
                loader.load_user().await;
            });
        }
        Task::LoadComments { video_id } => {
            task_manager.spawn_task(TaskKind::Comments, async move {
                loader.load_comments(video_id).await;
            });
        }
        Task::Summarize { video_id, prompt } => {
            task_manager.spawn_task(TaskKind::Summary, async move {
                loader.summarize(video_id, prompt).await;
            });
        }
    }
}

/// Execute a command without spawning tasks (state changes only)
pub fn execute_command_sync(command: AppCommand, state: &mut AppState) {
    let _ = apply_command(command, state);
}

fn require_login(state: &mut AppState) -> bool {
    if state.is_logged_in() {
        return true;
    }
    state.notice = Some(Notice::Error(LOGIN_HINT.to_string()));
    false
}

fn apply_command(command: AppCommand, state: &mut AppState) -> Option<Task> {
    match command {
        AppCommand::RestoreSession { load_videos } => Some(Task::RestoreSession { load_videos }),

        AppCommand::Login => match &state.auth {
            AuthState::LoggedIn(identity) => {
                state.notice = Some(Notice::Info(format!(
                    "Already logged in as {}. Type `logout` first to switch accounts.",
                    identity.name
                )));
                None
            }
            AuthState::Authenticating => {
                state.notice = Some(Notice::Info("Login already in progress.".to_string()));
                None
            }
            AuthState::LoggedOut => {
                state.auth = AuthState::Authenticating;
                state.notice = None;
                Some(Task::Login)
            }
        },

        // Clears whatever is stored, even a partial session
        AppCommand::Logout => Some(Task::Logout),

        AppCommand::LoadVideos => {
            if !require_login(state) {
                return None;
            }
            state.videos_loading = LoadingState::Loading;
            Some(Task::LoadVideos)
        }

        AppCommand::LoadUser => {
            if !require_login(state) {
                return None;
            }
            Some(Task::LoadUser)
        }

        AppCommand::LoadComments { video_id, title } => {
            if !require_login(state) {
                return None;
            }
            state.comments = Some(CommentsState {
                video_id: video_id.clone(),
                title,
                comments: Vec::new(),
                loading: LoadingState::Loading,
            });
            Some(Task::LoadComments { video_id })
        }

        AppCommand::Summarize {
            video_id,
            title,
            prompt,
        } => {
            if !require_login(state) {
                return None;
            }
            let prompt = match validators::validate_prompt(&prompt) {
                Ok(prompt) => prompt,
                Err(e) => {
                    state.notice = Some(Notice::Error(e));
                    return None;
                }
            };
            state.summary = Some(SummaryState {
                video_id: video_id.clone(),
                title,
                prompt: prompt.clone(),
                summary: None,
                loading: LoadingState::Loading,
            });
            Some(Task::Summarize { video_id, prompt })
        }

        AppCommand::ShowHelp => {
            state.help_visible = true;
            None
        }

        AppCommand::ReportInputError(message) => {
            state.notice = Some(Notice::Error(message));
            None
        }

        AppCommand::Quit => {
            state.should_quit = true;
            None
        }
    }
}
