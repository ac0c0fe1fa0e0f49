use super::{AppState, AuthState, LoadingState, Notice};
use crate::events::DataEvent;

/// Pure state transition function for data events
pub fn reduce_data_event(state: &mut AppState, event: DataEvent) {
    match event {
        // Stored session found at startup
        DataEvent::SessionRestored { identity } => {
            state.auth = AuthState::LoggedIn(identity);
        }

        DataEvent::NoStoredSession => {
            if state.auth != AuthState::Authenticating {
                state.auth = AuthState::LoggedOut;
            }
        }

        DataEvent::LoginCompleted { identity } => {
            state.notice = Some(Notice::Info(format!("Logged in as {}.", identity.name)));
            state.auth = AuthState::LoggedIn(identity);
        }

        DataEvent::LoginFailed { error } => {
            if state.auth == AuthState::Authenticating {
                state.auth = AuthState::LoggedOut;
            }
            state.notice = Some(Notice::Error(format!("Login failed: {}", error)));
        }

        DataEvent::LoggedOut => {
            state.end_session();
            state.notice = Some(Notice::Info("Logged out.".to_string()));
        }

        DataEvent::SessionEnded { message } => {
            state.end_session();
            state.notice = Some(Notice::Error(message));
        }

        DataEvent::VideosLoaded { videos } => {
            // A response that lands after logout must not repopulate the view
            if state.is_logged_in() {
                state.videos = videos;
                state.videos_loading = LoadingState::Loaded;
            }
        }

        DataEvent::VideosLoadFailed { error } => {
            state.videos_loading = LoadingState::Error(error.clone());
            state.notice = Some(Notice::Error(format!("Failed to fetch videos: {}", error)));
        }

        DataEvent::UserLoaded { identity } => {
            if state.is_logged_in() {
                state.auth = AuthState::LoggedIn(identity);
            }
        }

        DataEvent::CommentsLoaded { video_id, comments } => {
            if let Some(view) = state.comments.as_mut().filter(|c| c.video_id == video_id) {
                view.comments = comments;
                view.loading = LoadingState::Loaded;
            }
        }

        DataEvent::SummaryLoaded { video_id, summary } => {
            if let Some(view) = state.summary.as_mut().filter(|s| s.video_id == video_id) {
                view.summary = Some(summary);
                view.loading = LoadingState::Loaded;
            }
        }

        DataEvent::LoadError { error } => {
            if let Some(view) = state.comments.as_mut().filter(|c| c.loading.is_loading()) {
                view.loading = LoadingState::Error(error.clone());
            }
            if let Some(view) = state.summary.as_mut().filter(|s| s.loading.is_loading()) {
                view.loading = LoadingState::Error(error.clone());
            }
            state.notice = Some(Notice::Error(error));
        }
    }
}
