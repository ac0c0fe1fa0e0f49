pub mod reducer;
pub mod validators;

use tubesum_api::endpoints::{videos::Video, VideoId};
use tubesum_auth::UserIdentity;

/// Authenticated-view state machine.
///
/// `LoggedOut → Authenticating → LoggedIn`, and back to `LoggedOut` on logout
/// or when the session becomes unusable.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum AuthState {
    #[default]
    LoggedOut,
    Authenticating,
    LoggedIn(UserIdentity),
}

/// Represents loading state separate from data state
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loading,
    Loaded,
    Error(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }
}

/// Inline message shown to the user after an action
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryState {
    pub video_id: VideoId,
    pub title: Option<String>,
    pub prompt: String,
    pub summary: Option<String>,
    pub loading: LoadingState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentsState {
    pub video_id: VideoId,
    pub title: Option<String>,
    pub comments: Vec<String>,
    pub loading: LoadingState,
}

#[derive(Debug, Default)]
pub struct AppState {
    pub auth: AuthState,
    pub videos: Vec<Video>,
    pub videos_loading: LoadingState,
    pub comments: Option<CommentsState>,
    pub summary: Option<SummaryState>,
    pub notice: Option<Notice>,
    pub help_visible: bool,
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(&self) -> Option<&UserIdentity> {
        match &self.auth {
            AuthState::LoggedIn(identity) => Some(identity),
            _ => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.identity().is_some()
    }

    /// True while any request started by a command is still outstanding
    pub fn is_busy(&self) -> bool {
        self.auth == AuthState::Authenticating
            || self.videos_loading.is_loading()
            || self
                .comments
                .as_ref()
                .is_some_and(|c| c.loading.is_loading())
            || self
                .summary
                .as_ref()
                .is_some_and(|s| s.loading.is_loading())
    }

    /// Find a video in the current list by its 1-based position
    pub fn video_at(&self, position: usize) -> Option<&Video> {
        position.checked_sub(1).and_then(|i| self.videos.get(i))
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Drop everything tied to the previous session
    pub fn end_session(&mut self) {
        self.auth = AuthState::LoggedOut;
        self.videos.clear();
        self.videos_loading = LoadingState::NotStarted;
        self.comments = None;
        self.summary = None;
    }
}
