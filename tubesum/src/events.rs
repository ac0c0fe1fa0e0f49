use tubesum_api::endpoints::{videos::Video, VideoId};
use tubesum_auth::UserIdentity;

/// Commands to execute (user actions → background tasks)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    // Session
    RestoreSession {
        load_videos: bool,
    },
    Login,
    Logout,

    // Data loading
    LoadVideos,
    LoadUser,
    LoadComments {
        video_id: VideoId,
        title: Option<String>,
    },
    Summarize {
        video_id: VideoId,
        title: Option<String>,
        prompt: String,
    },

    // View
    ShowHelp,
    ReportInputError(String),

    // System
    Quit,
}

/// Events from background tasks (responses to commands)
#[derive(Debug, Clone)]
pub enum DataEvent {
    // Session lifecycle
    SessionRestored {
        identity: UserIdentity,
    },
    NoStoredSession,
    LoginCompleted {
        identity: UserIdentity,
    },
    LoginFailed {
        error: String,
    },
    LoggedOut,
    /// The session cannot be used any more; the user has to log in again.
    SessionEnded {
        message: String,
    },

    // API results
    VideosLoaded {
        videos: Vec<Video>,
    },
    VideosLoadFailed {
        error: String,
    },
    UserLoaded {
        identity: UserIdentity,
    },
    CommentsLoaded {
        video_id: VideoId,
        comments: Vec<String>,
    },
    SummaryLoaded {
        video_id: VideoId,
        summary: String,
    },

    // Errors
    LoadError {
        error: String,
    },
}
