//! Plain-text rendering for the shell and one-shot commands.
//!
//! Every function here is read-only over state and returns the text to print.

use crate::events::DataEvent;
use crate::state::{AppState, CommentsState, LoadingState, Notice, SummaryState};
use tubesum_api::endpoints::videos::Video;
use tubesum_auth::UserIdentity;

pub const PROMPT: &str = "tubesum> ";

const HELP: &str = "\
Commands:
  login                     Sign in with Google in your browser
  logout                    Sign out and forget the stored session
  videos | refresh          List your channel's videos
  whoami                    Show the signed-in account
  comments <n|id>           Show comments for a video
  summarize <n|id> <prompt> Summarize a video's comments
  help                      Show this help
  quit                      Leave the shell

Videos can be chosen by their number in the last list or by video id.";

/// Text to print after a data event has been reduced into `state`
pub fn render_update(state: &AppState, event: &DataEvent) -> Option<String> {
    match event {
        DataEvent::SessionRestored { identity } => Some(format!(
            "Welcome back, {}.",
            render_identity_line(identity)
        )),
        DataEvent::NoStoredSession => {
            Some("Not logged in. Type `login` to sign in with Google.".to_string())
        }
        DataEvent::VideosLoaded { .. } if state.is_logged_in() => {
            Some(render_videos(&state.videos))
        }
        DataEvent::UserLoaded { .. } => state.identity().map(render_identity),
        DataEvent::CommentsLoaded { .. } => state
            .comments
            .as_ref()
            .filter(|c| c.loading == LoadingState::Loaded)
            .map(render_comments),
        DataEvent::SummaryLoaded { .. } => state
            .summary
            .as_ref()
            .filter(|s| s.summary.is_some())
            .map(render_summary),
        _ => None,
    }
}

pub fn render_identity_line(identity: &UserIdentity) -> String {
    format!("{} <{}>", identity.name, identity.email)
}

pub fn render_identity(identity: &UserIdentity) -> String {
    format!(
        "Name:    {}\nEmail:   {}\nChannel: {}",
        identity.name, identity.email, identity.channel_id
    )
}

pub fn render_videos(videos: &[Video]) -> String {
    if videos.is_empty() {
        return "No videos found.".to_string();
    }

    let width = videos.len().to_string().len();
    videos
        .iter()
        .enumerate()
        .map(|(i, video)| {
            format!(
                "{:>width$}. {}\n{:>width$}  {}",
                i + 1,
                video.title,
                "",
                video.watch_url(),
                width = width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn heading(video_id: &str, title: Option<&str>) -> String {
    match title {
        Some(title) => format!("{} ({})", title, video_id),
        None => video_id.to_string(),
    }
}

pub fn render_comments(view: &CommentsState) -> String {
    let mut out = format!(
        "Comments on {}:",
        heading(view.video_id.as_str(), view.title.as_deref())
    );
    if view.comments.is_empty() {
        out.push_str("\n  (no comments)");
    }
    for comment in &view.comments {
        out.push_str("\n  - ");
        out.push_str(comment);
    }
    out
}

pub fn render_summary(view: &SummaryState) -> String {
    format!(
        "Summary of comments on {}\nPrompt: {}\n\n{}",
        heading(view.video_id.as_str(), view.title.as_deref()),
        view.prompt,
        view.summary.as_deref().unwrap_or_default()
    )
}

pub fn render_help() -> &'static str {
    HELP
}

/// Errors are prefixed so they stand out in the scrollback
pub fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Info(message) => message.clone(),
        Notice::Error(message) => format!("Error: {}", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, title: &str) -> Video {
        Video {
            video_id: id.into(),
            title: title.to_string(),
            thumbnail_url: String::new(),
            description: None,
        }
    }

    #[test]
    fn test_render_empty_videos() {
        assert_eq!(render_videos(&[]), "No videos found.");
    }

    #[test]
    fn test_render_videos_numbers_from_one() {
        let text = render_videos(&[video("abc", "First"), video("def", "Second")]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "1. First");
        assert_eq!(lines[1].trim(), "https://www.youtube.com/watch?v=abc");
        assert_eq!(lines[2], "2. Second");
    }

    #[test]
    fn test_render_summary_includes_prompt() {
        let text = render_summary(&SummaryState {
            video_id: "abc".into(),
            title: Some("First".to_string()),
            prompt: "What do people like?".to_string(),
            summary: Some("They like the music.".to_string()),
            loading: LoadingState::Loaded,
        });
        assert!(text.starts_with("Summary of comments on First (abc)"));
        assert!(text.contains("Prompt: What do people like?"));
        assert!(text.ends_with("They like the music."));
    }

    #[test]
    fn test_render_notice() {
        assert_eq!(
            render_notice(&Notice::Error("boom".to_string())),
            "Error: boom"
        );
        assert_eq!(render_notice(&Notice::Info("ok".to_string())), "ok");
    }
}
