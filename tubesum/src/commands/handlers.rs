use crate::events::AppCommand;
use crate::state::{validators, AppState};

/// Map one line of shell input to an AppCommand based on current state
/// Returns None for blank input
pub fn handle_input_line(line: &str, state: &AppState) -> Option<AppCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_lowercase().as_str() {
        "login" => AppCommand::Login,
        "logout" => AppCommand::Logout,
        "videos" | "refresh" | "ls" => AppCommand::LoadVideos,
        "whoami" | "me" => AppCommand::LoadUser,
        "help" | "?" => AppCommand::ShowHelp,
        "quit" | "exit" | "q" => AppCommand::Quit,

        "comments" => match validators::resolve_video(rest, &state.videos) {
            Ok((video_id, title)) => AppCommand::LoadComments { video_id, title },
            Err(e) => AppCommand::ReportInputError(e),
        },

        "summarize" | "sum" => {
            let (selection, prompt) = match rest.split_once(char::is_whitespace) {
                Some((selection, prompt)) => (selection, prompt),
                None => (rest, ""),
            };
            match validators::resolve_video(selection, &state.videos) {
                Ok((video_id, title)) => AppCommand::Summarize {
                    video_id,
                    title,
                    prompt: prompt.to_string(),
                },
                Err(e) => AppCommand::ReportInputError(e),
            }
        }

        other => AppCommand::ReportInputError(format!(
            "Unknown command `{}`. Type `help` for a list of commands",
            other
        )),
    };

    Some(command)
}
