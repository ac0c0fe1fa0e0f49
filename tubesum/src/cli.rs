use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tubesum")]
#[command(about = "Summarize what viewers say in your YouTube comments")]
#[command(version)]
pub struct Cli {
    /// Base URL of the summarizer API (overrides config and TUBESUM__API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Keep the session in memory only; nothing is read from or written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Mirror warnings and errors to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Interactive shell (default)
    Shell,
    /// Sign in with Google in the browser
    Login,
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// List your channel's videos
    Videos,
    /// Show comments for a video
    Comments {
        /// Position in the video list (from 1) or a video id
        video: String,
    },
    /// Summarize a video's comments
    Summarize {
        /// Position in the video list (from 1) or a video id
        video: String,
        /// What to ask about the comments
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        prompt: Vec<String>,
    },
}

impl Command {
    /// The video selection, for commands that take one
    pub fn video_selection(&self) -> Option<&str> {
        match self {
            Command::Comments { video } | Command::Summarize { video, .. } => Some(video),
            _ => None,
        }
    }
}
