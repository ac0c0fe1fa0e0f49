use tubesum_api::endpoints::{videos::Video, VideoId};

/// Resolve a video reference typed by the user.
///
/// A number selects from the current list (1-based); anything else is taken
/// as a video id.
pub fn resolve_video(
    selection: &str,
    videos: &[Video],
) -> Result<(VideoId, Option<String>), String> {
    let selection = selection.trim();
    if selection.is_empty() {
        return Err("Choose a video by list number or id".to_string());
    }

    if let Ok(position) = selection.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|i| videos.get(i))
            .map(|video| (video.video_id.clone(), Some(video.title.clone())))
            .ok_or_else(|| match videos.len() {
                0 => "No videos loaded yet. Type `videos` first".to_string(),
                n => format!("No video #{}; choose 1-{}", position, n),
            });
    }

    let title = videos
        .iter()
        .find(|video| video.video_id == selection)
        .map(|video| video.title.clone());
    Ok((VideoId::from(selection), title))
}

/// Validate a summary prompt, returning it trimmed
pub fn validate_prompt(prompt: &str) -> Result<String, String> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err("Prompt must not be empty".to_string());
    }
    Ok(prompt.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn videos() -> Vec<Video> {
        vec![
            Video {
                video_id: "abc".into(),
                title: "First".to_string(),
                thumbnail_url: String::new(),
                description: None,
            },
            Video {
                video_id: "def".into(),
                title: "Second".to_string(),
                thumbnail_url: String::new(),
                description: None,
            },
        ]
    }

    #[test]
    fn test_resolve_by_position() {
        let (id, title) = resolve_video("2", &videos()).unwrap();
        assert_eq!(id, "def");
        assert_eq!(title.as_deref(), Some("Second"));
    }

    #[test]
    fn test_resolve_out_of_range() {
        assert_eq!(
            resolve_video("3", &videos()).unwrap_err(),
            "No video #3; choose 1-2"
        );
        assert!(resolve_video("0", &videos()).is_err());
        assert!(resolve_video("1", &[]).unwrap_err().contains("videos"));
    }

    #[test]
    fn test_resolve_by_id() {
        let (id, title) = resolve_video("abc", &videos()).unwrap();
        assert_eq!(id, "abc");
        assert_eq!(title.as_deref(), Some("First"));

        let (id, title) = resolve_video("zzz", &videos()).unwrap();
        assert_eq!(id, "zzz");
        assert!(title.is_none());
    }

    #[test]
    fn test_resolve_empty() {
        assert!(resolve_video("  ", &videos()).is_err());
    }

    #[test]
    fn test_validate_prompt() {
        assert_eq!(validate_prompt("  why?  ").unwrap(), "why?");
        assert!(validate_prompt("   ").is_err());
    }
}
