use super::VideoId;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Request, RequestData};

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

// Common

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    #[serde(rename = "videoId")]
    pub video_id: VideoId,
    pub title: String,
    #[serde(rename = "thumbnail", default)]
    pub thumbnail_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Video {
    pub fn watch_url(&self) -> String {
        format!("{}{}", WATCH_URL, self.video_id)
    }
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct ListVideos;

impl ListVideos {
    pub fn new() -> Self {
        Self
    }
}

impl Request for ListVideos {
    type Data = ();
    type Response = VideosResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/api/videos".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideosResponse {
    #[serde(default)]
    pub videos: Vec<Video>,
}
