use super::VideoId;
use crate::macros::setter;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};

// Requests

#[derive(Debug, Clone, Serialize)]
pub struct ListComments {
    #[serde(skip)]
    video_id: VideoId,
}

impl ListComments {
    pub fn new(video_id: impl Into<VideoId>) -> Self {
        Self {
            video_id: video_id.into(),
        }
    }
}

impl Request for ListComments {
    type Data = ();
    type Response = CommentsResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        format!("/api/video/{}/comments", self.video_id.path_segment()).into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }
}

/// Ask the server to summarize a video's comments with a free-form prompt.
#[derive(Debug, Clone, Serialize)]
pub struct SummarizeComments {
    video_id: VideoId,
    prompt: String,
}

impl SummarizeComments {
    pub fn new(video_id: impl Into<VideoId>) -> Self {
        Self {
            video_id: video_id.into(),
            prompt: String::new(),
        }
    }

    setter!(prompt: String);
}

impl Request for SummarizeComments {
    type Data = Self;
    type Response = SummaryResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        "/api/summarize_comments".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentsResponse {
    #[serde(default)]
    pub comments: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}
