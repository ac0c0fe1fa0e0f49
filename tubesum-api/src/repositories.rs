use crate::endpoints::{
    VideoId,
    comments::{ListComments, SummarizeComments},
    users::GetUser,
    videos::ListVideos,
};

#[derive(Default)]
pub struct CommentRepository {
    video_id: VideoId,
}

impl CommentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_video(mut self, video_id: impl Into<VideoId>) -> Self {
        self.video_id = video_id.into();
        self
    }

    pub fn list(&self) -> ListComments {
        ListComments::new(self.video_id.clone())
    }

    pub fn summarize(&self, prompt: impl Into<String>) -> SummarizeComments {
        SummarizeComments::new(self.video_id.clone()).prompt(prompt)
    }
}

pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn me(&self) -> GetUser {
        GetUser::new()
    }
}

pub struct VideoRepository;

impl VideoRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListVideos {
        ListVideos::new()
    }
}
