use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Request, RequestData};

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct GetUser;

impl GetUser {
    pub fn new() -> Self {
        Self
    }
}

impl Request for GetUser {
    type Data = ();
    type Response = UserResponse;

    fn endpoint(&self) -> Cow<'_, str> {
        "/api/user".into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }
}

// Responses

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub name: String,
    pub email: String,
    pub channel_id: String,
}
