mod models;

pub use models::{SessionToken, UserIdentity};
