use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize)]
pub(crate) struct NewComment<'a> {
    pub body: &'a str,
}

/// Comment record returned by `POST /repos/{owner}/{repo}/issues/{number}/comments`.
#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
pub struct CreatedComment {
    pub id: u64,
    pub html_url: String,
    #[serde(default)]
    pub body: String,
}

/// Error payload GitHub attaches to non-success responses.
#[derive(Debug, PartialEq, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
    pub documentation_url: Option<String>,
}
