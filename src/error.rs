use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("`{0}` is not a valid repository slug, expected `owner/name`")]
    InvalidRepoSlug(String),

    #[error("cannot read workflow run event from {}: {reason}", .path.display())]
    Event { path: PathBuf, reason: String },

    #[error("no artifact named `{name}` attached to workflow run {run_id}")]
    ArtifactNotFound { name: String, run_id: u64 },

    #[error("artifact `{name}` (id {id}) has expired and can no longer be downloaded")]
    ArtifactExpired { name: String, id: u64 },

    #[error("cannot unpack artifact archive {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("archive entry `{0}` would be extracted outside of the working directory")]
    UnsafeArchiveEntry(String),

    #[error("expected file {} in the unpacked artifact", .0.display())]
    MissingBundleFile(PathBuf),

    #[error("`{raw}` is not a valid issue number")]
    InvalidIssueNumber { raw: String },

    #[error("comment body in {} is not valid UTF-8", .0.display())]
    InvalidBody(PathBuf),

    #[error("GitHub API responded with {status}: {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
