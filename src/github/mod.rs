pub mod artifacts;
pub mod client;
pub mod comments;

pub use artifacts::Artifact;
pub use client::GithubClient;
pub use comments::CreatedComment;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt, fs::File, io::BufReader, path::Path, str::FromStr};

/// `owner/name` of a repository.
#[derive(PartialEq, Eq, Clone, Debug, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoSlug {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let chunks: Vec<&str> = s.split('/').collect();
        match chunks.as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(RepoSlug {
                owner: (*owner).to_owned(),
                name: (*name).to_owned(),
            }),
            _ => Err(Error::InvalidRepoSlug(s.to_owned())),
        }
    }
}

impl TryFrom<String> for RepoSlug {
    type Error = Error;
    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<RepoSlug> for String {
    fn from(slug: RepoSlug) -> Self {
        slug.to_string()
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Issue or pull request number. Pull requests share the issue number space.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(transparent)]
pub struct IssueNumber(pub u64);

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The parts of a `workflow_run` webhook payload we care about.
#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
pub struct WorkflowRunEvent {
    pub action: Option<String>,
    pub workflow_run: WorkflowRun,
    pub repository: Repository,
}

#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
pub struct WorkflowRun {
    pub id: u64,
    pub name: Option<String>,
    /// Event that triggered the upstream run, e.g. `pull_request` or `push`.
    pub event: String,
    pub status: Option<String>,
    pub conclusion: Option<String>,
    pub html_url: Option<String>,
}

#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
pub struct Repository {
    pub full_name: RepoSlug,
}

impl WorkflowRunEvent {
    pub fn from_file<T: AsRef<Path>>(path: T) -> Result<WorkflowRunEvent> {
        let path = path.as_ref();
        let to_event_error = |reason: String| Error::Event {
            path: path.to_owned(),
            reason,
        };
        let file = File::open(path).map_err(|e| to_event_error(e.to_string()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| to_event_error(e.to_string()))
    }

    pub fn repo(&self) -> &RepoSlug {
        &self.repository.full_name
    }

    pub fn run_id(&self) -> u64 {
        self.workflow_run.id
    }

    pub fn trigger(&self) -> &str {
        &self.workflow_run.event
    }
}

/// The GitHub REST operations the comment poster relies on.
pub trait GithubApi {
    /// Every artifact attached to the run, across all result pages.
    fn list_run_artifacts(&self, repo: &RepoSlug, run_id: u64) -> Result<Vec<Artifact>>;

    /// Raw bytes of the artifact's zip archive.
    fn download_artifact(&self, artifact: &Artifact) -> Result<Vec<u8>>;

    fn create_issue_comment(
        &self,
        repo: &RepoSlug,
        number: IssueNumber,
        body: &str,
    ) -> Result<CreatedComment>;
}

impl<T: GithubApi + ?Sized> GithubApi for &T {
    fn list_run_artifacts(&self, repo: &RepoSlug, run_id: u64) -> Result<Vec<Artifact>> {
        (**self).list_run_artifacts(repo, run_id)
    }

    fn download_artifact(&self, artifact: &Artifact) -> Result<Vec<u8>> {
        (**self).download_artifact(artifact)
    }

    fn create_issue_comment(
        &self,
        repo: &RepoSlug,
        number: IssueNumber,
        body: &str,
    ) -> Result<CreatedComment> {
        (**self).create_issue_comment(repo, number, body)
    }
}
