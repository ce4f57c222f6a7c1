use super::{
    artifacts::ArtifactPage,
    comments::{ApiErrorBody, NewComment},
    Artifact, CreatedComment, GithubApi, IssueNumber, RepoSlug,
};
use crate::{
    config::Token,
    error::{Error, Result},
};
use log::{debug, info, warn};
use reqwest::{
    blocking::{Client, RequestBuilder, Response},
    header::ACCEPT,
};
use std::fmt;

const USER_AGENT: &str = concat!("prcomment/", env!("CARGO_PKG_VERSION"));
const GITHUB_JSON: &str = "application/vnd.github+json";
const PER_PAGE: u64 = 100;

/// Blocking client for the handful of GitHub REST endpoints we call.
pub struct GithubClient {
    api_url: String,
    token: Token,
    client: Client,
}

impl fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubClient")
            .field("api_url", &self.api_url)
            .field("token", &self.token)
            .finish()
    }
}

impl GithubClient {
    pub fn new(api_url: &str, token: Token) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(GithubClient {
            api_url: api_url.trim_end_matches('/').to_owned(),
            token,
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token.0)
            .header(ACCEPT, GITHUB_JSON)
    }

    fn check(resp: Response) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let response_body = resp.text().unwrap_or_default();
        warn!(
            "Server responded with non-successful status code {}: {}",
            status, response_body
        );
        let message = serde_json::from_str::<ApiErrorBody>(&response_body)
            .map(|body| body.message)
            .unwrap_or(response_body);
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl GithubApi for GithubClient {
    fn list_run_artifacts(&self, repo: &RepoSlug, run_id: u64) -> Result<Vec<Artifact>> {
        let endpoint_url = self.endpoint(&format!(
            "/repos/{}/{}/actions/runs/{}/artifacts",
            repo.owner, repo.name, run_id
        ));
        let mut artifacts: Vec<Artifact> = Vec::new();
        let mut page = 1;

        loop {
            debug!("Listing artifacts using API endpoint: {} (page {})", &endpoint_url, page);
            let resp = self
                .authorized(self.client.get(&endpoint_url))
                .query(&[("per_page", PER_PAGE), ("page", page)])
                .send()?;
            let ArtifactPage {
                total_count,
                artifacts: page_artifacts,
            } = Self::check(resp)?.json()?;

            let fetched = page_artifacts.len();
            artifacts.extend(page_artifacts);
            if fetched == 0 || artifacts.len() as u64 >= total_count {
                break;
            }
            page += 1;
        }

        info!("Found {} artifacts in run {}", artifacts.len(), run_id);
        Ok(artifacts)
    }

    fn download_artifact(&self, artifact: &Artifact) -> Result<Vec<u8>> {
        info!(
            "Downloading artifact `{}` ({} bytes) from {}",
            artifact.name, artifact.size_in_bytes, &artifact.archive_download_url
        );
        let resp = self
            .authorized(self.client.get(&artifact.archive_download_url))
            .send()?;
        let bytes = Self::check(resp)?.bytes()?;
        Ok(bytes.to_vec())
    }

    fn create_issue_comment(
        &self,
        repo: &RepoSlug,
        number: IssueNumber,
        body: &str,
    ) -> Result<CreatedComment> {
        let endpoint_url = self.endpoint(&format!(
            "/repos/{}/{}/issues/{}/comments",
            repo.owner, repo.name, number.0
        ));
        info!("Publishing comment using API endpoint: {}", &endpoint_url);

        let resp = self
            .authorized(self.client.post(&endpoint_url))
            .json(&NewComment { body })
            .send()?;
        let comment = Self::check(resp)?.json()?;
        Ok(comment)
    }
}
