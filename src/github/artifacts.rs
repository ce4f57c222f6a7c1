use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Debug, PartialEq, Clone, Deserialize, Serialize)]
pub struct Artifact {
    pub id: u64,
    pub name: String,
    pub size_in_bytes: u64,
    pub archive_download_url: String,
    #[serde(default)]
    pub expired: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// One page of `GET /repos/{owner}/{repo}/actions/runs/{run_id}/artifacts`.
#[derive(Debug, PartialEq, Deserialize)]
pub(crate) struct ArtifactPage {
    pub total_count: u64,
    pub artifacts: Vec<Artifact>,
}

/// Picks the artifact called `name` out of a run's artifacts.
///
/// When several artifacts share the name the first one listed wins.
pub fn select_artifact<'a>(
    artifacts: &'a [Artifact],
    name: &str,
    run_id: u64,
) -> Result<&'a Artifact> {
    let mut matching = artifacts.iter().filter(|a| a.name == name);
    let artifact = matching.next().ok_or_else(|| Error::ArtifactNotFound {
        name: name.to_owned(),
        run_id,
    })?;

    let others: Vec<u64> = matching.map(|a| a.id).collect();
    if !others.is_empty() {
        warn!(
            "{} more artifacts named `{}` found in run {} (ids {:?}), using artifact {}",
            others.len(),
            name,
            run_id,
            others,
            artifact.id
        );
    }

    if artifact.expired {
        return Err(Error::ArtifactExpired {
            name: artifact.name.clone(),
            id: artifact.id,
        });
    }
    Ok(artifact)
}

/// Writes a downloaded archive as `<work_dir>/<artifact name>.zip`.
pub fn save_archive<P: AsRef<Path>>(
    work_dir: P,
    artifact: &Artifact,
    bytes: &[u8],
) -> Result<PathBuf> {
    let work_dir = work_dir.as_ref();
    fs::create_dir_all(work_dir)?;
    let path = work_dir.join(format!("{}.zip", artifact.name));
    debug!("writing {} bytes to {}", bytes.len(), path.display());
    fs::write(&path, bytes)?;
    Ok(path)
}
