use crate::{
    config::ArtifactConfig,
    error::{Error, Result},
    github::IssueNumber,
};
use serde::Serialize;
use std::{fs, io, path::Path};

/// What the upstream workflow asked us to post.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct CommentPayload {
    pub number: IssueNumber,
    pub body: String,
}

impl CommentPayload {
    /// Reads the number and body files of an unpacked bundle from `dir`.
    pub fn read_from<P: AsRef<Path>>(dir: P, layout: &ArtifactConfig) -> Result<Self> {
        let dir = dir.as_ref();
        let number_path = dir.join(&layout.number_file);
        let body_path = dir.join(&layout.body_file);

        let raw_number = read_bundle_file(&number_path)?;
        let raw_number = String::from_utf8(raw_number).map_err(|e| Error::InvalidIssueNumber {
            raw: String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })?;
        let number = parse_issue_number(&raw_number)?;

        let body = read_bundle_file(&body_path)?;
        let body = String::from_utf8(body).map_err(|_| Error::InvalidBody(body_path))?;

        Ok(CommentPayload { number, body })
    }
}

fn read_bundle_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::MissingBundleFile(path.to_owned()),
        _ => Error::Io(e),
    })
}

/// Parses the content of the number file.
///
/// Surrounding ASCII whitespace (such as the trailing newline `echo` leaves) is
/// ignored; anything but a non-zero run of ASCII digits is rejected.
pub fn parse_issue_number(raw: &str) -> Result<IssueNumber> {
    let invalid = || Error::InvalidIssueNumber {
        raw: raw.to_owned(),
    };
    let digits = raw.trim_matches(|c: char| c.is_ascii_whitespace());
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match digits.parse::<u64>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(n) => Ok(IssueNumber(n)),
    }
}
