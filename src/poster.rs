use crate::{
    archive,
    bundle::CommentPayload,
    config::Config,
    error::Result,
    github::{artifacts, CreatedComment, GithubApi, WorkflowRunEvent},
};
use log::info;
use serde::Serialize;

#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The upstream run was not triggered by an accepted event; nothing was done.
    Skipped { trigger: String, run_id: u64 },
    Posted {
        payload: CommentPayload,
        comment: CreatedComment,
    },
    /// Everything up to the comment creation ran, the comment itself was not posted.
    DryRun { payload: CommentPayload },
}

/// Turns a completed workflow run into a pull request comment.
///
/// `Idle -> Downloading -> Unpacking -> Posting -> Done`, or straight to
/// `Done` when the trigger guard rejects the run.
pub struct CommentPoster<'c> {
    config: &'c Config,
    dry_run: bool,
}

impl<'c> CommentPoster<'c> {
    pub fn new(config: &'c Config) -> Self {
        CommentPoster {
            config,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// `connect` is only called once the trigger guard passes, so skipped runs
    /// never need credentials.
    pub fn run<A, F>(&self, event: &WorkflowRunEvent, connect: F) -> Result<Outcome>
    where
        A: GithubApi,
        F: FnOnce() -> Result<A>,
    {
        let run_id = event.run_id();
        let trigger = event.trigger();
        if !self.config.trigger.accepts(trigger) {
            info!(
                "Run {} was triggered by `{}`, not commenting",
                run_id, trigger
            );
            return Ok(Outcome::Skipped {
                trigger: trigger.to_owned(),
                run_id,
            });
        }

        let api = connect()?;
        let repo = event.repo();
        let layout = &self.config.artifact;
        let work_dir = &self.config.work_dir;

        info!("Downloading artifact `{}` of run {} in {}", layout.name, run_id, repo);
        let all_artifacts = api.list_run_artifacts(repo, run_id)?;
        let artifact = artifacts::select_artifact(&all_artifacts, &layout.name, run_id)?;
        let bytes = api.download_artifact(artifact)?;
        let archive_path = artifacts::save_archive(work_dir, artifact, &bytes)?;

        info!("Unpacking {} into {}", archive_path.display(), work_dir.display());
        let files = archive::unpack(&archive_path, work_dir)?;
        info!("{} files extracted", files.len());
        let payload = CommentPayload::read_from(work_dir, layout)?;

        if self.dry_run {
            info!("Dry run, not commenting on {} in {}", payload.number, repo);
            return Ok(Outcome::DryRun { payload });
        }

        info!("Posting comment on {} in {}", payload.number, repo);
        let comment = api.create_issue_comment(repo, payload.number, &payload.body)?;
        info!("Comment created: {}", comment.html_url);
        Ok(Outcome::Posted { payload, comment })
    }
}
