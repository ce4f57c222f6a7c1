use prcomment::config::{Config, EVENT_PATH_VAR};
use prcomment::console::{ConsoleJsonReport, ConsoleTextReport};
use prcomment::error;
use prcomment::github::{GithubClient, WorkflowRunEvent};
use prcomment::poster::CommentPoster;

use anyhow::{anyhow, Context};
use atty::Stream;
use std::{env, path::PathBuf, time::Instant};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
enum Format {
    Text,
    Json {
        #[structopt(short, long, help = "do not pretty print json")]
        compact: bool,
    },
}

impl Default for Format {
    fn default() -> Self {
        Format::Text
    }
}

#[derive(Debug, StructOpt)]
enum Cmd {
    ///Posts the result bundle of a completed workflow run as a pull request comment
    Post {
        #[structopt(
            short,
            long,
            parse(from_os_str),
            help = "workflow_run event payload. Defaults to $GITHUB_EVENT_PATH"
        )]
        event_path: Option<PathBuf>,
        #[structopt(
            short,
            long,
            parse(from_os_str),
            help = "directory the artifact is downloaded and unpacked into"
        )]
        work_dir: Option<PathBuf>,
        #[structopt(short, long, help = "name of the artifact to look for")]
        artifact_name: Option<String>,
        #[structopt(long, help = "download and unpack the artifact, but do not comment")]
        dry_run: bool,
        #[structopt(subcommand)]
        format: Option<Format>,
    },
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "prcomment",
    about = "Posts the outcome of a finished workflow run on its pull request"
)]
struct Opt {
    /// Config file
    #[structopt(short, long, parse(from_os_str))]
    config_path: Option<PathBuf>,
    #[structopt(subcommand)]
    cmd: Cmd,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    if !atty::is(Stream::Stdout) {
        colored::control::set_override(false);
    }
    let opt = Opt::from_args();
    let mut config = match &opt.config_path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("cannot load config from {}", path.display()))?,
        None => Config::default(),
    };
    config.apply_env(|key| env::var(key).ok());

    match opt.cmd {
        Cmd::Post {
            event_path,
            work_dir,
            artifact_name,
            dry_run,
            format,
        } => {
            if let Some(work_dir) = work_dir {
                config.work_dir = work_dir;
            }
            if let Some(artifact_name) = artifact_name {
                config.artifact.name = artifact_name;
            }
            config.validate()?;

            let event_path = event_path
                .or_else(|| env::var_os(EVENT_PATH_VAR).map(PathBuf::from))
                .ok_or_else(|| {
                    anyhow!(
                        "no workflow_run event given, pass --event-path or set {}",
                        EVENT_PATH_VAR
                    )
                })?;
            let event = WorkflowRunEvent::from_file(&event_path)?;

            let started = Instant::now();
            let outcome = CommentPoster::new(&config)
                .dry_run(dry_run)
                .run(&event, || -> error::Result<GithubClient> {
                    let token = config.token()?.clone();
                    GithubClient::new(&config.github.api_url, token)
                })
                .with_context(|| {
                    format!(
                        "cannot comment on behalf of run {} in {}",
                        event.run_id(),
                        event.repo()
                    )
                })?;
            let elapsed = started.elapsed();

            match format.unwrap_or_default() {
                Format::Text => ConsoleTextReport::stdout().render(&event, &outcome, elapsed),
                Format::Json { compact } => {
                    ConsoleJsonReport::stdout(compact).render(&event, &outcome, elapsed)
                }
            }
        }
    }
}
