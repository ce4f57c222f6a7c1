use crate::{
    bundle::CommentPayload,
    display,
    github::{RepoSlug, WorkflowRunEvent},
    poster::Outcome,
};
use colored::Colorize;
use io::Result;
use serde::Serialize;
use std::{io, time::Duration};

const INDENT_STR: &str = "  ";

pub trait ConsoleDisplay {
    fn display(&self, f: &mut Box<dyn io::Write>, depth: usize) -> Result<()>;
}

impl ConsoleDisplay for WorkflowRunEvent {
    fn display(&self, f: &mut Box<dyn io::Write>, _depth: usize) -> Result<()> {
        writeln!(f, "> {:<11}: {}", "Repository", self.repo())?;
        writeln!(f, "> {:<11}: {}", "Run", self.run_id())?;
        if let Some(name) = &self.workflow_run.name {
            writeln!(f, "> {:<11}: {}", "Workflow", name)?;
        }
        writeln!(f, "> {:<11}: {}", "Trigger", self.trigger())?;
        if let Some(conclusion) = &self.workflow_run.conclusion {
            writeln!(f, "> {:<11}: {}", "Conclusion", conclusion)?;
        }
        if let Some(html_url) = &self.workflow_run.html_url {
            writeln!(f, "> {:<11}: {}", "URL", html_url)?;
        }
        writeln!(f)
    }
}

impl ConsoleDisplay for CommentPayload {
    fn display(&self, f: &mut Box<dyn io::Write>, depth: usize) -> Result<()> {
        writeln!(f, "{}{:<11}: {}", INDENT_STR.repeat(depth), "Target", self.number)?;
        writeln!(f, "{}{:<11}:", INDENT_STR.repeat(depth), "Body")?;
        for line in self.body.lines() {
            writeln!(f, "{}{}", INDENT_STR.repeat(depth + 1), line.dimmed())?;
        }
        Ok(())
    }
}

impl ConsoleDisplay for Outcome {
    fn display(&self, f: &mut Box<dyn io::Write>, depth: usize) -> Result<()> {
        match self {
            Outcome::Skipped { trigger, .. } => writeln!(
                f,
                "{}{} run was triggered by `{}`, nothing to do",
                INDENT_STR.repeat(depth),
                "↪".blue(),
                trigger
            ),
            Outcome::Posted { payload, comment } => {
                writeln!(
                    f,
                    "{}{} comment posted: {}",
                    INDENT_STR.repeat(depth),
                    "✓".green(),
                    comment.html_url
                )?;
                payload.display(f, depth + 1)
            }
            Outcome::DryRun { payload } => {
                writeln!(
                    f,
                    "{}{} dry run, comment not posted",
                    INDENT_STR.repeat(depth),
                    "-".yellow()
                )?;
                payload.display(f, depth + 1)
            }
        }
    }
}

pub struct ConsoleTextReport {
    sink: Box<dyn io::Write>,
}
impl ConsoleTextReport {
    pub fn sink_to(sink: Box<dyn io::Write>) -> Self {
        ConsoleTextReport { sink }
    }
    pub fn stdout() -> Self {
        ConsoleTextReport::sink_to(Box::new(io::stdout()))
    }
}

impl ConsoleTextReport {
    pub fn render(
        &mut self,
        event: &WorkflowRunEvent,
        outcome: &Outcome,
        elapsed: Duration,
    ) -> anyhow::Result<()> {
        event.display(&mut self.sink, 0)?;
        outcome.display(&mut self.sink, 0)?;
        writeln!(self.sink, "> {:<11}: {}", "Elapsed", display::duration(elapsed))?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    repository: &'a RepoSlug,
    run_id: u64,
    trigger: &'a str,
    outcome: &'a Outcome,
    elapsed_ms: u64,
}

pub struct ConsoleJsonReport {
    compact: bool,
    sink: Box<dyn io::Write>,
}
impl ConsoleJsonReport {
    pub fn sink_to(compact: bool, sink: Box<dyn io::Write>) -> Self {
        ConsoleJsonReport { compact, sink }
    }
    pub fn stdout(compact: bool) -> Self {
        ConsoleJsonReport::sink_to(compact, Box::new(io::stdout()))
    }
}

impl ConsoleJsonReport {
    pub fn render(
        &mut self,
        event: &WorkflowRunEvent,
        outcome: &Outcome,
        elapsed: Duration,
    ) -> anyhow::Result<()> {
        let report = JsonReport {
            repository: event.repo(),
            run_id: event.run_id(),
            trigger: event.trigger(),
            outcome,
            elapsed_ms: elapsed.as_millis() as u64,
        };
        if self.compact {
            serde_json::ser::to_writer(&mut self.sink, &report)?;
        } else {
            serde_json::ser::to_writer_pretty(&mut self.sink, &report)?;
        }
        writeln!(self.sink)?;
        Ok(())
    }
}
