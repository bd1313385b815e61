// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod observer;
pub mod tools;

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::cli::{CliArgs, ToolCommand};
use crate::config::{Settings, resolve_settings};
use crate::errors::ApkBenchError;
use crate::exec::{Command, CommandExecutor, ExecutorBackend};
use crate::observer::{FileSink, TerminalObserver};
use crate::tools::signer::{SignerAction, test_keystore_argv, test_keystore_path};

/// One command ready to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCommand {
    pub label: String,
    pub argv: Vec<String>,
}

impl PlannedCommand {
    fn new(label: impl Into<String>, argv: Vec<String>) -> Self {
        Self {
            label: label.into(),
            argv,
        }
    }
}

/// Everything needed to carry out one CLI invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    /// Directories that must exist before the first step runs.
    pub create_dirs: Vec<PathBuf>,
    /// Commands in submission order; the requested action is always last.
    pub steps: Vec<PlannedCommand>,
}

impl Plan {
    fn prepare(&self) -> std::io::Result<()> {
        for dir in &self.create_dirs {
            debug!(dir = ?dir, "creating directory");
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

/// Turn the requested tool action into the commands to run.
///
/// Signing with the debug key when its keystore does not exist yet adds a
/// keytool step first; apksigner only starts once it has succeeded.
pub fn plan(tool: &ToolCommand, settings: &Settings) -> errors::Result<Plan> {
    let action = tool.action();
    let main = PlannedCommand::new(action.label(), action.argv(settings)?);

    let mut plan = Plan::default();
    if let ToolCommand::Signer(SignerAction::Sign(sign)) = tool {
        let keystore = test_keystore_path(settings);
        if sign.uses_test_key() && !keystore.is_file() {
            info!(path = ?keystore, "test keystore missing; it will be generated");
            if let Some(dir) = keystore.parent() {
                plan.create_dirs.push(dir.to_path_buf());
            }
            plan.steps.push(PlannedCommand::new(
                "Generating test keystore...",
                test_keystore_argv(settings, &keystore),
            ));
        }
    }
    plan.steps.push(main);

    Ok(plan)
}

/// Hand `plan` to `backend` as one chained command, attaching `tee` to the
/// last step.
///
/// A failed step stops the chain, so sign never runs against a keystore
/// that keytool could not create.
pub fn submit_plan(backend: &dyn ExecutorBackend, plan: Plan, tee: Option<FileSink>) {
    let mut steps = plan.steps.into_iter().rev();
    let Some(last) = steps.next() else {
        return;
    };

    let mut chain = Command::new(last.argv, last.label);
    if let Some(sink) = tee {
        chain = chain.with_sink(sink);
    }
    for step in steps {
        chain = Command::new(step.argv, step.label).and_then(chain);
    }
    backend.submit(chain);
}

/// High-level entry point used by `main.rs`.
///
/// Returns whether everything that ran succeeded.
pub async fn run(args: CliArgs) -> Result<bool> {
    let settings = resolve_settings(args.settings.as_deref())?;

    let plan = match plan(&args.tool, &settings) {
        Ok(plan) => plan,
        Err(ApkBenchError::Validation(message)) => {
            warn!(%message, "invalid input; nothing to run");
            let executor = CommandExecutor::with_observer(TerminalObserver::new());
            executor.report_error(&message);
            executor.join().await?;
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };

    if args.dry_run {
        print_dry_run(&plan);
        return Ok(true);
    }

    plan.prepare()?;
    let tee = args.tee.as_deref().map(FileSink::create).transpose()?;

    let executor = CommandExecutor::with_observer(TerminalObserver::new());
    submit_plan(&executor, plan, tee);
    let summary = executor.join().await?;

    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        skipped = summary.skipped,
        "all commands finished"
    );
    Ok(summary.all_succeeded())
}

/// Simple dry-run output: one line per command that would run.
fn print_dry_run(plan: &Plan) {
    println!("apkbench dry-run");
    for dir in &plan.create_dirs {
        println!("  mkdir -p {}", dir.display());
    }
    for step in &plan.steps {
        println!("  # {}", step.label);
        println!("  {}", step.argv.join(" "));
    }

    debug!("dry-run complete (no execution)");
}
