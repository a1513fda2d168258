use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use doctor_core::{
    check_artifact_metadata, check_description, update, AppState, ArtifactCandidate, Msg,
    SelectionChannel, SubmissionOutcome, SubmissionPolicy, ValidationError,
};
use doctor_logging::doctor_info;

use crate::config::AppConfig;
use crate::effects::EffectRunner;
use crate::render;
use crate::session::Session;

/// Exit code when the file or description is rejected before sending.
const EXIT_REJECTED: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "gcode-doctor")]
#[command(about = "Send a G-code file and a problem description to a print troubleshooting service")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config RON. If omitted, uses ./gcode_doctor.ron if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error/off).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the file and description without contacting the service.
    Check {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        description: String,
        /// Treat the file as drag-and-dropped rather than picked.
        #[arg(long)]
        drop: bool,
    },
    /// Compress the file, send it with the description and print the guidance.
    Submit {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        description: String,
        /// Override the configured troubleshooting endpoint.
        #[arg(long)]
        endpoint: Option<String>,
        /// Treat the file as drag-and-dropped rather than picked.
        #[arg(long)]
        drop: bool,
    },
    /// Print the effective configuration.
    Config {},
}

pub fn dispatch(args: Args) -> Result<ExitCode> {
    let mut cfg = AppConfig::resolve(args.config.as_deref())?;
    if let Command::Submit {
        endpoint: Some(endpoint),
        ..
    } = &args.cmd
    {
        cfg.endpoint = endpoint.clone();
    }
    doctor_logging::initialize(&cfg.log_settings(args.log_level.as_deref())?);

    match &args.cmd {
        Command::Check {
            file,
            description,
            drop,
        } => check(&cfg, file, description, channel(*drop)),
        Command::Submit {
            file,
            description,
            drop,
            ..
        } => submit(&cfg, file, description, channel(*drop)),
        Command::Config {} => {
            println!("{}", cfg.to_ron()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn channel(drop: bool) -> SelectionChannel {
    if drop {
        SelectionChannel::DragDrop
    } else {
        SelectionChannel::Picker
    }
}

/// Result of looking at a file on disk before it is handed to the controller.
#[derive(Debug)]
enum Selection {
    Loaded(ArtifactCandidate),
    Rejected(ValidationError),
}

/// Check name and size from metadata, and read the content only when they pass.
///
/// At most one byte past the limit is read, so a file that grows after the
/// metadata check is still caught as too large by the controller.
fn load_candidate(policy: &SubmissionPolicy, path: &Path) -> Result<Selection> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("not a file path: {}", path.display()))?;
    let size_bytes = std::fs::metadata(path)
        .with_context(|| format!("reading metadata: {}", path.display()))?
        .len();
    if let Err(reason) = check_artifact_metadata(policy, &name, size_bytes) {
        return Ok(Selection::Rejected(reason));
    }

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let limit = policy.max_size_bytes().saturating_add(1);
    let mut bytes = Vec::with_capacity(usize::try_from(size_bytes).unwrap_or(0));
    file.take(limit)
        .read_to_end(&mut bytes)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(Selection::Loaded(ArtifactCandidate::new(name, bytes)))
}

/// Print a rejection the way the controller would report it.
fn rejected(reason: &ValidationError) -> ExitCode {
    eprintln!("{reason}");
    ExitCode::from(EXIT_REJECTED)
}

fn check(
    cfg: &AppConfig,
    file: &Path,
    description: &str,
    channel: SelectionChannel,
) -> Result<ExitCode> {
    let policy = cfg.policy();
    let candidate = match load_candidate(&policy, file)? {
        Selection::Loaded(candidate) => candidate,
        Selection::Rejected(reason) => return Ok(rejected(&reason)),
    };
    let state = AppState::with_policy(policy);
    let (state, _) = update(state, Msg::ArtifactSelected { candidate, channel });
    let (state, _) = update(state, Msg::DescriptionChanged(description.to_string()));
    let view = state.view();

    eprintln!("{}", render::status_line(&view));
    if let Some(notice) = &view.notice {
        return Ok(rejected(notice));
    }
    if let Err(reason) = check_description(state.policy(), description) {
        return Ok(rejected(&reason));
    }
    println!("ready to submit");
    Ok(ExitCode::SUCCESS)
}

fn submit(
    cfg: &AppConfig,
    file: &Path,
    description: &str,
    channel: SelectionChannel,
) -> Result<ExitCode> {
    let policy = cfg.policy();
    let candidate = match load_candidate(&policy, file)? {
        Selection::Loaded(candidate) => candidate,
        Selection::Rejected(reason) => return Ok(rejected(&reason)),
    };
    let runner = EffectRunner::new(cfg.engine_settings())?;
    let mut session = Session::new(policy, runner);

    session.dispatch(Msg::ArtifactSelected { candidate, channel });
    session.dispatch(Msg::DescriptionChanged(description.to_string()));
    session.dispatch(Msg::SubmitClicked);

    let view = session.view();
    if !view.submission.is_busy() {
        let reason = view
            .notice
            .map(|notice| notice.to_string())
            .unwrap_or_else(|| "submission was not started".to_string());
        eprintln!("{reason}");
        return Ok(ExitCode::from(EXIT_REJECTED));
    }

    eprintln!("{}", render::status_line(&view));
    doctor_info!("submitting to {}", cfg.endpoint);
    let view = session.run_until_settled(|view| eprintln!("{}", render::status_line(view)))?;

    match view.outcome {
        Some(SubmissionOutcome::Success { guidance }) => {
            println!("{guidance}");
            Ok(ExitCode::SUCCESS)
        }
        Some(SubmissionOutcome::Failure { message }) => {
            eprintln!("Error: {message}");
            Ok(ExitCode::FAILURE)
        }
        None => Ok(ExitCode::FAILURE),
    }
}
