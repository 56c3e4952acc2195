//! One-shot subcommands. Each runs a short tracker lifecycle against the
//! configured provider.
use std::io::Write;
use std::path::Path;

use tmstore_core::api::{
    CliError, DocumentTracker, ThreatModel, ThreatModelUpdate, TrackerError, MSG_OPEN_FAILED,
};
use tmstore_plugins::provider::is_not_found;

use crate::commands::cli::{
    CheckVersionArgs, ContributorsArgs, CreateArgs, ListArgs, OutputFormat, SaveArgs, ShowArgs,
};

/// Prints the workspace listing, one name per line or as JSON.
pub async fn handle_list(
    args: ListArgs,
    tracker: &mut DocumentTracker,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let listing = tracker.fetch_all().await?;
    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, listing)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for entry in listing {
                match entry.name() {
                    Some(name) => writeln!(out, "{name}")?,
                    None => writeln!(out, "{}", entry.as_value())?,
                }
            }
        }
    }
    Ok(())
}

async fn open(tracker: &mut DocumentTracker, name: &str) -> Result<(), CliError> {
    tracker.fetch(name).await.map_err(|e| {
        tracing::error!(target: "tmstore.cli", name = %name, error = %e, "fetch failed");
        let failed = tracker.messages().get(MSG_OPEN_FAILED);
        match e {
            TrackerError::Provider(ref err) if is_not_found(err) => {
                CliError::Command(format!("{failed}: no threat model named {name}"))
            }
            other => CliError::Command(format!("{failed}: {other}")),
        }
    })
}

/// Prints the model as a single pretty JSON document.
pub async fn handle_show(
    args: ShowArgs,
    tracker: &mut DocumentTracker,
    out: &mut impl Write,
) -> Result<(), CliError> {
    open(tracker, &args.name).await?;
    serde_json::to_writer_pretty(&mut *out, tracker.document())?;
    writeln!(out)?;
    Ok(())
}

fn read_document(path: &Path) -> Result<ThreatModel, CliError> {
    let raw = std::fs::read_to_string(path)?;
    ThreatModel::from_json(&raw)
        .map_err(|e| CliError::Command(format!("{}: {e}", path.display())))
}

/// The tracker reports save failures to the notifier and keeps the document
/// dirty, so a dirty flag after the call means the save did not land.
fn ensure_saved(tracker: &DocumentTracker) -> Result<(), CliError> {
    if tracker.is_dirty() {
        return Err(CliError::Command(format!(
            "{} was not saved",
            tracker.document().title().unwrap_or("threat model")
        )));
    }
    Ok(())
}

/// Creates a model from a document on disk; refuses to overwrite.
pub async fn handle_create(
    args: CreateArgs,
    tracker: &mut DocumentTracker,
) -> Result<(), CliError> {
    let model = read_document(&args.file)?;
    tracker.select(model);
    tracker.update(ThreatModelUpdate {
        file_name: Some(args.file.display().to_string()),
        ..Default::default()
    });
    tracker.mark_modified();
    tracker.create_model().await;
    ensure_saved(tracker)
}

pub async fn handle_save(args: SaveArgs, tracker: &mut DocumentTracker) -> Result<(), CliError> {
    let model = read_document(&args.file)?;
    let file_name = args
        .name
        .unwrap_or_else(|| args.file.display().to_string());
    tracker.select(model);
    tracker.update(ThreatModelUpdate {
        file_name: Some(file_name),
        ..Default::default()
    });
    tracker.mark_modified();
    tracker.save_model().await;
    ensure_saved(tracker)
}

/// Prints contributors, replacing and saving them first when `--set` is given.
pub async fn handle_contributors(
    args: ContributorsArgs,
    tracker: &mut DocumentTracker,
    out: &mut impl Write,
) -> Result<(), CliError> {
    open(tracker, &args.name).await?;
    if !args.set.is_empty() {
        tracker.update(ThreatModelUpdate {
            file_name: Some(args.name.clone()),
            ..Default::default()
        });
        tracker.set_contributors(args.set);
        tracker.mark_modified();
        tracker.save_model().await;
        ensure_saved(tracker)?;
    }
    for name in tracker.contributors() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

pub async fn handle_check_version(
    args: CheckVersionArgs,
    tracker: &mut DocumentTracker,
    out: &mut impl Write,
) -> Result<(), CliError> {
    open(tracker, &args.name).await?;
    let version = tracker.document().version().unwrap_or("<none>");
    if tracker.is_legacy_version() {
        writeln!(out, "{}: legacy ({version})", args.name)?;
    } else {
        writeln!(out, "{}: current ({version})", args.name)?;
    }
    Ok(())
}
