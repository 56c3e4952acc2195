use clap::Parser;
use std::sync::Arc;
use tmstore_cli::commands::{cli, document, session};
use tmstore_cli::logging;
use tmstore_core::api::{
    self as core_api, CliError, DocumentTracker, Notifier, TrackerError, TrackerEvent,
};
use tmstore_plugins::factory;
use tmstore_plugins::notify::{ConsoleNotifier, TracingNotifier};

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = cli::Args::parse();
    let cfg = core_api::load_default(args.config.as_deref(), args.provider)
        .map_err(|e| CliError::Config(e.to_string()))?;
    let _log_guard = logging::init(&cfg.logging).map_err(CliError::Config)?;

    let notifier: Arc<dyn Notifier> = if atty::is(atty::Stream::Stderr) {
        Arc::new(ConsoleNotifier::stderr())
    } else {
        Arc::new(TracingNotifier)
    };
    let mut tracker =
        factory::build_tracker(&cfg, notifier).map_err(|e| CliError::Config(e.to_string()))?;

    let mut event_rx = tracker.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = event_rx.recv().await {
            match &event {
                TrackerEvent::SaveFailed {
                    provider, error, ..
                } => {
                    tracing::debug!(target: "tmstore.events", provider = %provider, error = %error, "save failed");
                }
                other => tracing::trace!(target: "tmstore.events", event = ?other),
            }
        }
    });

    let result = dispatch(args.command, &mut tracker).await;
    tracker.teardown();
    result.map(|_| 0)
}

fn exit_code_for_error(e: &CliError) -> i32 {
    // 0: success
    // 11: config error
    // 20: provider / IO error
    // 30: rejected document or command
    // 50: internal/uncategorized
    match e {
        CliError::Config(_) => 11,
        CliError::Tracker(te) => match te {
            TrackerError::Provider(_) => 20,
            TrackerError::Model(_)
            | TrackerError::NoStash
            | TrackerError::MissingTitle
            | TrackerError::DiagramNotFound { .. } => 30,
        },
        CliError::Io(_) => 20,
        CliError::Command(_) => 20,
        CliError::Json(_) => 30,
        CliError::Anyhow(_) => 50,
    }
}

async fn dispatch(cmd: cli::Commands, tracker: &mut DocumentTracker) -> Result<(), CliError> {
    let mut stdout = std::io::stdout();
    match cmd {
        cli::Commands::List(args) => document::handle_list(args, tracker, &mut stdout).await,
        cli::Commands::Show(args) => document::handle_show(args, tracker, &mut stdout).await,
        cli::Commands::Create(args) => document::handle_create(args, tracker).await,
        cli::Commands::Save(args) => document::handle_save(args, tracker).await,
        cli::Commands::Contributors(args) => {
            document::handle_contributors(args, tracker, &mut stdout).await
        }
        cli::Commands::CheckVersion(args) => {
            document::handle_check_version(args, tracker, &mut stdout).await
        }
        cli::Commands::Session => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            session::run_session(tracker, stdin, &mut stdout)
                .await
                .map(|_| ())
        }
    }
}
