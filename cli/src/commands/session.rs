//! Line-oriented driver: one JSON `Command` per input line, one JSON reply
//! per command.
use std::io::Write;

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use tmstore_core::api::{CliError, Command, DocumentTracker, Outcome};

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Reply {
    Outcome(Outcome),
    Error { error: String },
}

fn write_reply(out: &mut impl Write, reply: &Reply) -> Result<(), CliError> {
    serde_json::to_writer(&mut *out, reply)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Runs until `input` is exhausted. Malformed lines and failed commands get
/// an `{"error": ...}` reply and the session continues.
pub async fn run_session<R>(
    tracker: &mut DocumentTracker,
    input: R,
    out: &mut impl Write,
) -> Result<usize, CliError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut handled = 0usize;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<Command>(line) {
            Ok(command) => {
                let query = command.is_query();
                match tracker.dispatch(command).await {
                    Ok(outcome) => Reply::Outcome(outcome),
                    Err(e) => {
                        tracing::warn!(target: "tmstore.session", query, error = %e, "command failed");
                        Reply::Error {
                            error: e.to_string(),
                        }
                    }
                }
            }
            Err(e) => {
                tracing::warn!(target: "tmstore.session", error = %e, "unreadable command");
                Reply::Error {
                    error: format!("invalid command: {e}"),
                }
            }
        };
        write_reply(out, &reply)?;
        handled += 1;
    }

    tracing::debug!(target: "tmstore.session", stage = "session.end", handled);
    Ok(handled)
}
