//! Command dispatch: bridges CLI args -> monitor queries -> output formatting.

pub mod activities;
pub mod devices;
pub mod stats;
pub mod status;
pub mod watch;

use aetherlink_core::{Monitor, Snapshot, SnapshotOrigin};
use owo_colors::OwoColorize;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Dispatch a monitor-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    monitor: &Monitor,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Status => status::handle(monitor, global).await,
        Command::Devices(args) => devices::handle(monitor, args, global).await,
        Command::Stats => stats::handle(monitor, global).await,
        Command::Activities(args) => activities::handle(monitor, args, global).await,
        Command::Watch(args) => watch::handle(monitor, args, global).await,
        Command::Completions(_) => Err(CliError::Internal(
            "completions are generated before dispatch".into(),
        )),
    }
}

/// Tell the user on stderr when a snapshot holds substitute data.
pub(crate) fn warn_if_degraded(snapshot: &Snapshot, global: &GlobalOpts) {
    if global.quiet || snapshot.origin != SnapshotOrigin::Degraded {
        return;
    }
    let message = "live collection failed or timed out; showing demo data";
    if output::should_color(global.color) {
        eprintln!("{} {message}", "warning:".yellow().bold());
    } else {
        eprintln!("warning: {message}");
    }
}
