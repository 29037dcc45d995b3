//! Repeated snapshots on an interval.
//!
//! Every round goes through the same monitor, so first sightings and
//! bandwidth samples accumulate across rounds the way they would in a
//! long-running dashboard backend.

use std::time::Duration;

use chrono::Local;
use tracing::debug;

use aetherlink_core::Monitor;

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    monitor: &Monitor,
    args: WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(global.color);
    let interval = Duration::from_secs(args.interval);
    let mut round: u64 = 0;

    loop {
        round += 1;
        let snapshot = monitor.snapshot().await;
        super::warn_if_degraded(&snapshot, global);

        let body = super::status::render(&snapshot, global.output, color);
        let out = if global.output == OutputFormat::Table {
            let stamp = Local::now().format("%H:%M:%S");
            format!("{}\n{body}", output::heading(&format!("── {stamp} ──"), color))
        } else {
            body
        };
        output::print_output(&out, global.quiet);

        if args.count.is_some_and(|count| round >= count) {
            return Ok(());
        }

        debug!(round, "waiting for next snapshot");
        tokio::select! {
            () = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupted");
                return Ok(());
            }
        }
    }
}
