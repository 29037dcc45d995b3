//! Stats command handler.

use aetherlink_core::{Monitor, NetworkStats};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub(crate) fn detail(s: &NetworkStats) -> String {
    [
        format!("Devices:  {}", s.connected_devices),
        format!("Speed:    {} Mbps", s.network_speed),
        format!("Usage:    {:.1} GB", s.data_usage),
        format!("Uptime:   {}", s.uptime),
    ]
    .join("\n")
}

pub(crate) fn plain(s: &NetworkStats) -> String {
    [
        format!("connected_devices={}", s.connected_devices),
        format!("network_speed={}", s.network_speed),
        format!("data_usage={:.1}", s.data_usage),
        format!("uptime={}", s.uptime),
    ]
    .join("\n")
}

pub async fn handle(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let stats = monitor.stats().await?;
    let out = output::render_single(global.output, &stats, detail, plain);
    output::print_output(&out, global.quiet);
    Ok(())
}
