//! Full snapshot rendering.

use chrono::Utc;

use aetherlink_core::{ChartPoint, Monitor, Snapshot, SnapshotOrigin};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::activities::ActivityRow;
use super::devices::DeviceRow;
use super::stats;

const SPARK: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One block character per chart point, scaled to the series maximum.
fn sparkline(values: impl Iterator<Item = u32> + Clone) -> String {
    let max = values.clone().max().unwrap_or(0);
    values
        .map(|v| {
            if max == 0 {
                return SPARK[0];
            }
            let idx = (u64::from(v) * 7 + u64::from(max) / 2) / u64::from(max);
            SPARK[usize::try_from(idx).unwrap_or(7).min(7)]
        })
        .collect()
}

fn chart_lines(points: &[ChartPoint]) -> String {
    let first = points.first().map_or("-", |p| p.time.as_str());
    let last = points.last().map_or("-", |p| p.time.as_str());
    let peak_down = points.iter().map(|p| p.download).max().unwrap_or(0);
    let peak_up = points.iter().map(|p| p.upload).max().unwrap_or(0);
    [
        format!(
            "Down  {}  peak {peak_down} Mbps",
            sparkline(points.iter().map(|p| p.download))
        ),
        format!(
            "Up    {}  peak {peak_up} Mbps",
            sparkline(points.iter().map(|p| p.upload))
        ),
        format!("      {first} .. {last}"),
    ]
    .join("\n")
}

fn origin_label(origin: SnapshotOrigin) -> &'static str {
    match origin {
        SnapshotOrigin::Live => "live",
        SnapshotOrigin::Mock => "demo",
        SnapshotOrigin::Degraded => "demo (live collection unavailable)",
    }
}

/// Multi-section table view of a snapshot.
pub(crate) fn detail(snapshot: &Snapshot, color: bool) -> String {
    let now = Utc::now();
    let devices: Vec<DeviceRow> = snapshot
        .devices
        .iter()
        .map(|d| DeviceRow::new(d, color))
        .collect();
    let activities: Vec<ActivityRow> = snapshot
        .activities
        .iter()
        .map(|a| ActivityRow::new(a, now))
        .collect();

    let mut sections = vec![
        output::heading("Network", color),
        stats::detail(&snapshot.stats),
        format!("Source:   {}", origin_label(snapshot.origin)),
        String::new(),
        output::heading("Devices", color),
        output::render_table(&devices),
    ];
    if !activities.is_empty() {
        sections.push(String::new());
        sections.push(output::heading("Recent activity", color));
        sections.push(output::render_table(&activities));
    }
    sections.push(String::new());
    sections.push(output::heading("Traffic, last 24h", color));
    sections.push(chart_lines(&snapshot.chart_data));
    sections.join("\n")
}

fn plain(snapshot: &Snapshot) -> String {
    let mut lines = vec![stats::plain(&snapshot.stats)];
    lines.extend(snapshot.devices.iter().map(|d| format!("device={}", d.id)));
    lines.join("\n")
}

/// Render one snapshot in the selected format.
pub(crate) fn render(snapshot: &Snapshot, format: OutputFormat, color: bool) -> String {
    output::render_single(format, snapshot, |s| detail(s, color), plain)
}

pub async fn handle(monitor: &Monitor, global: &GlobalOpts) -> Result<(), CliError> {
    let snapshot = monitor.snapshot().await;
    super::warn_if_degraded(&snapshot, global);

    let out = render(&snapshot, global.output, output::should_color(global.color));
    output::print_output(&out, global.quiet);
    Ok(())
}
