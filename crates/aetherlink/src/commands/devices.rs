//! Device command handlers.

use chrono::Utc;
use tabled::Tabled;

use aetherlink_core::{Device, Monitor};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    category: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Vendor")]
    vendor: String,
}

impl DeviceRow {
    pub(crate) fn new(d: &Device, color: bool) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
            category: d.category.to_string(),
            status: output::status_label(d.status, color),
            ip: d.ip.to_string(),
            mac: d.mac.to_string(),
            vendor: d.vendor.clone().unwrap_or_default(),
        }
    }
}

fn detail(d: &Device, color: bool) -> String {
    let now = Utc::now();
    [
        format!("ID:        {}", d.id),
        format!("Name:      {}", d.name),
        format!("Type:      {}", d.category),
        format!("Status:    {}", output::status_label(d.status, color)),
        format!("IP:        {}", d.ip),
        format!("MAC:       {}", d.mac),
        format!("Vendor:    {}", d.vendor.as_deref().unwrap_or("-")),
        format!(
            "Last seen: {}",
            d.last_seen
                .map_or_else(|| "-".into(), |at| output::ago(at, now))
        ),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    monitor: &Monitor,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(global.color);

    match args.command.unwrap_or(DevicesCommand::List) {
        DevicesCommand::List => {
            let devices = monitor.devices().await?;
            let out = output::render_list(
                global.output,
                &devices,
                |d| DeviceRow::new(d, color),
                |d| d.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Get { device } => {
            let found = monitor.device(&device).await?;
            let out = output::render_single(
                global.output,
                &found,
                |d| detail(d, color),
                |d| d.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
