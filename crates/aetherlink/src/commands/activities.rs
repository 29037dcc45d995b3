//! Activity command handler.

use chrono::{DateTime, Utc};
use tabled::Tabled;

use aetherlink_core::{ActivityEvent, Monitor};

use crate::cli::{ActivitiesArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
pub(crate) struct ActivityRow {
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Action")]
    action: String,
}

impl ActivityRow {
    pub(crate) fn new(a: &ActivityEvent, now: DateTime<Utc>) -> Self {
        Self {
            when: output::ago(a.timestamp, now),
            device: a.device_name.clone(),
            action: a.action.clone(),
        }
    }
}

pub async fn handle(
    monitor: &Monitor,
    args: ActivitiesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if args.limit == 0 {
        return Err(CliError::Validation {
            field: "limit".into(),
            reason: "must be at least 1".into(),
        });
    }

    let now = Utc::now();
    let activities = monitor.activities(args.limit).await;
    let out = output::render_list(
        global.output,
        &activities,
        |a| ActivityRow::new(a, now),
        |a| format!("{}\t{}\t{}", a.timestamp.to_rfc3339(), a.device_name, a.action),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
