use anyhow::Result;
use chrono::{DateTime, FixedOffset};

use warden_common::api::AlertsResponse;

use crate::output::{build_table, print_json, spinner, theme, OutputMode};
use super::helpers;

#[derive(clap::Args)]
pub struct AlertsArgs {
    #[arg(long, default_value_t = 50, help = "Maximum number of alerts")]
    pub limit: u32,
    #[arg(long, value_parser = parse_since, help = "Only alerts after this RFC 3339 time")]
    pub since: Option<DateTime<FixedOffset>>,
}

pub(crate) fn parse_since(raw: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(raw).map_err(|e| format!("expected RFC 3339 time: {e}"))
}

pub async fn execute(args: AlertsArgs, mode: OutputMode, base: &str) -> Result<()> {
    let mut query = vec![("limit", args.limit.to_string())];
    if let Some(since) = args.since {
        query.push(("since", since.to_rfc3339()));
    }

    let sp = match mode {
        OutputMode::Human => Some(spinner::create("Fetching alerts...")),
        OutputMode::Json => None,
    };

    let resp = reqwest::Client::new()
        .get(helpers::api_url(base, "/alerts"))
        .query(&query)
        .send()
        .await?;
    let list: AlertsResponse = helpers::check(resp).await?.json().await?;

    if let Some(sp) = sp {
        spinner::finish_clear(&sp);
    }

    match mode {
        OutputMode::Json => print_json(&list)?,
        OutputMode::Human => {
            theme::print_header("Alerts");
            if list.alerts.is_empty() {
                theme::print_dim("No alerts received.");
                return Ok(());
            }
            let mut table = build_table(&["Time", "Rule", "Pod", "Namespace", "Alert ID"]);
            for a in &list.alerts {
                table.add_row(vec![
                    a.timestamp.clone(),
                    a.rule_id.clone(),
                    a.pod_name.clone(),
                    a.namespace.clone(),
                    a.alert_id.clone(),
                ]);
            }
            println!("{table}");
        }
    }

    Ok(())
}
