use anyhow::Result;

use warden_common::api::CallableSyscallsResponse;

use crate::output::{build_table, print_json, spinner, theme, OutputMode};
use super::helpers;

pub async fn execute(mode: OutputMode, base: &str) -> Result<()> {
    let sp = match mode {
        OutputMode::Human => Some(spinner::create("Fetching callable syscalls...")),
        OutputMode::Json => None,
    };

    let resp = reqwest::get(helpers::api_url(base, "/syscalls/callable")).await?;
    let mut list: CallableSyscallsResponse = helpers::check(resp).await?.json().await?;

    if let Some(sp) = sp {
        spinner::finish_clear(&sp);
    }

    match mode {
        OutputMode::Json => print_json(&list)?,
        OutputMode::Human => {
            theme::print_header(&format!("Callable Syscalls ({})", list.total_count));
            if list.syscalls.is_empty() {
                theme::print_dim("No syscalls recorded.");
                return Ok(());
            }
            list.syscalls.sort_by(|a, b| a.name.cmp(&b.name));
            let mut table = build_table(&["Name", "Args", "Description"]);
            for s in &list.syscalls {
                let args = s
                    .args
                    .iter()
                    .map(|a| format!("{} {}", a.arg_type, a.name))
                    .collect::<Vec<_>>()
                    .join(", ");
                table.add_row(vec![s.name.clone(), args, s.description.clone()]);
            }
            println!("{table}");
        }
    }

    Ok(())
}
