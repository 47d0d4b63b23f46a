use anyhow::{Context, Result};
use clap::Subcommand;
use reqwest::header::{ETAG, IF_MATCH};
use std::path::PathBuf;

use warden_common::api::UpdateRulesResponse;
use warden_common::rule_yaml::to_yaml;
use warden_common::validate::validate_rules;
use warden_common::RuleSet;

use crate::output::{build_table, confirm, print_json, print_success, spinner, theme, OutputMode};
use super::helpers;

#[derive(Subcommand)]
pub enum RulesCmd {
    /// Show the active rule set
    Get,
    /// Write the active rule set as a YAML rule document
    Export(ExportArgs),
    /// Replace the active rule set with a local file
    Apply(ApplyArgs),
    /// Check a local rule file without contacting the server
    Validate(ValidateArgs),
}

#[derive(clap::Args)]
pub struct ExportArgs {
    #[arg(long, help = "Output file (stdout when omitted)")]
    pub out: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct ApplyArgs {
    #[arg(long, help = "YAML or JSON rule document")]
    pub file: PathBuf,
    #[arg(long, help = "Only apply if the server still holds this version")]
    pub if_match: Option<String>,
    #[arg(long, help = "Skip confirmation prompt")]
    pub yes: bool,
}

#[derive(clap::Args)]
pub struct ValidateArgs {
    #[arg(long, help = "YAML or JSON rule document")]
    pub file: PathBuf,
}

pub async fn execute(cmd: RulesCmd, mode: OutputMode, base: &str) -> Result<()> {
    match cmd {
        RulesCmd::Get => get(base, mode).await,
        RulesCmd::Export(args) => export(base, args).await,
        RulesCmd::Apply(args) => apply(base, args, mode).await,
        RulesCmd::Validate(args) => validate(args, mode),
    }
}

async fn fetch(base: &str) -> Result<(RuleSet, Option<String>)> {
    let resp = reqwest::get(helpers::api_url(base, "/rules")).await?;
    let resp = helpers::check(resp).await?;
    let etag = resp
        .headers()
        .get(ETAG)
        .and_then(|v| v.to_str().ok())
        .map(|v| helpers::unquote_etag(v).to_string());
    let rules: RuleSet = resp.json().await?;
    Ok((rules, etag))
}

async fn get(base: &str, mode: OutputMode) -> Result<()> {
    let sp = match mode {
        OutputMode::Human => Some(spinner::create("Fetching rules...")),
        OutputMode::Json => None,
    };

    let (rules, etag) = fetch(base).await?;

    if let Some(sp) = sp {
        spinner::finish_clear(&sp);
    }

    match mode {
        OutputMode::Json => print_json(&rules)?,
        OutputMode::Human => {
            theme::print_header("Detection Rules");
            theme::print_kv("Version", &rules.ruleset_version);
            theme::print_kv("Description", &rules.description);
            theme::print_kv("ETag", etag.as_deref().unwrap_or("-"));
            println!();

            if rules.rules.is_empty() {
                theme::print_dim("No rules defined.");
                return Ok(());
            }
            let mut table = build_table(&["Rule ID", "Description", "Conditions"]);
            for r in &rules.rules {
                table.add_row(vec![
                    r.rule_id.clone(),
                    r.description.clone(),
                    r.conditions.len().to_string(),
                ]);
            }
            println!("{table}");
        }
    }

    Ok(())
}

async fn export(base: &str, args: ExportArgs) -> Result<()> {
    let (rules, _) = fetch(base).await?;
    let doc = to_yaml(&rules)?;

    match args.out {
        Some(path) => {
            std::fs::write(&path, doc).with_context(|| format!("writing {}", path.display()))?;
            print_success(&format!("Rules written to {}", path.display()));
        }
        None => print!("{doc}"),
    }
    Ok(())
}

async fn apply(base: &str, args: ApplyArgs, mode: OutputMode) -> Result<()> {
    let rules = helpers::load_rule_file(&args.file)?;
    validate_rules(&rules).map_err(|e| anyhow::anyhow!("{}: {e}", args.file.display()))?;

    if mode == OutputMode::Human && !args.yes {
        let msg = format!(
            "Replace active rules with version '{}' ({} rules)?",
            rules.ruleset_version,
            rules.rules.len()
        );
        if !confirm::confirm_action(&msg) {
            theme::print_dim("Cancelled.");
            return Ok(());
        }
    }

    let sp = match mode {
        OutputMode::Human => Some(spinner::create("Applying rules...")),
        OutputMode::Json => None,
    };

    let client = reqwest::Client::new();
    let mut req = client.put(helpers::api_url(base, "/rules")).json(&rules);
    if let Some(etag) = &args.if_match {
        req = req.header(IF_MATCH, format!("\"{}\"", helpers::unquote_etag(etag)));
    }

    let resp = match helpers::check(req.send().await?).await {
        Ok(resp) => resp,
        Err(e) => {
            if let Some(sp) = sp {
                spinner::finish_err(&sp, "Rules not applied");
            }
            return Err(e);
        }
    };
    let updated: UpdateRulesResponse = resp.json().await?;

    if let Some(sp) = sp {
        spinner::finish_ok(&sp, &updated.message);
    }

    match mode {
        OutputMode::Json => print_json(&updated)?,
        OutputMode::Human => theme::print_kv("New version", &updated.new_version),
    }

    Ok(())
}

fn validate(args: ValidateArgs, mode: OutputMode) -> Result<()> {
    let rules = helpers::load_rule_file(&args.file)?;
    let result = validate_rules(&rules);

    match mode {
        OutputMode::Json => print_json(&serde_json::json!({
            "valid": result.is_ok(),
            "error": result.as_ref().err(),
        }))?,
        OutputMode::Human => {
            if let Ok(()) = &result {
                print_success(&format!(
                    "{} is valid ({} rules)",
                    args.file.display(),
                    rules.rules.len()
                ));
            }
        }
    }

    result.map_err(|e| anyhow::anyhow!("{}: {e}", args.file.display()))
}
