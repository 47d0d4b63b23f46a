mod alerts;
mod health;
pub(crate) mod helpers;
mod rules;
mod syscalls;
mod version;

use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    #[command(subcommand)]
    Rules(rules::RulesCmd),
    /// List syscalls observed as callable in the cluster
    Syscalls,
    Alerts(alerts::AlertsArgs),
    /// Fire an attack test against the attacker service
    Test(test::TestArgs),
    Health,
    Version,
}

pub async fn run(opts: crate::Opts) -> Result<()> {
    let mode = opts.output_mode();
    let base = helpers::base_url(&opts.server);
    match opts.cmd {
        Commands::Rules(cmd) => rules::execute(cmd, mode, &base).await,
        Commands::Syscalls => syscalls::execute(mode, &base).await,
        Commands::Alerts(args) => alerts::execute(args, mode, &base).await,
        Commands::Test(args) => test::execute(args, mode, &base).await,
        Commands::Health => health::execute(mode, &base).await,
        Commands::Version => {
            version::execute(mode, &base);
            Ok(())
        }
    }
}
