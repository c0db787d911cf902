use clap::Parser;
use rvn_gentests::cli::Cli;
use rvn_gentests::run_gentests_cmd;
use rvn_globals::init_globals;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let globals = init_globals(cli.g)?;
    run_gentests_cmd(cli.args, globals).await?;

    Ok(())
}
