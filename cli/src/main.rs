use clap::Parser;
use welcome_cli::Cli;
use welcome_cli::init_logging;
use welcome_cli::resolve_state_dir;
use welcome_cli::run;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let state_dir = resolve_state_dir(cli.state_dir.clone())?;
    let _log_guard = init_logging(&state_dir)?;

    let output = run(cli, &state_dir).await?;
    print!("{output}");
    Ok(())
}
