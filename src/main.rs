use std::io::Write;

use anyhow::Result;
use clap::Parser;
use specimen::cli::{self, Cli};
use specimen::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Settings feed the log level, so load them before logging starts.
    let config = cli::load_config(&cli)?;
    let rust_log = std::env::var("RUST_LOG").ok();
    debug::init_log_bridge(debug::effective_level(
        cli.log_level.map(Into::into),
        rust_log.as_deref(),
        config.log_level,
    ));

    log::debug!("Starting specimen {}", specimen::VERSION);

    let outcome = {
        let mut stdout = std::io::stdout().lock();
        let outcome = cli::run(&cli, &config, &mut stdout)?;
        stdout.flush()?;
        outcome
    };

    let code = outcome.exit_code();
    if code != 0 {
        // Non-zero exit: use process::exit so the shell sees the code.
        std::process::exit(code);
    }
    Ok(())
}
