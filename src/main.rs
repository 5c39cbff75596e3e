//! replkit - An interactive command shell.

mod cli;
mod demo;

use cli::Cli;
use replkit::logging;
use replkit::{Result, Shell, ShellConfig};
use tracing::{error, info};

fn main() {
    let cli = Cli::parse_args();

    if cli.log_stderr {
        logging::init_stderr_logging();
    } else {
        logging::init_file_logging();
    }

    if let Err(e) = run(&cli) {
        error!("{}: {}", e.category(), e);
        eprintln!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = ShellConfig::load_from_file(&config_path)?;
    cli.apply(&mut config);

    let mut shell = Shell::with_config(&config);
    demo::register(&mut shell, &config);

    println!("replkit v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for commands, Ctrl-D to exit.");
    shell.run_as_shell()
}
