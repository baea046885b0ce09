use clap::Parser;
use tracing_subscriber::EnvFilter;

use json_kit::cli::{self, Cli};

fn main() {
    init_tracing();
    let cli = Cli::parse();
    match cli::run(cli) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("json-kit: {err}");
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
