use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use coordfs_cli::{main_with, Args};

fn main() {
    let args = Args::parse();

    // Logs go to stderr; stdout carries only the response body
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let code = main_with(&args, &mut std::io::stdout().lock(), &mut std::io::stderr().lock());
    std::process::exit(code);
}
