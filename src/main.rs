use std::io;
use std::process;

use clap::Parser;
use textbook_rsa::config::Config;

fn init_logging() {
    // RUST_LOG overrides the default filter; logs go to stderr so the
    // transcript on stdout stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "textbook_rsa=warn".into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    init_logging();
    let config = Config::parse();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    if let Err(e) = textbook_rsa::cli::run(&config, &mut input, &mut output) {
        eprintln!("Error running application: {:#}", e);
        process::exit(1);
    }
}
