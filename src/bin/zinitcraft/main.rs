use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use zinitcraft::CraftArgs;

fn main() {
    let args = CraftArgs::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("zinitcraft={level},warn")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let builder = args.builder();
    let action = args.into_action();

    builder.handle_and_print(&action).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });
}
