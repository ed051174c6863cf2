use acctsweep::cli::{self, driver::GlobalOptions};
use acctsweep::reporting::formatter;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }
    debug!(version = %formatter::format_version(), "Starting");

    let global = GlobalOptions {
        settings_path: cli.config.as_deref(),
        quiet: cli.quiet,
    };

    let result = match cli.command {
        cli::Commands::PerProfile(args) => cli::per_profile::handle_per_profile(args, &global).await,
        cli::Commands::Combined(args) => cli::combined::handle_combined(args, &global).await,
    };

    if let Err(e) = result {
        let class = e.classify();
        eprintln!("{} Error: {}", class.marker, e);
        std::process::exit(class.exit_code.max(1));
    }
}
