//! flk - link free-text names to the best matching file in a catalog

use anyhow::Result;
use clap::Parser;
use filelinker::cli::{Cli, Command};
use filelinker::commands;
use filelinker::config::{load_config, AppConfig};
use filelinker::linker::FsLinker;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    setup_tracing(cli.verbose);

    // Handle color settings
    if cli.no_color {
        owo_colors::set_override(false);
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: &Cli) -> filelinker::error::Result<()> {
    if let Command::Completions(args) = &cli.command {
        generate_completions(args.shell);
        return Ok(());
    }

    let config = effective_config(cli)?;
    if !config.colors {
        owo_colors::set_override(false);
    }
    let output = cli.output;

    match &cli.command {
        Command::Normalize(args) => commands::run_normalize(&args.names, config.normalizer, output),
        Command::Score(args) => commands::run_score(&args.a, &args.b, config.normalizer, output),
        Command::Resolve(args) => {
            let linker = FsLinker::from_config(&config)?;
            commands::run_resolve(&linker, args, output)
        }
        Command::Rebuild => commands::run_rebuild(&FsLinker::from_config(&config)?, output),
        Command::Invalidate => commands::run_invalidate(&FsLinker::from_config(&config)?, output),
        Command::Status => commands::run_status(&FsLinker::from_config(&config)?, output),
        Command::List => commands::run_list(&FsLinker::from_config(&config)?, output),
        Command::Completions(_) => Ok(()),
    }
}

fn effective_config(cli: &Cli) -> filelinker::error::Result<AppConfig> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(base_dir) = &cli.base_dir {
        config.base_dir = Some(base_dir.clone());
    }
    Ok(config)
}

fn setup_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;

    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "flk", &mut std::io::stdout());
}
