use clap::{Parser, Subcommand};
use colored::Colorize;
use profilarr_lib::{HttpBackend, config::ClientConfig, page::Page};
use sysexits::ExitCode;
use tracing_subscriber::EnvFilter;

mod format;
mod profile;
mod status;

#[derive(Parser, Debug)]
#[command(name = "profilarr")]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Override the configured backend URL
    #[arg(short, long, global = true)]
    backend_url: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Operate on profiles
    #[command(subcommand)]
    Profile(profile::Command),
    /// Operate on custom formats
    #[command(subcommand)]
    Format(format::Command),
    /// Show whether merge conflicts lock the profiles
    Status,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    human_panic::setup_panic!();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let backend_url = match cli.backend_url {
        Some(url) => url,
        None => match ClientConfig::load() {
            Ok(cfg) => cfg.backend_url,
            Err(err) => {
                eprintln!("{} {err}", "error:".red().bold());
                return ExitCode::Config;
            }
        },
    };

    let backend = match HttpBackend::new(&backend_url) {
        Ok(backend) => backend,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            return ExitCode::Usage;
        }
    };

    let mut page = Page::new();

    match &cli.command {
        Command::Profile(cmd) => profile::handle(&mut page, &backend, cmd).await,
        Command::Format(cmd) => format::handle(&mut page, &backend, cmd).await,
        Command::Status => status::handle(&mut page, &backend).await,
    }
}
