use anyhow::Result;
use askbridge::cli::{prompt_text, Cli, Commands};
use askbridge::client::BridgeClient;
use askbridge::commands;
use askbridge::config::Config;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let load_config = || -> Result<Config> {
        let config = Config::load_from(&config_path)?;
        debug!(path = %config_path.display(), ?config, "configuration loaded");
        Ok(config)
    };

    match cli.command {
        Commands::InitConfig { force } => {
            commands::init_config(&config_path, force)?;
        }
        Commands::Serve { host, port, default_provider } => {
            let mut config = load_config()?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(provider) = default_provider {
                config.default_provider = provider;
            }
            commands::start_server(&config).await?;
        }
        Commands::Ask { prompt, provider, url } => {
            let config = load_config()?;
            let client = BridgeClient::new(url.unwrap_or(config.api_url));
            let succeeded = commands::ask_once(&client, &prompt_text(&prompt), provider.as_deref()).await?;
            if !succeeded {
                std::process::exit(1);
            }
        }
        Commands::Providers { url } => {
            let config = load_config()?;
            let client = BridgeClient::new(url.unwrap_or(config.api_url));
            commands::list_providers(&client).await?;
        }
        Commands::Interactive { provider, url } => {
            let config = load_config()?;
            let client = BridgeClient::new(url.unwrap_or(config.api_url));
            commands::interactive(&client, provider.as_deref()).await?;
        }
    }

    Ok(())
}

/// 로그 초기화 (-v 횟수 우선, 없으면 RUST_LOG, 기본 warn)
fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
