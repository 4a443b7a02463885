use crate::config::Config;
use crate::error::Result;
use crate::provider::ProviderRegistry;
use crate::server::http;
use crate::server::Dispatcher;
use colored::*;
use std::sync::Arc;
use tracing::warn;

/// HTTP 서버 시작 (Ctrl-C까지 실행)
pub async fn start_server(config: &Config) -> Result<()> {
    let registry = ProviderRegistry::from_config(&config.providers);

    if registry.get(&config.default_provider).is_none() {
        warn!(
            default_provider = %config.default_provider,
            "default provider is not registered; requests without a provider will be rejected"
        );
    }

    eprintln!(
        "{} Providers: {}",
        "[>>]".cyan().bold(),
        registry.names().join(", ")
    );

    let dispatcher = Arc::new(Dispatcher::new(
        Arc::new(registry),
        config.default_provider.clone(),
    ));

    let listener = http::bind(&config.bind_addr()).await?;
    eprintln!(
        "{} Server started on http://{}",
        "[OK]".green().bold(),
        listener.local_addr()?
    );
    eprintln!("  Default provider: {}", config.default_provider);

    http::serve(listener, dispatcher, shutdown_signal()).await?;

    eprintln!("{} Server stopped.", "[BYE]".cyan());
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
}
