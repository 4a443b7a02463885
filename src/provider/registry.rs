use crate::config::ProvidersConfig;
use crate::provider::{ClaudeProvider, CliProvider, CodexProvider, GeminiProvider};
use indexmap::IndexMap;
use std::sync::Arc;

/// Catalog of CLI providers keyed by name
///
/// Built once at startup and shared read-only behind an `Arc`. Enumeration
/// follows registration order.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: IndexMap<String, Arc<dyn CliProvider>>,
}

impl ProviderRegistry {
    /// Registry with the built-in providers (claude, gemini, codex)
    pub fn new() -> Self {
        Self::from_config(&ProvidersConfig::default())
    }

    /// Registry with no providers
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in providers with command overrides and timeouts applied
    pub fn from_config(config: &ProvidersConfig) -> Self {
        let mut registry = Self::empty();

        registry.register(
            ClaudeProvider::with_command(config.claude.command_or("claude"))
                .with_timeout(config.claude.timeout()),
        );
        registry.register(
            GeminiProvider::with_command(config.gemini.command_or("gemini"))
                .with_timeout(config.gemini.timeout()),
        );
        registry.register(
            CodexProvider::with_command(config.codex.command_or("codex"))
                .with_timeout(config.codex.timeout()),
        );

        registry
    }

    /// Insert or replace a provider under its own name.
    ///
    /// A replaced entry keeps its original position.
    pub fn register<P: CliProvider + 'static>(&mut self, provider: P) {
        self.register_arc(Arc::new(provider));
    }

    pub fn register_arc(&mut self, provider: Arc<dyn CliProvider>) {
        let name = provider.name().to_string();
        if self.providers.insert(name.clone(), provider).is_some() {
            tracing::debug!(provider = %name, "replaced registered provider");
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn CliProvider>> {
        self.providers.get(name).cloned()
    }

    /// Independent copy of the current registrations
    pub fn list_all(&self) -> IndexMap<String, Arc<dyn CliProvider>> {
        self.providers.clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
