//! Lazily constructed, shared Okta client.
//!
//! The server is built and its tools registered before any credential is
//! looked at. The first tool call that needs Okta loads configuration and
//! builds the client; every later call gets the same [`ClientHandle`].
//!
//! Construction sits behind a [`tokio::sync::OnceCell`], so concurrent first
//! callers wait for a single initialization. A failed attempt leaves the cell
//! empty and the next call starts over, which lets an operator fix the
//! environment without restarting the process.

use crate::config::OktaConfig;
use crate::error::{ConfigResult, OktaMcpError, OktaResult};
use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Shared handle to a constructed client.
pub type ClientHandle<C> = Arc<C>;

/// Where configuration comes from on first access.
pub trait ConfigSource: Send + Sync {
    fn load(&self) -> ConfigResult<OktaConfig>;
}

/// Reads the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvConfigSource;

impl ConfigSource for EnvConfigSource {
    fn load(&self) -> ConfigResult<OktaConfig> {
        OktaConfig::from_env()
    }
}

/// A fixed, already validated configuration.
impl ConfigSource for OktaConfig {
    fn load(&self) -> ConfigResult<OktaConfig> {
        Ok(self.clone())
    }
}

impl<F> ConfigSource for F
where
    F: Fn() -> ConfigResult<OktaConfig> + Send + Sync,
{
    fn load(&self) -> ConfigResult<OktaConfig> {
        self()
    }
}

/// Turns configuration into a ready client.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    type Client: Send + Sync + 'static;

    async fn connect(&self, config: OktaConfig) -> OktaResult<Self::Client>;
}

/// Memoized client constructor.
pub struct LazyClient<F: ClientFactory> {
    source: Box<dyn ConfigSource>,
    factory: F,
    cell: OnceCell<ClientHandle<F::Client>>,
}

impl<F: ClientFactory> LazyClient<F> {
    pub fn new(source: impl ConfigSource + 'static, factory: F) -> Self {
        Self {
            source: Box::new(source),
            factory,
            cell: OnceCell::new(),
        }
    }

    /// Return the shared client, building it on first use.
    ///
    /// # Errors
    ///
    /// Configuration and construction errors are returned unchanged and are
    /// not cached.
    pub async fn get_client(&self) -> OktaResult<ClientHandle<F::Client>> {
        self.cell
            .get_or_try_init(|| async {
                debug!("Initializing Okta client on first use");
                let config = self.source.load().inspect_err(|e| {
                    warn!("Okta client initialization failed: {e}");
                })?;
                let client = self.factory.connect(config).await?;
                Ok::<_, OktaMcpError>(Arc::new(client))
            })
            .await
            .map(Arc::clone)
    }

    /// Whether a client has been constructed.
    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}
