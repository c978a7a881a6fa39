pub mod states;

use crate::client::WebSocketClient;
use crate::config::ClientConfig;
use crate::traits::*;
use states::*;
use std::collections::HashMap;
use std::thread::JoinHandle;

/// Type-state builder for WebSocketClient with routing
///
/// URL and router must both be set before `build()` becomes available.
/// Handlers are registered per route key inside the `router()` closure.
pub struct WebSocketClientBuilder<U, Ro>
where
    U: UrlState,
    Ro: RouterState,
{
    url: U,
    router: Ro,
}

impl WebSocketClientBuilder<NoUrl, NoRouter> {
    /// Create a new builder instance
    pub fn new() -> Self {
        Self {
            url: NoUrl,
            router: NoRouter,
        }
    }
}

impl Default for WebSocketClientBuilder<NoUrl, NoRouter> {
    fn default() -> Self {
        Self::new()
    }
}

// URL setting
impl<Ro> WebSocketClientBuilder<NoUrl, Ro>
where
    Ro: RouterState,
{
    pub fn url(self, url: impl Into<String>) -> WebSocketClientBuilder<HasUrl, Ro> {
        WebSocketClientBuilder {
            url: HasUrl(url.into()),
            router: self.router,
        }
    }
}

/// Routing builder helper
///
/// Collects one handler per route key. Registering a key twice replaces the
/// earlier handler.
pub struct RoutingBuilder<R>
where
    R: MessageRouter,
{
    handlers: HashMap<R::RouteKey, Box<dyn MessageHandler<R::Message>>>,
}

impl<R> RoutingBuilder<R>
where
    R: MessageRouter,
{
    fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Add a handler for a specific route key
    pub fn handler<H>(mut self, route_key: R::RouteKey, handler: H) -> Self
    where
        H: MessageHandler<R::Message>,
    {
        self.handlers.insert(route_key, Box::new(handler));
        self
    }

    /// Spawn one handler thread per route key.
    ///
    /// Each thread drains its channel until every sender is dropped, so
    /// messages already routed are still handled during shutdown.
    fn spawn(
        self,
    ) -> Result<(
        HashMap<R::RouteKey, crossbeam_channel::Sender<R::Message>>,
        Vec<JoinHandle<()>>,
    )> {
        let mut senders = HashMap::new();
        let mut handles = Vec::new();

        for (route_key, mut handler) in self.handlers {
            let (sender, receiver) = crossbeam_channel::unbounded::<R::Message>();
            senders.insert(route_key.clone(), sender);

            let thread_name = format!("ws-handler-{:?}", route_key).to_lowercase();
            let handle = std::thread::Builder::new()
                .name(thread_name)
                .spawn(move || {
                    for message in receiver.iter() {
                        if let Err(e) = handler.handle(message) {
                            tracing::error!("Handler error for route {:?}: {}", route_key, e);
                        }
                    }
                    tracing::debug!("Handler channel closed for route {:?}, thread exiting", route_key);
                })
                .map_err(|e| HyperSocketError::Configuration(format!("Failed to spawn handler thread: {}", e)))?;

            handles.push(handle);
        }

        Ok((senders, handles))
    }
}

// Router setting
impl<U> WebSocketClientBuilder<U, NoRouter>
where
    U: UrlState,
{
    pub fn router<R, F>(self, router: R, configure_routing: F) -> WebSocketClientBuilder<U, HasRouter<R>>
    where
        R: MessageRouter,
        F: FnOnce(RoutingBuilder<R>) -> RoutingBuilder<R>,
    {
        let routing = configure_routing(RoutingBuilder::new());

        WebSocketClientBuilder {
            url: self.url,
            router: HasRouter { router, routing },
        }
    }
}

// Build method - only available when all required fields are set
impl<R> WebSocketClientBuilder<HasUrl, HasRouter<R>>
where
    R: MessageRouter,
{
    /// Spawn handler threads and the I/O task.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn build(self) -> Result<WebSocketClient<R>> {
        let HasUrl(url) = self.url;
        let HasRouter { router, routing } = self.router;

        if !(url.starts_with("ws://") || url.starts_with("wss://")) {
            return Err(HyperSocketError::Configuration(format!(
                "WebSocket URL must start with ws:// or wss://, got '{}'",
                url
            )));
        }

        let (route_senders, handler_handles) = routing.spawn()?;

        let config = ClientConfig {
            url,
            router,
            route_senders,
        };

        Ok(WebSocketClient::new(config, handler_handles))
    }
}
