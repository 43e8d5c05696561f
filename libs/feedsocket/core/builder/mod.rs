pub mod states;

use crate::client::FeedClient;
use crate::config::ClientConfig;
use crate::traits::*;
use states::*;
use std::marker::PhantomData;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

/// Default reconnect delay applied when no strategy is configured
pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// Type-state builder for FeedClient
///
/// This builder uses Rust's type system to enforce that required
/// fields (URL and parser) are set before the client can be built.
pub struct FeedClientBuilder<U, Pa, P>
where
    U: UrlState,
    Pa: ParserState,
{
    _state: TypeState<U, Pa>,
    _parser_type: PhantomData<P>,
    url: Option<String>,
    parser: Option<P>,
    open_probe: Option<WsMessage>,
    heartbeat: Option<(Duration, WsMessage)>,
    reconnect_strategy: Option<Box<dyn ReconnectionStrategy>>,
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl FeedClientBuilder<NoUrl, NoParser, ()> {
    /// Create a new builder instance
    pub fn new() -> Self {
        Self {
            _state: TypeState::new(),
            _parser_type: PhantomData,
            url: None,
            parser: None,
            open_probe: None,
            heartbeat: None,
            reconnect_strategy: None,
            shutdown_flag: None,
        }
    }
}

impl Default for FeedClientBuilder<NoUrl, NoParser, ()> {
    fn default() -> Self {
        Self::new()
    }
}

// URL setting
impl<Pa, P> FeedClientBuilder<NoUrl, Pa, P>
where
    Pa: ParserState,
{
    pub fn url(self, url: impl Into<String>) -> FeedClientBuilder<HasUrl, Pa, P> {
        FeedClientBuilder {
            _state: TypeState::new(),
            _parser_type: PhantomData,
            url: Some(url.into()),
            parser: self.parser,
            open_probe: self.open_probe,
            heartbeat: self.heartbeat,
            reconnect_strategy: self.reconnect_strategy,
            shutdown_flag: self.shutdown_flag,
        }
    }
}

// Parser setting
impl<U> FeedClientBuilder<U, NoParser, ()>
where
    U: UrlState,
{
    pub fn parser<NewP>(self, parser: NewP) -> FeedClientBuilder<U, HasParser, NewP>
    where
        NewP: FeedParser,
    {
        FeedClientBuilder {
            _state: TypeState::new(),
            _parser_type: PhantomData,
            url: self.url,
            parser: Some(parser),
            open_probe: self.open_probe,
            heartbeat: self.heartbeat,
            reconnect_strategy: self.reconnect_strategy,
            shutdown_flag: self.shutdown_flag,
        }
    }
}

// Optional configuration methods
impl<U, P> FeedClientBuilder<U, HasParser, P>
where
    U: UrlState,
    P: FeedParser,
{
    /// Message sent immediately on every transition to Open
    pub fn open_probe(mut self, message: WsMessage) -> Self {
        self.open_probe = Some(message);
        self
    }

    /// Periodic payload sent while a connection is open
    pub fn heartbeat(mut self, interval: Duration, payload: WsMessage) -> Self {
        self.heartbeat = Some((interval, payload));
        self
    }

    /// Reconnection strategy (defaults to a fixed 2-second delay,
    /// unlimited attempts)
    pub fn reconnect_strategy(mut self, strategy: impl ReconnectionStrategy + 'static) -> Self {
        self.reconnect_strategy = Some(Box::new(strategy));
        self
    }

    /// Share an externally owned shutdown flag (true = keep running)
    pub fn shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }
}

// Build - only available when both URL and parser are set
impl<P> FeedClientBuilder<HasUrl, HasParser, P>
where
    P: FeedParser,
{
    /// Build the client and spawn its connection task
    pub async fn build(self) -> Result<FeedClient<P>> {
        let url = self
            .url
            .ok_or_else(|| FeedSocketError::Configuration("URL not set".into()))?;
        let parser = self
            .parser
            .ok_or_else(|| FeedSocketError::Configuration("Parser not set".into()))?;

        let config = ClientConfig {
            url,
            parser: Arc::new(parser),
            open_probe: self.open_probe,
            heartbeat: self.heartbeat,
            reconnect_strategy: self
                .reconnect_strategy
                .unwrap_or_else(|| Box::new(FixedDelay::new(DEFAULT_RECONNECT_DELAY, None))),
            shutdown_flag: self
                .shutdown_flag
                .unwrap_or_else(|| Arc::new(AtomicBool::new(true))),
        };

        FeedClient::new(config).await
    }
}
