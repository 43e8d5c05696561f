//! Wire protocol for the trade feed
//!
//! One persistent WebSocket connection carries JSON envelopes in both
//! directions: outbound `Command`s keyed by `cmd`, inbound `FeedEvent`s
//! keyed by `type`. Anything that does not match the envelope is
//! rejected here and silently dropped by the client.

use crate::config::ViewerConfig;
use crate::error::Result;
use async_trait::async_trait;
use feedsocket::{
    ClientEvent, ConnectionState, FeedClient, FeedParser, FeedSocketError, FixedDelay, Metrics,
    WsMessage,
};
use serde::{Deserialize, Serialize};

/// Outbound command envelope: `{"cmd": "...", "symbol": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "cmd", rename_all = "lowercase")]
pub enum Command {
    Subscribe { symbol: String },
    Unsubscribe { symbol: String },
    Ping,
}

impl Command {
    pub fn subscribe(symbol: impl Into<String>) -> Self {
        Command::Subscribe {
            symbol: symbol.into(),
        }
    }

    pub fn unsubscribe(symbol: impl Into<String>) -> Self {
        Command::Unsubscribe {
            symbol: symbol.into(),
        }
    }

    /// Serialize into a text frame
    pub fn to_message(&self) -> Result<WsMessage> {
        Ok(WsMessage::Text(serde_json::to_string(self)?))
    }
}

/// Price payload of a trade event
///
/// The feed has used both field names over time; the first non-null
/// one wins.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TradePayload {
    #[serde(default)]
    pub p: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl TradePayload {
    pub fn value(&self) -> Option<f64> {
        self.p.or(self.price)
    }
}

/// Inbound event envelope, keyed by `type`
///
/// `Status` and `Trade` drive the viewer; the rest are feed
/// acknowledgements that only get logged. Unknown types fail to parse
/// and are dropped by the client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeedEvent {
    /// Upstream connectivity as reported by the feed itself
    Status {
        #[serde(default)]
        connected: bool,
    },
    /// A reported transaction price for a symbol
    Trade { symbol: String, data: TradePayload },
    /// Reply to a ping command
    Pong,
    /// Subscription acknowledged
    Subscribed {
        #[serde(default)]
        symbol: Option<String>,
    },
    /// Unsubscription acknowledged
    Unsubscribed {
        #[serde(default)]
        symbol: Option<String>,
    },
    /// Error reported by the feed
    Error {
        #[serde(default)]
        message: Option<String>,
    },
}

/// Parser turning raw feed frames into `FeedEvent`s
pub struct QuoteParser;

#[async_trait]
impl FeedParser for QuoteParser {
    type Event = FeedEvent;

    async fn parse(&self, message: WsMessage) -> feedsocket::Result<FeedEvent> {
        let text = message
            .as_text()
            .ok_or_else(|| FeedSocketError::ParseError("binary frame".into()))?;

        let event: FeedEvent =
            serde_json::from_str(text).map_err(|e| FeedSocketError::ParseError(e.to_string()))?;

        // A trade without a usable price is as good as malformed
        if let FeedEvent::Trade { ref data, .. } = event {
            if data.value().is_none() {
                return Err(FeedSocketError::ParseError("trade without price".into()));
            }
        }

        Ok(event)
    }
}

/// Seam between the view layer and the stream client
///
/// The viewer only ever subscribes, unsubscribes, polls events, and
/// reads state, so tests can swap the live client for a recording
/// stub.
pub trait FeedLink {
    fn send_subscribe(&self, symbol: &str) -> Result<()>;
    fn send_unsubscribe(&self, symbol: &str) -> Result<()>;
    fn poll_event(&self) -> Option<ClientEvent<FeedEvent>>;
    fn connection_state(&self) -> ConnectionState;
    fn metrics(&self) -> Metrics;
}

impl FeedLink for FeedClient<QuoteParser> {
    fn send_subscribe(&self, symbol: &str) -> Result<()> {
        let message = Command::subscribe(symbol).to_message()?;
        self.subscribe(symbol, message)?;
        Ok(())
    }

    fn send_unsubscribe(&self, symbol: &str) -> Result<()> {
        let message = Command::unsubscribe(symbol).to_message()?;
        self.unsubscribe(symbol, message)?;
        Ok(())
    }

    fn poll_event(&self) -> Option<ClientEvent<FeedEvent>> {
        self.try_recv_event()
    }

    fn connection_state(&self) -> ConnectionState {
        FeedClient::connection_state(self)
    }

    fn metrics(&self) -> Metrics {
        FeedClient::metrics(self)
    }
}

/// Build the feed client for a viewer configuration
///
/// Fixed-delay reconnection with no retry ceiling, a ping probe on
/// every open, and a periodic ping heartbeat while connected.
pub async fn build_feed_client(config: &ViewerConfig) -> Result<FeedClient<QuoteParser>> {
    let probe = Command::Ping.to_message()?;
    let heartbeat = Command::Ping.to_message()?;

    let client = feedsocket::builder()
        .url(config.feed_url.clone())
        .parser(QuoteParser)
        .open_probe(probe)
        .heartbeat(config.heartbeat_interval(), heartbeat)
        .reconnect_strategy(FixedDelay::new(config.reconnect_delay(), None))
        .build()
        .await?;

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_serialize_to_the_wire_envelope() {
        let sub = serde_json::to_string(&Command::subscribe("AAPL")).unwrap();
        assert_eq!(sub, r#"{"cmd":"subscribe","symbol":"AAPL"}"#);

        let unsub = serde_json::to_string(&Command::unsubscribe("AAPL")).unwrap();
        assert_eq!(unsub, r#"{"cmd":"unsubscribe","symbol":"AAPL"}"#);

        let ping = serde_json::to_string(&Command::Ping).unwrap();
        assert_eq!(ping, r#"{"cmd":"ping"}"#);
    }

    #[tokio::test]
    async fn parses_status_events() {
        let parser = QuoteParser;

        let event = parser
            .parse(WsMessage::Text(
                r#"{"type":"status","connected":true}"#.into(),
            ))
            .await
            .unwrap();
        assert_eq!(event, FeedEvent::Status { connected: true });

        let event = parser
            .parse(WsMessage::Text(
                r#"{"type":"status","connected":false}"#.into(),
            ))
            .await
            .unwrap();
        assert_eq!(event, FeedEvent::Status { connected: false });
    }

    #[tokio::test]
    async fn parses_trades_from_either_price_field() {
        let parser = QuoteParser;

        let event = parser
            .parse(WsMessage::Text(
                r#"{"type":"trade","symbol":"AAPL","data":{"p":191.5}}"#.into(),
            ))
            .await
            .unwrap();
        match event {
            FeedEvent::Trade { symbol, data } => {
                assert_eq!(symbol, "AAPL");
                assert_eq!(data.value(), Some(191.5));
            }
            other => panic!("expected trade, got {:?}", other),
        }

        let event = parser
            .parse(WsMessage::Text(
                r#"{"type":"trade","symbol":"MSFT","data":{"price":410.0}}"#.into(),
            ))
            .await
            .unwrap();
        match event {
            FeedEvent::Trade { data, .. } => assert_eq!(data.value(), Some(410.0)),
            other => panic!("expected trade, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn first_non_null_price_field_wins() {
        let parser = QuoteParser;

        let event = parser
            .parse(WsMessage::Text(
                r#"{"type":"trade","symbol":"AAPL","data":{"p":1.0,"price":2.0}}"#.into(),
            ))
            .await
            .unwrap();
        match event {
            FeedEvent::Trade { data, .. } => assert_eq!(data.value(), Some(1.0)),
            other => panic!("expected trade, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn trade_without_price_is_rejected() {
        let parser = QuoteParser;

        let result = parser
            .parse(WsMessage::Text(
                r#"{"type":"trade","symbol":"AAPL","data":{}}"#.into(),
            ))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn unknown_type_and_malformed_json_are_rejected() {
        let parser = QuoteParser;

        assert!(parser
            .parse(WsMessage::Text(r#"{"type":"quoteburst"}"#.into()))
            .await
            .is_err());
        assert!(parser
            .parse(WsMessage::Text("not json at all".into()))
            .await
            .is_err());
        assert!(parser.parse(WsMessage::Binary(vec![0, 1, 2])).await.is_err());
    }

    #[tokio::test]
    async fn parses_feed_acknowledgements() {
        let parser = QuoteParser;

        let event = parser
            .parse(WsMessage::Text(r#"{"type":"pong"}"#.into()))
            .await
            .unwrap();
        assert_eq!(event, FeedEvent::Pong);

        let event = parser
            .parse(WsMessage::Text(
                r#"{"type":"subscribed","symbol":"AAPL"}"#.into(),
            ))
            .await
            .unwrap();
        assert_eq!(
            event,
            FeedEvent::Subscribed {
                symbol: Some("AAPL".into())
            }
        );

        let event = parser
            .parse(WsMessage::Text(
                r#"{"type":"error","message":"unknown command"}"#.into(),
            ))
            .await
            .unwrap();
        assert_eq!(
            event,
            FeedEvent::Error {
                message: Some("unknown command".into())
            }
        );
    }
}
