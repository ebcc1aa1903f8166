//! Implements MessagingGateway and SessionPort over the WhatsApp Web bridge HTTP API.
//!
//! The bridge is a sidecar that owns the browser session. Endpoints:
//! `GET /status`, `POST /messages/text`, `POST /messages/media`, `POST /session/close`.

use crate::adapters::whatsapp::media::MediaPayload;
use crate::domain::{Address, DomainError};
use crate::ports::{MessagingGateway, SessionPort};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Delay between readiness polls while waiting for the session.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Bridge adapter. Holds one HTTP client; the session itself lives in the sidecar.
pub struct WhatsAppBridge {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    poll_interval: Duration,
}

#[derive(Debug, Deserialize)]
pub struct BridgeStatus {
    pub ready: bool,
    #[serde(default)]
    pub state: Option<String>,
    /// Pairing code to scan when the session is not yet authenticated.
    #[serde(default)]
    pub qr: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TextBody<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MediaBody<'a> {
    chat_id: &'a str,
    caption: &'a str,
    media: MediaPayload,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl WhatsAppBridge {
    /// Create the adapter.
    ///
    /// # Arguments
    /// * `base_url` - Bridge root URL (e.g. "http://127.0.0.1:3100")
    /// * `token` - Optional bearer token the bridge expects
    /// * `timeout` - Per-request timeout
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Session(format!("build http client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Fetch the session status from the bridge.
    pub async fn status(&self) -> Result<BridgeStatus, DomainError> {
        let res = self
            .authorized(self.client.get(self.url("/status")))
            .send()
            .await
            .map_err(|e| DomainError::Session(format!("status request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(DomainError::Session(error_message(status, &text)));
        }

        res.json()
            .await
            .map_err(|e| DomainError::Session(format!("parse status: {}", e)))
    }

    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<(), DomainError> {
        let res = self
            .authorized(self.client.post(self.url(path)))
            .json(body)
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("bridge request failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(DomainError::Transport(error_message(status, &text)));
        }
        Ok(())
    }
}

/// Prefer the bridge's own `{"error": "..."}` message; fall back to status + body.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(e) => e.error,
        Err(_) => format!(
            "bridge returned {}: {}",
            status,
            body.chars().take(200).collect::<String>()
        ),
    }
}

#[async_trait]
impl MessagingGateway for WhatsAppBridge {
    async fn send_text(&self, address: &Address, text: &str) -> Result<(), DomainError> {
        let body = TextBody {
            chat_id: address.as_str(),
            text,
        };
        self.post("/messages/text", &body).await?;
        debug!(to = %address, "text sent via bridge");
        Ok(())
    }

    async fn send_media(
        &self,
        address: &Address,
        path: &Path,
        caption: &str,
    ) -> Result<(), DomainError> {
        let media = MediaPayload::from_file(path).await?;
        let body = MediaBody {
            chat_id: address.as_str(),
            caption,
            media,
        };
        self.post("/messages/media", &body).await?;
        debug!(to = %address, path = %path.display(), "media sent via bridge");
        Ok(())
    }
}

#[async_trait]
impl SessionPort for WhatsAppBridge {
    async fn wait_until_ready(&self, timeout: Duration) -> Result<(), DomainError> {
        // Too large to represent means no deadline.
        let deadline = Instant::now().checked_add(timeout);
        let mut qr_logged = false;

        loop {
            match self.status().await {
                Ok(status) if status.ready => {
                    info!(state = ?status.state, "WhatsApp session ready");
                    return Ok(());
                }
                Ok(status) => {
                    if status.qr.is_some() && !qr_logged {
                        warn!("WhatsApp session not paired; scan the QR code shown by the bridge");
                        qr_logged = true;
                    }
                    debug!(state = ?status.state, "waiting for WhatsApp session");
                }
                Err(e) => debug!(error = %e, "bridge not reachable yet"),
            }

            if deadline.is_some_and(|d| Instant::now() >= d) {
                return Err(DomainError::Session(format!(
                    "bridge at {} not ready after {:?}",
                    self.base_url, timeout
                )));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn close(&self) -> Result<(), DomainError> {
        self.post("/session/close", &serde_json::json!({}))
            .await
            .map_err(|e| DomainError::Session(e.to_string()))?;
        info!("WhatsApp session closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{normalize, resolve_address};
    use mockito::Matcher;
    use std::io::Write;

    fn address() -> Address {
        resolve_address(&normalize("91234567").unwrap())
    }

    fn bridge(url: String, token: Option<&str>) -> WhatsAppBridge {
        WhatsAppBridge::new(url, token.map(String::from), Duration::from_secs(5))
            .unwrap()
            .with_poll_interval(Duration::from_millis(10))
    }

    #[tokio::test]
    async fn test_send_text_posts_chat_id_and_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/messages/text")
            .match_header("authorization", "Bearer secret")
            .match_body(Matcher::Json(serde_json::json!({
                "chatId": "85291234567@c.us",
                "text": "hello"
            })))
            .with_status(200)
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        bridge(server.url(), Some("secret"))
            .send_text(&address(), "hello")
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_text_error_uses_bridge_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/messages/text")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"Session closed"}"#)
            .create_async()
            .await;

        let err = bridge(server.url(), None)
            .send_text(&address(), "hello")
            .await
            .unwrap_err();

        assert_eq!(err, DomainError::Transport("Session closed".into()));
    }

    #[tokio::test]
    async fn test_send_text_error_without_json_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/messages/text")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let err = bridge(server.url(), None)
            .send_text(&address(), "hello")
            .await
            .unwrap_err();

        let DomainError::Transport(msg) = err else {
            panic!("expected transport error");
        };
        assert!(msg.contains("502"));
        assert!(msg.contains("bad gateway"));
    }

    #[tokio::test]
    async fn test_send_media_posts_payload() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"png-bytes").unwrap();

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/messages/media")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "chatId": "85291234567@c.us",
                "caption": "poster",
                "media": { "mimetype": "image/png" }
            })))
            .with_status(200)
            .create_async()
            .await;

        bridge(server.url(), None)
            .send_media(&address(), file.path(), "poster")
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_media_missing_file_never_calls_bridge() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/messages/media")
            .expect(0)
            .create_async()
            .await;

        let err = bridge(server.url(), None)
            .send_media(&address(), Path::new("/nonexistent/pic.png"), "x")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::Transport("file not found: /nonexistent/pic.png".into())
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_wait_until_ready() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/status")
            .with_status(200)
            .with_body(r#"{"ready":true,"state":"CONNECTED"}"#)
            .create_async()
            .await;

        bridge(server.url(), None)
            .wait_until_ready(Duration::from_secs(1))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_wait_until_ready_times_out() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/status")
            .with_status(200)
            .with_body(r#"{"ready":false,"qr":"2@abc"}"#)
            .expect_at_least(1)
            .create_async()
            .await;

        let err = bridge(server.url(), None)
            .wait_until_ready(Duration::from_millis(50))
            .await
            .unwrap_err();

        let DomainError::Session(msg) = err else {
            panic!("expected session error");
        };
        assert!(msg.ends_with("not ready after 50ms"), "{msg}");
    }

    #[tokio::test]
    async fn test_wait_until_ready_huge_timeout_keeps_polling() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/status")
            .with_status(200)
            .with_body(r#"{"ready":false,"qr":"2@abc"}"#)
            .expect_at_least(2)
            .create_async()
            .await;
        let bridge = bridge(server.url(), None);

        let waited = tokio::time::timeout(
            Duration::from_millis(200),
            bridge.wait_until_ready(Duration::from_secs(u64::MAX)),
        )
        .await;

        assert!(waited.is_err(), "still waiting for pairing");
    }

    #[tokio::test]
    async fn test_close() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/session/close")
            .with_status(200)
            .create_async()
            .await;

        bridge(format!("{}/", server.url()), None).close().await.unwrap();

        mock.assert_async().await;
    }
}
