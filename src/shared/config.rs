//! Application configuration. Listener, shared secret, bridge connection, auto-reply.

use serde::Deserialize;

/// Default HTTP port (also read from the legacy `PORT` variable).
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Bind address. Read from WA_DISPATCH_HOST.
    #[serde(default)]
    pub host: Option<String>,

    /// Listen port. Read from WA_DISPATCH_PORT or PORT.
    #[serde(default)]
    pub port: Option<u16>,

    /// Shared secret expected in `X-API-KEY`. Read from WA_DISPATCH_SHARED_SECRET or BOT_SHARED_SECRET.
    #[serde(default)]
    pub shared_secret: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // WhatsApp Bridge Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// Bridge base URL. Unset means dry-run. Read from WA_DISPATCH_BRIDGE_URL.
    #[serde(default)]
    pub bridge_url: Option<String>,

    /// Bearer token for the bridge. Read from WA_DISPATCH_BRIDGE_TOKEN.
    #[serde(default)]
    pub bridge_token: Option<String>,

    /// Per-request timeout towards the bridge (default 30).
    #[serde(default)]
    pub bridge_timeout_secs: Option<u64>,

    /// How long to watch for the session at startup before warning (default 120).
    /// The API serves regardless; a huge value means watch forever.
    #[serde(default)]
    pub bridge_ready_timeout_secs: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // Auto-reply Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// Inbound text that triggers the reply (default "hi").
    #[serde(default)]
    pub auto_reply_trigger: Option<String>,

    /// Reply text. Unset disables auto-reply.
    #[serde(default)]
    pub auto_reply_text: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("WA_DISPATCH").try_parsing(true));
        if let Ok(path) = std::env::var("WA_DISPATCH_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // PORT and BOT_SHARED_SECRET are read directly (no prefix) so existing deployments keep working
        if cfg.port.is_none() {
            if let Ok(s) = std::env::var("PORT") {
                if let Ok(port) = s.parse::<u16>() {
                    cfg.port = Some(port);
                }
            }
        }
        if cfg.shared_secret.is_none() {
            if let Ok(secret) = std::env::var("BOT_SHARED_SECRET") {
                cfg.shared_secret = Some(secret);
            }
        }
        Ok(cfg)
    }

    /// Returns the bind address. Defaults to 0.0.0.0.
    pub fn host_or_default(&self) -> String {
        self.host.clone().unwrap_or_else(|| "0.0.0.0".to_string())
    }

    /// Returns the listen port. Defaults to DEFAULT_PORT.
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Returns the shared secret if one is configured and non-empty.
    pub fn shared_secret(&self) -> Option<String> {
        self.shared_secret.clone().filter(|s| !s.is_empty())
    }

    /// Returns the bridge URL if configured and non-empty.
    pub fn bridge_url(&self) -> Option<String> {
        self.bridge_url.clone().filter(|s| !s.trim().is_empty())
    }

    /// Returns the per-request bridge timeout in seconds. Defaults to 30.
    pub fn bridge_timeout_secs_or_default(&self) -> u64 {
        self.bridge_timeout_secs.unwrap_or(30)
    }

    /// Returns the startup readiness timeout in seconds. Defaults to 120.
    pub fn bridge_ready_timeout_secs_or_default(&self) -> u64 {
        self.bridge_ready_timeout_secs.unwrap_or(120)
    }

    /// Returns the auto-reply trigger. Defaults to "hi".
    pub fn auto_reply_trigger_or_default(&self) -> String {
        self.auto_reply_trigger
            .clone()
            .unwrap_or_else(|| "hi".to_string())
    }

    /// Returns the auto-reply text if configured and non-empty.
    pub fn auto_reply_text(&self) -> Option<String> {
        self.auto_reply_text.clone().filter(|s| !s.is_empty())
    }
}
