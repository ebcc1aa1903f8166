//! Wiring & DI. Entry point: bootstrap the transport, inject into services, serve HTTP.
//! No business logic here.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wa_dispatch::adapters::http::{AppState, build_router};
use wa_dispatch::adapters::whatsapp::{DryRunGateway, WhatsAppBridge};
use wa_dispatch::domain::AttachmentResolver;
use wa_dispatch::ports::{MessagingGateway, MessagingPort, SessionPort};
use wa_dispatch::shared::config::AppConfig;
use wa_dispatch::usecases::{AutoReplyService, Dispatcher, MessageService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    // --- Transport session (one per process, shared by every dispatch) ---
    // Pairing can take arbitrarily long; the API serves meanwhile and sends fail until ready.
    let (gateway, session) = create_transport(&cfg)?;
    let ready_timeout = Duration::from_secs(cfg.bridge_ready_timeout_secs_or_default());
    let readiness = tokio::spawn(watch_readiness(Arc::clone(&session), ready_timeout));

    // --- Services ---
    let resolver = AttachmentResolver::from_current_dir();
    info!(
        root = %resolver.root().display(),
        "attachment root (bare filenames resolve under assets/)"
    );

    let dispatcher = Arc::new(Dispatcher::new(gateway));
    let auto_reply = AutoReplyService::new(
        Arc::clone(&dispatcher),
        &cfg.auto_reply_trigger_or_default(),
        cfg.auto_reply_text(),
    );
    if auto_reply.is_enabled() {
        info!(trigger = %cfg.auto_reply_trigger_or_default(), "auto-reply enabled");
    }

    let messaging: Arc<dyn MessagingPort> =
        Arc::new(MessageService::new(dispatcher, resolver, auto_reply));

    // --- HTTP API ---
    let shared_secret = cfg.shared_secret();
    if shared_secret.is_none() {
        warn!("no shared secret configured; API is open (set BOT_SHARED_SECRET)");
    }
    let app = build_router(AppState::new(messaging, shared_secret));

    let addr = format!("{}:{}", cfg.host_or_default(), cfg.port_or_default());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("bind {}: {}", addr, e))?;
    info!(addr = %addr, "API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutting down");
    readiness.abort();
    if let Err(e) = session.close().await {
        warn!(error = %e, "session close failed");
    }

    Ok(())
}

/// Build the bridge gateway, or the dry-run gateway when no bridge URL is set.
/// Both halves point at the same session object.
fn create_transport(
    cfg: &AppConfig,
) -> anyhow::Result<(Arc<dyn MessagingGateway>, Arc<dyn SessionPort>)> {
    match cfg.bridge_url() {
        Some(url) => {
            info!(url = %url, "using WhatsApp bridge");
            let bridge = Arc::new(
                WhatsAppBridge::new(
                    url,
                    cfg.bridge_token.clone(),
                    Duration::from_secs(cfg.bridge_timeout_secs_or_default()),
                )
                .map_err(|e| anyhow::anyhow!("{}", e))?,
            );
            let session: Arc<dyn SessionPort> = Arc::clone(&bridge) as Arc<dyn SessionPort>;
            let gateway: Arc<dyn MessagingGateway> = bridge;
            Ok((gateway, session))
        }
        None => {
            warn!("WA_DISPATCH_BRIDGE_URL not set, using dry-run gateway (nothing is sent)");
            let dry_run = Arc::new(DryRunGateway::new());
            let session: Arc<dyn SessionPort> = Arc::clone(&dry_run) as Arc<dyn SessionPort>;
            let gateway: Arc<dyn MessagingGateway> = dry_run;
            Ok((gateway, session))
        }
    }
}

/// Log when the session becomes usable. A timeout is reported, not fatal.
async fn watch_readiness(session: Arc<dyn SessionPort>, timeout: Duration) {
    match session.wait_until_ready(timeout).await {
        Ok(()) => info!("messaging session ready"),
        Err(e) => warn!(error = %e, "messaging session not ready; sends fail until it is"),
    }
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
