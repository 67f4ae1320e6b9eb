use std::time::Duration;

use reqwest::Client;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// Ping `url` every `interval` until the task is aborted
///
/// Keeps free-tier hosts from idling the process out. Failures are logged
/// and never stop the loop.
pub fn spawn_keep_alive(url: String, interval: Duration) -> JoinHandle<()> {
    info!(%url, seconds = interval.as_secs(), "Starting keep-alive pinger");

    tokio::spawn(async move {
        let client = Client::new();
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the server is obviously up then
        ticker.tick().await;

        loop {
            ticker.tick().await;
            ping_once(&client, &url).await;
        }
    })
}

/// Issue a single keep-alive request, returning the status code if one arrived
pub async fn ping_once(client: &Client, url: &str) -> Option<u16> {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            info!(status, "Keep-alive ping");
            Some(status)
        }
        Err(e) => {
            warn!("Keep-alive ping failed: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ping_local_server() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = crate::server::build_router(crate::server::AppState::new(Default::default()));
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::new();
        let url = format!("http://{addr}{}", crate::server::HEALTHZ_PATH);

        assert_eq!(ping_once(&client, &url).await, Some(200));
    }

    #[tokio::test]
    async fn test_keep_alive_pings_each_interval() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let app = axum::Router::new().route(
            "/ping",
            axum::routing::get(move || {
                let tx = tx.clone();
                async move {
                    let _ = tx.send(());
                    "ok"
                }
            }),
        );
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let handle = spawn_keep_alive(format!("http://{addr}/ping"), Duration::from_millis(50));

        // Two consecutive ticks reach the listener
        for _ in 0..2 {
            tokio::time::timeout(Duration::from_secs(5), rx.recv())
                .await
                .expect("keep-alive should ping within the timeout")
                .unwrap();
        }
        handle.abort();
    }

    #[tokio::test]
    async fn test_ping_invalid_url_is_not_fatal() {
        let client = Client::new();
        assert_eq!(ping_once(&client, "not a url").await, None);
    }
}
