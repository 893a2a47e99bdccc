//! Background expiry of idle web sessions.
//!
//! A browser that stops sending requests never says goodbye, so sessions
//! idle past `session_idle_timeout_secs` are dropped on a fixed interval.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use calbook_core::session::SessionStore;

/// Spawn the sweep loop. It exits when `cancel` fires.
pub fn spawn_session_sweeper(
    sessions: SessionStore,
    max_idle: Duration,
    every: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let purged = sessions.purge_idle(max_idle);
                    if purged > 0 {
                        tracing::info!(purged, live = sessions.len(), "expired idle sessions");
                    }
                }
            }
        }
        tracing::debug!("session sweeper stopped");
    })
}

/// How often to sweep for a given idle timeout.
pub fn sweep_interval(max_idle: Duration) -> Duration {
    (max_idle / 4).clamp(Duration::from_secs(1), Duration::from_secs(300))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_interval_bounds() {
        assert_eq!(sweep_interval(Duration::from_secs(3600)), Duration::from_secs(300));
        assert_eq!(sweep_interval(Duration::from_secs(40)), Duration::from_secs(10));
        assert_eq!(sweep_interval(Duration::ZERO), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_sweeper_purges_idle_sessions() {
        let sessions = SessionStore::new();
        sessions.create();
        sessions.create();

        let cancel = CancellationToken::new();
        let handle = spawn_session_sweeper(
            sessions.clone(),
            Duration::ZERO,
            Duration::from_millis(10),
            cancel.clone(),
        );

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(sessions.is_empty());

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_sweeper_keeps_active_sessions() {
        let sessions = SessionStore::new();
        sessions.create();

        let cancel = CancellationToken::new();
        let handle = spawn_session_sweeper(
            sessions.clone(),
            Duration::from_secs(3600),
            Duration::from_millis(10),
            cancel.clone(),
        );

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(sessions.len(), 1);

        cancel.cancel();
        handle.await.unwrap();
    }
}
