//! TTL Cleanup Task
//!
//! Background task that periodically sweeps expired records out of every
//! table and the session cache. Correctness never depends on it: each
//! store operation sweeps on access. The task only keeps long-idle
//! processes from holding dead entries in memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::services::Services;

/// Spawns a background task that sweeps expired entries on an interval.
///
/// Returns a JoinHandle used to abort the task during graceful shutdown.
pub fn spawn_cleanup_task(
    services: Arc<RwLock<Services>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut guard = services.write().await;
                guard.sweep_all()
            };

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringConfig;

    fn shared_services(session_ttl: u64) -> Arc<RwLock<Services>> {
        Arc::new(RwLock::new(Services::new(
            session_ttl,
            ScoringConfig::default(),
        )))
    }

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_sessions() {
        let services = shared_services(1);

        {
            let mut guard = services.write().await;
            guard.create_user("a@b.com", "pw123").unwrap();
            guard.create_session("a@b.com").unwrap();
        }

        let handle = spawn_cleanup_task(services.clone(), 1);

        tokio::time::sleep(Duration::from_millis(2500)).await;

        {
            let guard = services.read().await;
            assert_eq!(guard.health_snapshot().active_sessions, 0);
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_live_entries() {
        let services = shared_services(3600);

        {
            let mut guard = services.write().await;
            guard.create_user("a@b.com", "pw123").unwrap();
            guard.create_session("a@b.com").unwrap();
        }

        let handle = spawn_cleanup_task(services.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        {
            let guard = services.read().await;
            let snapshot = guard.health_snapshot();
            assert_eq!(snapshot.active_sessions, 1);
            assert_eq!(snapshot.tables["users"], 1);
        }

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let services = shared_services(3600);

        let handle = spawn_cleanup_task(services, 1);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished());
    }
}
