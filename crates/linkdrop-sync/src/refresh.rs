//! Polling-based background refresh.
//!
//! Placeholder for a realtime channel: a spawned task periodically loads
//! the server tree and hands it to the engine. Ticks are skipped while
//! the drag-operation-active flag is raised, so a refetch can never
//! overwrite an in-flight optimistic update.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use linkdrop_core::config::refresh::RefreshConfig;
use linkdrop_core::result::AppResult;
use linkdrop_core::types::ContainerId;
use linkdrop_entity::item::TreeItem;

use crate::engine::SyncHandle;

/// Loads the server-persisted tree for a container.
///
/// Implementations wrap the product's read API; staged items never
/// appear in the returned payload.
#[async_trait]
pub trait TreeLoader: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the current server tree as a flat item list.
    async fn load_tree(&self, container_id: ContainerId) -> AppResult<Vec<TreeItem>>;
}

/// Handle to the background refresh task.
#[derive(Debug)]
pub struct RefreshScheduler {
    shutdown_tx: watch::Sender<bool>,
}

impl RefreshScheduler {
    /// Spawn the refresh loop for an engine session.
    ///
    /// The task stops when [`RefreshScheduler::shutdown`] is called, the
    /// scheduler is dropped, or the engine goes away.
    pub fn spawn(
        handle: SyncHandle,
        loader: Arc<dyn TreeLoader>,
        config: RefreshConfig,
    ) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        tokio::spawn(async move {
            if !config.enabled {
                debug!("Background refresh disabled");
                return;
            }

            let mut ticker = time::interval(Duration::from_secs(config.interval_seconds.max(1)));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; the view session
            // already loaded its initial tree.
            ticker.tick().await;

            info!(
                interval_seconds = config.interval_seconds,
                container_id = %handle.container_id(),
                "Background refresh started"
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if handle.gate().is_active() {
                            debug!("Refresh tick skipped: mutation in flight");
                            continue;
                        }
                        match loader.load_tree(handle.container_id()).await {
                            Ok(items) => {
                                if handle.apply_refresh(items).await.is_err() {
                                    break;
                                }
                            }
                            Err(err) => warn!(error = %err, "Background tree load failed"),
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("Background refresh stopped");
        });

        Self { shutdown_tx }
    }

    /// Stop the refresh loop.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}
