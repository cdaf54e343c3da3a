//! Periodic status report

use log::info;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use crate::client::ClientRegistry;

/// Aggregate connection counts at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayStats {
    pub connected: usize,
    pub registered: usize,
}

impl RelayStats {
    pub fn collect(registry: &ClientRegistry) -> Self {
        Self {
            connected: registry.len(),
            registered: registry.registered_count(),
        }
    }
}

/// Logs `RelayStats` every `every` until `stop` flips to true.
pub fn spawn_stats_reporter(
    clients: Arc<Mutex<ClientRegistry>>,
    every: Duration,
    mut stop: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let stats = RelayStats::collect(&*clients.lock().await);
                    info!("Stats: {} connected, {} registered", stats.connected, stats.registered);
                }
                changed = stop.changed() => {
                    if changed.is_err() || *stop.borrow() {
                        break;
                    }
                }
            }
        }
    })
}
