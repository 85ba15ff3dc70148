//! Background task that owns all cart storage traffic.
//!
//! Saves are queued from inside the state update that produced them, so
//! they reach the store in mutation order. Loads go through the same queue:
//! a load of a key only runs after every save of that key queued before it.
//! A failed save is logged and dropped; the next mutation writes the full
//! cart again.

use std::sync::Arc;

use storefront_mobile_core::CartLine;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, warn};

use crate::snapshot;
use crate::storage::{KeyValueStore, StoreError};

pub(super) enum Command {
    Save {
        key: String,
        lines: Arc<[CartLine]>,
    },
    /// Read `key` once every earlier command has been handled.
    Load {
        key: String,
        reply: oneshot::Sender<Result<Option<String>, StoreError>>,
    },
    /// Acknowledged once every earlier command has been handled.
    Flush(oneshot::Sender<()>),
}

/// Start the writer. It stops once every sender is dropped.
pub(super) fn spawn(storage: Arc<dyn KeyValueStore>) -> mpsc::UnboundedSender<Command> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(run(storage, rx));
    tx
}

async fn run(storage: Arc<dyn KeyValueStore>, mut rx: mpsc::UnboundedReceiver<Command>) {
    while let Some(command) = rx.recv().await {
        match command {
            Command::Save { key, lines } => save(storage.as_ref(), &key, &lines).await,
            Command::Load { key, reply } => {
                let _ = reply.send(storage.get(&key).await);
            }
            Command::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("Cart writer stopped");
}

async fn save(storage: &dyn KeyValueStore, key: &str, lines: &[CartLine]) {
    let raw = match snapshot::encode(lines) {
        Ok(raw) => raw,
        Err(e) => {
            error!(key, error = %e, "Failed to encode cart snapshot");
            return;
        }
    };

    match storage.set(key, &raw).await {
        Ok(()) => debug!(key, lines = lines.len(), "Saved cart"),
        Err(e) => warn!(key, error = %e, "Failed to save cart"),
    }
}
