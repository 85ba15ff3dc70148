//! The cart store.
//!
//! [`CartStore`] owns the authoritative in-memory cart for the active
//! identity scope. State lives in a `tokio::sync::watch` channel: every
//! change (edit, scope switch, load completion) publishes a new
//! [`CartSnapshot`], which doubles as the subscription interface for UI
//! code and as the synchronous read path.
//!
//! # Persistence
//!
//! Each edit queues a full-cart save to a background writer and returns
//! without waiting for it. Loads are queued on the same writer, so a scope
//! reloaded right after an edit sees that edit. Save and load failures are logged, never
//! surfaced: the in-memory cart stays authoritative for the session and a
//! failed load yields an empty cart.
//!
//! # Scope changes
//!
//! A scope change clears the lines, enters [`CartPhase::Loading`] and bumps
//! the generation. The load result is only applied if no newer scope change
//! happened meanwhile, so one user's cart can never surface under another.
//! Edits issued while loading wait for the load to finish, and are dropped
//! if the scope changes again first.

mod state;
mod writer;

pub use state::{CartPhase, CartSnapshot};

use std::sync::Arc;

use storefront_mobile_core::{CartLine, Price, Product, ProductId, UserProfile};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::error::add_breadcrumb;
use crate::scope::IdentityScope;
use crate::snapshot;
use crate::storage::KeyValueStore;

/// Identity-scoped, persisted shopping cart.
///
/// Cheaply cloneable; clones share the same cart.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    state: watch::Sender<CartSnapshot>,
    writer: mpsc::UnboundedSender<writer::Command>,
}

impl CartStore {
    /// Create a store in the loading state with no scope loaded yet.
    ///
    /// Most callers want [`CartStore::open`]; this constructor is for
    /// driving scope changes by hand through [`CartStore::rescope`]. Edits
    /// issued before the first rescope are dropped by it.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime (the writer task is spawned
    /// here).
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let (state, _) = watch::channel(CartSnapshot::initial());
        let writer = writer::spawn(storage);

        Self {
            inner: Arc::new(CartStoreInner { state, writer }),
        }
    }

    /// Create a store, load the cart for the current identity, and keep
    /// following `identity` from then on.
    pub async fn open(
        storage: Arc<dyn KeyValueStore>,
        mut identity: watch::Receiver<Option<UserProfile>>,
    ) -> Self {
        let store = Self::new(storage);
        let user = identity.borrow_and_update().clone();
        store.rescope(user.as_ref()).await;
        store.follow_identity(identity);
        store
    }

    /// Re-scope on every change published by `identity`.
    ///
    /// The task ends when the identity source is dropped or this store (and
    /// all its clones) are gone.
    pub fn follow_identity(
        &self,
        mut identity: watch::Receiver<Option<UserProfile>>,
    ) -> JoinHandle<()> {
        let weak = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            while identity.changed().await.is_ok() {
                let user = identity.borrow_and_update().clone();
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                let store = Self { inner };

                // Switch scope here so switches apply in notification order;
                // only the load runs concurrently.
                let scope = IdentityScope::from_user(user.as_ref());
                if let Some(generation) = store.begin_rescope(&scope) {
                    tokio::spawn(async move { store.finish_rescope(scope, generation).await });
                }
            }
            debug!("Stopped following identity changes");
        })
    }

    /// Switch to the scope of `user` and load its persisted cart.
    ///
    /// Does nothing if that scope is already active.
    #[instrument(skip(self, user))]
    pub async fn rescope(&self, user: Option<&UserProfile>) {
        let scope = IdentityScope::from_user(user);
        if let Some(generation) = self.begin_rescope(&scope) {
            self.finish_rescope(scope, generation).await;
        }
    }

    fn begin_rescope(&self, scope: &IdentityScope) -> Option<u64> {
        let mut started = None;
        self.inner.state.send_if_modified(|state| {
            // Generation 0 means nothing has been loaded yet, not even guest.
            if &state.scope == scope && state.generation > 0 {
                return false;
            }
            state.generation += 1;
            state.scope = scope.clone();
            state.phase = CartPhase::Loading;
            state.lines = state::empty_lines();
            started = Some(state.generation);
            true
        });

        match started {
            Some(generation) => info!(%scope, generation, "Cart scope changed"),
            None => debug!(%scope, "Cart scope unchanged"),
        }
        started
    }

    async fn finish_rescope(&self, scope: IdentityScope, generation: u64) {
        let lines = self.load(&scope).await;
        let count = lines.len();

        let applied = self.inner.state.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            state.lines = lines;
            state.phase = CartPhase::Ready;
            true
        });

        if applied {
            debug!(%scope, lines = count, "Cart ready");
        } else {
            debug!(%scope, generation, "Discarding stale cart load");
        }
    }

    /// Load a scope's snapshot, falling back to an empty cart.
    ///
    /// The read is queued behind any pending saves, so it sees the latest
    /// edit made under that scope.
    async fn load(&self, scope: &IdentityScope) -> Arc<[CartLine]> {
        let key = scope.storage_key();
        let (reply, result) = oneshot::channel();
        let command = writer::Command::Load {
            key: key.clone(),
            reply,
        };
        if self.inner.writer.send(command).is_err() {
            warn!(key = %key, "Cart writer is gone; loading an empty cart");
            return state::empty_lines();
        }

        let Ok(loaded) = result.await else {
            warn!(key = %key, "Cart writer dropped the load; loading an empty cart");
            return state::empty_lines();
        };
        match loaded {
            Ok(Some(raw)) => match snapshot::decode(&raw) {
                Ok(lines) => lines.into(),
                Err(e) => {
                    warn!(key = %key, error = %e, "Discarding unreadable cart snapshot");
                    state::empty_lines()
                }
            },
            Ok(None) => state::empty_lines(),
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to load cart");
                state::empty_lines()
            }
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of `product`.
    ///
    /// An existing line is incremented and keeps the title, price and image
    /// captured when it was first added; otherwise a new line is appended.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add_to_cart(&self, product: &Product) {
        if self
            .apply(|lines| Some(state::with_added(lines, product)))
            .await
        {
            let id = product.id.to_string();
            add_breadcrumb("cart", "Added to cart", Some(&[("product_id", id.as_str())]));
        }
    }

    /// Remove the line for `id`. Removing an absent line is a no-op.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(&self, id: &ProductId) {
        if self.apply(|lines| state::without(lines, id)).await {
            let id = id.to_string();
            add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", id.as_str())]));
        }
    }

    /// Set the quantity of the line for `id` to exactly `quantity`.
    ///
    /// A quantity below 1 removes the line. Unknown ids are a no-op.
    #[instrument(skip(self))]
    pub async fn update_quantity(&self, id: &ProductId, quantity: i64) {
        if quantity < 1 {
            self.remove_from_cart(id).await;
            return;
        }

        let quantity = quantity.unsigned_abs();
        if self
            .apply(|lines| state::with_quantity(lines, id, quantity))
            .await
        {
            let id = id.to_string();
            let qty = quantity.to_string();
            add_breadcrumb(
                "cart",
                "Updated quantity",
                Some(&[("product_id", id.as_str()), ("quantity", qty.as_str())]),
            );
        }
    }

    /// Apply `edit` once the active scope is ready, then queue a save.
    ///
    /// The edit belongs to the scope active when it was issued. If the scope
    /// changes before it finishes loading, the edit is dropped and `false`
    /// is returned.
    ///
    /// `edit` returns `None` when it leaves the cart unchanged; subscribers
    /// are only notified of real changes, but the save is queued either way.
    async fn apply<F>(&self, edit: F) -> bool
    where
        F: Fn(&[CartLine]) -> Option<Arc<[CartLine]>>,
    {
        let generation = self.inner.state.borrow().generation;
        loop {
            let mut outcome = None;
            self.inner.state.send_if_modified(|state| {
                if state.generation != generation {
                    outcome = Some(false);
                    return false;
                }
                if state.phase != CartPhase::Ready {
                    return false;
                }
                outcome = Some(true);

                let edited = edit(&state.lines);
                let modified = edited.is_some();
                if let Some(lines) = edited {
                    state.lines = lines;
                }
                self.queue_save(state);
                modified
            });

            match outcome {
                Some(true) => return true,
                Some(false) => {
                    debug!(generation, "Cart scope changed before it loaded; edit dropped");
                    return false;
                }
                None => {}
            }

            debug!("Cart is loading; edit waits");
            let mut rx = self.inner.state.subscribe();
            let _ = rx
                .wait_for(|s| s.is_ready() || s.generation != generation)
                .await;
        }
    }

    fn queue_save(&self, state: &CartSnapshot) {
        let command = writer::Command::Save {
            key: state.scope.storage_key(),
            lines: Arc::clone(&state.lines),
        };
        if self.inner.writer.send(command).is_err() {
            warn!(scope = %state.scope, "Cart writer is gone; save dropped");
        }
    }

    /// Wait until every save queued so far has been attempted.
    pub async fn flush(&self) {
        let (done, ack) = oneshot::channel();
        if self.inner.writer.send(writer::Command::Flush(done)).is_ok() {
            let _ = ack.await;
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// The current cart state.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        self.inner.state.borrow().clone()
    }

    /// Current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> Arc<[CartLine]> {
        Arc::clone(&self.inner.state.borrow().lines)
    }

    /// Sum of price times quantity, rounded to cents.
    #[must_use]
    pub fn total(&self) -> Price {
        self.inner.state.borrow().total()
    }

    /// Total units in the cart (for a badge).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.inner.state.borrow().item_count()
    }

    #[must_use]
    pub fn scope(&self) -> IdentityScope {
        self.inner.state.borrow().scope.clone()
    }

    #[must_use]
    pub fn phase(&self) -> CartPhase {
        self.inner.state.borrow().phase
    }

    /// Receive a new [`CartSnapshot`] on every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.inner.state.subscribe()
    }

    /// Wait for the active scope to finish loading.
    pub async fn ready(&self) -> CartSnapshot {
        self.wait_for(CartSnapshot::is_ready).await
    }

    /// Wait until `scope` is active and loaded.
    pub async fn ready_for(&self, scope: &IdentityScope) -> CartSnapshot {
        self.wait_for(|s| s.is_ready() && s.scope() == scope).await
    }

    async fn wait_for(&self, condition: impl FnMut(&CartSnapshot) -> bool) -> CartSnapshot {
        let mut rx = self.inner.state.subscribe();
        match rx.wait_for(condition).await {
            Ok(snapshot) => (*snapshot).clone(),
            // The sender lives in `self`, so the channel cannot close here.
            Err(_) => self.snapshot(),
        }
    }
}
