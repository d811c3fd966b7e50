//! Polling room notifier for wordbottle.
//!
//! There is no push channel anywhere in this system: a repeating timer
//! re-reads the current room from the store and hands every subscriber a
//! full snapshot — unconditionally, even when nothing changed. No
//! diffing. Convergence between clients sharing a backend is therefore
//! bounded by the poll interval, never immediate.
//!
//! # Integration
//!
//! The facade owns a [`RoomWatcher`] for subscriptions and spawns a poll
//! task per joined room:
//!
//! ```ignore
//! let watcher = RoomWatcher::new(WatchConfig::default());
//! let id = watcher.subscribe(ROOM_UPDATE, |room| render(room));
//! let poll = watcher.spawn(store.clone());
//! // … later, on leave:
//! poll.stop();
//! watcher.unsubscribe(ROOM_UPDATE, Some(id));
//! ```
//!
//! Stopping the handle (or dropping it) is the only cancellation
//! mechanism; each tick is a quick synchronous read-then-notify, so
//! ticks never overlap.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace, warn};

use wordbottle_model::Room;
use wordbottle_store::{RoomStore, StorageBackend};

/// Event name for full-room snapshots.
pub const ROOM_UPDATE: &str = "room_update";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Settings for the poll loop.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Time between store reads. Default: 1 second.
    pub interval: Duration,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { interval: Duration::from_secs(1) }
    }
}

impl WatchConfig {
    /// Smallest interval the loop will actually run at.
    pub const MIN_INTERVAL: Duration = Duration::from_millis(10);

    /// Clamps out-of-range values so the config is safe to use.
    ///
    /// A zero interval would spin the loop flat out; it is raised to
    /// [`Self::MIN_INTERVAL`] with a warning.
    pub fn validated(mut self) -> Self {
        if self.interval < Self::MIN_INTERVAL {
            warn!(
                interval_ms = self.interval.as_millis() as u64,
                min_ms = Self::MIN_INTERVAL.as_millis() as u64,
                "poll interval below minimum — clamping"
            );
            self.interval = Self::MIN_INTERVAL;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Subscriptions
// ---------------------------------------------------------------------------

/// Callback receiving a full room snapshot.
pub type RoomCallback = Box<dyn Fn(&Room) + Send + Sync + 'static>;

/// Identifies one registered callback, for targeted removal.
///
/// The original design unregistered callbacks by identity; function
/// identity is not observable here, so `subscribe` hands back an id
/// instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct WatcherInner {
    config: WatchConfig,
    subs: Mutex<HashMap<String, Vec<(SubscriptionId, RoomCallback)>>>,
    next_id: AtomicU64,
}

/// Observer registry plus poll-loop factory.
///
/// Cheap to clone — all clones share the same subscription list, so the
/// poll task and the owning client see one registry.
#[derive(Clone)]
pub struct RoomWatcher {
    inner: Arc<WatcherInner>,
}

impl RoomWatcher {
    pub fn new(config: WatchConfig) -> Self {
        Self {
            inner: Arc::new(WatcherInner {
                config: config.validated(),
                subs: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Registers `callback` under `event` and returns its id.
    pub fn subscribe(
        &self,
        event: &str,
        callback: impl Fn(&Room) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let mut subs = self.lock_subs();
        subs.entry(event.to_owned())
            .or_default()
            .push((id, Box::new(callback)));
        debug!(event, id = id.0, "subscriber added");
        id
    }

    /// Removes one subscriber (`Some(id)`) or every subscriber for the
    /// event (`None`). Unknown ids and events are ignored.
    pub fn unsubscribe(&self, event: &str, id: Option<SubscriptionId>) {
        let mut subs = self.lock_subs();
        match id {
            Some(id) => {
                if let Some(list) = subs.get_mut(event) {
                    list.retain(|(sid, _)| *sid != id);
                }
            }
            None => {
                subs.remove(event);
            }
        }
        debug!(event, ?id, "subscriber(s) removed");
    }

    /// Number of callbacks registered under `event`.
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.lock_subs().get(event).map_or(0, Vec::len)
    }

    /// Invokes every callback registered under `event` with `room`.
    ///
    /// A panicking callback is caught and logged; the rest still run.
    pub fn emit(&self, event: &str, room: &Room) {
        let subs = self.lock_subs();
        let Some(list) = subs.get(event) else {
            return;
        };
        for (id, callback) in list {
            if catch_unwind(AssertUnwindSafe(|| callback(room))).is_err() {
                warn!(event, id = id.0, "subscriber panicked — continuing");
            }
        }
    }

    /// Spawns the poll loop against `store`.
    ///
    /// Every tick reads the store's current room and, when one exists,
    /// emits [`ROOM_UPDATE`]. The first tick fires immediately, so a
    /// fresh join is announced without waiting a full interval. Requires
    /// a running Tokio runtime.
    pub fn spawn<B: StorageBackend>(&self, store: Arc<RoomStore<B>>) -> PollHandle {
        let watcher = self.clone();
        let interval = self.inner.config.interval;
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // A slow subscriber must not cause a burst of catch-up ticks.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            debug!(interval_ms = interval.as_millis() as u64, "poll loop started");
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        match store.current_room() {
                            Ok(Some(room)) => {
                                trace!(code = %room.code, "poll tick");
                                watcher.emit(ROOM_UPDATE, &room);
                            }
                            Ok(None) => {}
                            Err(e) => warn!(error = %e, "poll read failed"),
                        }
                    }
                }
            }
            debug!("poll loop stopped");
        });

        PollHandle { shutdown: Some(shutdown_tx), task }
    }

    fn lock_subs(
        &self,
    ) -> std::sync::MutexGuard<'_, HashMap<String, Vec<(SubscriptionId, RoomCallback)>>> {
        self.inner.subs.lock().expect("subscriber mutex poisoned")
    }
}

// ---------------------------------------------------------------------------
// PollHandle
// ---------------------------------------------------------------------------

/// Handle to a running poll loop. Stop it explicitly or by dropping.
pub struct PollHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Stops the loop. Idempotent by construction — the handle is
    /// consumed.
    pub fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }

    /// Whether the loop has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
