use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::config::SceneProfile;
use crate::core::timer::Repeating;
use crate::pose::{Pose, PoseGenerator};
use crate::store::{Placed, RetentionStore};

/// Revocable handle to a running spawner
///
/// Clones share one flag; cancelling through any of them stops the spawner.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Retention store driven by a repeating spawn timer
///
/// The frame loop calls [`Spawner::advance`] with the wall-clock time since the
/// previous frame; every whole spawn interval appends one random pose.
#[derive(Debug)]
pub struct Spawner {
    store: RetentionStore,
    trigger: Repeating,
    token: CancelToken,
}

impl Spawner {
    /// Build a spawner from the profile and seed its list
    pub fn start(profile: &SceneProfile) -> (Self, CancelToken) {
        let store = RetentionStore::new(profile.capacity, PoseGenerator::new(profile.spawn_volume));
        let trigger = Repeating::new(profile.spawn_interval(), profile.max_catch_up_ticks);
        Self::with_parts(store, trigger, &profile.seed)
    }

    pub fn with_parts(mut store: RetentionStore, trigger: Repeating, seed: &[Pose]) -> (Self, CancelToken) {
        store.initialize(seed);
        let token = CancelToken::new();

        log::info!(
            "Spawner started: {} seed paddles, capacity {}, every {:?}",
            store.len(),
            store.capacity(),
            trigger.period()
        );

        let spawner = Self {
            store,
            trigger,
            token: token.clone(),
        };
        (spawner, token)
    }

    /// Advance the spawn timer, returns how many paddles were spawned
    pub fn advance(&mut self, delta: Duration) -> u32 {
        if !self.is_active() {
            return 0;
        }

        let fired = self.trigger.advance(delta);
        for _ in 0..fired {
            self.spawn_one();
        }
        fired
    }

    /// Spawn immediately, outside the timer; a no-op once torn down
    pub fn tick(&mut self) -> &[Placed] {
        if self.is_active() {
            self.spawn_one();
        }
        self.store.entries()
    }

    fn spawn_one(&mut self) {
        let before = self.store.len();
        let entries = self.store.tick();
        let evicted = (before + 1).saturating_sub(entries.len());

        if let Some(placed) = entries.last() {
            log::debug!(
                "Spawned paddle #{} at {:.1} ({} alive)",
                placed.id,
                placed.pose.position,
                entries.len()
            );
        }
        if evicted > 0 {
            log::debug!("Evicted {} oldest paddle(s)", evicted);
        }
    }

    /// Cancel the timer and release the list
    pub fn teardown(&mut self) {
        if !self.token.is_cancelled() {
            log::info!("Spawner torn down with {} paddles", self.store.len());
        }
        self.token.cancel();
        self.store.release();
    }

    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn entries(&self) -> &[Placed] {
        self.store.entries()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }
}

impl Drop for Spawner {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_clones_share_state() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());

        token.cancel();
        token.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn advance_spawns_per_interval() {
        let (mut spawner, _token) = Spawner::start(&SceneProfile::default());

        assert_eq!(spawner.advance(Duration::from_millis(2999)), 0);
        assert_eq!(spawner.len(), 4);
        assert_eq!(spawner.advance(Duration::from_millis(1)), 1);
        assert_eq!(spawner.len(), 5);
    }

    #[test]
    fn saturated_delta_spawns_capped_backlog() {
        let (mut spawner, _token) = Spawner::start(&SceneProfile::default());

        assert_eq!(spawner.advance(Duration::from_millis(1)), 0);
        assert_eq!(spawner.advance(Duration::MAX), 8);
        assert_eq!(spawner.len(), 12);
    }

    #[test]
    fn external_cancel_stops_spawning() {
        let (mut spawner, token) = Spawner::start(&SceneProfile::default());
        token.cancel();

        assert_eq!(spawner.advance(Duration::from_secs(60)), 0);
        assert_eq!(spawner.len(), 4);
        assert!(!spawner.is_active());
    }

    #[test]
    fn dropping_spawner_revokes_token() {
        let (spawner, token) = Spawner::start(&SceneProfile::default());
        drop(spawner);
        assert!(token.is_cancelled());
    }
}
