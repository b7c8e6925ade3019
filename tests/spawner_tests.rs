use std::time::Duration;

use paddletopia::config::SceneProfile;
use paddletopia::core::timer::Repeating;
use paddletopia::pose::{default_seed, PoseGenerator};
use paddletopia::spawner::Spawner;
use paddletopia::store::RetentionStore;

#[cfg(test)]
mod spawner_tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(3000);

    #[test]
    fn test_one_spawn_per_interval_across_frames() {
        let (mut spawner, _token) = Spawner::start(&SceneProfile::default());

        // 60 fps for 9.5 seconds
        let mut spawned = 0;
        for _ in 0..570 {
            spawned += spawner.advance(Duration::from_micros(16_667));
        }

        assert_eq!(spawned, 3);
        assert_eq!(spawner.len(), 7);
    }

    #[test]
    fn test_list_saturates_at_capacity() {
        let (mut spawner, _token) = Spawner::start(&SceneProfile::default());
        for _ in 0..60 {
            spawner.advance(INTERVAL);
        }
        assert_eq!(spawner.len(), 42);

        let oldest = spawner.entries()[0].id;
        spawner.advance(INTERVAL);
        assert_eq!(spawner.len(), 42);
        assert_eq!(spawner.entries()[0].id, oldest + 1);
    }

    #[test]
    fn test_stall_catch_up_is_capped() {
        let store = RetentionStore::new(100, PoseGenerator::default());
        let trigger = Repeating::new(INTERVAL, 3);
        let (mut spawner, _token) = Spawner::with_parts(store, trigger, &default_seed());

        assert_eq!(spawner.advance(INTERVAL * 10), 3);
        assert_eq!(spawner.len(), 7);
    }

    #[test]
    fn test_teardown_stops_spawning_and_clears() {
        let (mut spawner, token) = Spawner::start(&SceneProfile::default());
        spawner.advance(INTERVAL);
        assert_eq!(spawner.len(), 5);

        spawner.teardown();
        assert!(token.is_cancelled());
        assert!(spawner.is_empty());

        assert_eq!(spawner.advance(INTERVAL * 100), 0);
        assert!(spawner.tick().is_empty());
        assert!(spawner.is_empty());

        // Second teardown is harmless
        spawner.teardown();
        assert!(spawner.is_empty());
    }

    #[test]
    fn test_cancel_from_clone_freezes_sequence() {
        let (mut spawner, token) = Spawner::start(&SceneProfile::default());
        let remote = token.clone();
        spawner.advance(INTERVAL);
        let frozen: Vec<_> = spawner.entries().to_vec();

        remote.cancel();

        for _ in 0..10 {
            spawner.advance(INTERVAL);
        }
        assert_eq!(spawner.entries(), frozen.as_slice());
    }
}
