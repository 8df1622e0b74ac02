//! Best score tracking
//!
//! The session score lives in `GameState`; this keeps the best score across
//! sessions and writes it through to a `ScoreStore` whenever it is beaten.

use crate::persistence::ScoreStore;

/// Persistent best score
pub struct HighScore {
    best: u32,
    store: Box<dyn ScoreStore>,
}

impl std::fmt::Debug for HighScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighScore").field("best", &self.best).finish()
    }
}

impl HighScore {
    /// Load the best score from `store`; unreadable values count as 0
    pub fn load(store: Box<dyn ScoreStore>) -> Self {
        let best = match store.get() {
            Ok(Some(value)) => {
                log::info!("Loaded high score {}", value);
                value
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(err) => {
                log::warn!("Ignoring unreadable high score: {}", err);
                0
            }
        };
        Self { best, store }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Check if a score would beat the current best
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Feed the current session score; returns true if it became the new best
    pub fn observe(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        if let Err(err) = self.store.set(score) {
            log::warn!("Failed to save high score {}: {}", score, err);
        }
        true
    }

    /// Forget the best score, in memory and in the store
    pub fn reset(&mut self) {
        self.best = 0;
        if let Err(err) = self.store.clear() {
            log::warn!("Failed to clear high score: {}", err);
        }
        log::info!("High score reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StoreError};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Store that shares its value with the test so writes can be inspected
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<Option<u32>>>);

    impl ScoreStore for SharedStore {
        fn get(&self) -> Result<Option<u32>, StoreError> {
            Ok(*self.0.borrow())
        }
        fn set(&mut self, value: u32) -> Result<(), StoreError> {
            *self.0.borrow_mut() = Some(value);
            Ok(())
        }
        fn clear(&mut self) -> Result<(), StoreError> {
            *self.0.borrow_mut() = None;
            Ok(())
        }
    }

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn get(&self) -> Result<Option<u32>, StoreError> {
            Err(StoreError::Parse("garbage".into()))
        }
        fn set(&mut self, _value: u32) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
        fn clear(&mut self) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn test_beating_stored_score_persists() {
        let shared = SharedStore::default();
        *shared.0.borrow_mut() = Some(3);
        let mut hs = HighScore::load(Box::new(shared.clone()));
        assert_eq!(hs.best(), 3);

        for score in 0..=5 {
            hs.observe(score);
        }
        assert_eq!(hs.best(), 5);
        assert_eq!(*shared.0.borrow(), Some(5));

        hs.reset();
        assert_eq!(hs.best(), 0);
        assert_eq!(*shared.0.borrow(), None);
        assert_eq!(HighScore::load(Box::new(shared)).best(), 0);
    }

    #[test]
    fn test_lower_score_does_not_overwrite() {
        let mut hs = HighScore::load(Box::new(MemoryStore::with_value(10)));
        assert!(!hs.observe(4));
        assert!(!hs.observe(10));
        assert_eq!(hs.best(), 10);
        assert!(hs.observe(11));
    }

    #[test]
    fn test_broken_store_defaults_to_zero() {
        let mut hs = HighScore::load(Box::new(BrokenStore));
        assert_eq!(hs.best(), 0);
        // Write failures are logged, the in-memory best still moves
        assert!(hs.observe(2));
        assert_eq!(hs.best(), 2);
        hs.reset();
        assert_eq!(hs.best(), 0);
    }

    #[test]
    fn test_qualifies() {
        let hs = HighScore::load(Box::new(MemoryStore::with_value(5)));
        assert!(!hs.qualifies(0));
        assert!(!hs.qualifies(5));
        assert!(hs.qualifies(6));
    }
}
