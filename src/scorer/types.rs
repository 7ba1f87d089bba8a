use crate::keyboard::Key;
use serde::{Deserialize, Serialize};

/// Key each simulated finger is currently resting on, in home-key order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerState {
    resting: Vec<Key>,
}

impl FingerState {
    pub fn new(home_keys: &[Key]) -> Self {
        Self {
            resting: home_keys.to_vec(),
        }
    }

    pub fn resting(&self) -> &[Key] {
        &self.resting
    }

    pub fn move_finger(&mut self, finger: usize, key: Key) {
        self.resting[finger] = key;
    }

    pub fn len(&self) -> usize {
        self.resting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resting.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Evaluation {
    pub cost: f64,
    pub typed: usize,
    pub skipped: usize,
    /// Unrounded travel per finger, in home-key order.
    pub finger_travel: Vec<f64>,
}
