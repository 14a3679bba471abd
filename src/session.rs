//! Per-user session state: coins, buffs, pity progress and draw history.
//!
//! The whole value is swapped in on login and out on logout. The draw engine
//! borrows it for exactly one draw-and-reconcile cycle and holds nothing
//! across calls.

use crate::constants::STARTING_COINS;
use crate::prizes::{Prize, Rarity};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pity progress paired with the configured threshold, as seen by one
/// selector call. `threshold == 0` disables pity entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PityState {
    pub counter: u32,
    pub threshold: u32,
}

impl PityState {
    /// True when the next draw must be forced to legendary.
    pub fn due(&self) -> bool {
        self.threshold > 0 && self.counter + 1 >= self.threshold
    }
}

/// One-shot draw modifiers.
///
/// `guaranteed_rare` is consumed by the next draw regardless of outcome.
/// `pity_booster` never reaches the selector: the shop applies it as a direct
/// pity-counter increment at purchase time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffState {
    pub guaranteed_rare: bool,
    pub pity_booster: bool,
}

/// Append-only record of one drawn prize. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: i64,
    pub prize_name: String,
    pub rarity: Rarity,
}

impl HistoryEntry {
    pub fn new(prize: &Prize, timestamp: i64) -> Self {
        Self {
            id: format!("{}-{}", timestamp, Uuid::new_v4()),
            timestamp,
            prize_name: prize.name.clone(),
            rarity: prize.rarity,
        }
    }
}

/// Everything owned by the authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub coins: u64,
    pub claimed_mission_ids: Vec<u32>,
    pub buffs: BuffState,
    pub pity_counter: u32,
    /// Newest first.
    pub history: Vec<HistoryEntry>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            coins: STARTING_COINS,
            claimed_mission_ids: Vec::new(),
            buffs: BuffState::default(),
            pity_counter: 0,
            history: Vec::new(),
        }
    }

    pub fn total_draws(&self) -> usize {
        self.history.len()
    }

    pub fn draws_of_rarity(&self, rarity: Rarity) -> usize {
        self.history.iter().filter(|e| e.rarity == rarity).count()
    }

    pub fn has_claimed_mission(&self, mission_id: u32) -> bool {
        self.claimed_mission_ids.contains(&mission_id)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
