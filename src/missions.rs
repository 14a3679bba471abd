//! Mission catalog and claim handling.
//!
//! Progress is derived from draw history; nothing is counted twice. Claiming
//! an achieved mission credits its reward once and records the id so repeat
//! claims are no-ops.

use crate::prizes::Rarity;
use crate::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionGoal {
    TotalSpins,
    LegendaryCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mission {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub target: u32,
    pub reward_coins: u64,
    pub goal: MissionGoal,
}

pub const MISSIONS: [Mission; 4] = [
    Mission {
        id: 1,
        title: "First Pull",
        description: "Complete 1 draw",
        target: 1,
        reward_coins: 50,
        goal: MissionGoal::TotalSpins,
    },
    Mission {
        id: 2,
        title: "Draw Addict",
        description: "Complete 20 draws",
        target: 20,
        reward_coins: 300,
        goal: MissionGoal::TotalSpins,
    },
    Mission {
        id: 3,
        title: "Blessed By Luck",
        description: "Pull 1 legendary prize",
        target: 1,
        reward_coins: 500,
        goal: MissionGoal::LegendaryCount,
    },
    Mission {
        id: 4,
        title: "Hoarder",
        description: "Complete 50 draws",
        target: 50,
        reward_coins: 1000,
        goal: MissionGoal::TotalSpins,
    },
];

/// Current progress toward a mission, derived from history.
pub fn progress(mission: &Mission, session: &SessionState) -> u32 {
    let count = match mission.goal {
        MissionGoal::TotalSpins => session.total_draws(),
        MissionGoal::LegendaryCount => session.draws_of_rarity(Rarity::Legendary),
    };
    count.min(u32::MAX as usize) as u32
}

pub fn is_complete(mission: &Mission, session: &SessionState) -> bool {
    progress(mission, session) >= mission.target
}

/// Claims the reward if the mission is complete and unclaimed.
/// Returns true when coins were credited.
pub fn claim(mission: &Mission, session: &mut SessionState) -> bool {
    if session.has_claimed_mission(mission.id) || !is_complete(mission, session) {
        return false;
    }
    session.coins += mission.reward_coins;
    session.claimed_mission_ids.push(mission.id);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prizes::default_catalog;
    use crate::session::HistoryEntry;

    fn session_with_draws(common: usize, legendary: usize) -> SessionState {
        let catalog = default_catalog();
        let mut session = SessionState::new();
        for _ in 0..common {
            session.history.push(HistoryEntry::new(&catalog[1], 0));
        }
        for _ in 0..legendary {
            session.history.push(HistoryEntry::new(&catalog[0], 0));
        }
        session
    }

    #[test]
    fn test_progress_tracks_goal_kind() {
        let session = session_with_draws(19, 1);
        assert_eq!(progress(&MISSIONS[1], &session), 20);
        assert_eq!(progress(&MISSIONS[2], &session), 1);
    }

    #[test]
    fn test_claim_credits_once() {
        let mut session = session_with_draws(1, 0);
        let coins_before = session.coins;

        assert!(claim(&MISSIONS[0], &mut session));
        assert_eq!(session.coins, coins_before + 50);
        assert!(session.has_claimed_mission(1));

        // Second claim is a no-op
        assert!(!claim(&MISSIONS[0], &mut session));
        assert_eq!(session.coins, coins_before + 50);
    }

    #[test]
    fn test_incomplete_mission_cannot_be_claimed() {
        let mut session = session_with_draws(0, 0);
        assert!(!claim(&MISSIONS[0], &mut session));
        assert!(session.claimed_mission_ids.is_empty());
    }

    #[test]
    fn test_legendary_mission_needs_legendary() {
        let mut session = session_with_draws(100, 0);
        assert!(!claim(&MISSIONS[2], &mut session));

        let mut session = session_with_draws(0, 1);
        assert!(claim(&MISSIONS[2], &mut session));
    }
}
