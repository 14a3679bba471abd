//! Commits a finished draw into session state.
//!
//! Runs exactly once, synchronously, at the Spinning -> Result transition:
//! history entries are prepended (newest first), coins are credited per
//! result. Buff consumption already happened at draw start and is not
//! revisited here.

use crate::constants::COINS_PER_DRAW;
use crate::engine::DrawnPrize;
use crate::session::{HistoryEntry, SessionState};

/// What reconciliation changed, for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub coins_earned: u64,
    pub entries_added: usize,
    /// At least one legendary in the batch; drives the celebration effect.
    pub has_legendary: bool,
}

pub fn reconcile(
    results: &[DrawnPrize],
    session: &mut SessionState,
    now_millis: i64,
) -> ReconcileSummary {
    let entries: Vec<HistoryEntry> = results
        .iter()
        .map(|drawn| HistoryEntry::new(&drawn.prize, now_millis))
        .collect();

    let summary = ReconcileSummary {
        coins_earned: COINS_PER_DRAW * results.len() as u64,
        entries_added: entries.len(),
        has_legendary: results.iter().any(|d| d.prize.is_legendary()),
    };

    // Newest first, preserving draw order within this batch
    session.history.splice(0..0, entries);
    session.coins += summary.coins_earned;

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prizes::default_catalog;

    fn drawn(index: usize) -> DrawnPrize {
        DrawnPrize {
            prize: default_catalog()[index].clone(),
            pity_fired: false,
        }
    }

    #[test]
    fn test_single_draw_credit_and_history() {
        let mut session = SessionState::new();
        let coins_before = session.coins;

        let summary = reconcile(&[drawn(1)], &mut session, 5_000);

        assert_eq!(summary.coins_earned, COINS_PER_DRAW);
        assert_eq!(summary.entries_added, 1);
        assert!(!summary.has_legendary);
        assert_eq!(session.coins, coins_before + COINS_PER_DRAW);
        assert_eq!(session.history.len(), 1);
        assert_eq!(session.history[0].prize_name, "Fizzy Cola");
        assert_eq!(session.history[0].timestamp, 5_000);
    }

    #[test]
    fn test_batch_prepends_in_draw_order() {
        let mut session = SessionState::new();
        reconcile(&[drawn(1)], &mut session, 1_000);

        let batch: Vec<DrawnPrize> = (0..3).map(drawn).collect();
        let summary = reconcile(&batch, &mut session, 2_000);

        assert_eq!(summary.coins_earned, 3 * COINS_PER_DRAW);
        assert_eq!(session.history.len(), 4);
        // Newest batch sits in front, in draw order; the older entry follows
        assert_eq!(session.history[0].prize_name, "Limited Sneakers");
        assert_eq!(session.history[1].prize_name, "Fizzy Cola");
        assert_eq!(session.history[2].prize_name, "Mechanical Keyboard");
        assert_eq!(session.history[3].timestamp, 1_000);
    }

    #[test]
    fn test_legendary_flag() {
        let mut session = SessionState::new();
        let summary = reconcile(&[drawn(1), drawn(0)], &mut session, 0);
        assert!(summary.has_legendary);
    }

    #[test]
    fn test_entry_ids_unique_within_batch() {
        let mut session = SessionState::new();
        let batch: Vec<DrawnPrize> = (0..9).map(drawn).collect();
        reconcile(&batch, &mut session, 7_777);

        let mut ids: Vec<&str> = session.history.iter().map(|e| e.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 9);
    }
}
