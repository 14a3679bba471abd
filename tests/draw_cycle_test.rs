//! Integration test: full draw cycles through the public engine API.
//!
//! Exercises the Idle -> Spinning -> Result lifecycle end to end: animation
//! stepping, landing, reconciliation into the session and the pity guarantee
//! observed across many consecutive draws.

use lucky_drop::engine::{DrawError, DrawKind, GachaEngine, MachineState, SpinEvent};
use lucky_drop::prizes::{default_catalog, PrizePool, Rarity};
use lucky_drop::session::SessionState;
use lucky_drop::settings::SystemSettings;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

fn pool() -> PrizePool {
    PrizePool::from_catalog(&default_catalog())
}

/// Runs the spin animation to its landing, returning the landing summary and
/// the number of tick events observed along the way.
fn run_to_landing(
    engine: &mut GachaEngine,
    session: &mut SessionState,
    now_millis: i64,
) -> (lucky_drop::reconcile::ReconcileSummary, u32) {
    let mut ticks = 0;
    for _ in 0..1000 {
        match engine.tick(session, now_millis) {
            Some(SpinEvent::Ticked { .. }) => ticks += 1,
            Some(SpinEvent::Landed { summary, .. }) => return (summary, ticks),
            None => break,
        }
    }
    panic!("spin did not land within 1000 ticks");
}

// =============================================================================
// Single draw lifecycle
// =============================================================================

#[test]
fn test_single_draw_full_cycle() {
    let pool = pool();
    let settings = SystemSettings::default();
    let mut engine = GachaEngine::new();
    let mut session = SessionState::new();
    let mut rng = ChaCha8Rng::seed_from_u64(100);
    let coins_before = session.coins;

    engine
        .start_draw(DrawKind::Single, &pool, &mut session, &settings, &mut rng)
        .unwrap();
    assert_eq!(engine.state(), MachineState::Spinning);
    assert_eq!(engine.results().len(), 1);

    // History and coins are untouched until the reel lands
    assert!(session.history.is_empty());
    assert_eq!(session.coins, coins_before);

    let (summary, ticks) = run_to_landing(&mut engine, &mut session, 1_000);
    assert_eq!(engine.state(), MachineState::Result);
    assert_eq!(summary.entries_added, 1);
    assert_eq!(summary.coins_earned, 10);
    // At least three full rotations before landing
    assert!(ticks >= 26);

    assert_eq!(session.coins, coins_before + 10);
    assert_eq!(session.history.len(), 1);
    assert_eq!(
        session.history[0].prize_name,
        engine.results()[0].prize.name
    );

    engine.close_result();
    assert_eq!(engine.state(), MachineState::Idle);
}

#[test]
fn test_single_draw_decelerates_toward_landing() {
    let pool = pool();
    let settings = SystemSettings::default();
    let mut engine = GachaEngine::new();
    let mut session = SessionState::new();
    let mut rng = ChaCha8Rng::seed_from_u64(101);

    engine
        .start_draw(DrawKind::Single, &pool, &mut session, &settings, &mut rng)
        .unwrap();

    let first_delay = engine.tick_delay().unwrap();
    assert_eq!(first_delay, Duration::from_millis(50));

    let mut last_delay = first_delay;
    while engine.state() == MachineState::Spinning {
        if let Some(delay) = engine.tick_delay() {
            assert!(delay >= last_delay, "spin sped back up");
            last_delay = delay;
        }
        engine.tick(&mut session, 0);
    }
    assert!(last_delay > first_delay);
    // Once landed there is no next step to schedule
    assert!(engine.tick_delay().is_none());
}

// =============================================================================
// Batch draws
// =============================================================================

#[test]
fn test_batch_draw_credits_and_records_ten() {
    let pool = pool();
    let settings = SystemSettings::default();
    let mut engine = GachaEngine::new();
    let mut session = SessionState::new();
    let mut rng = ChaCha8Rng::seed_from_u64(200);
    let coins_before = session.coins;

    engine
        .start_draw(DrawKind::Batch, &pool, &mut session, &settings, &mut rng)
        .unwrap();
    assert!(engine.is_batch());
    assert_eq!(engine.results().len(), 10);
    assert_eq!(engine.tick_delay(), Some(Duration::from_millis(30)));

    let (summary, ticks) = run_to_landing(&mut engine, &mut session, 2_000);
    assert_eq!(summary.entries_added, 10);
    assert_eq!(summary.coins_earned, 100);
    // Short fixed budget: 20 steps, 19 of them non-terminal
    assert_eq!(ticks, 19);

    assert_eq!(session.coins, coins_before + 100);
    assert_eq!(session.history.len(), 10);
}

#[test]
fn test_batch_reel_parks_on_rest_slot() {
    let pool = pool();
    let settings = SystemSettings::default();
    let mut rng = ChaCha8Rng::seed_from_u64(201);

    for _ in 0..5 {
        let mut engine = GachaEngine::new();
        let mut session = SessionState::new();
        engine
            .start_draw(DrawKind::Batch, &pool, &mut session, &settings, &mut rng)
            .unwrap();
        run_to_landing(&mut engine, &mut session, 0);
        assert_eq!(engine.active_index(), 4);
        engine.close_result();
    }
}

// =============================================================================
// Pity across consecutive draws
// =============================================================================

#[test]
fn test_pity_caps_legendary_drought() {
    // With a threshold of 10, no stretch of 10 consecutive draws may be
    // legendary-free, no matter what the weights say.
    let catalog = default_catalog();
    let pool = PrizePool::from_catalog(&catalog);
    let settings = SystemSettings {
        volume: 0.5,
        pity_threshold: 10,
    };
    let mut engine = GachaEngine::new();
    let mut session = SessionState::new();
    let mut rng = ChaCha8Rng::seed_from_u64(300);

    for draw in 0..200 {
        engine
            .start_draw(DrawKind::Single, &pool, &mut session, &settings, &mut rng)
            .unwrap();
        run_to_landing(&mut engine, &mut session, draw);
        engine.close_result();
        assert!(session.pity_counter < 10, "pity counter escaped threshold");
    }

    // History is newest first; scan for the longest legendary-free run
    let mut drought = 0;
    let mut worst = 0;
    for entry in &session.history {
        if entry.rarity == Rarity::Legendary {
            drought = 0;
        } else {
            drought += 1;
            worst = worst.max(drought);
        }
    }
    assert!(worst < 10, "observed a {}-draw drought", worst);
}

#[test]
fn test_history_is_newest_first_across_draws() {
    let pool = pool();
    let settings = SystemSettings::default();
    let mut engine = GachaEngine::new();
    let mut session = SessionState::new();
    let mut rng = ChaCha8Rng::seed_from_u64(400);

    for now in [1_000, 2_000, 3_000] {
        engine
            .start_draw(DrawKind::Single, &pool, &mut session, &settings, &mut rng)
            .unwrap();
        run_to_landing(&mut engine, &mut session, now);
        engine.close_result();
    }

    let stamps: Vec<i64> = session.history.iter().map(|e| e.timestamp).collect();
    assert_eq!(stamps, vec![3_000, 2_000, 1_000]);
}

// =============================================================================
// Refusals
// =============================================================================

#[test]
fn test_empty_pool_draw_refused_cleanly() {
    let empty = PrizePool::from_catalog(&[]);
    let settings = SystemSettings::default();
    let mut engine = GachaEngine::new();
    let mut session = SessionState::new();
    let mut rng = ChaCha8Rng::seed_from_u64(500);

    let err = engine
        .start_draw(DrawKind::Single, &empty, &mut session, &settings, &mut rng)
        .unwrap_err();
    assert_eq!(err, DrawError::EmptyPool);
    assert_eq!(engine.state(), MachineState::Idle);
    assert_eq!(session, SessionState::new());
}
