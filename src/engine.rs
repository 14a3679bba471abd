//! Draw orchestration and the Idle -> Spinning -> Result machine cycle.
//!
//! [`run_draw`] is the orchestrator proper: it owns the pity counter and the
//! buff lifecycle for exactly one draw request and holds no state across
//! calls. [`GachaEngine`] wraps it with the visible state machine the
//! front-end drives: it refuses draws while busy, steps the spin animation,
//! and reconciles results exactly once when the reel lands.

use crate::constants::BATCH_DRAW_COUNT;
use crate::prizes::{Prize, PrizePool};
use crate::reconcile::{reconcile, ReconcileSummary};
use crate::selector::select;
use crate::session::{BuffState, PityState, SessionState};
use crate::settings::SystemSettings;
use crate::spin::Spinner;
use rand::Rng;
use std::error::Error;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawError {
    /// The active pool has no entries; the caller must refuse to draw.
    EmptyPool,
    /// A draw is already in flight or its result is still on screen.
    Busy,
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::EmptyPool => write!(f, "prize pool is empty"),
            DrawError::Busy => write!(f, "a draw is already in progress"),
        }
    }
}

impl Error for DrawError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Single,
    Batch,
}

impl DrawKind {
    pub fn count(self) -> usize {
        match self {
            DrawKind::Single => 1,
            DrawKind::Batch => BATCH_DRAW_COUNT,
        }
    }
}

/// One selected prize, tagged with whether pity produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnPrize {
    pub prize: Prize,
    pub pity_fired: bool,
}

/// Everything a draw request decided, before any of it is presented.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOutcome {
    /// In draw order; position 0 is the first internal draw.
    pub results: Vec<DrawnPrize>,
    /// Slot the spin animation should land on.
    pub target_index: usize,
    /// Pity counter value to commit after the draw.
    pub pity_after: u32,
    /// The guaranteed-rare buff was set and has been spent.
    pub buff_consumed: bool,
}

/// Runs one draw request against the pool.
///
/// The guaranteed-rare buff is cleared unconditionally at draw start - spent
/// whether or not it changes the outcome. For a batch it is cleared before
/// any selector call and therefore never affects batch outcomes (kept
/// behavior, see DESIGN.md). Pity accumulates through a batch on a local
/// counter; only the final value is reported for commit.
pub fn run_draw(
    kind: DrawKind,
    pool: &PrizePool,
    pity_counter: u32,
    pity_threshold: u32,
    buffs: &mut BuffState,
    rng: &mut impl Rng,
) -> Result<DrawOutcome, DrawError> {
    if pool.is_empty() {
        return Err(DrawError::EmptyPool);
    }

    let buff_consumed = buffs.guaranteed_rare;
    buffs.guaranteed_rare = false;

    let draw_buffs = BuffState {
        guaranteed_rare: match kind {
            DrawKind::Single => buff_consumed,
            DrawKind::Batch => false,
        },
        pity_booster: buffs.pity_booster,
    };

    let mut results = Vec::with_capacity(kind.count());
    let mut counter = pity_counter;
    let mut target_index = 0;

    for _ in 0..kind.count() {
        let pity = PityState {
            counter,
            threshold: pity_threshold,
        };
        let sel = select(pool, pity, &draw_buffs, rng)?;

        counter = if sel.prize.is_legendary() {
            0
        } else {
            counter + 1
        };
        target_index = sel.index;
        results.push(DrawnPrize {
            prize: sel.prize,
            pity_fired: sel.pity_fired,
        });
    }

    if kind == DrawKind::Batch {
        // The batch reveal is a grid; the reel just parks on a decorative
        // slot chosen by the spin plan.
        target_index = 0;
    }

    Ok(DrawOutcome {
        results,
        target_index,
        pity_after: counter,
        buff_consumed,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineState {
    Idle,
    Spinning,
    Result,
}

/// Event emitted by one animation step.
#[derive(Debug, Clone, PartialEq)]
pub enum SpinEvent {
    /// The reel advanced one slot; hook for the tick sound.
    Ticked { index: usize },
    /// Terminal step: the reel landed and the draw has been reconciled.
    Landed {
        index: usize,
        summary: ReconcileSummary,
    },
}

/// The visible machine. Owns the animation; borrows the session per call.
#[derive(Debug)]
pub struct GachaEngine {
    state: MachineState,
    active_index: usize,
    batch: bool,
    spinner: Option<Spinner>,
    results: Vec<DrawnPrize>,
}

impl GachaEngine {
    pub fn new() -> Self {
        Self {
            state: MachineState::Idle,
            active_index: 0,
            batch: false,
            spinner: None,
            results: Vec::new(),
        }
    }

    pub fn state(&self) -> MachineState {
        self.state
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn is_batch(&self) -> bool {
        self.batch
    }

    /// Results of the draw in flight (or on screen).
    pub fn results(&self) -> &[DrawnPrize] {
        &self.results
    }

    /// Starts a draw. Refused outright while not idle - no queueing, no
    /// preemption. On success the pity counter and buff state in `session`
    /// are already updated; history and coins wait for the landing.
    pub fn start_draw(
        &mut self,
        kind: DrawKind,
        pool: &PrizePool,
        session: &mut SessionState,
        settings: &SystemSettings,
        rng: &mut impl Rng,
    ) -> Result<(), DrawError> {
        if self.state != MachineState::Idle {
            return Err(DrawError::Busy);
        }
        if pool.is_empty() {
            return Err(DrawError::EmptyPool);
        }

        let outcome = run_draw(
            kind,
            pool,
            session.pity_counter,
            settings.effective_pity_threshold(),
            &mut session.buffs,
            rng,
        )?;
        session.pity_counter = outcome.pity_after;

        let slot_count = pool.slot_count();
        self.spinner = Some(match kind {
            DrawKind::Single => Spinner::single(self.active_index, outcome.target_index, slot_count),
            DrawKind::Batch => Spinner::batch(slot_count),
        });
        self.batch = kind == DrawKind::Batch;
        self.results = outcome.results;
        self.state = MachineState::Spinning;
        Ok(())
    }

    /// Delay until the next animation step, while spinning.
    pub fn tick_delay(&self) -> Option<Duration> {
        self.spinner.as_ref().map(Spinner::interval)
    }

    /// Advances the animation by one step. The terminal step reconciles the
    /// draw into `session` before the Result state becomes observable.
    /// Returns `None` when the machine is not spinning.
    pub fn tick(&mut self, session: &mut SessionState, now_millis: i64) -> Option<SpinEvent> {
        let spinner = self.spinner.as_mut()?;
        let step = spinner.step(self.active_index);
        self.active_index = step.index;

        if !step.finished {
            return Some(SpinEvent::Ticked { index: step.index });
        }

        self.spinner = None;
        self.state = MachineState::Result;
        let summary = reconcile(&self.results, session, now_millis);
        Some(SpinEvent::Landed {
            index: step.index,
            summary,
        })
    }

    /// Closes the result view and re-enables draw requests.
    pub fn close_result(&mut self) {
        if self.state == MachineState::Result {
            self.results.clear();
            self.state = MachineState::Idle;
        }
    }
}

impl Default for GachaEngine {
    fn default() -> Self {
        Self::new()
    }
}
