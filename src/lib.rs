//! Lucky Drop - Terminal Mystery Box Machine
//!
//! This module exposes the draw engine and state handling for testing and
//! external use. The terminal front-end lives in the binary.

pub mod commentary;
pub mod constants;
pub mod engine;
pub mod machine_store;
pub mod missions;
pub mod prizes;
pub mod profile_store;
pub mod reconcile;
pub mod selector;
pub mod session;
pub mod settings;
pub mod shop;
pub mod spin;

pub use engine::{DrawError, DrawKind, DrawnPrize, GachaEngine, MachineState, SpinEvent};
pub use prizes::{Prize, PrizePool, Rarity};
pub use session::{BuffState, PityState, SessionState};
pub use settings::SystemSettings;
