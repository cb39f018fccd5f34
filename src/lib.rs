//! Core of the Ekklesia front-end.
//!
//! Holds everything that does not need a rendered page: the draw engine behind
//! the raffle widgets, the typed backend client and the persisted application
//! state. The Yew application in `main.rs` wires these into components.

pub mod api;
pub mod draw;
pub mod session;
pub mod utils;

/// Default draw parameters
pub mod defaults {
    pub const COUNTDOWN_SECONDS: u32 = 3;
    pub const MIN_COUNTDOWN_SECONDS: u32 = 1;
    pub const MAX_COUNTDOWN_SECONDS: u32 = 60;
    pub const BINGO_MAX: u32 = 75;
}

pub use draw::{Countdown, DrawEngine, DrawError, DrawHistory, DrawPool, DrawStep, DrawValue, RangeError};
pub use session::{AppAction, AppState, KeyValueStore, StaffUser, Theme, Workspace};
