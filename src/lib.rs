//! Hauling loop profitability calculator.
//!
//! The crate is split the same way as the desktop app around it:
//! `domain` holds the pure engine and the capacity state machine,
//! `infra` loads the ship catalog, and `util` covers persistence and
//! display formatting. The Dioxus front-end lives in the binary.

pub mod domain;
pub mod infra;
pub mod util;
