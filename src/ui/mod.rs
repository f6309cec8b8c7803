//! UI-facing state machines.
//!
//! No widget construction happens here — rendering belongs to the GUI
//! collaborator behind [`DisplayPort`](crate::app::ports::DisplayPort).
//! This layer owns only transition logic and the reads/writes into the
//! device state store.

pub mod popup;

pub use popup::{ModalBinding, PopupController, PopupState, PopupTransition};
