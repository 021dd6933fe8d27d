//! Controller layer: UI events, the submit-cycle reducer, and command
//! orchestration.

pub mod events;
pub mod form;
pub mod orchestration;
