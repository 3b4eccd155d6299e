//! Interactive exploration state
//!
//! The controller is the single owner of filter and selection state and
//! the only trigger of full pipeline passes.

mod interaction_controller;

pub use interaction_controller::InteractionController;
