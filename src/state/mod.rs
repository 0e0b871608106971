//! State - Grid View State
//!
//! Display parameters the hosting view owns and mutates through the grid.

pub mod view_state;

pub use view_state::ViewState;
