//! Eventing - Grid to host notifications

pub mod grid_event;

pub use grid_event::{EventSink, GridEvent};
