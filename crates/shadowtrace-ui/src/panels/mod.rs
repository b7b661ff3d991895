//! Side panels.

pub mod control_panel;
