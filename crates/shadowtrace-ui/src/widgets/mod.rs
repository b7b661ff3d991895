//! Custom widgets.

pub mod waveform_view;
