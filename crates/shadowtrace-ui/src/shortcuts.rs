//! Keyboard shortcuts
//!
//! - Space: pause vector & time
//! - Ctrl+Space: continue vector & time

use egui::{Context, Key, Modifiers};

/// Action bound to a key chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Pause the rig and the waveform.
    PauseVectorAndTime,
    /// Resume the rig and the waveform.
    ContinueVectorAndTime,
}

/// Maps a key press to a shortcut.
pub fn shortcut_for(key: Key, modifiers: Modifiers) -> Option<Shortcut> {
    match key {
        Key::Space if modifiers.command || modifiers.ctrl => Some(Shortcut::ContinueVectorAndTime),
        Key::Space if modifiers.is_none() => Some(Shortcut::PauseVectorAndTime),
        _ => None,
    }
}

/// Shortcuts pressed this frame. Ignored while a text field has focus.
pub fn poll(ctx: &Context) -> Vec<Shortcut> {
    if ctx.wants_keyboard_input() {
        return Vec::new();
    }
    ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    modifiers,
                    ..
                } => shortcut_for(*key, *modifiers),
                _ => None,
            })
            .collect()
    })
}
