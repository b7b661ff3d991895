//! Sample shift buffer
//!
//! Slot 0 is the newest (rightmost) height, the last slot the oldest (leftmost).

/// Number of slots kept in the waveform history.
pub const SAMPLE_CAPACITY: usize = 1000;

/// Fixed-capacity shift register of projected heights in screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    slots: Box<[f32; SAMPLE_CAPACITY]>,
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleBuffer {
    /// Creates an all-zero buffer.
    pub fn new() -> Self {
        Self {
            slots: Box::new([0.0; SAMPLE_CAPACITY]),
        }
    }

    /// Moves every slot one position toward the oldest end and stores `value` in slot 0.
    ///
    /// The oldest value falls off. No allocation happens here.
    pub fn shift_in(&mut self, value: f32) {
        self.slots.copy_within(0..SAMPLE_CAPACITY - 1, 1);
        self.slots[0] = value;
    }

    /// Zeroes every slot. The capacity is unchanged.
    pub fn clear(&mut self) {
        self.slots.fill(0.0);
    }

    /// Newest value.
    pub fn newest(&self) -> f32 {
        self.slots[0]
    }

    /// Value at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<f32> {
        self.slots.get(index).copied()
    }

    /// All slots, newest first.
    pub fn as_slice(&self) -> &[f32] {
        &self.slots[..]
    }

    /// Always [`SAMPLE_CAPACITY`].
    pub fn len(&self) -> usize {
        SAMPLE_CAPACITY
    }

    /// Never true, the buffer is fixed-size.
    pub fn is_empty(&self) -> bool {
        false
    }
}
