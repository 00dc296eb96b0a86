use serde::{Deserialize, Serialize};

/// Index into a fixed-length rotating sequence.
///
/// The cursor never leaves `0..len` once `len > 0`. An empty sequence pins
/// the cursor at zero and every move is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationCursor {
    index: usize,
    len: usize,
}

impl RotationCursor {
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }

    /// Clamps a requested position by wraparound.
    ///
    /// Anything past the end lands on the first item and anything before
    /// the start lands on the last item. This is deliberately not a modulo:
    /// navigation only ever requests neighbours or explicit positions.
    #[must_use]
    pub fn normalize(self, requested: i64) -> usize {
        if self.len == 0 {
            return 0;
        }
        if requested < 0 {
            return self.len - 1;
        }
        match usize::try_from(requested) {
            Ok(index) if index < self.len => index,
            _ => 0,
        }
    }

    /// Moves to the normalized position and returns it.
    pub fn move_to(&mut self, requested: i64) -> usize {
        self.index = self.normalize(requested);
        self.index
    }

    /// Steps forward by one, wrapping to zero after the last item.
    pub fn advance(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    /// Signed position of the neighbour at `delta` steps, before normalization.
    #[must_use]
    pub fn offset_by(self, delta: i64) -> i64 {
        i64::try_from(self.index).unwrap_or(i64::MAX).saturating_add(delta)
    }
}
