/// How many turns before the target are replayed.
pub const LOOKBACK: i64 = 10;

////////////////////////////////////////////////////////////////////////////////

/// Transcript offsets touched when replaying up to `target`.
///
/// The shape never changes: one start offset, `LOOKBACK + 1` move steps and
/// one end offset, whatever the transcript length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayWindow {
    target: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveStep {
    /// Logical turn printed next to the server's answer.
    pub turn: i64,
    /// Transcript offset of the record sent for this turn.
    pub offset: i64,
}

impl ReplayWindow {
    pub fn new(target: i64) -> Self {
        Self { target }
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn start_offset(&self) -> i64 {
        self.target.saturating_sub(LOOKBACK)
    }

    /// Oldest first.
    pub fn moves(&self) -> impl Iterator<Item = MoveStep> {
        let target = self.target;
        (-LOOKBACK..=0).map(move |i| MoveStep {
            turn: target.saturating_add(i),
            offset: target.saturating_add(1).saturating_add(i),
        })
    }

    pub fn end_offset(&self) -> i64 {
        self.target.saturating_add(2)
    }
}

////////////////////////////////////////////////////////////////////////////////
