use std::time::Duration;

use foundation::time::Timestamp;

/// One turn of the UI event loop.
///
/// Every input (pointer, camera report, fetch completion) is handled inside a
/// frame; the frame's `time` is the timestamp components compare against.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Event-loop time at the start of the frame.
    pub time: Timestamp,
}

impl Frame {
    pub fn new(index: u64, time: Timestamp) -> Self {
        Self { index, time }
    }

    pub fn first() -> Self {
        Self::new(0, Timestamp::ZERO)
    }

    /// The next frame, `dt` later.
    pub fn next(self, dt: Duration) -> Self {
        Self::new(self.index + 1, self.time.saturating_add(dt))
    }

    /// Jumps to `time`; never moves backwards.
    pub fn advance_to(self, time: Timestamp) -> Self {
        Self::new(self.index + 1, time.max(self.time))
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;
    use foundation::time::Timestamp;
    use std::time::Duration;

    #[test]
    fn next_advances_index_and_time() {
        let f0 = Frame::first();
        let f1 = f0.next(Duration::from_millis(16));
        assert_eq!(f1.index, 1);
        assert_eq!(f1.time, Timestamp(16));
    }

    #[test]
    fn advance_to_is_monotonic() {
        let f = Frame::new(3, Timestamp(500));
        let g = f.advance_to(Timestamp(200));
        assert_eq!(g.index, 4);
        assert_eq!(g.time, Timestamp(500));
    }
}
