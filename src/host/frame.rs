use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Registration token handed out by a [`FrameScheduler`](super::FrameScheduler).
///
/// Tokens are never reused: each registration gets a strictly larger value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(u64);

impl FrameToken {
    #[inline]
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// One pending per-frame callback invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    pub token: FrameToken,
    /// Seconds since the previous frame.
    pub dt: f32,
}

/// A host loop driven by hand: the caller decides when a frame happens.
#[derive(Debug, Default)]
pub struct ManualFrameLoop {
    next_token: u64,
    live: FxHashSet<FrameToken>,
    frame_count: u64,
}

impl ManualFrameLoop {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new frame and returns a tick for every live registration,
    /// ordered by registration.
    ///
    /// Ticks are only a snapshot: a registration cancelled before its tick is
    /// dispatched must be ignored by the receiver.
    pub fn advance(&mut self, dt: f32) -> SmallVec<[FrameTick; 2]> {
        self.frame_count += 1;
        let mut ticks: SmallVec<[FrameTick; 2]> = self
            .live
            .iter()
            .map(|&token| FrameTick { token, dt })
            .collect();
        ticks.sort_unstable_by_key(|t| t.token);
        ticks
    }

    #[must_use]
    pub fn live_registrations(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl super::FrameScheduler for ManualFrameLoop {
    fn register(&mut self) -> FrameToken {
        self.next_token += 1;
        let token = FrameToken(self.next_token);
        self.live.insert(token);
        token
    }

    fn cancel(&mut self, token: FrameToken) -> bool {
        self.live.remove(&token)
    }

    fn is_live(&self, token: FrameToken) -> bool {
        self.live.contains(&token)
    }
}
