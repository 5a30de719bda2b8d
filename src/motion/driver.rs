//! Per-frame scheduling of the active motion.
//!
//! The [`AnimationDriver`] owns exactly one registration with the host's
//! [`FrameScheduler`] while it is running. Every reconfiguration cancels the
//! previous registration before a new one is made, and a tick is only honoured
//! when its token is both the driver's current registration and still live in
//! the scheduler.

use crate::animation::ClipBinding;
use crate::host::{FrameScheduler, FrameTick, FrameToken, NodeTransforms};
use crate::motion::params::CustomParams;
use crate::motion::profile::{MotionState, ProfileId};
use crate::scene::NodeHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// No asset bound.
    Idle,
    /// One profile or clip advancing every frame.
    Running,
    /// Permanently cancelled.
    Suspended,
}

/// What the driver advances each frame.
#[derive(Debug)]
pub enum ActiveMotion {
    Profile(MotionState),
    Clip(ClipBinding),
}

impl ActiveMotion {
    #[must_use]
    pub fn profile(id: ProfileId) -> Self {
        ActiveMotion::Profile(MotionState::new(id))
    }

    #[must_use]
    pub fn clip_name(&self) -> Option<&str> {
        match self {
            ActiveMotion::Clip(binding) => Some(binding.name()),
            ActiveMotion::Profile(_) => None,
        }
    }
}

#[derive(Debug)]
struct Registration {
    token: FrameToken,
    root: NodeHandle,
    motion: ActiveMotion,
}

#[derive(Debug)]
pub struct AnimationDriver {
    state: DriverState,
    current: Option<Registration>,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationDriver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: DriverState::Idle,
            current: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> DriverState {
        self.state
    }

    #[must_use]
    pub fn token(&self) -> Option<FrameToken> {
        self.current.as_ref().map(|r| r.token)
    }

    #[must_use]
    pub fn root(&self) -> Option<NodeHandle> {
        self.current.as_ref().map(|r| r.root)
    }

    #[must_use]
    pub fn motion(&self) -> Option<&ActiveMotion> {
        self.current.as_ref().map(|r| &r.motion)
    }

    /// Cancels any current registration, then registers `motion` against `root`.
    ///
    /// Returns `None` when the driver is suspended.
    pub fn start<F>(&mut self, frames: &mut F, root: NodeHandle, motion: ActiveMotion) -> Option<FrameToken>
    where
        F: FrameScheduler + ?Sized,
    {
        if self.state == DriverState::Suspended {
            log::warn!("AnimationDriver is suspended; start ignored");
            return None;
        }

        self.cancel_current(frames);

        let token = frames.register();
        log::debug!(
            "AnimationDriver: {:?} -> Running (token {}, {})",
            self.state,
            token.id(),
            match &motion {
                ActiveMotion::Profile(state) => format!("profile '{}'", state.id()),
                ActiveMotion::Clip(binding) => format!("clip '{}'", binding.name()),
            }
        );

        self.current = Some(Registration { token, root, motion });
        self.state = DriverState::Running;
        Some(token)
    }

    /// Cancels the current registration and returns to `Idle`.
    pub fn stop<F>(&mut self, frames: &mut F)
    where
        F: FrameScheduler + ?Sized,
    {
        self.cancel_current(frames);
        if self.state == DriverState::Running {
            log::debug!("AnimationDriver: Running -> Idle");
            self.state = DriverState::Idle;
        }
    }

    /// Cancels the current registration permanently. Idempotent.
    pub fn suspend<F>(&mut self, frames: &mut F)
    where
        F: FrameScheduler + ?Sized,
    {
        self.cancel_current(frames);
        if self.state != DriverState::Suspended {
            log::debug!("AnimationDriver: {:?} -> Suspended", self.state);
            self.state = DriverState::Suspended;
        }
    }

    /// Runs one frame for `tick`.
    ///
    /// Returns `false` without touching the scene when the tick does not belong
    /// to the current, still-live registration, or when the bound root is gone.
    pub fn step<F, S>(&mut self, tick: FrameTick, frames: &F, scene: &mut S, params: &CustomParams) -> bool
    where
        F: FrameScheduler + ?Sized,
        S: NodeTransforms + ?Sized,
    {
        if self.state != DriverState::Running {
            return false;
        }
        let Some(reg) = self.current.as_mut() else {
            return false;
        };
        if reg.token != tick.token || !frames.is_live(tick.token) {
            log::trace!("Dropping stale frame tick {}", tick.token.id());
            return false;
        }

        match &mut reg.motion {
            ActiveMotion::Profile(state) => {
                let Some(transform) = scene.transform_mut(reg.root) else {
                    return false;
                };
                state.advance(tick.dt, params, transform);
                true
            }
            ActiveMotion::Clip(binding) => {
                if scene.transform_mut(reg.root).is_none() {
                    return false;
                }
                binding.update(tick.dt, scene);
                true
            }
        }
    }

    fn cancel_current<F>(&mut self, frames: &mut F)
    where
        F: FrameScheduler + ?Sized,
    {
        if let Some(reg) = self.current.take() {
            frames.cancel(reg.token);
        }
    }
}
