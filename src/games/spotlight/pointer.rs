use std::time::{Duration, Instant};

use crate::core::geometry::{LogicalPoint, Viewport};

/// Drag state for steering the local avatar
#[derive(Debug, Clone)]
pub struct PointerTracker {
    moving: bool,
    min_interval: Duration,
    last_sent: Option<Instant>,
    // newest target swallowed by the throttle
    held_back: Option<LogicalPoint>,
}

impl PointerTracker {
    /// `min_interval` of zero forwards every move event.
    pub fn new(min_interval: Duration) -> Self {
        Self { moving: false, min_interval, last_sent: None, held_back: None }
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Enter moving mode. The first move after a press is never throttled.
    pub fn press(&mut self) {
        self.moving = true;
        self.last_sent = None;
        self.held_back = None;
    }

    /// Leave moving mode, handing back the last target the throttle held
    /// back so the avatar still ends up under the pointer.
    pub fn release(&mut self) -> Option<LogicalPoint> {
        self.moving = false;
        self.held_back.take()
    }

    /// Clamped logical target for a pointer at a screen position, or `None`
    /// when not moving, throttled, or the container has no area.
    pub fn track(
        &mut self,
        viewport: &Viewport,
        column: f64,
        row: f64,
        now: Instant,
    ) -> Option<LogicalPoint> {
        if !self.moving {
            return None;
        }
        let target = viewport.to_logical(column, row)?;
        if let Some(last) = self.last_sent {
            if now.saturating_duration_since(last) < self.min_interval {
                self.held_back = Some(target);
                return None;
            }
        }
        self.last_sent = Some(now);
        self.held_back = None;
        Some(target)
    }
}
