use std::time::Duration;

/// Distance a drag must exceed (strictly) before release commits instead of
/// snapping back. Fixed distance only; release velocity is ignored, so a fast
/// flick and a slow drag of equal length behave identically.
pub const DISMISS_THRESHOLD: f32 = 100.0;

/// Logical points represented by one terminal cell row. Mouse drags arrive in
/// rows and are converted to points before they reach the controller.
pub const POINTS_PER_ROW: f32 = 16.0;

/// Sign of the tracked delta. `Positive` grows downward on the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragDirection {
    Positive,
    Negative,
}

impl DragDirection {
    fn of(value: f32) -> Self {
        if value >= 0.0 { Self::Positive } else { Self::Negative }
    }

    fn signum(self) -> f32 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
}

/// Drag axis. Every current call site tracks the vertical axis; the
/// horizontal variant exists so a horizontally-swiped surface can reuse the
/// same controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragAxis {
    #[default]
    Vertical,
    Horizontal,
}

/// Per-surface tuning for a [`DragController`].
#[derive(Debug, Clone)]
pub struct DragPolicy {
    pub axis: DragAxis,
    /// Commit requires the tracked |delta| to strictly exceed this.
    pub threshold: f32,
    pub accept_positive: bool,
    pub accept_negative: bool,
    /// Magnitude of the terminal offset a commit animates toward
    /// (the screen height, in points, for full-screen surfaces).
    pub travel: f32,
    pub commit_duration: Duration,
    pub snap_duration: Duration,
}

impl DragPolicy {
    /// Bottom sheets dismiss with a downward drag only.
    pub fn dismiss_sheet(travel: f32) -> Self {
        Self {
            axis: DragAxis::Vertical,
            threshold: DISMISS_THRESHOLD,
            accept_positive: true,
            accept_negative: false,
            travel,
            commit_duration: Duration::from_millis(200),
            snap_duration: Duration::from_millis(200),
        }
    }

    /// The card feed swipes both ways: up advances, down retreats.
    pub fn vertical_feed(travel: f32) -> Self {
        Self {
            axis: DragAxis::Vertical,
            threshold: DISMISS_THRESHOLD,
            accept_positive: true,
            accept_negative: true,
            travel,
            commit_duration: Duration::from_millis(300),
            snap_duration: Duration::from_millis(200),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum DragState {
    Resting,
    Dragging,
    Committing {
        direction: DragDirection,
        from: f32,
        elapsed: Duration,
    },
    SnappingBack {
        from: f32,
        elapsed: Duration,
    },
}

/// What a release did: started a commit animation toward the terminal offset,
/// or started a snap-back to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Committing(DragDirection),
    SnappingBack,
}

/// Translates a one-dimensional drag into either a commit (dismiss a sheet,
/// advance the feed index) or a snap back to rest, and drives the animation
/// between those states.
///
/// One instance per gesture surface; the policy carries the per-surface
/// differences (accepted directions, travel, durations). A new gesture cannot
/// interrupt a commit animation already in flight.
#[derive(Debug, Clone)]
pub struct DragController {
    policy: DragPolicy,
    state: DragState,
    position: f32,
}

impl DragController {
    pub fn new(policy: DragPolicy) -> Self {
        Self {
            policy,
            state: DragState::Resting,
            position: 0.0,
        }
    }

    /// Current animated offset in points. Positive is downward (or rightward
    /// on the horizontal axis).
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Offset in whole terminal rows, for rendering.
    pub fn offset_rows(&self) -> i32 {
        (self.position / POINTS_PER_ROW).round() as i32
    }

    pub fn is_resting(&self) -> bool {
        self.state == DragState::Resting
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    pub fn is_animating(&self) -> bool {
        matches!(
            self.state,
            DragState::Committing { .. } | DragState::SnappingBack { .. }
        )
    }

    /// Start tracking a gesture. Ignored while a commit animation is in
    /// flight; a snap-back in progress is taken over by the new gesture.
    pub fn begin(&mut self) -> bool {
        match self.state {
            DragState::Committing { .. } => false,
            _ => {
                self.state = DragState::Dragging;
                true
            }
        }
    }

    /// Track a move event. `delta` is the raw offset from the gesture origin;
    /// deltas in a direction the policy rejects clamp the position to zero.
    pub fn drag_to(&mut self, delta: f32) {
        if self.state != DragState::Dragging {
            return;
        }
        let accepted = match DragDirection::of(delta) {
            DragDirection::Positive => self.policy.accept_positive,
            DragDirection::Negative => self.policy.accept_negative,
        };
        self.position = if accepted { delta } else { 0.0 };
    }

    /// End the gesture. Commits when the accumulated delta strictly exceeds
    /// the threshold *and* `permit` accepts the direction; otherwise snaps
    /// back. A delta of exactly the threshold snaps back.
    pub fn release(&mut self, permit: impl FnOnce(DragDirection) -> bool) -> ReleaseOutcome {
        if self.state != DragState::Dragging {
            return ReleaseOutcome::SnappingBack;
        }
        let direction = DragDirection::of(self.position);
        if self.position.abs() > self.policy.threshold && permit(direction) {
            self.start_commit(direction);
            ReleaseOutcome::Committing(direction)
        } else {
            self.start_snap_back();
            ReleaseOutcome::SnappingBack
        }
    }

    /// Start a commit animation directly, without a preceding drag. Used by
    /// keyboard equivalents of the swipe gestures. Ignored while another
    /// commit is in flight.
    pub fn commit(&mut self, direction: DragDirection) -> bool {
        if matches!(self.state, DragState::Committing { .. }) {
            return false;
        }
        self.start_commit(direction);
        true
    }

    fn start_commit(&mut self, direction: DragDirection) {
        self.state = DragState::Committing {
            direction,
            from: self.position,
            elapsed: Duration::ZERO,
        };
    }

    fn start_snap_back(&mut self) {
        if self.position == 0.0 {
            self.state = DragState::Resting;
        } else {
            self.state = DragState::SnappingBack {
                from: self.position,
                elapsed: Duration::ZERO,
            };
        }
    }

    /// Advance animations by `dt`. Returns the committed direction exactly
    /// once, on the tick where the commit animation reaches the terminal
    /// offset; the position resets to zero at that instant so the next
    /// surface starts at rest.
    pub fn advance(&mut self, dt: Duration) -> Option<DragDirection> {
        match self.state.clone() {
            DragState::Committing {
                direction,
                from,
                elapsed,
            } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.policy.commit_duration {
                    self.position = 0.0;
                    self.state = DragState::Resting;
                    Some(direction)
                } else {
                    let target = direction.signum() * self.policy.travel;
                    let t = elapsed.as_secs_f32() / self.policy.commit_duration.as_secs_f32();
                    self.position = from + (target - from) * t;
                    self.state = DragState::Committing {
                        direction,
                        from,
                        elapsed,
                    };
                    None
                }
            }
            DragState::SnappingBack { from, elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.policy.snap_duration {
                    self.position = 0.0;
                    self.state = DragState::Resting;
                } else {
                    let t = elapsed.as_secs_f32() / self.policy.snap_duration.as_secs_f32();
                    self.position = from * (1.0 - t);
                    self.state = DragState::SnappingBack { from, elapsed };
                }
                None
            }
            DragState::Resting | DragState::Dragging => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_rest(controller: &mut DragController) -> Vec<DragDirection> {
        let mut outcomes = Vec::new();
        for _ in 0..100 {
            if let Some(direction) = controller.advance(Duration::from_millis(16)) {
                outcomes.push(direction);
            }
            if controller.is_resting() {
                break;
            }
        }
        outcomes
    }

    #[test]
    fn delta_at_exactly_threshold_snaps_back() {
        let mut c = DragController::new(DragPolicy::dismiss_sheet(640.0));
        c.begin();
        c.drag_to(100.0);
        assert_eq!(c.release(|_| true), ReleaseOutcome::SnappingBack);
        assert!(run_to_rest(&mut c).is_empty());
        assert_eq!(c.position(), 0.0);
    }

    #[test]
    fn delta_past_threshold_commits_once() {
        let mut c = DragController::new(DragPolicy::dismiss_sheet(640.0));
        c.begin();
        c.drag_to(150.0);
        assert_eq!(
            c.release(|_| true),
            ReleaseOutcome::Committing(DragDirection::Positive)
        );
        let outcomes = run_to_rest(&mut c);
        assert_eq!(outcomes, vec![DragDirection::Positive]);
        assert_eq!(c.position(), 0.0);
        assert!(c.is_resting());
    }

    #[test]
    fn sheet_rejects_upward_drag() {
        let mut c = DragController::new(DragPolicy::dismiss_sheet(640.0));
        c.begin();
        c.drag_to(-150.0);
        assert_eq!(c.position(), 0.0);
        assert_eq!(c.release(|_| true), ReleaseOutcome::SnappingBack);
    }

    #[test]
    fn feed_accepts_both_directions() {
        let mut c = DragController::new(DragPolicy::vertical_feed(640.0));
        c.begin();
        c.drag_to(-150.0);
        assert_eq!(
            c.release(|_| true),
            ReleaseOutcome::Committing(DragDirection::Negative)
        );
        assert_eq!(run_to_rest(&mut c), vec![DragDirection::Negative]);
    }

    #[test]
    fn refused_commit_snaps_back() {
        // The feed refuses a retreat at index zero; the card must re-rest.
        let mut c = DragController::new(DragPolicy::vertical_feed(640.0));
        c.begin();
        c.drag_to(150.0);
        assert_eq!(c.release(|_| false), ReleaseOutcome::SnappingBack);
        assert!(run_to_rest(&mut c).is_empty());
        assert_eq!(c.position(), 0.0);
    }

    #[test]
    fn new_gesture_cannot_interrupt_commit() {
        let mut c = DragController::new(DragPolicy::dismiss_sheet(640.0));
        c.begin();
        c.drag_to(200.0);
        c.release(|_| true);
        c.advance(Duration::from_millis(16));
        assert!(c.is_animating());
        assert!(!c.begin());
        // The commit still lands.
        assert_eq!(run_to_rest(&mut c), vec![DragDirection::Positive]);
    }

    #[test]
    fn new_gesture_takes_over_snap_back() {
        let mut c = DragController::new(DragPolicy::dismiss_sheet(640.0));
        c.begin();
        c.drag_to(80.0);
        c.release(|_| true);
        c.advance(Duration::from_millis(16));
        assert!(c.begin());
        assert!(c.is_dragging());
    }

    #[test]
    fn keyboard_commit_from_rest() {
        let mut c = DragController::new(DragPolicy::vertical_feed(640.0));
        assert!(c.commit(DragDirection::Negative));
        assert!(!c.commit(DragDirection::Positive));
        assert_eq!(run_to_rest(&mut c), vec![DragDirection::Negative]);
    }

    #[test]
    fn position_follows_commit_animation() {
        let mut c = DragController::new(DragPolicy::dismiss_sheet(320.0));
        c.begin();
        c.drag_to(120.0);
        c.release(|_| true);
        c.advance(Duration::from_millis(100));
        // Halfway through a 200ms animation from 120 toward 320.
        assert!(c.position() > 120.0 && c.position() < 320.0);
    }

    #[test]
    fn offset_rows_converts_points_to_rows() {
        let mut c = DragController::new(DragPolicy::dismiss_sheet(640.0));
        c.begin();
        c.drag_to(32.0);
        assert_eq!(c.offset_rows(), 2);
        c.drag_to(35.0);
        assert_eq!(c.offset_rows(), 2);
    }
}
