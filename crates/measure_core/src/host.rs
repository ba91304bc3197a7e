use glam::Mat4;
use serde::{Deserialize, Serialize};

use crate::geometry::MarkerPoint;
use crate::Mode;

/// Position in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A successful hit test against a detected surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldHit {
    /// World transform of the hit anchor.
    pub world_transform: Mat4,
}

impl WorldHit {
    pub fn new(world_transform: Mat4) -> Self {
        Self { world_transform }
    }

    pub fn at(point: MarkerPoint) -> Self {
        Self::new(Mat4::from_translation(point.to_glam()))
    }

    /// Translation column of the world transform.
    pub fn point(&self) -> MarkerPoint {
        MarkerPoint::from_glam(self.world_transform.w_axis.truncate())
    }
}

/// Resolves screen locations to points on detected real-world surfaces.
///
/// The engine never decides whether a surface was hit; hosts implement this on
/// top of their plane detection and only forward successful hits.
pub trait WorldPointSource {
    /// Returns `None` when no surface lies under `screen`.
    fn hit_test(&mut self, screen: ScreenPoint) -> Option<WorldHit>;
}

/// Readiness shown to the user for the current screen focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusStatus {
    NotReady,
    Ready,
    Measuring,
}

impl FocusStatus {
    pub const fn label(self) -> &'static str {
        match self {
            FocusStatus::NotReady => "NOT READY",
            FocusStatus::Ready => "READY",
            FocusStatus::Measuring => "MEASURING",
        }
    }
}

/// Outcome of hit-testing the screen focus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Focus {
    pub status: FocusStatus,
    pub point: Option<MarkerPoint>,
}

/// Hit-tests the centre of the viewport, where the on-screen reticle sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTracker {
    viewport: (u32, u32),
}

impl FocusTracker {
    pub fn new(viewport: (u32, u32)) -> Self {
        Self { viewport }
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.viewport.0 as f32 * 0.5, self.viewport.1 as f32 * 0.5)
    }

    pub fn locate<S: WorldPointSource + ?Sized>(&self, source: &mut S, mode: Mode) -> Focus {
        match source.hit_test(self.center()) {
            Some(hit) => Focus {
                status: match mode {
                    Mode::Measuring => FocusStatus::Measuring,
                    Mode::Idle => FocusStatus::Ready,
                },
                point: Some(hit.point()),
            },
            None => Focus {
                status: FocusStatus::NotReady,
                point: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    struct FixedSurface {
        hit: Option<WorldHit>,
        queries: Vec<ScreenPoint>,
    }

    impl WorldPointSource for FixedSurface {
        fn hit_test(&mut self, screen: ScreenPoint) -> Option<WorldHit> {
            self.queries.push(screen);
            self.hit
        }
    }

    #[test]
    fn hit_point_is_translation_column() {
        let transform = Mat4::from_rotation_translation(
            Quat::from_rotation_y(0.7),
            Vec3::new(0.2, -1.0, 3.5),
        );
        let hit = WorldHit::new(transform);
        assert_eq!(hit.point(), MarkerPoint::new(0.2, -1.0, 3.5));
    }

    #[test]
    fn hit_tests_viewport_center() {
        let tracker = FocusTracker::new((800, 600));
        let mut surface = FixedSurface {
            hit: Some(WorldHit::at(MarkerPoint::new(1.0, 0.0, 1.0))),
            queries: Vec::new(),
        };
        let focus = tracker.locate(&mut surface, Mode::Idle);
        assert_eq!(surface.queries, vec![ScreenPoint::new(400.0, 300.0)]);
        assert_eq!(focus.status, FocusStatus::Ready);
        assert_eq!(focus.point, Some(MarkerPoint::new(1.0, 0.0, 1.0)));

        let focus = tracker.locate(&mut surface, Mode::Measuring);
        assert_eq!(focus.status.label(), "MEASURING");
    }

    #[test]
    fn miss_is_not_ready() {
        let tracker = FocusTracker::new((10, 10));
        let mut surface = FixedSurface {
            hit: None,
            queries: Vec::new(),
        };
        let focus = tracker.locate(&mut surface, Mode::Measuring);
        assert_eq!(focus.status, FocusStatus::NotReady);
        assert!(focus.point.is_none());
    }
}
