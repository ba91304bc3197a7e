use measure_core::{
    FocusStatus, FocusTracker, MarkerPoint, MeasurementEngine, Mode, Preview, ScreenPoint,
    SessionUpdate, WorldHit, WorldPointSource,
};
use overlay::{Overlay, StatusReport, TrackingState};
use serde::Serialize;
use settings::MeasureSettings;
use tracing::{debug, info};

use crate::script::HostEvent;

/// Surface that answers the next hit test with a scripted result.
#[derive(Debug, Default)]
pub struct ScriptedSurface {
    pending: Option<MarkerPoint>,
    hit_tests: usize,
}

impl ScriptedSurface {
    pub fn expect(&mut self, hit: Option<[f32; 3]>) {
        self.pending = hit.map(MarkerPoint::from);
    }

    pub fn hit_tests(&self) -> usize {
        self.hit_tests
    }
}

impl WorldPointSource for ScriptedSurface {
    fn hit_test(&mut self, screen: ScreenPoint) -> Option<WorldHit> {
        self.hit_tests += 1;
        let hit = self.pending.take().map(WorldHit::at);
        debug!(x = screen.x, y = screen.y, hit = hit.is_some(), "hit test");
        hit
    }
}

/// What the host would render after an event.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayFrame {
    pub status: String,
    pub update: SessionUpdate,
    pub overlay: Overlay,
}

pub struct ReplayHost {
    engine: MeasurementEngine,
    tracker: FocusTracker,
    surface: ScriptedSurface,
    settings: MeasureSettings,
    tracking: Option<TrackingState>,
    focus: FocusStatus,
    preview: Option<Preview>,
}

impl ReplayHost {
    pub fn new(viewport: (u32, u32), settings: MeasureSettings) -> Self {
        Self {
            engine: MeasurementEngine::new(),
            tracker: FocusTracker::new(viewport),
            surface: ScriptedSurface::default(),
            settings,
            tracking: None,
            focus: FocusStatus::NotReady,
            preview: None,
        }
    }

    pub fn engine(&self) -> &MeasurementEngine {
        &self.engine
    }

    pub fn surface(&self) -> &ScriptedSurface {
        &self.surface
    }

    pub fn apply(&mut self, event: &HostEvent) -> ReplayFrame {
        let update = match event {
            HostEvent::Switch { on } => {
                self.preview = None;
                self.engine.set_mode(Mode::from_switch(*on))
            }
            HostEvent::Tap { hit } => {
                self.preview = None;
                match self.aim(*hit) {
                    Some(point) => self.engine.record_point(point),
                    None => self.engine.snapshot(),
                }
            }
            HostEvent::Frame { hit } => {
                self.preview = self.aim(*hit).and_then(|point| self.engine.preview(point));
                self.engine.snapshot()
            }
            HostEvent::Tracking { state } => {
                info!(tracking = state.description(), "tracking state changed");
                self.tracking = Some(*state);
                self.engine.snapshot()
            }
        };
        self.frame(update)
    }

    fn aim(&mut self, hit: Option<[f32; 3]>) -> Option<MarkerPoint> {
        self.surface.expect(hit);
        let focus = self.tracker.locate(&mut self.surface, self.engine.mode());
        self.focus = focus.status;
        focus.point
    }

    fn frame(&self, update: SessionUpdate) -> ReplayFrame {
        let report = StatusReport::new(self.focus, self.tracking, &update, self.preview.as_ref());
        let overlay = Overlay::build(&update, self.preview.as_ref(), &self.settings);
        ReplayFrame {
            status: report.render(&self.settings.display),
            update,
            overlay,
        }
    }
}
