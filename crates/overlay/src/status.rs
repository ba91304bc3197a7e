use measure_core::{FocusStatus, Preview, SessionUpdate};
use serde::{Deserialize, Serialize};
use settings::DisplaySettings;

/// Why tracking quality is reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitedReason {
    ExcessiveMotion,
    InsufficientFeatures,
    Initializing,
    Relocalizing,
}

/// Camera tracking quality reported by the host's AR session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingState {
    NotAvailable,
    Normal,
    Limited(LimitedReason),
}

impl TrackingState {
    pub const fn description(self) -> &'static str {
        match self {
            TrackingState::NotAvailable => "TRACKING UNAVAILABLE",
            TrackingState::Normal => "TRACKING NORMAL",
            TrackingState::Limited(LimitedReason::ExcessiveMotion) => {
                "TRACKING LIMITED - too much camera movement"
            }
            TrackingState::Limited(LimitedReason::InsufficientFeatures) => {
                "TRACKING LIMITED - not enough surface detail"
            }
            TrackingState::Limited(LimitedReason::Initializing) => "INITIALIZING",
            TrackingState::Limited(LimitedReason::Relocalizing) => "RELOCALIZING",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub focus: FocusStatus,
    pub tracking: Option<TrackingState>,
    /// Meters. Live preview distance wins over the committed one.
    pub distance: f32,
}

impl StatusReport {
    pub fn new(
        focus: FocusStatus,
        tracking: Option<TrackingState>,
        update: &SessionUpdate,
        preview: Option<&Preview>,
    ) -> Self {
        let distance = preview
            .map(|p| p.measurement.distance)
            .or(update.distance)
            .unwrap_or(0.0);
        Self {
            focus,
            tracking,
            distance,
        }
    }

    pub fn render(&self, display: &DisplaySettings) -> String {
        let tracking = self.tracking.map(TrackingState::description).unwrap_or("");
        format!(
            "Status: {}\nTracking: {}\nDistance: {}",
            self.focus.label(),
            tracking,
            display.unit.format(self.distance, display.status_decimals)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use measure_core::{MarkerPoint, MeasurementEngine, Mode};

    #[test]
    fn renders_three_lines() {
        let engine = MeasurementEngine::new();
        let report = StatusReport::new(
            FocusStatus::NotReady,
            Some(TrackingState::Limited(LimitedReason::ExcessiveMotion)),
            &engine.snapshot(),
            None,
        );
        assert_eq!(
            report.render(&DisplaySettings::default()),
            "Status: NOT READY\nTracking: TRACKING LIMITED - too much camera movement\nDistance: 0.00 cm"
        );
    }

    #[test]
    fn prefers_preview_distance() {
        let mut engine = MeasurementEngine::new();
        engine.set_mode(Mode::Measuring);
        let update = engine.record_point(MarkerPoint::ORIGIN);
        let preview = engine.preview(MarkerPoint::new(0.25, 0.0, 0.0)).unwrap();
        let report = StatusReport::new(
            FocusStatus::Measuring,
            Some(TrackingState::Normal),
            &update,
            Some(&preview),
        );
        assert!(report.render(&DisplaySettings::default()).ends_with("Distance: 25.00 cm"));
    }

    #[test]
    fn unknown_tracking_is_blank() {
        let report = StatusReport {
            focus: FocusStatus::Ready,
            tracking: None,
            distance: 0.0,
        };
        assert!(report
            .render(&DisplaySettings::default())
            .contains("Tracking: \n"));
    }
}
