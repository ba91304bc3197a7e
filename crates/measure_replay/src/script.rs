use std::{fs::File, io::BufReader, path::Path};

use measure_core::{MarkerPoint, MeasureError};
use overlay::TrackingState;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ScriptResult<T> = Result<T, ScriptError>;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid script: {0}")]
    Json(#[from] serde_json::Error),
    #[error("event {index}: {source}")]
    InvalidEvent {
        index: usize,
        #[source]
        source: MeasureError,
    },
    #[error("viewport must be non-empty, got {0}x{1}")]
    EmptyViewport(u32, u32),
}

/// Something the AR layer would report to the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// Measuring switch flipped.
    Switch { on: bool },
    /// User tapped; `hit` is what the surface hit test at the reticle found.
    Tap { hit: Option<[f32; 3]> },
    /// Per-frame hit test at the reticle.
    Frame { hit: Option<[f32; 3]> },
    /// Camera tracking quality changed.
    Tracking { state: TrackingState },
}

impl HostEvent {
    fn hit(&self) -> Option<[f32; 3]> {
        match self {
            HostEvent::Tap { hit } | HostEvent::Frame { hit } => *hit,
            _ => None,
        }
    }
}

fn default_viewport() -> [u32; 2] {
    [1170, 2532]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default = "default_viewport")]
    pub viewport: [u32; 2],
    pub events: Vec<HostEvent>,
}

impl Script {
    pub fn load(path: &Path) -> ScriptResult<Self> {
        let file = File::open(path)?;
        let script: Script = serde_json::from_reader(BufReader::new(file))?;
        script.validate()?;
        Ok(script)
    }

    pub fn from_json(text: &str) -> ScriptResult<Self> {
        let script: Script = serde_json::from_str(text)?;
        script.validate()?;
        Ok(script)
    }

    fn validate(&self) -> ScriptResult<()> {
        let [width, height] = self.viewport;
        if width == 0 || height == 0 {
            return Err(ScriptError::EmptyViewport(width, height));
        }
        for (index, event) in self.events.iter().enumerate() {
            if let Some([x, y, z]) = event.hit() {
                MarkerPoint::try_new(x, y, z)
                    .map_err(|source| ScriptError::InvalidEvent { index, source })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overlay::LimitedReason;

    #[test]
    fn parses_tagged_events() {
        let script = Script::from_json(
            r#"{
                "events": [
                    {"type": "tracking", "state": {"Limited": "Initializing"}},
                    {"type": "switch", "on": true},
                    {"type": "frame", "hit": null},
                    {"type": "tap", "hit": [0.0, -1.0, 0.5]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(script.viewport, default_viewport());
        assert_eq!(
            script.events,
            vec![
                HostEvent::Tracking {
                    state: TrackingState::Limited(LimitedReason::Initializing)
                },
                HostEvent::Switch { on: true },
                HostEvent::Frame { hit: None },
                HostEvent::Tap {
                    hit: Some([0.0, -1.0, 0.5])
                },
            ]
        );
    }

    #[test]
    fn rejects_empty_viewport() {
        let err = Script::from_json(r#"{"viewport": [0, 10], "events": []}"#).unwrap_err();
        assert!(matches!(err, ScriptError::EmptyViewport(0, 10)));
    }

    #[test]
    fn rejects_unknown_event() {
        let err = Script::from_json(r#"{"events": [{"type": "pinch"}]}"#).unwrap_err();
        assert!(matches!(err, ScriptError::Json(_)));
    }

    #[test]
    fn rejects_overflowing_hit() {
        let err = Script::from_json(
            r#"{"events": [{"type": "switch", "on": true}, {"type": "tap", "hit": [1e39, 0.0, 0.0]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ScriptError::InvalidEvent { index: 1, .. }));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Script::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ScriptError::Io(_)));
    }
}
