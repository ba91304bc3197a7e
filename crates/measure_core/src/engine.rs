//! Measurement engine: owns the current session and the Idle/Measuring mode.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::geometry::MarkerPoint;
use crate::session::{Measurement, MeasurementSession, SessionUpdate};

/// Whether the engine is accepting new markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Idle,
    Measuring,
}

impl Mode {
    /// Map the host's on/off switch to a mode.
    pub const fn from_switch(on: bool) -> Self {
        if on {
            Mode::Measuring
        } else {
            Mode::Idle
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Mode::Idle => Mode::Measuring,
            Mode::Measuring => Mode::Idle,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::Measuring => "measuring",
        }
    }
}

/// Uncommitted measurement from the first marker to the current focus point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    pub anchor: MarkerPoint,
    pub focus: MarkerPoint,
    pub measurement: Measurement,
}

/// Single-threaded owner of the marker state.
///
/// Hosts that receive points on several threads must marshal them onto one
/// thread before calling into the engine.
#[derive(Debug, Default)]
pub struct MeasurementEngine {
    mode: Mode,
    session: MeasurementSession,
}

impl MeasurementEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn session(&self) -> &MeasurementSession {
        &self.session
    }

    /// Snapshot of the current state without changing anything.
    pub fn snapshot(&self) -> SessionUpdate {
        SessionUpdate::from_session(&self.session, self.mode, false)
    }

    /// Place a marker at `point`. Ignored while idle.
    pub fn record_point(&mut self, point: MarkerPoint) -> SessionUpdate {
        if self.mode == Mode::Idle {
            debug!(?point, "ignoring point while idle");
            return self.snapshot();
        }

        let next = self.session.with_point(point);
        if next.id() != self.session.id() {
            debug!(session = ?next.id(), "starting new measurement session");
        }
        if let Some(measurement) = next.measurement() {
            info!(
                distance_m = measurement.distance,
                bearing_rad = measurement.bearing,
                "measurement complete"
            );
        }
        self.session = next;
        SessionUpdate::from_session(&self.session, self.mode, true)
    }

    /// Drop all markers and derived values.
    pub fn reset(&mut self) -> SessionUpdate {
        self.session = MeasurementSession::new();
        debug!(session = ?self.session.id(), "session reset");
        self.snapshot()
    }

    /// Switch modes. Entering `Measuring` starts from an empty session; leaving
    /// it keeps the last result readable.
    pub fn set_mode(&mut self, mode: Mode) -> SessionUpdate {
        if mode == self.mode {
            return self.snapshot();
        }
        info!(from = self.mode.label(), to = mode.label(), "mode changed");
        self.mode = mode;
        if mode == Mode::Measuring {
            return self.reset();
        }
        self.snapshot()
    }

    pub fn toggle(&mut self) -> SessionUpdate {
        self.set_mode(self.mode.toggled())
    }

    /// Live distance from the placed marker to `focus`, while waiting for the second tap.
    pub fn preview(&self, focus: MarkerPoint) -> Option<Preview> {
        if self.mode != Mode::Measuring || self.session.marker_count() != 1 {
            return None;
        }
        let anchor = self.session.first_marker()?;
        Some(Preview {
            anchor,
            focus,
            measurement: Measurement::between(anchor, focus),
        })
    }
}
