use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{bearing_angle, euclidean_distance, MarkerPoint};
use crate::Mode;

/// Maximum number of markers a session holds before the next point restarts it.
pub const MAX_MARKERS: usize = 2;

/// Identifies one measurement session. A new id means the session was replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Distance and bearing between the two markers of a complete session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Meters, never negative.
    pub distance: f32,
    /// Radians in `(-π, π]`, measured in the horizontal plane.
    pub bearing: f32,
}

impl Measurement {
    pub fn between(first: MarkerPoint, second: MarkerPoint) -> Self {
        Self {
            distance: euclidean_distance(first, second),
            bearing: bearing_angle(first, second),
        }
    }

    pub fn distance_cm(&self) -> f32 {
        self.distance * 100.0
    }
}

/// Immutable snapshot of the markers placed so far.
///
/// Sessions are never edited in place: [`MeasurementSession::with_point`]
/// returns the session that follows this one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementSession {
    id: SessionId,
    markers: Vec<MarkerPoint>,
    measurement: Option<Measurement>,
}

impl MeasurementSession {
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            markers: Vec::with_capacity(MAX_MARKERS),
            measurement: None,
        }
    }

    fn starting_at(point: MarkerPoint) -> Self {
        let mut session = Self::new();
        session.markers.push(point);
        session
    }

    /// The session that results from placing `point` after this one.
    ///
    /// A full session yields a fresh session holding only `point`.
    pub fn with_point(&self, point: MarkerPoint) -> Self {
        match self.markers.as_slice() {
            [] => Self::starting_at(point),
            [first] => Self {
                id: self.id,
                markers: vec![*first, point],
                measurement: Some(Measurement::between(*first, point)),
            },
            _ => Self::starting_at(point),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn markers(&self) -> &[MarkerPoint] {
        &self.markers
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn first_marker(&self) -> Option<MarkerPoint> {
        self.markers.first().copied()
    }

    pub fn is_complete(&self) -> bool {
        self.markers.len() == MAX_MARKERS
    }

    pub fn measurement(&self) -> Option<Measurement> {
        self.measurement
    }

    pub fn distance(&self) -> Option<f32> {
        self.measurement.map(|m| m.distance)
    }

    pub fn bearing(&self) -> Option<f32> {
        self.measurement.map(|m| m.bearing)
    }
}

impl Default for MeasurementSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Payload handed to the host after every engine call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUpdate {
    pub session_id: SessionId,
    pub mode: Mode,
    pub marker_count: usize,
    pub markers: Vec<MarkerPoint>,
    pub distance: Option<f32>,
    pub bearing: Option<f32>,
    /// Whether the point passed to the call was applied.
    pub recorded: bool,
}

impl SessionUpdate {
    pub fn from_session(session: &MeasurementSession, mode: Mode, recorded: bool) -> Self {
        Self {
            session_id: session.id(),
            mode,
            marker_count: session.marker_count(),
            markers: session.markers().to_vec(),
            distance: session.distance(),
            bearing: session.bearing(),
            recorded,
        }
    }

    pub fn distance_cm(&self) -> Option<f32> {
        self.distance.map(|d| d * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_session_has_no_measurement() {
        let session = MeasurementSession::new();
        assert_eq!(session.marker_count(), 0);
        assert!(session.distance().is_none());
        assert!(session.bearing().is_none());
    }

    #[test]
    fn second_point_completes_session() {
        let first = MeasurementSession::new().with_point(MarkerPoint::ORIGIN);
        assert_eq!(first.marker_count(), 1);
        assert!(first.measurement().is_none());

        let second = first.with_point(MarkerPoint::new(0.3, 0.0, 0.4));
        assert!(second.is_complete());
        assert_eq!(second.id(), first.id());
        assert_relative_eq!(second.distance().unwrap(), 0.5);
        assert_relative_eq!(second.measurement().unwrap().distance_cm(), 50.0);
    }

    #[test]
    fn third_point_replaces_session() {
        let full = MeasurementSession::new()
            .with_point(MarkerPoint::ORIGIN)
            .with_point(MarkerPoint::new(1.0, 0.0, 0.0));
        let restarted = full.with_point(MarkerPoint::new(5.0, 0.0, 5.0));

        assert_ne!(restarted.id(), full.id());
        assert_eq!(restarted.markers(), &[MarkerPoint::new(5.0, 0.0, 5.0)]);
        assert!(restarted.distance().is_none());
        // the previous snapshot is untouched
        assert_eq!(full.marker_count(), 2);
    }

    #[test]
    fn update_serializes_absent_values_as_null() {
        let session = MeasurementSession::new().with_point(MarkerPoint::ORIGIN);
        let update = SessionUpdate::from_session(&session, Mode::Measuring, true);
        let json = serde_json::to_value(&update).unwrap();
        assert!(json["distance"].is_null());
        assert_eq!(json["marker_count"], 1);
        assert_eq!(json["markers"].as_array().unwrap().len(), 1);
    }
}
