pub mod engine;
pub mod geometry;
pub mod host;
pub mod session;

use thiserror::Error;

pub use engine::{MeasurementEngine, Mode, Preview};
pub use geometry::{bearing_angle, euclidean_distance, MarkerPoint};
pub use host::{Focus, FocusStatus, FocusTracker, ScreenPoint, WorldHit, WorldPointSource};
pub use session::{Measurement, MeasurementSession, SessionId, SessionUpdate, MAX_MARKERS};

/// Convenience alias for fallible point construction.
pub type MeasureResult<T> = Result<T, MeasureError>;

#[derive(Debug, Error)]
pub enum MeasureError {
    #[error("marker coordinates must be finite, got ({x}, {y}, {z})")]
    NonFinite { x: f32, y: f32, z: f32 },
}
