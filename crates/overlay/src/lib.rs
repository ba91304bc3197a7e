pub mod status;
pub mod visuals;

use measure_core::{Preview, SessionUpdate};
use serde::{Deserialize, Serialize};
use settings::MeasureSettings;
use tracing::trace;

pub use status::{LimitedReason, StatusReport, TrackingState};
pub use visuals::{BillboardAxis, LabelVisual, LineVisual, MarkerVisual, MeasuringBox};

/// What a host should draw for the current measurement, rebuilt from each
/// [`SessionUpdate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub markers: Vec<MarkerVisual>,
    pub line: Option<LineVisual>,
    pub label: Option<LabelVisual>,
    pub measuring_box: Option<MeasuringBox>,
}

impl Overlay {
    pub fn build(
        update: &SessionUpdate,
        preview: Option<&Preview>,
        settings: &MeasureSettings,
    ) -> Self {
        let markers = update
            .markers
            .iter()
            .map(|point| MarkerVisual::new(*point, &settings.markers))
            .collect();

        let (line, label) = match (update.markers.as_slice(), update.distance) {
            ([from, to], Some(distance)) => {
                let text = settings
                    .display
                    .unit
                    .format(distance, settings.display.label_decimals);
                (
                    Some(LineVisual::new(*from, *to, &settings.line)),
                    Some(LabelVisual::new(text, from.midpoint(*to), &settings.label)),
                )
            }
            _ => (None, None),
        };

        let measuring_box =
            preview.map(|p| MeasuringBox::new(p.anchor, p.focus, &settings.measuring_box));

        let overlay = Self {
            markers,
            line,
            label,
            measuring_box,
        };
        trace!(summary = %overlay.summary(), "overlay rebuilt");
        overlay
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
            && self.line.is_none()
            && self.label.is_none()
            && self.measuring_box.is_none()
    }

    /// One-line description for logs.
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("{} marker(s)", self.markers.len())];
        if let Some(label) = &self.label {
            parts.push(format!("label \"{}\"", label.text));
        }
        if let Some(measuring_box) = &self.measuring_box {
            parts.push(format!("box {:.3} m", measuring_box.length));
        }
        parts.join(", ")
    }
}
