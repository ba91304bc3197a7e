//! Plain descriptions of the scene elements a host renderer draws.

use std::f32::consts::PI;

use glam::{Quat, Vec3};
use measure_core::{bearing_angle, MarkerPoint};
use serde::{Deserialize, Serialize};
use settings::{BoxStyle, LabelStyle, LineStyle, MarkerStyle};

/// Sphere at a placed marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerVisual {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [f32; 3],
}

impl MarkerVisual {
    pub fn new(point: MarkerPoint, style: &MarkerStyle) -> Self {
        Self {
            position: point.to_array(),
            radius: style.radius,
            color: style.color,
        }
    }
}

/// Thin bar from one marker to the other.
///
/// The bar's local Y axis runs along the segment; `width` and `depth` are
/// its cross-section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineVisual {
    pub from: [f32; 3],
    pub to: [f32; 3],
    pub length: f32,
    pub width: f32,
    pub depth: f32,
    pub color: [f32; 3],
}

impl LineVisual {
    pub fn new(from: MarkerPoint, to: MarkerPoint, style: &LineStyle) -> Self {
        Self {
            from: from.to_array(),
            to: to.to_array(),
            length: (to - from).length(),
            width: style.width,
            depth: style.depth,
            color: style.color,
        }
    }

    pub fn center(&self) -> Vec3 {
        Vec3::from(self.from).lerp(Vec3::from(self.to), 0.5)
    }

    /// Rotation taking the bar's local Y axis onto the segment direction.
    pub fn rotation(&self) -> Quat {
        let direction = (Vec3::from(self.to) - Vec3::from(self.from)).normalize_or_zero();
        if direction == Vec3::ZERO {
            return Quat::IDENTITY;
        }
        Quat::from_rotation_arc(Vec3::Y, direction)
    }
}

/// Axis a billboard may rotate about to keep facing the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillboardAxis {
    Y,
    All,
}

/// Floating distance text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelVisual {
    pub text: String,
    /// Anchor of the text baseline, centered horizontally.
    pub position: [f32; 3],
    pub scale: f32,
    pub font_size: f32,
    pub extrusion_depth: f32,
    pub color: [f32; 3],
    pub billboard: BillboardAxis,
}

impl LabelVisual {
    pub fn new(text: impl Into<String>, anchor: MarkerPoint, style: &LabelStyle) -> Self {
        let position = anchor.to_glam() + Vec3::Y * style.lift;
        Self {
            text: text.into(),
            position: position.to_array(),
            scale: style.scale,
            font_size: style.font_size,
            extrusion_depth: style.extrusion_depth,
            color: style.color,
            billboard: BillboardAxis::Y,
        }
    }
}

/// Box stretched from the first marker toward the current focus while the
/// user looks for the second point. Lies in the horizontal plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasuringBox {
    pub anchor: [f32; 3],
    /// Horizontal extent from the anchor.
    pub length: f32,
    pub edge: f32,
    /// Rotation about +Y applied to the box's local +X axis.
    pub yaw: f32,
    pub color: [f32; 3],
}

impl MeasuringBox {
    pub fn new(anchor: MarkerPoint, focus: MarkerPoint, style: &BoxStyle) -> Self {
        let delta = focus - anchor;
        Self {
            anchor: anchor.to_array(),
            length: delta.x.hypot(delta.z),
            edge: style.edge,
            yaw: -(bearing_angle(anchor, focus) + PI),
            color: style.color,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// World-space center; the box grows from the anchor rather than around it.
    pub fn center(&self) -> Vec3 {
        Vec3::from(self.anchor) + self.rotation() * Vec3::new(self.length * 0.5, 0.0, 0.0)
    }

    /// Full size in local space (x along the measured direction).
    pub fn size(&self) -> Vec3 {
        Vec3::new(self.length, self.edge, self.edge)
    }
}
