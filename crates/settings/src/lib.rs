use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
};
use thiserror::Error;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "armeasure";
const APPLICATION: &str = "armeasure";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("unable to resolve platform config directory")]
    MissingProjectDirs,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureSettings {
    pub display: DisplaySettings,
    pub markers: MarkerStyle,
    pub line: LineStyle,
    pub label: LabelStyle,
    pub measuring_box: BoxStyle,
}

/// How distances are written for the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub unit: DistanceUnit,
    /// Decimal places on the floating label next to the line
    pub label_decimals: u8,
    /// Decimal places in the status panel
    pub status_decimals: u8,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            unit: DistanceUnit::Centimeters,
            label_decimals: 1,
            status_decimals: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum DistanceUnit {
    Meters,
    #[default]
    Centimeters,
    Inches,
}

impl DistanceUnit {
    pub const fn suffix(self) -> &'static str {
        match self {
            DistanceUnit::Meters => "m",
            DistanceUnit::Centimeters => "cm",
            DistanceUnit::Inches => "in",
        }
    }

    pub fn from_meters(self, meters: f32) -> f32 {
        match self {
            DistanceUnit::Meters => meters,
            DistanceUnit::Centimeters => meters * 100.0,
            DistanceUnit::Inches => meters / 0.0254,
        }
    }

    /// Format a distance in meters, e.g. `"12.3 cm"`.
    pub fn format(self, meters: f32, decimals: u8) -> String {
        format!(
            "{:.*} {}",
            decimals as usize,
            self.from_meters(meters),
            self.suffix()
        )
    }
}

/// Sphere drawn at each placed marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    /// Radius in meters
    pub radius: f32,
    /// RGB color (0.0 - 1.0)
    pub color: [f32; 3],
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 0.005,
            color: [1.0, 1.0, 1.0],
        }
    }
}

/// Bar connecting the two markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    pub width: f32,
    pub depth: f32,
    pub color: [f32; 3],
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            width: 0.003,
            depth: 0.001,
            color: [1.0, 1.0, 1.0],
        }
    }
}

/// Billboard text showing the measured distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    pub scale: f32,
    pub extrusion_depth: f32,
    pub font_size: f32,
    pub color: [f32; 3],
    /// Lift above the segment midpoint, in meters
    pub lift: f32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            scale: 0.2,
            extrusion_depth: 0.01,
            font_size: 0.1,
            color: [0.0, 0.0, 0.0],
            lift: 0.02,
        }
    }
}

/// Box stretched from the first marker while measuring live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxStyle {
    /// Edge length of the box cross-section in meters
    pub edge: f32,
    pub color: [f32; 3],
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            edge: 0.01,
            color: [1.0, 1.0, 1.0],
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new() -> Result<Self, SettingsError> {
        let dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(SettingsError::MissingProjectDirs)?;
        let config_dir = dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(Self::at(config_dir.join(SETTINGS_FILE)))
    }

    /// Store backed by an explicit file instead of the platform config dir.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<MeasureSettings, SettingsError> {
        if !self.path.exists() {
            return Ok(MeasureSettings::default());
        }
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let settings = serde_json::from_reader(reader)?;
        Ok(settings)
    }

    pub fn save(&self, settings: &MeasureSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(file, settings)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Clone for SettingsStore {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(dir.path().join("settings.json"));
        assert_eq!(store.load().unwrap(), MeasureSettings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::at(dir.path().join("nested").join("settings.json"));
        let mut settings = MeasureSettings::default();
        settings.display.unit = DistanceUnit::Inches;
        settings.markers.radius = 0.01;
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "display": { "unit": "Meters" } }"#).unwrap();
        let settings = SettingsStore::at(&path).load().unwrap();
        assert_eq!(settings.display.unit, DistanceUnit::Meters);
        assert_eq!(settings.display.label_decimals, 1);
        assert_eq!(settings.line, LineStyle::default());
    }

    #[test]
    fn malformed_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        let err = SettingsStore::at(&path).load().unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn formats_distance_in_units() {
        assert_eq!(DistanceUnit::Centimeters.format(0.1234, 1), "12.3 cm");
        assert_eq!(DistanceUnit::Centimeters.format(1.0, 2), "100.00 cm");
        assert_eq!(DistanceUnit::Meters.format(1.5, 2), "1.50 m");
        assert_eq!(DistanceUnit::Inches.format(0.0254, 0), "1 in");
    }
}
