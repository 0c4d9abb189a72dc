use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scene::Color;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("layout must contain at least one seat")]
    NoSeats,
    #[error("{field} must be positive (got {value})")]
    NonPositiveExtent { field: &'static str, value: f32 },
    #[error("{field} must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Placement of the fixed scene entities, in scene-root space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub seat_count: usize,
    pub seat_radius: f32,
    pub seat_height: f32,
    pub seat_half_extents: [f32; 3],
    pub table_center: [f32; 3],
    pub table_radius: f32,
    /// Point seated players are turned to face.
    pub focal_point: [f32; 3],
    pub object_position: [f32; 3],
    pub object_half_extent: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            seat_count: 6,
            seat_radius: 2.15,
            seat_height: 0.42,
            seat_half_extents: [0.225, 0.06, 0.225],
            table_center: [0.0, 0.78, -1.0],
            table_radius: 1.4,
            focal_point: [0.0, 0.0, -1.0],
            object_position: [0.0, 1.2, -0.5],
            object_half_extent: 0.06,
        }
    }
}

impl LayoutConfig {
    pub fn table_center(&self) -> Vec3 {
        Vec3::from_array(self.table_center)
    }

    pub fn focal_point(&self) -> Vec3 {
        Vec3::from_array(self.focal_point)
    }

    pub fn object_position(&self) -> Vec3 {
        Vec3::from_array(self.object_position)
    }

    pub fn seat_half_extents(&self) -> Vec3 {
        Vec3::from_array(self.seat_half_extents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seat_count == 0 {
            return Err(ConfigError::NoSeats);
        }
        ensure_finite("layout.table_center", &self.table_center)?;
        ensure_finite("layout.focal_point", &self.focal_point)?;
        ensure_finite("layout.object_position", &self.object_position)?;
        ensure_finite("layout.seat_height", &[self.seat_height])?;
        ensure_positive("layout.seat_radius", self.seat_radius)?;
        ensure_positive("layout.table_radius", self.table_radius)?;
        ensure_positive("layout.object_half_extent", self.object_half_extent)?;
        for extent in self.seat_half_extents {
            ensure_positive("layout.seat_half_extents", extent)?;
        }
        Ok(())
    }
}

/// Thresholds for the built-in proximity oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Radius of the fingertip sphere used for touch tests.
    pub touch_radius: f32,
    /// Maximum thumb-to-index distance that still counts as a pinch.
    pub pinch_threshold: f32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            touch_radius: 0.03,
            pinch_threshold: 0.025,
        }
    }
}

impl OracleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("oracle.touch_radius", &[self.touch_radius])?;
        if self.touch_radius < 0.0 {
            return Err(ConfigError::NonPositiveExtent {
                field: "oracle.touch_radius",
                value: self.touch_radius,
            });
        }
        ensure_positive("oracle.pinch_threshold", self.pinch_threshold)
    }
}

/// How competing hands share the manipulable object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrabPolicy {
    /// The current holder keeps the object until it releases or stops touching.
    #[default]
    Exclusive,
    /// Every hand grabs independently; the last evaluated holder moves the object.
    LastWriterWins,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub object_idle: Color,
    pub object_touched: Color,
    pub seat_idle: Color,
    pub seat_hovered: Color,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            object_idle: Color(0x00ff00),
            object_touched: Color(0xff0000),
            seat_idle: Color(0x333333),
            seat_hovered: Color(0x00ff00),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub layout: LayoutConfig,
    pub oracle: OracleConfig,
    pub grab_policy: GrabPolicy,
    pub palette: PaletteConfig,
}

impl InteractionConfig {
    pub fn from_json_str(path: &Path, json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(path, &json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()?;
        self.oracle.validate()
    }
}

fn ensure_finite(field: &'static str, values: &[f32]) -> Result<(), ConfigError> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(ConfigError::NonFiniteValue { field })
    }
}

fn ensure_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    ensure_finite(field, &[value])?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositiveExtent { field, value })
    }
}
