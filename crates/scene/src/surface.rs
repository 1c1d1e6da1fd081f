//! The map rendering substrate, as seen by the controller.

use std::time::Duration;

use foundation::{GeoBounds, LngLat};
use layers::OverlayPlacement;
use serde::Serialize;

use crate::viewport::CameraConstraints;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The substrate refused the call.
    Rejected(String),
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceError::Rejected(msg) => write!(f, "map surface rejected command: {msg}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Capabilities the controller needs from a map widget.
///
/// Camera commands start an animation and return immediately.
pub trait MapSurface {
    fn set_constraints(&mut self, constraints: &CameraConstraints) -> Result<(), SurfaceError>;

    /// Localizes basemap labels (ISO 639-1 code).
    fn set_language(&mut self, lang: &str) -> Result<(), SurfaceError>;

    fn fit_bounds(
        &mut self,
        bounds: GeoBounds,
        padding_px: u32,
        duration: Duration,
    ) -> Result<(), SurfaceError>;

    fn fly_to(
        &mut self,
        center: LngLat,
        zoom: f64,
        duration: Duration,
    ) -> Result<(), SurfaceError>;

    fn place_overlay(&mut self, placement: &OverlayPlacement) -> Result<(), SurfaceError>;
}

/// A command as issued to the surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CameraCommand {
    SetConstraints(CameraConstraints),
    SetLanguage {
        lang: String,
    },
    FitBounds {
        bounds: GeoBounds,
        padding_px: u32,
        duration_ms: u64,
    },
    FlyTo {
        center: LngLat,
        zoom: f64,
        duration_ms: u64,
    },
    PlaceOverlay(OverlayPlacement),
}

/// Records every command instead of drawing. Used by tests and the CLI.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<CameraCommand>,
    refuse_language: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose style has no localizable label layers.
    pub fn without_localization() -> Self {
        Self {
            refuse_language: true,
            ..Self::default()
        }
    }

    pub fn commands(&self) -> &[CameraCommand] {
        &self.commands
    }

    /// Camera moves only, ignoring setup and overlays.
    pub fn camera_moves(&self) -> Vec<&CameraCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, CameraCommand::FitBounds { .. } | CameraCommand::FlyTo { .. }))
            .collect()
    }

    pub fn take(&mut self) -> Vec<CameraCommand> {
        std::mem::take(&mut self.commands)
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl MapSurface for RecordingSurface {
    fn set_constraints(&mut self, constraints: &CameraConstraints) -> Result<(), SurfaceError> {
        self.commands.push(CameraCommand::SetConstraints(*constraints));
        Ok(())
    }

    fn set_language(&mut self, lang: &str) -> Result<(), SurfaceError> {
        if self.refuse_language {
            return Err(SurfaceError::Rejected(format!("no label layers for {lang}")));
        }
        self.commands.push(CameraCommand::SetLanguage {
            lang: lang.to_string(),
        });
        Ok(())
    }

    fn fit_bounds(
        &mut self,
        bounds: GeoBounds,
        padding_px: u32,
        duration: Duration,
    ) -> Result<(), SurfaceError> {
        self.commands.push(CameraCommand::FitBounds {
            bounds,
            padding_px,
            duration_ms: millis(duration),
        });
        Ok(())
    }

    fn fly_to(
        &mut self,
        center: LngLat,
        zoom: f64,
        duration: Duration,
    ) -> Result<(), SurfaceError> {
        self.commands.push(CameraCommand::FlyTo {
            center,
            zoom,
            duration_ms: millis(duration),
        });
        Ok(())
    }

    fn place_overlay(&mut self, placement: &OverlayPlacement) -> Result<(), SurfaceError> {
        self.commands.push(CameraCommand::PlaceOverlay(placement.clone()));
        Ok(())
    }
}
