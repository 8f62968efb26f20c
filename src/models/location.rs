use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// A single location fix (WGS84 degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub latitude: f64,
    pub longitude: f64,
}

impl Fix {
    /// Build a fix, rejecting out-of-range coordinates
    pub fn new(latitude: f64, longitude: f64) -> AppResult<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(AppError::InvalidCoordinates(format!(
                "latitude {latitude} out of range"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(AppError::InvalidCoordinates(format!(
                "longitude {longitude} out of range"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse `"lat,lon"` (whitespace tolerated), as printed by location commands.
    pub fn parse(s: &str) -> AppResult<Self> {
        let (lat, lon) = s
            .trim()
            .split_once(',')
            .ok_or_else(|| AppError::InvalidCoordinates(s.trim().to_string()))?;

        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidCoordinates(s.trim().to_string()))?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidCoordinates(s.trim().to_string()))?;

        Self::new(lat, lon)
    }
}
