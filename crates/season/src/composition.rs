//! Per-cell crop composition.

use std::collections::BTreeMap;

use crate::crop::Crop;

/// Irrigated and rainfed area of one crop in one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CropAreas {
    /// Fully irrigated area.
    pub irrigated: f64,
    /// Rainfed area.
    pub rainfed: f64,
}

impl CropAreas {
    /// Returns `true` if either land-use class has positive area.
    pub fn is_present(self) -> bool {
        self.irrigated > 0.0 || self.rainfed > 0.0
    }
}

/// Crop composition of one grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellComposition {
    lat: f64,
    lon: f64,
    areas: BTreeMap<Crop, CropAreas>,
}

impl CellComposition {
    /// Creates a cell with no crop area.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            areas: BTreeMap::new(),
        }
    }

    /// Sets the areas of one crop.
    pub fn with_crop(mut self, crop: Crop, irrigated: f64, rainfed: f64) -> Self {
        self.set_areas(crop, CropAreas { irrigated, rainfed });
        self
    }

    /// Sets the areas of one crop in place.
    pub fn set_areas(&mut self, crop: Crop, areas: CropAreas) {
        self.areas.insert(crop, areas);
    }

    /// Cell latitude.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Cell longitude.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Areas of `crop`; zero when the crop is not listed.
    pub fn areas(&self, crop: Crop) -> CropAreas {
        self.areas.get(&crop).copied().unwrap_or_default()
    }

    /// Returns `true` if any crop in `crops` has positive area.
    pub fn grows_any(&self, crops: &[Crop]) -> bool {
        crops.iter().any(|&c| self.areas(c).is_present())
    }
}
