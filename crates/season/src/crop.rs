//! Tracked crops and land-use modes.

use std::fmt;
use std::str::FromStr;

use crate::error::ResolveError;

/// A tracked crop, identified by its short calendar code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Crop {
    /// Maize (`mai`).
    Maize,
    /// Rice, first season (`ri1`).
    Rice1,
    /// Rice, second season (`ri2`).
    Rice2,
    /// Soybean (`soy`).
    Soybean,
    /// Spring wheat (`swh`).
    SpringWheat,
    /// Winter wheat (`wwh`).
    WinterWheat,
}

impl Crop {
    /// Every tracked crop, in code order.
    pub const ALL: [Crop; 6] = [
        Crop::Maize,
        Crop::Rice1,
        Crop::Rice2,
        Crop::Soybean,
        Crop::SpringWheat,
        Crop::WinterWheat,
    ];

    /// Short code used in file names and tables.
    pub fn code(self) -> &'static str {
        match self {
            Crop::Maize => "mai",
            Crop::Rice1 => "ri1",
            Crop::Rice2 => "ri2",
            Crop::Soybean => "soy",
            Crop::SpringWheat => "swh",
            Crop::WinterWheat => "wwh",
        }
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Crop {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        Crop::ALL
            .into_iter()
            .find(|c| c.code() == code)
            .ok_or(ResolveError::UnknownCrop {
                code: s.to_string(),
            })
    }
}

/// Land-use mode, each with its own crop calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LandUse {
    /// Fully irrigated (`firr`).
    Irrigated,
    /// Rainfed (`noirr`).
    Rainfed,
}

impl LandUse {
    /// Both land-use modes.
    pub const ALL: [LandUse; 2] = [LandUse::Irrigated, LandUse::Rainfed];

    /// Token used in calendar file names.
    pub fn token(self) -> &'static str {
        match self {
            LandUse::Irrigated => "firr",
            LandUse::Rainfed => "noirr",
        }
    }
}

impl fmt::Display for LandUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for LandUse {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "firr" => Ok(LandUse::Irrigated),
            "noirr" => Ok(LandUse::Rainfed),
            _ => Err(ResolveError::UnknownLandUse {
                token: s.to_string(),
            }),
        }
    }
}
