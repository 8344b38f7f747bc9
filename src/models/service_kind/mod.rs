// Service kind module
// The catalogue of bookable salon services

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A bookable service. Each kind carries a display name, the duration a new
/// booking defaults to, and the color its blocks are drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Haircut,
    Coloring,
    Blowout,
    Manicure,
    Pedicure,
    Facial,
    Waxing,
    Massage,
    Makeup,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 9] = [
        ServiceKind::Haircut,
        ServiceKind::Coloring,
        ServiceKind::Blowout,
        ServiceKind::Manicure,
        ServiceKind::Pedicure,
        ServiceKind::Facial,
        ServiceKind::Waxing,
        ServiceKind::Massage,
        ServiceKind::Makeup,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceKind::Haircut => "Haircut",
            ServiceKind::Coloring => "Hair Coloring",
            ServiceKind::Blowout => "Blowout",
            ServiceKind::Manicure => "Manicure",
            ServiceKind::Pedicure => "Pedicure",
            ServiceKind::Facial => "Facial",
            ServiceKind::Waxing => "Waxing",
            ServiceKind::Massage => "Massage",
            ServiceKind::Makeup => "Makeup",
        }
    }

    pub fn default_duration_minutes(&self) -> u32 {
        match self {
            ServiceKind::Haircut => 45,
            ServiceKind::Coloring => 120,
            ServiceKind::Blowout => 30,
            ServiceKind::Manicure => 45,
            ServiceKind::Pedicure => 60,
            ServiceKind::Facial => 60,
            ServiceKind::Waxing => 30,
            ServiceKind::Massage => 90,
            ServiceKind::Makeup => 60,
        }
    }

    /// Hex color (#RRGGBB) used for the booking block.
    pub fn color(&self) -> &'static str {
        match self {
            ServiceKind::Haircut => "#4A90D9",
            ServiceKind::Coloring => "#B86BD6",
            ServiceKind::Blowout => "#F5A623",
            ServiceKind::Manicure => "#E8578A",
            ServiceKind::Pedicure => "#50C8A8",
            ServiceKind::Facial => "#7ED321",
            ServiceKind::Waxing => "#D0021B",
            ServiceKind::Massage => "#8B572A",
            ServiceKind::Makeup => "#BD10E0",
        }
    }

    /// Stable identifier used for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Haircut => "haircut",
            ServiceKind::Coloring => "coloring",
            ServiceKind::Blowout => "blowout",
            ServiceKind::Manicure => "manicure",
            ServiceKind::Pedicure => "pedicure",
            ServiceKind::Facial => "facial",
            ServiceKind::Waxing => "waxing",
            ServiceKind::Massage => "massage",
            ServiceKind::Makeup => "makeup",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ServiceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown service kind: {}", s))
    }
}
