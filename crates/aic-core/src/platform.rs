//! Platform performance catalog and per-domain default limits.
//!
//! The catalog is loaded once externally (JSON) and read-only thereafter.
//! Platforms override turn rate, climb rate, and the speed/altitude
//! ceilings; the speed change rate always comes from the domain table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::DEPTH_RATE_FT_PER_SEC;
use crate::enums::Domain;

/// Static performance profile for a platform type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub name: String,
    pub max_speed_kt: f64,
    pub max_altitude_ft: f64,
    pub turn_rate_deg_s: f64,
    /// Rated climb in ft/min; divided by 60 for the per-second rate.
    pub climb_rate_ft_min: f64,
    #[serde(default)]
    pub emitters: Vec<String>,
    #[serde(default)]
    pub weapons: Vec<String>,
}

/// Domain-keyed read-only platform lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformCatalog {
    pub by_domain: BTreeMap<Domain, Vec<Platform>>,
}

impl PlatformCatalog {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn get(&self, domain: Domain, name: &str) -> Option<&Platform> {
        self.by_domain.get(&domain)?.iter().find(|p| p.name == name)
    }
}

/// Default performance limits for a domain, used when no platform is
/// assigned. `speed_rate_kt_s` is used even when a platform is assigned.
#[derive(Debug, Clone, Copy)]
pub struct DomainLimits {
    pub max_speed_kt: f64,
    pub max_altitude_ft: f64,
    pub max_depth_ft: f64,
    pub turn_rate_deg_s: f64,
    pub climb_rate_ft_s: f64,
    pub speed_rate_kt_s: f64,
}

impl Domain {
    pub fn limits(self) -> DomainLimits {
        match self {
            Domain::Air => DomainLimits {
                max_speed_kt: 660.0,
                max_altitude_ft: 50_000.0,
                max_depth_ft: 0.0,
                turn_rate_deg_s: 3.0,
                climb_rate_ft_s: 60.0,
                speed_rate_kt_s: 10.0,
            },
            Domain::Surface => DomainLimits {
                max_speed_kt: 35.0,
                max_altitude_ft: 0.0,
                max_depth_ft: 0.0,
                turn_rate_deg_s: 1.0,
                climb_rate_ft_s: 0.0,
                speed_rate_kt_s: 0.5,
            },
            Domain::SubSurface => DomainLimits {
                max_speed_kt: 30.0,
                max_altitude_ft: 0.0,
                max_depth_ft: 1300.0,
                turn_rate_deg_s: 1.5,
                climb_rate_ft_s: DEPTH_RATE_FT_PER_SEC,
                speed_rate_kt_s: 0.5,
            },
            Domain::Land => DomainLimits {
                max_speed_kt: 60.0,
                max_altitude_ft: 0.0,
                max_depth_ft: 0.0,
                turn_rate_deg_s: 6.0,
                climb_rate_ft_s: 0.0,
                speed_rate_kt_s: 2.0,
            },
        }
    }
}
