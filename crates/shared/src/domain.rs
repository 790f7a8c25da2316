use std::{fmt, ops::RangeInclusive, str::FromStr};

use serde::{Deserialize, Serialize};

pub const STIFFNESS_RANGE: RangeInclusive<i64> = 10..=100;
pub const DENSITY_RANGE: RangeInclusive<i64> = 5..=50;

/// Materials the prediction service was trained on.
pub const KNOWN_MATERIALS: [&str; 5] = ["PLA", "ABS", "Resin", "Nylon", "Steel"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Structure {
    Honeycomb,
    Lattice,
    Voronoi,
    Gyroid,
}

impl Structure {
    pub const ALL: [Structure; 4] = [
        Structure::Honeycomb,
        Structure::Lattice,
        Structure::Voronoi,
        Structure::Gyroid,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Structure::Honeycomb => "Honeycomb",
            Structure::Lattice => "Lattice",
            Structure::Voronoi => "Voronoi",
            Structure::Gyroid => "Gyroid",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Structure::Honeycomb => {
                "Honeycomb structures provide excellent strength-to-weight ratio with hexagonal cells. Ideal for applications requiring high stiffness and energy absorption."
            }
            Structure::Lattice => {
                "Lattice structures offer uniform load distribution with interconnected struts. Best for lightweight applications with moderate strength requirements."
            }
            Structure::Voronoi => {
                "Voronoi structures mimic natural cellular patterns, providing good mechanical properties and aesthetic appeal. Suitable for complex geometries."
            }
            Structure::Gyroid => {
                "Gyroid structures feature triply periodic minimal surfaces, offering excellent mechanical properties and efficient material distribution."
            }
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStructure(pub String);

impl FromStr for Structure {
    type Err = UnknownStructure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Structure::ALL
            .into_iter()
            .find(|structure| structure.name() == s)
            .ok_or_else(|| UnknownStructure(s.to_string()))
    }
}

/// Description text shown under a recommended structure. Names are matched
/// exactly; anything the service returns outside the known set gets no text.
pub fn structure_description(name: &str) -> &'static str {
    name.parse::<Structure>()
        .map(Structure::description)
        .unwrap_or("")
}

pub fn is_known_material(material: &str) -> bool {
    KNOWN_MATERIALS.contains(&material)
}
