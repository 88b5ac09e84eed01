use crate::core::utils::geometry::{GeometryError, IdealWater, WaterGeometry, idealize_water};
use nalgebra::Point3;
use thiserror::Error;

const CORE_SITES: usize = 3;
const M_SITE_NAMES: [&str; 1] = ["MW"];
const LONE_PAIR_NAMES: [&str; 2] = ["LP1", "LP2"];

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Water model name cannot be empty")]
    EmptyName,
    #[error("Parameter '{field}' of water model '{name}' is not a finite number")]
    NonFinite { name: String, field: &'static str },
    #[error("O-H distance of water model '{name}' must be positive (got {value})")]
    InvalidBondLength { name: String, value: f64 },
    #[error("Angle '{field}' of water model '{name}' must lie strictly between 0 and 180 degrees (got {value})")]
    InvalidAngle {
        name: String,
        field: &'static str,
        value: f64,
    },
    #[error("Water model '{name}' defines both an M site and lone pairs, which cannot be written together")]
    MixedVirtualSites { name: String },
}

/// A rigid water model that molecules can be converted to.
///
/// A value of this type is always valid: the parameters are finite, the geometry is
/// well-defined, and at most one kind of virtual site is present.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterModel {
    name: String,
    geometry: WaterGeometry,
}

impl WaterModel {
    pub fn new(name: impl Into<String>, geometry: WaterGeometry) -> Result<Self, ModelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyName);
        }

        let fields = [
            ("r-oh", geometry.r_oh),
            ("angle", geometry.angle),
            ("r-om", geometry.r_om),
            ("r-ol", geometry.r_ol),
            ("lp-angle", geometry.lp_angle),
        ];
        if let Some(&(field, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ModelError::NonFinite { name, field });
        }
        if geometry.r_oh <= 0.0 {
            return Err(ModelError::InvalidBondLength {
                name,
                value: geometry.r_oh,
            });
        }
        if !is_open_angle(geometry.angle) {
            return Err(ModelError::InvalidAngle {
                name,
                field: "angle",
                value: geometry.angle,
            });
        }
        if geometry.has_lone_pairs() && !is_open_angle(geometry.lp_angle) {
            return Err(ModelError::InvalidAngle {
                name,
                field: "lp-angle",
                value: geometry.lp_angle,
            });
        }
        if geometry.has_m_site() && geometry.has_lone_pairs() {
            return Err(ModelError::MixedVirtualSites { name });
        }

        Ok(Self { name, geometry })
    }

    /// Builds a model from parameters already known to be valid.
    pub(crate) fn from_trusted(name: &str, geometry: WaterGeometry) -> Self {
        Self {
            name: name.to_string(),
            geometry,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &WaterGeometry {
        &self.geometry
    }

    /// Number of atoms written per water molecule: 3, 4 (M site) or 5 (two lone pairs).
    pub fn size(&self) -> usize {
        CORE_SITES + self.virtual_site_names().len()
    }

    /// Atom names of the virtual sites, in the order they are written after O, H1, H2.
    pub fn virtual_site_names(&self) -> &'static [&'static str] {
        if self.geometry.has_m_site() {
            &M_SITE_NAMES
        } else if self.geometry.has_lone_pairs() {
            &LONE_PAIR_NAMES
        } else {
            &[]
        }
    }

    /// Moves the hydrogens of a molecule (Angstrom) onto this model's geometry.
    pub fn transform(
        &self,
        oxygen: &Point3<f64>,
        h1: &Point3<f64>,
        h2: &Point3<f64>,
    ) -> Result<IdealWater, GeometryError> {
        idealize_water(oxygen, h1, h2, &self.geometry)
    }
}

fn is_open_angle(degrees: f64) -> bool {
    degrees > 0.0 && degrees < 180.0
}
