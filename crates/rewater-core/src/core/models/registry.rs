use super::water::{ModelError, WaterModel};
use crate::core::utils::geometry::WaterGeometry;
use phf::{Map, phf_map};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

struct BuiltinModel {
    name: &'static str,
    geometry: WaterGeometry,
}

const fn builtin(
    name: &'static str,
    r_oh: f64,
    angle: f64,
    r_om: f64,
    r_ol: f64,
    lp_angle: f64,
) -> BuiltinModel {
    BuiltinModel {
        name,
        geometry: WaterGeometry {
            r_oh,
            angle,
            r_om,
            r_ol,
            lp_angle,
        },
    }
}

// Distances in Angstrom, angles in degrees.
static BUILTIN_MODELS: [BuiltinModel; 12] = [
    builtin("tip3p", 0.9572, 104.52, 0.0, 0.0, 0.0),
    builtin("tip3p-fb", 1.0118, 108.15, 0.0, 0.0, 0.0),
    builtin("spc/e", 1.0000, 109.47, 0.0, 0.0, 0.0),
    builtin("spc/fw", 1.0120, 113.24, 0.0, 0.0, 0.0),
    builtin("spc/eb", 1.0100, 109.47, 0.0, 0.0, 0.0),
    builtin("opc3", 0.97888, 109.47, 0.0, 0.0, 0.0),
    builtin("opc", 0.87243, 103.60, 0.1594, 0.0, 0.0),
    builtin("tip4p", 0.9572, 104.52, 0.15, 0.0, 0.0),
    builtin("tip4p-ew", 0.9572, 104.52, 0.125, 0.0, 0.0),
    builtin("tip4p-fb", 0.9572, 104.52, 0.10527, 0.0, 0.0),
    builtin("tip5p", 0.9572, 104.52, 0.0, 0.7, 109.47),
    builtin("tip5p-e", 0.9572, 104.52, 0.0, 0.7, 109.47),
];

static BUILTIN_INDEX: Map<&'static str, usize> = phf_map! {
    "tip3p" => 0,
    "tip3p-fb" => 1,
    "spc/e" => 2,
    "spc/fw" => 3,
    "spc/eb" => 4,
    "opc3" => 5,
    "opc" => 6,
    "tip4p" => 7,
    "tip4p-ew" => 8,
    "tip4p-fb" => 9,
    "tip5p" => 10,
    "tip5p-e" => 11,
};

/// Name of the model used when none is requested: the first catalog entry.
pub const DEFAULT_MODEL: &str = "tip3p";

/// Names of the built-in models, in catalog order.
pub fn catalog() -> Vec<&'static str> {
    BUILTIN_MODELS.iter().map(|m| m.name).collect()
}

/// Looks up a built-in model by its exact name.
pub fn builtin_model(name: &str) -> Option<WaterModel> {
    BUILTIN_INDEX
        .get(name)
        .and_then(|&index| builtin_model_by_index(index))
}

/// Looks up a built-in model by its position in [`catalog`].
pub fn builtin_model_by_index(index: usize) -> Option<WaterModel> {
    BUILTIN_MODELS
        .get(index)
        .map(|m| WaterModel::from_trusted(m.name, m.geometry))
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid water model: {0}")]
    InvalidModel(#[from] ModelError),
    #[error("Water model '{0}' is defined more than once")]
    DuplicateModel(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModelFile {
    #[serde(default, rename = "model")]
    models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct ModelEntry {
    name: String,
    r_oh: f64,
    angle: f64,
    #[serde(default)]
    r_om: f64,
    #[serde(default)]
    r_ol: f64,
    #[serde(default)]
    lp_angle: f64,
}

impl TryFrom<ModelEntry> for WaterModel {
    type Error = ModelError;

    fn try_from(entry: ModelEntry) -> Result<Self, Self::Error> {
        WaterModel::new(
            entry.name,
            WaterGeometry {
                r_oh: entry.r_oh,
                angle: entry.angle,
                r_om: entry.r_om,
                r_ol: entry.r_ol,
                lp_angle: entry.lp_angle,
            },
        )
    }
}

/// The built-in catalog extended by user-defined models.
///
/// Custom models are appended after the built-ins, so positional lookup keeps the
/// built-in numbering stable. A custom model may not reuse an existing name.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    custom: Vec<WaterModel>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads custom models from a TOML file of `[[model]]` tables.
    ///
    /// ```toml
    /// [[model]]
    /// name = "tip4p-2005"
    /// r-oh = 0.9572
    /// angle = 104.52
    /// r-om = 0.1546
    /// ```
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path).map_err(|e| RegistryError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let file: ModelFile = toml::from_str(&content).map_err(|e| RegistryError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let mut registry = Self::new();
        for entry in file.models {
            registry.add(entry.try_into()?)?;
        }
        Ok(registry)
    }

    pub fn add(&mut self, model: WaterModel) -> Result<(), RegistryError> {
        if self.get(model.name()).is_some() {
            return Err(RegistryError::DuplicateModel(model.name().to_string()));
        }
        self.custom.push(model);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<WaterModel> {
        builtin_model(name).or_else(|| self.custom.iter().find(|m| m.name() == name).cloned())
    }

    pub fn get_by_index(&self, index: usize) -> Option<WaterModel> {
        builtin_model_by_index(index).or_else(|| {
            index
                .checked_sub(BUILTIN_MODELS.len())
                .and_then(|i| self.custom.get(i).cloned())
        })
    }

    /// All model names, built-ins first.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = catalog();
        names.extend(self.custom.iter().map(|m| m.name()));
        names
    }

    /// All models, built-ins first.
    pub fn models(&self) -> Vec<WaterModel> {
        (0..BUILTIN_MODELS.len())
            .filter_map(builtin_model_by_index)
            .chain(self.custom.iter().cloned())
            .collect()
    }

    pub fn default_model(&self) -> WaterModel {
        WaterModel::from_trusted(BUILTIN_MODELS[0].name, BUILTIN_MODELS[0].geometry)
    }
}
