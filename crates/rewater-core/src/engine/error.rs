use crate::core::io::gro::GroError;
use crate::core::utils::geometry::GeometryError;
use thiserror::Error;

/// Every way a conversion can fail. The first error aborts the whole run.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error(transparent)]
    Format(#[from] GroError),

    #[error("{source}; current line:\n{line}")]
    Geometry {
        line: String,
        #[source]
        source: GeometryError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
