//! Grid construction errors.

use lattis_core::Resolution;
use std::error::Error;
use std::fmt;

/// Why a grid could not be initialized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// The model has no drawable key options: every key is `Border`
    /// or a non-physical sentinel.
    NoUsableOptions,
    /// The resolution has a zero extent on some axis.
    EmptyResolution(Resolution),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::NoUsableOptions => {
                write!(f, "model has no usable key options to seed tiles with")
            }
            GridError::EmptyResolution(resolution) => {
                write!(f, "resolution {resolution} contains no cells")
            }
        }
    }
}

impl Error for GridError {}
