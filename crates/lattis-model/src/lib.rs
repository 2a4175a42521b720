//! Adjacency constraint model and example-layout derivation.
//!
//! A [`ConstraintModel`] maps each placeable option to the set of
//! options allowed to sit next to it in each of the six axis-aligned
//! directions, together with a learned weight per option. Models are
//! either hand-authored through [`ConstraintModel::add_constraint`] or
//! learned from an example layout with [`derive_from_layout`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod derive;
mod model;

pub use derive::{
    derive_from_layout, derive_from_positions, quantize_layout, DeriveConfig, DeriveError,
    DeriveWarning, PlacedSample,
};
pub use model::ConstraintModel;
