//! Map projection definitions and coordinate transforms
//!
//! This module turns projected grid coordinates into geographic longitude and
//! latitude using the ellipsoidal polar-stereographic formulas.
//!
//! # Organization
//!
//! - [`definition`]: PROJ-style projection parameters, ellipsoids and datums
//! - [`stereographic`]: forward and inverse polar-stereographic math
//! - [`transform`]: point, list and grid transforms between two definitions

pub mod definition;
pub mod stereographic;
pub mod transform;

pub use definition::{
    Datum, Ellipsoid, ProjectionDefinition, ProjectionFamily, GEOGRAPHIC_PROJ, GREENLAND_PROJ,
};
pub use stereographic::PolarStereographic;
pub use transform::Transformer;
