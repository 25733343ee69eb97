//! Document-graph resolution
//!
//! The resolvers turn one root event record into the normalized
//! [`FullComposition`](crate::domain::FullComposition) aggregate:
//!
//! - [`composition`] - the aggregation engine driving the dereference
//!   chain for one record
//! - [`location`] - administrative ancestry for a leaf location
//! - [`observation`] - fixed-vocabulary observation value extraction

pub mod composition;
pub mod location;
pub mod observation;

pub use composition::CompositionResolver;
pub use location::{LocationIndex, ResolvedHierarchy};
pub use observation::extract_values;
