//! Domain Layer - Core Entity Trait
//!
//! Every record kept in an ordered collection has a unique id.

use std::fmt;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + fmt::Debug + fmt::Display + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> &Self::Id;
}
