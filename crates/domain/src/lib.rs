//! Domain layer for the Navitia client
//!
//! Contains the entities and value objects decoded from the Navitia API,
//! along with the query values used to build requests. This layer performs
//! no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
