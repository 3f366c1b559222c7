//! Domain model for the admin console: entity wire types, the `Record`
//! schema trait driving the generic CRUD screen, endpoint configuration,
//! and the store error taxonomy. No UI or transport code lives here.

pub mod endpoints;
pub mod entity;
pub mod error;
pub mod session;

pub use endpoints::{AppConfig, EndpointSet};
pub use entity::{Country, Organization, Record, Situation};
pub use error::StoreError;
pub use session::Session;
