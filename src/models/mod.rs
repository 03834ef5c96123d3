//! Core data models shared across the engine

pub mod coordinate;
pub mod route;
pub mod weather;

pub use coordinate::{BoundingBox, Coordinate};
pub use route::{RouteGeometry, RouteStep, RouteUpdate};
pub use weather::WeatherObservation;
