//! Read-only catalog: categories, places, routes and their stops.

pub mod category;
pub mod place;
pub mod route;

pub use category::Category;
pub use place::Place;
pub use route::{Route, RouteStop, RouteStopPlace};
