//! Route synthesis and application scaffold emission.

pub mod emit;
pub mod route;

pub use emit::write_scaffold;
pub use route::{Route, RouteError, collect_routes};
