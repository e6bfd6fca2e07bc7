pub mod clock;
pub mod services;
pub mod station;

pub use clock::{Clock, FixedClock, SystemClock};
pub use station::{Station, StationState, CURRENT_SCHEMA_VERSION};
