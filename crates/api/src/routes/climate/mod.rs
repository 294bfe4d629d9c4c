pub mod precipitation;
pub mod stations;
pub mod temperature_stats;
pub mod tobs;

pub use precipitation::precipitation;
pub use stations::stations;
pub use temperature_stats::{temperature_stats, temperature_stats_range};
pub use tobs::tobs;
