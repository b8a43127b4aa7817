pub mod calculation;
pub mod loader;
pub mod logging;
pub mod report;

pub use calculation::{calculate, combine_rates};
pub use loader::{LabeledRate, RateRecord, RateSchedule, RateScheduleLoader, RateScheduleLoaderError};
pub use report::format_breakdown;
