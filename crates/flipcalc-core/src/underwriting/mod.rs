pub mod engine;
pub mod results;
pub mod schedule;

pub use engine::{evaluate, underwrite, DEFAULT_MAX_ARV_PERCENT};
pub use results::{ArvScenario, ResultsRecord};
pub use schedule::DrawSchedule;
