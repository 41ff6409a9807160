pub mod job;
pub mod state;

pub use job::{JobRecord, COLUMNS};
pub use state::{RunState, Termination};
