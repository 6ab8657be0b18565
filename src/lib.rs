// Library surface for headless/integration tests and reuse.
// Keep this free of terminal rendering; the binary owns the UI.
pub mod clock;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod pace;
pub mod runtime;
pub mod scoring;
pub mod sentences;
pub mod session;

pub use config::TestDuration;
pub use error::{Error, Result};
pub use history::{HistoryLog, TestResult};
pub use session::{LiveStats, Status, TestSession, Tick};
