
use simplelog::{Config, LevelFilter, TestLogger};

/// Routes the crate's rotation and no-op records into the test output.
pub(crate) fn init_logging() {
    // Only the first call in a test binary can install the logger.
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}
