use quickcheck::{Arbitrary, Gen};
use simplelog::{Config, LevelFilter, TestLogger};

mod tree;

/// Routes the crate's rotation and no-op records into the test output.
pub(crate) fn init_logging() {
    // Only the first call in a test binary can install the logger.
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

/// An enum for the various kinds of "things" to do to
/// a balanced tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<T> {
    /// Insert the value into the data structure
    Insert(T),
    /// Delete the value from the data structure
    Delete(T),
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1]).unwrap() {
            0 => Op::Insert(T::arbitrary(g)),
            1 => Op::Delete(T::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}
