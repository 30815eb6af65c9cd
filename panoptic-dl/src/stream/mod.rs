//! Dataset stream construction per pipeline mode.

mod batch;
mod evaluate;
mod inference;
mod shuffle;
mod train;

pub use batch::*;
pub use evaluate::*;
pub use inference::*;
pub use shuffle::*;
pub use train::*;

/// Concurrently decoded examples per stream; overlaps file reads and
/// decoding latency only, ordering is unaffected.
const NUM_DECODE_WORKERS: usize = 30;

/// Batches held by the training shuffle buffer.
const SHUFFLE_BUFFER_SIZE: usize = 100;
