//! Record storage: the append-only tuple sequence every other structure
//! points into.

mod error;
mod record;
mod store;

pub use error::{RecordError, RecordResult};
pub use record::{Record, RecordId};
pub use store::{RecordStore, ScanOutcome};
