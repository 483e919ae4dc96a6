pub mod config;
pub mod index;
pub mod loader;
pub mod logging;
pub mod pager;
pub mod record;
pub mod session;
pub mod shell;

pub use config::{Config, ConfigError, ConfigResult, OutputFormat};
pub use index::{
    Bucket, BucketId, BucketStats, HashIndex, IndexError, IndexResult, IndexStats, SearchHit,
    hash_key,
};
pub use loader::{LoaderError, LoaderResult, load_file, load_reader};
pub use pager::{DEFAULT_PAGE_SIZE, PageId, Pager, PagerError, PagerResult};
pub use record::{Record, RecordError, RecordId, RecordResult, RecordStore, ScanOutcome};
pub use session::{Session, SessionError, SessionResult};
pub use shell::{Command, Shell, ShellError, ShellResult};
