//! Station names, aliases and the cached station directory.

mod aliases;
mod cache;
mod directory;
mod error;

pub use aliases::{aliases_for, attach_aliases};
pub use cache::{StationCache, StationCacheConfig};
pub use directory::StationDirectory;
pub use error::StationError;
