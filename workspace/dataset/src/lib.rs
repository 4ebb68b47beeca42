//! Loading, column resolution and filtering for the dashboard's CSV
//! sources. Everything here is read-only: frames are parsed once,
//! memoized by path, and narrowed per request.

pub mod columns;
pub mod error;
pub mod filter;
pub mod format;
pub mod loader;

pub use columns::ColumnRoleMap;
pub use error::{DatasetError, Result};
pub use loader::{FrameStore, LoadedFrame};
