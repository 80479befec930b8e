//! imgrelay Storage Library
//!
//! Local scratch storage for uploaded files. A file lives in the scratch
//! directory only while its request is being published.
//!
//! # Scratch layout
//!
//! - `<scratch_dir>/<request_token>_img`
//!
//! Names are generated server side (see `imgrelay_core::scratch_base_name`)
//! and must be a single path component.

pub mod error;
pub mod scratch;

pub use error::{StorageError, StorageResult};
pub use scratch::{ScratchFile, ScratchStorage};
