//! Object storage for generated images.
//!
//! Images produced by the pipeline are written under caller-chosen keys and
//! referenced by URI from the response envelope. The [`ObjectStorage`] trait
//! is the only thing the pipeline sees; [`FileSystemStorage`] is the bundled
//! backend.
//!
//! # Example
//!
//! ```rust
//! use viewfinder_storage::{FileSystemStorage, ObjectStorage};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = FileSystemStorage::new("/tmp/viewfinder")?
//!     .with_public_base_url("https://cdn.example.com/viewfinder");
//!
//! let stored = storage
//!     .put("sessions/run-1/shot-01.png", &[0x89, b'P', b'N', b'G'], "image/png")
//!     .await?;
//! assert_eq!(stored.uri(), "https://cdn.example.com/viewfinder/sessions/run-1/shot-01.png");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod key;
mod object;

pub use filesystem::FileSystemStorage;
pub use key::validate_key;
pub use object::{ObjectStorage, StoredObject};
pub use viewfinder_error::{StorageError, StorageErrorKind};
