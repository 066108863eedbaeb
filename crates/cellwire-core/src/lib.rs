//! # cellwire-core
//!
//! Cell addressing and base-26 numeral conversions for cellwire.
//!
//! This crate holds the client-side logic that does not need the engine:
//! - [`RowAddress`], [`ColAddress`], [`CellAddress`] - 1-based cell addressing
//! - [`base26`] - alphabetic numeral conversions (two distinct schemes)
//!
//! Everything here is pure and synchronous: no shared state, no locking, no
//! I/O. Values are safe to use from any number of threads.
//!
//! ## Example
//!
//! ```rust
//! use cellwire_core::CellAddress;
//!
//! let addr = CellAddress::from_indices(7, 2)?;
//! assert_eq!(addr.to_string(), "B7");
//!
//! let parsed: CellAddress = "B7".parse()?;
//! assert_eq!(parsed, addr);
//! # Ok::<(), cellwire_core::Error>(())
//! ```

pub mod address;
pub mod base26;
pub mod error;

// Re-exports for convenience
pub use address::{CellAddress, ColAddress, RowAddress};
pub use error::{Error, Result};
