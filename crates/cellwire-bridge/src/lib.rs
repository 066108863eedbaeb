//! Engine bridge for cellwire.
//!
//! This crate owns the out-of-process formula engine and forwards cell edits
//! and reads to it. The engine does all the hard work (formula parsing,
//! dependency tracking, recalculation); this side only serializes commands,
//! awaits the single response, and hands back typed results.
//!
//! # Architecture
//!
//! ```text
//! Your Rust code
//!     └── EngineBridge (this crate)
//!           └── JSON-over-stdio (cellwire-protocol)
//!                 └── engine subprocess
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use cellwire_bridge::{EngineBridge, EngineConfig};
//! use cellwire_core::CellAddress;
//!
//! # async fn example() -> cellwire_bridge::error::Result<()> {
//! let mut bridge = EngineBridge::spawn(EngineConfig::default())?;
//!
//! let b7: CellAddress = "B7".parse()?;
//! let updates = bridge.set_formula(&b7, "=A1*2").await?;
//! for (address, value) in &updates {
//!     println!("{address} is now {value}");
//! }
//!
//! bridge.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod error;

pub use bridge::{EngineBridge, EngineConfig};
pub use error::BridgeError;
