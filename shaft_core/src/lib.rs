//! # shaft_core - Shaft-Hub Connection Selector
//!
//! `shaft_core` decides how to connect a hub to a shaft. For a required
//! torque it evaluates an interference (press) fit, a parallel key and a
//! spline, keeps the candidates that carry the design torque and can be
//! manufactured, and ranks those against qualitative user preferences.
//! All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: an engine is read-only; every request gets a fresh result
//! - **Explicit randomness**: the caller owns the RNG and its seed
//! - **Validated tables**: catalogs, geometry tables and configuration are
//!   checked once when loaded
//! - **Rich Errors**: structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use shaft_core::{select_connection, ConnectionRequest};
//!
//! let request = ConnectionRequest::new(45.0, 90.0, "Steel C45", "Steel C45", 500.0);
//! let result = select_connection(&request, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("design_torque_nm"));
//! ```
//!
//! ## Modules
//!
//! - [`selection`] - Request/result types, feasibility gate, scoring, engine
//! - [`calculations`] - Press fit, key and spline capacity models
//! - [`equations`] - Closed-form DIN 7190 / DIN 6892 / ISO 14 relations
//! - [`materials`] - Material catalog and allowable stresses
//! - [`friction`] - DIN 7190 adhesion coefficients
//! - [`geometry`] - DIN 6885 key and ISO 14 spline tables
//! - [`settings`] - Engine configuration
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - JSON file loading

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod friction;
pub mod geometry;
pub mod materials;
pub mod selection;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CapacityResult, ConnectionType};
pub use errors::{CalcError, CalcResult};
pub use materials::MaterialCatalog;
pub use selection::{select_connection, ConnectionRequest, SelectionEngine, SelectionResult};
pub use settings::EngineConfig;
