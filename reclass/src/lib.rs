#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # reclass
//!
//! A library for building hierarchical, class-based configuration
//! inventories.
//!
//! A node file declares the classes it includes and its own parameters.
//! Classes are files of the same shape and may include further classes.
//! Resolving a node merges the whole class graph into a single parameter
//! tree, substitutes `${a:b}` references and applies `~key` overrides.
//!
//! ## Core Types
//!
//! - [`Inventory`]: the resolved classes and parameters of a node
//! - [`InventoryResolver`] and [`build_inventory`]: resolution entry points
//! - [`ResolverConfig`] and [`ConfigBuilder`]: resolver settings
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: a stderr backend for the `log` facade
//!
//! ## Examples
//!
//! ```
//! use reclass::build_inventory;
//! use std::fs;
//!
//! let dir = tempfile::tempdir().unwrap();
//! fs::write(dir.path().join("base.yml"), "parameters:\n  port: 80\n  host: base\n").unwrap();
//! fs::write(
//!     dir.path().join("web01.yml"),
//!     "classes: [base]\nparameters:\n  '~host': web01\n  listen: '${port}'\n",
//! )
//! .unwrap();
//!
//! let inventory = build_inventory(dir.path().join("web01.yml")).unwrap();
//! assert_eq!(inventory.classes, vec!["base", "web01"]);
//! assert_eq!(inventory.get("host").and_then(|v| v.as_str()), Some("web01"));
//! assert_eq!(inventory.get("listen").and_then(|v| v.as_u64()), Some(80));
//! ```

pub mod config;
pub mod error;
pub mod inventory;
pub mod logging;

// Re-export key types at crate root for convenience
pub use config::{ConfigBuilder, ResolverConfig};
pub use error::{Error, Result};
pub use inventory::{build_inventory, build_inventory_with, Inventory, InventoryResolver};
pub use logging::{init_logger, LogLevel, Logger};
