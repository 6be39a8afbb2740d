//! Inventory resolution.
//!
//! This module builds the merged parameter tree of a node from its class
//! hierarchy:
//!
//! - [`ClassLoader`]: reads node and class files
//! - [`ParameterMerger`]: merges parameter trees, destination first
//! - [`ReferenceResolver`]: substitutes `${a:b}` placeholders
//! - [`OverrideStripper`]: promotes `~key` overrides
//! - [`InventoryResolver`]: drives the above over the class graph
//!
//! # Examples
//!
//! ```no_run
//! use reclass::build_inventory;
//!
//! let inventory = build_inventory("inventory/classes/web01.yml").unwrap();
//! println!("{}", inventory.to_yaml().unwrap());
//! ```

pub mod loader;
pub mod merger;
pub mod overrides;
pub mod references;
pub mod resolver;
pub mod schema;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use loader::ClassLoader;
pub use merger::ParameterMerger;
pub use overrides::{OverrideStripper, OVERRIDE_SIGIL};
pub use references::ReferenceResolver;
pub use resolver::{build_inventory, build_inventory_with, InventoryResolver};
pub use schema::{Inventory, Parameters};
