//! # dex-domain
//!
//! Pure domain model for the dex field data-acquisition dashboard.
//!
//! ## Responsibilities
//! - Foundational types: validated names, error conventions, timestamps
//! - Define **Snapshots** (one push of current sensor/system data, keyed by source)
//! - Define **Widget descriptors** (named, titled dashboard sections)
//! - Define the **View tree** each widget owns and updates in place
//! - Define **Command requests** sent to the station's control server
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod name;
pub mod time;

pub mod command;
pub mod snapshot;
pub mod view;
pub mod widget;
