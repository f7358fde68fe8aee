//! bpcmp - compare and dump self-describing simulation output.
//!
//! Simulation output is a flat set of named *attributes* (strings, numbers,
//! small arrays) and *variables* (numeric arrays). This crate provides:
//!
//! - [`compare::compare_files`], which classifies every field of one output
//!   against another under numeric tolerances;
//! - [`dump::collect_fields`] and [`dump::render_dump`], which list one output
//!   with `description`/`units` annotations next to the fields they describe;
//! - the `bpcmp` and `bpdump` command line tools built on both.
//!
//! Outputs are read through the [`data::Reader`] trait. [`data::NetcdfReader`]
//! reads netCDF files, and [`data::MemoryReader`] holds data built in code.
//!
//! # Example
//!
//! ```ignore
//! use bpcmp::compare::compare_files;
//! use bpcmp::config::CompareOptions;
//! use bpcmp::data::NetcdfReader;
//! use std::path::Path;
//!
//! let first = NetcdfReader::open(Path::new("run1.nc"))?;
//! let second = NetcdfReader::open(Path::new("run2.nc"))?;
//! let comparison = compare_files(&first, &second, &CompareOptions::default())?;
//! println!("{} differences", comparison.differences);
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod compare;
pub mod config;
pub mod data;
pub mod dump;
pub mod error;
pub mod format;
pub mod logging;
pub mod report;

pub use error::{BpError, Result};
