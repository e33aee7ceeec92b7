//! Fuzz harness for the firequery parsers.
//!
//! Each [`FuzzTarget`] names one parsing surface and knows two things:
//!
//! - its **entry point**, a `fn(&[u8]) -> i32` that decodes a fuzzer input
//!   into a field path, a collection reference or a query and runs it through
//!   the library (see [`targets`]);
//! - where its **dictionary and corpus** live under a resource root,
//!   including when it borrows another target's resources (see [`locator`]).
//!
//! The cargo-fuzz binaries under `fuzz/` call the entry points; the
//! `firequery-fuzz` CLI uses the locator, [`launch`] and [`replay`] to wire
//! resources into the engine and to reproduce inputs.
//!
//! # Example
//!
//! ```
//! use firequery_harness::{FuzzTarget, CONTINUE};
//!
//! let target: FuzzTarget = "query".parse().unwrap();
//! assert_eq!(target.dictionary_location("/fuzz"), "/fuzz/FIRQuery/firquery.dictionary");
//! assert_eq!(target.run(b"collection/doc\0"), CONTINUE);
//! ```

pub mod check;
pub mod error;
pub mod launch;
pub mod locator;
pub mod replay;
pub mod targets;

mod target;

pub use check::{check_resources, ResourceStatus};
pub use error::{HarnessError, Result};
pub use launch::{cargo_fuzz_command, launch_args, LaunchOptions};
pub use locator::{corpus_location, dictionary_location, resource_locations, ResourceLocations};
pub use replay::{ReplayConfig, ReplayReport, ReplayedInput, Replayer};
pub use target::FuzzTarget;
pub use targets::CONTINUE;
