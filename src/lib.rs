//! Car-sequencing problem model for the U-Engine ecosystem.
//!
//! Provides the instance model and the deterministic objective for the
//! car-sequencing problem: reorder a production plan so that no station
//! sees more than `p` cars needing its option in any `q` consecutive
//! positions. Search algorithms (GA, SA) are provided by `u-metaheur` at
//! a lower layer; this crate only bridges to them.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Instance`, `InstanceBuilder`, `CarOption`, `CarClass`
//! - **`description`**: Structured integer-stream format (parse and render)
//! - **`validation`**: Instance invariants and candidate permutation checks
//! - **`evaluation`**: Sliding-window objective, violation reports, seed candidates
//! - **`generator`**: Seeded synthetic instances
//! - **`ga`**, **`sa`**: `u-metaheur` problem implementations
//!
//! # Architecture
//!
//! This crate sits at Layer 3 (Frameworks) in the U-Engine ecosystem.
//! The instance is immutable and evaluation is a pure function, so one
//! instance can be shared by any number of threads scoring candidates.
//!
//! # References
//!
//! - Dincbas, Simonis & Van Hentenryck (1988), "Solving the Car-Sequencing
//!   Problem in Constraint Logic Programming"
//! - Solnon et al. (2008), "The car sequencing problem: Overview of
//!   state-of-the-art methods and industrial case-study of the ROADEF'2005
//!   challenge problem"

pub mod description;
pub mod error;
pub mod evaluation;
pub mod ga;
pub mod generator;
pub mod models;
pub mod sa;
pub mod validation;

pub use error::ConfigurationError;
pub use evaluation::{Evaluation, PENALTY, evaluate, random_candidate, score};
pub use models::{Instance, InstanceBuilder};
