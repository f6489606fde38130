//! Car-sequencing domain models.
//!
//! Provides the immutable problem definition consumed by the objective
//! evaluator and the search bridges.
//!
//! # Domain Mappings
//!
//! | u-carseq | Assembly line | Generic |
//! |----------|---------------|---------|
//! | CarOption | Station capacity (p/q rule) | Windowed resource limit |
//! | CarClass | Car configuration | Item type |
//! | Instance | Daily production plan | Sequencing problem |

mod class;
mod instance;
mod option;

pub use class::CarClass;
pub use instance::{Instance, InstanceBuilder};
pub use option::CarOption;
