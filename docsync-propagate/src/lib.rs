//! # docsync-propagate
//!
//! Propagation of a mission documentation change to its boosters.
//!
//! - [`resolver`]: does a pull request touch a tracked path?
//! - [`fork`]: fork and check out every booster of a mission
//! - [`engine`]: branch / commit / push / pull request / link-back
//! - [`switch`]: check out an existing pull request's head
//! - [`pipeline`]: all of the above, end to end

pub mod checkout;
pub mod engine;
pub mod error;
pub mod fork;
pub mod message;
pub mod pipeline;
pub mod resolver;
pub mod switch;

pub use engine::{Propagation, Propagator};
pub use error::{PropagateError, Stage};
pub use fork::{BoosterFailure, ForkCoordinator, ForkOutcome, ForkedBooster};
pub use message::MessageRenderer;
pub use pipeline::{BoosterReport, RunReport};
pub use resolver::MappingResolver;
pub use switch::{checkout_pull_request, switch_to_pull_request_head, HeadCheckout};
