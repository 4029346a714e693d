//! Application layer: orchestration of the coordination protocol.

pub mod executor;
pub mod generator;
pub mod latch;
pub mod membership;
pub mod node;
pub mod validation;
pub mod watcher;

pub use executor::CoordinationExecutor;
pub use generator::{ProposalGenerator, ProposalRequest};
pub use latch::ProtocolLatch;
pub use membership::MembershipValidator;
pub use node::Node;
pub use validation::{ProposalValidator, ProposalValidators};
pub use watcher::watch_coordination_windows;
