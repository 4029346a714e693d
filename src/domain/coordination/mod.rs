//! Pure coordination derivations (no I/O).

pub mod checklist;
pub mod leader;
pub mod results;
pub mod seed;

pub use checklist::{actions_checklist, ChecklistParams};
pub use leader::coordination_leader;
pub use results::CoordinationResult;
pub use seed::coordination_seed;
