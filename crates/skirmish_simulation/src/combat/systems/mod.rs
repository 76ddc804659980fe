//! Combat systems (attack initiation, deferred actions, deaths)

pub mod attack;
pub mod death;
pub mod deferred;


// Re-export all systems
pub use attack::*;
pub use death::*;
pub use deferred::*;
