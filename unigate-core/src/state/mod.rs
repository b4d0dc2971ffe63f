//! Session state
//!
//! Boot-time decisions that hold for the whole session, and the family
//! selector that is the only state carried from one cycle to the next.

pub mod selector;
pub mod session;

pub use selector::{FamilyChange, FamilySelector, LoadOutcome, PersistOutcome};
pub use session::Session;
