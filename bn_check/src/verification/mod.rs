//! Record verification: key set validation, operation dispatch and
//! arithmetic identity checks

pub mod dispatcher;
pub mod keys;
pub mod operation;

pub use dispatcher::{Verdict, Verifier};
pub use keys::check_keys;
pub use operation::{Computed, EvaluationError, Operation};
