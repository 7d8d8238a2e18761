//! Command implementations.

mod run;
mod validate;

pub use run::run_scenario;
pub use validate::run_validate;
