//! CLI command implementations

mod create;
mod run;
mod update;

pub use create::run_create;
pub use run::run_target;
pub use update::run_update;
