//! Launching of blnk shortcut targets.
//!
//! Given a parsed document and a resolver, decides how to open the
//! target: run it, open it by association, or hand it to a system
//! opener, with existence checks and a recursion guard in front of
//! every spawn.

pub mod config;
pub mod error;
pub mod launcher;
pub mod which;

pub use config::{Association, LaunchConfig};
pub use error::{Error, Result};
pub use launcher::Launcher;
pub use which::find_program;
