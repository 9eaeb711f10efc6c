//! Cross-platform resolution of blnk shortcut targets.
//!
//! Turns a stored target value, possibly written on another machine
//! or operating system, into something runnable here: home and
//! placeholder expansion, Windows drive mapping, cloud folder
//! normalization, and command-line aware absolutization.

pub mod error;
pub mod resolver;
pub mod shellwords;
pub mod subst;
pub mod sysdirs;

pub use error::{Error, Result};
pub use resolver::{Resolved, Resolver};
pub use sysdirs::SysDirs;
