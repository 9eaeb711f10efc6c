//! Running a shortcut (the default mode).

use std::path::Path;

use tracing::debug;

use blnk_format::Document;
use blnk_launch::{LaunchConfig, Launcher};
use blnk_resolve::Resolver;

use crate::error::{CliError, Result};

/// Run the shortcut at `target`, returning the exit code to pass on.
///
/// A file that turns out not to be a shortcut is opened by its
/// extension instead of failing.
pub fn run_target(target: &Path) -> Result<i32> {
    let shown = target.display();
    if !target.exists() {
        if target.to_string_lossy().contains("://") {
            return Err(CliError::user(format!(
                "{shown} is a URL; use -s to create a shortcut for it"
            )));
        }
        return Err(CliError::user(format!("no such file: {shown}")));
    }
    if target.is_dir() {
        return Err(CliError::user(format!(
            "{shown} is a directory; use -s to create a shortcut for it"
        )));
    }

    let launcher = Launcher::new(Resolver::detect()?, LaunchConfig::default());
    match Document::load(target) {
        Ok(doc) => Ok(launcher.launch(&doc)?),
        Err(e) if e.is_not_blnk() => {
            debug!(path = %shown, "not a shortcut, opening by extension");
            Ok(launcher.open_file(target)?)
        }
        Err(e) => Err(e.into()),
    }
}
