//! Error types for the launcher crate

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("target does not exist: {path}")]
    TargetNotFound { path: PathBuf },

    #[error("{}", describe_not_found(.name, .explicit_path))]
    ExecutableNotFound { name: String, explicit_path: bool },

    /// The configured opener would hand the target right back to this
    /// tool.
    #[error("refusing to run {program}: it opens shortcuts with this tool")]
    RecursionGuard { program: String },

    #[error("could not launch: {command}")]
    LaunchFailed {
        command: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("shortcut has an empty URL")]
    MissingUrl,

    #[error(transparent)]
    Format(#[from] blnk_format::Error),

    #[error(transparent)]
    Resolve(#[from] blnk_resolve::Error),
}

fn describe_not_found(name: &str, explicit_path: &bool) -> String {
    if *explicit_path {
        format!("no executable at {name}")
    } else {
        format!("{name} not found on PATH")
    }
}
