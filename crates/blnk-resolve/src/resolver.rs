//! Rewrites stored target values into runnable local form.
//!
//! Shortcut files travel between machines and operating systems, so a
//! stored target may use the conventions of wherever it was created.
//! Resolution is best effort: a value that cannot be mapped exactly is
//! placed under home and reported through a warning, never an error.
//! Resolving an already resolved value leaves it unchanged.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use blnk_format::Document;

use crate::error::Result;
use crate::shellwords;
use crate::subst;
use crate::sysdirs::SysDirs;

/// A resolved target value plus an optional best-effort warning for
/// the user interface to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub warning: Option<String>,
}

pub struct Resolver {
    dirs: SysDirs,
}

impl Resolver {
    pub fn new(dirs: SysDirs) -> Self {
        Self { dirs }
    }

    pub fn detect() -> Result<Self> {
        Ok(Self::new(SysDirs::detect()?))
    }

    pub fn dirs(&self) -> &SysDirs {
        &self.dirs
    }

    /// Resolve the value stored under `key` in `doc`.
    ///
    /// Returns `Ok(None)` when the key is absent, so callers can fall
    /// back to extension-based handling. With `split` set the value is
    /// treated as a command line: it is split into words, the first
    /// word is absolutized against the shortcut's directory, and the
    /// words are joined back. Without it the whole value is one path.
    pub fn resolve(&self, doc: &Document, key: &str, split: bool) -> Result<Option<Resolved>> {
        let raw = if split {
            doc.lookup(key).map(|(_, value)| value)
        } else {
            doc.get(key)
        };
        let Some(raw) = raw else {
            return Ok(None);
        };
        let base = doc.path().and_then(|p| p.parent());
        self.resolve_value(raw, base, split).map(Some)
    }

    /// Resolve one raw value. `base` is the directory of the shortcut
    /// file, used to absolutize relative targets.
    pub fn resolve_value(
        &self,
        raw: &str,
        base: Option<&Path>,
        split: bool,
    ) -> Result<Resolved> {
        let mut warning = None;
        let mut value = raw.trim().to_string();

        if value == "~" || value.starts_with("~/") {
            let rest = value.trim_start_matches('~').trim_start_matches('/');
            value = join_under(&self.dirs.home, rest);
            debug!(value = %value, "expanded home prefix");
        }

        if !cfg!(windows) {
            if let Some(rewritten) = self.rewrite_drive(&value, &mut warning) {
                debug!(from = %value, to = %rewritten, "rewrote drive path");
                value = rewritten;
            }
        }

        value = subst::apply(&value, &self.dirs);

        if let Some(cloud_name) = self.dirs.cloud_name() {
            let replaced = subst::replace_isolated_ci(&value, "owncloud", cloud_name);
            if replaced != value {
                debug!(cloud = cloud_name, "normalized cloud folder name");
                value = replaced;
            }
        }

        if split {
            let mut words = shellwords::split(&value)?;
            if let Some(first) = words.first_mut() {
                *first = self.absolutize(first, base);
            }
            value = shellwords::join(&words);
        } else {
            value = self.absolutize(&value, base);
        }

        Ok(Resolved { value, warning })
    }

    /// Make a relative path absolute against the shortcut's directory
    /// when the result actually exists. Bare program names and URLs
    /// pass through untouched.
    fn absolutize(&self, word: &str, base: Option<&Path>) -> String {
        let path = Path::new(word);
        if word.is_empty() || path.is_absolute() || word.contains("://") {
            return word.to_string();
        }
        let Some(base) = base else {
            return word.to_string();
        };
        let candidate = base.join(path);
        if !candidate.exists() {
            return word.to_string();
        }
        let resolved = dunce::canonicalize(&candidate).unwrap_or(candidate);
        debug!(from = word, to = %resolved.display(), "absolutized against shortcut directory");
        resolved.to_string_lossy().into_owned()
    }

    /// Map a `X:\...` path onto this machine. Returns `None` when the
    /// value does not start with a drive letter.
    fn rewrite_drive(&self, value: &str, warning: &mut Option<String>) -> Option<String> {
        let bytes = value.as_bytes();
        let is_drive = bytes.len() >= 2
            && bytes[0].is_ascii_alphabetic()
            && bytes[1] == b':'
            && bytes.get(2).map_or(true, |b| *b == b'\\' || *b == b'/');
        if !is_drive {
            return None;
        }
        let drive = bytes[0].to_ascii_uppercase();
        let rest = value[2..].replace('\\', "/");
        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();

        if drive == b'C' {
            let first = segments.first().copied().unwrap_or("");
            if first.eq_ignore_ascii_case("tmp") || first.eq_ignore_ascii_case("temp") {
                return Some(join_segments(&self.dirs.temp, &segments[1..]));
            }
            if ["Users", "Documents and Settings"]
                .iter()
                .any(|known| first.eq_ignore_ascii_case(known))
            {
                // C:\Users\<any>\rest maps into this user's home.
                return Some(match segments.len() {
                    1 => self.dirs.profiles_root.to_string_lossy().into_owned(),
                    2 => self.dirs.home.to_string_lossy().into_owned(),
                    _ => join_segments(&self.dirs.home, &segments[2..]),
                });
            }
            let forced = join_segments(&self.dirs.home, &segments);
            let message = format!("no local equivalent for {value}, using {forced}");
            warn!("{message}");
            *warning = Some(message);
            return Some(forced);
        }

        // Unknown drive letter: probe the cloud folder, then home.
        let mut bases: Vec<&Path> = Vec::new();
        if let Some(cloud) = &self.dirs.cloud {
            bases.push(cloud);
        }
        bases.push(&self.dirs.home);
        for candidate_base in &bases {
            let candidate = join_segments(candidate_base, &segments);
            if Path::new(&candidate).exists() {
                return Some(candidate);
            }
        }
        let forced = join_segments(&self.dirs.home, &segments);
        let message = format!("no local equivalent for {value}, using {forced}");
        warn!("{message}");
        *warning = Some(message);
        Some(forced)
    }
}

fn join_under(base: &Path, rest: &str) -> String {
    if rest.is_empty() {
        base.to_string_lossy().into_owned()
    } else {
        base.join(rest).to_string_lossy().into_owned()
    }
}

fn join_segments(base: &Path, segments: &[&str]) -> String {
    let mut path = base.to_path_buf();
    for segment in segments {
        path.push(segment);
    }
    path.to_string_lossy().into_owned()
}
