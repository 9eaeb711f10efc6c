//! The launch state machine.
//!
//! Exec targets run in the foreground and their exit code is passed
//! through. Files, directories, and URLs are handed to an opener and
//! left running. Local targets are checked for existence before any
//! process is spawned.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use blnk_format::{Document, TargetType};
use blnk_resolve::{shellwords, Resolver};

use crate::config::LaunchConfig;
use crate::error::{Error, Result};
use crate::which::find_program;

pub struct Launcher {
    resolver: Resolver,
    config: LaunchConfig,
}

impl Launcher {
    pub fn new(resolver: Resolver, config: LaunchConfig) -> Self {
        Self { resolver, config }
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    /// Launch the shortcut described by `doc`.
    pub fn launch(&self, doc: &Document) -> Result<i32> {
        let target_type = doc
            .target_type()
            .ok_or(blnk_format::Error::MissingTarget)?;
        debug!(%target_type, "launching shortcut");
        match target_type {
            TargetType::Link => self.open_url(doc),
            TargetType::Exec => self.run_exec(doc),
            TargetType::Directory => self.open_directory(doc),
            TargetType::File => self.open_document(doc),
        }
    }

    fn open_url(&self, doc: &Document) -> Result<i32> {
        let url = doc
            .get("URL")
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(Error::MissingUrl)?;
        self.spawn_with_fallbacks(url)
    }

    fn run_exec(&self, doc: &Document) -> Result<i32> {
        let resolved = self
            .resolver
            .resolve(doc, "Exec", true)?
            .ok_or(blnk_format::Error::MissingTarget)?;
        let words = shellwords::split(&resolved.value)?;
        let Some((program, args)) = words.split_first() else {
            return Err(blnk_format::Error::MissingTarget.into());
        };
        let explicit_path = program.contains(['/', '\\']);
        let local_bin = std::slice::from_ref(&self.resolver.dirs().local_bin);
        let found = find_program(program, local_bin).ok_or_else(|| Error::ExecutableNotFound {
            name: program.clone(),
            explicit_path,
        })?;

        let mut command = Command::new(&found);
        command.args(args);
        if let Some(cwd) = self.working_dir(doc, &found) {
            command.current_dir(cwd);
        }
        debug!(program = %found.display(), "running executable target");
        let status = command.status().map_err(|e| Error::LaunchFailed {
            command: resolved.value.clone(),
            source: Some(e),
        })?;
        Ok(status.code().unwrap_or(1))
    }

    /// `Path` on an Exec shortcut only picks the working directory. A
    /// value equal to the program itself carries no information and is
    /// dropped, as is one that is not a directory here.
    fn working_dir(&self, doc: &Document, program: &Path) -> Option<PathBuf> {
        let resolved = self.resolver.resolve(doc, "Path", false).ok().flatten()?;
        let cwd = PathBuf::from(&resolved.value);
        if cwd == program {
            warn!(path = %cwd.display(), "Path equals the target, ignoring it");
            return None;
        }
        if !cwd.is_dir() {
            warn!(path = %cwd.display(), "working directory does not exist, ignoring it");
            return None;
        }
        Some(cwd)
    }

    fn open_directory(&self, doc: &Document) -> Result<i32> {
        let resolved = self
            .resolver
            .resolve(doc, "Path", false)?
            .ok_or(blnk_format::Error::MissingTarget)?;
        let path = PathBuf::from(&resolved.value);
        if !path.is_dir() {
            return Err(Error::TargetNotFound { path });
        }
        for opener in &self.config.dir_openers {
            let Some(head) = opener.first() else { continue };
            let Some(found) = find_program(head, &[]) else {
                continue;
            };
            self.guard_recursion(&found)?;
            return self.spawn_detached(&found, &opener[1..], Some(path.as_path()));
        }
        Err(Error::LaunchFailed {
            command: format!("<no directory opener available> {}", path.display()),
            source: None,
        })
    }

    fn open_document(&self, doc: &Document) -> Result<i32> {
        let resolved = self
            .resolver
            .resolve(doc, "Path", false)?
            .ok_or(blnk_format::Error::MissingTarget)?;
        let path = PathBuf::from(&resolved.value);
        if !path.exists() {
            return Err(Error::TargetNotFound { path });
        }
        self.open_file(&path)
    }

    /// Open a plain file through the association table. Also the
    /// fallback when a run target turns out not to be a shortcut.
    pub fn open_file(&self, path: &Path) -> Result<i32> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let local_bin = std::slice::from_ref(&self.resolver.dirs().local_bin);

        for assoc in self.config.associations.iter().filter(|a| a.matches(extension)) {
            let Some(found) = find_program(&assoc.program, local_bin) else {
                warn!(program = %assoc.program, "associated program not installed, skipping");
                continue;
            };
            let target = if assoc.open_parent {
                path.parent().unwrap_or(path)
            } else {
                path
            };
            return self.spawn_detached(&found, &assoc.args, Some(target));
        }

        if let Some(editor) = find_program(&self.config.default_editor, local_bin) {
            return self.spawn_detached(&editor, &[], Some(path));
        }
        warn!(editor = %self.config.default_editor, "default editor not installed");

        // A shortcut file handed to the system opener would come
        // straight back to us.
        if extension.eq_ignore_ascii_case(&blnk_format::FILE_EXTENSION[1..]) {
            return Err(Error::RecursionGuard {
                program: "system opener".to_string(),
            });
        }
        self.spawn_with_fallbacks(&path.to_string_lossy())
    }

    fn guard_recursion(&self, program: &Path) -> Result<()> {
        let stem = program
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        if self
            .config
            .self_names
            .iter()
            .any(|name| name.eq_ignore_ascii_case(stem))
        {
            return Err(Error::RecursionGuard {
                program: program.display().to_string(),
            });
        }
        Ok(())
    }

    /// Try each generic open command in order until one spawns.
    fn spawn_with_fallbacks(&self, target: &str) -> Result<i32> {
        let mut last: Option<(String, std::io::Error)> = None;
        for argv in &self.config.open_fallbacks {
            let Some(head) = argv.first() else { continue };
            let Some(found) = find_program(head, &[]) else {
                continue;
            };
            match self.spawn_detached(&found, &argv[1..], Some(Path::new(target))) {
                Ok(code) => return Ok(code),
                Err(Error::LaunchFailed {
                    command,
                    source: Some(source),
                }) => {
                    warn!(%command, "open command failed, trying next");
                    last = Some((command, source));
                }
                Err(other) => return Err(other),
            }
        }
        match last {
            Some((command, source)) => Err(Error::LaunchFailed {
                command,
                source: Some(source),
            }),
            None => Err(Error::LaunchFailed {
                command: format!("<no open command available> {target}"),
                source: None,
            }),
        }
    }

    fn spawn_detached(&self, program: &Path, args: &[String], target: Option<&Path>) -> Result<i32> {
        let mut command = Command::new(program);
        command.args(args);
        if let Some(target) = target {
            command.arg(target);
        }
        let mut rendered: Vec<String> = vec![program.to_string_lossy().into_owned()];
        rendered.extend(args.iter().cloned());
        if let Some(target) = target {
            rendered.push(target.to_string_lossy().into_owned());
        }
        debug!(command = %shellwords::join(&rendered), "spawning opener");
        // The child handle is dropped without waiting: openers outlive
        // this process, which exits right after the spawn succeeds.
        match command.spawn() {
            Ok(_child) => Ok(0),
            Err(source) => Err(Error::LaunchFailed {
                command: shellwords::join(&rendered),
                source: Some(source),
            }),
        }
    }
}
