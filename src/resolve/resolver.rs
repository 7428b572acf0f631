// src/resolve/resolver.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::errors::StitchError;
use crate::resolve::directive::DirectiveScanner;

/// Recursive directive resolver.
///
/// The version string is injected at construction so the resolver carries no
/// process-global state and can be tested with arbitrary versions.
#[derive(Debug, Clone)]
pub struct Resolver {
    version: String,
    scanner: DirectiveScanner,
}

impl Resolver {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            scanner: DirectiveScanner::new(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Fully resolve the file at `path`.
    ///
    /// Includes are expanded depth-first: an included file's own includes
    /// are resolved before its content is spliced into the parent, so the
    /// parent never sees a nested `@include{...}`. The `@version` pass runs
    /// once, over the entry file's fully spliced text, which is how version
    /// tokens inside included files end up substituted as well.
    ///
    /// Fails with [`StitchError::Read`] if any referenced file is missing or
    /// unreadable, and with [`StitchError::CyclicInclude`] if a file ends up
    /// including itself, directly or through other files.
    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<String, StitchError> {
        let mut in_progress = Vec::new();
        let data = self.resolve_includes(path.as_ref(), &mut in_progress)?;
        Ok(self.scanner.substitute_version(&data, &self.version))
    }

    /// Expand all includes of one file, recursing into each target.
    ///
    /// `in_progress` is the stack of files currently being resolved, used as
    /// the cycle guard. Each file is compared by its canonical path so the
    /// same file reached via different relative spellings is still caught.
    fn resolve_includes(
        &self,
        path: &Path,
        in_progress: &mut Vec<PathBuf>,
    ) -> Result<String, StitchError> {
        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if in_progress.contains(&canonical) {
            let mut chain = in_progress.clone();
            chain.push(canonical);
            return Err(StitchError::CyclicInclude { chain });
        }

        let data = fs::read_to_string(path).map_err(|source| StitchError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        trace!(path = ?path, bytes = data.len(), "read source file");

        in_progress.push(canonical);

        // Include targets resolve relative to the directory of the file that
        // references them, not the entry file.
        let dir = path.parent().unwrap_or_else(|| Path::new("."));

        // Single forward scan: copy text up to each directive, splice in the
        // resolved include body, continue after the directive. Include bodies
        // are already fully resolved, so the output needs no rescan.
        let mut out = String::with_capacity(data.len());
        let mut cursor = 0;
        for m in self.scanner.includes(&data) {
            out.push_str(&data[cursor..m.start]);

            let target = dir.join(m.path);
            debug!(from = ?path, include = ?target, "expanding include");
            let body = self.resolve_includes(&target, in_progress)?;
            out.push_str(&body);

            cursor = m.end;
        }
        out.push_str(&data[cursor..]);

        in_progress.pop();
        Ok(out)
    }
}
