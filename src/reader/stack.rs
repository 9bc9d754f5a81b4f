//! Stack of open configuration files.
//!
//! The top of the stack is the file currently being read. `include`
//! directives push files on top; a file is popped and closed as soon as it
//! is exhausted, and reading falls through to the file below it.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use glob::MatchOptions;

use super::error::{Location, ReaderError};

/// One open configuration source.
struct ConfigFile {
    reader: Box<dyn BufRead>,
    path: PathBuf,
    line: usize,
}

/// Ordered set of open configuration files, innermost last.
///
/// Dropping the stack closes every file still on it.
#[derive(Default)]
pub struct FileStack {
    files: Vec<ConfigFile>,
}

impl fmt::Debug for FileStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paths: Vec<_> = self.files.iter().rev().map(|c| c.path.display()).collect();
        f.debug_struct("FileStack").field("files", &paths).finish()
    }
}

impl FileStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `path` as the root of a configuration tree.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::FileOpen`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReaderError> {
        let path = path.as_ref();
        let mut stack = Self::new();
        stack.push_file(path)?;
        tracing::debug!("reading config file {}", path.display());
        Ok(stack)
    }

    /// Opens `path` and makes it the file being read.
    ///
    /// A file that cannot be opened is reported as [`ReaderError::FileOpen`];
    /// the stack is left unchanged and the caller decides whether that is fatal.
    ///
    /// # Errors
    ///
    /// Returns [`ReaderError::FileOpen`] if the file cannot be opened.
    pub fn push_file(&mut self, path: impl AsRef<Path>) -> Result<(), ReaderError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| {
            tracing::info!("could not read config file {}", path.display());
            ReaderError::FileOpen {
                path: path.to_path_buf(),
                source,
            }
        })?;
        tracing::debug!("opened config file {}", path.display());
        self.push_reader(path, BufReader::new(file));
        Ok(())
    }

    /// Pushes an already open source, reported under `path` in diagnostics.
    ///
    /// Relative includes read from this source resolve against the
    /// directory of `path`.
    pub fn push_reader(&mut self, path: impl Into<PathBuf>, reader: impl BufRead + 'static) {
        self.files.push(ConfigFile {
            reader: Box::new(reader),
            path: path.into(),
            line: 0,
        });
    }

    /// Expands `pattern` and pushes every match.
    ///
    /// A relative pattern is resolved against the directory of the file on
    /// top of the stack. Wildcards do not match a leading `.` and directories
    /// are skipped. Matches are sorted by their full path and pushed in
    /// reverse so that the first match is read first. Returns the number of
    /// files pushed.
    ///
    /// # Errors
    ///
    /// - [`ReaderError::GlobPattern`] if the resolved pattern is invalid
    /// - [`ReaderError::GlobNoMatch`] if no file matched; nothing is pushed
    /// - [`ReaderError::FileOpen`] if a match could not be opened; matches
    ///   pushed before it stay on the stack and later ones are skipped
    pub fn push_glob(&mut self, pattern: &str) -> Result<usize, ReaderError> {
        let resolved = self.resolve(pattern);

        let options = MatchOptions {
            require_literal_leading_dot: true,
            ..MatchOptions::new()
        };
        let mut matches: Vec<PathBuf> = glob::glob_with(&resolved, options)
            .map_err(|source| ReaderError::GlobPattern {
                pattern: resolved.clone(),
                source,
            })?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::debug!("skipping unreadable glob entry: {e}");
                    None
                }
            })
            .filter(|path| {
                let is_dir = path.is_dir();
                if is_dir {
                    tracing::debug!("skipping directory {}", path.display());
                }
                !is_dir
            })
            .collect();

        if matches.is_empty() {
            tracing::info!("could not glob {resolved}");
            return Err(ReaderError::GlobNoMatch { pattern: resolved });
        }
        matches.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

        let mut pushed = 0;
        for path in matches.iter().rev() {
            if let Err(e) = self.push_file(path) {
                if pushed > 0 {
                    tracing::info!("stopped including {resolved} after {pushed} file(s)");
                }
                return Err(e);
            }
            pushed += 1;
        }
        Ok(pushed)
    }

    /// Builds the glob pattern for `pattern` relative to the current file.
    fn resolve(&self, pattern: &str) -> String {
        if Path::new(pattern).is_absolute() {
            return pattern.to_string();
        }
        let dir = self
            .current_path()
            .and_then(Path::parent)
            .map(|dir| dir.to_string_lossy())
            .unwrap_or_default();
        if dir.is_empty() {
            return pattern.to_string();
        }
        let dir = glob::Pattern::escape(&dir);
        format!("{}/{pattern}", dir.trim_end_matches('/'))
    }

    /// Closes the file on top and returns the path of the new top, if any.
    pub fn pop(&mut self) -> Option<&Path> {
        if let Some(file) = self.files.pop() {
            tracing::debug!("closing config file {}", file.path.display());
        }
        self.current_path()
    }

    /// Reads the next line, falling through exhausted files.
    ///
    /// The trailing line terminator is removed. Returns `Ok(None)` once every
    /// file on the stack is exhausted.
    ///
    /// # Errors
    ///
    /// - [`ReaderError::Read`] if the underlying reader fails
    /// - [`ReaderError::Encoding`] if the line is not valid UTF-8
    pub fn next_line(&mut self) -> Result<Option<String>, ReaderError> {
        let mut bytes = Vec::new();
        loop {
            let Some(file) = self.files.last_mut() else {
                return Ok(None);
            };
            let read = file
                .reader
                .read_until(b'\n', &mut bytes)
                .map_err(|source| ReaderError::Read {
                    path: file.path.clone(),
                    source,
                })?;
            if read > 0 {
                file.line += 1;
                let mut line = String::from_utf8(bytes).map_err(|_| ReaderError::Encoding {
                    location: Location::new(&file.path, file.line),
                })?;
                let trimmed = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed);
                return Ok(Some(line));
            }
            self.pop();
        }
    }

    /// Returns the path of the file being read.
    #[must_use]
    pub fn current_path(&self) -> Option<&Path> {
        self.files.last().map(|f| f.path.as_path())
    }

    /// Returns the position of the line most recently read.
    ///
    /// Once the stack is exhausted there is no position; an empty path at
    /// line 0 is returned.
    #[must_use]
    pub fn location(&self) -> Location {
        self.files.last().map_or_else(
            || Location::new(PathBuf::new(), 0),
            |f| Location::new(&f.path, f.line),
        )
    }

    /// Returns the number of open files.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.files.len()
    }

    /// Returns true if no file is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
