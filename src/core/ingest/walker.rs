//! Input discovery with pattern-based filtering.
//!
//! Expands the paths given to an ingest run into the list of files
//! to split. Explicit files are always taken; directories are walked
//! recursively and filtered with glob patterns. Walk errors
//! (permission denied, etc.) are logged, not fatal.

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::error::{Result, SemsplitError};

/// Expands input paths into candidate files
#[derive(Debug, Clone)]
pub struct InputWalker {
    /// Patterns a walked file must match (e.g. "*.json", "*.md")
    include_patterns: Vec<Pattern>,

    /// Patterns that exclude files and whole directories
    exclude_patterns: Vec<Pattern>,

    /// Walked files above this size are skipped
    max_file_size_bytes: u64,
}

impl InputWalker {
    /// Create a walker; fails if any pattern is not valid glob syntax
    pub fn new(
        include_patterns: Vec<String>,
        exclude_patterns: Vec<String>,
        max_file_size_mb: usize,
    ) -> Result<Self> {
        Ok(Self {
            include_patterns: compile_patterns(include_patterns, "include")?,
            exclude_patterns: compile_patterns(exclude_patterns, "exclude")?,
            max_file_size_bytes: (max_file_size_mb as u64) * 1024 * 1024,
        })
    }

    /// Expand `paths` into files, preserving the given order.
    ///
    /// Files found under one directory are sorted so that repeated
    /// runs see them in the same order.
    pub fn collect_inputs(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for path in paths {
            if path.is_file() {
                files.push(path.clone());
            } else if path.is_dir() {
                let mut found = self.collect_files(path);
                found.sort();
                tracing::debug!("Found {} files under {:?}", found.len(), path);
                files.extend(found);
            } else {
                return Err(SemsplitError::InputNotFound(path.display().to_string()));
            }
        }

        Ok(files)
    }

    /// Walk one directory and return matching files
    fn collect_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| self.should_descend(e, root))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if let Ok(metadata) = entry.metadata() {
                if metadata.len() > self.max_file_size_bytes {
                    tracing::debug!(
                        "Skipping large file: {:?} ({} bytes)",
                        path,
                        metadata.len()
                    );
                    continue;
                }
            }

            if self.matches_patterns(path) {
                files.push(path.to_path_buf());
            }
        }

        files
    }

    /// Hidden and excluded directories are pruned; the root never is
    fn should_descend(&self, entry: &DirEntry, root: &Path) -> bool {
        let path = entry.path();
        if path == root || !entry.file_type().is_dir() {
            return true;
        }

        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.starts_with('.'));
        if hidden {
            return false;
        }

        if self.exclude_patterns.iter().any(|p| p.matches_path(path)) {
            tracing::debug!("Skipping excluded directory: {:?}", path);
            return false;
        }

        true
    }

    fn matches_patterns(&self, path: &Path) -> bool {
        let Some(path_str) = path.to_str() else {
            return false;
        };
        let file_name = path.file_name().and_then(|f| f.to_str());

        // No include patterns means include everything
        let included = self.include_patterns.is_empty()
            || self
                .include_patterns
                .iter()
                .any(|p| p.matches(path_str) || file_name.is_some_and(|f| p.matches(f)));

        included
            && !self
                .exclude_patterns
                .iter()
                .any(|p| p.matches(path_str) || p.matches_path(path))
    }
}

fn compile_patterns(patterns: Vec<String>, kind: &str) -> Result<Vec<Pattern>> {
    patterns
        .into_iter()
        .map(|p| {
            Pattern::new(&p).map_err(|e| {
                SemsplitError::ConfigError(format!("Invalid {kind} pattern '{p}': {e}"))
            })
        })
        .collect()
}
