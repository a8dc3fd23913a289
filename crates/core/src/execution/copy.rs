//! File-copy action adapter
//!
//! Resolves each source glob against the pipeline root with a
//! breadth-first directory walk, creates the destination directory if
//! absent, and copies every matched file preserving its base name.
//! Re-running a copy overwrites the previous files, so copy tasks are
//! idempotent.

use globset::GlobBuilder;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::types::{ConveyorError, ConveyorResult};

/// Executes file-copy actions relative to the pipeline root.
pub struct CopyAdapter<'a> {
    root: &'a Path,
}

impl<'a> CopyAdapter<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    /// Copy every file matched by `sources` into `dest`.
    ///
    /// Each pattern is resolved independently so that an unmatched one can
    /// be reported by name. Unless `allow_empty` is set, a pattern matching
    /// nothing fails the task. Returns a manifest of the copied files.
    pub fn run(
        &self,
        sources: &[String],
        dest: &Path,
        allow_empty: bool,
    ) -> ConveyorResult<String> {
        let files = self.walk_files();

        let dest_dir = if dest.is_relative() {
            self.root.join(dest)
        } else {
            dest.to_path_buf()
        };

        let mut manifest = String::new();
        let mut created_dest = false;

        for pattern in sources {
            let matcher = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| {
                    ConveyorError::Config(format!("Invalid source pattern '{}': {}", pattern, e))
                })?
                .compile_matcher();

            let matched: Vec<&PathBuf> =
                files.iter().filter(|path| matcher.is_match(path)).collect();

            if matched.is_empty() && !allow_empty {
                return Err(ConveyorError::SourceUnmatched(pattern.clone()));
            }

            // Created lazily so that an unmatched pattern has no side effect.
            if !created_dest && !matched.is_empty() {
                std::fs::create_dir_all(&dest_dir)?;
                created_dest = true;
            }

            for relative in matched {
                let file_name = relative.file_name().ok_or_else(|| {
                    ConveyorError::Config(format!(
                        "Source pattern '{}' matched a path with no file name",
                        pattern
                    ))
                })?;
                let target = dest_dir.join(file_name);
                std::fs::copy(self.root.join(relative), &target)?;
                manifest.push_str(&format!(
                    "{} -> {}\n",
                    relative.display(),
                    target.display()
                ));
            }
        }

        Ok(manifest)
    }

    /// All regular files under the root, as paths relative to it.
    fn walk_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(self.root.to_path_buf());

        while let Some(current_dir) = queue.pop_front() {
            if let Ok(entries) = std::fs::read_dir(&current_dir) {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.is_file() {
                        if let Ok(relative) = path.strip_prefix(self.root) {
                            files.push(relative.to_path_buf());
                        }
                    } else if path.is_dir() {
                        queue.push_back(path);
                    }
                }
            }
        }

        files.sort();
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn copies_matched_files_preserving_base_names() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "images/icon.png", "icon");
        write(root, "images/logo.png", "logo");
        write(root, "images/readme.txt", "not matched");

        let manifest = CopyAdapter::new(root)
            .run(
                &["images/*.png".to_string()],
                Path::new("dist/falcon"),
                false,
            )
            .unwrap();

        let dest = root.join("dist/falcon");
        assert_eq!(
            std::fs::read_to_string(dest.join("icon.png")).unwrap(),
            "icon"
        );
        assert_eq!(
            std::fs::read_to_string(dest.join("logo.png")).unwrap(),
            "logo"
        );
        assert!(!dest.join("readme.txt").exists());
        assert!(manifest.contains("icon.png"));
    }

    #[test]
    fn literal_paths_work_as_patterns() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "click/manifest.json", "{}");

        CopyAdapter::new(root)
            .run(
                &["click/manifest.json".to_string()],
                Path::new("dist"),
                false,
            )
            .unwrap();

        assert!(root.join("dist/manifest.json").exists());
    }

    #[test]
    fn unmatched_pattern_fails_and_creates_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();

        let err = CopyAdapter::new(root)
            .run(&["missing/*.txt".to_string()], Path::new("dist"), false)
            .unwrap_err();

        assert!(
            matches!(err, ConveyorError::SourceUnmatched(ref pattern) if pattern == "missing/*.txt")
        );
        assert!(!root.join("dist").exists());
    }

    #[test]
    fn unmatched_pattern_is_allowed_when_opted_in() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "a.txt", "a");

        let manifest = CopyAdapter::new(root)
            .run(
                &["a.txt".to_string(), "missing/*.txt".to_string()],
                Path::new("out"),
                true,
            )
            .unwrap();

        assert!(root.join("out/a.txt").exists());
        assert!(manifest.contains("a.txt"));
    }

    #[test]
    fn star_does_not_cross_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "top.ini", "top");
        write(root, "nested/inner.ini", "inner");

        CopyAdapter::new(root)
            .run(&["*.ini".to_string()], Path::new("out"), false)
            .unwrap();

        assert!(root.join("out/top.ini").exists());
        assert!(!root.join("out/inner.ini").exists());
    }

    #[test]
    fn rerunning_a_copy_overwrites_previous_output() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write(root, "a.txt", "first");

        let adapter = CopyAdapter::new(root);
        adapter
            .run(&["a.txt".to_string()], Path::new("out"), false)
            .unwrap();

        write(root, "a.txt", "second");
        adapter
            .run(&["a.txt".to_string()], Path::new("out"), false)
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(root.join("out/a.txt")).unwrap(),
            "second"
        );
    }

    #[test]
    fn invalid_pattern_is_a_configuration_error() {
        let temp_dir = tempfile::tempdir().unwrap();

        let err = CopyAdapter::new(temp_dir.path())
            .run(&["[".to_string()], Path::new("out"), false)
            .unwrap_err();

        assert!(matches!(err, ConveyorError::Config(_)));
    }
}
