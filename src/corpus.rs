//! Corpus discovery: find the piece files to chart.

use crate::config::InputSelection;
use std::path::PathBuf;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// All piece files selected by `selection`, sorted and de-duplicated.
///
/// Directory entries are kept when their file name matches the include
/// pattern; any file or directory whose name matches the exclude pattern is
/// skipped together with its contents. Explicit files bypass both patterns.
pub fn discover(selection: &InputSelection) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = selection.files.clone();

    for dir in &selection.dirs {
        let max_depth = if selection.recursive { usize::MAX } else { 1 };
        let walker = WalkDir::new(dir)
            .max_depth(max_depth)
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !selection
                        .exclude
                        .is_match(&entry.file_name().to_string_lossy())
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {:?}: {}", dir, e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if selection
                .include
                .is_match(&entry.file_name().to_string_lossy())
            {
                found.push(entry.into_path());
            }
        }
    }

    found.sort();
    found.dedup();
    debug!("Discovered {} piece files", found.len());
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_EXCLUDE, DEFAULT_INCLUDE};
    use regex::Regex;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "global-key: C\nlast-mn: 1\n").unwrap();
    }

    fn selection(dirs: Vec<PathBuf>, files: Vec<PathBuf>, recursive: bool) -> InputSelection {
        InputSelection {
            dirs,
            files,
            include: Regex::new(DEFAULT_INCLUDE).unwrap(),
            exclude: Regex::new(DEFAULT_EXCLUDE).unwrap(),
            recursive,
        }
    }

    fn corpus() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        touch(&root.join("a.yml"));
        touch(&root.join("b.yaml"));
        touch(&root.join("notes.txt"));
        touch(&root.join("_draft.yml"));
        touch(&root.join("c_reviewed.yml"));
        touch(&root.join("sub/d.yml"));
        touch(&root.join(".hidden/e.yml"));
        touch(&root.join("_scratch/f.yml"));
        dir
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_recursive_scan_applies_patterns() {
        let dir = corpus();
        let found = discover(&selection(vec![dir.path().to_path_buf()], vec![], true));
        assert_eq!(names(&found), vec!["a.yml", "b.yaml", "d.yml"]);
    }

    #[test]
    fn test_nonrecursive_scan() {
        let dir = corpus();
        let found = discover(&selection(vec![dir.path().to_path_buf()], vec![], false));
        assert_eq!(names(&found), vec!["a.yml", "b.yaml"]);
    }

    #[test]
    fn test_explicit_files_bypass_patterns_and_dedup() {
        let dir = corpus();
        let draft = dir.path().join("_draft.yml");
        let a = dir.path().join("a.yml");
        let found = discover(&selection(
            vec![dir.path().to_path_buf()],
            vec![draft.clone(), a.clone()],
            false,
        ));
        assert_eq!(found.iter().filter(|p| **p == a).count(), 1);
        assert!(found.contains(&draft));
    }

    #[test]
    fn test_missing_directory_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let found = discover(&selection(vec![dir.path().join("nope")], vec![], true));
        assert!(found.is_empty());
    }
}
