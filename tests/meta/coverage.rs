//! Keeps `tests/unit` a one-to-one mirror of the library modules

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SOURCE_ROOT: &str = "src";
    const UNIT_ROOT: &str = "tests/unit";

    // Files that only declare modules or start a binary
    fn is_root_file(relative: &Path) -> bool {
        matches!(
            relative.file_name().and_then(|n| n.to_str()),
            Some("lib.rs" | "main.rs" | "mod.rs")
        )
    }

    fn rust_files(root: &Path) -> io::Result<BTreeSet<PathBuf>> {
        let mut found = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    if let Ok(relative) = path.strip_prefix(root) {
                        found.insert(relative.to_path_buf());
                    }
                }
            }
        }

        Ok(found)
    }

    fn module_files(root: &str) -> BTreeSet<PathBuf> {
        let files = rust_files(Path::new(root))
            .unwrap_or_else(|error| unreachable!("cannot scan {root}: {error}"));
        files.into_iter().filter(|p| !is_root_file(p)).collect()
    }

    fn listing(paths: &[&PathBuf], prefix: &str) -> String {
        paths
            .iter()
            .map(|p| format!("  - {prefix}/{}", p.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // Tests that every library module has a unit test file at the same relative path
    // Verified by adding a source file without a test counterpart
    #[test]
    fn test_every_module_has_unit_tests() {
        let tests = module_files(UNIT_ROOT);
        let missing: Vec<_> = module_files(SOURCE_ROOT)
            .iter()
            .filter(|p| !tests.contains(*p))
            .cloned()
            .collect();

        assert!(
            missing.is_empty(),
            "modules without unit tests:\n{}",
            listing(&missing.iter().collect::<Vec<_>>(), SOURCE_ROOT)
        );
    }

    // Tests that no unit test file outlives the module it covers
    // Verified by leaving a test file behind after deleting its module
    #[test]
    fn test_no_orphaned_unit_tests() {
        let sources = module_files(SOURCE_ROOT);
        let orphaned: Vec<_> = module_files(UNIT_ROOT)
            .iter()
            .filter(|p| !sources.contains(*p))
            .cloned()
            .collect();

        assert!(
            orphaned.is_empty(),
            "unit tests without a module:\n{}",
            listing(&orphaned.iter().collect::<Vec<_>>(), UNIT_ROOT)
        );
    }

    // Tests that every non-root test file defines at least one test
    // Verified by emptying a unit test file
    #[test]
    fn test_test_files_contain_tests() {
        let files = rust_files(Path::new("tests"))
            .unwrap_or_else(|error| unreachable!("cannot scan tests: {error}"));
        let empty: Vec<_> = files
            .iter()
            .filter(|p| !is_root_file(p))
            .filter(|p| {
                fs::read_to_string(Path::new("tests").join(p))
                    .is_ok_and(|content| !content.contains("#[test]"))
            })
            .collect();

        assert!(
            empty.is_empty(),
            "test files without #[test] functions:\n{}",
            listing(&empty, "tests")
        );
    }
}
