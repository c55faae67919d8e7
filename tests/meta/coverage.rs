//! Enforces the one-to-one mirror between `src/` and `tests/unit/`

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    // Harness roots and module declarations carry no tests of their own
    const ORGANIZATION_FILES: [&str; 3] = ["main.rs", "lib.rs", "mod.rs"];

    fn is_organization_file(relative: &str) -> bool {
        let file_name = relative.rsplit('/').next().unwrap_or(relative);
        ORGANIZATION_FILES.contains(&file_name)
    }

    /// Relative paths of every `.rs` file and directory below `base`
    fn collect_relative_paths(dir: &Path, base: &Path) -> io::Result<BTreeSet<String>> {
        let mut paths = BTreeSet::new();
        if !dir.is_dir() {
            return Ok(paths);
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(|_| io::Error::other("path outside scanned tree"))?
                .to_string_lossy()
                .replace('\\', "/");

            if path.is_dir() {
                paths.extend(collect_relative_paths(&path, base)?);
                paths.insert(relative);
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                paths.insert(relative);
            }
        }
        Ok(paths)
    }

    fn src_and_unit_paths() -> (BTreeSet<String>, BTreeSet<String>) {
        let src = collect_relative_paths(Path::new("src"), Path::new("src"))
            .unwrap_or_else(|error| panic!("failed to scan src: {error}"));
        let unit = collect_relative_paths(Path::new("tests/unit"), Path::new("tests/unit"))
            .unwrap_or_else(|error| panic!("failed to scan tests/unit: {error}"));
        (src, unit)
    }

    fn report(title: &str, lines: &[String]) -> String {
        format!("{title}:\n{}", lines.join("\n"))
    }

    // Tests every source file has a unit test counterpart
    // Verified by deleting a unit test file
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let (src, unit) = src_and_unit_paths();

        let missing: Vec<String> = src
            .iter()
            .filter(|path| !is_organization_file(path) && !unit.contains(*path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "{}",
            report("Source files missing unit test counterparts", &missing)
        );
    }

    // Tests no unit test outlives its source file
    // Verified by adding a unit test for a nonexistent module
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let (src, unit) = src_and_unit_paths();

        let orphaned: Vec<String> = unit
            .iter()
            .filter(|path| !is_organization_file(path) && !src.contains(*path))
            .map(|path| format!("  - tests/unit/{path} (no src/{path})"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "{}",
            report("Unit tests without source counterparts", &orphaned)
        );
    }

    // Tests every unit test file is declared so cargo compiles it
    // Verified by removing a module declaration from a mod.rs
    #[test]
    fn test_all_unit_tests_are_declared() {
        let (_, unit) = src_and_unit_paths();
        let unit_dir = Path::new("tests/unit");

        let undeclared: Vec<String> = unit
            .iter()
            .filter(|path| path.ends_with(".rs") && !is_organization_file(path))
            .filter(|path| {
                let (parent, file) = path.rsplit_once('/').unwrap_or(("", path.as_str()));
                let module = file.trim_end_matches(".rs");
                let declaring = if parent.is_empty() {
                    unit_dir.join("main.rs")
                } else {
                    unit_dir.join(parent).join("mod.rs")
                };
                let declarations = fs::read_to_string(declaring).unwrap_or_default();
                !declarations
                    .lines()
                    .any(|line| line.trim().trim_start_matches("pub ") == format!("mod {module};"))
            })
            .map(|path| format!("  - tests/unit/{path}"))
            .collect();

        assert!(
            undeclared.is_empty(),
            "{}",
            report("Unit test files not declared in their parent module", &undeclared)
        );
    }

    // Tests every test file contains at least one test
    // Verified by emptying a test module
    #[test]
    fn test_all_test_files_contain_tests() {
        let tests_dir = Path::new("tests");
        let files = collect_relative_paths(tests_dir, tests_dir)
            .unwrap_or_else(|error| panic!("failed to scan tests: {error}"));

        let without_tests: Vec<String> = files
            .iter()
            .filter(|path| path.ends_with(".rs") && !is_organization_file(path))
            .filter(|path| {
                fs::read_to_string(tests_dir.join(path))
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .map(|path| format!("  - tests/{path}"))
            .collect();

        assert!(
            without_tests.is_empty(),
            "{}",
            report("Test files without any #[test] function", &without_tests)
        );
    }
}
