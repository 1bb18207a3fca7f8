//! Integration tests for graviton-history

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    /// Command isolated from the user's real config and cache
    fn graviton(dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("graviton-history");
        cmd.env_remove("GRAVITON_CONFIG")
            .env_remove("GRAVITON_CACHE_DIR")
            .env_remove("CI")
            .arg("--config")
            .arg(dir.path().join("config.toml"))
            .arg("--cache-dir")
            .arg(dir.path().join("cache"));
        cmd
    }

    fn record(dir: &TempDir, input: &str, artifact: &str) {
        graviton(dir)
            .args(["record", input, "--artifact", artifact])
            .assert()
            .success()
            .stdout(predicate::str::contains("Recorded"));
    }

    #[test]
    fn help_displays() {
        let dir = TempDir::new().unwrap();
        graviton(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("resolution-history cache"));
    }

    #[test]
    fn version_displays() {
        let dir = TempDir::new().unwrap();
        graviton(&dir)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("graviton-history"));
    }

    #[test]
    fn list_empty() {
        let dir = TempDir::new().unwrap();
        graviton(&dir)
            .args(["list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No history entries"));

        graviton(&dir)
            .args(["list", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[]"));
    }

    #[test]
    fn record_then_list_newest_first() {
        let dir = TempDir::new().unwrap();
        record(&dir, "com.example:alpha", "com.example:alpha:1.0");
        record(&dir, "com.example:beta", "com.example:beta:2.0");

        let output = graviton(&dir)
            .args(["list", "--format", "plain"])
            .output()
            .unwrap();
        let stdout = String::from_utf8(output.stdout).unwrap();
        let lines: Vec<&str> = stdout.lines().collect();

        assert_eq!(
            lines,
            vec![
                "com.example:beta\tcom.example:beta:2.0",
                "com.example:alpha\tcom.example:alpha:1.0",
            ]
        );
    }

    #[test]
    fn record_persists_file() {
        let dir = TempDir::new().unwrap();
        record(&dir, "--offline com.example:app", "com.example:app:1.0");

        let content =
            std::fs::read_to_string(dir.path().join("cache").join("history.1.jsonl")).unwrap();
        assert!(content.contains("\"user input\":\"--offline com.example:app\""));
        assert!(content.contains("\"resolved artifact\":\"com.example:app:1.0\""));
    }

    #[test]
    fn search_finds_fresh_entry() {
        let dir = TempDir::new().unwrap();
        record(&dir, "--offline com.example:app arg1", "com.example:app:1.0");

        graviton(&dir)
            .args(["search", "com.example:app", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::diff("com.example:app:1.0\n"));

        graviton(&dir)
            .args(["search", "com.example:other"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No fresh resolution"));
    }

    #[test]
    fn bounded_by_configured_max_size() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.toml"), "[history]\nmax_size = 2\n").unwrap();

        record(&dir, "g:a", "g:a:1.0");
        record(&dir, "g:b", "g:b:1.0");
        record(&dir, "g:c", "g:c:1.0");

        graviton(&dir)
            .args(["list", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("g:c").and(predicate::str::contains("g:a\t").not()));
    }

    #[test]
    fn invalid_artifact_fails() {
        let dir = TempDir::new().unwrap();
        graviton(&dir)
            .args(["record", "com.example:app", "--artifact", "not-a-coordinate"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid artifact coordinate"))
            .stderr(predicate::str::contains("Hint:"));
    }

    #[test]
    fn invalid_config_fails() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.toml"), "[history]\nmax_size = 0\n").unwrap();

        graviton(&dir)
            .args(["list"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn path_shows_history_file() {
        let dir = TempDir::new().unwrap();
        graviton(&dir)
            .args(["path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("history.1.jsonl"));
    }

    #[test]
    fn config_path() {
        let dir = TempDir::new().unwrap();
        graviton(&dir)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let dir = TempDir::new().unwrap();
        graviton(&dir)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[history]"));
    }

    #[test]
    fn config_init_writes_defaults() {
        let dir = TempDir::new().unwrap();
        graviton(&dir)
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration initialized"));

        let content = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
        assert!(content.contains("max_size = 20"));

        graviton(&dir)
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already exists"));
    }
}
