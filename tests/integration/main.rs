//! Integration tests for skulabel

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn skulabel() -> Command {
        cargo_bin_cmd!("skulabel")
    }

    /// Command isolated from the user's config and cache
    fn isolated(temp: &TempDir) -> Command {
        let mut cmd = skulabel();
        cmd.env_remove("SKULABEL_CONFIG")
            .env_remove("SKULABEL_TABLE")
            .arg("--config")
            .arg(temp.path().join("config.toml"))
            .arg("--cache-dir")
            .arg(temp.path().join("barcodes"))
            .arg("--output-dir")
            .arg(temp.path().join("labels"));
        cmd
    }

    fn png_count(dir: &Path) -> usize {
        std::fs::read_dir(dir)
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .filter(|e| e.path().extension().is_some_and(|x| x == "png"))
                    .count()
            })
            .unwrap_or(0)
    }

    #[test]
    fn help_displays() {
        skulabel()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage"))
            .stdout(predicate::str::contains("label"));
    }

    #[test]
    fn version_displays() {
        skulabel()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("skulabel"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        isolated(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        isolated(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[table]"))
            .stdout(predicate::str::contains("[barcode]"));
    }

    #[test]
    fn config_init_then_set() {
        let temp = TempDir::new().unwrap();
        isolated(&temp).args(["config", "init"]).assert().success();
        isolated(&temp)
            .args(["config", "set", "table.match_mode", "exact"])
            .assert()
            .success();

        let saved = std::fs::read_to_string(temp.path().join("config.toml")).unwrap();
        assert!(saved.contains("match_mode = \"exact\""));
    }

    #[test]
    fn config_set_unknown_key_fails() {
        let temp = TempDir::new().unwrap();
        isolated(&temp)
            .args(["config", "set", "nope.key", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn broken_config_is_reported() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("config.toml"), "[table\n").unwrap();
        isolated(&temp)
            .args(["cache", "path"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"))
            .stderr(predicate::str::contains("config init --force"));

        isolated(&temp)
            .args(["config", "init", "--force"])
            .assert()
            .success();
    }

    #[test]
    fn missing_table_is_fatal() {
        let temp = TempDir::new().unwrap();
        isolated(&temp)
            .args(["label", "ABC123", "--table"])
            .arg(temp.path().join("nonexistent.xlsx"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("reference table not found"));
        assert_eq!(png_count(&temp.path().join("barcodes")), 0);
    }

    #[test]
    fn interactive_without_table_is_fatal() {
        let temp = TempDir::new().unwrap();
        isolated(&temp)
            .arg("--table")
            .arg(temp.path().join("nonexistent.xlsx"))
            .write_stdin("ABC123\nexit\n")
            .assert()
            .failure()
            .stderr(predicate::str::contains("reference table not found"));
    }

    #[test]
    fn barcode_renders_once_then_hits_cache() {
        let temp = TempDir::new().unwrap();
        let cache = temp.path().join("barcodes");

        let first = isolated(&temp)
            .args(["barcode", "999.1234"])
            .assert()
            .success()
            .stdout(predicate::str::contains(".png"))
            .get_output()
            .stdout
            .clone();
        assert_eq!(png_count(&cache), 1);

        let second = isolated(&temp)
            .args(["barcode", "  999.1234 "])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        assert_eq!(first, second);
        assert_eq!(png_count(&cache), 1);
    }

    #[test]
    fn barcode_blank_sku_rejected() {
        let temp = TempDir::new().unwrap();
        isolated(&temp)
            .args(["barcode", "   "])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Please enter a valid SKU"));
    }

    #[test]
    fn cache_list_and_clear() {
        let temp = TempDir::new().unwrap();
        isolated(&temp).args(["barcode", "ABC123"]).assert().success();
        isolated(&temp).args(["barcode", "XYZ"]).assert().success();

        isolated(&temp)
            .args(["cache", "list", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"size_bytes\""));

        isolated(&temp)
            .args(["cache", "clear", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("cleared 2 barcode(s)"));
        assert_eq!(png_count(&temp.path().join("barcodes")), 0);
    }

    #[test]
    fn cache_path_prints_dir() {
        let temp = TempDir::new().unwrap();
        isolated(&temp)
            .args(["cache", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("barcodes"));
    }
}
