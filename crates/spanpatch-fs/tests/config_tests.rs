use spanpatch_fs::{ConfigStore, Error, NormalizedPath};
use serde::Deserialize;
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Deserialize, PartialEq)]
struct MarkerConfig {
    open: String,
    close: String,
    #[serde(default)]
    body: bool,
}

fn load(file_name: &str, content: &str) -> spanpatch_fs::Result<MarkerConfig> {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join(file_name);
    fs::write(&file_path, content).unwrap();
    ConfigStore::new().load(&NormalizedPath::new(&file_path))
}

#[test]
fn test_load_toml() {
    let config = load(
        "patch.toml",
        "open = \"<!-- begin -->\"\nclose = \"<!-- end -->\"\nbody = true\n",
    )
    .unwrap();

    assert_eq!(config.open, "<!-- begin -->");
    assert_eq!(config.close, "<!-- end -->");
    assert!(config.body);
}

#[test]
fn test_load_json() {
    let config = load("patch.json", r#"{"open": "/* a */", "close": "/* b */"}"#).unwrap();

    assert_eq!(config.open, "/* a */");
    assert!(!config.body);
}

#[test]
fn test_load_yaml_and_yml() {
    for name in ["patch.yaml", "patch.yml"] {
        let config = load(name, "open: \"# start\"\nclose: \"# stop\"\n").unwrap();
        assert_eq!(config.close, "# stop");
    }
}

#[test]
fn test_extension_is_case_insensitive() {
    let config = load("PATCH.TOML", "open = \"a\"\nclose = \"b\"\n").unwrap();
    assert_eq!(config.open, "a");
}

#[test]
fn test_unsupported_format() {
    let result = load("patch.ini", "open=a");
    assert!(matches!(result, Err(Error::UnsupportedFormat { extension }) if extension == "ini"));
}

#[test]
fn test_parse_error_names_format() {
    let result = load("patch.toml", "open = ");
    match result {
        Err(Error::ConfigParse { format, .. }) => assert_eq!(format, "TOML"),
        other => panic!("expected ConfigParse, got {:?}", other),
    }
}

#[test]
fn test_missing_config_is_not_found() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("absent.toml"));
    let result: spanpatch_fs::Result<MarkerConfig> = ConfigStore::new().load(&path);
    assert!(matches!(result, Err(Error::NotFound { .. })));
}
