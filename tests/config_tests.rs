use uniquery::config::Config;
use uniquery::document::export::OutputFormat;
use uniquery::document::parser::InputFormat;
use uniquery::query::DEFAULT_MAX_DEPTH;

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.output_format, OutputFormat::Json);
    assert_eq!(config.input_format, InputFormat::Json);
    assert!(!config.unique);
    assert!(!config.show_paths);
    assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    assert!(!config.verbose);
}

#[test]
fn test_config_save_and_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = Config {
        output_format: OutputFormat::Yaml,
        input_format: InputFormat::Auto,
        unique: true,
        show_paths: true,
        max_depth: 64,
        verbose: true,
    };
    config.save_to(&path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("output_format = \"yaml\""));
    assert!(contents.contains("input_format = \"auto\""));

    assert_eq!(Config::load_from(&path), config);
}

#[test]
fn test_partial_config_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "unique = true\noutput_format = \"yaml\"\n").unwrap();

    let config = Config::load_from(&path);
    assert!(config.unique);
    assert_eq!(config.output_format, OutputFormat::Yaml);
    assert_eq!(config.input_format, InputFormat::Json);
    assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "output_format = \"xml\"\n").unwrap();

    assert_eq!(Config::load_from(&path), Config::default());
}

#[test]
fn test_missing_config_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.toml");

    assert_eq!(Config::load_from(&path), Config::default());
}

#[test]
fn test_config_path_location() {
    if let Some(path) = Config::config_path() {
        assert!(path.ends_with(".config/uniquery/config.toml"));
    }
}
