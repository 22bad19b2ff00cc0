use uniquery::config::Config;
use uniquery::document::export::OutputFormat;

// Kept in its own test binary: it points HOME at a temporary directory.
#[test]
fn test_save_writes_to_default_location() {
    let home = tempfile::tempdir().unwrap();
    std::env::set_var("HOME", home.path());

    let config = Config {
        output_format: OutputFormat::Yaml,
        unique: true,
        ..Config::default()
    };
    config.save().unwrap();

    let path = home.path().join(".config").join("uniquery").join("config.toml");
    assert_eq!(Config::config_path(), Some(path.clone()));
    assert!(path.exists());
    assert_eq!(Config::load(), config);
}
