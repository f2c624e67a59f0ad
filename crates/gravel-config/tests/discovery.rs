use std::fs;

use gravel_config::{
    discover_config_path, load_for_workspace, load_for_workspace_with_diagnostics,
    with_config_env_lock, ConfigError, GravelConfig, GRAVEL_CONFIG_ENV_VAR,
};

#[test]
fn prefers_gravel_toml_over_dotfile() {
    with_config_env_lock(|| {
        std::env::remove_var(GRAVEL_CONFIG_ENV_VAR);
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".gravel.toml"), "").unwrap();
        let dot = discover_config_path(dir.path()).unwrap();
        assert!(dot.ends_with(".gravel.toml"));

        fs::write(dir.path().join("gravel.toml"), "").unwrap();
        let main = discover_config_path(dir.path()).unwrap();
        assert!(main.ends_with("gravel.toml"));
        assert!(!main.ends_with(".gravel.toml"));
    });
}

#[test]
fn env_var_overrides_discovery_relative_to_root() {
    with_config_env_lock(|| {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("gravel.toml"), "").unwrap();
        fs::create_dir(dir.path().join("conf")).unwrap();
        fs::write(
            dir.path().join("conf/custom.toml"),
            "[intentions]\nconvert_lambda_to_closure = false\n",
        )
        .unwrap();

        std::env::set_var(GRAVEL_CONFIG_ENV_VAR, "conf/custom.toml");
        let result = load_for_workspace(dir.path());
        std::env::remove_var(GRAVEL_CONFIG_ENV_VAR);

        let (config, path) = result.unwrap();
        assert!(path.unwrap().ends_with("conf/custom.toml"));
        assert!(!config.intentions.convert_lambda_to_closure);
    });
}

#[test]
fn missing_config_yields_defaults() {
    with_config_env_lock(|| {
        std::env::remove_var(GRAVEL_CONFIG_ENV_VAR);
        let dir = tempfile::tempdir().unwrap();
        let (config, path) = load_for_workspace(dir.path()).unwrap();
        assert_eq!(config, GravelConfig::default());
        assert!(path.is_none());
    });
}

#[test]
fn unreadable_path_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GravelConfig::load_from_path(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn diagnostics_flag_log_file_in_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gravel.toml");
    let log = dir.path().join("nope/gravel.log");
    fs::write(
        &path,
        format!("[logging]\nfile = {:?}\n", log.display().to_string()),
    )
    .unwrap();

    let (_config, diagnostics) = GravelConfig::load_from_path_with_diagnostics(&path).unwrap();
    assert!(diagnostics.unknown_keys.is_empty());
    assert_eq!(diagnostics.warnings.len(), 1);
    assert!(diagnostics.warnings[0].to_string().contains("does not exist"));
}

#[test]
fn workspace_load_reports_unknown_keys() {
    with_config_env_lock(|| {
        std::env::remove_var(GRAVEL_CONFIG_ENV_VAR);
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".gravel.toml"),
            "[intentions]\nconvert_lambda_to_closure = false\nconvert_all = true\n",
        )
        .unwrap();

        let (config, path, diagnostics) = load_for_workspace_with_diagnostics(dir.path()).unwrap();
        assert!(!config.intentions.convert_lambda_to_closure);
        assert!(path.unwrap().ends_with(".gravel.toml"));
        assert_eq!(diagnostics.unknown_keys, vec!["intentions.convert_all".to_owned()]);

        let empty = tempfile::tempdir().unwrap();
        let (_, path, diagnostics) = load_for_workspace_with_diagnostics(empty.path()).unwrap();
        assert!(path.is_none());
        assert!(diagnostics.is_empty());
    });
}
