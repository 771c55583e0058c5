use std::io::Write;

use tempfile::NamedTempFile;

use super::*;

#[test]
fn test_load_empty_settings() {
    let settings = SettingsLoader::load_str("").unwrap();
    assert_eq!(settings.limits.max_replies_per_hour, 20);
    assert!(!settings.paths.store_file.to_string_lossy().starts_with('~'));
}

#[test]
fn test_load_full_settings() {
    let content = r#"
        [provider]
        endpoint = "http://localhost:9000/v1/chat/completions"
        model = "llama-3.1-8b-instant"

        [observer]
        surface_delay_ms = 250

        [paths]
        config_dir = "/etc/replyforge"
    "#;
    let settings = SettingsLoader::load_str(content).unwrap();
    assert_eq!(settings.provider.model, "llama-3.1-8b-instant");
    assert_eq!(settings.observer.surface_delay_ms, 250);
    assert_eq!(settings.paths.config_dir, PathBuf::from("/etc/replyforge"));
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[notifications]").unwrap();
    writeln!(file, "dismiss_ms = 1000").unwrap();

    let settings = SettingsLoader::load(file.path()).unwrap();
    assert_eq!(settings.notifications.dismiss_ms, 1000);
}

#[test]
fn test_load_or_default_without_file() {
    let settings =
        SettingsLoader::load_or_default(Path::new("/nonexistent/replyforge.toml")).unwrap();
    assert_eq!(settings.provider.max_tokens, 150);
}

#[test]
fn test_load_invalid_toml() {
    let result = SettingsLoader::load_str("limits = [unclosed");
    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}

#[test]
fn test_expand_env_vars() {
    // SAFETY: test-only variable name, not read elsewhere
    unsafe {
        std::env::set_var("REPLYFORGE_TEST_MODEL", "mixtral");
    }
    let settings = SettingsLoader::load_str("[provider]\nmodel = \"${REPLYFORGE_TEST_MODEL}\"").unwrap();
    assert_eq!(settings.provider.model, "mixtral");
    unsafe {
        std::env::remove_var("REPLYFORGE_TEST_MODEL");
    }
}

#[test]
fn test_expand_env_vars_not_set() {
    let result = SettingsLoader::load_str("[provider]\nmodel = \"${REPLYFORGE_UNSET_VAR_12345}\"");
    assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
}

#[test]
fn test_expand_path_with_tilde() {
    let expanded = SettingsLoader::expand_path(Path::new("~/store.json"));
    assert!(!expanded.to_string_lossy().starts_with('~'));
    assert!(expanded.ends_with("store.json"));
}
