//! Tests for configuration file loading.

use super::*;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serial_test::serial;
use std::env;
use std::fs;

fn temp_config(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("syslog_view_{}_{}.toml", name, std::process::id()));
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

fn empty_file() -> ConfigFile {
    ConfigFile {
        page_size: None,
        page_size_options: None,
        details_width: None,
        snackbar_timeout_ms: None,
        min_column_width: None,
        page_step: None,
        log_file_path: None,
        keybindings: None,
    }
}

#[test]
fn default_config_path_ends_with_config_toml() {
    if let Some(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(
            path_str.contains("syslog-view") && path_str.ends_with("config.toml"),
            "unexpected default config path: {}",
            path_str
        );
    }
}

#[test]
fn default_log_path_ends_with_log_file() {
    let path = default_log_path();
    assert!(path.to_string_lossy().ends_with("syslog-view.log"));
}

#[test]
fn defaults_match_documented_values() {
    let config = ResolvedConfig::default();
    assert_eq!(config.page_size, 50);
    assert_eq!(config.page_size_options, vec![20, 50, 100, 200]);
    assert_eq!(config.details_width, 400.0);
    assert_eq!(config.snackbar_timeout_ms, 1000);
    assert_eq!(config.min_column_width, 1.0);
    assert_eq!(config.page_step, 20);
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(result, Ok(None));
}

#[test]
fn load_config_file_parses_valid_toml() {
    let path = temp_config(
        "valid",
        r#"
page_size = 100
page_size_options = [10, 100]
details_width = 60.0
snackbar_timeout_ms = 2500
page_step = 10

[keybindings]
toggle_live = ["f"]
"#,
    );

    let config = load_config_file(&path).unwrap().unwrap();

    assert_eq!(config.page_size, Some(100));
    assert_eq!(config.page_size_options, Some(vec![10, 100]));
    assert_eq!(config.details_width, Some(60.0));
    assert_eq!(config.snackbar_timeout_ms, Some(2500));
    assert_eq!(config.page_step, Some(10));
    assert_eq!(
        config.keybindings.unwrap().get("toggle_live"),
        Some(&vec!["f".to_string()])
    );

    fs::remove_file(path).ok();
}

#[test]
fn load_config_file_rejects_unknown_keys() {
    let path = temp_config("unknown", "theme = \"dark\"\n");

    let result = load_config_file(&path);

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    fs::remove_file(path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let path = temp_config("invalid", "page_size = [\n");

    let result = load_config_file(&path);

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    fs::remove_file(path).ok();
}

#[test]
fn merge_none_gives_defaults() {
    assert_eq!(merge_config(None), Ok(ResolvedConfig::default()));
}

#[test]
fn merge_overrides_only_present_fields() {
    let file = ConfigFile {
        page_size: Some(200),
        log_file_path: Some(PathBuf::from("/tmp/custom.log")),
        ..empty_file()
    };

    let resolved = merge_config(Some(file)).unwrap();

    assert_eq!(resolved.page_size, 200);
    assert_eq!(resolved.log_file_path, PathBuf::from("/tmp/custom.log"));
    assert_eq!(resolved.details_width, 400.0);
}

#[test]
fn merge_rejects_zero_page_size() {
    let file = ConfigFile {
        page_size: Some(0),
        ..empty_file()
    };

    assert!(matches!(
        merge_config(Some(file)),
        Err(ConfigError::InvalidValue { field: "page_size", .. })
    ));
}

#[test]
fn keybinding_overrides_replace_defaults() {
    let file = ConfigFile {
        keybindings: Some(BTreeMap::from([(
            "next_page".to_string(),
            vec!["n".to_string(), "ctrl+right".to_string()],
        )])),
        ..empty_file()
    };

    let bindings = merge_config(Some(file)).unwrap().keybindings;

    assert_eq!(
        bindings.get(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE)),
        Some(KeyAction::NextPage)
    );
    assert_eq!(
        bindings.get(KeyEvent::new(KeyCode::Right, KeyModifiers::CONTROL)),
        Some(KeyAction::NextPage)
    );
    assert_eq!(
        bindings.get(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)),
        None
    );
}

#[test]
fn keybinding_errors_name_the_culprit() {
    let unknown = ConfigFile {
        keybindings: Some(BTreeMap::from([("fly".to_string(), vec!["f".to_string()])])),
        ..empty_file()
    };
    assert_eq!(
        merge_config(Some(unknown)),
        Err(ConfigError::UnknownAction("fly".to_string()))
    );

    let bad_key = ConfigFile {
        keybindings: Some(BTreeMap::from([(
            "toggle_live".to_string(),
            vec!["hyper+f".to_string()],
        )])),
        ..empty_file()
    };
    assert!(matches!(
        merge_config(Some(bad_key)),
        Err(ConfigError::InvalidKey { .. })
    ));
}

#[test]
#[serial(syslog_view_env)]
fn env_overrides_apply() {
    env::set_var(PAGE_SIZE_ENV, "20");
    env::set_var(SNACKBAR_TIMEOUT_ENV, "250");

    let config = apply_env_overrides(ResolvedConfig::default());

    env::remove_var(PAGE_SIZE_ENV);
    env::remove_var(SNACKBAR_TIMEOUT_ENV);
    assert_eq!(config.page_size, 20);
    assert_eq!(config.snackbar_timeout_ms, 250);
}

#[test]
#[serial(syslog_view_env)]
fn invalid_env_overrides_are_ignored() {
    env::set_var(PAGE_SIZE_ENV, "0");
    env::set_var(SNACKBAR_TIMEOUT_ENV, "soon");

    let config = apply_env_overrides(ResolvedConfig::default());

    env::remove_var(PAGE_SIZE_ENV);
    env::remove_var(SNACKBAR_TIMEOUT_ENV);
    assert_eq!(config.page_size, 50);
    assert_eq!(config.snackbar_timeout_ms, 1000);
}

#[test]
#[serial(syslog_view_env)]
fn explicit_path_beats_env_path() {
    let explicit = temp_config("explicit", "page_size = 20\n");
    let from_env = temp_config("from_env", "page_size = 200\n");
    env::set_var(CONFIG_ENV, &from_env);

    let config = load_config(Some(explicit.clone())).unwrap();
    let env_config = load_config(None).unwrap();

    env::remove_var(CONFIG_ENV);
    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();
    assert_eq!(config.page_size, 20);
    assert_eq!(env_config.page_size, 200);
}
