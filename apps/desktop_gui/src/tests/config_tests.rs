use super::{apply_env, apply_file, load_settings, Settings, DEFAULT_API_BASE_URL};

use std::{
    collections::HashMap,
    env, fs,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn defaults_point_at_public_placeholder_api() {
    let settings = Settings::default();
    assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(settings.request_timeout(), Duration::from_secs(15));
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
            api_base_url = "http://127.0.0.1:9000/employees"
            request_timeout_secs = 3
        "#,
    )
    .expect("valid toml");
    assert_eq!(settings.api_base_url, "http://127.0.0.1:9000/employees");
    assert_eq!(settings.request_timeout_secs, 3);
    assert_eq!(settings.default_avatar_url, Settings::default().default_avatar_url);
}

#[test]
fn malformed_file_is_an_error() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "request_timeout_secs = \"soon\"").is_err());
}

#[test]
fn app_prefixed_env_wins_over_plain_env() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        lookup_from(&[
            ("STAFFDESK_API_BASE_URL", "http://plain/users"),
            ("APP__API_BASE_URL", "http://prefixed/users"),
        ]),
    );
    assert_eq!(settings.api_base_url, "http://prefixed/users");
}

#[test]
fn blank_and_unparsable_env_values_are_ignored() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        lookup_from(&[
            ("APP__API_BASE_URL", "   "),
            ("APP__REQUEST_TIMEOUT_SECS", "later"),
        ]),
    );
    assert_eq!(settings, Settings::default());
}

#[test]
fn zero_timeout_is_clamped_to_one_second() {
    let settings = Settings {
        request_timeout_secs: 0,
        ..Settings::default()
    };
    assert_eq!(settings.request_timeout(), Duration::from_secs(1));
}

#[test]
fn load_settings_reads_file_from_disk() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("employee_desk_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("mkdir");
    let path = temp_root.join("staffdesk.toml");
    fs::write(&path, "default_avatar_url = \"https://pics.example.com/none.png\"\n")
        .expect("write config");

    let settings = load_settings(&path).expect("load");
    assert_eq!(settings.default_avatar_url, "https://pics.example.com/none.png");

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let path = env::temp_dir().join("employee_desk_definitely_missing.toml");
    let settings = load_settings(&path).expect("load");
    assert_eq!(settings.default_avatar_url, Settings::default().default_avatar_url);
}
