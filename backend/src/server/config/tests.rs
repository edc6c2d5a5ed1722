//! Unit tests for server configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;

const SECRET: &str = "0123456789abcdef0123456789abcdef";

fn mock_env(vars: HashMap<String, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect()
}

fn release_vars() -> HashMap<String, String> {
    vars(&[
        (SECRET_ENV, SECRET),
        (DATABASE_URL_ENV, "postgres://localhost/feedql"),
    ])
}

#[rstest]
fn release_defaults_bind_all_interfaces_on_4000() {
    let settings =
        server_settings_from_env(&mock_env(release_vars()), BuildMode::Release).expect("valid");
    assert_eq!(settings.bind_addr, "0.0.0.0:4000".parse::<SocketAddr>().expect("addr"));
    assert_eq!(settings.secret.len(), SECRET.len());
    assert_eq!(
        settings.database_url.as_deref(),
        Some("postgres://localhost/feedql")
    );
}

#[rstest]
#[case(BuildMode::Debug)]
#[case(BuildMode::Release)]
fn explicit_port_and_host_are_used(#[case] mode: BuildMode) {
    let mut env = release_vars();
    env.insert(PORT_ENV.to_owned(), "8081".to_owned());
    env.insert(HOST_ENV.to_owned(), "127.0.0.1".to_owned());
    let settings = server_settings_from_env(&mock_env(env), mode).expect("valid");
    assert_eq!(settings.bind_addr, "127.0.0.1:8081".parse::<SocketAddr>().expect("addr"));
}

#[rstest]
#[case(PORT_ENV, "not-a-port")]
#[case(PORT_ENV, "70000")]
#[case(HOST_ENV, "localhost")]
fn invalid_values_fail_in_release(#[case] name: &'static str, #[case] value: &str) {
    let mut env = release_vars();
    env.insert(name.to_owned(), value.to_owned());
    let err = server_settings_from_env(&mock_env(env), BuildMode::Release)
        .expect_err("invalid value must fail");
    assert!(matches!(err, ServerConfigError::InvalidEnv { name: n, .. } if n == name));
}

#[rstest]
#[case(PORT_ENV, "not-a-port")]
#[case(HOST_ENV, "localhost")]
fn invalid_values_fall_back_in_debug(#[case] name: &str, #[case] value: &str) {
    let mut env = release_vars();
    env.insert(name.to_owned(), value.to_owned());
    let settings = server_settings_from_env(&mock_env(env), BuildMode::Debug).expect("fallback");
    assert_eq!(settings.bind_addr, "0.0.0.0:4000".parse::<SocketAddr>().expect("addr"));
}

#[rstest]
#[case(SECRET_ENV)]
#[case(DATABASE_URL_ENV)]
fn release_requires_secret_and_database(#[case] missing: &'static str) {
    let mut env = release_vars();
    env.remove(missing);
    let err = server_settings_from_env(&mock_env(env), BuildMode::Release)
        .expect_err("missing value must fail");
    assert_eq!(err, ServerConfigError::MissingEnv { name: missing });
}

#[rstest]
fn release_rejects_short_secret() {
    let mut env = release_vars();
    env.insert(SECRET_ENV.to_owned(), "short".to_owned());
    let err = server_settings_from_env(&mock_env(env), BuildMode::Release)
        .expect_err("short secret must fail");
    assert_eq!(
        err,
        ServerConfigError::SecretTooShort {
            length: 5,
            min_len: SECRET_MIN_LEN
        }
    );
}

#[rstest]
fn debug_accepts_empty_environment() {
    let settings =
        server_settings_from_env(&mock_env(HashMap::new()), BuildMode::Debug).expect("defaults");
    assert_eq!(settings.bind_addr.port(), DEFAULT_PORT);
    assert!(settings.secret.len() >= SECRET_MIN_LEN);
    assert!(settings.database_url.is_none());
}

#[rstest]
fn blank_values_count_as_unset() {
    let env = vars(&[(PORT_ENV, " "), (SECRET_ENV, ""), (DATABASE_URL_ENV, "  ")]);
    let settings = server_settings_from_env(&mock_env(env), BuildMode::Debug).expect("defaults");
    assert_eq!(settings.bind_addr.port(), DEFAULT_PORT);
    assert!(settings.database_url.is_none());
}

#[rstest]
fn debug_output_redacts_secrets() {
    let settings =
        server_settings_from_env(&mock_env(release_vars()), BuildMode::Release).expect("valid");
    let rendered = format!("{settings:?}");
    assert!(!rendered.contains(SECRET));
    assert!(!rendered.contains("postgres://"));
}

#[rstest]
#[case(BuildMode::Debug, true)]
#[case(BuildMode::Release, false)]
fn build_mode_debug_flag(#[case] mode: BuildMode, #[case] expected: bool) {
    assert_eq!(mode.is_debug(), expected);
}
