use std::collections::HashMap;

use kbqa_core::config::{Mode, Settings, DEFAULT_API_BASE_URL};
use pretty_assertions::assert_eq;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_are_valid() {
    let s = Settings::default();
    s.validate().expect("defaults validate");
    assert_eq!(s.chunk_size, 1400);
    assert_eq!(s.chunk_overlap, 200);
    assert_eq!(s.retr_top_k, 5);
    assert_eq!(s.pool_per_variant, 8);
    assert_eq!(s.rerank_pool_max, 30);
    assert_eq!(s.max_variants, 6);
    assert_eq!(s.api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn toml_overrides_only_named_keys() {
    let s = Settings::from_toml_str(
        r#"
chunk_size = 600
model_answer = "gpt-4.1-mini"
"#,
    )
    .expect("parse");
    assert_eq!(s.chunk_size, 600);
    assert_eq!(s.model_answer, "gpt-4.1-mini");
    assert_eq!(s.chunk_overlap, Settings::default().chunk_overlap);
}

#[test]
fn env_overrides_win_over_toml() {
    let s = Settings::from_toml_str("retr_top_k = 3\n")
        .expect("parse")
        .apply_env(env(&[("RETR_TOP_K", "7"), ("EMBED_MODEL", " text-embedding-3-large ")]))
        .expect("env");
    assert_eq!(s.retr_top_k, 7);
    assert_eq!(s.embed_model, "text-embedding-3-large");
}

#[test]
fn blank_env_values_are_ignored() {
    let s = Settings::default()
        .apply_env(env(&[("CHUNK_SIZE", "   ")]))
        .expect("env");
    assert_eq!(s.chunk_size, 1400);
}

#[test]
fn malformed_env_value_is_config_invalid() {
    let err = Settings::default()
        .apply_env(env(&[("SIM_THRESHOLD_LOG", "low")]))
        .expect_err("should fail");
    assert_eq!(err.code, "CONFIG_INVALID");
    assert!(err.details.unwrap_or_default().contains("SIM_THRESHOLD_LOG"));
}

#[test]
fn zero_top_k_is_rejected() {
    let err = Settings::from_toml_str("retr_top_k = 0\n").expect_err("should fail");
    assert_eq!(err.code, "CONFIG_INVALID");
}

#[test]
fn negative_chunk_size_is_allowed() {
    let s = Settings::from_toml_str("chunk_size = -1\n").expect("parse");
    assert_eq!(s.chunk_size, -1);
}

#[test]
fn mode_follows_key_presence() {
    let s = Settings::default();
    assert!(Mode::from_api_key(None, &s).is_offline());
    assert!(Mode::from_api_key(Some("   "), &s).is_offline());

    match Mode::from_api_key(Some(" sk-test "), &s) {
        Mode::Live { credentials, models } => {
            assert_eq!(credentials.api_key, "sk-test");
            assert_eq!(credentials.base_url, DEFAULT_API_BASE_URL);
            assert_eq!(models, s.model_ids());
        }
        Mode::Offline => panic!("expected live mode"),
    }
}
