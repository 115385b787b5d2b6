use crate::config::WikiConfig;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<WikiConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    WikiConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults_when_nothing_is_set() {
    let config = config_from(&[]).unwrap();

    assert_eq!(config.listen_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
    assert_eq!(config.pages_dir, PathBuf::from("."));
    assert_eq!(config.templates_dir, None);
    assert!(config.serialize_saves);
}

#[test]
fn test_values_from_environment() {
    let config = config_from(&[
        ("WIKI_LISTEN_ADDR", "127.0.0.1:3000"),
        ("WIKI_PAGES_DIR", "/srv/wiki"),
        ("WIKI_TEMPLATES_DIR", "/srv/templates"),
        ("WIKI_SERIALIZE_SAVES", "false"),
    ])
    .unwrap();

    assert_eq!(config.listen_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
    assert_eq!(config.pages_dir, PathBuf::from("/srv/wiki"));
    assert_eq!(config.templates_dir, Some(PathBuf::from("/srv/templates")));
    assert!(!config.serialize_saves);
}

// an empty templates dir means "use the embedded ones", not "the current directory"
#[test]
fn test_empty_templates_dir_is_unset() {
    let config = config_from(&[("WIKI_TEMPLATES_DIR", "")]).unwrap();

    assert_eq!(config.templates_dir, None);
}

#[test]
fn test_bad_values_are_errors() {
    assert!(config_from(&[("WIKI_LISTEN_ADDR", "not an address")]).is_err());
    assert!(config_from(&[("WIKI_LISTEN_ADDR", "8080")]).is_err());
    assert!(config_from(&[("WIKI_SERIALIZE_SAVES", "maybe")]).is_err());
}

#[test]
fn test_serialize_saves_accepts_common_spellings() {
    for (val, expected) in [("TRUE", true), ("1", true), ("yes", true), ("0", false), ("No", false)] {
        let config = config_from(&[("WIKI_SERIALIZE_SAVES", val)]).unwrap();
        assert_eq!(config.serialize_saves, expected, "value {}", val);
    }
}
