//! E2E tests for configuration errors that must stop the agent at startup.

use gl_log_agent::config::AgentConfig;
use gl_log_parser::{ConfigError, FieldKey};

/// Load and build like `main` does, keeping only the error message.
fn build(toml: &str) -> Result<(), String> {
    let config = AgentConfig::from_toml_str(toml).map_err(|e| e.to_string())?;
    config.parser.build().map(|_| ()).map_err(|e| e.to_string())
}

#[test]
fn e2e_missing_tag_aborts() {
    let err = build("path = \"/var/log/glusterfs/glusterd.log\"\n").unwrap_err();
    assert!(err.contains("'tag' option is required"), "{err}");
}

#[test]
fn e2e_empty_log_level_aborts() {
    let err = build(
        "tag = \"g\"\npath = \"/x.log\"\n[parser]\nhostname = \"h\"\ngluster_log_level = \"\"\n",
    )
    .unwrap_err();
    assert!(err.contains("gluster_log_level"), "{err}");
}

#[test]
fn e2e_empty_field_name_aborts() {
    let toml = "tag = \"g\"\npath = \"/x.log\"\n[parser]\nhostname = \"h\"\n[parser.fields]\ncomponent_name = \"\"\n";
    let config = AgentConfig::from_toml_str(toml).unwrap();
    assert!(matches!(
        config.parser.build(),
        Err(ConfigError::EmptyFieldName {
            key: FieldKey::ComponentName
        })
    ));
}

#[test]
fn e2e_duplicate_field_name_aborts() {
    let err = build(
        "tag = \"g\"\npath = \"/x.log\"\n[parser]\nhostname = \"h\"\n[parser.fields]\nfunction_name = \"source_file_name\"\n",
    )
    .unwrap_err();
    assert!(err.contains("source_file_name"), "{err}");
}

#[test]
fn e2e_invalid_time_format_aborts() {
    let err = build(
        "tag = \"g\"\npath = \"/x.log\"\n[parser]\nhostname = \"h\"\ntime_format = \"%Y-%m-%d %Q\"\n",
    )
    .unwrap_err();
    assert!(err.contains("invalid time format"), "{err}");
}

#[test]
fn e2e_time_format_not_matching_captures_aborts() {
    for format in ["%Y-%m-%d", "%d/%m/%Y %H:%M:%S", "literal"] {
        let toml = format!(
            "tag = \"g\"\npath = \"/x.log\"\n[parser]\nhostname = \"h\"\ntime_format = \"{format}\"\n"
        );
        let err = build(&toml).unwrap_err();
        assert!(err.contains("invalid time format"), "{format}: {err}");
    }
}

#[test]
fn e2e_misspelled_keys_abort() {
    let err = build("tag = \"g\"\npath = \"/x.log\"\ngluster_log_levels = \"E\"\n").unwrap_err();
    assert!(err.contains("gluster_log_levels"), "{err}");

    let err = build(
        "tag = \"g\"\npath = \"/x.log\"\n[parser]\nhostname = \"h\"\nhandle_parse_failures = false\n",
    )
    .unwrap_err();
    assert!(err.contains("handle_parse_failures"), "{err}");
}

#[test]
fn e2e_valid_config_builds() {
    assert!(build("tag = \"g\"\npath = \"/x.log\"\n[parser]\nhostname = \"h\"\n").is_ok());
}
