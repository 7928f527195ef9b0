mod support;

use std::io::Write;

use support::with_scoped_env;
use umoja_sim::config::{SimulatorConfig, CONFIG_ENV_VAR};
use umoja_sim::models::{PricingMode, ScheduleMode};

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_from_file_reads_sections() {
    let file = write_config(
        r#"
[pricing]
mode = "volume"

[scheduling]
mode = "best_effort"
"#,
    );

    let config = SimulatorConfig::from_file(file.path()).unwrap();
    assert_eq!(config.pricing.mode, PricingMode::Volume);
    assert_eq!(config.scheduling.mode, ScheduleMode::BestEffort);
    assert_eq!(config.profit.fixed_cost, 2000.0);
}

#[test]
fn test_from_file_missing_path() {
    let err = SimulatorConfig::from_file("/definitely/not/here/simulator.toml").unwrap_err();
    assert_eq!(err.code(), "CONFIGURATION_ERROR");
    assert!(err.message().contains("Failed to read config file"));
}

#[test]
fn test_from_file_invalid_model_names_file() {
    let file = write_config("[seasonality]\nperiod = 0.0\n");
    let err = SimulatorConfig::from_file(file.path()).unwrap_err();
    assert_eq!(err.code(), "CONFIGURATION_ERROR");
    assert_eq!(err.context().parameter.as_deref(), Some("period"));
    let details = err.context().details.clone().unwrap();
    assert!(details.contains(&file.path().display().to_string()));
}

#[test]
fn test_load_uses_env_path_and_overrides() {
    let file = write_config("[server]\nport = 9100\n[chart]\npoints = 50\n");
    let path = file.path().display().to_string();

    let config = with_scoped_env(
        &[
            (CONFIG_ENV_VAR, Some(path.as_str())),
            ("HOST", Some("127.0.0.1")),
            ("PORT", None),
        ],
        SimulatorConfig::load,
    )
    .unwrap();

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9100);
    assert_eq!(config.chart.points, 50);
}

#[test]
fn test_port_env_overrides_file() {
    let file = write_config("[server]\nport = 9100\n");
    let path = file.path().display().to_string();

    let config = with_scoped_env(
        &[
            (CONFIG_ENV_VAR, Some(path.as_str())),
            ("HOST", None),
            ("PORT", Some("7000")),
        ],
        SimulatorConfig::load,
    )
    .unwrap();

    assert_eq!(config.server.port, 7000);
}

#[test]
fn test_bad_port_env_rejected() {
    let file = write_config("");
    let path = file.path().display().to_string();

    let err = with_scoped_env(
        &[
            (CONFIG_ENV_VAR, Some(path.as_str())),
            ("PORT", Some("eighty")),
        ],
        SimulatorConfig::load,
    )
    .unwrap_err();

    assert_eq!(err.code(), "CONFIGURATION_ERROR");
    assert_eq!(err.context().parameter.as_deref(), Some("PORT"));
}

#[test]
fn test_missing_env_file_is_error() {
    let err = with_scoped_env(
        &[(CONFIG_ENV_VAR, Some("/definitely/not/here.toml"))],
        SimulatorConfig::load,
    )
    .unwrap_err();
    assert_eq!(err.code(), "CONFIGURATION_ERROR");
}

#[test]
fn test_bundled_example_config_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/simulator.toml");
    let config = SimulatorConfig::from_file(path).unwrap();
    assert_eq!(config.pricing.tiers.len(), 3);
    assert_eq!(config.seasonality.harmonic.unwrap().period, 6.0);
    assert_eq!(config.advertising.growth_rate, 0.01);
}
