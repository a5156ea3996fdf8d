use std::time::Duration;

use rocket_defense::config::{ConfigError, GameConfig};

#[test]
fn defaults_are_valid() {
    let cfg = GameConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.enemy_rows * cfg.enemy_cols, 18);
    assert_eq!(cfg.fire_cooldown(), Duration::from_millis(300));
    assert_eq!(cfg.enemy_fire_interval(), Duration::from_millis(1000));
}

#[test]
fn partial_json_keeps_other_defaults() {
    let cfg = GameConfig::from_json(r#"{ "field_width": 800, "seed": 7 }"#).unwrap();
    assert_eq!(cfg.field_width, 800.0);
    assert_eq!(cfg.seed, Some(7));
    assert_eq!(cfg.field_height, GameConfig::default().field_height);
    assert_eq!(cfg.enemy_cols, 6);
}

#[test]
fn empty_object_is_default() {
    assert_eq!(GameConfig::from_json("{}").unwrap(), GameConfig::default());
}

#[test]
fn malformed_json_is_parse_error() {
    let err = GameConfig::from_json("{ field_width: ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn non_positive_dimension_rejected() {
    let err = GameConfig::from_json(r#"{ "field_height": 0 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("field_height")));
}

#[test]
fn ship_wider_than_field_rejected() {
    let cfg = GameConfig { field_width: 20.0, ..GameConfig::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn zero_frame_rate_rejected() {
    let cfg = GameConfig { frames_per_second: 0, ..GameConfig::default() };
    assert!(cfg.validate().is_err());
}

#[test]
fn missing_file_is_io_error() {
    let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn load_from_file() {
    let path = std::env::temp_dir().join(format!(
        "rocket_defense_cfg_{}.json",
        std::process::id()
    ));
    std::fs::write(&path, r#"{ "enemy_rows": 4 }"#).unwrap();
    let cfg = GameConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(cfg.enemy_rows, 4);
}

#[test]
fn ship_speed_must_divide_travel_range() {
    // 570 / 7 is not whole: holding right would carry the ship to x=572
    let err = GameConfig::from_json(r#"{ "ship_speed": 7 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("ship_speed")));
}

#[test]
fn ship_speed_must_divide_start_offset() {
    // Travel 570 divides by 10, start offset 285 does not
    let cfg = GameConfig { ship_speed: 10.0, ..GameConfig::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn dividing_ship_speeds_accepted() {
    for speed in [1.0, 3.0, 5.0, 15.0] {
        let cfg = GameConfig { ship_speed: speed, ..GameConfig::default() };
        assert!(cfg.validate().is_ok(), "speed {speed}");
    }
    let still = GameConfig { ship_speed: 0.0, ..GameConfig::default() };
    assert!(still.validate().is_ok());
}

#[test]
fn frame_duration_from_rate() {
    let cfg = GameConfig { frames_per_second: 50, ..GameConfig::default() };
    assert_eq!(cfg.frame_duration(), Duration::from_millis(20));
}
