use halloween_run::config::*;
use halloween_run::ConfigError;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn defaults_match_reference_constants() {
    let cfg = GameConfig::default();
    assert_eq!(cfg.world.width, 900.0);
    assert_eq!(cfg.world.ground_y, 420.0);
    assert_eq!(cfg.physics.gravity, 0.9);
    assert_eq!(cfg.physics.jump_velocity, -16.5);
    assert_eq!(cfg.physics.move_speed, 6.5);
    assert_eq!(cfg.physics.frame_ms, 16.6667);
    assert_eq!(cfg.rules.starting_lives, 3);
    assert_eq!(cfg.rules.invuln_frames, 72.0);
    assert_eq!(cfg.spawner.ground_enemy_delay, Band::new(900.0, 1600.0));
    assert_eq!(cfg.spawner.initial_pickup_timer, 120.0);
    assert!(cfg.validate().is_ok());
}

#[test]
fn empty_toml_is_default() {
    assert_eq!(GameConfig::from_toml("").unwrap(), GameConfig::default());
}

#[test]
fn partial_toml_overrides_only_named_keys() {
    let cfg = GameConfig::from_toml(
        r#"
        [physics]
        gravity = 0.5

        [rules]
        starting_lives = 5

        [spawner]
        pickup_delay = { min = 1000.0, max = 2000.0 }
        "#,
    )
    .unwrap();
    assert_eq!(cfg.physics.gravity, 0.5);
    assert_eq!(cfg.physics.jump_velocity, JUMP_VELOCITY);
    assert_eq!(cfg.rules.starting_lives, 5);
    assert_eq!(cfg.spawner.pickup_delay, Band::new(1000.0, 2000.0));
    assert_eq!(cfg.world, WorldConfig::default());
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = GameConfig::from_toml("[physics\ngravity = ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn wrong_type_is_a_parse_error() {
    let err = GameConfig::from_toml("[rules]\nstarting_lives = \"three\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn ground_below_world_is_rejected() {
    let err = GameConfig::from_toml("[world]\nground_y = 600.0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { name: "world.ground_y", .. }));
}

#[test]
fn inverted_band_is_rejected() {
    let err = GameConfig::from_toml("[spawner]\nflying_enemy_delay = { min = 500.0, max = 100.0 }")
        .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { name: "spawner.flying_enemy_delay", .. }));
}

#[test]
fn bad_probability_and_zero_lives_are_rejected() {
    let mut cfg = GameConfig::default();
    cfg.spawner.ground_enemy_chance = 1.5;
    assert!(cfg.validate().is_err());

    let mut cfg = GameConfig::default();
    cfg.rules.starting_lives = 0;
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::Invalid { name: "rules.starting_lives", .. })
    ));

    let mut cfg = GameConfig::default();
    cfg.physics.frame_ms = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = GameConfig::default();
    cfg.physics.gravity = f64::NAN;
    assert!(cfg.validate().is_err());
}

#[test]
fn band_sampling_stays_in_range() {
    let band = Band::new(750.0, 1450.0);
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..1000 {
        let d = band.sample(&mut rng);
        assert!((750.0..1450.0).contains(&d), "{d}");
    }
}

#[test]
fn zero_width_band_yields_its_bound() {
    let band = Band::new(800.0, 800.0);
    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(band.sample(&mut rng), 800.0);
    assert!(GameConfig::from_toml("[spawner]\npickup_delay = { min = 800.0, max = 800.0 }").is_ok());
}

#[test]
fn missing_file_loads_defaults() {
    let path = std::env::temp_dir().join("halloween_run_no_such_config.toml");
    let _ = std::fs::remove_file(&path);
    assert_eq!(GameConfig::load(&path).unwrap(), GameConfig::default());
}

#[test]
fn file_on_disk_is_loaded() {
    let path = std::env::temp_dir().join(format!("halloween_run_cfg_{}.toml", std::process::id()));
    std::fs::write(&path, "[runtime]\ntarget_fps = 30\n").unwrap();
    let cfg = GameConfig::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(cfg.runtime.target_fps, 30);
    assert_eq!(cfg.physics, PhysicsConfig::default());
}

#[test]
fn error_messages_name_the_offending_key() {
    let err = GameConfig::from_toml("[world]\nwidth = -1.0").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("world.width"), "{msg}");
}
