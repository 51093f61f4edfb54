use halloween_run::compute::update;
use halloween_run::config::{GameConfig, FRAME_MS};
use halloween_run::entities::*;
use halloween_run::input::InputLatch;
use halloween_run::spawner::spawn_entities;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn fresh_run(cfg: &GameConfig) -> World {
    let mut w = World::new(cfg);
    w.start_run(cfg);
    w
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn fresh_run_primes_timers() {
    let cfg = GameConfig::default();
    let w = fresh_run(&cfg);
    assert_eq!(w.spawn_timer, 0.0);
    assert_eq!(w.candy_timer, 120.0);
}

#[test]
fn first_tick_spawns_exactly_one_enemy() {
    let cfg = GameConfig::default();
    for seed in 0..32 {
        let mut w = fresh_run(&cfg);
        let mut rng = StdRng::seed_from_u64(seed);
        update(&mut w, &InputLatch::default(), &cfg, FRAME_MS, &mut rng);

        assert_eq!(w.entities.len(), 1, "seed {seed}");
        let e = &w.entities[0];
        assert!(e.is_enemy());
        assert_eq!(e.x, 940.0);
        match e.kind {
            EntityKind::GroundEnemy { .. } => {
                assert!((900.0..1600.0).contains(&w.spawn_timer));
            }
            EntityKind::FlyingEnemy => {
                assert!((750.0..1450.0).contains(&w.spawn_timer));
            }
            EntityKind::Pickup => unreachable!(),
        }
    }
}

#[test]
fn both_enemy_kinds_show_up() {
    let cfg = GameConfig::default();
    let mut rng = seeded_rng();
    let (mut ground, mut flying) = (0, 0);
    for _ in 0..400 {
        let mut w = fresh_run(&cfg);
        spawn_entities(&mut w, &cfg, 1.0, &mut rng);
        match w.entities[0].kind {
            EntityKind::GroundEnemy { .. } => ground += 1,
            EntityKind::FlyingEnemy => flying += 1,
            EntityKind::Pickup => unreachable!(),
        }
    }
    // 55 / 45 split.
    assert!(ground > 150, "ground {ground}, flying {flying}");
    assert!(flying > 100, "ground {ground}, flying {flying}");
}

#[test]
fn pickup_arrives_once_its_timer_runs_out() {
    let cfg = GameConfig::default();
    let mut w = fresh_run(&cfg);
    w.spawn_timer = 1.0e9;
    let mut rng = seeded_rng();

    spawn_entities(&mut w, &cfg, 100.0, &mut rng);
    assert!(w.entities.is_empty());
    assert_eq!(w.candy_timer, 20.0);

    spawn_entities(&mut w, &cfg, 20.0, &mut rng);
    assert_eq!(w.entities.len(), 1);
    let candy = &w.entities[0];
    assert_eq!(candy.kind, EntityKind::Pickup);
    assert_eq!(candy.x, 940.0);
    assert_eq!(candy.y, 380.0);
    assert!((4000.0..6000.0).contains(&w.candy_timer));
}

#[test]
fn timers_count_raw_milliseconds() {
    let cfg = GameConfig::default();
    let mut w = fresh_run(&cfg);
    w.spawn_timer = 1000.0;
    w.candy_timer = 5000.0;
    spawn_entities(&mut w, &cfg, 33.0, &mut seeded_rng());
    assert_eq!(w.spawn_timer, 967.0);
    assert_eq!(w.candy_timer, 4967.0);
    assert!(w.entities.is_empty());
}

#[test]
fn overdue_timer_resets_instead_of_accumulating() {
    let cfg = GameConfig::default();
    let mut w = fresh_run(&cfg);
    w.candy_timer = 1.0e9;
    w.spawn_timer = -5000.0;
    spawn_entities(&mut w, &cfg, 16.0, &mut seeded_rng());
    assert_eq!(w.entities.len(), 1);
    assert!(w.spawn_timer >= 750.0);
}

#[test]
fn ground_only_config_spawns_skeletons_on_the_ground() {
    let mut cfg = GameConfig::default();
    cfg.spawner.ground_enemy_chance = 1.0;
    let mut w = fresh_run(&cfg);
    w.candy_timer = 1.0e9;
    spawn_entities(&mut w, &cfg, 1.0, &mut seeded_rng());
    let e = &w.entities[0];
    assert_eq!(e.kind, EntityKind::GroundEnemy { hitbox_y_offset: 6.0 });
    assert_eq!(e.y, 396.0);
    assert!((900.0..1600.0).contains(&w.spawn_timer));
}

#[test]
fn flying_only_config_spawns_bats_at_their_base_height() {
    let mut cfg = GameConfig::default();
    cfg.spawner.ground_enemy_chance = 0.0;
    let mut w = fresh_run(&cfg);
    w.candy_timer = 1.0e9;
    spawn_entities(&mut w, &cfg, 1.0, &mut seeded_rng());
    let e = &w.entities[0];
    assert_eq!(e.kind, EntityKind::FlyingEnemy);
    assert_eq!(e.y, 240.0 + (940.0_f64 * 0.02).sin() * 40.0);
    assert!((750.0..1450.0).contains(&w.spawn_timer));
}
