use std::sync::Arc;

use garden_guardians::consts::SIM_DT;
use garden_guardians::sim::{AudioCue, PlayerIntent, WeaponKind, World, count_cue};
use garden_guardians::Tuning;
use glam::Vec2;
use proptest::prelude::*;

fn weapon() -> impl Strategy<Value = WeaponKind> {
    prop_oneof![
        Just(WeaponKind::SeedBlaster),
        Just(WeaponKind::ThornFork),
        Just(WeaponKind::SolarBeam),
    ]
}

fn intent() -> impl Strategy<Value = PlayerIntent> {
    (-1.5f32..1.5, -1.5f32..1.5, 0f32..960.0, 0f32..540.0, any::<bool>()).prop_map(
        |(mx, my, ax, ay, fire)| PlayerIntent {
            move_vector: Vec2::new(mx, my),
            aim_point: Vec2::new(ax, ay),
            fire,
            ..Default::default()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn health_never_increases(
        seed in any::<u64>(),
        kind in weapon(),
        script in prop::collection::vec((intent(), 1u32..60), 1..12),
    ) {
        let mut world = World::new(Arc::new(Tuning::default()), kind, seed);
        let mut health = world.player.health;
        let mut kills = 0;
        for (intent, ticks) in &script {
            for _ in 0..*ticks {
                let events = world.advance(intent, SIM_DT);
                kills += count_cue(&events, AudioCue::EnemyKilled);
                prop_assert!(world.player.health <= health);
                prop_assert!(world.player.health >= 0);
                prop_assert!(world.enemies.iter().all(|e| !e.is_dead()));
                health = world.player.health;
            }
        }
        prop_assert_eq!(kills as u32, world.stats.enemies_killed);
    }

    #[test]
    fn zero_dt_leaves_world_unchanged(
        seed in any::<u64>(),
        warmup in 0u32..180,
        intent in intent(),
        dt in prop_oneof![Just(0.0f32), -1.0f32..0.0, Just(f32::NAN), Just(f32::INFINITY)],
    ) {
        let mut world = World::new(Arc::new(Tuning::default()), WeaponKind::ThornFork, seed);
        for _ in 0..warmup {
            world.advance(&intent, SIM_DT);
        }
        let before = serde_json::to_string(&world).expect("serialize world");
        let events = world.advance(&intent, dt);
        prop_assert!(events.is_empty());
        prop_assert_eq!(serde_json::to_string(&world).expect("serialize world"), before);
    }

    #[test]
    fn movement_is_always_sane(x in any::<f32>(), y in any::<f32>()) {
        let intent = PlayerIntent {
            move_vector: Vec2::new(x, y),
            ..Default::default()
        };
        let m = intent.movement();
        prop_assert!(m.is_finite());
        prop_assert!(m.length() <= 1.0 + 1e-5);
    }

    #[test]
    fn malformed_intent_never_corrupts_world(
        x in any::<f32>(),
        y in any::<f32>(),
        ax in any::<f32>(),
        ay in any::<f32>(),
    ) {
        let mut world = World::new(Arc::new(Tuning::default()), WeaponKind::SeedBlaster, 3);
        let intent = PlayerIntent {
            move_vector: Vec2::new(x, y),
            aim_point: Vec2::new(ax, ay),
            fire: true,
            ..Default::default()
        };
        for _ in 0..30 {
            world.advance(&intent, SIM_DT);
        }
        prop_assert!(world.player.pos.is_finite());
        prop_assert!(world.player.aim.is_finite());
        prop_assert!((world.player.aim.length() - 1.0).abs() < 1e-3);
        prop_assert!(world.bounds().contains(world.player.pos));
        prop_assert!(world.projectiles.iter().all(|p| p.pos.is_finite() && p.vel.is_finite()));
    }
}
