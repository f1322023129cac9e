//! Benchmarks for stalky chain simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use glam::Vec2;
use stalky::{
    apply_sway, build_frond_fan, build_stalk, FrondParams, NoOpStepObserver, SolidMap,
    SpringIntegrator, StalkParams, TickConfig, TileCollisionResolver,
};

fn bench_stalk_field(c: &mut Criterion) {
    c.bench_function("stalk_field_25_entities_60_ticks", |b| {
        b.iter(|| {
            let mut stalks: Vec<_> = (0..25)
                .map(|i| {
                    let params = StalkParams {
                        blade_height: 0.75 + (i as f32 * 0.02),
                        lean_left: i % 2 == 0,
                        ..StalkParams::default()
                    };
                    build_stalk(Vec2::new(i as f32, 6.0), &params).unwrap()
                })
                .collect();

            let integrator = SpringIntegrator::new(TickConfig::new());
            let dt = 1.0 / 60.0;
            for tick in 0..60 {
                let sway = Vec2::new((tick as f32 * 0.1).sin() * 5.0, 2.0);
                for tree in stalks.iter_mut() {
                    apply_sway(tree, sway, 0.1);
                    integrator.step(tree, dt, &mut NoOpStepObserver);
                }
            }
            stalks.last().map(|t| t.positions())
        });
    });
}

fn bench_collision_resolution(c: &mut Criterion) {
    c.bench_function("frond_fan_collision_60_ticks", |b| {
        b.iter(|| {
            let mut fan = build_frond_fan(Vec2::new(4.5, 6.4), &FrondParams::default()).unwrap();

            let mut map = SolidMap::new(16, 8);
            for tx in 0..16 {
                map.set_solid(tx, 7, true);
            }
            map.set_solid(3, 6, true);
            map.set_solid(6, 6, true);

            let integrator = SpringIntegrator::new(TickConfig::new());
            let resolver = TileCollisionResolver::default();
            let dt = 1.0 / 60.0;
            for _ in 0..60 {
                fan.tree.add_force(stalky::ParticleTree::ROOT, Vec2::new(0.5, 3.0));
                integrator.step(&mut fan.tree, dt, &mut NoOpStepObserver);
                resolver.resolve(&mut fan.tree, &map);
            }
            fan.tree.root_position()
        });
    });
}

criterion_group!(benches, bench_stalk_field, bench_collision_resolution);
criterion_main!(benches);
