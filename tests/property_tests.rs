use glam::Vec2;
use proptest::prelude::*;
use stalky::{NoOpStepObserver, ParticleTree, SpringIntegrator, TickConfig};

fn chain(segments: usize, max_stretch: f32) -> ParticleTree {
    let mut tree = ParticleTree::new(Vec2::ZERO, 2.0);
    tree.root_mut().fixed = true;
    let mut parent = ParticleTree::ROOT;
    for _ in 0..segments {
        let child = tree.create_child(parent, Vec2::new(0.0, -1.0), 1.0);
        let p = tree.particle_mut(child);
        p.spring_k = 0.3;
        p.spring_damping = 2.0;
        p.max_stretch = max_stretch;
        parent = child;
    }
    tree
}

proptest! {
    #[test]
    fn stretch_cap_holds_under_arbitrary_forcing(
        segments in 2usize..6,
        forces in prop::collection::vec((-50.0f32..50.0, -50.0f32..50.0), 1..80),
    ) {
        let max_stretch = 1.4f32;
        let mut tree = chain(segments, max_stretch);
        let integrator = SpringIntegrator::new(TickConfig::new());

        for (fx, fy) in forces {
            tree.cascade_force(ParticleTree::ROOT, Vec2::new(fx, fy), 0.8);
            integrator.step(&mut tree, 1.0 / 60.0, &mut NoOpStepObserver);

            for (id, p) in tree.iter() {
                prop_assert!(p.pos.is_finite());
                if let Some(parent) = tree.parent(id) {
                    let dist = p.pos.distance(tree.particle(parent).pos);
                    prop_assert!(
                        dist <= max_stretch + 1e-4,
                        "distance {} exceeds cap {} at particle {}",
                        dist, max_stretch, id.index()
                    );
                }
            }
        }
    }

    #[test]
    fn rest_lengths_survive_arbitrary_motion(
        forces in prop::collection::vec((-20.0f32..20.0, -20.0f32..20.0), 1..40),
    ) {
        let mut tree = chain(4, 2.0);
        let before: Vec<f32> = tree.iter().map(|(_, p)| p.rest_length()).collect();
        let integrator = SpringIntegrator::new(TickConfig::new());

        for (fx, fy) in forces {
            tree.cascade_force(ParticleTree::ROOT, Vec2::new(fx, fy), 0.5);
            integrator.step(&mut tree, 1.0 / 60.0, &mut NoOpStepObserver);
        }

        let after: Vec<f32> = tree.iter().map(|(_, p)| p.rest_length()).collect();
        prop_assert_eq!(before, after);
    }
}
