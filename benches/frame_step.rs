use criterion::{criterion_group, criterion_main, Criterion, black_box};

use gorgon::scene::{ManagerConfig, Scene, SceneContext, SceneManager};

struct Spinner {
    angle: f32,
}

impl Scene<Vec<f32>> for Spinner {
    fn requires_key_input(&self) -> bool {
        false
    }

    fn update(&mut self, _ctx: &mut SceneContext, delta_ms: u32) {
        self.angle = (self.angle + delta_ms as f32 * 0.01) % std::f32::consts::TAU;
    }

    fn render(&mut self, _ctx: &mut SceneContext, target: &mut Vec<f32>) {
        target.clear();
        target.push(self.angle);
    }
}

fn manager_with(count: i32) -> SceneManager<Vec<f32>> {
    let mut manager = SceneManager::new(Vec::with_capacity(1), ManagerConfig::default());
    for id in 0..count {
        manager
            .register(id, Spinner { angle: 0.0 })
            .expect("ids are unique");
    }
    manager
}

fn bench_step(c: &mut Criterion) {
    let mut manager = manager_with(16);
    manager.switch_scene(0).expect("scene 0 exists");

    c.bench_function("step_active_scene", |b| {
        b.iter(|| manager.step(black_box(16)).expect("step"));
    });
}

fn bench_switch(c: &mut Criterion) {
    let mut manager = manager_with(16);

    c.bench_function("switch_round_robin_16", |b| {
        let mut next = 0;
        b.iter(|| {
            next = (next + 1) % 16;
            manager.switch_scene(black_box(next)).expect("switch");
        });
    });
}

criterion_group!(benches, bench_step, bench_switch);
criterion_main!(benches);
