//! Side Shooter entry point
//!
//! The native build runs a headless demo: a scripted pilot flies the ship for
//! `demo_ticks` frames while every frame is tessellated into a vertex batch.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use side_shooter::platform::InputSnapshot;
    use side_shooter::renderer::VertexBatch;
    use side_shooter::sim::GameEvent;
    use side_shooter::{Session, Settings};

    /// Weave vertically, hold fire, and pulse a charge shot every few seconds
    pub fn scripted_input(t: u64, game_over: bool) -> InputSnapshot {
        let phase = t % 240;
        InputSnapshot {
            up: phase < 60,
            down: (120..180).contains(&phase),
            right: t % 600 < 30,
            left: (300..330).contains(&(t % 600)),
            fire: phase % 120 < 90,
            charge: (180..240).contains(&phase),
            force_toggle: t % 900 == 450,
            weapon_toggle: t % 1200 == 0,
            restart: game_over,
            ..InputSnapshot::default()
        }
    }

    #[derive(Debug, Default)]
    struct Tally {
        runs: u32,
        kills: u32,
        bosses_spawned: u32,
        bosses_defeated: u32,
        pickups: u32,
        peak_vertices: usize,
    }

    impl Tally {
        fn record(&mut self, event: &GameEvent) {
            match event {
                GameEvent::EnemyDestroyed { score, .. } if *score > 0 => self.kills += 1,
                GameEvent::BossSpawned { .. } => self.bosses_spawned += 1,
                GameEvent::BossDefeated { .. } => self.bosses_defeated += 1,
                GameEvent::PowerUpCollected { .. } => self.pickups += 1,
                GameEvent::Restarted => self.runs += 1,
                _ => {}
            }
        }
    }

    pub fn run() {
        let settings = Settings::load("settings.json");
        let ticks = settings.demo_ticks;
        let mut session = Session::new(settings);
        let mut batch = VertexBatch::new();
        let mut tally = Tally {
            runs: 1,
            ..Tally::default()
        };

        for t in 0..ticks {
            let input = scripted_input(t, session.state.game_over);
            batch.clear();
            if !session.frame(&input, &mut batch) {
                break;
            }
            tally.peak_vertices = tally.peak_vertices.max(batch.len());
            for event in session.last_events() {
                tally.record(event);
            }

            if t % 600 == 0 {
                let hud = session.hud();
                log::info!(
                    "t={} {} score={} lives={} forces={} {}",
                    t,
                    hud.wave_label,
                    hud.score,
                    hud.lives,
                    hud.active_forces,
                    hud.weapon_status
                );
            }
        }

        let hud = session.hud();
        log::info!(
            "demo finished after {} run(s): score {}, {} kills, bosses {}/{}, {} pickups, peak {} vertices ({} bytes)",
            tally.runs,
            hud.score,
            tally.kills,
            tally.bosses_defeated,
            tally.bosses_spawned,
            tally.pickups,
            tally.peak_vertices,
            tally.peak_vertices * std::mem::size_of::<side_shooter::renderer::Vertex>()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Side Shooter (native, headless) starting...");
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is the library's start function
}
