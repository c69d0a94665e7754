//! The main loop body, independent of any platform.
//!
//! Platforms own the cadence: they measure wall-clock time (or fake it) and
//! call [`Runtime::advance`] once per frame. The runtime turns elapsed time
//! into fixed-size updates and hands back what to draw.

use std::time::Duration;

use crate::config::EngineConfig;
use crate::ecs::{Components, Entities, SystemContext, Systems};
use crate::render::RenderList;

pub struct Runtime {
    config: EngineConfig,
    systems: Systems,
    entities: Entities,
    components: Components,
    render_list: RenderList,
    timestep: Duration,
    accumulator: Duration,
    tick: u64,
    frame: u64,
    exit_requested: bool,
}

impl Runtime {
    pub fn new(config: EngineConfig) -> Self {
        let timestep = config.fixed_timestep();
        Self {
            config,
            systems: Systems::new(),
            entities: Entities::new(),
            components: Components::new(),
            render_list: RenderList::new(),
            timestep,
            accumulator: Duration::ZERO,
            tick: 0,
            frame: 0,
            exit_requested: false,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn systems(&self) -> &Systems {
        &self.systems
    }

    pub fn entities(&self) -> &Entities {
        &self.entities
    }

    pub fn components(&self) -> &Components {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut Components {
        &mut self.components
    }

    /// The three registries at once, for setup code.
    pub fn registries(&mut self) -> (&mut Systems, &mut Entities, &mut Components) {
        (&mut self.systems, &mut self.entities, &mut self.components)
    }

    /// Attaches components of newly added entities and applies despawns.
    pub fn flush(&mut self) {
        self.entities.flush(&mut self.components);
    }

    pub fn render_list(&self) -> &RenderList {
        &self.render_list
    }

    /// Fixed updates run so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Frames produced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn timestep(&self) -> Duration {
        self.timestep
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Runs as many fixed updates as `elapsed` pays for, capped at
    /// `max_substeps`, then rebuilds the render list.
    pub fn advance(&mut self, elapsed: Duration) -> &RenderList {
        self.accumulator += elapsed;

        let max_substeps = self.config.timing.max_substeps.max(1);
        let mut steps = 0;
        while self.accumulator >= self.timestep && !self.exit_requested {
            if steps == max_substeps {
                log::debug!(
                    "frame {}: dropping {:?} of update backlog",
                    self.frame,
                    self.accumulator
                );
                self.accumulator = Duration::ZERO;
                break;
            }
            self.accumulator -= self.timestep;
            self.update();
            steps += 1;
        }

        self.flush();
        self.render_list.collect(&self.entities, &self.components);
        self.frame += 1;
        log::trace!(
            "frame {}: {} updates, {} draws",
            self.frame,
            steps,
            self.render_list.len()
        );
        &self.render_list
    }

    fn update(&mut self) {
        let dt = self.timestep.as_secs_f32();
        let mut ctx = SystemContext::new(
            &mut self.entities,
            &mut self.components,
            dt,
            self.tick,
            &mut self.exit_requested,
        );
        self.systems.run_all(&mut ctx);
        self.tick += 1;
        self.entities.flush(&mut self.components);
    }

    pub fn shutdown(&mut self) {
        log::info!(
            "shutting down after {} frames / {} ticks, {} entities alive",
            self.frame,
            self.tick,
            self.entities.len()
        );
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::render::{Renderable, Square};

    fn runtime(tick_rate: u32, max_substeps: u32) -> Runtime {
        let mut config = EngineConfig::default();
        config.timing.tick_rate = tick_rate;
        config.timing.max_substeps = max_substeps;
        Runtime::new(config)
    }

    #[test]
    fn accumulator_runs_whole_ticks_only() {
        let mut rt = runtime(10, 10);
        rt.advance(Duration::from_millis(250));
        assert_eq!(rt.tick(), 2);
        rt.advance(Duration::from_millis(50));
        assert_eq!(rt.tick(), 3);
        assert_eq!(rt.frame(), 2);
    }

    #[test]
    fn backlog_beyond_max_substeps_is_dropped() {
        let mut rt = runtime(10, 3);
        rt.advance(Duration::from_secs(2));
        assert_eq!(rt.tick(), 3);
        rt.advance(Duration::ZERO);
        assert_eq!(rt.tick(), 3);
    }

    #[test]
    fn systems_see_fixed_dt_and_can_move_renderables() {
        let mut rt = runtime(10, 5);
        let (systems, entities, _) = rt.registries();
        let id = entities.add(Renderable::new(Square::new(Color::BLUE), 0.0, 0.0).into());
        systems.add(|ctx: &mut SystemContext<'_>| {
            let dt = ctx.dt();
            for (_, r) in ctx.components.iter_mut::<Renderable>() {
                r.translate(glam::Vec2::new(10.0 * dt, 0.0));
            }
        });
        rt.flush();

        let list = rt.advance(Duration::from_millis(300));
        assert_eq!(list.len(), 1);
        approx::assert_relative_eq!(list.commands()[0].position.x, 3.0, epsilon = 1e-5);
        assert_eq!(list.commands()[0].entity, id);
    }

    #[test]
    fn exit_request_stops_remaining_ticks() {
        let mut rt = runtime(10, 10);
        rt.registries().0.add(|ctx: &mut SystemContext<'_>| {
            if ctx.tick() == 1 {
                ctx.request_exit();
            }
        });
        rt.advance(Duration::from_secs(1));
        assert!(rt.exit_requested());
        assert_eq!(rt.tick(), 2);
    }

    #[test]
    fn systems_spawn_and_despawn_between_ticks() {
        let mut rt = runtime(10, 10);
        rt.registries().0.add(|ctx: &mut SystemContext<'_>| {
            let oldest = ctx.entities.ids().first().copied();
            if let Some(first) = oldest {
                ctx.entities.remove(first);
            }
            ctx.entities
                .add(Renderable::new(Square::new(Color::RED), 0.0, 0.0).into());
        });

        rt.advance(Duration::from_millis(300));
        assert_eq!(rt.entities().len(), 1);
        assert_eq!(rt.components().len::<Renderable>(), 1);
        assert_eq!(rt.render_list().len(), 1);
    }
}
