//! Systems and the per-tick context they run with.

use super::{Components, Entities};

/// Everything a system may touch during one fixed update.
pub struct SystemContext<'a> {
    pub entities: &'a mut Entities,
    pub components: &'a mut Components,
    dt: f32,
    tick: u64,
    exit: &'a mut bool,
}

impl<'a> SystemContext<'a> {
    pub(crate) fn new(
        entities: &'a mut Entities,
        components: &'a mut Components,
        dt: f32,
        tick: u64,
        exit: &'a mut bool,
    ) -> Self {
        Self {
            entities,
            components,
            dt,
            tick,
            exit,
        }
    }

    /// Fixed timestep in seconds.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Number of fixed updates that ran before this one.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Asks the platform to leave the main loop after the current frame.
    pub fn request_exit(&mut self) {
        *self.exit = true;
    }

    pub fn exit_requested(&self) -> bool {
        *self.exit
    }
}

pub trait System {
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>);
}

impl<F> System for F
where
    F: FnMut(&mut SystemContext<'_>),
{
    fn update(&mut self, ctx: &mut SystemContext<'_>) {
        self(ctx)
    }
}

/// Ordered list of systems. They run in registration order every tick.
#[derive(Default)]
pub struct Systems {
    systems: Vec<Box<dyn System>>,
}

impl Systems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<S: System + 'static>(&mut self, system: S) -> &mut Self {
        log::debug!("registered system {}", system.name());
        self.systems.push(Box::new(system));
        self
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.name()).collect()
    }

    pub(crate) fn run_all(&mut self, ctx: &mut SystemContext<'_>) {
        for system in &mut self.systems {
            system.update(ctx);
        }
    }
}

impl std::fmt::Debug for Systems {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
