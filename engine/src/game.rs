use crate::config::EngineConfig;
use crate::ecs::{Components, Entities, Systems};
use crate::error::{EngineError, Result};
use crate::logging;
use crate::platform::Platform;
use crate::runtime::Runtime;

/// Top-level handle: a runtime bound to the platform that will drive it.
///
/// ```no_run
/// use tessera::prelude::*;
///
/// let mut game = Game::new(DesktopPlatform::new());
/// game.init(|_systems, entities, _components| {
///     entities.add(Renderable::new(Square::new(Color::BLUE), 50.0, -50.0).into());
/// })?;
/// game.run()?;
/// # Ok::<(), tessera::EngineError>(())
/// ```
pub struct Game {
    platform: Box<dyn Platform>,
    runtime: Runtime,
    initialized: bool,
}

impl Game {
    pub fn new(platform: impl Platform + 'static) -> Self {
        Self::with_config(platform, EngineConfig::default())
    }

    pub fn with_config(platform: impl Platform + 'static, config: EngineConfig) -> Self {
        Self {
            platform: Box::new(platform),
            runtime: Runtime::new(config),
            initialized: false,
        }
    }

    /// Runs `setup` once with the system, entity and component registries.
    /// Entities it adds have their components attached before this returns.
    pub fn init<F>(&mut self, setup: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Systems, &mut Entities, &mut Components),
    {
        if self.initialized {
            return Err(EngineError::AlreadyInitialized);
        }
        self.initialized = true;

        let (systems, entities, components) = self.runtime.registries();
        setup(systems, entities, components);
        self.runtime.flush();

        log::debug!(
            "initialized with {} systems, {} entities",
            self.runtime.systems().len(),
            self.runtime.entities().len()
        );
        Ok(self)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut Runtime {
        &mut self.runtime
    }

    pub fn platform_name(&self) -> &str {
        self.platform.name()
    }

    /// Hands control to the platform and blocks until its loop ends.
    pub fn run(mut self) -> Result<()> {
        if !self.initialized {
            return Err(EngineError::NotInitialized);
        }
        logging::init(&self.runtime.config().log);

        log::info!(
            "starting on {} platform: {} systems, {} entities, {} Hz",
            self.platform.name(),
            self.runtime.systems().len(),
            self.runtime.entities().len(),
            self.runtime.config().timing.tick_rate
        );

        let result = self.platform.run(&mut self.runtime);
        self.runtime.shutdown();
        result
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("platform", &self.platform.name())
            .field("initialized", &self.initialized)
            .field("entities", &self.runtime.entities().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessPlatform;

    #[test]
    fn run_before_init_is_rejected() {
        let game = Game::new(HeadlessPlatform::new().with_max_frames(1));
        assert!(matches!(game.run(), Err(EngineError::NotInitialized)));
    }

    #[test]
    fn second_init_does_not_call_setup() {
        let mut game = Game::new(HeadlessPlatform::new());
        let mut calls = 0;
        game.init(|_, _, _| calls += 1).unwrap();
        let again = game.init(|_, _, _| calls += 1);
        assert!(matches!(again, Err(EngineError::AlreadyInitialized)));
        assert_eq!(calls, 1);
        assert!(game.is_initialized());
        assert_eq!(game.platform_name(), "headless");
    }
}
