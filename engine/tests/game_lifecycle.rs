use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use glam::Vec2;
use tessera::prelude::*;
use tessera::{EngineConfig, EngineError, RenderList};

struct Velocity(Vec2);
impl Component for Velocity {}

/// Moves every renderable that also has a velocity.
struct Motion;

impl System for Motion {
    fn name(&self) -> &str {
        "motion"
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>) {
        let dt = ctx.dt();
        let ids: Vec<_> = ctx.entities.iter().collect();
        for id in ids {
            let Some(step) = ctx.components.get::<Velocity>(id).map(|v| v.0 * dt) else {
                continue;
            };
            if let Some(r) = ctx.components.get_mut::<Renderable>(id) {
                r.translate(step);
            }
        }
    }
}

fn config(tick_rate: u32) -> EngineConfig {
    let mut config = EngineConfig::default();
    config.timing.tick_rate = tick_rate;
    config
}

fn recorder() -> (Rc<RefCell<Vec<RenderList>>>, impl FnMut(u64, &RenderList) + 'static) {
    let frames = Rc::new(RefCell::new(Vec::new()));
    let sink = frames.clone();
    (frames, move |_: u64, list: &RenderList| {
        sink.borrow_mut().push(list.clone())
    })
}

#[test]
fn init_runs_setup_once_before_run() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = calls.clone();
    let platform = HeadlessPlatform::new()
        .with_max_frames(2)
        .on_frame(move |frame, _| sink.borrow_mut().push(format!("frame {frame}")));

    let mut game = Game::new(platform);
    game.init(|_, _, _| calls.borrow_mut().push("init".to_string()))
        .unwrap();
    assert!(matches!(
        game.init(|_, _, _| calls.borrow_mut().push("again".to_string())),
        Err(EngineError::AlreadyInitialized)
    ));
    game.run().unwrap();

    assert_eq!(*calls.borrow(), vec!["init", "frame 1", "frame 2"]);
}

#[test]
fn systems_drive_renderables_across_frames() {
    let (frames, hook) = recorder();
    let platform = HeadlessPlatform::new()
        .with_frame_time(Duration::from_millis(100))
        .with_max_frames(5)
        .on_frame(hook);

    let mut game = Game::with_config(platform, config(10));
    game.init(|systems, entities, _| {
        systems.add(Motion);
        entities.add(
            Entity::new()
                .with(Renderable::new(Square::new(Color::BLUE), 0.0, 0.0))
                .with(Velocity(Vec2::new(10.0, -20.0))),
        );
        entities.add(Renderable::new(Triangle::new(Color::ORANGE), 30.0, 30.0).into());
    })
    .unwrap();
    assert_eq!(game.runtime().systems().names(), vec!["motion"]);
    game.run().unwrap();

    let frames = frames.borrow();
    assert_eq!(frames.len(), 5);
    let last = frames[4].commands();
    approx::assert_relative_eq!(last[0].position.x, 5.0, epsilon = 1e-4);
    approx::assert_relative_eq!(last[0].position.y, -10.0, epsilon = 1e-4);
    assert_eq!(last[1].position, Vec2::new(30.0, 30.0));
}

#[test]
fn exit_request_ends_an_unbounded_loop() {
    let mut game = Game::with_config(HeadlessPlatform::new(), config(60));
    game.init(|systems, entities, _| {
        entities.add(Renderable::new(Square::new(Color::RED), 0.0, 0.0).into());
        systems.add(|ctx: &mut SystemContext<'_>| {
            if ctx.tick() >= 29 {
                ctx.request_exit();
            }
        });
    })
    .unwrap();
    game.run().unwrap();
}

#[test]
fn despawned_entities_leave_the_render_list() {
    let (frames, hook) = recorder();
    let platform = HeadlessPlatform::new().with_max_frames(3).on_frame(hook);

    let mut game = Game::with_config(platform, config(60));
    game.init(|systems, entities, _| {
        let doomed = entities.add(Renderable::new(Square::new(Color::GREEN), 0.0, 0.0).into());
        entities.add(Renderable::new(Square::new(Color::RED), 10.0, 0.0).into());
        systems.add(move |ctx: &mut SystemContext<'_>| {
            if ctx.tick() == 0 {
                assert!(ctx.entities.remove(doomed));
            }
        });
    })
    .unwrap();
    game.run().unwrap();

    let frames = frames.borrow();
    assert_eq!(frames[0].len(), 1);
    assert_eq!(frames[2].commands()[0].color, Color::RED);
}

#[test]
fn color_override_and_visibility_reach_the_draw_list() {
    let mut game = Game::new(HeadlessPlatform::new().with_max_frames(1));
    let mut hidden = None;
    game.init(|_, entities, _| {
        entities.add(
            Renderable::new(Rectangle::new(Color::BLACK, 40.0, 10.0), 0.0, 0.0)
                .with_color(Color::MAGENTA)
                .into(),
        );
        hidden = Some(entities.add(Renderable::new(Square::new(Color::CYAN), 0.0, 0.0).into()));
    })
    .unwrap();

    let id = hidden.unwrap();
    game.runtime_mut()
        .components_mut()
        .get_mut::<Renderable>(id)
        .unwrap()
        .set_visible(false);

    let list = game.runtime_mut().advance(Duration::ZERO).clone();
    assert_eq!(list.len(), 1);
    assert_eq!(list.commands()[0].color, Color::MAGENTA);
}
