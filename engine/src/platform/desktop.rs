use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use super::Platform;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::render::graphics::Graphics;
use crate::runtime::Runtime;

enum State {
    Init,
    Ready(Graphics),
    Failed,
}

/// Windowed platform backed by winit and wgpu.
#[derive(Debug, Default)]
pub struct DesktopPlatform;

impl DesktopPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Platform for DesktopPlatform {
    fn name(&self) -> &str {
        "desktop"
    }

    fn run(&mut self, runtime: &mut Runtime) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(runtime);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct App<'a> {
    runtime: &'a mut Runtime,
    state: State,
    last_frame: Instant,
    error: Option<EngineError>,
}

impl<'a> App<'a> {
    fn new(runtime: &'a mut Runtime) -> Self {
        Self {
            runtime,
            state: State::Init,
            last_frame: Instant::now(),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: EngineError) {
        log::error!("{err}");
        self.error = Some(err);
        self.state = State::Failed;
        event_loop.exit();
    }

    fn create_graphics(&self, event_loop: &ActiveEventLoop) -> Result<Graphics> {
        let config: &EngineConfig = self.runtime.config();
        let attrs = Window::default_attributes()
            .with_title(config.window.title.clone())
            .with_inner_size(LogicalSize::new(config.window.width, config.window.height))
            .with_resizable(config.window.resizable);
        let window = Arc::new(event_loop.create_window(attrs)?);

        pollster::block_on(Graphics::new(
            window,
            config.render.clear_color,
            config.window.vsync,
        ))
    }

    fn draw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let elapsed = now - self.last_frame;
        self.last_frame = now;

        let State::Ready(gfx) = &mut self.state else {
            return;
        };
        let list = self.runtime.advance(elapsed);
        if let Err(err) = gfx.draw(list) {
            self.fail(event_loop, err);
            return;
        }

        if self.runtime.exit_requested() {
            log::info!("exit requested by a system");
            event_loop.exit();
        } else {
            gfx.request_redraw();
        }
    }

    fn resized(&mut self, size: PhysicalSize<u32>) {
        if let State::Ready(gfx) = &mut self.state {
            gfx.resize(size);
        }
    }
}

impl ApplicationHandler for App<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !matches!(self.state, State::Init) {
            return;
        }
        match self.create_graphics(event_loop) {
            Ok(gfx) => {
                log::info!("window ready at {:?}", gfx.viewport());
                gfx.request_redraw();
                self.last_frame = Instant::now();
                self.state = State::Ready(gfx);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::Resized(size) => self.resized(size),
            WindowEvent::RedrawRequested => self.draw(event_loop),
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                event_loop.exit();
            }
            _ => {}
        }
    }
}
