use std::time::Duration;

use super::Platform;
use crate::error::Result;
use crate::render::RenderList;
use crate::runtime::Runtime;

type FrameHook = Box<dyn FnMut(u64, &RenderList)>;

/// Windowless platform with simulated time.
///
/// Each frame advances the runtime by a fixed `frame_time`. The loop ends when
/// the frame limit is reached or a system requests exit; with neither, it runs
/// forever like the desktop loop does.
pub struct HeadlessPlatform {
    frame_time: Duration,
    max_frames: Option<u64>,
    on_frame: Option<FrameHook>,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self {
            frame_time: Duration::from_secs_f64(1.0 / 60.0),
            max_frames: None,
            on_frame: None,
        }
    }

    pub fn with_frame_time(mut self, frame_time: Duration) -> Self {
        self.frame_time = frame_time;
        self
    }

    pub fn with_max_frames(mut self, max_frames: u64) -> Self {
        self.max_frames = Some(max_frames);
        self
    }

    /// Called after every frame with the frame number (starting at 1) and
    /// the render list it produced.
    pub fn on_frame(mut self, hook: impl FnMut(u64, &RenderList) + 'static) -> Self {
        self.on_frame = Some(Box::new(hook));
        self
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HeadlessPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessPlatform")
            .field("frame_time", &self.frame_time)
            .field("max_frames", &self.max_frames)
            .finish_non_exhaustive()
    }
}

impl Platform for HeadlessPlatform {
    fn name(&self) -> &str {
        "headless"
    }

    fn run(&mut self, runtime: &mut Runtime) -> Result<()> {
        let mut frames = 0u64;
        loop {
            if self.max_frames.is_some_and(|max| frames >= max) {
                log::info!("frame limit of {frames} reached");
                break;
            }

            let list = runtime.advance(self.frame_time);
            frames += 1;
            if let Some(hook) = self.on_frame.as_mut() {
                hook(frames, list);
            }

            if runtime.exit_requested() {
                log::info!("exit requested after {frames} frames");
                break;
            }
        }
        Ok(())
    }
}
