//! Platform adapters.
//!
//! A platform owns the main loop: it decides when frames happen, feeds
//! elapsed time to the [`Runtime`] and presents what it returns.

mod desktop;
mod headless;

pub use desktop::DesktopPlatform;
pub use headless::HeadlessPlatform;

use crate::error::Result;
use crate::runtime::Runtime;

pub trait Platform {
    fn name(&self) -> &str;

    /// Blocks driving `runtime` until the loop terminates.
    fn run(&mut self, runtime: &mut Runtime) -> Result<()>;
}
