//! Browser automation: the driver traits and their chromiumoxide implementation

pub mod chromium;
pub mod cleanup;
pub mod driver;
pub mod scripts;
pub mod setup;

pub use chromium::{ChromiumBrowser, ChromiumLauncher, ChromiumPage};
pub use cleanup::{CleanupResult, cleanup_browser_and_data};
pub use driver::{BrowserDriver, BrowserLauncher, PageHandle};
pub use setup::{download_managed_browser, find_browser_executable, launch_browser};
