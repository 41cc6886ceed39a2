//! Browser shutdown and profile directory removal

use chromiumoxide::Browser;
use log::{debug, warn};
use std::path::Path;

/// Result of cleanup operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupResult {
    /// All cleanup operations succeeded
    Success,
    /// Some cleanup operations failed, with error details
    PartialFailure(Vec<String>),
}

/// Close the browser, wait for the process to exit, then remove its profile.
///
/// Every step runs even when an earlier one fails.
pub async fn cleanup_browser_and_data(browser: &mut Browser, profile_dir: &Path) -> CleanupResult {
    let mut errors = Vec::new();

    debug!(target: "leadscrape::cleanup", "Closing browser");
    if let Err(e) = browser.close().await {
        warn!(target: "leadscrape::cleanup", "Failed to close browser: {e}");
        errors.push(format!("Browser close failed: {e}"));
    }

    // Chrome keeps files in the profile locked until the process is gone
    if let Err(e) = browser.wait().await {
        warn!(target: "leadscrape::cleanup", "Failed to wait for browser exit: {e}");
        errors.push(format!("Browser wait failed: {e}"));
    }

    if let Err(e) = std::fs::remove_dir_all(profile_dir) {
        warn!(target: "leadscrape::cleanup", "Failed to remove profile {}: {e}", profile_dir.display());
        errors.push(format!("Directory cleanup failed: {e}"));
    } else {
        debug!(target: "leadscrape::cleanup", "Removed profile {}", profile_dir.display());
    }

    if errors.is_empty() {
        CleanupResult::Success
    } else {
        CleanupResult::PartialFailure(errors)
    }
}
