//! Opening the browser-based watch simulator.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{DevError, Result};

/// `file://` URL for a local page
pub fn simulator_url(page: &Path) -> Result<String> {
    let absolute = page.canonicalize().map_err(|e| {
        DevError::simulator(format!("simulator page not found at {}: {}", page.display(), e))
    })?;
    let path = absolute.to_string_lossy().replace('\\', "/");
    // verbatim prefix from canonicalize on Windows
    let path = path.trim_start_matches("//?/");
    if path.starts_with('/') {
        Ok(format!("file://{}", path))
    } else {
        Ok(format!("file:///{}", path))
    }
}

fn opener_command(url: &str) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    } else if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

/// Open the simulator page in the default browser.
///
/// Returns the URL that was opened. The opener is started and not waited on.
pub fn open_simulator(page: &Path) -> Result<String> {
    if !page.is_file() {
        return Err(DevError::simulator(format!(
            "simulator page not found at {}",
            page.display()
        )));
    }

    let url = simulator_url(page)?;
    debug!(%url, "opening simulator");
    opener_command(&url)
        .spawn()
        .map_err(|e| DevError::simulator(format!("cannot launch browser: {}", e)))?;
    Ok(url)
}
