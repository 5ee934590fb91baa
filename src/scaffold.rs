//! Watch-face example sources: listing and scaffolding.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{DevError, Result};

const WATCHFACE_TEMPLATE: &str = r#"#include <Arduino.h>
#include <GxEPD2_BW.h>
#include <Adafruit_GFX.h>
#include <Fonts/FreeMonoBold9pt7b.h>

// Watchy e-paper display
GxEPD2_BW<GxEPD2_154_D67, GxEPD2_154_D67::HEIGHT> display(GxEPD2_154_D67(/*CS=*/ 5, /*DC=*/ 10, /*RST=*/ 9, /*BUSY=*/ 19));

void drawWatchFace() {
    display.setFullWindow();
    display.fillScreen(GxEPD_WHITE);
    display.setFont(&FreeMonoBold9pt7b);
    display.setTextColor(GxEPD_BLACK);

    // Draw your watch face here
    display.setCursor(10, 30);
    display.setTextSize(2);
    display.println("{name}");
}

void setup() {
    Serial.begin(115200);

    display.init(115200);
    display.setRotation(1);

    drawWatchFace();

    // Wake on button press, then sleep
    esp_sleep_enable_ext0_wakeup(GPIO_NUM_26, 0);
    esp_deep_sleep_start();
}

void loop() {
    // Never reached: setup() ends in deep sleep
}
"#;

/// Source of a new watch face that draws `name` on screen
pub fn render_watchface(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
    WATCHFACE_TEMPLATE.replace("{name}", &escaped)
}

/// File name used for a scaffolded watch face
pub fn watchface_file_name(name: &str) -> String {
    format!("{}_watchface.cpp", name)
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(DevError::scaffold("watch-face name cannot be empty"));
    }
    if name.contains(|c: char| c == '/' || c == '\\') || name == "." || name == ".." {
        return Err(DevError::scaffold(format!(
            "watch-face name '{}' must not contain path separators",
            name
        )));
    }
    Ok(())
}

/// Write `<examples_dir>/<name>_watchface.cpp`, creating the directory if
/// needed. An existing file is never overwritten.
pub fn create_watchface(examples_dir: &Path, name: &str) -> Result<PathBuf> {
    validate_name(name)?;

    let path = examples_dir.join(watchface_file_name(name));
    if path.exists() {
        return Err(DevError::scaffold(format!(
            "{} already exists",
            path.display()
        )));
    }

    fs::create_dir_all(examples_dir)?;
    fs::write(&path, render_watchface(name))?;
    info!(path = %path.display(), "created watch face");
    Ok(path)
}

/// Stems of the `*.cpp` files in `examples_dir`, sorted. A missing directory
/// has no examples.
pub fn list_examples(examples_dir: &Path) -> Result<Vec<String>> {
    if !examples_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in fs::read_dir(examples_dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "cpp") {
            if let Some(stem) = path.file_stem() {
                names.push(stem.to_string_lossy().into_owned());
            }
        }
    }
    names.sort();
    Ok(names)
}
