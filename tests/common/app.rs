//! Scratch workspace for tests that go through files.

use std::path::PathBuf;
use tempfile::TempDir;

use glitch_dither::PixelBuffer;
use glitches::image_io::{read_png, write_png};
use glitches::models::AppConfig;

/// Temporary directory holding test inputs and outputs.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Path of `name` inside the workspace
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `buffer` as `name` and return its path
    pub fn write_image(&self, name: &str, buffer: &PixelBuffer) -> PathBuf {
        let path = self.path(name);
        write_png(&path, buffer).expect("Failed to write PNG");
        path
    }

    /// Read the PNG `name` back
    pub fn read_image(&self, name: &str) -> PixelBuffer {
        read_png(&self.path(name)).expect("Failed to read PNG")
    }

    /// Write `yaml` as a config file and load it
    pub fn load_config(&self, yaml: &str) -> AppConfig {
        let path = self.path("glitches.yaml");
        std::fs::write(&path, yaml).expect("Failed to write config");
        AppConfig::load(Some(&path))
    }
}
