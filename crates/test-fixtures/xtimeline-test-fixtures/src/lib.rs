//! Shared JSON fixtures, addressed by name through `fixtures/manifest.json`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(rename = "transform-tracks")]
    transform_tracks: HashMap<String, String>,
    #[serde(default)]
    configs: HashMap<String, String>,
}

#[derive(Copy, Clone)]
enum Section {
    TransformTracks,
    Configs,
}

impl Section {
    fn entries(self) -> &'static HashMap<String, String> {
        match self {
            Section::TransformTracks => &MANIFEST.transform_tracks,
            Section::Configs => &MANIFEST.configs,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Section::TransformTracks => "transform track",
            Section::Configs => "config",
        }
    }

    /// Absolute path of fixture `name` in this section.
    fn path(self, name: &str) -> Result<PathBuf> {
        let rel = self
            .entries()
            .get(name)
            .ok_or_else(|| anyhow!("unknown {} fixture '{name}'", self.label()))?;
        Ok(Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(rel))
    }

    fn read(self, name: &str) -> Result<String> {
        let path = self.path(name)?;
        fs::read_to_string(&path)
            .with_context(|| format!("failed to read fixture at {}", path.display()))
    }

    fn load<T: DeserializeOwned>(self, name: &str) -> Result<T> {
        let text = self.read(name)?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {} fixture '{name}'", self.label()))
    }
}

pub mod transform_tracks {
    use super::*;

    pub fn keys() -> Vec<String> {
        Section::TransformTracks.entries().keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        Section::TransformTracks.read(name)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        Section::TransformTracks.load(name)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Section::TransformTracks.path(name)
    }
}

pub mod configs {
    use super::*;

    pub fn json(name: &str) -> Result<String> {
        Section::Configs.read(name)
    }
}
