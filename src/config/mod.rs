// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system for pitchfit.
//!
//! A fit file describes one fitting job: the container to fit against,
//! the pitches to optimize for, the container's fit options and the
//! pitches to project. Files are YAML unless they end in `.toml`.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::fitter::PitchFitter;
use crate::music::container::{FitOptions, Pitch, PitchContainer};
use crate::music::pitch::{parse_pitch, PitchError};
use crate::music::{Chord, Note, Scale, ScaleType};

/// Root configuration for a fitting job
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FitFile {
    /// Scale or chord to fit against
    #[serde(default)]
    pub container: ContainerConfig,
    /// Pitches the table is optimized for
    #[serde(default)]
    pub sources: Vec<PitchValue>,
    /// Options forwarded to the container's default fit
    #[serde(default)]
    pub options: FitOptions,
    /// Pitches to project through the fitted table
    #[serde(default)]
    pub queries: Vec<PitchValue>,
}

impl FitFile {
    /// Load a fit file, choosing the format by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml(&contents),
            _ => Self::from_yaml(&contents),
        }
    }

    /// Parse a fit file from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Parse a fit file from TOML string
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse TOML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save the fit file as YAML
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Source pitches as numbers
    pub fn source_pitches(&self) -> Result<Vec<Pitch>> {
        resolve_all(&self.sources).context("Invalid source pitch")
    }

    /// Query pitches as numbers
    pub fn query_pitches(&self) -> Result<Vec<Pitch>> {
        resolve_all(&self.queries).context("Invalid query pitch")
    }

    /// Build the container and a fitter optimized for this job
    pub fn build(&self) -> Result<(Container, PitchFitter)> {
        let container = self.container.build()?;
        let sources = self.source_pitches()?;
        let fitter = PitchFitter::new(sources, &container, &self.options);
        Ok((container, fitter))
    }
}

fn resolve_all(values: &[PitchValue]) -> Result<Vec<Pitch>, PitchError> {
    values.iter().map(PitchValue::resolve).collect()
}

/// A pitch given as a number or a name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PitchValue {
    /// Pitch number (C4 = 60)
    Number(Pitch),
    /// Pitch name ("C#4")
    Name(String),
}

impl PitchValue {
    /// Resolve to a pitch number
    pub fn resolve(&self) -> Result<Pitch, PitchError> {
        match self {
            PitchValue::Number(p) => Ok(*p),
            PitchValue::Name(name) => parse_pitch(name),
        }
    }
}

impl From<Pitch> for PitchValue {
    fn from(p: Pitch) -> Self {
        PitchValue::Number(p)
    }
}

impl From<&str> for PitchValue {
    fn from(name: &str) -> Self {
        PitchValue::Name(name.to_string())
    }
}

/// Which container a fit file uses: a scale or a chord, never both
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ContainerConfig {
    /// Scale by root and name, or root and intervals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<ScaleConfig>,
    /// Chord symbol (e.g., "Cmaj7")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chord: Option<String>,
}

impl ContainerConfig {
    /// Scale container
    pub fn scale(scale: ScaleConfig) -> Self {
        Self {
            scale: Some(scale),
            chord: None,
        }
    }

    /// Chord container
    pub fn chord(symbol: &str) -> Self {
        Self {
            scale: None,
            chord: Some(symbol.to_string()),
        }
    }

    /// Resolve into a concrete container
    pub fn build(&self) -> Result<Container> {
        match (&self.scale, &self.chord) {
            (Some(_), Some(_)) => Err(anyhow!("Container must be either a scale or a chord, not both")),
            (_, Some(symbol)) => Chord::parse(symbol)
                .map(Container::Chord)
                .ok_or_else(|| anyhow!("Unknown chord symbol: {:?}", symbol)),
            (Some(scale), None) => scale.build().map(Container::Scale),
            (None, None) => ScaleConfig::default().build().map(Container::Scale),
        }
    }
}

/// Scale section of a fit file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScaleConfig {
    /// Root note (e.g., "C", "F#")
    #[serde(default = "default_root")]
    pub root: String,
    /// Scale type (e.g., "major", "dorian")
    #[serde(default = "default_scale", rename = "type")]
    pub scale: String,
    /// Custom intervals; overrides `type` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intervals: Option<Vec<u8>>,
}

fn default_root() -> String {
    "C".to_string()
}
fn default_scale() -> String {
    "major".to_string()
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            scale: default_scale(),
            intervals: None,
        }
    }
}

impl ScaleConfig {
    /// Resolve into a scale
    pub fn build(&self) -> Result<Scale> {
        let root = Note::from_str(&self.root)
            .ok_or_else(|| anyhow!("Unknown root note: {:?}", self.root))?;

        if let Some(intervals) = &self.intervals {
            return Ok(Scale::custom(root, intervals.clone()));
        }

        let scale_type = ScaleType::from_str(&self.scale)
            .ok_or_else(|| anyhow!("Unknown scale type: {:?}", self.scale))?;
        Ok(Scale::new(root, scale_type))
    }
}

/// A container resolved from configuration
#[derive(Debug, Clone, PartialEq)]
pub enum Container {
    Scale(Scale),
    Chord(Chord),
}

impl PitchContainer for Container {
    type Options = FitOptions;

    fn contains(&self, pitch_class: Pitch) -> bool {
        match self {
            Container::Scale(s) => s.contains(pitch_class),
            Container::Chord(c) => c.contains(pitch_class),
        }
    }

    fn fit_pitch(&self, pitch: Pitch, options: &FitOptions) -> Pitch {
        match self {
            Container::Scale(s) => s.fit_pitch(pitch, options),
            Container::Chord(c) => c.fit_pitch(pitch, options),
        }
    }
}

impl std::fmt::Display for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Container::Scale(s) => write!(f, "{}", s),
            Container::Chord(c) => write!(f, "{}", c),
        }
    }
}
