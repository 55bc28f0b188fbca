// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory utilities for pitchfit.
//!
//! This module provides the pitch container contract, the scale and chord
//! containers built on it, and pitch name parsing.

pub mod chord;
pub mod container;
pub mod pitch;
pub mod scale;

pub use chord::{Chord, ChordQuality};
pub use container::{circular_distance, FitOptions, Pitch, PitchContainer, TieBreak};
pub use pitch::{parse_pitch, pitch_name, PitchError};
pub use scale::{Note, Scale, ScaleType};
