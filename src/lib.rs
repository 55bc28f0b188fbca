// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! pitchfit - fit pitches onto scales and chords without collapsing them.
//!
//! Quantizing each pitch to its nearest scale note on its own tends to send
//! several different inputs to the same note. [`PitchFitter`] looks at all
//! input pitch classes together and spreads them across the container's
//! members, then projects any pitch through the result in its own octave.
//!
//! ```
//! use pitchfit::{FitOptions, Note, PitchFitter, Scale, ScaleType};
//!
//! let c_major = Scale::new(Note::C, ScaleType::Major);
//! let fitter = PitchFitter::new([61, 63], &c_major, &FitOptions::default());
//!
//! assert_eq!(fitter.fit_pitch(61), 60);
//! assert_eq!(fitter.fit_pitch(63), 62);
//! assert_eq!(fitter.fit_name("C#5").unwrap(), 72);
//! ```

pub mod config;
pub mod fitter;
pub mod music;

pub use config::{Container, ContainerConfig, FitFile, PitchValue, ScaleConfig};
pub use fitter::{normalize, PitchFitter, ProposalLog};
pub use music::{
    parse_pitch, pitch_name, Chord, ChordQuality, FitOptions, Note, Pitch, PitchContainer,
    PitchError, Scale, ScaleType, TieBreak,
};
