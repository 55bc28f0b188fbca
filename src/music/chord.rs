// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chords used as pitch containers.
//!
//! A chord keeps its tones in chord-tone order (root, third, fifth,
//! seventh) so the root tie-break can favour the more stable tone.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::container::{nearest_member, FitOptions, Pitch, PitchContainer};
use super::scale::{Note, Semitones};

/// Chord qualities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    Dominant7,
    Major7,
    Minor7,
    HalfDiminished7,
    Diminished7,
}

impl ChordQuality {
    /// Intervals from the root, in chord-tone order
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Diminished => &[0, 3, 6],
            ChordQuality::Augmented => &[0, 4, 8],
            ChordQuality::Sus2 => &[0, 2, 7],
            ChordQuality::Sus4 => &[0, 5, 7],
            ChordQuality::Dominant7 => &[0, 4, 7, 10],
            ChordQuality::Major7 => &[0, 4, 7, 11],
            ChordQuality::Minor7 => &[0, 3, 7, 10],
            ChordQuality::HalfDiminished7 => &[0, 3, 6, 10],
            ChordQuality::Diminished7 => &[0, 3, 6, 9],
        }
    }

    /// Parse a chord suffix ("", "m", "dim", "maj7", "m7b5", ...)
    pub fn from_suffix(s: &str) -> Option<Self> {
        match s.trim() {
            "" | "M" | "maj" | "major" => Some(ChordQuality::Major),
            "m" | "min" | "minor" | "-" => Some(ChordQuality::Minor),
            "dim" | "°" | "o" => Some(ChordQuality::Diminished),
            "aug" | "+" => Some(ChordQuality::Augmented),
            "sus2" => Some(ChordQuality::Sus2),
            "sus4" | "sus" => Some(ChordQuality::Sus4),
            "7" | "dom7" => Some(ChordQuality::Dominant7),
            "maj7" | "M7" | "Δ" | "Δ7" => Some(ChordQuality::Major7),
            "m7" | "min7" | "-7" => Some(ChordQuality::Minor7),
            "m7b5" | "ø" | "ø7" => Some(ChordQuality::HalfDiminished7),
            "dim7" | "°7" | "o7" => Some(ChordQuality::Diminished7),
            _ => None,
        }
    }

    /// Canonical suffix for display
    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::HalfDiminished7 => "m7b5",
            ChordQuality::Diminished7 => "dim7",
        }
    }
}

/// A chord with root and quality
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    root: Note,
    quality: ChordQuality,
    /// Chord tones as pitch classes, root first
    tones: Vec<u8>,
}

impl Chord {
    /// Create a new chord
    pub fn new(root: Note, quality: ChordQuality) -> Self {
        let tones = quality
            .intervals()
            .iter()
            .map(|&i| root.transpose(i as Semitones).pitch_class())
            .collect();

        Self {
            root,
            quality,
            tones,
        }
    }

    /// Parse a chord symbol such as "C", "F#m", "Bbmaj7" or "Bdim"
    pub fn parse(symbol: &str) -> Option<Self> {
        let symbol = symbol.trim();
        let split = symbol
            .char_indices()
            .skip(1)
            .find(|&(_, c)| !matches!(c, '#' | 'b' | '♯' | '♭'))
            .map(|(i, _)| i)
            .unwrap_or(symbol.len());

        let (root_str, suffix) = symbol.split_at(split);
        let root = Note::from_str(root_str)?;
        let quality = ChordQuality::from_suffix(suffix)?;
        Some(Chord::new(root, quality))
    }

    /// Get the root note
    pub fn root(&self) -> Note {
        self.root
    }

    /// Get the chord quality
    pub fn quality(&self) -> ChordQuality {
        self.quality
    }

    /// Chord tones in chord-tone order
    pub fn notes(&self) -> Vec<Note> {
        self.tones.iter().map(|&pc| Note::from_pitch(pc as Pitch)).collect()
    }
}

impl PitchContainer for Chord {
    type Options = FitOptions;

    fn contains(&self, pitch_class: Pitch) -> bool {
        self.tones.contains(&(pitch_class.rem_euclid(12) as u8))
    }

    fn fit_pitch(&self, pitch: Pitch, options: &FitOptions) -> Pitch {
        nearest_member(&self.tones, pitch, options.tie_break)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.quality.suffix())
    }
}
