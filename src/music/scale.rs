// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale definitions used as pitch containers.
//!
//! Provides note names, scale interval tables, scale membership and the
//! scale's own nearest-note fit.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::container::{nearest_member, FitOptions, Pitch, PitchContainer};

/// Semitone offset type
pub type Semitones = i32;

/// Note names (pitch classes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Note {
    C,
    Cs, // C# / Db
    D,
    Ds, // D# / Eb
    E,
    F,
    Fs, // F# / Gb
    G,
    Gs, // G# / Ab
    A,
    As, // A# / Bb
    B,
}

impl Note {
    /// All notes in chromatic order
    pub const ALL: [Note; 12] = [
        Note::C,
        Note::Cs,
        Note::D,
        Note::Ds,
        Note::E,
        Note::F,
        Note::Fs,
        Note::G,
        Note::Gs,
        Note::A,
        Note::As,
        Note::B,
    ];

    /// Get the pitch class (0-11) for this note
    pub fn pitch_class(self) -> u8 {
        self as u8
    }

    /// Get note from any pitch (octave ignored)
    pub fn from_pitch(pitch: Pitch) -> Self {
        Note::ALL[pitch.rem_euclid(12) as usize]
    }

    /// Parse a note name without octave ("C", "F#", "Bb", "e")
    pub fn from_str(s: &str) -> Option<Self> {
        match super::pitch::parse_pitch(s) {
            Ok(pitch) if (0..12).contains(&pitch) => Some(Note::from_pitch(pitch)),
            _ => None,
        }
    }

    /// Transpose by semitones
    pub fn transpose(self, semitones: Semitones) -> Self {
        Note::from_pitch(self.pitch_class() as Pitch + semitones)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Note::C => write!(f, "C"),
            Note::Cs => write!(f, "C#"),
            Note::D => write!(f, "D"),
            Note::Ds => write!(f, "D#"),
            Note::E => write!(f, "E"),
            Note::F => write!(f, "F"),
            Note::Fs => write!(f, "F#"),
            Note::G => write!(f, "G"),
            Note::Gs => write!(f, "G#"),
            Note::A => write!(f, "A"),
            Note::As => write!(f, "A#"),
            Note::B => write!(f, "B"),
        }
    }
}

/// Scale types supported by the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    // Major scale and modes
    Major,        // Ionian
    Dorian,       // Minor with raised 6th
    Phrygian,     // Minor with lowered 2nd
    Lydian,       // Major with raised 4th
    Mixolydian,   // Major with lowered 7th
    NaturalMinor, // Aeolian
    Locrian,      // Diminished

    // Other minor scales
    HarmonicMinor,
    MelodicMinor, // Ascending form

    // Pentatonic scales
    MajorPentatonic,
    MinorPentatonic,

    // Blues
    Blues,
    MajorBlues,

    // Symmetric scales
    WholeTone,
    Diminished,   // Half-whole
    DiminishedWH, // Whole-half
    Chromatic,

    // Custom scale from intervals
    Custom,
}

impl ScaleType {
    /// Get the intervals (semitones from root) for this scale type
    pub fn intervals(self) -> Vec<u8> {
        match self {
            ScaleType::Major => vec![0, 2, 4, 5, 7, 9, 11],
            ScaleType::Dorian => vec![0, 2, 3, 5, 7, 9, 10],
            ScaleType::Phrygian => vec![0, 1, 3, 5, 7, 8, 10],
            ScaleType::Lydian => vec![0, 2, 4, 6, 7, 9, 11],
            ScaleType::Mixolydian => vec![0, 2, 4, 5, 7, 9, 10],
            ScaleType::NaturalMinor => vec![0, 2, 3, 5, 7, 8, 10],
            ScaleType::Locrian => vec![0, 1, 3, 5, 6, 8, 10],

            ScaleType::HarmonicMinor => vec![0, 2, 3, 5, 7, 8, 11],
            ScaleType::MelodicMinor => vec![0, 2, 3, 5, 7, 9, 11],

            ScaleType::MajorPentatonic => vec![0, 2, 4, 7, 9],
            ScaleType::MinorPentatonic => vec![0, 3, 5, 7, 10],

            ScaleType::Blues => vec![0, 3, 5, 6, 7, 10],
            ScaleType::MajorBlues => vec![0, 2, 3, 4, 7, 9],

            ScaleType::WholeTone => vec![0, 2, 4, 6, 8, 10],
            ScaleType::Diminished => vec![0, 1, 3, 4, 6, 7, 9, 10],
            ScaleType::DiminishedWH => vec![0, 2, 3, 5, 6, 8, 9, 11],
            ScaleType::Chromatic => (0..12).collect(),

            ScaleType::Custom => vec![],
        }
    }

    /// Parse scale type from string
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match s.as_str() {
            "major" | "ionian" => Some(ScaleType::Major),
            "dorian" => Some(ScaleType::Dorian),
            "phrygian" => Some(ScaleType::Phrygian),
            "lydian" => Some(ScaleType::Lydian),
            "mixolydian" => Some(ScaleType::Mixolydian),
            "minor" | "naturalminor" | "aeolian" => Some(ScaleType::NaturalMinor),
            "locrian" => Some(ScaleType::Locrian),
            "harmonicminor" => Some(ScaleType::HarmonicMinor),
            "melodicminor" => Some(ScaleType::MelodicMinor),
            "majorpentatonic" | "pentatonicmajor" => Some(ScaleType::MajorPentatonic),
            "minorpentatonic" | "pentatonicminor" | "pentatonic" => Some(ScaleType::MinorPentatonic),
            "blues" | "minorblues" => Some(ScaleType::Blues),
            "majorblues" => Some(ScaleType::MajorBlues),
            "wholetone" => Some(ScaleType::WholeTone),
            "diminished" | "octatonic" | "halfwhole" => Some(ScaleType::Diminished),
            "diminishedwh" | "wholehalf" => Some(ScaleType::DiminishedWH),
            "chromatic" => Some(ScaleType::Chromatic),
            _ => None,
        }
    }

    /// Get a human-readable name for this scale type
    pub fn name(self) -> &'static str {
        match self {
            ScaleType::Major => "Major",
            ScaleType::Dorian => "Dorian",
            ScaleType::Phrygian => "Phrygian",
            ScaleType::Lydian => "Lydian",
            ScaleType::Mixolydian => "Mixolydian",
            ScaleType::NaturalMinor => "Natural Minor",
            ScaleType::Locrian => "Locrian",
            ScaleType::HarmonicMinor => "Harmonic Minor",
            ScaleType::MelodicMinor => "Melodic Minor",
            ScaleType::MajorPentatonic => "Major Pentatonic",
            ScaleType::MinorPentatonic => "Minor Pentatonic",
            ScaleType::Blues => "Blues",
            ScaleType::MajorBlues => "Major Blues",
            ScaleType::WholeTone => "Whole Tone",
            ScaleType::Diminished => "Diminished",
            ScaleType::DiminishedWH => "Diminished (W-H)",
            ScaleType::Chromatic => "Chromatic",
            ScaleType::Custom => "Custom",
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A complete scale with root and type
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    root: Note,
    scale_type: ScaleType,
    intervals: Vec<u8>,
    /// Member pitch classes in degree order
    members: Vec<u8>,
}

impl Scale {
    /// Create a new scale from root and type
    pub fn new(root: Note, scale_type: ScaleType) -> Self {
        let intervals = scale_type.intervals();
        Self::build(root, scale_type, intervals)
    }

    /// Create a custom scale from root and intervals.
    ///
    /// Intervals are reduced to one octave; repeats keep their first degree.
    pub fn custom(root: Note, intervals: Vec<u8>) -> Self {
        Self::build(root, ScaleType::Custom, intervals)
    }

    fn build(root: Note, scale_type: ScaleType, intervals: Vec<u8>) -> Self {
        let mut members: Vec<u8> = Vec::with_capacity(intervals.len());
        for &i in &intervals {
            let pc = root.transpose(i as Semitones).pitch_class();
            if !members.contains(&pc) {
                members.push(pc);
            }
        }

        Self {
            root,
            scale_type,
            intervals,
            members,
        }
    }

    /// Parse a scale from strings (e.g., "C", "major")
    pub fn parse(root_str: &str, scale_str: &str) -> Option<Self> {
        let root = Note::from_str(root_str)?;
        let scale_type = ScaleType::from_str(scale_str)?;
        Some(Scale::new(root, scale_type))
    }

    /// Get the root note
    pub fn root(&self) -> Note {
        self.root
    }

    /// Get the scale type
    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    /// Get the intervals (semitones from root)
    pub fn intervals(&self) -> &[u8] {
        &self.intervals
    }

    /// Get the notes in this scale, in degree order
    pub fn notes(&self) -> Vec<Note> {
        self.members.iter().map(|&pc| Note::from_pitch(pc as Pitch)).collect()
    }

    /// Get the number of distinct notes in this scale
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if this scale is empty (only possible for custom scales)
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Get the scale degree (1-based) for a note, if it's in the scale
    pub fn degree_of(&self, note: Note) -> Option<usize> {
        self.members
            .iter()
            .position(|&pc| pc == note.pitch_class())
            .map(|i| i + 1)
    }

    /// Get the note at a given scale degree (1-based)
    pub fn note_at_degree(&self, degree: usize) -> Option<Note> {
        if degree == 0 || degree > self.len() {
            return None;
        }
        Some(Note::from_pitch(self.members[degree - 1] as Pitch))
    }

    /// Snap a pitch to the nearest scale note in the same octave band
    pub fn quantize(&self, pitch: Pitch, options: &FitOptions) -> Pitch {
        let pc = pitch.rem_euclid(12);
        pitch - pc + self.fit_pitch(pitch, options)
    }
}

impl PitchContainer for Scale {
    type Options = FitOptions;

    fn contains(&self, pitch_class: Pitch) -> bool {
        self.members.contains(&(pitch_class.rem_euclid(12) as u8))
    }

    fn fit_pitch(&self, pitch: Pitch, options: &FitOptions) -> Pitch {
        nearest_member(&self.members, pitch, options.tie_break)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.root, self.scale_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::container::TieBreak;

    #[test]
    fn test_note_pitch_class() {
        assert_eq!(Note::C.pitch_class(), 0);
        assert_eq!(Note::A.pitch_class(), 9);
        assert_eq!(Note::B.pitch_class(), 11);
        assert_eq!(Note::from_pitch(-1), Note::B);
        assert_eq!(Note::from_pitch(61), Note::Cs);
    }

    #[test]
    fn test_note_from_str() {
        assert_eq!(Note::from_str("C"), Some(Note::C));
        assert_eq!(Note::from_str("C#"), Some(Note::Cs));
        assert_eq!(Note::from_str("Db"), Some(Note::Cs));
        assert_eq!(Note::from_str("f#"), Some(Note::Fs));
        assert_eq!(Note::from_str("Bb"), Some(Note::As));
        assert_eq!(Note::from_str("Cb"), Some(Note::B));
        assert_eq!(Note::from_str("X"), None);
        assert_eq!(Note::from_str("C4"), None);
    }

    #[test]
    fn test_note_transpose() {
        assert_eq!(Note::C.transpose(2), Note::D);
        assert_eq!(Note::C.transpose(12), Note::C);
        assert_eq!(Note::C.transpose(-1), Note::B);
        assert_eq!(Note::G.transpose(5), Note::C);
    }

    #[test]
    fn test_scale_type_from_str() {
        assert_eq!(ScaleType::from_str("major"), Some(ScaleType::Major));
        assert_eq!(ScaleType::from_str("Minor"), Some(ScaleType::NaturalMinor));
        assert_eq!(ScaleType::from_str("harmonic_minor"), Some(ScaleType::HarmonicMinor));
        assert_eq!(ScaleType::from_str("whole tone"), Some(ScaleType::WholeTone));
        assert_eq!(ScaleType::from_str("unknown"), None);
    }

    #[test]
    fn test_scale_notes() {
        let a_minor = Scale::new(Note::A, ScaleType::NaturalMinor);
        assert_eq!(
            a_minor.notes(),
            vec![Note::A, Note::B, Note::C, Note::D, Note::E, Note::F, Note::G]
        );
    }

    #[test]
    fn test_scale_contains_any_octave() {
        let c_major = Scale::new(Note::C, ScaleType::Major);
        assert!(c_major.contains(0));
        assert!(c_major.contains(19));
        assert!(c_major.contains(-5));
        assert!(!c_major.contains(13));
        assert!(!c_major.contains(6));
    }

    #[test]
    fn test_scale_degree() {
        let c_major = Scale::new(Note::C, ScaleType::Major);
        assert_eq!(c_major.degree_of(Note::C), Some(1));
        assert_eq!(c_major.degree_of(Note::B), Some(7));
        assert_eq!(c_major.degree_of(Note::Fs), None);
        assert_eq!(c_major.note_at_degree(5), Some(Note::G));
        assert_eq!(c_major.note_at_degree(0), None);
        assert_eq!(c_major.note_at_degree(8), None);
    }

    #[test]
    fn test_scale_default_fit() {
        let c_major = Scale::new(Note::C, ScaleType::Major);
        let down = FitOptions::default();
        let up = FitOptions::with_tie_break(TieBreak::Up);

        assert_eq!(c_major.fit_pitch(60, &down), 0);
        assert_eq!(c_major.fit_pitch(61, &down), 0);
        assert_eq!(c_major.fit_pitch(61, &up), 2);
        assert_eq!(c_major.fit_pitch(66, &down), 5);
        assert_eq!(c_major.fit_pitch(66, &up), 7);
    }

    #[test]
    fn test_scale_root_tie_break_prefers_lower_degree() {
        // G major: F# is degree 7, G# sits between G (1) and A (2)
        let g_major = Scale::new(Note::G, ScaleType::Major);
        let root = FitOptions::with_tie_break(TieBreak::Root);
        assert_eq!(g_major.fit_pitch(8, &root), 7);

        // F is between E (6) and F# (7)
        assert_eq!(g_major.fit_pitch(5, &root), 4);
    }

    #[test]
    fn test_scale_quantize_keeps_octave() {
        let c_major = Scale::new(Note::C, ScaleType::Major);
        let options = FitOptions::default();
        assert_eq!(c_major.quantize(60, &options), 60);
        assert_eq!(c_major.quantize(61, &options), 60);
        assert_eq!(c_major.quantize(66, &options), 65);
        assert_eq!(c_major.quantize(-11, &options), -12);
    }

    #[test]
    fn test_custom_scale() {
        let custom = Scale::custom(Note::C, vec![0, 2, 3, 5, 6, 8, 9, 11]);
        assert_eq!(custom.len(), 8);
        assert!(custom.contains(Note::Ds.pitch_class() as Pitch));
        assert!(!custom.contains(Note::E.pitch_class() as Pitch));

        let repeated = Scale::custom(Note::D, vec![0, 12, 7]);
        assert_eq!(repeated.notes(), vec![Note::D, Note::A]);
    }

    #[test]
    fn test_empty_custom_scale_fits_to_itself() {
        let empty = Scale::custom(Note::C, vec![]);
        assert!(empty.is_empty());
        assert_eq!(empty.fit_pitch(61, &FitOptions::default()), 1);
    }

    #[test]
    fn test_scale_display() {
        assert_eq!(Scale::new(Note::Fs, ScaleType::Dorian).to_string(), "F# Dorian");
    }
}
