// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch name parsing.
//!
//! Names are a letter, any number of accidentals of one kind and an
//! optional octave number. Octaves follow the MIDI convention where
//! middle C is C4 = 60, so C-1 = 0 and C1 = 24.

use thiserror::Error;

use super::container::Pitch;

/// Pitch name errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PitchError {
    #[error("invalid pitch name {name:?}: {reason}")]
    InvalidPitchName { name: String, reason: &'static str },
}

impl PitchError {
    fn invalid(name: &str, reason: &'static str) -> Self {
        PitchError::InvalidPitchName {
            name: name.to_string(),
            reason,
        }
    }
}

/// Parse a pitch name ("C4", "F#3", "Bb-1", "ebb2", "G").
///
/// A name without an octave yields its pitch class (0-11).
pub fn parse_pitch(name: &str) -> Result<Pitch, PitchError> {
    let trimmed = name.trim();
    let mut chars = trimmed.chars().peekable();

    let letter = chars
        .next()
        .ok_or_else(|| PitchError::invalid(name, "empty name"))?;
    let base: Pitch = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return Err(PitchError::invalid(name, "unsupported note letter")),
    };

    let mut sharps = 0;
    let mut flats = 0;
    while let Some(&c) = chars.peek() {
        match c {
            '#' | '♯' => sharps += 1,
            'b' | '♭' => flats += 1,
            _ => break,
        }
        chars.next();
    }
    if sharps > 0 && flats > 0 {
        return Err(PitchError::invalid(name, "mixed sharps and flats"));
    }

    let pitch_class = base + sharps - flats;
    let octave_str: String = chars.collect();
    if octave_str.is_empty() {
        return Ok(pitch_class.rem_euclid(12));
    }

    let octave: Pitch = octave_str
        .parse()
        .map_err(|_| PitchError::invalid(name, "octave is not a number"))?;

    Ok((octave + 1) * 12 + pitch_class)
}

/// Render a pitch as a sharp-spelled name with octave
pub fn pitch_name(pitch: Pitch) -> String {
    const NAMES: [&str; 12] = [
        "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
    ];
    let octave = pitch.div_euclid(12) - 1;
    format!("{}{}", NAMES[pitch.rem_euclid(12) as usize], octave)
}
