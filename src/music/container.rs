// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The pitch container contract.
//!
//! A pitch container is anything that can say whether a pitch class belongs
//! to it and offer its own nearest member for an arbitrary pitch. Scales and
//! chords both implement it; the fitter only ever talks to this trait.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Absolute pitch number (MIDI convention, C4 = 60). May be negative.
pub type Pitch = i32;

/// Circular semitone distance between two pitch classes (0-6)
pub fn circular_distance(a: Pitch, b: Pitch) -> u8 {
    let d = (a - b).rem_euclid(12);
    if d > 6 {
        (12 - d) as u8
    } else {
        d as u8
    }
}

/// A scale- or chord-like collection of pitch classes
pub trait PitchContainer {
    /// Options understood by [`PitchContainer::fit_pitch`]
    type Options;

    /// True if the pitch class (octave ignored) is a member
    fn contains(&self, pitch_class: Pitch) -> bool;

    /// The container's own nearest member pitch class for `pitch`
    fn fit_pitch(&self, pitch: Pitch, options: &Self::Options) -> Pitch;
}

impl<C: PitchContainer + ?Sized> PitchContainer for &C {
    type Options = C::Options;

    fn contains(&self, pitch_class: Pitch) -> bool {
        (**self).contains(pitch_class)
    }

    fn fit_pitch(&self, pitch: Pitch, options: &Self::Options) -> Pitch {
        (**self).fit_pitch(pitch, options)
    }
}

impl<C: PitchContainer + ?Sized> PitchContainer for Box<C> {
    type Options = C::Options;

    fn contains(&self, pitch_class: Pitch) -> bool {
        (**self).contains(pitch_class)
    }

    fn fit_pitch(&self, pitch: Pitch, options: &Self::Options) -> Pitch {
        (**self).fit_pitch(pitch, options)
    }
}

/// How equidistant candidates are settled by the default fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Prefer the member below
    #[default]
    Down,
    /// Prefer the member above
    Up,
    /// Prefer the member that comes first in the container's own order
    Root,
}

impl TieBreak {
    /// Parse a tie-break policy from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "down" | "lower" => Some(TieBreak::Down),
            "up" | "upper" => Some(TieBreak::Up),
            "root" => Some(TieBreak::Root),
            _ => None,
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::Down => write!(f, "down"),
            TieBreak::Up => write!(f, "up"),
            TieBreak::Root => write!(f, "root"),
        }
    }
}

/// Options for the built-in containers' default fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FitOptions {
    /// Policy for equidistant members
    #[serde(default)]
    pub tie_break: TieBreak,
}

impl FitOptions {
    /// Options with the given tie-break policy
    pub fn with_tie_break(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }
}

/// Nearest member search shared by the built-in containers.
///
/// `members` are pitch classes (0-11) in the container's own order; that
/// order is what [`TieBreak::Root`] falls back on. Returns `pitch`'s pitch
/// class unchanged when there are no members.
pub(crate) fn nearest_member(members: &[u8], pitch: Pitch, tie_break: TieBreak) -> Pitch {
    let pc = pitch.rem_euclid(12);
    let mut best: Option<(u8, Pitch)> = None;

    for &member in members {
        let member = member as Pitch;
        let dist = circular_distance(pc, member);
        let replace = match best {
            None => true,
            Some((best_dist, best_pc)) if dist == best_dist => match tie_break {
                TieBreak::Down => below(pc, member) && !below(pc, best_pc),
                TieBreak::Up => !below(pc, member) && below(pc, best_pc),
                TieBreak::Root => false,
            },
            Some((best_dist, _)) => dist < best_dist,
        };
        if replace {
            best = Some((dist, member));
        }
    }

    best.map(|(_, member)| member).unwrap_or(pc)
}

/// True if `member` lies below `pc` on the shorter arc
fn below(pc: Pitch, member: Pitch) -> bool {
    let up = (member - pc).rem_euclid(12);
    up > 6 || up == 0
}
