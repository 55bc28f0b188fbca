// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch fitting against a scale or chord.
//!
//! A [`PitchFitter`] is built from a set of pitches, a pitch container and
//! the container's fit options. It matches the distinct pitch classes of
//! the input onto the container's members so that different inputs land
//! on different members wherever the container allows it, then answers
//! queries for any pitch in any octave from the resulting table.
//!
//! Pitch classes are handled in the window 12-23 throughout.

pub mod matching;

pub use matching::{match_pitches, Proposal, ProposalLog, ProposalStatus};

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::debug;

use crate::music::container::{Pitch, PitchContainer};
use crate::music::pitch::{parse_pitch, PitchError};
use crate::music::scale::Note;

/// First pitch of the normalization window
pub const WINDOW_START: Pitch = 12;

/// Number of pitch classes
pub const PITCH_CLASSES: usize = 12;

/// Map any pitch to its pitch class in the window 12-23
pub fn normalize(pitch: Pitch) -> Pitch {
    pitch.rem_euclid(12) + WINDOW_START
}

/// Projects pitches through an optimized pitch-class table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PitchFitter {
    /// Fitted pitch class for each window slot, indexed by `pc - 12`
    mapping: [Pitch; PITCH_CLASSES],
}

impl PitchFitter {
    /// Create a fitter optimized for `sources` against `container`
    pub fn new<I, C>(sources: I, container: &C, options: &C::Options) -> Self
    where
        I: IntoIterator<Item = Pitch>,
        C: PitchContainer + ?Sized,
    {
        let mut fitter = Self {
            mapping: [WINDOW_START; PITCH_CLASSES],
        };
        fitter.optimize(sources, container, options);
        fitter
    }

    /// Rebuild the table for new sources, container or options.
    ///
    /// Returns the proposal log of the matching run.
    pub fn optimize<I, C>(&mut self, sources: I, container: &C, options: &C::Options) -> ProposalLog
    where
        I: IntoIterator<Item = Pitch>,
        C: PitchContainer + ?Sized,
    {
        let sources: BTreeSet<Pitch> = sources.into_iter().map(normalize).collect();
        let targets: BTreeSet<Pitch> = window().filter(|&pc| container.contains(pc)).collect();

        let log = match_pitches(&sources, &targets, container, options);

        // Unmatched sources and everything not optimized for use the default fit
        let mut mapping = [WINDOW_START; PITCH_CLASSES];
        for pc in window() {
            mapping[slot(pc)] = normalize(container.fit_pitch(pc, options));
        }
        for p in log.engagements() {
            mapping[slot(p.source)] = p.target;
        }
        self.mapping = mapping;

        debug!(
            sources = sources.len(),
            targets = targets.len(),
            engaged = log.engaged_count(),
            rounds = log.rounds(),
            "pitch table optimized"
        );

        log
    }

    /// Fit a pitch, keeping it in the octave band of the query.
    ///
    /// Results that would leave the `i32` range clamp at its limits.
    pub fn fit_pitch(&self, pitch: Pitch) -> Pitch {
        let lookup = normalize(pitch);
        let shift = self.mapping[slot(lookup)] - lookup;
        pitch.saturating_add(shift)
    }

    /// Fit a pitch given by name ("C#4", "Eb2")
    pub fn fit_name(&self, name: &str) -> Result<Pitch, PitchError> {
        parse_pitch(name).map(|pitch| self.fit_pitch(pitch))
    }

    /// Fitted pitch class (12-23) for any pitch's class
    pub fn fitted_class(&self, pitch: Pitch) -> Pitch {
        self.mapping[slot(normalize(pitch))]
    }

    /// The full table, keyed by window pitch class
    pub fn mapping(&self) -> BTreeMap<Pitch, Pitch> {
        window().map(|pc| (pc, self.mapping[slot(pc)])).collect()
    }

    /// Number of distinct fitted pitch classes among the given pitches
    pub fn distinct_targets<I>(&self, pitches: I) -> usize
    where
        I: IntoIterator<Item = Pitch>,
    {
        pitches
            .into_iter()
            .map(|p| self.fitted_class(p))
            .collect::<BTreeSet<_>>()
            .len()
    }
}

impl fmt::Display for PitchFitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pc in window() {
            let fitted = self.mapping[slot(pc)];
            let from = Note::from_pitch(pc).to_string();
            let to = Note::from_pitch(fitted).to_string();
            writeln!(f, "{:>2} {:<2} -> {:>2} {}", pc, from, fitted, to)?;
        }
        Ok(())
    }
}

fn window() -> impl Iterator<Item = Pitch> {
    WINDOW_START..WINDOW_START + PITCH_CLASSES as Pitch
}

fn slot(pc: Pitch) -> usize {
    (pc - WINDOW_START) as usize
}
