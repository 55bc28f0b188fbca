// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Proposal-based matching of source pitch classes to target pitch classes.
//!
//! Sources propose, targets choose. The first round seeds every source
//! with the container's default fit; later rounds let unmatched sources
//! propose to their nearest target that has not turned them down yet.
//! Matching stops as soon as `min(sources, targets)` pairs are engaged.
//!
//! A target always keeps the closest contender. On equal distance the
//! most recent proposal wins, including over an existing engagement.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::music::container::{circular_distance, Pitch, PitchContainer};

use super::normalize;

/// Where a proposal stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProposalStatus {
    Pending,
    Engaged,
    Rejected,
}

/// One source-to-target proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proposal {
    /// Source pitch class (12-23)
    pub source: Pitch,
    /// Target pitch class (12-23)
    pub target: Pitch,
    pub status: ProposalStatus,
    /// Circular semitone distance between source and target
    pub distance: u8,
}

/// Append-only record of every proposal made during one matching run.
///
/// Entries are never removed or reordered, only their status changes, so
/// the position of a proposal is its recency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProposalLog {
    proposals: Vec<Proposal>,
    rounds: usize,
}

impl ProposalLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// All proposals in the order they were made
    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    /// Number of proposal rounds that were run
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Record a pending proposal
    pub fn propose(&mut self, source: Pitch, target: Pitch) {
        let distance = circular_distance(source, target);
        trace!(from = source, to = target, distance, "proposal");
        self.proposals.push(Proposal {
            source,
            target,
            status: ProposalStatus::Pending,
            distance,
        });
    }

    /// Currently engaged proposals
    pub fn engagements(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals
            .iter()
            .filter(|p| p.status == ProposalStatus::Engaged)
    }

    /// Number of engaged pairs
    pub fn engaged_count(&self) -> usize {
        self.engagements().count()
    }

    /// True if `source` currently holds an engagement
    pub fn is_engaged(&self, source: Pitch) -> bool {
        self.engagements().any(|p| p.source == source)
    }

    /// True if `target` has ever turned `source` down
    pub fn was_rejected(&self, source: Pitch, target: Pitch) -> bool {
        self.proposals.iter().any(|p| {
            p.source == source && p.target == target && p.status == ProposalStatus::Rejected
        })
    }

    /// Let every target settle its pending proposals.
    ///
    /// Afterwards no proposal is left pending; proposals addressed to
    /// pitch classes outside `targets` are rejected outright.
    pub fn resolve(&mut self, targets: &BTreeSet<Pitch>) {
        for &target in targets {
            let mut best: Option<usize> = None;
            for (i, p) in self.proposals.iter().enumerate() {
                if p.target != target || p.status != ProposalStatus::Pending {
                    continue;
                }
                // `<=` so the latest of equally close contenders wins
                if best.map_or(true, |b| p.distance <= self.proposals[b].distance) {
                    best = Some(i);
                }
            }

            let Some(best) = best else {
                continue;
            };

            let current = self
                .proposals
                .iter()
                .position(|p| p.target == target && p.status == ProposalStatus::Engaged);

            match current {
                Some(current) if self.proposals[best].distance <= self.proposals[current].distance => {
                    debug!(
                        to = target,
                        displaced = self.proposals[current].source,
                        by = self.proposals[best].source,
                        "engagement replaced"
                    );
                    self.proposals[current].status = ProposalStatus::Rejected;
                    self.proposals[best].status = ProposalStatus::Engaged;
                }
                Some(_) => {}
                None => self.proposals[best].status = ProposalStatus::Engaged,
            }

            for p in self.proposals.iter_mut() {
                if p.target == target && p.status == ProposalStatus::Pending {
                    p.status = ProposalStatus::Rejected;
                }
            }
        }

        for p in self.proposals.iter_mut() {
            if p.status == ProposalStatus::Pending {
                p.status = ProposalStatus::Rejected;
            }
        }
    }
}

/// Match normalized source pitch classes to normalized target pitch classes.
///
/// Returns the full proposal log; its engagements are the final pairs.
pub fn match_pitches<C>(
    sources: &BTreeSet<Pitch>,
    targets: &BTreeSet<Pitch>,
    container: &C,
    options: &C::Options,
) -> ProposalLog
where
    C: PitchContainer + ?Sized,
{
    let mut log = ProposalLog::new();
    let wanted = sources.len().min(targets.len());
    if wanted == 0 {
        return log;
    }

    for &source in sources {
        log.propose(source, normalize(container.fit_pitch(source, options)));
    }
    log.rounds += 1;
    log.resolve(targets);
    debug!(round = log.rounds, engaged = log.engaged_count(), wanted, "round resolved");

    while log.engaged_count() < wanted {
        let mut proposed = false;

        for &source in sources {
            if log.is_engaged(source) {
                continue;
            }
            let nearest = targets
                .iter()
                .copied()
                .filter(|&target| !log.was_rejected(source, target))
                .min_by_key(|&target| circular_distance(source, target));

            if let Some(target) = nearest {
                log.propose(source, target);
                proposed = true;
            }
        }

        if !proposed {
            debug!(round = log.rounds, "no proposals left");
            break;
        }

        log.rounds += 1;
        log.resolve(targets);
        debug!(round = log.rounds, engaged = log.engaged_count(), wanted, "round resolved");
    }

    log
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::container::FitOptions;
    use crate::music::scale::{Note, Scale, ScaleType};

    fn set(pitches: &[Pitch]) -> BTreeSet<Pitch> {
        pitches.iter().copied().collect()
    }

    #[test]
    fn test_resolve_keeps_closest() {
        let mut log = ProposalLog::new();
        log.propose(17, 17);
        log.propose(18, 17);
        log.resolve(&set(&[17]));

        assert_eq!(log.proposals()[0].status, ProposalStatus::Engaged);
        assert_eq!(log.proposals()[1].status, ProposalStatus::Rejected);
    }

    #[test]
    fn test_resolve_latest_wins_ties() {
        let mut log = ProposalLog::new();
        log.propose(13, 12);
        log.propose(23, 12);
        log.resolve(&set(&[12]));

        assert_eq!(log.proposals()[0].status, ProposalStatus::Rejected);
        assert_eq!(log.proposals()[1].status, ProposalStatus::Engaged);
    }

    #[test]
    fn test_equal_distance_displaces_engagement() {
        let mut log = ProposalLog::new();
        log.propose(13, 12);
        log.resolve(&set(&[12]));
        assert!(log.is_engaged(13));

        log.propose(23, 12);
        log.resolve(&set(&[12]));
        assert!(!log.is_engaged(13));
        assert!(log.is_engaged(23));
        assert!(log.was_rejected(13, 12));
    }

    #[test]
    fn test_farther_contender_is_rejected() {
        let mut log = ProposalLog::new();
        log.propose(12, 12);
        log.resolve(&set(&[12]));

        log.propose(14, 12);
        log.resolve(&set(&[12]));
        assert!(log.is_engaged(12));
        assert!(log.was_rejected(14, 12));
        assert_eq!(log.engaged_count(), 1);
    }

    #[test]
    fn test_resolve_rejects_proposals_outside_targets() {
        let mut log = ProposalLog::new();
        log.propose(13, 13);
        log.resolve(&set(&[12]));
        assert_eq!(log.proposals()[0].status, ProposalStatus::Rejected);
    }

    #[test]
    fn test_match_displaced_source_moves_on() {
        let c_major = Scale::new(Note::C, ScaleType::Major);
        let targets: BTreeSet<Pitch> = (12..24).filter(|&p| c_major.contains(p)).collect();
        let sources = set(&[13, 14, 16, 17, 18, 19, 21, 22]);

        let log = match_pitches(&sources, &targets, &c_major, &FitOptions::default());

        assert_eq!(log.engaged_count(), 7);
        assert_eq!(log.rounds(), 2);
        assert!(log.engagements().any(|p| p.source == 22 && p.target == 23));
        assert!(log.was_rejected(22, 21));
        assert!(log.was_rejected(18, 17));
        assert!(log.was_rejected(18, 19));
        assert!(!log.is_engaged(18));
    }

    #[test]
    fn test_match_empty_sides() {
        let c_major = Scale::new(Note::C, ScaleType::Major);
        let options = FitOptions::default();

        let log = match_pitches(&set(&[]), &set(&[12, 14]), &c_major, &options);
        assert!(log.proposals().is_empty());
        assert_eq!(log.rounds(), 0);

        let log = match_pitches(&set(&[13]), &set(&[]), &c_major, &options);
        assert!(log.proposals().is_empty());
    }

    #[test]
    fn test_match_stops_after_first_round_when_complete() {
        let c_major = Scale::new(Note::C, ScaleType::Major);
        let targets: BTreeSet<Pitch> = (12..24).filter(|&p| c_major.contains(p)).collect();

        let log = match_pitches(&set(&[13, 15]), &targets, &c_major, &FitOptions::default());
        assert_eq!(log.rounds(), 1);
        assert_eq!(log.proposals().len(), 2);
        assert!(log.engagements().any(|p| p.source == 13 && p.target == 12));
        assert!(log.engagements().any(|p| p.source == 15 && p.target == 14));
    }
}
