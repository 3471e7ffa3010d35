//! Backend Comparison Module
//!
//! Groups backend comparison submissions by context size and picks a winner per group.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::store::{ResultRecord, RingLog};

/// Rank assigned to submissions that carry no performance score.
pub const MISSING_SCORE_RANK: f64 = 999.0;

/// Group key used for submissions without a context size.
pub const UNSPECIFIED_CONTEXT: &str = "null";

// == Winner ==
/// Best-scoring backend within one context-size group.
///
/// Lower `performance_score` wins.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ContextWinner {
    pub winner: Option<String>,
    pub score: Option<f64>,
    pub ttft_ms: Option<f64>,
    pub all_backends: Vec<Option<String>>,
}

/// Winners keyed by context size, in the order each size was first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WinnersByContext {
    groups: Vec<(Option<i64>, ContextWinner)>,
}

impl WinnersByContext {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the winner for a context size, if that size was submitted.
    pub fn get(&self, context_size: Option<i64>) -> Option<&ContextWinner> {
        self.groups
            .iter()
            .find(|(ctx, _)| *ctx == context_size)
            .map(|(_, winner)| winner)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Option<i64>, &ContextWinner)> {
        self.groups.iter().map(|(ctx, winner)| (*ctx, winner))
    }
}

impl Serialize for WinnersByContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (ctx, winner) in &self.groups {
            match ctx {
                Some(size) => map.serialize_entry(&size.to_string(), winner)?,
                None => map.serialize_entry(UNSPECIFIED_CONTEXT, winner)?,
            }
        }
        map.end()
    }
}

fn rank(record: &ResultRecord) -> f64 {
    record.result.performance_score.unwrap_or(MISSING_SCORE_RANK)
}

// == Winner Selection ==
/// Groups every stored comparison by context size and selects the
/// minimum-score entry of each group. Ties go to the earliest submission.
pub fn winners_by_context(log: &RingLog<ResultRecord>) -> WinnersByContext {
    let mut grouped: Vec<(Option<i64>, Vec<&ResultRecord>)> = Vec::new();
    for record in log.iter() {
        let ctx = record.result.context_size;
        match grouped.iter_mut().find(|(key, _)| *key == ctx) {
            Some((_, members)) => members.push(record),
            None => grouped.push((ctx, vec![record])),
        }
    }

    let groups = grouped
        .into_iter()
        .filter_map(|(ctx, members)| {
            let best = members.iter().copied().reduce(|best, candidate| {
                if rank(candidate) < rank(best) {
                    candidate
                } else {
                    best
                }
            })?;

            Some((
                ctx,
                ContextWinner {
                    winner: best.result.backend.clone(),
                    score: best.result.performance_score,
                    ttft_ms: best.result.avg_ttft_ms,
                    all_backends: members.iter().map(|r| r.result.backend.clone()).collect(),
                },
            ))
        })
        .collect();

    WinnersByContext { groups }
}
