//! Per-weapon scoring results.

use fuzzy_core::{Coverage, Evaluation};
use serde::{Serialize, Serializer};

use crate::band::Band;
use crate::error::SelectionError;

/// Desirability of one weapon for one input tuple.
///
/// # Fields
///
/// - `weapon` / `index`: name and declaration position in the arsenal
/// - `score`: crisp desirability, `0.0` when degenerate or failed
/// - `coverage`: whether any rule contributed to the score
/// - `failure`: set when this weapon could not be evaluated
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WeaponScore {
    pub weapon: String,
    pub index: usize,
    pub distance: f64,
    pub ammunition: Option<f64>,
    pub score: f64,
    pub coverage: Coverage,
    #[serde(serialize_with = "serialize_failure")]
    pub failure: Option<SelectionError>,
}

impl WeaponScore {
    pub(crate) fn evaluated(
        weapon: &str,
        index: usize,
        distance: f64,
        ammunition: f64,
        evaluation: &Evaluation,
    ) -> Self {
        Self {
            weapon: weapon.to_string(),
            index,
            distance,
            ammunition: Some(ammunition),
            score: evaluation.score(),
            coverage: evaluation.coverage(),
            failure: None,
        }
    }

    pub(crate) fn failed(
        weapon: &str,
        index: usize,
        distance: f64,
        ammunition: Option<f64>,
        failure: SelectionError,
    ) -> Self {
        Self {
            weapon: weapon.to_string(),
            index,
            distance,
            ammunition,
            score: 0.0,
            coverage: Coverage::NoCoverage,
            failure: Some(failure),
        }
    }

    pub fn band(&self) -> Band {
        Band::from_score(self.score)
    }

    /// True when the score is the zero-coverage fallback rather than computed.
    pub fn is_degenerate(&self) -> bool {
        !self.coverage.is_covered()
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

fn serialize_failure<S>(failure: &Option<SelectionError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match failure {
        Some(err) => serializer.serialize_some(&err.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Outcome of scoring every weapon: all scores plus the winner, if any.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Selection {
    best: Option<usize>,
    scores: Vec<WeaponScore>,
}

impl Selection {
    /// Picks the arg-max of the evaluated entries; ties go to the earliest.
    ///
    /// Failed entries never win. With no evaluated entry there is no best.
    pub fn from_scores(scores: Vec<WeaponScore>) -> Self {
        let best = best_index(&scores);
        Self { best, scores }
    }

    /// The recommended weapon; `None` when every weapon failed to evaluate.
    pub fn best(&self) -> Option<&WeaponScore> {
        self.best.map(|i| &self.scores[i])
    }

    /// Scores in declaration order.
    pub fn scores(&self) -> &[WeaponScore] {
        &self.scores
    }

    /// Scores sorted by descending score, failed weapons last; equal scores keep
    /// declaration order.
    pub fn ranked(&self) -> Vec<&WeaponScore> {
        let mut ranked: Vec<_> = self.scores.iter().collect();
        ranked.sort_by(|a, b| {
            a.is_failed()
                .cmp(&b.is_failed())
                .then_with(|| b.score.total_cmp(&a.score))
        });
        ranked
    }
}

/// Index of the highest evaluated score, first one winning ties.
pub(crate) fn best_index(scores: &[WeaponScore]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, candidate) in scores.iter().enumerate() {
        if candidate.is_failed() {
            continue;
        }
        // Strictly greater: an equal later score never displaces an earlier one
        if best.is_none_or(|b| candidate.score > scores[b].score) {
            best = Some(i);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(weapon: &str, index: usize, value: f64) -> WeaponScore {
        WeaponScore {
            weapon: weapon.to_string(),
            index,
            distance: 0.0,
            ammunition: Some(0.0),
            score: value,
            coverage: Coverage::Covered,
            failure: None,
        }
    }

    #[test]
    fn highest_score_wins() {
        let sel = Selection::from_scores(vec![
            score("a", 0, 10.0),
            score("b", 1, 70.0),
            score("c", 2, 40.0),
        ]);
        assert_eq!(sel.best().unwrap().weapon, "b");
    }

    #[test]
    fn ties_go_to_first_declared() {
        let sel = Selection::from_scores(vec![
            score("a", 0, 10.0),
            score("b", 1, 55.0),
            score("c", 2, 55.0),
        ]);
        assert_eq!(sel.best().unwrap().weapon, "b");
    }

    #[test]
    fn ranking_is_stable() {
        let sel = Selection::from_scores(vec![
            score("a", 0, 20.0),
            score("b", 1, 50.0),
            score("c", 2, 20.0),
        ]);
        let order: Vec<_> = sel.ranked().iter().map(|s| s.weapon.as_str()).collect();
        assert_eq!(order, ["b", "a", "c"]);
    }

    #[test]
    fn empty_scores_have_no_selection() {
        assert!(Selection::from_scores(vec![]).best().is_none());
    }

    #[test]
    fn failed_weapon_never_wins() {
        let missing = |name: &str, index| {
            WeaponScore::failed(
                name,
                index,
                40.0,
                None,
                SelectionError::MissingAmmunition(name.into()),
            )
        };

        let sel = Selection::from_scores(vec![
            missing("a", 0),
            score("b", 1, 0.0),
            missing("c", 2),
        ]);
        assert_eq!(sel.best().unwrap().weapon, "b");

        let order: Vec<_> = sel.ranked().iter().map(|s| s.weapon.as_str()).collect();
        assert_eq!(order, ["b", "a", "c"]);

        let all_failed = Selection::from_scores(vec![missing("a", 0), missing("b", 1)]);
        assert!(all_failed.best().is_none());
        assert_eq!(all_failed.scores().len(), 2);
    }

    #[test]
    fn failed_score_serializes_message() {
        let failed = WeaponScore::failed(
            "Pistol",
            2,
            10.0,
            None,
            SelectionError::MissingAmmunition("Pistol".into()),
        );
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["score"], 0.0);
        assert_eq!(json["coverage"], "NoCoverage");
        assert_eq!(
            json["failure"],
            "no ammunition level supplied for weapon 'Pistol'"
        );
        assert!(failed.is_degenerate());
        assert_eq!(failed.band(), Band::Undesirable);
    }
}
