//! Weapon evaluation and selection.
//!
//! The [`WeaponEvaluator`] scores every weapon of an [`Arsenal`] for one combat
//! situation and picks the most desirable one.
//!
//! # Isolation
//!
//! Each weapon is scored independently. A weapon that cannot be evaluated
//! (no ammunition level supplied, NaN input, a panicked task) is logged, given
//! a `0.0` score with [`WeaponScore::failure`] set, and the remaining weapons
//! are still scored.
//!
//! # Determinism
//!
//! Scoring is pure: the arsenal is immutable and shared by reference. Results
//! are always reported in declaration order and ties resolve to the earliest
//! declared weapon, including on the concurrent path where tasks may finish in
//! any order.

use std::collections::HashMap;
use std::sync::Arc;

use arsenal_content::{AMMUNITION, Arsenal, DISTANCE, WeaponProfile};
use fuzzy_core::CrispInputs;

use crate::error::{Result, SelectionError};
use crate::score::{Selection, WeaponScore, best_index};

/// Ammunition level per weapon name, each in `[0, 100]`.
pub type AmmoByWeapon = HashMap<String, f64>;

/// Scores weapons of a shared, immutable arsenal.
#[derive(Clone, Debug)]
pub struct WeaponEvaluator {
    arsenal: Arc<Arsenal>,
}

impl WeaponEvaluator {
    pub fn new(arsenal: Arc<Arsenal>) -> Self {
        Self { arsenal }
    }

    pub fn arsenal(&self) -> &Arsenal {
        &self.arsenal
    }

    /// Scores a single weapon.
    ///
    /// # Errors
    ///
    /// - [`SelectionError::UnknownWeapon`] if `weapon` is not declared
    /// - [`SelectionError::Evaluation`] if an input is NaN
    pub fn score(&self, weapon: &str, distance: f64, ammunition: f64) -> Result<WeaponScore> {
        let index = self
            .arsenal
            .position(weapon)
            .ok_or_else(|| SelectionError::UnknownWeapon(weapon.to_string()))?;

        let profile = &self.arsenal.weapons()[index];
        score_profile(index, profile, distance, ammunition)
    }

    /// Scores every weapon, in declaration order.
    ///
    /// A weapon missing from `ammunition` is recorded as failed.
    pub fn evaluate_all(&self, distance: f64, ammunition: &AmmoByWeapon) -> Vec<WeaponScore> {
        tracing::debug!(
            "WeaponEvaluator: scoring {} weapons at distance {}",
            self.arsenal.len(),
            distance
        );

        self.arsenal
            .weapons()
            .iter()
            .enumerate()
            .map(|(index, profile)| {
                score_isolated(index, profile, distance, ammunition.get(profile.name()).copied())
            })
            .collect()
    }

    /// Scores every weapon against arbitrary crisp inputs keyed by weapon name.
    ///
    /// This is the general form of [`Self::evaluate_all`] for arsenals whose
    /// rule bases use inputs beyond distance and ammunition. `distance` and
    /// `ammunition` fields of the result are filled when those inputs exist.
    pub fn evaluate_inputs(&self, inputs: &HashMap<String, CrispInputs>) -> Vec<WeaponScore> {
        let empty = CrispInputs::new();

        self.arsenal
            .weapons()
            .iter()
            .enumerate()
            .map(|(index, profile)| {
                let name = profile.name();
                // A weapon without inputs fails on its first missing variable
                let crisp = inputs.get(name).unwrap_or(&empty);
                let distance = crisp.get(DISTANCE).copied().unwrap_or(f64::NAN);
                let ammunition = crisp.get(AMMUNITION).copied();

                match profile.rule_base().evaluate(crisp) {
                    Ok(eval) => {
                        log_score(name, eval.score(), eval.is_degenerate());
                        WeaponScore {
                            ammunition,
                            ..WeaponScore::evaluated(name, index, distance, f64::NAN, &eval)
                        }
                    }
                    Err(source) => {
                        let err = SelectionError::Evaluation {
                            weapon: name.to_string(),
                            source,
                        };
                        tracing::warn!("WeaponEvaluator: {}: {}", err, err_source(&err));
                        WeaponScore::failed(name, index, distance, ammunition, err)
                    }
                }
            })
            .collect()
    }

    /// Arg-max over evaluated `scores`; ties go to the earliest (first declared)
    /// weapon. Failed weapons are never selected.
    pub fn select_best(scores: &[WeaponScore]) -> Option<&WeaponScore> {
        best_index(scores).map(|i| &scores[i])
    }

    /// Scores every weapon and selects the best one.
    ///
    /// The selection has no best weapon only if every weapon failed.
    pub fn best_weapon(&self, distance: f64, ammunition: &AmmoByWeapon) -> Selection {
        let scores = self.evaluate_all(distance, ammunition);
        self.finish(scores)
    }

    /// Scores every weapon on the blocking pool, one task per weapon.
    ///
    /// Results are slotted by declaration index, so the output is identical to
    /// [`Self::evaluate_all`] regardless of task completion order. A task that
    /// fails to complete only affects its own weapon.
    pub async fn evaluate_all_concurrent(
        &self,
        distance: f64,
        ammunition: &AmmoByWeapon,
    ) -> Vec<WeaponScore> {
        let handles: Vec<_> = (0..self.arsenal.len())
            .map(|index| {
                let arsenal = Arc::clone(&self.arsenal);
                let ammo = ammunition
                    .get(arsenal.weapons()[index].name())
                    .copied();
                tokio::task::spawn_blocking(move || {
                    let profile = &arsenal.weapons()[index];
                    score_isolated(index, profile, distance, ammo)
                })
            })
            .collect();

        let mut scores = Vec::with_capacity(handles.len());
        for (index, handle) in handles.into_iter().enumerate() {
            let score = match handle.await {
                Ok(score) => score,
                Err(join_err) => {
                    let profile = &self.arsenal.weapons()[index];
                    let err = SelectionError::TaskFailed {
                        weapon: profile.name().to_string(),
                        reason: join_err.to_string(),
                    };
                    tracing::warn!("WeaponEvaluator: {}", err);
                    WeaponScore::failed(
                        profile.name(),
                        index,
                        distance,
                        ammunition.get(profile.name()).copied(),
                        err,
                    )
                }
            };
            scores.push(score);
        }

        scores
    }

    /// Concurrent counterpart of [`Self::best_weapon`].
    pub async fn best_weapon_concurrent(
        &self,
        distance: f64,
        ammunition: &AmmoByWeapon,
    ) -> Selection {
        let scores = self.evaluate_all_concurrent(distance, ammunition).await;
        self.finish(scores)
    }

    fn finish(&self, scores: Vec<WeaponScore>) -> Selection {
        let selection = Selection::from_scores(scores);

        match selection.best() {
            Some(best) => tracing::debug!(
                "WeaponEvaluator: best weapon = {} (score={:.2})",
                best.weapon,
                best.score
            ),
            None => tracing::warn!("WeaponEvaluator: no weapon could be evaluated"),
        }

        selection
    }
}

fn score_profile(
    index: usize,
    profile: &WeaponProfile,
    distance: f64,
    ammunition: f64,
) -> Result<WeaponScore> {
    let eval = profile
        .rule_base()
        .evaluate_with(|name| match name {
            DISTANCE => Some(distance),
            AMMUNITION => Some(ammunition),
            _ => None,
        })
        .map_err(|source| SelectionError::Evaluation {
            weapon: profile.name().to_string(),
            source,
        })?;

    log_score(profile.name(), eval.score(), eval.is_degenerate());

    Ok(WeaponScore::evaluated(
        profile.name(),
        index,
        distance,
        ammunition,
        &eval,
    ))
}

fn score_isolated(
    index: usize,
    profile: &WeaponProfile,
    distance: f64,
    ammunition: Option<f64>,
) -> WeaponScore {
    let name = profile.name();

    let Some(ammo) = ammunition else {
        let err = SelectionError::MissingAmmunition(name.to_string());
        tracing::warn!("WeaponEvaluator: {}", err);
        return WeaponScore::failed(name, index, distance, None, err);
    };

    match score_profile(index, profile, distance, ammo) {
        Ok(score) => score,
        Err(err) => {
            tracing::warn!("WeaponEvaluator: {}: {}", err, err_source(&err));
            WeaponScore::failed(name, index, distance, Some(ammo), err)
        }
    }
}

fn log_score(weapon: &str, score: f64, degenerate: bool) {
    if degenerate {
        tracing::debug!("  Weapon {}: no rule coverage, score=0.00", weapon);
    } else {
        tracing::debug!("  Weapon {}: score={:.2}", weapon, score);
    }
}

fn err_source(err: &SelectionError) -> String {
    std::error::Error::source(err)
        .map(|s| s.to_string())
        .unwrap_or_default()
}
