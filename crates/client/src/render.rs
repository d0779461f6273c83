//! Text rendering of scores, terms and rule matrices.
//!
//! Everything here builds `String`s so commands decide where output goes.

use std::fmt::Write;

use arsenal_content::WeaponProfile;
use arsenal_runtime::{Band, Selection, WeaponScore};
use console::style;
use fuzzy_core::{LinguisticVariable, RuleBase};

/// Ranked list of a selection, best first, with the recommendation.
pub fn ranking(selection: &Selection) -> String {
    let mut out = String::new();
    let best = selection.best();

    for (rank, score) in selection.ranked().into_iter().enumerate() {
        let marker = if best.is_some_and(|b| b.index == score.index) {
            "*"
        } else {
            " "
        };
        let _ = writeln!(
            out,
            "{} {}. {:<18} {:>6.2}  {}",
            marker,
            rank + 1,
            score.weapon,
            score.score,
            band_label(score)
        );
    }

    let _ = writeln!(out);
    let Some(best) = best else {
        let _ = writeln!(
            out,
            "{}",
            style("No weapon could be evaluated; nothing to recommend.").red()
        );
        return out;
    };
    let _ = writeln!(
        out,
        "{} {} ({:.2})",
        style("Recommended:").bold().green(),
        style(&best.weapon).bold(),
        best.score
    );
    if let Some(ammo) = best.ammunition {
        let _ = writeln!(out, "  Ammunition available: {ammo:.2}");
    }
    if best.is_degenerate() {
        let _ = writeln!(
            out,
            "  {}",
            style("no rule covered this situation for any weapon").yellow()
        );
    }

    out
}

/// Band name, or the failure reason for weapons that were not evaluated.
fn band_label(score: &WeaponScore) -> String {
    if let Some(failure) = &score.failure {
        return style(format!("FAILED ({failure})")).red().to_string();
    }

    let name: &'static str = score.band().into();
    let styled = match score.band() {
        Band::Essential => style(name).green(),
        Band::Desirable => style(name).yellow(),
        Band::Undesirable => style(name).red(),
    };
    if score.is_degenerate() {
        format!("{styled} (no coverage)")
    } else {
        styled.to_string()
    }
}

/// Every variable and term of each weapon.
pub fn terms<'a>(weapons: impl IntoIterator<Item = &'a WeaponProfile>) -> String {
    let mut out = String::new();
    for weapon in weapons {
        let _ = writeln!(out, "{}", weapon_header(weapon));
        let base = weapon.rule_base();
        for variable in base.inputs().iter().chain([base.output()]) {
            variable_terms(&mut out, variable);
        }
        let _ = writeln!(out);
    }
    out
}

fn variable_terms(out: &mut String, variable: &LinguisticVariable) {
    let universe = variable.universe();
    let _ = writeln!(
        out,
        "  {} [{}, {}]",
        style(variable.name()).bold(),
        universe.min(),
        universe.max()
    );
    for term in variable.terms() {
        let shape = &term.shape;
        let _ = writeln!(
            out,
            "    {:<12} ({}, {}, {})",
            term.label,
            shape.a(),
            shape.b(),
            shape.c()
        );
    }
}

/// Rule matrix of each weapon.
pub fn rules<'a>(weapons: impl IntoIterator<Item = &'a WeaponProfile>) -> String {
    let mut out = String::new();
    for weapon in weapons {
        let _ = writeln!(out, "{}", weapon_header(weapon));
        out.push_str(&rule_matrix(weapon.rule_base()));
        let _ = writeln!(out);
    }
    out
}

/// Grid of consequents: rows are terms of the first input, columns of the second.
///
/// Rule bases that are not two-dimensional are listed rule by rule instead.
/// Empty cells (no rule for that pair) show `-`.
pub fn rule_matrix(base: &RuleBase) -> String {
    let mut out = String::new();

    let [rows, cols] = base.inputs() else {
        for rule in base.rules() {
            let _ = writeln!(out, "  {rule}");
        }
        return out;
    };

    let width = base
        .output()
        .terms()
        .iter()
        .map(|t| t.label.len())
        .chain(cols.terms().iter().map(|t| t.label.len()))
        .max()
        .unwrap_or(0)
        + 2;
    let corner = format!("{}\\{}", rows.name(), cols.name());
    let row_width = rows
        .terms()
        .iter()
        .map(|t| t.label.len())
        .chain([corner.len()])
        .max()
        .unwrap_or(0)
        + 2;

    let _ = write!(out, "  {:<row_width$}", corner);
    for col in cols.terms() {
        let _ = write!(out, "{:<width$}", col.label);
    }
    let _ = writeln!(out);

    for row in rows.terms() {
        let _ = write!(out, "  {:<row_width$}", row.label);
        for col in cols.terms() {
            let cell = base
                .rules()
                .iter()
                .find(|rule| {
                    rule.term_for(rows.name()) == Some(row.label.as_str())
                        && rule.term_for(cols.name()) == Some(col.label.as_str())
                })
                .map_or("-", |rule| rule.consequent());
            let _ = write!(out, "{:<width$}", cell);
        }
        let _ = writeln!(out);
    }

    out
}

fn weapon_header(weapon: &WeaponProfile) -> String {
    if weapon.color().is_empty() {
        style(weapon.name()).bold().cyan().to_string()
    } else {
        format!(
            "{} {}",
            style(weapon.name()).bold().cyan(),
            style(format!("({})", weapon.color())).dim()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arsenal_content::presets;
    use arsenal_runtime::{AmmoByWeapon, WeaponEvaluator};
    use std::sync::Arc;

    fn plain(s: &str) -> String {
        console::strip_ansi_codes(s).into_owned()
    }

    #[test]
    fn pistol_matrix_reads_row_major() {
        let arsenal = presets::standard_arsenal().unwrap();
        let pistol = arsenal.get("Pistol").unwrap();
        let matrix = plain(&rule_matrix(pistol.rule_base()));
        let lines: Vec<Vec<&str>> = matrix
            .lines()
            .map(|line| line.split_whitespace().collect())
            .collect();

        assert_eq!(lines[0], ["distance\\ammunition", "low", "medium", "high"]);
        assert_eq!(lines[1], ["close", "desirable", "essential", "essential"]);
        assert_eq!(lines[2], ["medium", "undesirable", "undesirable", "desirable"]);
        assert_eq!(lines[3], ["far", "undesirable", "undesirable", "undesirable"]);
    }

    #[test]
    fn terms_lists_every_triangle() {
        let arsenal = presets::standard_arsenal().unwrap();
        let text = plain(&terms(arsenal.weapons()));
        assert!(text.contains("Sniper Rifle (#4ecdc4)"));
        assert!(text.contains("medium       (25, 50, 75)"));
        assert!(text.contains("essential    (60, 100, 100)"));
    }

    #[test]
    fn ranking_marks_the_best_weapon() {
        let ev = WeaponEvaluator::new(Arc::new(presets::standard_arsenal().unwrap()));
        let ammo: AmmoByWeapon = ev.arsenal().names().map(|n| (n.to_string(), 0.0)).collect();
        let selection = ev.best_weapon(0.0, &ammo);

        let text = plain(&ranking(&selection));
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("* 1. Pistol"));
        assert!(first.contains("50.00"));
        assert!(text.contains("Recommended: Pistol (50.00)"));
    }

    #[test]
    fn failed_weapons_show_reason() {
        let ev = WeaponEvaluator::new(Arc::new(presets::standard_arsenal().unwrap()));
        let ammo = AmmoByWeapon::from([("Pistol".to_string(), 50.0)]);
        let selection = ev.best_weapon(50.0, &ammo);

        let text = plain(&ranking(&selection));
        assert!(text.contains("FAILED (no ammunition level supplied for weapon 'Rocket Launcher')"));
        assert!(!text.contains("Recommended: Rocket Launcher"));
    }

    #[test]
    fn all_failed_selection_has_no_recommendation() {
        let ev = WeaponEvaluator::new(Arc::new(presets::standard_arsenal().unwrap()));
        let selection = ev.best_weapon(40.0, &AmmoByWeapon::new());

        let text = plain(&ranking(&selection));
        assert!(!text.contains("Recommended"));
        assert!(!text.contains('*'));
        assert!(text.contains("No weapon could be evaluated"));
    }
}
