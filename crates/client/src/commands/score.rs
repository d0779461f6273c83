//! Score every weapon for one combat situation.

use std::sync::Arc;

use anyhow::{Result, bail};
use arsenal_content::Arsenal;
use arsenal_runtime::{AmmoByWeapon, WeaponEvaluator};
use clap::Parser;

use super::parse_percent;
use crate::render;

/// Score every weapon for one combat situation
#[derive(Parser)]
pub struct Score {
    /// Distance to the target (0-100)
    #[arg(short, long, value_parser = parse_percent)]
    distance: f64,

    /// Ammunition level of one weapon, e.g. "Sniper Rifle=40" (repeatable)
    #[arg(short, long = "ammo", value_name = "NAME=LEVEL", value_parser = parse_ammo)]
    ammo: Vec<(String, f64)>,

    /// Print the full selection as JSON
    #[arg(long)]
    json: bool,
}

impl Score {
    pub async fn execute(self, arsenal: Arsenal) -> Result<()> {
        let ammunition = collect_ammo(&arsenal, self.ammo)?;
        let evaluator = WeaponEvaluator::new(Arc::new(arsenal));

        for name in evaluator.arsenal().names() {
            if !ammunition.contains_key(name) {
                tracing::warn!("No --ammo given for {}; it will not be considered", name);
            }
        }

        let selection = evaluator
            .best_weapon_concurrent(self.distance, &ammunition)
            .await;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&selection)?);
        } else {
            println!("Distance: {:.2}", self.distance);
            println!();
            print!("{}", render::ranking(&selection));
        }

        Ok(())
    }
}

/// Parses `NAME=LEVEL`; the last `=` separates name from level.
fn parse_ammo(raw: &str) -> Result<(String, f64), String> {
    let (name, level) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=LEVEL, got '{raw}'"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing weapon name in '{raw}'"));
    }

    Ok((name.to_string(), parse_percent(level)?))
}

fn collect_ammo(arsenal: &Arsenal, entries: Vec<(String, f64)>) -> Result<AmmoByWeapon> {
    let mut ammunition = AmmoByWeapon::with_capacity(entries.len());
    for (name, level) in entries {
        if arsenal.get(&name).is_none() {
            let known: Vec<_> = arsenal.names().collect();
            bail!("Unknown weapon '{}'. Known weapons: {}", name, known.join(", "));
        }
        if ammunition.insert(name.clone(), level).is_some() {
            bail!("Ammunition for '{}' given more than once", name);
        }
    }
    Ok(ammunition)
}
