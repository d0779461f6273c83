//! Read-only views of the loaded arsenal.

use anyhow::{Result, bail};
use arsenal_content::{Arsenal, WeaponProfile};
use clap::Parser;

use crate::render;

/// List every variable and term of each weapon
#[derive(Parser)]
pub struct Terms {
    /// Only show this weapon
    #[arg(short, long, value_name = "NAME")]
    weapon: Option<String>,
}

impl Terms {
    pub fn execute(self, arsenal: &Arsenal) -> Result<()> {
        let weapons = select(arsenal, self.weapon.as_deref())?;
        print!("{}", render::terms(weapons));
        Ok(())
    }
}

/// Print each weapon's rule matrix
#[derive(Parser)]
pub struct Rules {
    /// Only show this weapon
    #[arg(short, long, value_name = "NAME")]
    weapon: Option<String>,
}

impl Rules {
    pub fn execute(self, arsenal: &Arsenal) -> Result<()> {
        let weapons = select(arsenal, self.weapon.as_deref())?;
        print!("{}", render::rules(weapons));
        Ok(())
    }
}

fn select<'a>(arsenal: &'a Arsenal, weapon: Option<&str>) -> Result<Vec<&'a WeaponProfile>> {
    match weapon {
        None => Ok(arsenal.weapons().iter().collect()),
        Some(name) => match arsenal.get(name) {
            Some(profile) => Ok(vec![profile]),
            None => bail!("Unknown weapon '{}'", name),
        },
    }
}
