//! Rule configuration for the `ruled` binary.
//!
//! Rules are given either inline on the command line (`kind[:arg]`, joined
//! with `+` for an all-of set) or as a JSON file:
//!
//! ```json
//! { "kind": "all-of", "rules": [
//!     { "kind": "not-equal", "value": 0 },
//!     { "kind": "multiple-of", "divisor": 3 }
//! ] }
//! ```

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use views::Rule;
use views::rules::{AcceptAll, MultipleOf, NotEqual, RuleSet};

/// A rule over integers, as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RuleConfig {
    AcceptAll,
    NotEqual { value: i64 },
    MultipleOf { divisor: i64 },
    Even,
    AllOf { rules: Vec<RuleConfig> },
}

impl RuleConfig {
    /// Load a rule from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse rule file {}", path.display()))
    }

    /// Build the rule this configuration describes.
    pub fn build(&self) -> Result<Box<dyn Rule<i64>>> {
        let rule: Box<dyn Rule<i64>> = match self {
            RuleConfig::AcceptAll => Box::new(AcceptAll),
            RuleConfig::NotEqual { value } => Box::new(NotEqual::new(*value)),
            RuleConfig::MultipleOf { divisor } => Box::new(MultipleOf::new(*divisor)?),
            RuleConfig::Even => Box::new(MultipleOf::new(2i64)?),
            RuleConfig::AllOf { rules } => {
                let mut set = RuleSet::new();
                for rule in rules {
                    set = set.add_boxed(rule.build()?);
                }
                Box::new(set)
            }
        };
        Ok(rule)
    }
}

impl FromStr for RuleConfig {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts = split_all_of(s);
        if parts.len() > 1 {
            let rules = parts
                .iter()
                .map(|part| part.parse::<RuleConfig>())
                .collect::<Result<Vec<RuleConfig>>>()?;
            return Ok(RuleConfig::AllOf { rules });
        }

        let (kind, arg) = match s.split_once(':') {
            Some((kind, arg)) => (kind.trim(), Some(arg.trim())),
            None => (s.trim(), None),
        };
        let number = |name: &str| -> Result<i64> {
            let arg = arg.ok_or_else(|| anyhow!("Rule '{}' needs an argument, e.g. {}:1", name, name))?;
            arg.parse()
                .with_context(|| format!("Invalid argument '{}' for rule '{}'", arg, name))
        };

        match kind {
            "accept-all" => Ok(RuleConfig::AcceptAll),
            "even" => Ok(RuleConfig::Even),
            "not-equal" => Ok(RuleConfig::NotEqual {
                value: number("not-equal")?,
            }),
            "multiple-of" => Ok(RuleConfig::MultipleOf {
                divisor: number("multiple-of")?,
            }),
            other => bail!("Unknown rule kind '{}'", other),
        }
    }
}

/// Split an inline rule on the `+` signs that start a new rule kind.
///
/// A `+` followed by anything other than a letter is the sign of a number,
/// so `not-equal:+5` stays a single rule.
fn split_all_of(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (index, _) in s.match_indices('+') {
        let starts_kind = s[index + 1..]
            .trim_start()
            .starts_with(|c: char| c.is_ascii_alphabetic());
        if starts_kind {
            parts.push(&s[start..index]);
            start = index + 1;
        }
    }
    parts.push(&s[start..]);
    parts
}
