//! Battle scenarios and the token strategy each one uses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// A named battle scenario.
///
/// The declaration order is the stable index carried by share links.
/// Raze came later than the others and is appended so older indices keep
/// their meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scenario {
    /// Control.
    Control,
    /// Dominate.
    Dominate,
    /// Fool's Gold.
    FoolsGold,
    /// Invade.
    Invade,
    /// Kill.
    Kill,
    /// Loot.
    Loot,
    /// Pillage.
    Pillage,
    /// Plunder.
    Plunder,
    /// Push.
    Push,
    /// Salt the Earth.
    SaltTheEarth,
    /// Smoke & Mirrors.
    SmokeAndMirrors,
    /// Raze.
    Raze,
}

/// How tokens are laid out for a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStrategy {
    /// One center token plus six tokens on two lines either side of it.
    Raze,
    /// No layout yet; generation succeeds with no tokens.
    NotImplemented,
}

impl Scenario {
    /// Every scenario in index order.
    pub const ALL: [Self; 12] = [
        Self::Control,
        Self::Dominate,
        Self::FoolsGold,
        Self::Invade,
        Self::Kill,
        Self::Loot,
        Self::Pillage,
        Self::Plunder,
        Self::Push,
        Self::SaltTheEarth,
        Self::SmokeAndMirrors,
        Self::Raze,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Control => "Control",
            Self::Dominate => "Dominate",
            Self::FoolsGold => "Fool's Gold",
            Self::Invade => "Invade",
            Self::Kill => "Kill",
            Self::Loot => "Loot",
            Self::Pillage => "Pillage",
            Self::Plunder => "Plunder",
            Self::Push => "Push",
            Self::SaltTheEarth => "Salt the Earth",
            Self::SmokeAndMirrors => "Smoke & Mirrors",
            Self::Raze => "Raze",
        }
    }

    /// Token strategy for this scenario.
    #[must_use]
    pub const fn strategy(self) -> TokenStrategy {
        match self {
            Self::Raze => TokenStrategy::Raze,
            // TODO: token layouts for Fool's Gold/Smoke & Mirrors, Loot, Pillage,
            // Plunder, Push and Salt the Earth.
            _ => TokenStrategy::NotImplemented,
        }
    }

    /// Position in [`Scenario::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or_default()
    }

    /// Scenario at `index`, if any.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse a scenario index carried as a decimal string.
    pub fn from_index_param(raw: &str) -> Result<Self, GenerationError> {
        raw.trim()
            .parse::<usize>()
            .ok()
            .and_then(Self::from_index)
            .ok_or_else(|| GenerationError::UnknownScenario(raw.to_string()))
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = GenerationError;

    /// Case-insensitive match on the display name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|scenario| scenario.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GenerationError::UnknownScenario(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for scenario in Scenario::ALL {
            assert_eq!(scenario.name().parse::<Scenario>().unwrap(), scenario);
            assert_eq!(scenario.to_string(), scenario.name());
        }
        assert_eq!("salt the earth".parse::<Scenario>().unwrap(), Scenario::SaltTheEarth);
        assert!("Conquest".parse::<Scenario>().is_err());
    }

    #[test]
    fn test_index_round_trip() {
        for (i, scenario) in Scenario::ALL.iter().enumerate() {
            assert_eq!(scenario.index(), i);
            assert_eq!(Scenario::from_index(i), Some(*scenario));
        }
        assert_eq!(Scenario::from_index(Scenario::ALL.len()), None);
    }

    #[test]
    fn test_share_link_indices_are_stable() {
        let names = [
            "Control",
            "Dominate",
            "Fool's Gold",
            "Invade",
            "Kill",
            "Loot",
            "Pillage",
            "Plunder",
            "Push",
            "Salt the Earth",
            "Smoke & Mirrors",
        ];
        for (i, name) in names.iter().enumerate() {
            assert_eq!(Scenario::from_index(i).map(Scenario::name), Some(*name));
        }
        assert_eq!(Scenario::from_index_param("11").unwrap(), Scenario::Raze);
    }

    #[test]
    fn test_index_param() {
        assert_eq!(Scenario::from_index_param("0").unwrap(), Scenario::Control);
        assert!(Scenario::from_index_param(&Scenario::ALL.len().to_string()).is_err());
        assert!(Scenario::from_index_param("hi").is_err());
        assert!(Scenario::from_index_param("-1").is_err());
    }

    #[test]
    fn test_only_raze_has_a_strategy() {
        for scenario in Scenario::ALL {
            let expected = if scenario == Scenario::Raze {
                TokenStrategy::Raze
            } else {
                TokenStrategy::NotImplemented
            };
            assert_eq!(scenario.strategy(), expected);
        }
    }
}
