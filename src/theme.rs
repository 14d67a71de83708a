//! Hacker-group themes and the read-only registry that holds them.
//!
//! The registry is built once (from the built-in museum roster or a JSON
//! file) and then only ever read, so a single instance can be shared across
//! threads behind an `Arc` without locking.

use crate::error::ManuscriptError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A historical hacker-group identity drawn as the manuscript banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTheme {
    pub emoji: String,
    pub name: String,
    pub era: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub members: Vec<String>,
}

impl GroupTheme {
    pub fn new(
        emoji: impl Into<String>,
        name: impl Into<String>,
        era: impl Into<String>,
    ) -> Self {
        Self {
            emoji: emoji.into(),
            name: name.into(),
            era: era.into(),
            description: String::new(),
            members: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members = members.into_iter().map(Into::into).collect();
        self
    }

    /// Banner line: `"<emoji> <name> | <era> | <emoji>"`.
    pub fn banner_text(&self) -> String {
        format!("{} {} | {} | {}", self.emoji, self.name, self.era, self.emoji)
    }
}

/// Immutable lookup table of themes keyed by short identifiers (`"L0PHT"`, `"CDC"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeRegistry {
    themes: BTreeMap<String, GroupTheme>,
}

impl ThemeRegistry {
    /// The museum's built-in roster.
    pub fn builtin() -> Self {
        let roster = [
            (
                "MOD",
                GroupTheme::new("📞", "Masters of Deception", "Early 1990s")
                    .with_description("Phone phreaking specialists who rivaled Legion of Doom")
                    .with_members(["Phiber Optik", "Acid Phreak", "Scorpion", "Corrupt"]),
            ),
            (
                "CDC",
                GroupTheme::new("🐄", "Cult of the Dead Cow", "1980s-1990s")
                    .with_description("Coined 'hacktivism' and created Back Orifice")
                    .with_members(["Mudge", "Dildog", "Deth Veggie", "Omega"]),
            ),
            (
                "LOD",
                GroupTheme::new("⚡", "Legion of Doom", "1980s-early 1990s")
                    .with_description("Legendary group known for technical journals")
                    .with_members(["Erik Bloodaxe", "The Mentor", "Lex Luthor"]),
            ),
            (
                "BR.Gov",
                GroupTheme::new("🇧🇷", "Brazilian Digital Underground", "2000s-2010s")
                    .with_description("Brazilian hacktivists focused on government transparency")
                    .with_members(["Unknown"]),
            ),
            (
                "LulzSec BR",
                GroupTheme::new("🏴‍☠️", "LulzSec Brazil", "2011-2012")
                    .with_description(
                        "Brazilian branch of LulzSec, known for operations against government sites",
                    )
                    .with_members(["Unknown"]),
            ),
            (
                "L0PHT",
                GroupTheme::new("🔐", "L0pht Heavy Industries", "1992-2000")
                    .with_description("Created L0phtCrack and testified to Congress in 1998")
                    .with_members(["Brian Oblivion", "Count Zero", "Dildog", "Kingpin", "Silicosis"]),
            ),
        ];

        roster
            .into_iter()
            .map(|(key, theme)| (key.to_string(), theme))
            .collect()
    }

    /// Parse a registry from a JSON object of `key → theme`.
    pub fn from_json_str(json: &str) -> Result<Self, ManuscriptError> {
        serde_json::from_str(json).map_err(|e| ManuscriptError::ThemeRegistry {
            origin: "<inline>".into(),
            detail: e.to_string(),
        })
    }

    /// Load a registry from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ManuscriptError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let json = std::fs::read_to_string(path).map_err(|e| ManuscriptError::ThemeRegistry {
            origin: origin.clone(),
            detail: e.to_string(),
        })?;
        serde_json::from_str(&json).map_err(|e| ManuscriptError::ThemeRegistry {
            origin,
            detail: e.to_string(),
        })
    }

    /// Look up a theme. Unknown keys mean "no theme".
    pub fn get(&self, key: &str) -> Option<&GroupTheme> {
        self.themes.get(key)
    }

    /// Resolve an optional key, treating `None` and unknown keys alike.
    pub fn resolve(&self, key: Option<&str>) -> Option<&GroupTheme> {
        key.and_then(|k| self.get(k))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GroupTheme)> {
        self.themes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

impl FromIterator<(String, GroupTheme)> for ThemeRegistry {
    fn from_iter<T: IntoIterator<Item = (String, GroupTheme)>>(iter: T) -> Self {
        Self {
            themes: iter.into_iter().collect(),
        }
    }
}
