// Target platforms: the open set of social channels a post can be written for.
//
// Three platforms are known by name and carry their own conventions (length
// limits, card icons, prompt requirements). Anything else is kept verbatim as
// `Other` so callers can request channels we don't special-case.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Serialize, Serializer};

/// Twitter/X hard limit on post length, in characters.
pub const TWITTER_CHAR_LIMIT: usize = 280;

/// A named target channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Platform {
    LinkedIn,
    Instagram,
    Twitter,
    /// Any other channel, labelled exactly as the caller supplied it.
    Other(String),
}

impl Platform {
    /// Canonical display label.
    pub fn name(&self) -> &str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::Instagram => "Instagram",
            Platform::Twitter => "Twitter",
            Platform::Other(name) => name,
        }
    }

    /// Maximum post length for short-form platforms, if there is one.
    pub fn char_limit(&self) -> Option<usize> {
        match self {
            Platform::Twitter => Some(TWITTER_CHAR_LIMIT),
            _ => None,
        }
    }

    /// Case-insensitive comparison against a label found in model output.
    /// Aliases count, so `"X"` matches `Twitter`.
    pub fn matches(&self, label: &str) -> bool {
        match label.parse::<Platform>() {
            Ok(Platform::Other(other)) => other.to_lowercase() == self.name().to_lowercase(),
            Ok(known) => known == *self,
            Err(_) => false,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Platform::LinkedIn => "💼",
            Platform::Instagram => "📸",
            Platform::Twitter => "🐦",
            Platform::Other(_) => "📱",
        }
    }

    /// Parse a comma-separated platform list such as `"LinkedIn, twitter"`.
    ///
    /// Duplicates are dropped (first occurrence kept) so each platform is
    /// generated and extracted once.
    pub fn parse_list(list: &str) -> Result<Vec<Platform>> {
        let mut platforms: Vec<Platform> = Vec::new();
        for part in list.split(',').filter(|p| !p.trim().is_empty()) {
            let platform: Platform = part.parse()?;
            if !platforms.iter().any(|p| p.matches(platform.name())) {
                platforms.push(platform);
            }
        }
        if platforms.is_empty() {
            anyhow::bail!("No platforms given. Pass e.g. --platforms LinkedIn,Instagram");
        }
        Ok(platforms)
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            anyhow::bail!("Platform name must not be empty");
        }
        Ok(match trimmed.to_lowercase().as_str() {
            "linkedin" => Platform::LinkedIn,
            "instagram" => Platform::Instagram,
            "twitter" | "x" | "twitter/x" => Platform::Twitter,
            _ => Platform::Other(trimmed.to_string()),
        })
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Platform {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
