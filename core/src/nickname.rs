use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Shortest accepted nickname, counted in characters after trimming.
pub const MIN_NICKNAME_LENGTH: usize = 2;

/// Longer nicknames are cut down to this many characters.
pub const MAX_NICKNAME_LENGTH: usize = 15;

/// Validated, trimmed player nickname held by a game session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nickname(String);

impl Nickname {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.chars().count() < MIN_NICKNAME_LENGTH {
            return Err(GameError::NicknameTooShort {
                min: MIN_NICKNAME_LENGTH,
            });
        }

        let name: String = trimmed.chars().take(MAX_NICKNAME_LENGTH).collect();
        // truncation may expose inner whitespace at the new end
        Ok(Self(String::from(name.trim_end())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Nickname {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let nick = Nickname::parse("  Ann \n").unwrap();
        assert_eq!(nick.as_str(), "Ann");
    }

    #[test]
    fn rejects_short_names_after_trimming() {
        let err = Nickname::parse("  a  ").unwrap_err();
        assert_eq!(err, GameError::NicknameTooShort { min: 2 });
        assert!(Nickname::parse("").is_err());
        assert!(Nickname::parse("   ").is_err());
    }

    #[test]
    fn accepts_two_characters() {
        assert_eq!(Nickname::parse("Bo").unwrap().as_str(), "Bo");
    }

    #[test]
    fn counts_characters_not_bytes() {
        // one multi-byte char is still too short
        assert!(Nickname::parse("é").is_err());
        assert_eq!(Nickname::parse("éé").unwrap().as_str(), "éé");
    }

    #[test]
    fn truncates_long_names() {
        let nick = Nickname::parse("Commander Shepard of the Normandy").unwrap();
        assert_eq!(nick.as_str(), "Commander Shepa");

        let nick = Nickname::parse("Commander      X").unwrap();
        assert_eq!(nick.as_str(), "Commander");
    }
}
