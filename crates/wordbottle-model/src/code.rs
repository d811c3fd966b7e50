//! Room codes: short, human-typeable join codes.
//!
//! A code looks like `GAME-7QX2`: a constant tag, a dash, and four
//! characters from a fixed alphabet. The alphabet skips the characters
//! people misread over a shoulder (`I`/`1`, `O`/`0`). This is casual
//! collision avoidance for a party game, not a security boundary.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Constant prefix on every room code.
pub const CODE_TAG: &str = "GAME";

/// Characters a code suffix is drawn from.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Length of the random suffix after the tag.
const CODE_SUFFIX_LEN: usize = 4;

/// A unique identifier for a room.
///
/// Stored and serialized as the full tagged string (`GAME-7QX2`), so the
/// persisted record stays readable and codes can be pasted verbatim into
/// a join form. Parsing is case-insensitive; the canonical form is upper
/// case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Draws a fresh random code.
    ///
    /// Uniqueness is the caller's problem — the store retries on the
    /// (unlikely) collision with an existing room.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let suffix: String = (0..CODE_SUFFIX_LEN)
            .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
            .collect();
        Self(format!("{CODE_TAG}-{suffix}"))
    }

    /// The full code string, e.g. `GAME-7QX2`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The code failed to parse.
#[derive(Debug, thiserror::Error)]
#[error("invalid room code: {0:?}")]
pub struct CodeParseError(pub String);

impl FromStr for RoomCode {
    type Err = CodeParseError;

    /// Parses a code as typed by a player: surrounding whitespace and
    /// letter case are forgiven, the shape is not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = s.trim().to_ascii_uppercase();
        let suffix = canonical
            .strip_prefix(CODE_TAG)
            .and_then(|rest| rest.strip_prefix('-'))
            .ok_or_else(|| CodeParseError(s.to_owned()))?;
        let valid = suffix.len() == CODE_SUFFIX_LEN
            && suffix.bytes().all(|b| CODE_ALPHABET.contains(&b));
        if !valid {
            return Err(CodeParseError(s.to_owned()));
        }
        Ok(Self(canonical))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_has_tag_and_length() {
        let code = RoomCode::generate();
        let s = code.as_str();
        assert!(s.starts_with("GAME-"), "got {s}");
        assert_eq!(s.len(), CODE_TAG.len() + 1 + CODE_SUFFIX_LEN);
    }

    #[test]
    fn test_generated_code_round_trips_through_parse() {
        let code = RoomCode::generate();
        let parsed: RoomCode = code.as_str().parse().unwrap();
        assert_eq!(parsed, code);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let parsed: RoomCode = "game-abcd".parse().unwrap();
        assert_eq!(parsed.as_str(), "GAME-ABCD");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let parsed: RoomCode = "  GAME-WXYZ  ".parse().unwrap();
        assert_eq!(parsed.as_str(), "GAME-WXYZ");
    }

    #[test]
    fn test_parse_rejects_wrong_tag() {
        assert!("ROOM-ABCD".parse::<RoomCode>().is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_suffix_length() {
        assert!("GAME-ABC".parse::<RoomCode>().is_err());
        assert!("GAME-ABCDE".parse::<RoomCode>().is_err());
    }

    #[test]
    fn test_parse_rejects_ambiguous_characters() {
        // 0, 1, I and O are not in the alphabet.
        assert!("GAME-AB01".parse::<RoomCode>().is_err());
        assert!("GAME-IOIO".parse::<RoomCode>().is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let code: RoomCode = "GAME-ABCD".parse().unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"GAME-ABCD\"");
    }
}
