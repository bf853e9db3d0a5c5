//! Tags: the fixed categories describing the nature of a shift.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// What kind of shift happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Reframe,
    Surprise,
    Clarity,
    Curiosity,
    Humor,
    Calm,
    Insight,
    Other,
}

impl Tag {
    /// Every tag, in display order.
    pub const ALL: [Tag; 8] = [
        Tag::Reframe,
        Tag::Surprise,
        Tag::Clarity,
        Tag::Curiosity,
        Tag::Humor,
        Tag::Calm,
        Tag::Insight,
        Tag::Other,
    ];

    /// The tag's label, as stored in a result.
    pub fn name(self) -> &'static str {
        match self {
            Self::Reframe => "Reframe",
            Self::Surprise => "Surprise",
            Self::Clarity => "Clarity",
            Self::Curiosity => "Curiosity",
            Self::Humor => "Humor",
            Self::Calm => "Calm",
            Self::Insight => "Insight",
            Self::Other => "Other",
        }
    }

    /// A first-person hint shown next to the tag when choosing.
    pub fn helper(self) -> &'static str {
        match self {
            Self::Reframe => "I'm holding it differently now.",
            Self::Surprise => "Something I didn't expect clicked.",
            Self::Clarity => "It feels simpler or sharper.",
            Self::Curiosity => "I want to explore, not conclude.",
            Self::Humor => "It lightened; there's play here.",
            Self::Calm => "Less noise, more ease.",
            Self::Insight => "A fresh understanding landed.",
            Self::Other => "Something else; name it later.",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The input named no known tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tag: {0:?}")]
pub struct ParseTagError(pub String);

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|tag| tag.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseTagError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("clarity".parse::<Tag>().unwrap(), Tag::Clarity);
        assert_eq!("  HUMOR ".parse::<Tag>().unwrap(), Tag::Humor);
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "Joy".parse::<Tag>().unwrap_err();
        assert_eq!(err, ParseTagError("Joy".into()));
    }

    #[test]
    fn names_round_trip_through_display() {
        for tag in Tag::ALL {
            assert_eq!(tag.to_string().parse::<Tag>().unwrap(), tag);
        }
    }
}
