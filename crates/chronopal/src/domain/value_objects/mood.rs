//! Mood - How the pet currently feels

use serde::{Deserialize, Serialize};

/// Pet mood, declared in order of neglect severity.
///
/// `Ord` follows declaration order, so `Mood::Happy < Mood::Angry`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Happy,
    Content,
    Neutral,
    Grumpy,
    Angry,
}

impl Mood {
    /// Mood a pet settles into after `periods` whole neglect periods.
    ///
    /// One to three periods leave it grumpy; anything longer makes it angry.
    pub fn for_neglect(periods: i64) -> Self {
        match periods {
            i64::MIN..=0 => Mood::Happy,
            1..=3 => Mood::Grumpy,
            _ => Mood::Angry,
        }
    }

    /// The more severe of two moods
    pub fn worst(self, other: Mood) -> Mood {
        self.max(other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Content => "content",
            Mood::Neutral => "neutral",
            Mood::Grumpy => "grumpy",
            Mood::Angry => "angry",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "happy" => Ok(Mood::Happy),
            "content" => Ok(Mood::Content),
            "neutral" => Ok(Mood::Neutral),
            "grumpy" => Ok(Mood::Grumpy),
            "angry" => Ok(Mood::Angry),
            _ => Err(format!("Unknown mood: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order() {
        assert!(Mood::Happy < Mood::Content);
        assert!(Mood::Content < Mood::Neutral);
        assert!(Mood::Neutral < Mood::Grumpy);
        assert!(Mood::Grumpy < Mood::Angry);
    }

    #[test]
    fn test_for_neglect() {
        assert_eq!(Mood::for_neglect(0), Mood::Happy);
        assert_eq!(Mood::for_neglect(1), Mood::Grumpy);
        assert_eq!(Mood::for_neglect(3), Mood::Grumpy);
        assert_eq!(Mood::for_neglect(4), Mood::Angry);
        assert_eq!(Mood::for_neglect(40), Mood::Angry);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("GRUMPY".parse::<Mood>(), Ok(Mood::Grumpy));
        assert!("excited".parse::<Mood>().is_err());
    }
}
