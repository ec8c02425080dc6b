use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// How a caller names a profile.
///
/// Parsing tries an integer index first, then a UUID, and falls back to an
/// exact display name. Negative indices parse and are rejected at lookup.
/// A `name:` or `id:` prefix forces the kind, so a profile named `2024`
/// is reachable as `name:2024`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSelector {
    Index(i64),
    Id(Uuid),
    Name(String),
}

impl FromStr for ProfileSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(name) = s.strip_prefix("name:") {
            return Ok(Self::Name(name.to_string()));
        }
        if let Some(id) = s.strip_prefix("id:").and_then(|id| Uuid::parse_str(id).ok()) {
            return Ok(Self::Id(id));
        }
        if let Ok(index) = s.parse::<i64>() {
            return Ok(Self::Index(index));
        }
        if let Ok(id) = Uuid::parse_str(s) {
            return Ok(Self::Id(id));
        }
        Ok(Self::Name(s.to_string()))
    }
}

impl From<usize> for ProfileSelector {
    fn from(index: usize) -> Self {
        Self::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for ProfileSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{}", index),
            Self::Id(id) => write!(f, "{}", id),
            Self::Name(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_indices_including_negative() {
        assert_eq!("0".parse::<ProfileSelector>().unwrap(), ProfileSelector::Index(0));
        assert_eq!("-1".parse::<ProfileSelector>().unwrap(), ProfileSelector::Index(-1));
    }

    #[test]
    fn parses_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(
            id.to_string().parse::<ProfileSelector>().unwrap(),
            ProfileSelector::Id(id)
        );
    }

    #[test]
    fn name_prefix_wins_over_index_and_uuid() {
        assert_eq!(
            "name:2024".parse::<ProfileSelector>().unwrap(),
            ProfileSelector::Name("2024".to_string())
        );
        let id = Uuid::new_v4();
        assert_eq!(
            format!("name:{}", id).parse::<ProfileSelector>().unwrap(),
            ProfileSelector::Name(id.to_string())
        );
        assert_eq!(
            format!("id:{}", id).parse::<ProfileSelector>().unwrap(),
            ProfileSelector::Id(id)
        );
    }

    #[test]
    fn everything_else_is_a_name() {
        assert_eq!(
            "prod".parse::<ProfileSelector>().unwrap(),
            ProfileSelector::Name("prod".to_string())
        );
    }
}
