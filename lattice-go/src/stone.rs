use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;
use std::ops::Neg;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(i8)]
pub enum Stone {
    Blue = 1,
    Red = -1,
}

impl Stone {
    pub fn from_int(v: i8) -> Option<Self> {
        match v.signum() {
            1 => Some(Stone::Blue),
            -1 => Some(Stone::Red),
            _ => None,
        }
    }

    pub fn to_int(self) -> i8 {
        self as i8
    }

    pub fn opp(self) -> Self {
        match self {
            Stone::Blue => Stone::Red,
            Stone::Red => Stone::Blue,
        }
    }
}

impl Neg for Stone {
    type Output = Self;

    fn neg(self) -> Self {
        self.opp()
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stone::Blue => write!(f, "Blue"),
            Stone::Red => write!(f, "Red"),
        }
    }
}

impl std::str::FromStr for Stone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blue" => Ok(Stone::Blue),
            "red" => Ok(Stone::Red),
            _ => Err(format!("unknown stone color: {s}")),
        }
    }
}

/// Territory label for an empty node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Owner {
    Blue,
    Red,
    Neutral,
}

impl From<Stone> for Owner {
    fn from(stone: Stone) -> Self {
        match stone {
            Stone::Blue => Owner::Blue,
            Stone::Red => Owner::Red,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_int_normalizes() {
        assert_eq!(Stone::from_int(1), Some(Stone::Blue));
        assert_eq!(Stone::from_int(7), Some(Stone::Blue));
        assert_eq!(Stone::from_int(-1), Some(Stone::Red));
        assert_eq!(Stone::from_int(-7), Some(Stone::Red));
        assert_eq!(Stone::from_int(0), None);
    }

    #[test]
    fn opponent() {
        assert_eq!(Stone::Blue.opp(), Stone::Red);
        assert_eq!(-Stone::Red, Stone::Blue);
    }

    #[test]
    fn parses_lowercase_names() {
        assert_eq!("blue".parse::<Stone>(), Ok(Stone::Blue));
        assert_eq!("red".parse::<Stone>(), Ok(Stone::Red));
        assert!("gray".parse::<Stone>().is_err());
    }

    #[test]
    fn serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Stone::Red).unwrap(), "-1");
        assert_eq!(serde_json::to_string(&Owner::Neutral).unwrap(), "\"neutral\"");
    }

    #[test]
    fn owner_from_stone() {
        assert_eq!(Owner::from(Stone::Blue), Owner::Blue);
        assert_eq!(Owner::from(Stone::Red), Owner::Red);
    }
}
