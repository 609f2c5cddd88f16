// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> i64 {
                self.0
            }

            pub fn parse(raw: &str) -> Option<Self> {
                raw.trim().parse::<i64>().ok().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(StudyId);
entity_id!(ProgressRecordId);
entity_id!(RequestId);
entity_id!(ChapterId);
entity_id!(PageId);

#[cfg(test)]
mod tests {
    use super::StudyId;

    #[test]
    fn parse_accepts_padded_integers() {
        assert_eq!(StudyId::parse(" 42 "), Some(StudyId::new(42)));
        assert_eq!(StudyId::parse("abc"), None);
        assert_eq!(StudyId::new(7).to_string(), "7");
    }
}
