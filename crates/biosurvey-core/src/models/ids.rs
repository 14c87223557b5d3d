use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Wire ids arrive as JSON numbers from some operations and strings from others
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl RawId {
    fn into_text(self) -> String {
        match self {
            RawId::Int(n) => n.to_string(),
            RawId::Unsigned(n) => n.to_string(),
            RawId::Float(f) if f.fract() == 0.0 => format!("{}", f as i64),
            RawId::Float(f) => f.to_string(),
            RawId::Text(s) => s.trim().to_string(),
        }
    }
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id.to_string())
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                RawId::deserialize(deserializer).map(|raw| Self(raw.into_text()))
            }
        }
    };
}

opaque_id!(
    /// Identifier of a survey project, the join key across every search stage
    ProjectId
);

opaque_id!(
    /// Taxon identifier of a species
    TaxonId
);

/// Join ids into the comma-separated form the directory service expects
pub fn join_ids<'a, I, T>(ids: I) -> String
where
    I: IntoIterator<Item = &'a T>,
    T: fmt::Display + 'a,
{
    ids.into_iter().map(|id| id.to_string()).collect::<Vec<_>>().join(",")
}
