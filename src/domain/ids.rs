//! Identifiers and id generation.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

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

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// Section identifier, unique across the board
    SectionId
);
string_id!(
    /// Task identifier, unique across every section
    TaskId
);
string_id!(
    /// Column/field identifier
    FieldId
);
string_id!(ProjectId);
string_id!(CollaboratorId);

/// Source of process-unique identifiers.
///
/// Ids only need to be unique for the lifetime of the process; nothing is persisted.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> String;
}

/// Monotonic counter ids (`{prefix}{n}`), deterministic across runs
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("id-")
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, n)
    }
}

/// Random v4 UUID ids
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Retries before falling back to suffixing
const FRESH_ID_ATTEMPTS: usize = 16;

/// Draw an id that `taken` does not already claim.
///
/// A misbehaving source that keeps repeating itself still terminates: after a
/// few draws the last candidate gets a numeric suffix until it is free.
pub fn fresh_id(ids: &dyn IdSource, taken: impl Fn(&str) -> bool) -> String {
    let mut candidate = ids.next_id();
    for _ in 0..FRESH_ID_ATTEMPTS {
        if !taken(&candidate) {
            return candidate;
        }
        candidate = ids.next_id();
    }

    let base = candidate;
    let mut n = 1u64;
    loop {
        let suffixed = format!("{}-{}", base, n);
        if !taken(&suffixed) {
            return suffixed;
        }
        n += 1;
    }
}
