use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{
    str::FromStr,
    sync::{LazyLock, Mutex},
};
use ulid::Ulid;

///
/// GENERATOR is lazily initiated with a Mutex
/// it has to keep state so that key order stays monotonic
///

static GENERATOR: LazyLock<Mutex<Generator>> = LazyLock::new(|| Mutex::new(Generator::default()));

///
/// Id
///
/// Unique identifier column value for every entity record (ULID). Descending
/// id order is a stable recency order, which makes it the universal
/// pagination tie-break key.
///

#[derive(
    Clone, Copy, Debug, Default, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
    Deserialize,
)]
#[display("{_0}")]
#[serde(transparent)]
pub struct Id(Ulid);

impl Id {
    /// Generate a new id from the global monotonic generator.
    #[must_use]
    pub fn generate() -> Self {
        let mut generator = GENERATOR.lock().expect("id generator mutex poisoned");

        generator.generate()
    }

    #[must_use]
    pub const fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    #[must_use]
    pub const fn ulid(self) -> Ulid {
        self.0
    }
}

impl FromStr for Id {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s).map(Self)
    }
}

impl From<Ulid> for Id {
    fn from(ulid: Ulid) -> Self {
        Self(ulid)
    }
}

///
/// Generator
///
/// Monotonic ULID generation; increments within the same millisecond so that
/// ids minted back-to-back still sort in creation order.
///

#[derive(Default)]
struct Generator {
    previous: Ulid,
}

impl Generator {
    fn generate(&mut self) -> Id {
        let next = Ulid::new();

        // same millisecond, or time went backward: increment instead of
        // taking the fresh random so the sequence stays monotonic
        let ulid = if next <= self.previous {
            self.previous.increment().unwrap_or(next)
        } else {
            next
        };
        self.previous = ulid;

        Id(ulid)
    }
}

///
/// TESTS
///
