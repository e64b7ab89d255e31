//! The person record recovered from the CSV sources.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::color::Color;

/// One structured record recovered from the flat-file sources.
///
/// A `Person` is an immutable snapshot of a successfully parsed entry.
/// Its `id` is assigned by accepted-parse order across the full source
/// set (1, 2, 3, ...), so it is stable only until the next reload;
/// entries that fail validation do not consume an id.
///
/// Identity is the id alone: two `Person`s are equal iff their ids are
/// equal, regardless of field content.
#[derive(Debug, Clone)]
pub struct Person {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub zipcode: String,
    pub city: String,
    pub color: Color,
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {}, {} {}, {}",
            self.id, self.first_name, self.last_name, self.zipcode, self.city, self.color
        )
    }
}
