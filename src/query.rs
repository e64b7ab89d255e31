//! Sort and pagination vocabulary for repository queries.
//!
//! Sorting follows the repository's historical multi-pass semantics:
//! each [`SortOrder`] in a request is applied as one stable sorting
//! pass, in the order given. Because every pass is stable, the LAST
//! criterion ends up as the dominant key and earlier criteria only
//! break its ties. Callers relying on conventional primary-key-first
//! ordering must reverse their criteria list.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::person::Person;

/// The person fields a query may sort on.
///
/// Comparison rules per field: `Id` compares numerically, `Zipcode`
/// compares on the raw digit string, the name-like fields compare
/// case-insensitively, and `Color` compares on the German display name
/// rather than the numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    FirstName,
    LastName,
    Zipcode,
    City,
    Color,
}

impl SortField {
    /// Compare two persons on this field, ascending.
    pub fn compare(self, a: &Person, b: &Person) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::FirstName => compare_ignore_case(&a.first_name, &b.first_name),
            SortField::LastName => compare_ignore_case(&a.last_name, &b.last_name),
            SortField::Zipcode => a.zipcode.cmp(&b.zipcode),
            SortField::City => compare_ignore_case(&a.city, &b.city),
            SortField::Color => compare_ignore_case(a.color.name(), b.color.name()),
        }
    }
}

fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(SortField::Id),
            "firstname" => Ok(SortField::FirstName),
            "lastname" => Ok(SortField::LastName),
            "zipcode" => Ok(SortField::Zipcode),
            "city" => Ok(SortField::City),
            "color" => Ok(SortField::Color),
            other => Err(format!("unknown sort field '{other}'")),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// One sort criterion: a field and a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(field: SortField) -> Self {
        SortOrder { field, direction: Direction::Asc }
    }

    pub fn desc(field: SortField) -> Self {
        SortOrder { field, direction: Direction::Desc }
    }

    /// Compare two persons under this criterion.
    pub fn compare(&self, a: &Person, b: &Person) -> Ordering {
        let ordering = self.field.compare(a, b);
        match self.direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    /// Parse `field` or `field:asc` / `field:desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(':') {
            None => (s, Direction::Asc),
            Some((field, "asc")) => (field, Direction::Asc),
            Some((field, "desc")) => (field, Direction::Desc),
            Some((_, other)) => return Err(format!("unknown sort direction '{other}'")),
        };
        Ok(SortOrder { field: field.parse()?, direction })
    }
}

/// A zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Self {
        PageRequest { page, size }
    }
}

/// One page of query results.
///
/// `total` counts the whole filtered sequence before paging, so callers
/// can derive the page count even when `items` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<Person>,
    pub total: usize,
}

impl Page {
    /// Slice one page out of a fully filtered-and-sorted sequence.
    pub fn slice(persons: Vec<Person>, request: PageRequest) -> Page {
        let total = persons.len();
        let start = request.page.saturating_mul(request.size).min(total);
        let end = start.saturating_add(request.size).min(total);
        Page {
            items: persons[start..end].to_vec(),
            total,
        }
    }
}
