use crate::types::{ArtRecord, HotspotRecord};
use std::collections::BTreeSet;

pub const ALL: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Value(String),
}

impl Selection {
    /// Absent, empty and `"All"` all mean no constraint.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") | Some(ALL) => Selection::All,
            Some(value) => Selection::Value(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Value(v) => v,
        }
    }

    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Value(v) => v == candidate,
        }
    }
}

/// A record type whose fields can be filtered by exact string equality.
pub trait Filterable {
    type Field: Copy;

    fn field(&self, field: Self::Field) -> &str;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Criterion<F> {
    pub field: F,
    pub value: Selection,
}

impl<F> Criterion<F> {
    pub fn new(field: F, value: Selection) -> Self {
        Self { field, value }
    }
}

/// Returns the records satisfying every criterion, in their original order.
pub fn filter<R>(records: &[R], criteria: &[Criterion<R::Field>]) -> Vec<R>
where
    R: Filterable + Clone,
{
    records
        .iter()
        .filter(|record| criteria.iter().all(|c| c.value.matches(record.field(c.field))))
        .cloned()
        .collect()
}

/// Distinct values of `field`, sorted ascending.
pub fn distinct_values<R: Filterable>(records: &[R], field: R::Field) -> Vec<String> {
    records
        .iter()
        .map(|r| r.field(field))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Choices for a single-select control: `All` followed by the distinct values.
pub fn selector_options<R: Filterable>(records: &[R], field: R::Field) -> Vec<String> {
    std::iter::once(ALL.to_string())
        .chain(distinct_values(records, field))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtField {
    Region,
    Type,
}

impl Filterable for ArtRecord {
    type Field = ArtField;

    fn field(&self, field: ArtField) -> &str {
        match field {
            ArtField::Region => &self.region,
            ArtField::Type => self.kind.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotspotField {
    State,
    Type,
}

impl Filterable for HotspotRecord {
    type Field = HotspotField;

    fn field(&self, field: HotspotField) -> &str {
        match field {
            HotspotField::State => &self.state,
            HotspotField::Type => &self.kind,
        }
    }
}
