//! Field category filters.

use std::collections::BTreeSet;
use trialstore_types::SampleField;

use crate::error::FilterError;

/// Field categories kept by a projection.
///
/// Only `Unrestricted` lets a projection hand the payload table back
/// untouched. A `Restricted` set naming all seven categories keeps every
/// field but still empties slots that no surviving step references.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldFilter {
    #[default]
    Unrestricted,
    Restricted(BTreeSet<SampleField>),
}

impl FieldFilter {
    /// An empty list builds the unrestricted filter
    pub fn build<I: IntoIterator<Item = SampleField>>(fields: I) -> Self {
        let set: BTreeSet<SampleField> = fields.into_iter().collect();
        if set.is_empty() {
            FieldFilter::Unrestricted
        } else {
            FieldFilter::Restricted(set)
        }
    }

    /// Build from client-supplied identifiers, rejecting unknown ones
    pub fn parse<I, S>(identifiers: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fields = identifiers
            .into_iter()
            .map(|id| {
                id.as_ref()
                    .parse::<SampleField>()
                    .map_err(|err| FilterError::UnknownField(err.0))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::build(fields))
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, FieldFilter::Unrestricted)
    }

    pub fn includes(&self, field: SampleField) -> bool {
        match self {
            FieldFilter::Unrestricted => true,
            FieldFilter::Restricted(set) => set.contains(&field),
        }
    }
}
