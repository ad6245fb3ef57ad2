//! Subscriptions: filters built once per request, applied to every sample.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use trialstore_types::{ActorDescriptor, TrialSample};

use crate::actor_filter::ActorFilter;
use crate::error::{Error, FilterError, ProjectionError, Result};
use crate::field_filter::FieldFilter;
use crate::matcher::MatchMode;
use crate::metrics::ProjectionMetrics;
use crate::projection::project_with_report;
use crate::store::{RosterSupplier, SampleSource};

/// Decoded filter request from a query client.
///
/// Every list may be empty, meaning no restriction along that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub actor_names: Vec<String>,
    #[serde(default)]
    pub actor_classes: Vec<String>,
    #[serde(default)]
    pub actor_implementations: Vec<String>,
    #[serde(default)]
    pub fields: Vec<String>,
}

/// An actor filter and field filter pair with its metrics.
///
/// Cloning shares the metrics.
#[derive(Debug, Clone)]
pub struct Subscription {
    actors: ActorFilter,
    fields: FieldFilter,
    metrics: Arc<ProjectionMetrics>,
}

impl Subscription {
    /// Build both filters from `request` against `roster`.
    ///
    /// Unknown field identifiers are rejected here, before any sample is read.
    pub fn new(
        request: &FilterRequest,
        roster: &[ActorDescriptor],
        mode: MatchMode,
    ) -> std::result::Result<Self, FilterError> {
        let fields = FieldFilter::parse(&request.fields)?;
        let actors = ActorFilter::from_patterns(
            &request.actor_names,
            &request.actor_classes,
            &request.actor_implementations,
            roster,
            mode,
        );

        info!(
            actors = ?actors,
            fields = ?fields,
            "subscription created"
        );

        Ok(Self::from_filters(actors, fields))
    }

    /// Fetch the roster of `trial_id`, then build as [`Subscription::new`]
    pub fn for_trial<R: RosterSupplier + ?Sized>(
        request: &FilterRequest,
        supplier: &R,
        trial_id: &str,
        mode: MatchMode,
    ) -> Result<Self> {
        let roster = supplier.roster(trial_id)?;
        Ok(Self::new(request, &roster, mode)?)
    }

    pub fn from_filters(actors: ActorFilter, fields: FieldFilter) -> Self {
        Self {
            actors,
            fields,
            metrics: Arc::new(ProjectionMetrics::new()),
        }
    }

    pub fn actor_filter(&self) -> &ActorFilter {
        &self.actors
    }

    pub fn field_filter(&self) -> &FieldFilter {
        &self.fields
    }

    pub fn metrics(&self) -> &ProjectionMetrics {
        &self.metrics
    }

    /// Project one sample and record the outcome
    pub fn project(
        &self,
        sample: &TrialSample,
    ) -> std::result::Result<TrialSample, ProjectionError> {
        let started = Instant::now();
        match project_with_report(sample, &self.actors, &self.fields) {
            Ok((projected, report)) => {
                self.metrics.record(&report, started.elapsed());
                Ok(projected)
            }
            Err(err) => {
                self.metrics.record_failure();
                Err(err)
            }
        }
    }

    /// Projected samples of `trial_id`, in tick order
    pub fn stream<'a, S: SampleSource + ?Sized>(
        &'a self,
        source: &S,
        trial_id: &str,
    ) -> Result<FilteredSamples<'a>> {
        let samples = source.samples(trial_id)?;
        Ok(FilteredSamples {
            subscription: self,
            samples: samples.into_iter(),
        })
    }
}

/// Iterator returned by [`Subscription::stream`].
///
/// A malformed sample is yielded as an error; iteration may continue past it.
#[derive(Debug)]
pub struct FilteredSamples<'a> {
    subscription: &'a Subscription,
    samples: std::vec::IntoIter<Arc<TrialSample>>,
}

impl Iterator for FilteredSamples<'_> {
    type Item = Result<TrialSample>;

    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.samples.next()?;
        Some(self.subscription.project(&sample).map_err(Error::from))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.samples.size_hint()
    }
}

impl ExactSizeIterator for FilteredSamples<'_> {}
