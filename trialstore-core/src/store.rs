//! Trial roster and sample sources.
//!
//! The projection engine only reads from these. [`MemoryStore`] is an
//! in-process implementation used by the CLI and tests.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use trialstore_types::{ActorDescriptor, TrialParams, TrialSample};

use crate::error::StoreError;

/// Supplies the ordered actor roster of a trial
pub trait RosterSupplier: Send + Sync {
    fn roster(&self, trial_id: &str) -> Result<Vec<ActorDescriptor>, StoreError>;
}

/// Supplies the samples of a trial in tick order
pub trait SampleSource: Send + Sync {
    fn samples(&self, trial_id: &str) -> Result<Vec<Arc<TrialSample>>, StoreError>;
}

#[derive(Debug)]
struct TrialRecord {
    params: Arc<TrialParams>,
    samples: Vec<Arc<TrialSample>>,
}

/// In-memory trial store
#[derive(Debug, Default)]
pub struct MemoryStore {
    trials: RwLock<HashMap<String, TrialRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trial with its parameters
    pub fn create_trial(
        &self,
        trial_id: impl Into<String>,
        params: TrialParams,
    ) -> Result<(), StoreError> {
        let trial_id = trial_id.into();
        let mut trials = self.trials.write();
        if trials.contains_key(&trial_id) {
            return Err(StoreError::DuplicateTrial(trial_id));
        }
        debug!(trial_id = %trial_id, actors = params.actors.len(), "trial created");
        trials.insert(
            trial_id,
            TrialRecord {
                params: Arc::new(params),
                samples: Vec::new(),
            },
        );
        Ok(())
    }

    /// Append a sample to the trial named by `sample.trial_id`.
    ///
    /// Ticks must be strictly increasing within a trial.
    pub fn add_sample(&self, sample: TrialSample) -> Result<(), StoreError> {
        let mut trials = self.trials.write();
        let record = trials
            .get_mut(&sample.trial_id)
            .ok_or_else(|| StoreError::UnknownTrial(sample.trial_id.clone()))?;

        if let Some(last) = record.samples.last() {
            if sample.tick <= last.tick {
                return Err(StoreError::OutOfOrderTick {
                    trial_id: sample.trial_id.clone(),
                    tick: sample.tick,
                    last_tick: last.tick,
                });
            }
        }

        record.samples.push(Arc::new(sample));
        Ok(())
    }

    pub fn params(&self, trial_id: &str) -> Result<Arc<TrialParams>, StoreError> {
        self.trials
            .read()
            .get(trial_id)
            .map(|record| record.params.clone())
            .ok_or_else(|| StoreError::UnknownTrial(trial_id.to_string()))
    }

    pub fn trial_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.trials.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Remove a trial and its samples
    pub fn delete_trial(&self, trial_id: &str) -> Result<(), StoreError> {
        self.trials
            .write()
            .remove(trial_id)
            .map(|_| ())
            .ok_or_else(|| StoreError::UnknownTrial(trial_id.to_string()))
    }
}

impl RosterSupplier for MemoryStore {
    fn roster(&self, trial_id: &str) -> Result<Vec<ActorDescriptor>, StoreError> {
        self.params(trial_id).map(|params| params.roster().to_vec())
    }
}

impl SampleSource for MemoryStore {
    fn samples(&self, trial_id: &str) -> Result<Vec<Arc<TrialSample>>, StoreError> {
        self.trials
            .read()
            .get(trial_id)
            .map(|record| record.samples.clone())
            .ok_or_else(|| StoreError::UnknownTrial(trial_id.to_string()))
    }
}
