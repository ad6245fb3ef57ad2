//! Projection of trial samples through actor and field filters.
//!
//! Projection runs in two phases:
//!
//! 1. **Structural filtering** keeps the steps of visible actors, in order,
//!    and clears every field category the field filter leaves out.
//! 2. **Payload liveness** marks every payload index still referenced by a
//!    surviving step, then copies the payload table with unmarked slots
//!    emptied.
//!
//! The mark pass runs once over all surviving steps because slots are shared
//! between steps (an observation seen by several actors, a reward's user data
//! present on both the sender and receiver side). Table length and positions
//! never change, so index `k` means the same thing before and after.

use tracing::{debug, warn};
use trialstore_types::{ActorStepSample, SampleField, TrialSample};

use crate::actor_filter::ActorFilter;
use crate::error::ProjectionError;
use crate::field_filter::FieldFilter;

/// Counts describing what a projection removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectionReport {
    pub steps_kept: usize,
    pub steps_dropped: usize,
    /// Non-empty payload slots in the output
    pub payloads_live: usize,
    /// Slots that held content in the input and are empty in the output
    pub payloads_truncated: usize,
    pub bytes_released: usize,
}

impl ProjectionReport {
    /// True when the projection changed nothing
    pub fn is_identity(&self) -> bool {
        self.steps_dropped == 0 && self.payloads_truncated == 0
    }
}

/// Project `sample` through both filters.
///
/// The input is never modified; the result shares no data with it.
pub fn project(
    sample: &TrialSample,
    actors: &ActorFilter,
    fields: &FieldFilter,
) -> Result<TrialSample, ProjectionError> {
    project_with_report(sample, actors, fields).map(|(projected, _)| projected)
}

/// Like [`project`], also returning what was removed
pub fn project_with_report(
    sample: &TrialSample,
    actors: &ActorFilter,
    fields: &FieldFilter,
) -> Result<(TrialSample, ProjectionReport), ProjectionError> {
    let result = project_inner(sample, actors, fields);
    match &result {
        Ok((_, report)) => debug!(
            trial_id = %sample.trial_id,
            tick = sample.tick,
            steps_kept = report.steps_kept,
            steps_dropped = report.steps_dropped,
            payloads_truncated = report.payloads_truncated,
            "projected sample"
        ),
        Err(err) => warn!(
            trial_id = %sample.trial_id,
            tick = sample.tick,
            error = %err,
            "malformed trial sample"
        ),
    }
    result
}

fn project_inner(
    sample: &TrialSample,
    actors: &ActorFilter,
    fields: &FieldFilter,
) -> Result<(TrialSample, ProjectionReport), ProjectionError> {
    let mut report = ProjectionReport::default();
    let table_len = sample.payloads.len();

    // Dangling references are corruption even when the filters would drop them
    check_references(&sample.actor_samples, table_len)?;

    // Phase A: structural filtering
    let mut actor_samples = Vec::with_capacity(sample.actor_samples.len());
    for step in &sample.actor_samples {
        if actors.includes(step.actor)? {
            actor_samples.push(retain_fields(step, fields));
        } else {
            report.steps_dropped += 1;
        }
    }
    report.steps_kept = actor_samples.len();

    // Phase B: payload liveness over every surviving step. Slots that
    // nothing references are only reclaimed once some filter is restrictive.
    let live = mark_live_payloads(&actor_samples, table_len);
    let passthrough = actors.is_unrestricted() && fields.is_unrestricted();

    let mut payloads = Vec::with_capacity(table_len);
    for (payload, is_live) in sample.payloads.iter().zip(live) {
        if is_live || passthrough {
            if !payload.is_empty() {
                report.payloads_live += 1;
            }
            payloads.push(payload.clone());
        } else {
            if !payload.is_empty() {
                report.payloads_truncated += 1;
                report.bytes_released += payload.len();
            }
            payloads.push(Vec::new());
        }
    }

    let projected = TrialSample {
        user_id: sample.user_id.clone(),
        trial_id: sample.trial_id.clone(),
        tick: sample.tick,
        timestamp: sample.timestamp,
        actor_samples,
        payloads,
    };

    Ok((projected, report))
}

/// Copy of `step` with the excluded field categories cleared
fn retain_fields(step: &ActorStepSample, fields: &FieldFilter) -> ActorStepSample {
    if fields.is_unrestricted() {
        return step.clone();
    }

    let keep = |field| fields.includes(field);

    ActorStepSample {
        actor: step.actor,
        observation: step.observation.filter(|_| keep(SampleField::Observation)),
        action: step.action.filter(|_| keep(SampleField::Action)),
        reward: step.reward.filter(|_| keep(SampleField::Reward)),
        received_rewards: kept(keep(SampleField::ReceivedRewards), &step.received_rewards),
        sent_rewards: kept(keep(SampleField::SentRewards), &step.sent_rewards),
        received_messages: kept(keep(SampleField::ReceivedMessages), &step.received_messages),
        sent_messages: kept(keep(SampleField::SentMessages), &step.sent_messages),
    }
}

fn kept<T: Clone>(keep: bool, entries: &[T]) -> Vec<T> {
    if keep {
        entries.to_vec()
    } else {
        Vec::new()
    }
}

/// Bounds check over every reference of every step, kept or not
fn check_references(steps: &[ActorStepSample], table_len: usize) -> Result<(), ProjectionError> {
    for step in steps {
        if let Some(reference) = step.payload_refs().find(|r| r.index() >= table_len) {
            return Err(ProjectionError::PayloadOutOfRange {
                actor: step.actor,
                reference: reference.0,
                table_len,
            });
        }
    }
    Ok(())
}

/// Mark phase: one flag per table slot, set when any surviving reference hits it
fn mark_live_payloads(steps: &[ActorStepSample], table_len: usize) -> Vec<bool> {
    let mut live = vec![false; table_len];
    for reference in steps.iter().flat_map(|step| step.payload_refs()) {
        if let Some(slot) = live.get_mut(reference.index()) {
            *slot = true;
        }
    }
    live
}
