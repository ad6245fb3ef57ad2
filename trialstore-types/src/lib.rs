//! Shared types for trialstore
//!
//! This crate provides the data model used across the trialstore workspace:
//! trial parameters with their actor roster, and the per-tick trial samples
//! whose payloads live in a shared, index-addressed table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Position of an actor in the trial roster
pub type ActorIndex = u32;

/// Wire value used for the environment in sender/receiver slots
pub const ENVIRONMENT_PEER: i64 = -1;

/// Counterpart of a reward or message entry.
///
/// The environment is not part of the roster; it is encoded as `-1` on the
/// wire and never takes part in actor filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum ActorPeer {
    Environment,
    Actor(ActorIndex),
}

impl ActorPeer {
    pub fn is_environment(&self) -> bool {
        matches!(self, ActorPeer::Environment)
    }
}

impl TryFrom<i64> for ActorPeer {
    type Error = String;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if raw == ENVIRONMENT_PEER {
            return Ok(ActorPeer::Environment);
        }
        ActorIndex::try_from(raw)
            .map(ActorPeer::Actor)
            .map_err(|_| format!("invalid actor peer {raw}"))
    }
}

impl From<ActorPeer> for i64 {
    fn from(peer: ActorPeer) -> Self {
        match peer {
            ActorPeer::Environment => ENVIRONMENT_PEER,
            ActorPeer::Actor(index) => i64::from(index),
        }
    }
}

impl fmt::Display for ActorPeer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorPeer::Environment => write!(f, "environment"),
            ActorPeer::Actor(index) => write!(f, "actor#{index}"),
        }
    }
}

/// Index into a sample's payload table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayloadRef(pub u32);

impl PayloadRef {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for PayloadRef {
    fn from(index: u32) -> Self {
        PayloadRef(index)
    }
}

/// Static description of one roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorDescriptor {
    pub name: String,
    pub actor_class: String,
    pub implementation: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub config: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentParams {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub implementation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub config: Vec<u8>,
}

/// Parameters a trial was started with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialParams {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trial_config: Vec<u8>,
    #[serde(default)]
    pub max_steps: u32,
    #[serde(default)]
    pub max_inactivity: u32,
    #[serde(default)]
    pub environment: Option<EnvironmentParams>,
    #[serde(default)]
    pub actors: Vec<ActorDescriptor>,
}

impl TrialParams {
    /// Actor roster in index order
    pub fn roster(&self) -> &[ActorDescriptor] {
        &self.actors
    }
}

/// A reward entry attached to an actor step.
///
/// `peer` is the sender for received rewards and the receiver for sent ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleReward {
    pub peer: ActorPeer,
    pub value: f32,
    pub confidence: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<PayloadRef>,
}

/// A message entry attached to an actor step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleMessage {
    pub peer: ActorPeer,
    pub payload: PayloadRef,
}

/// Everything one actor reported during a tick
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActorStepSample {
    pub actor: ActorIndex,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<PayloadRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<PayloadRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<f32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub received_rewards: Vec<SampleReward>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sent_rewards: Vec<SampleReward>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub received_messages: Vec<SampleMessage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sent_messages: Vec<SampleMessage>,
}

impl ActorStepSample {
    pub fn new(actor: ActorIndex) -> Self {
        Self {
            actor,
            ..Default::default()
        }
    }

    /// Every payload reference held by this step, in field order
    pub fn payload_refs(&self) -> impl Iterator<Item = PayloadRef> + '_ {
        let rewards = self
            .received_rewards
            .iter()
            .chain(self.sent_rewards.iter())
            .filter_map(|reward| reward.user_data);
        let messages = self
            .received_messages
            .iter()
            .chain(self.sent_messages.iter())
            .map(|message| message.payload);

        self.observation
            .into_iter()
            .chain(self.action)
            .chain(rewards)
            .chain(messages)
    }
}

/// One tick of a trial
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrialSample {
    #[serde(default)]
    pub user_id: String,
    pub trial_id: String,
    pub tick: u64,
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default)]
    pub actor_samples: Vec<ActorStepSample>,
    #[serde(default)]
    pub payloads: Vec<Vec<u8>>,
}

impl TrialSample {
    /// Look up a payload by reference
    pub fn payload(&self, reference: PayloadRef) -> Option<&[u8]> {
        self.payloads.get(reference.index()).map(Vec::as_slice)
    }

    /// Total bytes held by the payload table
    pub fn payload_bytes(&self) -> usize {
        self.payloads.iter().map(Vec::len).sum()
    }
}

/// Field categories a consumer can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleField {
    Observation,
    Action,
    Reward,
    ReceivedRewards,
    SentRewards,
    ReceivedMessages,
    SentMessages,
}

impl SampleField {
    pub const ALL: [SampleField; 7] = [
        SampleField::Observation,
        SampleField::Action,
        SampleField::Reward,
        SampleField::ReceivedRewards,
        SampleField::SentRewards,
        SampleField::ReceivedMessages,
        SampleField::SentMessages,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SampleField::Observation => "observation",
            SampleField::Action => "action",
            SampleField::Reward => "reward",
            SampleField::ReceivedRewards => "received_rewards",
            SampleField::SentRewards => "sent_rewards",
            SampleField::ReceivedMessages => "received_messages",
            SampleField::SentMessages => "sent_messages",
        }
    }
}

impl fmt::Display for SampleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prefix of the fully-qualified field identifiers used by query clients
pub const FIELD_IDENTIFIER_PREFIX: &str = "TRIAL_SAMPLE_FIELD_";

/// Error returned when a field identifier is not recognized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sample field: {0}")]
pub struct UnknownFieldError(pub String);

impl FromStr for SampleField {
    type Err = UnknownFieldError;

    /// Accepts `action`, `ACTION` and `TRIAL_SAMPLE_FIELD_ACTION`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed
            .strip_prefix(FIELD_IDENTIFIER_PREFIX)
            .unwrap_or(trimmed)
            .to_ascii_lowercase();

        SampleField::ALL
            .into_iter()
            .find(|field| field.as_str() == bare)
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}
