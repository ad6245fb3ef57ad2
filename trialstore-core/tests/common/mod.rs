//! Shared fixtures: a two-actor trial with a six-entry payload table.

#![allow(dead_code)]

use trialstore_types::{
    ActorDescriptor, ActorPeer, ActorStepSample, EnvironmentParams, PayloadRef, SampleMessage,
    SampleReward, TrialParams, TrialSample,
};

pub fn trial_params() -> TrialParams {
    TrialParams {
        trial_config: b"a trial config".to_vec(),
        max_steps: 12,
        max_inactivity: 600,
        environment: Some(EnvironmentParams {
            endpoint: "grpc://environment:9000".into(),
            implementation: "my-environment-implementation".into(),
            config: b"an environment config".to_vec(),
        }),
        actors: vec![
            ActorDescriptor {
                name: "my-actor-1".into(),
                actor_class: "my-actor-class-1".into(),
                implementation: "my-actor-implementation".into(),
                endpoint: "grpc://actor:9000".into(),
                config: b"an actor config".to_vec(),
            },
            ActorDescriptor {
                name: "my-actor-2".into(),
                actor_class: "my-actor-class-2".into(),
                implementation: "my-actor-implementation".into(),
                endpoint: "grpc://actor:9000".into(),
                config: b"another actor config".to_vec(),
            },
        ],
    }
}

pub fn trial_sample() -> TrialSample {
    TrialSample {
        user_id: "my-user-id".into(),
        trial_id: "my-trial".into(),
        tick: 12,
        timestamp: 1_634_567_890,
        actor_samples: vec![
            ActorStepSample {
                actor: 0,
                observation: Some(PayloadRef(0)),
                action: Some(PayloadRef(1)),
                reward: Some(0.5),
                received_rewards: vec![
                    SampleReward {
                        peer: ActorPeer::Environment,
                        value: 0.5,
                        confidence: 1.0,
                        user_data: None,
                    },
                    SampleReward {
                        peer: ActorPeer::Actor(1),
                        value: 0.5,
                        confidence: 0.2,
                        user_data: Some(PayloadRef(2)),
                    },
                ],
                ..Default::default()
            },
            ActorStepSample {
                actor: 1,
                observation: Some(PayloadRef(0)),
                action: Some(PayloadRef(3)),
                sent_rewards: vec![SampleReward {
                    peer: ActorPeer::Actor(0),
                    value: 0.5,
                    confidence: 0.2,
                    user_data: Some(PayloadRef(2)),
                }],
                received_messages: vec![SampleMessage {
                    peer: ActorPeer::Environment,
                    payload: PayloadRef(4),
                }],
                sent_messages: vec![SampleMessage {
                    peer: ActorPeer::Environment,
                    payload: PayloadRef(5),
                }],
                ..Default::default()
            },
        ],
        payloads: vec![
            b"an observation".to_vec(),
            b"an action".to_vec(),
            b"a reward user data".to_vec(),
            b"another action".to_vec(),
            b"a message payload".to_vec(),
            b"another message payload".to_vec(),
        ],
    }
}

/// Serialized size used for size comparisons
pub fn encoded_size(sample: &TrialSample) -> usize {
    serde_json::to_vec(sample)
        .expect("trial samples always serialize")
        .len()
}
