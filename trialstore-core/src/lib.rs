//! # trialstore-core
//!
//! Projection engine for reinforcement-learning trial samples.
//!
//! Consumers rarely want a whole trial sample: a training pipeline may only
//! need observations and actions of one actor class, a viewer may only need
//! rewards. This crate builds reusable visibility filters and applies them to
//! samples without renumbering the shared payload table.
//!
//! ```text
//! roster ──► ActorFilter ─┐
//!                         ├─► project(sample) ─► reduced sample
//! fields ──► FieldFilter ─┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use trialstore_core::{project, ActorFilter, FieldFilter, MatchMode};
//! use trialstore_types::{ActorDescriptor, ActorStepSample, PayloadRef, SampleField, TrialSample};
//!
//! let roster = vec![ActorDescriptor {
//!     name: "pilot".into(),
//!     actor_class: "agent".into(),
//!     implementation: "ppo".into(),
//!     endpoint: String::new(),
//!     config: Vec::new(),
//! }];
//! let actors = ActorFilter::from_patterns(&["pilot"], &[], &[], &roster, MatchMode::Exact);
//! let fields = FieldFilter::build([SampleField::Action]);
//!
//! let sample = TrialSample {
//!     trial_id: "flight".into(),
//!     actor_samples: vec![ActorStepSample {
//!         observation: Some(PayloadRef(0)),
//!         action: Some(PayloadRef(1)),
//!         ..ActorStepSample::new(0)
//!     }],
//!     payloads: vec![b"altitude".to_vec(), b"climb".to_vec()],
//!     ..Default::default()
//! };
//!
//! let projected = project(&sample, &actors, &fields).unwrap();
//! assert!(projected.payloads[0].is_empty());
//! assert_eq!(projected.payloads[1], b"climb");
//! ```

pub mod actor_filter;
pub mod config;
pub mod error;
pub mod field_filter;
pub mod matcher;
pub mod metrics;
pub mod projection;
pub mod store;
pub mod subscription;

pub use actor_filter::{ActorFilter, ActorSet};
pub use config::{Config, ConfigError, OutputConfig};
pub use error::{Error, FilterError, ProjectionError, Result, StoreError};
pub use field_filter::FieldFilter;
pub use matcher::{MatchMode, Matcher};
pub use metrics::{MetricsSnapshot, ProjectionMetrics};
pub use projection::{project, project_with_report, ProjectionReport};
pub use store::{MemoryStore, RosterSupplier, SampleSource};
pub use subscription::{FilterRequest, FilteredSamples, Subscription};

// Re-export the data model
pub use trialstore_types as types;
