//! Actor visibility filters built from a trial roster.

use trialstore_types::{ActorDescriptor, ActorIndex};

use crate::error::ProjectionError;
use crate::matcher::{MatchMode, Matcher};

/// Roster indices visible to a consumer.
///
/// `Unrestricted` is the identity of the name/class/implementation
/// conjunction and is never materialized as a full set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActorFilter {
    #[default]
    Unrestricted,
    Restricted(ActorSet),
}

/// Visibility bitmap over a roster of fixed length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorSet {
    visible: Box<[bool]>,
}

impl ActorSet {
    /// Number of actors in the roster the set was built from
    pub fn roster_len(&self) -> usize {
        self.visible.len()
    }

    /// Visibility of `actor`, or `None` when it is outside the roster
    pub fn get(&self, actor: ActorIndex) -> Option<bool> {
        self.visible.get(actor as usize).copied()
    }

    pub fn indices(&self) -> impl Iterator<Item = ActorIndex> + '_ {
        self.visible
            .iter()
            .enumerate()
            .filter(|(_, visible)| **visible)
            .map(|(index, _)| index as ActorIndex)
    }

    pub fn len(&self) -> usize {
        self.visible.iter().filter(|visible| **visible).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ActorFilter {
    /// Combine three matchers over `roster`.
    ///
    /// An actor is visible when its name, class and implementation all match.
    pub fn build(
        names: &Matcher,
        classes: &Matcher,
        implementations: &Matcher,
        roster: &[ActorDescriptor],
    ) -> Self {
        if names.is_unrestricted() && classes.is_unrestricted() && implementations.is_unrestricted()
        {
            return ActorFilter::Unrestricted;
        }

        let visible = roster
            .iter()
            .map(|actor| {
                names.matches(&actor.name)
                    && classes.matches(&actor.actor_class)
                    && implementations.matches(&actor.implementation)
            })
            .collect();

        ActorFilter::Restricted(ActorSet { visible })
    }

    /// Build matchers from raw pattern lists, then the filter
    pub fn from_patterns<S: AsRef<str>>(
        names: &[S],
        classes: &[S],
        implementations: &[S],
        roster: &[ActorDescriptor],
        mode: MatchMode,
    ) -> Self {
        let matcher = |patterns: &[S]| {
            Matcher::with_mode(patterns.iter().map(|p| p.as_ref().to_string()), mode)
        };
        Self::build(
            &matcher(names),
            &matcher(classes),
            &matcher(implementations),
            roster,
        )
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, ActorFilter::Unrestricted)
    }

    /// Whether steps reported by `actor` survive this filter
    pub fn includes(&self, actor: ActorIndex) -> Result<bool, ProjectionError> {
        match self {
            ActorFilter::Unrestricted => Ok(true),
            ActorFilter::Restricted(set) => {
                set.get(actor).ok_or(ProjectionError::UnknownActor {
                    actor,
                    roster_len: set.roster_len(),
                })
            }
        }
    }
}
