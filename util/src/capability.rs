//! Named capabilities and the seam used to check them.
//!
//! Handlers never resolve "the current user" from ambient state. They receive an
//! [`Actor`] from the verified token and ask the injected [`CapabilityCheck`]
//! whether that actor holds a given [`Capability`].

use async_trait::async_trait;
use std::collections::HashSet;
use std::fmt;

/// A named permission gating a write operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    CourseAdd,
    CourseEdit,
    CourseDelete,
}

impl Capability {
    /// Every capability known to the system, in seeding order.
    pub const ALL: [Capability; 3] = [
        Capability::CourseAdd,
        Capability::CourseEdit,
        Capability::CourseDelete,
    ];

    /// The name stored in the `permissions` table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::CourseAdd => "course add",
            Capability::CourseEdit => "course edit",
            Capability::CourseDelete => "course delete",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The caller a capability is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub admin: bool,
}

#[async_trait]
pub trait CapabilityCheck: Send + Sync {
    /// Returns `true` if `actor` may perform the operation named by `capability`.
    ///
    /// Implementations deny when they cannot decide.
    async fn has_capability(&self, actor: &Actor, capability: Capability) -> bool;
}

/// Fixed grant table, keyed by actor id. Admins hold everything.
#[derive(Debug, Default, Clone)]
pub struct StaticCapabilities {
    grants: HashSet<(i64, Capability)>,
}

impl StaticCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(mut self, actor_id: i64, capability: Capability) -> Self {
        self.grants.insert((actor_id, capability));
        self
    }
}

#[async_trait]
impl CapabilityCheck for StaticCapabilities {
    async fn has_capability(&self, actor: &Actor, capability: Capability) -> bool {
        actor.admin || self.grants.contains(&(actor.id, capability))
    }
}
