//! Capability checks backed by the `user_permissions` table.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use util::capability::{Actor, Capability, CapabilityCheck};

use crate::models::user_permission;

/// Looks grants up in the database on every check. Admins bypass the lookup.
#[derive(Debug, Clone)]
pub struct DbCapabilities {
    db: DatabaseConnection,
}

impl DbCapabilities {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CapabilityCheck for DbCapabilities {
    async fn has_capability(&self, actor: &Actor, capability: Capability) -> bool {
        if actor.admin {
            return true;
        }

        match user_permission::Model::user_has(&self.db, actor.id, capability.as_str()).await {
            Ok(granted) => granted,
            Err(err) => {
                tracing::warn!(
                    actor_id = actor.id,
                    capability = %capability,
                    error = %err,
                    "Capability lookup failed, denying"
                );
                false
            }
        }
    }
}
