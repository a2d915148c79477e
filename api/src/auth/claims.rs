use serde::{Deserialize, Serialize};
use util::capability::Actor;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
    pub admin: bool,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The caller as seen by capability checks.
    pub fn actor(&self) -> Actor {
        Actor {
            id: self.0.sub,
            admin: self.0.admin,
        }
    }
}
