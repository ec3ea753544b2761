use super::{AuthError, Caller, Capability};
use crate::common::UserId;

/// Entry point for authorization checks
pub struct Actor<'a> {
    user_id: &'a UserId,
    is_admin: bool,
}

impl<'a> Actor<'a> {
    /// `is_admin` comes from the identity provider and is trusted as-is.
    pub fn new(user_id: &'a UserId, is_admin: bool) -> Self {
        Self { user_id, is_admin }
    }

    pub fn from_caller(caller: &'a Caller) -> Self {
        Self::new(&caller.user_id, caller.is_admin)
    }

    /// Specify what capability the actor needs
    pub fn can(self, capability: Capability) -> CapabilityBuilder<'a> {
        CapabilityBuilder {
            actor: self,
            capability,
        }
    }

    /// Require the actor to be the author of a record
    pub fn owns(&self, author: &UserId, what: &str) -> Result<(), AuthError> {
        if self.user_id != author {
            return Err(AuthError::NotOwner(format!(
                "you can only modify your own {}",
                what
            )));
        }
        Ok(())
    }

    /// True when the actor holds the capability; never errors.
    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::ReviewSubmissions
            | Capability::PublishDirectly
            | Capability::ViewReviewQueue => self.is_admin,
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder<'a> {
    actor: Actor<'a>,
    capability: Capability,
}

impl CapabilityBuilder<'_> {
    /// Perform the authorization check
    pub fn check(self) -> Result<(), AuthError> {
        if !self.actor.has(self.capability) {
            return Err(AuthError::AdminRequired(self.capability));
        }
        Ok(())
    }
}
