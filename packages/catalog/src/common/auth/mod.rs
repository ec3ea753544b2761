/// Authorization for catalog operations
///
/// Callers arrive already authenticated by the external identity provider.
/// This module only decides what a caller may do:
///
/// ```rust,ignore
/// use crate::common::auth::{Actor, Capability};
///
/// Actor::from_caller(&caller)
///     .can(Capability::ReviewSubmissions)
///     .check()?;
/// ```

mod builder;
mod capability;
mod caller;
mod errors;

pub use builder::{Actor, CapabilityBuilder};
pub use caller::Caller;
pub use capability::Capability;
pub use errors::AuthError;
