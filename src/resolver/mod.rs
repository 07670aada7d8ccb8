mod client;
mod escalation;
mod models;
mod resolver_error;

pub use client::GurasClient;
pub use escalation::{ConsolePrompt, EscalationDecision, FailureEscalation, FixedPolicy};
pub use models::{AddressAttributes, LotAttributes};
pub use resolver_error::ResolverError;

use crate::domain::models::{LotIdentifierMatch, ResolvedAddress};

/// Two-stage lookup against the external cadastral address service:
/// composite lot strings resolve to property identifiers, property
/// identifiers resolve to canonical (principal) address records.
pub trait AddressResolver {
    fn resolve_lot_identifiers(
        &self,
        lot_keys: &[String],
    ) -> Result<Vec<LotIdentifierMatch>, ResolverError>;

    fn resolve_addresses(&self, prop_ids: &[i64]) -> Result<Vec<ResolvedAddress>, ResolverError>;
}
