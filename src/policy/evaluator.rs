//! # Policy Evaluator
//!
//! Decides whether a principal may mutate an owner-bearing resource.
//!
//! Every (operation, resource kind) pair has an ordered list of [`Rule`]s.
//! Rules are tried in order; the first one that reaches a verdict decides,
//! and a list that runs out denies with `Forbidden`.
//!
//! | Operation | Resource | Rules |
//! |---|---|---|
//! | update, delete | Property | AdminOverride, MustExist, OwnerMatches |
//! | update | Review | AdminOverride, MustExist, OwnerMatches |
//! | delete | Review | AdminOverride, MustExist, OwnerMatches, ReviewedPropertyOwnerMatches |
//!
//! A missing principal is denied as `Unauthenticated` before any rule runs.
//! Lookups happen only when a rule needs them, so an admin is allowed without
//! touching the stores, and a lookup failure is returned as an error rather
//! than being folded into a decision.

use super::lookup::{LookupError, OwnedResource, ResourceLookup, ResourceRef};
use crate::model::Principal;
use std::fmt::Display;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Property,
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Allows any admin.
    AdminOverride,
    /// Denies with `NotFound` when the target does not exist.
    MustExist,
    /// Allows the owner (for a review, its author).
    OwnerMatches,
    /// Allows the owner of the property a review is about.
    ReviewedPropertyOwnerMatches,
}

const OWNER_ONLY: &[Rule] = &[Rule::AdminOverride, Rule::MustExist, Rule::OwnerMatches];

const OWNER_OR_PROPERTY_OWNER: &[Rule] = &[
    Rule::AdminOverride,
    Rule::MustExist,
    Rule::OwnerMatches,
    Rule::ReviewedPropertyOwnerMatches,
];

/// The rule list for an operation on a kind of resource.
pub fn rules_for(operation: Operation, kind: ResourceKind) -> &'static [Rule] {
    match (operation, kind) {
        (_, ResourceKind::Property) => OWNER_ONLY,
        (Operation::Update, ResourceKind::Review) => OWNER_ONLY,
        (Operation::Delete, ResourceKind::Review) => OWNER_OR_PROPERTY_OWNER,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    Admin,
    Owner,
    PropertyOwner,
    Unauthenticated,
    NotFound,
    Forbidden,
}

impl Display for DecisionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            DecisionReason::Admin => "admin",
            DecisionReason::Owner => "owner",
            DecisionReason::PropertyOwner => "property owner",
            DecisionReason::Unauthenticated => "unauthenticated",
            DecisionReason::NotFound => "not found",
            DecisionReason::Forbidden => "forbidden",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyDecision {
    pub allowed: bool,
    pub reason: DecisionReason,
}

impl PolicyDecision {
    pub fn allow(reason: DecisionReason) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    pub fn deny(reason: DecisionReason) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }
}

impl Display for PolicyDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = if self.allowed { "allowed" } else { "denied" };
        write!(f, "{verdict} ({})", self.reason)
    }
}

pub struct PolicyEvaluator<L> {
    lookup: L,
}

impl<L: ResourceLookup> PolicyEvaluator<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    #[instrument(skip(self))]
    pub async fn evaluate(
        &self,
        principal: Option<&Principal>,
        operation: Operation,
        target: ResourceRef,
    ) -> Result<PolicyDecision, LookupError> {
        let decision = match principal {
            None => PolicyDecision::deny(DecisionReason::Unauthenticated),
            Some(principal) => self.run_rules(principal, operation, target).await?,
        };
        if decision.allowed {
            debug!(%decision, "Policy allowed");
        } else {
            warn!(%decision, "Policy denied");
        }
        Ok(decision)
    }

    async fn run_rules(
        &self,
        principal: &Principal,
        operation: Operation,
        target: ResourceRef,
    ) -> Result<PolicyDecision, LookupError> {
        // filled in by MustExist, which every table runs before the ownership rules
        let mut resource: Option<OwnedResource> = None;

        for rule in rules_for(operation, target.kind()) {
            let verdict = match rule {
                Rule::AdminOverride => principal
                    .is_admin()
                    .then(|| PolicyDecision::allow(DecisionReason::Admin)),
                Rule::MustExist => match self.lookup.find_owner_of(target).await? {
                    Some(found) => {
                        resource = Some(found);
                        None
                    }
                    None => Some(PolicyDecision::deny(DecisionReason::NotFound)),
                },
                Rule::OwnerMatches => resource
                    .as_ref()
                    .filter(|found| found.owner_id == principal.id)
                    .map(|_| PolicyDecision::allow(DecisionReason::Owner)),
                Rule::ReviewedPropertyOwnerMatches => {
                    match resource.as_ref().and_then(|found| found.property_id) {
                        Some(property_id) => self
                            .lookup
                            .find_owner_of(ResourceRef::Property(property_id))
                            .await?
                            .filter(|property| property.owner_id == principal.id)
                            .map(|_| PolicyDecision::allow(DecisionReason::PropertyOwner)),
                        None => None,
                    }
                }
            };
            if let Some(decision) = verdict {
                return Ok(decision);
            }
        }

        Ok(PolicyDecision::deny(DecisionReason::Forbidden))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PropertyId, ReviewId, Role, UserId};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct InMemoryLookup {
        owners: HashMap<ResourceRef, OwnedResource>,
        offline: bool,
        calls: AtomicUsize,
    }

    impl InMemoryLookup {
        fn property(mut self, id: u64, owner: u64) -> Self {
            let target = ResourceRef::Property(PropertyId(id));
            self.owners.insert(
                target,
                OwnedResource {
                    target,
                    owner_id: UserId(owner),
                    property_id: None,
                },
            );
            self
        }

        fn review(mut self, id: u64, author: u64, property: u64) -> Self {
            let target = ResourceRef::Review(ReviewId(id));
            self.owners.insert(
                target,
                OwnedResource {
                    target,
                    owner_id: UserId(author),
                    property_id: Some(PropertyId(property)),
                },
            );
            self
        }
    }

    #[async_trait]
    impl ResourceLookup for InMemoryLookup {
        async fn find_owner_of(&self, target: ResourceRef) -> Result<Option<OwnedResource>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.offline {
                return Err(LookupError {
                    target,
                    reason: "actor closed".into(),
                });
            }
            Ok(self.owners.get(&target).cloned())
        }
    }

    /// Property 5 owned by user 7, review 3 by user 9 on it.
    fn listing() -> PolicyEvaluator<InMemoryLookup> {
        PolicyEvaluator::new(InMemoryLookup::default().property(5, 7).review(3, 9, 5))
    }

    const PROPERTY: ResourceRef = ResourceRef::Property(PropertyId(5));
    const REVIEW: ResourceRef = ResourceRef::Review(ReviewId(3));

    #[tokio::test]
    async fn test_admin_allowed_everywhere_without_lookup() {
        let policy = listing();
        let admin = Principal::admin(1);
        let targets = [
            PROPERTY,
            REVIEW,
            ResourceRef::Property(PropertyId(404)),
            ResourceRef::Review(ReviewId(404)),
        ];
        for operation in [Operation::Update, Operation::Delete] {
            for target in targets {
                let decision = policy.evaluate(Some(&admin), operation, target).await.unwrap();
                assert_eq!(decision, PolicyDecision::allow(DecisionReason::Admin));
            }
        }
        assert_eq!(policy.lookup().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_property_owner_only() {
        let policy = listing();
        for operation in [Operation::Update, Operation::Delete] {
            let owner = policy.evaluate(Some(&Principal::user(7)), operation, PROPERTY).await.unwrap();
            assert_eq!(owner, PolicyDecision::allow(DecisionReason::Owner));

            let stranger = policy.evaluate(Some(&Principal::user(8)), operation, PROPERTY).await.unwrap();
            assert_eq!(stranger, PolicyDecision::deny(DecisionReason::Forbidden));
        }
    }

    #[tokio::test]
    async fn test_agent_has_no_override() {
        let policy = listing();
        let agent = Principal::new(8, Role::Agent);
        let decision = policy.evaluate(Some(&agent), Operation::Update, PROPERTY).await.unwrap();
        assert_eq!(decision, PolicyDecision::deny(DecisionReason::Forbidden));
    }

    #[tokio::test]
    async fn test_review_delete_paths() {
        let policy = listing();

        let author = policy.evaluate(Some(&Principal::user(9)), Operation::Delete, REVIEW).await.unwrap();
        assert_eq!(author, PolicyDecision::allow(DecisionReason::Owner));

        let property_owner = policy.evaluate(Some(&Principal::user(7)), Operation::Delete, REVIEW).await.unwrap();
        assert_eq!(property_owner, PolicyDecision::allow(DecisionReason::PropertyOwner));

        let third = policy.evaluate(Some(&Principal::user(11)), Operation::Delete, REVIEW).await.unwrap();
        assert_eq!(third, PolicyDecision::deny(DecisionReason::Forbidden));
    }

    #[tokio::test]
    async fn test_property_owner_cannot_edit_review() {
        let policy = listing();
        let decision = policy.evaluate(Some(&Principal::user(7)), Operation::Update, REVIEW).await.unwrap();
        assert_eq!(decision, PolicyDecision::deny(DecisionReason::Forbidden));
    }

    #[tokio::test]
    async fn test_review_of_missing_property_is_forbidden_for_others() {
        let policy = PolicyEvaluator::new(InMemoryLookup::default().review(3, 9, 5));
        let decision = policy.evaluate(Some(&Principal::user(7)), Operation::Delete, REVIEW).await.unwrap();
        assert_eq!(decision, PolicyDecision::deny(DecisionReason::Forbidden));
    }

    #[tokio::test]
    async fn test_missing_target_is_not_found() {
        let policy = listing();
        let target = ResourceRef::Review(ReviewId(404));
        let decision = policy.evaluate(Some(&Principal::user(9)), Operation::Delete, target).await.unwrap();
        assert_eq!(decision, PolicyDecision::deny(DecisionReason::NotFound));
    }

    #[tokio::test]
    async fn test_anonymous_is_unauthenticated() {
        let policy = listing();
        let decision = policy.evaluate(None, Operation::Update, PROPERTY).await.unwrap();
        assert_eq!(decision, PolicyDecision::deny(DecisionReason::Unauthenticated));
        assert_eq!(decision.to_string(), "denied (unauthenticated)");
    }

    #[tokio::test]
    async fn test_lookup_failure_is_an_error() {
        let policy = PolicyEvaluator::new(InMemoryLookup {
            offline: true,
            ..Default::default()
        });
        let err = policy
            .evaluate(Some(&Principal::user(7)), Operation::Delete, PROPERTY)
            .await
            .unwrap_err();
        assert_eq!(err.target, PROPERTY);
    }

    #[test]
    fn test_rule_tables() {
        assert_eq!(rules_for(Operation::Update, ResourceKind::Property), OWNER_ONLY);
        assert_eq!(rules_for(Operation::Delete, ResourceKind::Property), OWNER_ONLY);
        assert_eq!(rules_for(Operation::Update, ResourceKind::Review), OWNER_ONLY);
        assert_eq!(
            rules_for(Operation::Delete, ResourceKind::Review).last(),
            Some(&Rule::ReviewedPropertyOwnerMatches)
        );
    }
}
