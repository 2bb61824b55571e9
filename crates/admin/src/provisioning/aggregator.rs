//! Merging per-call outcomes into the caller-facing outcome.

use discount_provisioner_core::{CreationOutcome, DiscountMethod};

/// One creation call and its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    /// Code the discount was created with (`None` for automatic discounts).
    pub code: Option<String>,
    /// What the service said about this item.
    pub outcome: CreationOutcome,
}

impl ItemReport {
    /// Report for a single call.
    #[must_use]
    pub const fn new(code: Option<String>, outcome: CreationOutcome) -> Self {
        Self { code, outcome }
    }
}

/// Everything that happened while provisioning one request.
///
/// Keeps per-item detail that the wire outcome drops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionReport {
    /// A code or automatic discount: one call.
    Single {
        /// Method that was dispatched.
        method: DiscountMethod,
        /// The single call.
        item: ItemReport,
    },
    /// A bulk batch, in issue order.
    Bulk {
        /// One entry per generated code.
        items: Vec<ItemReport>,
    },
    /// Rejected before or instead of calling the service.
    Rejected {
        /// The errors returned to the caller.
        outcome: CreationOutcome,
    },
}

impl ProvisionReport {
    /// Per-item reports (empty when rejected).
    #[must_use]
    pub fn items(&self) -> &[ItemReport] {
        match self {
            Self::Single { item, .. } => std::slice::from_ref(item),
            Self::Bulk { items } => items,
            Self::Rejected { .. } => &[],
        }
    }

    /// Number of discounts created.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.items().iter().filter(|i| i.outcome.is_success()).count()
    }

    /// Number of calls the service rejected.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.items().len() - self.succeeded()
    }

    /// Whether the request was rejected without a service verdict.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// The single outcome returned to the caller.
    ///
    /// Single calls pass through unchanged. Bulk batches concatenate the
    /// errors of every failing item in issue order; successes are dropped.
    #[must_use]
    pub fn into_outcome(self) -> CreationOutcome {
        match self {
            Self::Single { item, .. } => item.outcome,
            Self::Bulk { items } => aggregate(items.into_iter().map(|i| i.outcome)),
            Self::Rejected { outcome } => outcome,
        }
    }
}

/// Merge outcomes into one: success if none carry errors, otherwise every
/// error in order.
pub fn aggregate<I>(outcomes: I) -> CreationOutcome
where
    I: IntoIterator<Item = CreationOutcome>,
{
    CreationOutcome::from_errors(
        outcomes
            .into_iter()
            .flat_map(CreationOutcome::into_errors)
            .collect(),
    )
}
