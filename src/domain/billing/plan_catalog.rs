//! Static plan catalog mapping processor price identifiers to roles.
//!
//! The mapping fails open: an identifier with no entry resolves to the
//! free tier with no interval, and the event is still applied.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::role::{AccountRole, BillingInterval};

static PLAN_CATALOG: Lazy<HashMap<&'static str, (AccountRole, BillingInterval)>> =
    Lazy::new(|| {
        HashMap::from([
            ("price_owner_monthly", (AccountRole::Owner, BillingInterval::Monthly)),
            ("price_owner_yearly", (AccountRole::Owner, BillingInterval::Yearly)),
            ("price_vet_monthly", (AccountRole::Veterinarian, BillingInterval::Monthly)),
            ("price_vet_yearly", (AccountRole::Veterinarian, BillingInterval::Yearly)),
            ("price_groomer_monthly", (AccountRole::Groomer, BillingInterval::Monthly)),
            ("price_groomer_yearly", (AccountRole::Groomer, BillingInterval::Yearly)),
            ("price_petsitter_monthly", (AccountRole::Petsitter, BillingInterval::Monthly)),
            ("price_petsitter_yearly", (AccountRole::Petsitter, BillingInterval::Yearly)),
            ("price_boarding_monthly", (AccountRole::Boarding, BillingInterval::Monthly)),
            ("price_boarding_yearly", (AccountRole::Boarding, BillingInterval::Yearly)),
            ("price_trainer_monthly", (AccountRole::Trainer, BillingInterval::Monthly)),
            ("price_trainer_yearly", (AccountRole::Trainer, BillingInterval::Yearly)),
        ])
    });

/// Resolves a plan identifier to `(role, interval)`.
///
/// Unknown or absent identifiers resolve to `(Free, None)`.
pub fn resolve_plan(plan_id: Option<&str>) -> (AccountRole, Option<BillingInterval>) {
    plan_id
        .and_then(|id| PLAN_CATALOG.get(id))
        .map(|(role, interval)| (*role, Some(*interval)))
        .unwrap_or((AccountRole::Free, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_plans_resolve_to_role_and_interval() {
        assert_eq!(
            resolve_plan(Some("price_vet_monthly")),
            (AccountRole::Veterinarian, Some(BillingInterval::Monthly))
        );
        assert_eq!(
            resolve_plan(Some("price_owner_yearly")),
            (AccountRole::Owner, Some(BillingInterval::Yearly))
        );
    }

    #[test]
    fn unknown_plan_fails_open_to_free() {
        assert_eq!(resolve_plan(Some("price_does_not_exist")), (AccountRole::Free, None));
    }

    #[test]
    fn absent_plan_fails_open_to_free() {
        assert_eq!(resolve_plan(None), (AccountRole::Free, None));
    }

    #[test]
    fn every_professional_role_has_both_intervals() {
        for role in ["vet", "groomer", "petsitter", "boarding", "trainer"] {
            for interval in ["monthly", "yearly"] {
                let id = format!("price_{role}_{interval}");
                let (resolved, resolved_interval) = resolve_plan(Some(&id));
                assert!(resolved.is_professional(), "{id} resolved to {resolved:?}");
                assert!(resolved_interval.is_some());
            }
        }
    }
}
