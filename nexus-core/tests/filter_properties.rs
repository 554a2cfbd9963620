//! Property tests for the filter engine

use nexus_core::{
    filter::{apply, filter},
    record::{Batch, Item},
    validators::{BoundedIntegerValidator, NumericValidator, StringValidator},
    Severity,
};
use proptest::prelude::*;

fn item() -> impl Strategy<Value = Item> {
    prop_oneof![
        any::<i64>().prop_map(Item::Int),
        (-1.0e6f64..1.0e6).prop_map(Item::Float),
        "[a-z0-9-]{0,6}".prop_map(Item::Str),
    ]
}

fn batch() -> impl Strategy<Value = Batch> {
    prop::collection::vec(item(), 0..40).prop_map(Batch::from)
}

proptest! {
    #[test]
    fn admitted_plus_rejected_is_len(batch in batch()) {
        let filtered = filter(&batch, &NumericValidator);
        prop_assert_eq!(filtered.admitted.len() + filtered.rejected, batch.len());
        prop_assert_eq!(filtered.total(), batch.len());
    }

    #[test]
    fn filtering_is_idempotent(batch in batch()) {
        let once = filter(&batch, &StringValidator).admitted;
        let twice = filter(&once, &StringValidator);
        prop_assert_eq!(&twice.admitted, &once);
        prop_assert_eq!(twice.rejected, 0);
    }

    #[test]
    fn filtering_keeps_order(batch in batch()) {
        let admitted = filter(&batch, &StringValidator).admitted;
        let expected: Vec<&Item> = batch.iter().filter(|i| matches!(i, Item::Str(_))).collect();
        prop_assert_eq!(admitted.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn retained_transactions_are_in_bounds(batch in batch()) {
        let admitted = filter(&batch, &BoundedIntegerValidator::transactions()).admitted;
        for item in &admitted {
            let amount = item.as_int();
            prop_assert!(matches!(amount, Some(a) if a != 0 && a > -10_000 && a < 10_000));
        }
    }

    #[test]
    fn drop_severity_matches_soft_filter(batch in batch()) {
        let soft = filter(&batch, &NumericValidator);
        prop_assert_eq!(apply(&batch, &NumericValidator, Severity::Drop).ok(), Some(soft));
    }
}
