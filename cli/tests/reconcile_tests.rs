//! Reconciler property-based and unit tests
//!
//! Covers the diff engine guarantees:
//! - identifier preservation (no renumbering)
//! - idempotence (second run with no local changes queues nothing)
//! - referential gating (operation without a remote plot is never queued)
//! - stable queue ordering
//! - natural-key collision behavior for operations

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use harvest_management_cli::services::reconcile::{diff_operations, diff_plots};
use shared::{Operation, OperationKey, Plot, PlotId};

// ============================================================================
// Builders
// ============================================================================

fn plot(id: i64, name: &str, area: Decimal) -> Plot {
    Plot::new(PlotId(id), name, area).unwrap()
}

fn plot_map(plots: Vec<Plot>) -> BTreeMap<PlotId, Plot> {
    plots.into_iter().map(|p| (p.id, p)).collect()
}

fn op(id: i64, plot_id: i64, date: &str, weight: Decimal, loss: Decimal) -> Operation {
    Operation::new(
        id,
        PlotId(plot_id),
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        weight,
        loss,
    )
    .unwrap()
}

fn ids(ids: &[i64]) -> HashSet<PlotId> {
    ids.iter().copied().map(PlotId).collect()
}

fn keys(ops: &[Operation]) -> HashSet<OperationKey> {
    ops.iter().map(Operation::natural_key).collect()
}

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Plot sets with distinct ids in 1..=40
fn plot_set_strategy() -> impl Strategy<Value = Vec<Plot>> {
    prop::collection::btree_set(1..=40i64, 0..12).prop_map(|ids| {
        ids.into_iter()
            .map(|id| plot(id, &format!("Plot {id}"), Decimal::new(id * 10 + 1, 1)))
            .collect()
    })
}

/// Subsets of 1..=40 standing in for remote plot ids
fn remote_ids_strategy() -> impl Strategy<Value = HashSet<PlotId>> {
    prop::collection::hash_set(1..=40i64, 0..12)
        .prop_map(|ids| ids.into_iter().map(PlotId).collect())
}

/// Operation lists referencing plot ids in 1..=40
fn operation_list_strategy() -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::vec((1..=40i64, 1..=28u32, 0..=2000i64, 0..=1000i64), 0..16).prop_map(
        |rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (plot_id, day, weight, loss))| {
                    op(
                        i as i64 + 1,
                        plot_id,
                        &format!("2024-05-{day:02}"),
                        Decimal::new(weight, 1),
                        Decimal::new(loss, 1),
                    )
                })
                .collect()
        },
    )
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// Queued plots keep their local identifiers and are exactly the ones
    /// missing remotely.
    #[test]
    fn plot_diff_preserves_ids_and_covers_missing(
        plots in plot_set_strategy(),
        remote in remote_ids_strategy(),
    ) {
        let local = plot_map(plots);
        let queue = diff_plots(&local, &remote);

        for queued in &queue {
            prop_assert!(local.contains_key(&queued.id));
            prop_assert!(!remote.contains(&queued.id));
            prop_assert_eq!(&local[&queued.id], *queued);
        }
        for plot in local.values() {
            let queued = queue.iter().any(|q| q.id == plot.id);
            prop_assert_eq!(queued, !remote.contains(&plot.id));
        }
    }

    /// Feeding the first run's output back as remote state queues nothing.
    #[test]
    fn second_run_is_empty(
        plots in plot_set_strategy(),
        ops in operation_list_strategy(),
    ) {
        let local = plot_map(plots);
        let mut remote_ids = HashSet::new();
        let mut remote_keys = HashSet::new();

        // First sync pass: everything queued counts as inserted.
        let plot_queue = diff_plots(&local, &remote_ids);
        remote_ids.extend(plot_queue.iter().map(|p| p.id));
        let op_diff = diff_operations(&ops, &remote_keys, &remote_ids);
        remote_keys.extend(op_diff.to_insert.iter().map(|o| o.natural_key()));

        // Second pass with no local changes.
        let plot_queue = diff_plots(&local, &remote_ids);
        prop_assert!(plot_queue.is_empty());
        let op_diff = diff_operations(&ops, &remote_keys, &remote_ids);
        prop_assert!(op_diff.to_insert.is_empty());
    }

    /// An operation whose plot id is unknown remotely is skipped, never queued.
    #[test]
    fn unknown_plot_is_always_skipped(
        ops in operation_list_strategy(),
        remote_plots in remote_ids_strategy(),
    ) {
        let diff = diff_operations(&ops, &HashSet::new(), &remote_plots);

        for queued in &diff.to_insert {
            prop_assert!(remote_plots.contains(&queued.plot_id));
        }
        for skipped in &diff.skipped {
            prop_assert!(!remote_plots.contains(&skipped.plot_id));
        }
        prop_assert_eq!(diff.to_insert.len() + diff.skipped.len(), ops.len());
    }

    /// The queue preserves local insertion order.
    #[test]
    fn queue_order_is_local_insertion_order(
        ops in operation_list_strategy(),
        remote_plots in remote_ids_strategy(),
    ) {
        let diff = diff_operations(&ops, &HashSet::new(), &remote_plots);
        let queued_ids: Vec<i64> = diff.to_insert.iter().map(|o| o.id).collect();
        let mut sorted = queued_ids.clone();
        sorted.sort_unstable();
        prop_assert_eq!(queued_ids, sorted);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

mod unit_tests {
    use super::*;

    /// First sync inserts both plots with ids preserved; after an operation
    /// is added, the second sync queues exactly that operation and no plots.
    #[test]
    fn end_to_end_two_pass_scenario() {
        let local = plot_map(vec![
            plot(1, "North", dec!(10.0)),
            plot(2, "South", dec!(15.0)),
        ]);
        let mut remote_ids = HashSet::new();
        let mut remote_keys: HashSet<OperationKey> = HashSet::new();

        let queue = diff_plots(&local, &remote_ids);
        assert_eq!(
            queue.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![PlotId(1), PlotId(2)]
        );
        remote_ids.extend(queue.iter().map(|p| p.id));

        let ops = vec![op(1, 1, "2024-05-01", dec!(5.0), dec!(10.0))];
        let queue = diff_plots(&local, &remote_ids);
        assert!(queue.is_empty(), "both plots already remote");
        let diff = diff_operations(&ops, &remote_keys, &remote_ids);
        assert_eq!(diff.to_insert.len(), 1);
        assert!(diff.skipped.is_empty());
        remote_keys.extend(diff.to_insert.iter().map(|o| o.natural_key()));

        let diff = diff_operations(&ops, &remote_keys, &remote_ids);
        assert!(diff.to_insert.is_empty());
    }

    /// Operation referencing plot 3, present in neither remote nor the
    /// pending queue: reported as skipped, never queued.
    #[test]
    fn skip_scenario_for_missing_plot() {
        let ops = vec![op(1, 3, "2024-05-01", dec!(5.0), dec!(10.0))];
        let diff = diff_operations(&ops, &HashSet::new(), &ids(&[1, 2]));

        assert!(diff.to_insert.is_empty());
        assert_eq!(diff.skipped.len(), 1);
        assert_eq!(diff.skipped[0].id, 1);
        assert_eq!(diff.skipped[0].plot_id, PlotId(3));
    }

    /// A plot queued in the current pass gates its operations in, even
    /// though the store has not seen it yet.
    #[test]
    fn pending_plots_gate_operations_in() {
        let local = plot_map(vec![plot(5, "East", dec!(8.0))]);
        let ops = vec![op(1, 5, "2024-06-10", dec!(3.0), dec!(4.0))];

        let mut remote_ids = HashSet::new();
        let queue = diff_plots(&local, &remote_ids);
        remote_ids.extend(queue.iter().map(|p| p.id));

        let diff = diff_operations(&ops, &HashSet::new(), &remote_ids);
        assert_eq!(diff.to_insert.len(), 1);
        assert!(diff.skipped.is_empty());
    }

    /// Two distinct local operations with identical (plot, date, weight,
    /// loss) are indistinguishable to the reconciler: both queue while the
    /// key is absent remotely, and neither queues once it is present.
    #[test]
    fn natural_key_collision_is_preserved() {
        let twin_a = op(1, 1, "2024-05-01", dec!(5.0), dec!(10.0));
        let twin_b = op(2, 1, "2024-05-01", dec!(5.0), dec!(10.0));
        let ops = vec![twin_a.clone(), twin_b.clone()];
        let remote_plots = ids(&[1]);

        // Key absent remotely: both queued, per-row diffing only.
        let diff = diff_operations(&ops, &HashSet::new(), &remote_plots);
        assert_eq!(diff.to_insert.len(), 2);

        // Key present remotely: both collapse onto it, neither queued.
        let remote_keys = keys(&[twin_a]);
        let diff = diff_operations(&ops, &remote_keys, &remote_plots);
        assert!(diff.to_insert.is_empty());
        assert!(diff.skipped.is_empty());
    }

    /// Mixed batch: known plots queue, unknown plots skip, order kept.
    #[test]
    fn mixed_queue_and_skip_keeps_order() {
        let ops = vec![
            op(1, 1, "2024-05-01", dec!(5.0), dec!(10.0)),
            op(2, 9, "2024-05-02", dec!(4.0), dec!(2.0)),
            op(3, 2, "2024-05-03", dec!(6.0), dec!(16.0)),
        ];
        let diff = diff_operations(&ops, &HashSet::new(), &ids(&[1, 2]));

        assert_eq!(
            diff.to_insert.iter().map(|o| o.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(diff.skipped.len(), 1);
        assert_eq!(diff.skipped[0].plot_id, PlotId(9));
    }

    /// With the remote read degraded to empty (read failure fallback), the
    /// whole local set is queued again.
    #[test]
    fn empty_remote_state_queues_everything() {
        let local = plot_map(vec![plot(1, "North", dec!(10.0))]);
        let ops = vec![op(1, 1, "2024-05-01", dec!(5.0), dec!(10.0))];

        let mut remote_ids = HashSet::new();
        let queue = diff_plots(&local, &remote_ids);
        assert_eq!(queue.len(), 1);
        remote_ids.extend(queue.iter().map(|p| p.id));

        let diff = diff_operations(&ops, &HashSet::new(), &remote_ids);
        assert_eq!(diff.to_insert.len(), 1);
    }
}
