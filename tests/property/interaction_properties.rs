// Property-based tests for snapping, group changes and drag reporting
// Exercises the interaction rules with random pointer input

#[path = "../fixtures/mod.rs"]
mod fixtures;

use fixtures::{layout, NullSource};
use proptest::prelude::*;
use rust_timeline::models::item::DraggableItem;
use rust_timeline::models::viewport::ScrollState;
use rust_timeline::services::interaction::coords::group_delta;
use rust_timeline::services::interaction::snap::{
    min_length, resize_time_delta, snap_move, snap_resize,
};
use rust_timeline::services::interaction::{
    BoundsValidator, EventQueue, GestureKind, InteractionEvent, PointerSample,
};

fn snap_strategy() -> impl Strategy<Value = Option<i64>> {
    prop_oneof![
        Just(None),
        (1i64..=3_600_000).prop_map(Some),
    ]
}

proptest! {
    /// Property: without a UTC offset, moved times land on the snap grid
    #[test]
    fn prop_snapped_move_is_on_grid(
        time in -1.0e9..1.0e9f64,
        quantum in 1i64..=3_600_000,
    ) {
        let snapped = snap_move(time, Some(quantum), 0);
        prop_assert_eq!(snapped % quantum, 0);
        prop_assert!((snapped as f64 - time).abs() <= quantum as f64 / 2.0 + 1e-6);
    }

    /// Property: the UTC offset shifts the grid by a constant
    #[test]
    fn prop_offset_shifts_grid(
        time in -1.0e9..1.0e9f64,
        quantum in 1i64..=3_600_000,
        offset in -720i32..=840,
    ) {
        let shift = i64::from(offset) * 60_000 % quantum;
        prop_assert_eq!(snap_move(time, Some(quantum), offset), snap_move(time, Some(quantum), 0) - shift);
    }

    /// Property: the resize grid is anchored on the item's end
    #[test]
    fn prop_resize_grid_contains_end(
        end in -1_000_000_000i64..1_000_000_000,
        quantum in 1i64..=3_600_000,
        steps in -50i64..50,
    ) {
        prop_assert_eq!(snap_resize(end as f64, Some(quantum), end), end);
        let on_grid = end + steps * quantum;
        prop_assert_eq!(snap_resize(on_grid as f64, Some(quantum), end), on_grid);
    }

    /// Property: a committed resize never leaves less than the minimum length
    #[test]
    fn prop_resize_respects_minimum_length(
        length in 0i64..10_000_000,
        raw_delta in -1.0e7..1.0e7f64,
        from_left in any::<bool>(),
        snap in snap_strategy(),
    ) {
        let delta = resize_time_delta(length, raw_delta, from_left, snap);
        let resulting = if from_left { length - delta } else { length + delta };
        prop_assert!(resulting >= min_length(snap));
    }

    /// Property: the proposed row stays inside the table and follows the pointer
    #[test]
    fn prop_group_delta_in_range_and_monotonic(
        group_index in 0usize..4,
        y1 in 0.5..200.0f64,
        y2 in 0.5..200.0f64,
    ) {
        let table = layout::table();
        let scroll = ScrollState::default();
        let (low, high) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };

        let low_delta = group_delta(&table, &scroll, low, group_index);
        let high_delta = group_delta(&table, &scroll, high, group_index);
        let target = group_index as i64 + high_delta;
        prop_assert!(target >= 0 && target < table.len() as i64);
        prop_assert!(low_delta <= high_delta);
    }

    /// Property: a drag never reports the same proposal twice in a row, and
    /// the validator's row wins
    #[test]
    fn prop_drag_reports_are_deduplicated(
        xs in proptest::collection::vec(0.0..1000.0f64, 1..40),
        max_group in 0usize..4,
    ) {
        let settings = fixtures::settings();
        let mut source = NullSource::default();
        let item = DraggableItem::new("job", 1000, 3000, 0).unwrap();
        let mut interaction = fixtures::selected_interaction(item, &settings, &mut source)
            .with_validator(BoundsValidator {
                min_time: i64::MIN / 2,
                max_time: i64::MAX / 2,
                max_group_index: max_group,
            });

        let table = layout::table();
        let frame = layout::frame(&table);
        let mut events = EventQueue::new();

        prop_assert!(interaction.on_gesture_start(
            GestureKind::Drag,
            PointerSample::at(150.0, 15.0),
            &frame,
            &mut events,
        ));
        // Always in the last row
        for x in &xs {
            interaction.on_gesture_move(PointerSample::at(*x, 110.0), &frame, &mut events);
        }

        let proposals: Vec<(i64, usize)> = events
            .events()
            .iter()
            .filter_map(|event| match event {
                InteractionEvent::Drag { time, group_index, .. } => Some((*time, *group_index)),
                _ => None,
            })
            .collect();
        prop_assert_eq!(proposals[0], (1000, 0));
        for pair in proposals.windows(2) {
            prop_assert_ne!(pair[0], pair[1]);
        }
        for (_, group_index) in &proposals[1..] {
            prop_assert_eq!(*group_index, max_group.min(3));
        }
    }
}
