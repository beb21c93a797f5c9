//! Tests for board identifiers, names, column ordinals and WIP limits.

use std::num::NonZeroU32;

use crate::board::domain::{BoardDomainError, BoardId, BoardName, ColumnOrdinal, TaskId, WipLimit};
use crate::error::ErrorKind;
use rstest::rstest;

#[rstest]
#[case(0, ColumnOrdinal::Backlog, "backlog")]
#[case(1, ColumnOrdinal::InProgress, "in progress")]
#[case(2, ColumnOrdinal::Done, "done")]
fn ordinals_map_to_stored_values_and_names(
    #[case] raw: i64,
    #[case] ordinal: ColumnOrdinal,
    #[case] name: &str,
) {
    assert_eq!(ColumnOrdinal::try_from(raw), Ok(ordinal));
    assert_eq!(ordinal.as_i64(), raw);
    assert_eq!(ordinal.display_name(), name);
}

#[rstest]
#[case(-1)]
#[case(3)]
fn unknown_ordinal_is_a_validation_error(#[case] raw: i64) {
    let err = ColumnOrdinal::try_from(raw).expect_err("out of range");
    assert_eq!(err, BoardDomainError::UnknownColumn(raw));
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[rstest]
fn only_done_is_terminal() {
    assert_eq!(ColumnOrdinal::Backlog.next(), Some(ColumnOrdinal::InProgress));
    assert_eq!(ColumnOrdinal::InProgress.next(), Some(ColumnOrdinal::Done));
    assert_eq!(ColumnOrdinal::Done.next(), None);
    assert!(ColumnOrdinal::Done.is_terminal());
    assert!(!ColumnOrdinal::InProgress.is_terminal());
}

#[rstest]
fn unbounded_sentinel_round_trips() {
    assert_eq!(WipLimit::from_raw(-1), Ok(WipLimit::Unbounded));
    assert_eq!(WipLimit::Unbounded.to_raw(), WipLimit::UNBOUNDED_SENTINEL);
    assert_eq!(WipLimit::default(), WipLimit::Unbounded);
}

#[rstest]
fn positive_limits_are_kept() {
    let limit = WipLimit::from_raw(3).expect("positive limit");
    assert_eq!(limit, WipLimit::Max(NonZeroU32::new(3).expect("non-zero")));
    assert_eq!(limit.to_raw(), 3);
    assert_eq!(limit.to_string(), "3");
}

#[rstest]
#[case(0)]
#[case(-2)]
#[case(i64::from(u32::MAX) + 1)]
fn zero_other_negatives_and_overflow_are_rejected(#[case] raw: i64) {
    assert_eq!(WipLimit::from_raw(raw), Err(BoardDomainError::InvalidLimit(raw)));
}

#[rstest]
#[case(WipLimit::Unbounded, 1_000, true, true)]
#[case(WipLimit::Max(NonZeroU32::MIN), 0, true, true)]
#[case(WipLimit::Max(NonZeroU32::MIN), 1, false, true)]
#[case(WipLimit::Max(NonZeroU32::MIN), 2, false, false)]
fn limits_admit_and_cover_counts(
    #[case] limit: WipLimit,
    #[case] count: usize,
    #[case] admits: bool,
    #[case] covers: bool,
) {
    assert_eq!(limit.admits_another(count), admits);
    assert_eq!(limit.covers(count), covers);
}

#[rstest]
fn board_names_are_trimmed() {
    let name = BoardName::new("  Launch  ").expect("valid name");
    assert_eq!(name.as_str(), "Launch");
}

#[rstest]
#[case("")]
#[case(" \t ")]
fn blank_board_names_are_rejected(#[case] raw: &str) {
    assert_eq!(BoardName::new(raw), Err(BoardDomainError::BlankBoardName));
}

#[rstest]
fn identifiers_count_upwards() {
    assert_eq!(BoardId::new(1).successor(), BoardId::new(2));
    assert_eq!(TaskId::new(0).successor().value(), 1);
    assert_eq!(BoardId::new(7).to_string(), "7");
}
