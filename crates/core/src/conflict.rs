//! Conflict detection between a candidate interval and the approved
//! bookings of an item.
//!
//! Pure queries, no side effects. Only APPROVED bookings can block a
//! candidate: WAITING and REJECTED bookings never conflict, even if they
//! overlap temporally. This lets several competing WAITING requests for the
//! same slot coexist until the owner adjudicates.

use crate::booking::{Booking, BookingStatus};
use crate::types::Timestamp;

/// Whether two intervals strictly overlap.
///
/// Intervals that merely touch at an endpoint (`a_end == b_start`) do NOT
/// overlap; any shared span, including exact containment or equality, does.
pub fn overlaps(
    a_start: Timestamp,
    a_end: Timestamp,
    b_start: Timestamp,
    b_end: Timestamp,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Find the first booking blocking the candidate interval.
///
/// `bookings` is one item's booking history, expected in ascending start
/// order (the stores guarantee it). O(n) over the slice is fine: no index
/// beyond the per-item fetch is required. An empty slice trivially yields
/// no conflict.
pub fn find_conflict(
    bookings: &[Booking],
    candidate_start: Timestamp,
    candidate_end: Timestamp,
) -> Option<&Booking> {
    bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Approved)
        .find(|b| overlaps(candidate_start, candidate_end, b.start, b.end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn t(hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2030, 6, 1, hour, 0, 0).unwrap()
    }

    fn booking(id: i64, status: BookingStatus, start: Timestamp, end: Timestamp) -> Booking {
        Booking {
            id,
            start,
            end,
            status,
            booker_id: 10,
            item_id: 1,
        }
    }

    fn approved(id: i64, start: Timestamp, end: Timestamp) -> Booking {
        booking(id, BookingStatus::Approved, start, end)
    }

    // -- overlaps ----------------------------------------------------------

    #[test]
    fn disjoint_intervals_do_not_overlap() {
        assert!(!overlaps(t(1), t(2), t(3), t(4)));
        assert!(!overlaps(t(3), t(4), t(1), t(2)));
    }

    #[test]
    fn touching_endpoints_do_not_overlap() {
        assert!(!overlaps(t(1), t(2), t(2), t(3)));
        assert!(!overlaps(t(2), t(3), t(1), t(2)));
    }

    #[test]
    fn partial_overlap_overlaps() {
        assert!(overlaps(t(1), t(3), t(2), t(4)));
        assert!(overlaps(t(2), t(4), t(1), t(3)));
    }

    #[test]
    fn containment_overlaps() {
        assert!(overlaps(t(1), t(6), t(2), t(3)));
        assert!(overlaps(t(2), t(3), t(1), t(6)));
    }

    #[test]
    fn identical_intervals_overlap() {
        assert!(overlaps(t(1), t(2), t(1), t(2)));
    }

    // -- find_conflict -----------------------------------------------------

    #[test]
    fn empty_history_has_no_conflict() {
        assert!(find_conflict(&[], t(1), t(2)).is_none());
    }

    #[test]
    fn approved_overlap_is_a_conflict() {
        let history = vec![approved(1, t(2), t(4))];
        let hit = find_conflict(&history, t(3), t(5)).unwrap();
        assert_eq!(hit.id, 1);
    }

    #[test]
    fn waiting_and_rejected_never_block() {
        let history = vec![
            booking(1, BookingStatus::Waiting, t(2), t(4)),
            booking(2, BookingStatus::Rejected, t(2), t(4)),
        ];
        assert!(find_conflict(&history, t(2), t(4)).is_none());
    }

    #[test]
    fn candidate_touching_approved_end_is_allowed() {
        let history = vec![approved(1, t(2), t(4))];
        assert!(find_conflict(&history, t(4), t(6)).is_none());
        assert!(find_conflict(&history, t(0), t(2)).is_none());
    }

    #[test]
    fn candidate_inside_approved_conflicts() {
        let history = vec![approved(1, t(2), t(8))];
        assert!(find_conflict(&history, t(3), t(4)).is_some());
    }

    #[test]
    fn first_overlapping_approved_booking_is_returned() {
        let history = vec![
            approved(1, t(1), t(3)),
            approved(2, t(4), t(6)),
            approved(3, t(7), t(9)),
        ];
        let hit = find_conflict(&history, t(5), t(8)).unwrap();
        assert_eq!(hit.id, 2);
    }

    #[test]
    fn exact_duplicate_of_approved_conflicts() {
        let start = t(2);
        let end = start + Duration::hours(2);
        let history = vec![approved(1, start, end)];
        assert!(find_conflict(&history, start, end).is_some());
    }
}
