//! Booking window policy
//!
//! No reservation may be placed, edited, or cancelled within
//! [`MIN_BOOKING_LEAD_DAYS`] of its travel date. The same rule gates
//! reservation requests against their requested-for date.

use chrono::{DateTime, Utc};

/// Minimum lead time between a mutation and the travel date
pub const MIN_BOOKING_LEAD_DAYS: i64 = 5;

/// Whether a mutation at `reference` time is allowed for a reservation
/// travelling on `travel_date`.
///
/// Whole-day comparison: exactly five days ahead is allowed, anything
/// less (4 days 23 hours) is not.
pub fn mutation_allowed(reference: DateTime<Utc>, travel_date: DateTime<Utc>) -> bool {
    travel_date.signed_duration_since(reference).num_days() >= MIN_BOOKING_LEAD_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        "2023-10-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn exactly_five_days_is_allowed() {
        let reference = now();
        assert!(mutation_allowed(reference, reference + Duration::days(5)));
    }

    #[test]
    fn just_under_five_days_is_rejected() {
        let reference = now();
        assert!(!mutation_allowed(
            reference,
            reference + Duration::days(4) + Duration::hours(23)
        ));
        assert!(!mutation_allowed(
            reference,
            reference + Duration::days(5) - Duration::seconds(1)
        ));
    }

    #[test]
    fn comfortable_lead_time_is_allowed() {
        let reference = now();
        assert!(mutation_allowed(reference, reference + Duration::days(10)));
        assert!(mutation_allowed(
            reference,
            reference + Duration::days(5) + Duration::hours(1)
        ));
    }

    #[test]
    fn past_travel_dates_are_rejected() {
        let reference = now();
        assert!(!mutation_allowed(reference, reference - Duration::days(1)));
        assert!(!mutation_allowed(reference, reference));
    }
}
