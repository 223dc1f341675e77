use super::*;
use futures::future::join_all;

#[tokio::test]
async fn concurrent_bookings_never_oversell_the_last_seat() {
    let w = world_with_capacity(1, 50).await;
    let nics = [
        "200012345671",
        "200012345672",
        "200012345673",
        "200012345674",
    ];
    for nic in nics {
        seed_traveler(&w.db, nic).await;
    }

    // Four travelers race for the single luxury seat
    let attempts = join_all(
        nics.iter()
            .map(|nic| w.engine.create(booking(nic, &w.train, 1, 0))),
    )
    .await;

    let successes = attempts.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one booking may win the last seat");

    for failed in attempts.iter().filter(|r| r.is_err()) {
        assert!(matches!(
            failed.as_ref().unwrap_err(),
            BookingError::CapacityExceeded(SeatClass::Luxury)
        ));
    }

    assert_eq!(train_occupancy(&w.db, &w.train).await, (1, 0));
}

#[tokio::test]
async fn capacity_error_names_the_exhausted_class() {
    let w = world_with_capacity(50, 1).await;
    seed_traveler(&w.db, "200012345678").await;
    seed_traveler(&w.db, "199912345678").await;

    w.engine
        .create(booking("200012345678", &w.train, 0, 1))
        .await
        .unwrap();

    let err = w
        .engine
        .create(booking("199912345678", &w.train, 0, 1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BookingError::CapacityExceeded(SeatClass::Economy)
    ));

    // The rejected call wrote nothing
    assert_eq!(train_occupancy(&w.db, &w.train).await, (0, 1));
}

#[tokio::test]
async fn oversized_booking_is_rejected_whole() {
    let w = world_with_capacity(2, 2).await;
    seed_traveler(&w.db, "200012345678").await;

    let err = w
        .engine
        .create(booking("200012345678", &w.train, 3, 1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BookingError::CapacityExceeded(SeatClass::Luxury)
    ));

    // Neither class was touched by the failed reserve
    assert_eq!(train_occupancy(&w.db, &w.train).await, (0, 0));
}

#[tokio::test]
async fn update_cannot_push_a_class_over_capacity() {
    let w = world_with_capacity(2, 2).await;
    seed_traveler(&w.db, "200012345678").await;

    let created = w
        .engine
        .create(booking("200012345678", &w.train, 1, 1))
        .await
        .unwrap();
    let id = created.id.unwrap().to_string();

    let err = w
        .engine
        .update(
            &id,
            ReservationUpdate {
                travel_date: days_out(10),
                start_station: "Colombo".to_string(),
                end_station: "Puttlam".to_string(),
                luxury_seats: 3,
                economy_seats: 1,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BookingError::CapacityExceeded(SeatClass::Luxury)
    ));

    // The booking and the counters are unchanged
    assert_eq!(train_occupancy(&w.db, &w.train).await, (1, 1));
    let unchanged = w.engine.get_by_id(&id).await.unwrap().unwrap();
    assert_eq!(unchanged.luxury_seats, 1);
    assert_eq!(unchanged.economy_seats, 1);
}
