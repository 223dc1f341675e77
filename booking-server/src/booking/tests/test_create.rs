use super::*;

#[tokio::test]
async fn successful_booking_computes_fare_and_occupancy() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;

    let created = w
        .engine
        .create(booking("200012345678", &w.train, 2, 1))
        .await
        .unwrap();

    // (500*2 + 250*1) * 3 stops
    assert_eq!(created.total_fare, 3750);
    assert_eq!(created.status, ReservationStatus::Active);
    assert_eq!(created.user_nic, "200012345678");
    assert!(created.train.is_some());

    assert_eq!(train_occupancy(&w.db, &w.train).await, (2, 1));

    // Both back-references point at the new reservation
    let rid = created.id.unwrap();
    assert!(get_train(&w.db, &w.train).await.reservations.contains(&rid));
    assert!(
        get_user(&w.db, "200012345678")
            .await
            .reservation_ids
            .contains(&rid)
    );
}

#[tokio::test]
async fn create_rejects_unknown_user() {
    let w = world().await;

    let err = w
        .engine
        .create(booking("999999999999", &w.train, 1, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::InvalidReference));
}

#[tokio::test]
async fn create_rejects_unknown_train() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;

    let ghost = RecordId::from_table_key("train", "ghost");
    let err = w
        .engine
        .create(booking("200012345678", &ghost, 1, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::InvalidReference));
}

#[tokio::test]
async fn create_rejects_staff_roles() {
    let w = world().await;
    seed_user(&w.db, "199912345678", UserRole::BackOfficer).await;
    seed_user(&w.db, "123456789v", UserRole::TravelAgent).await;

    let err = w
        .engine
        .create(booking("199912345678", &w.train, 1, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::InvalidRole(UserRole::BackOfficer)));

    let err = w
        .engine
        .create(booking("123456789v", &w.train, 1, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::InvalidRole(UserRole::TravelAgent)));
}

#[tokio::test]
async fn create_rejects_inactive_train() {
    let db = mem_db().await;
    let schedule = seed_schedule(&db, 500, 250).await;
    let train = seed_train(&db, "Yard Queen", 50, 50, Some(&schedule), false).await;
    seed_traveler(&db, "200012345678").await;
    let engine = ReservationEngine::new(db.clone());

    let err = engine
        .create(booking("200012345678", &train, 1, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::InactiveTrain));
}

#[tokio::test]
async fn create_rejects_inactive_user() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;
    deactivate_user(&w.db, "200012345678").await;

    let err = w
        .engine
        .create(booking("200012345678", &w.train, 1, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::InactiveUser));
}

#[tokio::test]
async fn create_enforces_reservation_quota() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;

    // Four live reservations already held (stored in string form like the
    // production writes)
    let fakes: Vec<String> = (0..4).map(|i| format!("reservation:held{i}")).collect();
    w.db.query("UPDATE $thing SET reservation_ids = $list")
        .bind(("thing", RecordId::from_table_key("user", "200012345678")))
        .bind(("list", fakes))
        .await
        .unwrap();

    let err = w
        .engine
        .create(booking("200012345678", &w.train, 1, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::QuotaExceeded));
}

#[tokio::test]
async fn create_rejects_zero_seats() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;

    let err = w
        .engine
        .create(booking("200012345678", &w.train, 0, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::InvalidSeatCount));
}

#[tokio::test]
async fn create_rejects_same_station_journey() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;

    let mut input = booking("200012345678", &w.train, 1, 0);
    input.end_station = input.start_station.clone();
    let err = w.engine.create(input).await.unwrap_err();
    assert!(matches!(err, BookingError::ZeroDistance));
}

#[tokio::test]
async fn create_rejects_short_lead_time() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;

    let mut input = booking("200012345678", &w.train, 1, 0);
    input.travel_date = Utc::now() + Duration::days(3);
    let err = w.engine.create(input).await.unwrap_err();
    assert!(matches!(err, BookingError::BookingWindowViolation));

    // Nothing was reserved for the rejected booking
    assert_eq!(train_occupancy(&w.db, &w.train).await, (0, 0));
}

#[tokio::test]
async fn create_allows_five_day_lead() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;

    let mut input = booking("200012345678", &w.train, 1, 0);
    input.travel_date = days_out(5);
    assert!(w.engine.create(input).await.is_ok());
}

#[tokio::test]
async fn station_error_leaves_no_partial_write() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;

    let mut input = booking("200012345678", &w.train, 2, 1);
    input.end_station = "Galle".to_string();
    let err = w.engine.create(input).await.unwrap_err();
    assert!(matches!(err, BookingError::StationNotFound(_)));

    // The seats taken before fare computation were given back
    assert_eq!(train_occupancy(&w.db, &w.train).await, (0, 0));
    assert!(w.engine.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn request_records_intent_without_inventory() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;

    let request = w
        .engine
        .create_request(ReservationRequestCreate {
            requested_by: "200012345678".to_string(),
            requested_for: days_out(10),
            start_station: "Colombo".to_string(),
            end_station: "Chilaw".to_string(),
            luxury_seats: 0,
            economy_seats: 2,
        })
        .await
        .unwrap();

    assert_eq!(request.status, ReservationStatus::Requested);
    assert!(request.train.is_none());
    assert_eq!(request.total_fare, 0);
    assert_eq!(request.requested_by.as_deref(), Some("200012345678"));

    // No train was touched
    assert_eq!(train_occupancy(&w.db, &w.train).await, (0, 0));
}

#[tokio::test]
async fn request_rejects_unknown_requester_and_short_lead() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;

    let base = ReservationRequestCreate {
        requested_by: "999999999999".to_string(),
        requested_for: days_out(10),
        start_station: "Colombo".to_string(),
        end_station: "Chilaw".to_string(),
        luxury_seats: 1,
        economy_seats: 0,
    };
    let err = w.engine.create_request(base.clone()).await.unwrap_err();
    assert!(matches!(err, BookingError::InvalidReference));

    let err = w
        .engine
        .create_request(ReservationRequestCreate {
            requested_by: "200012345678".to_string(),
            requested_for: Utc::now() + Duration::days(2),
            ..base
        })
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::BookingWindowViolation));
}
