use super::*;

fn update_input(
    luxury: u32,
    economy: u32,
    start: &str,
    end: &str,
) -> ReservationUpdate {
    ReservationUpdate {
        travel_date: days_out(10),
        start_station: start.to_string(),
        end_station: end.to_string(),
        luxury_seats: luxury,
        economy_seats: economy,
    }
}

#[tokio::test]
async fn update_moves_occupancy_and_recomputes_fare() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;

    let created = w
        .engine
        .create(booking("200012345678", &w.train, 2, 1))
        .await
        .unwrap();
    let id = created.id.unwrap().to_string();

    // Negombo -> Puttlam is 2 stops
    let updated = w
        .engine
        .update(&id, update_input(1, 3, "Negombo", "Puttlam"))
        .await
        .unwrap();

    assert_eq!(updated.luxury_seats, 1);
    assert_eq!(updated.economy_seats, 3);
    assert_eq!(updated.total_fare, (500 + 3 * 250) * 2);
    assert_eq!(train_occupancy(&w.db, &w.train).await, (1, 3));
}

#[tokio::test]
async fn same_size_update_succeeds_on_full_train() {
    let w = world_with_capacity(2, 1).await;
    seed_traveler(&w.db, "200012345678").await;

    let created = w
        .engine
        .create(booking("200012345678", &w.train, 2, 1))
        .await
        .unwrap();
    let id = created.id.unwrap().to_string();
    assert_eq!(train_occupancy(&w.db, &w.train).await, (2, 1));

    // Train is at capacity, but the net seat delta is zero
    let updated = w
        .engine
        .update(&id, update_input(2, 1, "Colombo", "Chilaw"))
        .await
        .unwrap();
    assert_eq!(updated.start_station, "Colombo");
    assert_eq!(updated.end_station, "Chilaw");
    assert_eq!(train_occupancy(&w.db, &w.train).await, (2, 1));
}

#[tokio::test]
async fn update_rejects_requests_and_missing_reservations() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;

    let request = w
        .engine
        .create_request(ReservationRequestCreate {
            requested_by: "200012345678".to_string(),
            requested_for: days_out(10),
            start_station: "Colombo".to_string(),
            end_station: "Chilaw".to_string(),
            luxury_seats: 1,
            economy_seats: 0,
        })
        .await
        .unwrap();
    let request_id = request.id.unwrap().to_string();

    let err = w
        .engine
        .update(&request_id, update_input(1, 0, "Colombo", "Chilaw"))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::RequestNotEditable));

    let err = w
        .engine
        .update("reservation:missing", update_input(1, 0, "Colombo", "Chilaw"))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::ReservationNotFound(_)));
}

#[tokio::test]
async fn update_rejects_completed_reservations() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;

    let created = w
        .engine
        .create(booking("200012345678", &w.train, 1, 0))
        .await
        .unwrap();
    let id = created.id.unwrap().to_string();
    w.engine.complete(&id).await.unwrap();

    let err = w
        .engine
        .update(&id, update_input(1, 0, "Colombo", "Chilaw"))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::AlreadyCompleted));
}

#[tokio::test]
async fn update_station_error_restores_occupancy() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;

    let created = w
        .engine
        .create(booking("200012345678", &w.train, 2, 1))
        .await
        .unwrap();
    let id = created.id.unwrap().to_string();

    let err = w
        .engine
        .update(&id, update_input(4, 4, "Colombo", "Galle"))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::StationNotFound(_)));

    // The attempted 4/4 delta was rolled back to the booked 2/1
    assert_eq!(train_occupancy(&w.db, &w.train).await, (2, 1));
    let unchanged = w.engine.get_by_id(&id).await.unwrap().unwrap();
    assert_eq!(unchanged.total_fare, 3750);
}

#[tokio::test]
async fn delete_restores_occupancy_and_unlinks() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;

    let before = train_occupancy(&w.db, &w.train).await;
    let created = w
        .engine
        .create(booking("200012345678", &w.train, 2, 1))
        .await
        .unwrap();
    let id = created.id.unwrap().to_string();

    w.engine.delete(&id).await.unwrap();

    assert_eq!(train_occupancy(&w.db, &w.train).await, before);
    assert!(w.engine.get_by_id(&id).await.unwrap().is_none());
    assert!(get_train(&w.db, &w.train).await.reservations.is_empty());
    assert!(
        get_user(&w.db, "200012345678")
            .await
            .reservation_ids
            .is_empty()
    );
}

#[tokio::test]
async fn delete_inside_window_is_rejected() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;

    // Travel in two days: the engine would never create this, so seed it
    let rid = seed_reservation(
        &w.db,
        raw_reservation(
            "200012345678",
            Some(&w.train),
            ReservationStatus::Active,
            Utc::now() + Duration::days(2),
            1,
            0,
        ),
    )
    .await;

    let err = w.engine.delete(&rid.to_string()).await.unwrap_err();
    assert!(matches!(err, BookingError::BookingWindowViolation));
}

#[tokio::test]
async fn request_deletion_bypasses_the_window() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;

    // A request whose requested-for date is already inside the window
    let rid = seed_reservation(
        &w.db,
        raw_reservation(
            "200012345678",
            None,
            ReservationStatus::Requested,
            Utc::now() + Duration::days(2),
            1,
            0,
        ),
    )
    .await;

    w.engine.delete(&rid.to_string()).await.unwrap();
    assert!(w.engine.get_by_id(&rid.to_string()).await.unwrap().is_none());
    assert_eq!(train_occupancy(&w.db, &w.train).await, (0, 0));
}

#[tokio::test]
async fn complete_releases_seats_and_keeps_history() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;

    let created = w
        .engine
        .create(booking("200012345678", &w.train, 2, 1))
        .await
        .unwrap();
    let id = created.id.unwrap().to_string();

    let completed = w.engine.complete(&id).await.unwrap();

    assert_eq!(completed.status, ReservationStatus::Completed);
    assert_eq!(completed.completed_train_name.as_deref(), Some("Udarata Menike"));
    assert_eq!(train_occupancy(&w.db, &w.train).await, (0, 0));

    // Record kept as history, back-references dropped
    assert!(w.engine.get_by_id(&id).await.unwrap().is_some());
    assert!(get_train(&w.db, &w.train).await.reservations.is_empty());
    assert!(
        get_user(&w.db, "200012345678")
            .await
            .reservation_ids
            .is_empty()
    );
}

#[tokio::test]
async fn delete_after_complete_does_not_double_release() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;
    seed_traveler(&w.db, "199912345678").await;

    let first = w
        .engine
        .create(booking("200012345678", &w.train, 2, 1))
        .await
        .unwrap();
    w.engine
        .create(booking("199912345678", &w.train, 1, 1))
        .await
        .unwrap();
    assert_eq!(train_occupancy(&w.db, &w.train).await, (3, 2));

    let first_id = first.id.unwrap().to_string();
    w.engine.complete(&first_id).await.unwrap();
    assert_eq!(train_occupancy(&w.db, &w.train).await, (1, 1));

    // Deleting the completed record must not release the seats again
    w.engine.delete(&first_id).await.unwrap();
    assert_eq!(train_occupancy(&w.db, &w.train).await, (1, 1));
    assert!(w.engine.get_by_id(&first_id).await.unwrap().is_none());
}

#[tokio::test]
async fn complete_rejects_requests_and_double_completion() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;

    let request = w
        .engine
        .create_request(ReservationRequestCreate {
            requested_by: "200012345678".to_string(),
            requested_for: days_out(10),
            start_station: "Colombo".to_string(),
            end_station: "Chilaw".to_string(),
            luxury_seats: 1,
            economy_seats: 0,
        })
        .await
        .unwrap();
    let err = w
        .engine
        .complete(&request.id.unwrap().to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::RequestNotEditable));

    let created = w
        .engine
        .create(booking("200012345678", &w.train, 1, 0))
        .await
        .unwrap();
    let id = created.id.unwrap().to_string();
    w.engine.complete(&id).await.unwrap();
    let err = w.engine.complete(&id).await.unwrap_err();
    assert!(matches!(err, BookingError::AlreadyCompleted));
}

#[tokio::test]
async fn reconcile_train_repairs_drifted_counters() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;

    let created = w
        .engine
        .create(booking("200012345678", &w.train, 2, 1))
        .await
        .unwrap();
    let rid = created.id.unwrap();

    // Corrupt the aggregate the way a lost back-reference write would
    w.db.query(
        "UPDATE $thing SET occupied_luxury_seat_count = 40, \
         occupied_economy_seat_count = 0, reservations = []",
    )
    .bind(("thing", w.train.clone()))
    .await
    .unwrap();

    let report = w
        .engine
        .reconcile_train(&w.train.to_string())
        .await
        .unwrap();

    assert!(report.drifted());
    assert_eq!((report.luxury_after, report.economy_after), (2, 1));
    assert_eq!(train_occupancy(&w.db, &w.train).await, (2, 1));
    assert_eq!(get_train(&w.db, &w.train).await.reservations, vec![rid]);
}

#[tokio::test]
async fn reconcile_user_rebuilds_reservation_list() {
    let w = world().await;
    seed_traveler(&w.db, "200012345678").await;

    let created = w
        .engine
        .create(booking("200012345678", &w.train, 1, 0))
        .await
        .unwrap();
    let rid = created.id.unwrap();

    w.db.query("UPDATE $thing SET reservation_ids = []")
        .bind(("thing", RecordId::from_table_key("user", "200012345678")))
        .await
        .unwrap();

    let report = w.engine.reconcile_user("200012345678").await.unwrap();
    assert_eq!(report.list_size_before, 0);
    assert_eq!(report.list_size_after, 1);
    assert_eq!(
        get_user(&w.db, "200012345678").await.reservation_ids,
        vec![rid]
    );
}
