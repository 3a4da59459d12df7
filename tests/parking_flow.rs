//! End-to-end parking workflows against the in-memory store

use std::sync::Arc;

use chrono::{Duration, Utc};
use parkit_server::{
    config::{FacilityConfig, FareConfig},
    models::{ParkingSpot, Ticket, VehicleCategory},
    operator::MockOperatorInput,
    repository::{MemoryParkingStore, ParkingStore},
    services::{fare::FareCalculator, Services},
    AppError,
};
use rust_decimal::Decimal;

const CAR_REGISTRATION: &str = "ABCDEF";

fn setup() -> (Arc<MemoryParkingStore>, Services) {
    let store = Arc::new(MemoryParkingStore::for_facility(&FacilityConfig::default()));
    let services = Services::new(store.clone(), FareConfig::default());
    (store, services)
}

fn operator(registration: &'static str, selection: i32) -> MockOperatorInput {
    let mut operator = MockOperatorInput::new();
    operator
        .expect_read_vehicle_registration_number()
        .returning(move || Ok(registration.to_string()));
    operator.expect_read_selection().return_const(selection);
    operator
}

/// Park a car that arrived `hours` ago on spot 1
async fn park_car_since(store: &MemoryParkingStore, hours: i64) {
    let spot = ParkingSpot::new(1, VehicleCategory::Car, false);
    store.update_parking_spot(&spot).await.unwrap();
    let ticket = Ticket::open(CAR_REGISTRATION, spot, Utc::now() - Duration::hours(hours));
    assert!(store.save_ticket(&ticket).await.unwrap());
}

#[tokio::test]
async fn test_parking_a_car() {
    let (store, services) = setup();

    let receipt = services
        .parking
        .process_incoming_vehicle(&mut operator(CAR_REGISTRATION, 1))
        .await
        .unwrap()
        .expect("car parked");

    let ticket = store.get_ticket(CAR_REGISTRATION).await.unwrap().expect("open ticket");
    assert_eq!(ticket.vehicle_registration_number, CAR_REGISTRATION);
    assert_eq!(ticket.price, Decimal::ZERO);
    assert!(ticket.out_time.is_none());
    assert_eq!(ticket.spot.id, receipt.ticket.spot.id);
    assert!(!store.get_parking_spot(1).await.expect("spot 1").is_available);
    assert_eq!(store.get_next_available_slot(VehicleCategory::Car).await.unwrap(), Some(2));
}

#[tokio::test]
async fn test_parking_lot_exit() {
    let (store, services) = setup();
    park_car_since(&store, 3).await;

    let receipt = services
        .parking
        .process_exiting_vehicle(&mut operator(CAR_REGISTRATION, 0))
        .await
        .unwrap();

    let saved = store.tickets().await;
    assert_eq!(saved.len(), 1);
    assert!(saved[0].out_time.is_some());
    assert_eq!(saved[0].price, Decimal::new(450, 2));
    assert_eq!(receipt.ticket.price, saved[0].price);
    assert!(!receipt.discount_applied);
    assert!(store.get_parking_spot(1).await.expect("spot 1").is_available);
}

#[tokio::test]
async fn test_parking_lot_exit_recurring_user() {
    let (store, services) = setup();
    park_car_since(&store, 3).await;
    services
        .parking
        .process_exiting_vehicle(&mut operator(CAR_REGISTRATION, 0))
        .await
        .unwrap();

    park_car_since(&store, 1).await;
    let receipt = services
        .parking
        .process_exiting_vehicle(&mut operator(CAR_REGISTRATION, 0))
        .await
        .unwrap();

    let saved = store.tickets().await;
    let latest = saved.last().expect("second ticket");
    let expected = FareCalculator::new(FareConfig::default())
        .compute_fare(latest.in_time, latest.out_time, VehicleCategory::Car, true)
        .unwrap();

    assert!(receipt.discount_applied);
    assert_eq!(latest.price, expected);
    // 1.5 * 0.95 = 1.425, rounded half-up
    assert_eq!(latest.price, Decimal::new(143, 2));
}

#[tokio::test]
async fn test_full_facility_creates_nothing() {
    let (store, services) = setup();
    for registration in ["CAR-1", "CAR-2", "CAR-3"] {
        services
            .parking
            .process_incoming_vehicle(&mut operator(registration, 1))
            .await
            .unwrap()
            .expect("car parked");
    }

    let result = services
        .parking
        .process_incoming_vehicle(&mut operator("CAR-4", 1))
        .await;

    assert!(matches!(result, Err(AppError::CapacityExhausted(VehicleCategory::Car))));
    assert_eq!(store.tickets().await.len(), 3);
    assert_eq!(store.get_ticket_count("CAR-4").await.unwrap(), 0);
    // bikes are unaffected
    assert_eq!(store.get_next_available_slot(VehicleCategory::Bike).await.unwrap(), Some(4));
}

#[tokio::test]
async fn test_exit_without_ticket() {
    let (store, services) = setup();

    let result = services
        .parking
        .process_exiting_vehicle(&mut operator("GHOST", 0))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(store.tickets().await.is_empty());
}

/// Entering twice without exiting is accepted: nothing guards against a
/// second open ticket for the same vehicle yet.
#[tokio::test]
async fn test_reentry_with_open_ticket_is_not_refused() {
    let (store, services) = setup();
    for _ in 0..2 {
        services
            .parking
            .process_incoming_vehicle(&mut operator(CAR_REGISTRATION, 1))
            .await
            .unwrap()
            .expect("car parked");
    }

    let open: Vec<_> = store.tickets().await.into_iter().filter(Ticket::is_open).collect();
    assert_eq!(open.len(), 2);
    assert_eq!(store.get_next_available_slot(VehicleCategory::Car).await.unwrap(), Some(3));
}
