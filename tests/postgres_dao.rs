//! Runs against a live database: `DATABASE_URL=... cargo test -- --ignored`.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use parking_system::dao::{ParkingSpotDao, ParkingSpotRepository, TicketDao, TicketRepository};
use parking_system::models::{ParkingSpot, ParkingType, Ticket};

async fn prepared_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!().run(&pool).await.expect("Failed to run migrations");

    sqlx::query("DELETE FROM ticket").execute(&pool).await.unwrap();
    sqlx::query("UPDATE parking SET available = TRUE")
        .execute(&pool)
        .await
        .unwrap();
    pool
}

#[tokio::test]
#[ignore = "requires a Postgres database in DATABASE_URL"]
async fn test_spot_allocation_round_trip() {
    let pool = prepared_pool().await;
    let spots = ParkingSpotDao::new(pool);

    assert_eq!(spots.get_next_available_slot(ParkingType::Car).await.unwrap(), 1);
    assert_eq!(spots.get_next_available_slot(ParkingType::Bike).await.unwrap(), 4);

    for id in [4, 5] {
        let taken = ParkingSpot::new(id, ParkingType::Bike, false);
        assert!(spots.update_parking(&taken).await.unwrap());
    }
    assert_eq!(spots.get_next_available_slot(ParkingType::Bike).await.unwrap(), 0);

    let ghost = ParkingSpot::new(99, ParkingType::Car, false);
    assert!(!spots.update_parking(&ghost).await.unwrap());
}

#[tokio::test]
#[ignore = "requires a Postgres database in DATABASE_URL"]
async fn test_ticket_round_trip() {
    let pool = prepared_pool().await;
    let tickets = TicketDao::new(pool);

    let spot = ParkingSpot::new(2, ParkingType::Car, false);
    let ticket = Ticket::open("ABCDEF", spot, Utc::now() - Duration::hours(1));
    assert!(tickets.save_ticket(&ticket).await.unwrap());
    assert_eq!(tickets.get_nb_ticket("ABCDEF").await.unwrap(), 0);

    let mut open = tickets.get_ticket("ABCDEF").await.unwrap().unwrap();
    assert!(open.id.is_some());
    assert_eq!(open.parking_spot.id, 2);
    assert_eq!(open.parking_spot.parking_type, ParkingType::Car);

    open.out_time = Some(Utc::now());
    open.price = Decimal::new(15, 1);
    assert!(tickets.update_ticket(&open).await.unwrap());

    assert!(tickets.get_ticket("ABCDEF").await.unwrap().is_none());
    assert_eq!(tickets.get_nb_ticket("ABCDEF").await.unwrap(), 1);
}

#[tokio::test]
#[ignore = "requires a Postgres database in DATABASE_URL"]
async fn test_update_unsaved_ticket_reports_false() {
    let pool = prepared_pool().await;
    let tickets = TicketDao::new(pool);

    let ticket = Ticket::open("ABCDEF", ParkingSpot::new(1, ParkingType::Car, false), Utc::now());
    assert!(!tickets.update_ticket(&ticket).await.unwrap());
}
