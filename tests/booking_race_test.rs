use island_backend::{
    domain::services::booking_service::{BookingService, ReservationRequest},
    error::AppError,
    infra::factory::connect_repositories,
};
use std::sync::Arc;
use tokio::task::JoinSet;
use uuid::Uuid;

fn request(i: usize, date: &str) -> ReservationRequest {
    ReservationRequest {
        name: format!("guest{}", i),
        contact: format!("guest{}@island.test", i),
        date: date.to_string(),
        time: "20:00".to_string(),
        category: "talk".to_string(),
        details: None,
    }
}

async fn race_for_one_slot(service: Arc<BookingService>, date: &str) -> (usize, usize) {
    let contenders = 12;
    let mut set = JoinSet::new();

    for i in 0..contenders {
        let service = service.clone();
        let req = request(i, date);
        set.spawn(async move { service.reserve(req).await });
    }

    let (mut won, mut conflicted) = (0, 0);
    while let Some(res) = set.join_next().await {
        match res.unwrap() {
            Ok(_) => won += 1,
            Err(AppError::Conflict(msg)) => {
                assert_eq!(msg, "该时间段已被预约");
                conflicted += 1;
            }
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
    (won, conflicted)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reservations_admit_exactly_one_sqlite() {
    let db_filename = format!("test_race_{}.db", Uuid::new_v4());
    let db_url = format!("sqlite://{}?mode=rwc", db_filename);

    let repos = connect_repositories(&db_url).await.expect("Failed to open test db");
    let service = Arc::new(BookingService::new(repos.booking.clone()));

    let (won, conflicted) = race_for_one_slot(service.clone(), "2027-01-09").await;
    assert_eq!(won, 1, "Double booking detected! Race condition exists.");
    assert_eq!(conflicted, 11);

    let times = service.booked_times(chrono::NaiveDate::from_ymd_opt(2027, 1, 9).unwrap()).await.unwrap();
    assert_eq!(times, vec!["20:00".to_string()]);

    drop(repos);
    let _ = std::fs::remove_file(&db_filename);
    let _ = std::fs::remove_file(format!("{}-wal", db_filename));
    let _ = std::fs::remove_file(format!("{}-shm", db_filename));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reservations_admit_exactly_one_postgres() {
    let db_url = match std::env::var("DATABASE_URL") {
        Ok(url) if url.starts_with("postgres") => url,
        _ => {
            println!("Skipping concurrency test (not targeting Postgres)");
            return;
        }
    };

    let repos = connect_repositories(&db_url).await.expect("Failed to connect to DB");
    let service = Arc::new(BookingService::new(repos.booking.clone()));

    // a random far-future day keeps reruns independent
    let offset = (Uuid::new_v4().as_u128() % 3000) as i64;
    let date = (chrono::NaiveDate::from_ymd_opt(2100, 1, 1).unwrap() + chrono::Duration::days(offset))
        .format("%Y-%m-%d")
        .to_string();

    let (won, conflicted) = race_for_one_slot(service, &date).await;
    assert_eq!(won, 1, "Double booking detected! Race condition exists.");
    assert_eq!(conflicted, 11);
}
