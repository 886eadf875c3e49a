mod common;

use axum::http::StatusCode;
use club_registry::{
    domain::ports::CounterRepository,
    infra::repositories::sqlite_counter_repo::SqliteCounterRepo,
};
use common::{club_payload, TestApp};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_minting_never_duplicates() {
    let app = TestApp::new().await;
    let repo = Arc::new(SqliteCounterRepo::new(app.pool.clone()));

    let workers = 8;
    let per_worker = 25;
    let mut set = JoinSet::new();

    for _ in 0..workers {
        let repo = repo.clone();
        set.spawn(async move {
            let mut minted = Vec::with_capacity(per_worker);
            for _ in 0..per_worker {
                minted.push(repo.next_value("event").await.expect("mint failed"));
            }
            minted
        });
    }

    let mut all = Vec::new();
    while let Some(res) = set.join_next().await {
        let minted = res.unwrap();
        // Each caller sees its own values strictly increasing.
        assert!(minted.windows(2).all(|w| w[0] < w[1]));
        all.extend(minted);
    }

    let total = workers * per_worker;
    let unique: HashSet<i64> = all.iter().copied().collect();
    assert_eq!(unique.len(), total, "duplicate ids minted");
    assert_eq!(*all.iter().max().unwrap(), total as i64);
    assert_eq!(repo.current_value("event").await.unwrap(), total as i64);

    // Kinds are independent sequences.
    assert_eq!(repo.current_value("prize").await.unwrap(), 0);
    assert_eq!(repo.next_value("prize").await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_club_creates_get_distinct_ids() {
    let app = Arc::new(TestApp::new().await);
    let auth = Arc::new(app.manager().await);

    let mut set = JoinSet::new();
    for i in 0..20 {
        let app = app.clone();
        let auth = auth.clone();
        set.spawn(async move {
            let (status, body) = app.send(
                "POST",
                "/api/v1/clubs",
                Some(&auth),
                Some(club_payload(&format!("CLB {}", i), "gv001")),
            ).await;
            assert_eq!(status, StatusCode::CREATED);
            body["clubId"].as_i64().unwrap()
        });
    }

    let mut ids = Vec::new();
    while let Some(res) = set.join_next().await {
        ids.push(res.unwrap());
    }
    ids.sort_unstable();

    assert_eq!(ids, (1..=20).collect::<Vec<i64>>());
}
