// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Two clients derive the same id from the advisory number and register at
//! once. Nothing stops the collision: both succeed and one document remains.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::MultipartBody;
use tower::ServiceExt;

mod common;

const NUM_CONCURRENT_REGISTRATIONS: usize = 8;

async fn advisory_number(router: &axum::Router) -> u64 {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/latest-business-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    common::body_json(response).await["lastNumber"]
        .as_u64()
        .unwrap()
}

#[tokio::test]
async fn test_colliding_registrations_last_write_wins() {
    let app = common::create_test_app();

    let seed = MultipartBody::new().business("BIZ041", "Existing").into_request();
    assert_eq!(
        app.router.clone().oneshot(seed).await.unwrap().status(),
        StatusCode::OK
    );

    // Every client reads the same advisory number
    let mut next_ids = Vec::new();
    for _ in 0..NUM_CONCURRENT_REGISTRATIONS {
        next_ids.push(format!("BIZ{:03}", advisory_number(&app.router).await + 1));
    }
    assert!(next_ids.iter().all(|id| id == "BIZ042"));

    let mut handles = vec![];
    for (i, id) in next_ids.into_iter().enumerate() {
        let router = app.router.clone();
        handles.push(tokio::spawn(async move {
            let request = MultipartBody::new()
                .business(&id, &format!("Client {}", i))
                .file("cover", "c.png", format!("cover {}", i).as_bytes())
                .into_request();
            router.oneshot(request).await.unwrap().status()
        }));
    }

    // Nobody is told about the collision
    for handle in handles {
        assert_eq!(handle.await.expect("Task join failed"), StatusCode::OK);
    }

    // Exactly one whole document survives, from one of the clients
    let record = app.state.records.read("BIZ042").await.unwrap().unwrap();
    let name = record.metadata.name.clone().unwrap();
    let winner: usize = name.strip_prefix("Client ").unwrap().parse().unwrap();
    assert!(winner < NUM_CONCURRENT_REGISTRATIONS);

    let cover_id = record
        .cover
        .as_deref()
        .unwrap()
        .strip_prefix("https://objects.memory.invalid/")
        .unwrap();
    assert_eq!(
        app.store.get(cover_id).unwrap().as_ref(),
        format!("cover {}", winner).as_bytes()
    );

    // Losers' images are still uploaded but unreferenced
    assert_eq!(
        app.store.objects_in("businesses/BIZ042").len(),
        NUM_CONCURRENT_REGISTRATIONS
    );
    assert_eq!(
        app.state.records.list_keys().await.unwrap().len(),
        2,
        "only BIZ041 and BIZ042 should exist"
    );
    assert_eq!(advisory_number(&app.router).await, 42);
}
