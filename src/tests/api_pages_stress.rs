use crate::domain::Page;
use crate::io::{LocalPageStore, PageStore};
use crate::tests::mocks::test_app;
use axum::{body::Body, http::Request, http::StatusCode};
use rand::Rng;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tower::ServiceExt;

// many clients reading random pages and rewriting them at the same time, against real files
#[tokio::test]
#[ignore] // heavy; run with `cargo test -- --ignored`
async fn test_api_hammer_random_access() {
    let page_count = 200;
    let request_count = 5000;

    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(LocalPageStore::new(dir.path(), true));
    for i in 0..page_count {
        let page = Page::new(format!("Page{}", i), format!("content of page {}", i));
        store.save(&page).await.unwrap();
    }

    let app = test_app(store);
    let mut set = JoinSet::new();
    let start = Instant::now();

    for n in 0..request_count {
        let app = app.clone();
        set.spawn(async move {
            let (target, write) = {
                let mut rng = rand::rng();
                (rng.random_range(0..page_count), rng.random_bool(0.2))
            };

            let request = if write {
                Request::builder()
                    .method("POST")
                    .uri(format!("/save/Page{}", target))
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from(format!("body=rewrite+{}", n)))
                    .unwrap()
            } else {
                Request::builder()
                    .uri(format!("/view/Page{}", target))
                    .body(Body::empty())
                    .unwrap()
            };

            let response = app.oneshot(request).await.unwrap();
            let expected = if write {
                StatusCode::FOUND
            } else {
                StatusCode::OK
            };
            assert_eq!(response.status(), expected);
        });
    }

    while let Some(result) = set.join_next().await {
        result.unwrap();
    }

    let duration = start.elapsed();
    println!("\nRANDOM ACCESS TEST RESULT:");
    println!("Pages in system: {}", page_count);
    println!("Served {} random requests in {:?}", request_count, duration);
    println!(
        "Requests per second: {:.2}",
        request_count as f64 / duration.as_secs_f64()
    );
}
