//! Integration Tests for the Page Cache
//!
//! Serves pages from a local axum server and fetches them over HTTP through
//! the read-through cache.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use nosql_kit::{Error, HttpFetcher, KeyValueStore, MemoryStore, PageCache};

// == Helper Functions ==

/// Starts a page server on an ephemeral port. Returns its base URL and the
/// number of requests it has served.
async fn spawn_page_server() -> (String, Arc<AtomicUsize>) {
    let served = Arc::new(AtomicUsize::new(0));

    let app = Router::new()
        .route(
            "/page/:name",
            get(
                |State(served): State<Arc<AtomicUsize>>, Path(name): Path<String>| async move {
                    let n = served.fetch_add(1, Ordering::SeqCst) + 1;
                    format!("<h1>{name}</h1><p>render {n}</p>")
                },
            ),
        )
        .route(
            "/missing",
            get(|State(served): State<Arc<AtomicUsize>>| async move {
                served.fetch_add(1, Ordering::SeqCst);
                (StatusCode::NOT_FOUND, "no such page")
            }),
        )
        .with_state(served.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), served)
}

fn page_cache(store: &Arc<MemoryStore>) -> PageCache<HttpFetcher> {
    PageCache::new(HttpFetcher::new(), store.clone())
}

// == Read-Through Tests ==

#[tokio::test]
async fn test_first_call_fetches_second_is_cached() {
    let (base, served) = spawn_page_server().await;
    let store = Arc::new(MemoryStore::new());
    let cache = page_cache(&store);
    let url = format!("{base}/page/home");

    let first = cache.get_page(&url).await.unwrap();
    let second = cache.get_page(&url).await.unwrap();

    assert_eq!(first, "<h1>home</h1><p>render 1</p>");
    assert_eq!(second, first);
    assert_eq!(served.load(Ordering::SeqCst), 1);
    assert_eq!(cache.access_count(&url).await.unwrap(), 1);
    assert_eq!(
        store.get(&format!("count:{url}")).await.unwrap(),
        Some(b"1".to_vec())
    );
}

#[tokio::test]
async fn test_expired_page_is_fetched_again() {
    let (base, served) = spawn_page_server().await;
    let store = Arc::new(MemoryStore::new());
    let cache = page_cache(&store).with_ttl(Duration::from_millis(300));
    let url = format!("{base}/page/news");

    let first = cache.get_page(&url).await.unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;
    let second = cache.get_page(&url).await.unwrap();

    assert_eq!(first, "<h1>news</h1><p>render 1</p>");
    assert_eq!(second, "<h1>news</h1><p>render 2</p>");
    assert_eq!(served.load(Ordering::SeqCst), 2);
    assert_eq!(cache.access_count(&url).await.unwrap(), 2);
}

#[tokio::test]
async fn test_error_status_body_is_cached() {
    let (base, served) = spawn_page_server().await;
    let store = Arc::new(MemoryStore::new());
    let cache = page_cache(&store);
    let url = format!("{base}/missing");

    assert_eq!(cache.get_page(&url).await.unwrap(), "no such page");
    assert_eq!(cache.get_page(&url).await.unwrap(), "no such page");
    assert_eq!(served.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unreachable_host_propagates() {
    // Reserve a port, then free it so nothing listens there
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = Arc::new(MemoryStore::new());
    let cache = page_cache(&store);
    let url = format!("http://{addr}/page/x");

    let result = cache.get_page(&url).await;

    assert!(matches!(result, Err(Error::Fetch(_))));
    assert_eq!(store.get(&format!("cached:{url}")).await.unwrap(), None);
}
