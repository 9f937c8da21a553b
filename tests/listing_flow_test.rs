//! End to end listing flow
//!
//! A live list api, a remote page source and a controller driving page changes

use std::sync::Arc;
use std::time::Duration;

use mentorclap::listing::catalog::{Catalog, Enquiry};
use mentorclap::listing::controller::{Navigation, PagedListController};
use mentorclap::listing::source::PageSource;
use mentorclap::web::client::{ClientBuilder, RemoteSource};
use tokio::sync::mpsc::unbounded_channel;

async fn spawn_api() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, mentorclap::web::router(Catalog::mock(4))).await.unwrap();
    });
    format!("http://{}", addr)
}

fn remote(base: &str) -> RemoteSource<Enquiry> {
    let mut builder = ClientBuilder::new(base);
    builder.use_json().set_timeout(Duration::from_secs(5));
    RemoteSource::new(builder.build().unwrap(), "/api/enquiries")
}

#[tokio::test]
async fn test_remote_source_matches_memory_source() {
    let base = spawn_api().await;
    let source = remote(&base);

    let fetched = source.fetch_page("city=bangalore&page=2").await.unwrap();
    let local = Catalog::mock(4).enquiries.page("city=bangalore&page=2").unwrap();
    assert_eq!(fetched, local);
    assert_eq!(fetched.total_count, 5);
    assert_eq!(fetched.items.len(), 1);
    assert_eq!(fetched.items[0].student, "Rohan");
}

#[tokio::test]
async fn test_remote_source_surfaces_api_errors() {
    let base = spawn_api().await;
    let err = remote(&base).fetch_page("page=0").await.unwrap_err();
    assert_eq!(err.code().domain, "LIST");
    assert_eq!(err.code().detail, "0002");
}

#[tokio::test]
async fn test_remote_source_unreachable() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = remote(&base).fetch_page("page=1").await.unwrap_err();
    assert_eq!(err.code().domain, "FTCH");
    assert_eq!(err.code().category, "HTTP");
}

#[tokio::test]
async fn test_controller_pages_through_remote_listing() {
    let base = spawn_api().await;
    let source = remote(&base);
    let (tx, mut rx) = unbounded_channel::<Navigation>();
    let mut controller = PagedListController::new("/dashboard/enquiries", "status=open&page=1", 4, Arc::new(tx));

    let view = controller.load(&source, 5).await.unwrap();
    assert_eq!(view.page.total_pages, 3);
    assert_eq!(view.items.len(), 4);
    let controls = view.controls.unwrap();
    assert_eq!(controls.pages.iter().map(|l| l.page).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(controls.next.unwrap().href, "/dashboard/enquiries?status=open&page=2");

    assert!(!controller.on_page_select(4));
    assert!(controller.on_page_select(3));
    let nav = rx.recv().await.unwrap();
    assert_eq!(nav.query, "status=open&page=3");

    controller.sync_location(&nav.query);
    let view = controller.load(&source, 5).await.unwrap();
    assert_eq!(view.page.current_page, 3);
    assert_eq!(view.items.len(), 1);
    assert!(view.controls.unwrap().next.is_none());
}

#[tokio::test]
async fn test_debounced_search_resets_page() {
    let base = spawn_api().await;
    let source = remote(&base);
    let (tx, mut rx) = unbounded_channel::<Navigation>();
    let mut controller =
        PagedListController::new("/dashboard/enquiries", "page=3", 4, Arc::new(tx)).with_debounce(Duration::from_millis(20));

    controller.on_search_input("m");
    controller.on_search_input("math");
    controller.on_search_input("mathematics");
    let nav = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap();
    assert_eq!(nav.query, "search=mathematics&page=1");

    controller.sync_location(&nav.query);
    let view = controller.load(&source, 5).await.unwrap();
    assert_eq!(view.search, "mathematics");
    assert_eq!(view.page.current_page, 1);
    assert_eq!(view.page.total_pages, 2);
    assert!(view.items.iter().all(|e| e.subject == "Mathematics"));
    assert!(tokio::time::timeout(Duration::from_millis(100), rx.recv()).await.is_err());
}
