//! Router tests against the in-memory store and fixed exchange rates

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use wishlist_server::models::Item;
use wishlist_server::{
    build_router, AppState, FixedRates, MemoryWishlistStore, UploadStore, WishlistStore,
};

const BOUNDARY: &str = "wishlist-test-boundary";

struct Harness {
    app: Router,
    store: Arc<MemoryWishlistStore>,
    rates: Arc<FixedRates>,
    public: TempDir,
}

fn harness() -> Harness {
    let public = TempDir::new().unwrap();
    let store = Arc::new(MemoryWishlistStore::new());
    let rates = Arc::new(FixedRates::new([("EUR", 0.9), ("JPY", 150.0)]));
    let state = AppState::new(store.clone(), rates.clone(), UploadStore::new(public.path()));

    Harness {
        app: build_router(state),
        store,
        rates,
        public,
    }
}

struct Reply {
    status: StatusCode,
    location: Option<String>,
    body: String,
}

async fn send(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_owned());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    Reply {
        status,
        location,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn form(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

fn multipart(uri: &str, fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"itemImage\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::post(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn item_fields<'a>(name: &'a str, price: &'a str, currency: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("name", name),
        ("price", price),
        ("store", "Corner Shop"),
        ("category", "Electronics"),
        ("priority", "High"),
        ("currency", currency),
    ]
}

fn stored_item(name: &str, price: f64, currency: &str, category: &str) -> Item {
    Item {
        name: name.into(),
        store: "Shop".into(),
        original_price: price.to_string(),
        converted_price: price,
        category: category.into(),
        priority: "Low".into(),
        currency: currency.into(),
        exchange_info: String::new(),
        image_path: None,
    }
}

#[tokio::test]
async fn static_pages_render() {
    let h = harness();
    for uri in [
        "/",
        "/createWishlist",
        "/revisitWishlist",
        "/getTotalOfWishlist",
        "/deleteAllWishlists",
        "/searchByCategory",
    ] {
        let reply = send(&h.app, get(uri)).await;
        assert_eq!(reply.status, StatusCode::OK, "{uri}");
        assert!(reply.body.contains("<form") || uri == "/", "{uri}");
    }
}

#[tokio::test]
async fn create_redirects_to_item_form() {
    let h = harness();

    let reply = send(
        &h.app,
        form("/createWishlist", "title=Birthday+List&description=June+party"),
    )
    .await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/createWishlist/birthday-list/addItems"));

    let wishlist = h.store.find_by_id("birthday-list").await.unwrap();
    assert_eq!(wishlist.title, "Birthday List");
    assert_eq!(wishlist.description, "June party");
    assert!(wishlist.items.is_empty());

    let page = send(&h.app, get("/createWishlist/birthday-list/addItems")).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Add Items to Birthday List"));
}

#[tokio::test]
async fn create_rejects_blank_title() {
    let h = harness();
    let reply = send(&h.app, form("/createWishlist", "title=++&description=")).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(h.store.is_empty().await);
}

#[tokio::test]
async fn encoded_ids_round_trip_through_links() {
    let h = harness();
    let reply = send(&h.app, form("/createWishlist", "title=Cars+%26+Bikes")).await;
    let location = reply.location.unwrap();
    assert_eq!(location, "/createWishlist/cars-%2526-bikes/addItems");

    let page = send(&h.app, get(&location)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Cars &amp; Bikes"));
}

#[tokio::test]
async fn colliding_titles_are_not_rejected() {
    let h = harness();
    for title in ["My+List", "my+list"] {
        let reply = send(&h.app, form("/createWishlist", &format!("title={title}"))).await;
        assert_eq!(reply.status, StatusCode::SEE_OTHER);
        assert_eq!(reply.location.as_deref(), Some("/createWishlist/my-list/addItems"));
    }
    assert_eq!(h.store.len().await, 2);
    assert_eq!(h.store.find_by_id("my-list").await.unwrap().title, "My List");
}

#[tokio::test]
async fn item_form_for_missing_wishlist_is_404() {
    let h = harness();
    let reply = send(&h.app, get("/createWishlist/ghost/addItems")).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body, "Wishlist not found");
}

#[tokio::test]
async fn usd_item_is_not_converted() {
    let h = harness();
    h.store.create("Gifts", "").await.unwrap();

    let reply = send(
        &h.app,
        multipart(
            "/createWishlist/gifts/processAddToWishlist",
            &item_fields("Headphones", "49.5", "USD"),
            None,
        ),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("49.50 USD"));

    let item = &h.store.find_by_id("gifts").await.unwrap().items[0];
    assert_eq!(item.original_price, "49.5");
    assert_eq!(item.converted_price, 49.5);
    assert!(item.exchange_info.is_empty());
    assert!(item.image_path.is_none());
    assert_eq!(h.rates.lookups(), 0);
}

#[tokio::test]
async fn eur_item_is_converted() {
    let h = harness();
    h.store.create("Gifts", "").await.unwrap();

    let reply = send(
        &h.app,
        multipart(
            "/createWishlist/gifts/processAddToWishlist",
            &item_fields("Camera", "100", "EUR"),
            None,
        ),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("$100 USD converted to 90.00 EUR"));

    let item = &h.store.find_by_id("gifts").await.unwrap().items[0];
    assert!((item.converted_price - 90.0).abs() < 1e-9);
    assert_eq!(item.currency, "EUR");
    assert_eq!(h.rates.lookups(), 1);
}

#[tokio::test]
async fn exchange_note_quotes_price_as_entered() {
    let h = harness();
    h.store.create("Gifts", "").await.unwrap();

    let reply = send(
        &h.app,
        multipart(
            "/createWishlist/gifts/processAddToWishlist",
            &item_fields("Camera", "100.00", "EUR"),
            None,
        ),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);

    let item = &h.store.find_by_id("gifts").await.unwrap().items[0];
    assert_eq!(item.original_price, "100.00");
    assert_eq!(item.exchange_info, "$100.00 USD converted to 90.00 EUR");
    assert!(reply.body.contains("$100.00 USD converted to 90.00 EUR"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_appends_lose_no_items() {
    const ADDS: usize = 20;

    let h = harness();
    h.store.create("Busy", "").await.unwrap();

    let handles: Vec<_> = (0..ADDS)
        .map(|i| {
            let app = h.app.clone();
            tokio::spawn(async move {
                let name = format!("item-{i}");
                let request = multipart(
                    "/createWishlist/busy/processAddToWishlist",
                    &item_fields(&name, "1", "USD"),
                    None,
                );
                send(&app, request).await.status
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.expect("task panicked"), StatusCode::OK);
    }

    let wishlist = h.store.find_by_id("busy").await.unwrap();
    assert_eq!(wishlist.items.len(), ADDS);
    for i in 0..ADDS {
        let name = format!("item-{i}");
        assert!(wishlist.items.iter().any(|item| item.name == name), "{name} missing");
    }
}

#[tokio::test]
async fn unknown_currency_fails_without_appending() {
    let h = harness();
    h.store.create("Gifts", "").await.unwrap();

    let reply = send(
        &h.app,
        multipart(
            "/createWishlist/gifts/processAddToWishlist",
            &item_fields("Kettle", "30", "XYZ"),
            None,
        ),
    )
    .await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(reply.body, "Something went wrong.");
    assert!(h.store.find_by_id("gifts").await.unwrap().items.is_empty());
}

#[tokio::test]
async fn non_numeric_price_is_rejected() {
    let h = harness();
    h.store.create("Gifts", "").await.unwrap();

    let reply = send(
        &h.app,
        multipart(
            "/createWishlist/gifts/processAddToWishlist",
            &item_fields("Kettle", "cheap", "USD"),
            None,
        ),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn item_for_missing_wishlist_is_404() {
    let h = harness();
    let reply = send(
        &h.app,
        multipart(
            "/createWishlist/ghost/processAddToWishlist",
            &item_fields("Kettle", "30", "USD"),
            None,
        ),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn image_is_stored_and_served() {
    let h = harness();
    h.store.create("Gifts", "").await.unwrap();

    let reply = send(
        &h.app,
        multipart(
            "/createWishlist/gifts/processAddToWishlist",
            &item_fields("Lamp", "20", "USD"),
            Some(("lamp.png", b"fake image bytes")),
        ),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);

    let item = &h.store.find_by_id("gifts").await.unwrap().items[0];
    let image_path = item.image_path.clone().unwrap();
    assert!(image_path.starts_with("/uploads/"));
    assert!(image_path.ends_with(".png"));
    assert!(reply.body.contains(&image_path));

    let on_disk = h.public.path().join(image_path.trim_start_matches('/'));
    assert_eq!(std::fs::read(on_disk).unwrap(), b"fake image bytes");

    let served = send(&h.app, get(&image_path)).await;
    assert_eq!(served.status, StatusCode::OK);
    assert_eq!(served.body, "fake image bytes");
}

#[tokio::test]
async fn empty_file_field_means_no_image() {
    let h = harness();
    h.store.create("Gifts", "").await.unwrap();

    let reply = send(
        &h.app,
        multipart(
            "/createWishlist/gifts/processAddToWishlist",
            &item_fields("Lamp", "20", "USD"),
            Some(("", b"")),
        ),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(h.store.find_by_id("gifts").await.unwrap().items[0].image_path.is_none());
    assert!(!h.public.path().join("uploads").exists());
}

#[tokio::test]
async fn revisit_shows_items_by_title() {
    let h = harness();
    let wl = h.store.create("Home", "for the flat").await.unwrap();
    h.store.append_item(&wl.id, stored_item("Rug", 120.0, "GBP", "Decor")).await.unwrap();
    h.store.append_item(&wl.id, stored_item("Vase", 15.0, "USD", "Decor")).await.unwrap();

    let reply = send(&h.app, form("/processRevisitWishlist", "wishlistName=Home")).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Price (GBP)"));
    assert!(reply.body.contains("$120.00"));
    assert!(reply.body.contains("Vase"));

    let missing = send(&h.app, form("/processRevisitWishlist", "wishlistName=home")).await;
    assert_eq!(missing.status, StatusCode::OK);
    assert_eq!(missing.body, "Wishlist not found.");
}

#[tokio::test]
async fn total_sums_converted_prices_with_first_currency() {
    let h = harness();
    let wl = h.store.create("Trip", "").await.unwrap();
    for (name, price, currency) in [("a", 10.0, "EUR"), ("b", 20.5, "EUR"), ("c", 5.25, "USD")] {
        h.store
            .append_item(&wl.id, stored_item(name, price, currency, "Travel"))
            .await
            .unwrap();
    }

    let reply = send(&h.app, form("/processGetTotal", "wishlistName=Trip")).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains(r#"<span id="wishlist-total">35.75</span>"#));
    assert!(reply.body.contains(r#"<span id="wishlist-currency">EUR</span>"#));

    let missing = send(&h.app, form("/processGetTotal", "wishlistName=Nope")).await;
    assert_eq!(missing.body, "Wishlist not found.");
}

#[tokio::test]
async fn delete_one_by_id() {
    let h = harness();
    h.store.create("Old Stuff", "").await.unwrap();

    let reply = send(&h.app, form("/processDeleteWishlist", "wishlistName=old-stuff")).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Deleted Old Stuff"));
    assert!(h.store.is_empty().await);

    let again = send(&h.app, form("/processDeleteWishlist", "wishlistName=old-stuff")).await;
    assert_eq!(again.body, "Wishlist not found.");
}

#[tokio::test]
async fn delete_all_then_every_lookup_misses() {
    let h = harness();
    let titles = ["One", "Two", "Three"];
    for title in titles {
        h.store.create(title, "").await.unwrap();
    }

    let reply = send(&h.app, form("/processDeleteAllWishlists", "")).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("3 removed"));

    for title in titles {
        let reply = send(
            &h.app,
            form("/processRevisitWishlist", &format!("wishlistName={title}")),
        )
        .await;
        assert_eq!(reply.body, "Wishlist not found.");
    }
}

#[tokio::test]
async fn search_returns_rows_tagged_with_wishlist_title() {
    let h = harness();
    let desk = h.store.create("Desk Setup", "").await.unwrap();
    let gifts = h.store.create("Gifts", "").await.unwrap();
    h.store.append_item(&desk.id, stored_item("Monitor", 300.0, "USD", "Electronics")).await.unwrap();
    h.store.append_item(&desk.id, stored_item("Chair", 150.0, "USD", "Furniture")).await.unwrap();
    h.store.append_item(&gifts.id, stored_item("Speaker", 80.0, "USD", "Electronics")).await.unwrap();
    h.store.append_item(&gifts.id, stored_item("Cable", 5.0, "USD", "electronics")).await.unwrap();

    let reply = send(
        &h.app,
        form("/processSearchByCategory", "categoryName=Electronics"),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("<td>Desk Setup</td><td>Monitor</td>"));
    assert!(reply.body.contains("<td>Gifts</td><td>Speaker</td>"));
    assert!(!reply.body.contains("Chair"));
    assert!(!reply.body.contains("Cable"));
    assert!(reply.body.contains("Price (USD)"));
}
