mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use std::io::Cursor;

use axum::Router;
use common::{artist, genre, new_event, setup, TestApp, JWT_SECRET};
use gallery_kit::entities::genre::CONTEMPORARY;
use gallery_kit::middleware::auth::{issue_token, Role};
use gallery_kit::routes::create_routes;
use gallery_kit::tracking::Tracked;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn router(app: &TestApp) -> Router {
    create_routes(app.state.clone())
}

fn bearer() -> String {
    format!("Bearer {}", issue_token(JWT_SECRET, "curator", Role::Admin, 1).unwrap())
}

async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router(app).oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn get_json(app: &TestApp, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

async fn admin_json(app: &TestApp, method: &str, uri: &str, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, bearer())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

const BOUNDARY: &str = "gallery-kit-boundary";

async fn upload(app: &TestApp, uri: &str, field: &str, content_type: &str, data: &[u8]) -> (StatusCode, Value) {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"upload\"\r\nContent-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, bearer())
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

fn png() -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(image::RgbImage::new(4, 4))
        .write_to(&mut buffer, image::ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

fn stored_files(app: &TestApp, dir: &str) -> usize {
    std::fs::read_dir(app.media_root.join(dir))
        .map(|entries| entries.count())
        .unwrap_or(0)
}

#[tokio::test]
async fn admin_routes_need_a_token() {
    let app = setup().await;

    let request = Request::builder().uri("/admin/artists").body(Body::empty()).unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let forged = issue_token("not-the-secret", "mallory", Role::Su, 1).unwrap();
    let request = Request::builder()
        .uri("/admin/artists")
        .header(header::AUTHORIZATION, format!("Bearer {}", forged))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn artists_created_in_the_back_office_show_up_publicly() {
    let app = setup().await;
    let contemporary = genre(&app, CONTEMPORARY).await;

    let (status, created) = admin_json(
        &app,
        "POST",
        "/admin/artists",
        json!({ "first_name": "Jane", "last_name": "Doe" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["slug"], "jane-doe-001");

    // No active artworks yet.
    let (status, _) = get_json(&app, "/artist/jane-doe-001").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, artwork) = admin_json(
        &app,
        "POST",
        "/admin/artworks",
        json!({
            "title": "Neon City",
            "inventory_name": "INV-1",
            "internal_name": "neon-1",
            "artist_id": created["id"],
            "genre_id": contemporary.id,
            "year": "2021",
            "style_class": "ABST",
            "medium_description": "Acrylic on canvas",
            "image_height": 10.0,
            "image_width": 20.0,
            "is_representative": true,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{artwork}");
    assert_eq!(artwork["slug"], "neon-city-001");
    assert_eq!(artwork["height_metric"], 25.4);

    let (status, page) = get_json(&app, "/artist/jane-doe-001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["artist"]["first_name"], "Jane");
    assert_eq!(page["artworks"][0]["url"], "/artwork/jane-doe-001/neon-city-001");
    assert_eq!(page["artworks"][0]["pricing_message"], "Please inquire");

    let (status, home) = get_json(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(home["artworks"][0]["slug"], "neon-city-001");

    let (status, detail) = get_json(&app, "/artwork/jane-doe-001/neon-city-001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["selected_artwork"]["title"], "Neon City");
    assert_eq!(detail["other_artworks"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn artworks_need_a_known_artist() {
    let app = setup().await;
    let contemporary = genre(&app, CONTEMPORARY).await;

    let (status, _) = admin_json(
        &app,
        "POST",
        "/admin/artworks",
        json!({
            "title": "Orphan",
            "inventory_name": "INV-2",
            "internal_name": "orphan-2",
            "artist_id": uuid::Uuid::new_v4(),
            "genre_id": contemporary.id,
            "year": "2021",
            "style_class": "ABST",
            "medium_description": "Acrylic on canvas",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_categories_and_slugs_are_not_found() {
    let app = setup().await;

    let (status, _) = get_json(&app, "/artists/baroque").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get_json(&app, "/artist/nobody-001").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get_json(&app, "/learn/nothing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn events_list_is_not_found_when_empty() {
    let app = setup().await;
    let (status, body) = get_json(&app, "/events").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No events found");
}

#[tokio::test]
async fn events_carry_their_featured_artists() {
    let app = setup().await;
    let jane = artist(&app, "Jane", "Doe").await;

    let (status, created) = admin_json(
        &app,
        "POST",
        "/admin/events",
        json!({
            "title": "Monsoon Show",
            "kind": "Exhibition",
            "start_date": "2024-07-01",
            "end_date": "2024-07-14",
            "location": "Main hall",
            "artist_ids": [jane.id],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["slug"], "monsoon-show-001");
    assert_eq!(created["time"], "6:00 pm - 9:00 pm");

    let (status, event) = get_json(&app, "/event/monsoon-show-001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(event["artists"][0]["slug"], "jane-doe-001");

    let (status, events) = get_json(&app, "/events").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(events.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn rejected_featured_artists_leave_no_event_behind() {
    let app = setup().await;
    let ghost = json!({
        "title": "Ghost Show",
        "kind": "Exhibition",
        "start_date": "2024-07-01",
        "end_date": "2024-07-14",
        "location": "Main hall",
        "artist_ids": [uuid::Uuid::new_v4()],
    });

    let (status, body) = admin_json(&app, "POST", "/admin/events", ghost.clone()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown artist in artist_ids");

    let (status, _) = get_json(&app, "/event/ghost-show-001").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let mut retry = ghost;
    retry["artist_ids"] = json!([]);
    let (status, created) = admin_json(&app, "POST", "/admin/events", retry).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["slug"], "ghost-show-001");
}

#[tokio::test]
async fn rejected_featured_artists_leave_the_event_unchanged() {
    let app = setup().await;
    let show = app.store().save(Tracked::new(new_event("Monsoon Show"))).await.unwrap();

    let (status, _) = admin_json(
        &app,
        "PUT",
        &format!("/admin/events/{}", show.id),
        json!({ "title": "Renamed Show", "artist_ids": [uuid::Uuid::new_v4()] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, event) = get_json(&app, "/event/monsoon-show-001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(event["title"], "Monsoon Show");
}

#[tokio::test]
async fn updates_can_clear_optional_fields() {
    let app = setup().await;
    let show = app.store().save(Tracked::new(new_event("Monsoon Show"))).await.unwrap();
    assert_eq!(show.total_seats, Some(40));

    let uri = format!("/admin/events/{}", show.id);
    let (status, kept) = admin_json(&app, "PUT", &uri, json!({ "details": "Opening night" })).await;
    assert_eq!(status, StatusCode::OK, "{kept}");
    assert_eq!(kept["total_seats"], 40);

    let (status, cleared) = admin_json(&app, "PUT", &uri, json!({ "total_seats": null })).await;
    assert_eq!(status, StatusCode::OK, "{cleared}");
    assert!(cleared["total_seats"].is_null());
}

#[tokio::test]
async fn biographies_are_uploaded_as_pdf() {
    let app = setup().await;
    let jane = artist(&app, "Jane", "Doe").await;
    let uri = format!("/admin/artists/{}/biography", jane.id);

    let (status, _) = upload(&app, &uri, "file", "text/plain", b"not a pdf").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = upload(&app, &uri, "attachment", "application/pdf", b"%PDF-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file field found");
    assert_eq!(stored_files(&app, "biographies"), 0);

    let (status, saved) = upload(&app, &uri, "file", "application/pdf", b"%PDF-1").await;
    assert_eq!(status, StatusCode::OK, "{saved}");
    let path = saved["biography"].as_str().unwrap();
    assert!(path.starts_with("biographies/jane-doe-001-") && path.ends_with(".pdf"), "{path}");
    assert!(app.media_root.join(path).exists());

    let (status, replaced) = upload(&app, &uri, "file", "application/pdf", b"%PDF-2").await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(replaced["biography"], saved["biography"]);
    assert_eq!(stored_files(&app, "biographies"), 1);
}

#[tokio::test]
async fn event_images_must_be_images() {
    let app = setup().await;
    let show = app.store().save(Tracked::new(new_event("Monsoon Show"))).await.unwrap();
    let uri = format!("/admin/events/{}/image", show.id);

    let (status, _) = upload(&app, &uri, "file", "text/plain", b"hello").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = upload(&app, &uri, "file", "image/png", b"not really a png").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(stored_files(&app, "events"), 0);

    let (status, saved) = upload(&app, &uri, "file", "image/png", &png()).await;
    assert_eq!(status, StatusCode::OK, "{saved}");
    let path = saved["image"].as_str().unwrap();
    assert!(path.starts_with("events/monsoon-show-001-") && path.ends_with(".png"), "{path}");
    assert!(app.media_root.join(path).exists());

    let missing = format!("/admin/events/{}/image", uuid::Uuid::new_v4());
    let (status, _) = upload(&app, &missing, "file", "image/png", &png()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn events_may_not_end_before_they_start() {
    let app = setup().await;

    let (status, _) = admin_json(
        &app,
        "POST",
        "/admin/events",
        json!({
            "title": "Backwards",
            "kind": "Talk",
            "start_date": "2024-07-14",
            "end_date": "2024-07-01",
            "location": "Library",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_returns_artworks_and_artists() {
    let app = setup().await;
    artist(&app, "Jane", "Doe").await;

    let (status, results) = get_json(&app, "/search?q=jane").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(results["artists"][0]["slug"], "jane-doe-001");
    assert_eq!(results["artworks"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn sitemap_is_served_as_xml() {
    let app = setup().await;
    artist(&app, "Jane", "Doe").await;

    let request = Request::builder().uri("/sitemap.xml").body(Body::empty()).unwrap();
    let response = router(&app).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/xml; charset=utf-8"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let xml = String::from_utf8(body.to_vec()).unwrap();
    assert!(xml.contains("<loc>http://localhost:3000/artist/jane-doe-001</loc>"), "{xml}");
    assert!(xml.contains("<priority>0.75</priority>"), "{xml}");
}

#[tokio::test]
async fn openapi_document_is_published() {
    let app = setup().await;
    let (status, doc) = get_json(&app, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/admin/artworks"].is_object());
    assert!(doc["components"]["securitySchemes"]["bearer_auth"].is_object());
}
