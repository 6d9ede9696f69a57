use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use bookstore_app::{bootstrap, books::models::Book};
use bookstore_db::Database;
use bookstore_kernel::settings::Settings;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app() -> Router {
    let settings = Settings::default();
    let db = Database::connect_in_memory().await.unwrap();
    let registry = bootstrap::assemble(&settings, &db).await.unwrap();
    bookstore_http::build_router(&registry, &settings)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    };
    app.clone().oneshot(request.unwrap()).await.unwrap()
}

async fn json_of<T: DeserializeOwned>(response: Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn book(title: &str, author: &str, publisher: &str, genre: &str, stock: i64) -> Value {
    json!({
        "title": title,
        "author": author,
        "genre": genre,
        "publisher": publisher,
        "price": 12.5,
        "stock": stock,
        "image1": "https://covers.example/front.jpg",
        "image2": "https://covers.example/back.jpg"
    })
}

async fn create(app: &Router, body: Value) -> Book {
    let response = send(app, "POST", "/api/books", Some(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_of(response).await
}

#[tokio::test]
async fn storefront_search_and_genre_filters() {
    let app = app().await;
    create(&app, book("La Sombra del Viento", "Carlos Ruiz Zafón", "Planeta", "Misterio", 3)).await;
    create(&app, book("El Nombre del Viento", "Patrick Rothfuss", "Plaza & Janés", "Fantasía", 0)).await;
    create(&app, book("Historia de Roma", "Mary Beard", "Crítica", "Historia", 2)).await;

    let titles = |books: Vec<Book>| books.into_iter().map(|b| b.title).collect::<Vec<_>>();

    let windy: Vec<Book> = json_of(send(&app, "GET", "/api/books?search=VIENTO", None).await).await;
    assert_eq!(titles(windy), vec!["El Nombre del Viento", "La Sombra del Viento"]);

    let by_publisher: Vec<Book> =
        json_of(send(&app, "GET", "/api/books?search=plaza", None).await).await;
    assert_eq!(titles(by_publisher), vec!["El Nombre del Viento"]);

    let fantasy: Vec<Book> =
        json_of(send(&app, "GET", "/api/books?genre=Fantas%C3%ADa", None).await).await;
    assert_eq!(titles(fantasy), vec!["El Nombre del Viento"]);

    let both: Vec<Book> = json_of(
        send(&app, "GET", "/api/books?search=viento&genre=Misterio", None).await,
    )
    .await;
    assert_eq!(titles(both), vec!["La Sombra del Viento"]);

    let all: Vec<Book> = json_of(send(&app, "GET", "/api/books?genre=all", None).await).await;
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|b| b.available == (b.stock > 0)));
}

#[tokio::test]
async fn admin_lifecycle_keeps_availability_consistent() {
    let app = app().await;
    let created = create(&app, book("Rayuela", "Julio Cortázar", "Sudamericana", "Ficción", 5)).await;
    assert!(created.available);
    let uri = format!("/api/books/{}", created.id);

    let mut sold_out = book("Rayuela", "Julio Cortázar", "Sudamericana", "Ficción", 0);
    sold_out["stock"] = json!("0");
    let updated: Book = json_of(send(&app, "PUT", &uri, Some(sold_out)).await).await;
    assert!(!updated.available);

    let fetched: Book = json_of(send(&app, "GET", &uri, None).await).await;
    assert_eq!(fetched, updated);

    let deleted = send(&app, "DELETE", &uri, None).await;
    assert_eq!(deleted.status(), StatusCode::OK);
    let confirmation: Value = json_of(deleted).await;
    assert_eq!(confirmation["message"], "book deleted");

    assert_eq!(send(&app, "GET", &uri, None).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(send(&app, "DELETE", &uri, None).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn genres_reflect_current_catalog() {
    let app = app().await;
    create(&app, book("Uno", "A", "P", "B", 1)).await;
    let second = create(&app, book("Dos", "A", "P", "A", 1)).await;
    create(&app, book("Tres", "A", "P", "B", 1)).await;

    let genres: Vec<String> = json_of(send(&app, "GET", "/api/books/genres", None).await).await;
    assert_eq!(genres, vec!["A", "B"]);

    send(&app, "DELETE", &format!("/api/books/{}", second.id), None).await;
    let genres: Vec<String> = json_of(send(&app, "GET", "/api/books/genres", None).await).await;
    assert_eq!(genres, vec!["B"]);
}

#[tokio::test]
async fn wire_format_uses_camel_case_and_request_ids() {
    let app = app().await;
    let response = send(
        &app,
        "POST",
        "/api/books",
        Some(book("Ficciones", "Jorge Luis Borges", "Sur", "Ficción", 1)),
    )
    .await;
    assert!(response.headers().contains_key("x-request-id"));

    let body: Value = json_of(response).await;
    for key in [
        "id", "title", "author", "genre", "publisher", "price", "stock", "description", "image1",
        "image2", "available", "createdAt", "updatedAt",
    ] {
        assert!(body.get(key).is_some(), "missing {key}");
    }
    assert_eq!(body["description"], "");
    assert_eq!(body["price"], 12.5);
}

#[tokio::test]
async fn client_errors_are_reported_in_standard_envelope() {
    let app = app().await;

    let bad_id = send(&app, "GET", "/api/books/abc", None).await;
    assert_eq!(bad_id.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_of(bad_id).await;
    assert_eq!(body["error"]["code"], "invalid_argument");
    assert!(body["error"]["trace_id"].is_string());

    let mut incomplete = book("Sin imagen", "A", "P", "G", 1);
    incomplete["image1"] = json!("");
    let missing = send(&app, "POST", "/api/books", Some(incomplete)).await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_of(missing).await;
    assert_eq!(body["error"]["details"][0]["field"], "image1");

    let listed: Vec<Book> = json_of(send(&app, "GET", "/api/books", None).await).await;
    assert!(listed.is_empty());
}

#[tokio::test]
async fn service_endpoints_are_mounted() {
    let app = app().await;

    assert_eq!(send(&app, "GET", "/healthz", None).await.status(), StatusCode::OK);
    assert_eq!(send(&app, "GET", "/api/books/health", None).await.status(), StatusCode::OK);

    let spec: Value = json_of(send(&app, "GET", "/docs/openapi.json", None).await).await;
    assert!(spec["paths"]["/api/books"]["post"].is_object());
    assert!(spec["paths"]["/api/books/{id}"]["put"].is_object());
}
