//! API router

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::application::services::booking::BookingService;
use crate::interfaces::http::common::ApiResponse;

use super::handlers::{self, AppState};

async fn health_check() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("ok"))
}

/// Build the API router with all booking routes.
pub fn create_api_router(service: Arc<BookingService>) -> Router {
    let state = AppState { service };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/pricing/quote", post(handlers::quote))
        .route("/api/v1/availability", get(handlers::check_availability))
        .route("/api/v1/bookings", post(handlers::create_booking))
        .route(
            "/api/v1/bookings/{id}",
            get(handlers::get_booking).patch(handlers::update_booking),
        )
        .route(
            "/api/v1/bookings/code/{code}",
            get(handlers::get_booking_by_code),
        )
        .route(
            "/api/v1/bookings/{id}/transition",
            post(handlers::transition_booking),
        )
        .route(
            "/api/v1/homestays/{id}/calendar/{date}",
            put(handlers::set_calendar_override).delete(handlers::remove_calendar_override),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{LogNotifier, LogPaymentGateway};
    use crate::domain::{FeeRates, Homestay, SystemClock, User, UserRole};
    use crate::infrastructure::memory::InMemoryStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use tower::Service;

    fn app() -> Router {
        let store = Arc::new(InMemoryStore::new());

        store.insert_user(User {
            id: 1,
            full_name: "Anh Tran".to_string(),
            role: UserRole::Guest,
            created_at: Utc::now(),
        });
        store.insert_user(User {
            id: 2,
            full_name: "Binh Le".to_string(),
            role: UserRole::Guest,
            created_at: Utc::now(),
        });
        store.insert_user(User {
            id: 10,
            full_name: "Chi Nguyen".to_string(),
            role: UserRole::Host,
            created_at: Utc::now(),
        });
        store.insert_homestay(Homestay {
            id: 1,
            owner_id: 10,
            name: "Riverside Stay".to_string(),
            is_active: true,
            is_approved: true,
            base_nightly_price: Decimal::from(100),
            weekend_price: None,
            weekly_discount: None,
            monthly_discount: None,
            minimum_nights: 1,
            maximum_nights: 30,
            maximum_guests: 4,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });

        let service = Arc::new(BookingService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(LogNotifier),
            Arc::new(LogPaymentGateway),
            Arc::new(SystemClock),
            FeeRates::default(),
        ));

        create_api_router(service)
    }

    async fn send(app: &mut axum::routing::RouterIntoService<Body>, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.call(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    fn put_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn create_body() -> Value {
        json!({
            "actor_id": 1,
            "homestay_id": 1,
            "check_in": "2030-03-04",
            "check_out": "2030-03-07",
            "guests": 2,
            "adults": 2
        })
    }

    #[tokio::test]
    async fn health_responds_ok() {
        let mut app = app().into_service();
        let (status, body) = send(&mut app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
    }

    #[tokio::test]
    async fn quote_returns_breakdown() {
        let mut app = app().into_service();
        let (status, body) = send(
            &mut app,
            post_json(
                "/api/v1/pricing/quote",
                json!({
                    "homestay_id": 1,
                    "check_in": "2030-03-04",
                    "check_out": "2030-03-07",
                    "guests": 2
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["nights"], json!(3));
        assert_eq!(body["data"]["base_amount"], json!("300"));
        assert_eq!(body["data"]["total_amount"], json!("372.60"));
    }

    #[tokio::test]
    async fn booking_lifecycle_over_http() {
        let mut app = app().into_service();

        let (status, body) = send(&mut app, post_json("/api/v1/bookings", create_body())).await;
        assert_eq!(status, StatusCode::OK);
        let id = body["data"]["id"].as_i64().unwrap();
        assert_eq!(body["data"]["status"], json!("Pending"));

        // Overlapping request conflicts.
        let mut second = create_body();
        second["actor_id"] = json!(2);
        second["check_in"] = json!("2030-03-05");
        second["check_out"] = json!("2030-03-08");
        let (status, _) = send(&mut app, post_json("/api/v1/bookings", second)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        // Guest cannot confirm.
        let (status, _) = send(
            &mut app,
            post_json(
                &format!("/api/v1/bookings/{id}/transition"),
                json!({"actor_id": 1, "target": "Confirmed"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // Host confirms.
        let (status, body) = send(
            &mut app,
            post_json(
                &format!("/api/v1/bookings/{id}/transition"),
                json!({"actor_id": 10, "target": "Confirmed"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], json!("Confirmed"));

        // Unknown target status is a client error.
        let (status, _) = send(
            &mut app,
            post_json(
                &format!("/api/v1/bookings/{id}/transition"),
                json!({"actor_id": 10, "target": "Teleported"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // Availability now reports the range as taken.
        let (status, body) = send(
            &mut app,
            get("/api/v1/availability?homestay_id=1&check_in=2030-03-04&check_out=2030-03-07"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["available"], json!(false));
    }

    #[tokio::test]
    async fn view_permissions_map_to_403() {
        let mut app = app().into_service();

        let (_, body) = send(&mut app, post_json("/api/v1/bookings", create_body())).await;
        let id = body["data"]["id"].as_i64().unwrap();
        let code = body["data"]["code"].as_str().unwrap().to_string();

        let (status, _) = send(&mut app, get(&format!("/api/v1/bookings/{id}?actor_id=2"))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(
            &mut app,
            get(&format!("/api/v1/bookings/code/{code}?actor_id=1")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], json!(id));
    }

    #[tokio::test]
    async fn host_manages_calendar_over_http() {
        let mut app = app().into_service();
        let availability_uri =
            "/api/v1/availability?homestay_id=1&check_in=2030-03-04&check_out=2030-03-07";

        // A guest may not block dates.
        let (status, _) = send(
            &mut app,
            put_json(
                "/api/v1/homestays/1/calendar/2030-03-05",
                json!({"actor_id": 1, "is_blocked": true}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(
            &mut app,
            put_json(
                "/api/v1/homestays/1/calendar/2030-03-05",
                json!({"actor_id": 10, "is_blocked": true}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["is_blocked"], json!(true));

        let (_, body) = send(&mut app, get(availability_uri)).await;
        assert_eq!(body["data"]["available"], json!(false));

        let delete = Request::builder()
            .method("DELETE")
            .uri("/api/v1/homestays/1/calendar/2030-03-05?actor_id=10")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&mut app, delete).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&mut app, get(availability_uri)).await;
        assert_eq!(body["data"]["available"], json!(true));
    }

    #[tokio::test]
    async fn unknown_booking_is_404() {
        let mut app = app().into_service();
        let (status, _) = send(&mut app, get("/api/v1/bookings/999?actor_id=1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
