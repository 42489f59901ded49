use std::sync::Arc;
use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{BoxError, Json, Router};
use metroroute_core::prelude::*;
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::config::HttpConfig;

#[derive(Clone)]
pub struct AppState {
    pub network: Arc<MetroNetwork>,
}

pub fn build_router(network: Arc<MetroNetwork>, http: &HttpConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_middleware_error))
        .timeout(Duration::from_secs(http.request_timeout_secs))
        .layer(GlobalConcurrencyLimitLayer::new(http.max_concurrent_requests));

    Router::new()
        .route("/health", get(health))
        .route("/stations", get(stations))
        .route("/route", get(route))
        .route("/route/geojson", get(route_geojson))
        .layer(middleware)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(AppState { network })
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { error: error.into() })).into_response()
}

async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        error_response(StatusCode::REQUEST_TIMEOUT, "request timed out")
    } else {
        error!("unhandled middleware error: {err}");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

async fn health() -> &'static str {
    "OK"
}

#[derive(Debug, Serialize)]
struct StationEntry {
    name: String,
    lat: Option<f64>,
    lng: Option<f64>,
}

async fn stations(State(state): State<AppState>) -> Json<Vec<StationEntry>> {
    let network = &state.network;
    let entries = network
        .station_names()
        .into_iter()
        .map(|name| {
            let point = network.station_coordinate(&name);
            StationEntry {
                lat: point.map(|p| p.y()),
                lng: point.map(|p| p.x()),
                name,
            }
        })
        .collect();
    Json(entries)
}

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    from: String,
    to: String,
    criterion: Option<String>,
}

#[derive(Debug, Serialize)]
struct RouteResponse {
    criterion: Criterion,
    stops: Path,
    summary: TripSummary,
    directions: Vec<String>,
}

/// Runs the query off the async workers. `Err` is a finished error response.
async fn run_query(state: &AppState, query: RouteQuery) -> Result<(Criterion, Path), Response> {
    let criterion = match query.criterion.as_deref() {
        Some(raw) => raw
            .parse::<Criterion>()
            .map_err(|e| error_response(StatusCode::BAD_REQUEST, e))?,
        None => Criterion::LeastTime,
    };

    let network = Arc::clone(&state.network);
    let RouteQuery { from, to, .. } = query;
    let (path, from, to) = tokio::task::spawn_blocking(move || {
        let path = find_route(&network, &from, &to, criterion);
        (path, from, to)
    })
    .await
    .map_err(|e| {
        error!("route query task failed: {e}");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, "route query failed")
    })?;

    if path.is_empty() {
        debug!("no {criterion} route from {from} to {to}");
        return Err(error_response(
            StatusCode::NOT_FOUND,
            format!("no route from '{from}' to '{to}'"),
        ));
    }
    Ok((criterion, path))
}

async fn route(State(state): State<AppState>, Query(query): Query<RouteQuery>) -> Response {
    let (criterion, path) = match run_query(&state, query).await {
        Ok(found) => found,
        Err(response) => return response,
    };

    let directions = path
        .directions()
        .iter()
        .map(ToString::to_string)
        .collect();
    Json(RouteResponse {
        criterion,
        summary: path.summary(),
        stops: path,
        directions,
    })
    .into_response()
}

async fn route_geojson(State(state): State<AppState>, Query(query): Query<RouteQuery>) -> Response {
    let (_, path) = match run_query(&state, query).await {
        Ok(found) => found,
        Err(response) => return response,
    };

    match to_geojson_string(&state.network, &path) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/geo+json")], body).into_response(),
        Err(e) => {
            error!("GeoJSON export failed: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use geo::Point;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    fn segment(from: &str, to: &str, time: Time, cost: Cost, line: &str, x: f64) -> SegmentRecord {
        SegmentRecord {
            from: from.to_string(),
            to: to.to_string(),
            time,
            distance: 1.0,
            cost,
            line: line.to_string(),
            from_coord: Point::new(x, 28.6),
            to_coord: Point::new(x + 0.01, 28.6),
        }
    }

    fn router() -> Router {
        let network = MetroNetwork::build(vec![
            segment("A", "B", 2, 10, "Red Line", 77.00),
            segment("B", "C", 3, 10, "Red Line", 77.01),
            segment("C", "D", 4, 20, "Blue Line", 77.02),
            segment("X", "Y", 1, 1, "Green Line", 78.00),
        ])
        .unwrap();
        build_router(Arc::new(network), &HttpConfig::default())
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn lists_sorted_stations_with_coordinates() {
        let (status, json) = get_json("/stations").await;
        assert_eq!(status, StatusCode::OK);

        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["A", "B", "C", "D", "X", "Y"]);
        assert_eq!(json[0]["lng"], 77.0);
        assert_eq!(json[0]["lat"], 28.6);
    }

    #[tokio::test]
    async fn returns_route_with_summary_and_directions() {
        let (status, json) = get_json("/route?from=A&to=D&criterion=cost").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["criterion"], "least_cost");
        assert_eq!(json["stops"].as_array().unwrap().len(), 4);
        assert_eq!(json["stops"][0]["is_first"], true);
        assert_eq!(json["summary"]["total_time"], 9);
        assert_eq!(json["summary"]["total_cost"], 40);
        assert_eq!(json["summary"]["line_changes"], 1);
        assert_eq!(json["directions"][0], "Start at A.");
        assert_eq!(json["directions"][1], "Board Red Line.");
    }

    #[tokio::test]
    async fn missing_route_is_not_found() {
        let (status, json) = get_json("/route?from=A&to=Y").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "no route from 'A' to 'Y'");

        let (status, _) = get_json("/route?from=A&to=Nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_criterion_is_bad_request() {
        let (status, json) = get_json("/route?from=A&to=D&criterion=fastest").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("fastest"));
    }

    #[tokio::test]
    async fn exports_route_as_geojson() {
        let (status, json) = get_json("/route/geojson?from=A&to=C&criterion=stops").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["type"], "FeatureCollection");
        // three stations and two segments
        assert_eq!(json["features"].as_array().unwrap().len(), 5);
    }
}
