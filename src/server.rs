use crate::config::AppConfig;
use crate::data::Datasets;
use crate::error::AppError;
use crate::filter::{filter, ArtField, Criterion, HotspotField, Selection};
use crate::pledge::PledgeSubmission;
use crate::router::{route, PageId, RenderContext, ViewState};
use crate::types::{ArtRecord, HotspotRecord, VisitorRecord};
use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    response::{Html, Json, Redirect},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub struct AppState {
    pub data: Datasets,
    pub config: AppConfig,
}

impl AppState {
    fn ctx(&self) -> RenderContext<'_> {
        RenderContext {
            data: &self.data,
            config: &self.config,
        }
    }
}

/// Filter values carried in the query string. Absent means `All`.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    region: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    state: Option<String>,
}

/// The sidebar's single-select submits the chosen page slug here.
#[derive(Debug, Deserialize)]
pub struct NavParams {
    page: String,
}

impl FilterParams {
    fn view_state(&self) -> ViewState {
        ViewState {
            region: Selection::parse(self.region.as_deref()),
            kind: Selection::parse(self.kind.as_deref()),
            pledge: None,
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/", get(home_handler))
        .route("/go", get(navigate_handler))
        .route("/pledge", get(pledge_handler).post(pledge_submit_handler))
        .route("/:page", get(page_handler))
        .route("/api/art", get(art_api_handler))
        .route("/api/visitors", get(visitors_api_handler))
        .route("/api/hotspots", get(hotspots_api_handler));

    if let Some(static_dir) = &state.config.server.static_dir {
        app = app.nest_service("/static", ServeDir::new(static_dir));
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: AppConfig, data: Datasets) -> Result<()> {
    let host = config.server.host.clone();
    let port = config.server.port;
    let state = Arc::new(AppState { data, config });
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;
    tracing::info!("Starting server on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

fn render(state: &AppState, page: PageId, view: &ViewState) -> Result<Html<String>, AppError> {
    route(page, state.ctx(), view).map(|output| Html(output.html))
}

async fn home_handler(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    render(&state, PageId::Home, &ViewState::default())
}

async fn page_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(params): Query<FilterParams>,
) -> Result<Html<String>, AppError> {
    let page: PageId = slug.parse()?;
    render(&state, page, &params.view_state())
}

async fn navigate_handler(Query(params): Query<NavParams>) -> Result<Redirect, AppError> {
    let page: PageId = params.page.parse()?;
    Ok(Redirect::to(page.path()))
}

async fn pledge_handler(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    render(&state, PageId::PledgeForm, &ViewState::default())
}

async fn pledge_submit_handler(
    State(state): State<Arc<AppState>>,
    Form(submission): Form<PledgeSubmission>,
) -> Result<Html<String>, AppError> {
    tracing::debug!(agreed = submission.agreed, "Pledge submitted");
    let view = ViewState {
        pledge: Some(submission),
        ..ViewState::default()
    };
    render(&state, PageId::PledgeForm, &view)
}

async fn art_api_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Json<Vec<ArtRecord>> {
    let view = params.view_state();
    Json(filter(
        &state.data.art,
        &[
            Criterion::new(ArtField::Region, view.region),
            Criterion::new(ArtField::Type, view.kind),
        ],
    ))
}

async fn visitors_api_handler(State(state): State<Arc<AppState>>) -> Json<Vec<VisitorRecord>> {
    Json(state.data.visitors.clone())
}

async fn hotspots_api_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> Json<Vec<HotspotRecord>> {
    let view = params.view_state();
    Json(filter(
        &state.data.hotspots,
        &[
            Criterion::new(HotspotField::Type, view.kind),
            Criterion::new(HotspotField::State, Selection::parse(params.state.as_deref())),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn app() -> Router {
        let mut config = AppConfig::default();
        config.input.hotspots_csv = None;
        let data = Datasets::load(&config);
        build_router(Arc::new(AppState { data, config }))
    }

    async fn get(uri: &str) -> (StatusCode, String) {
        let resp = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn post_pledge(body: &str) -> (StatusCode, String) {
        let req = Request::builder()
            .method("POST")
            .uri("/pledge")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn serves_every_page() {
        for page in PageId::ALL {
            let (status, body) = get(page.path()).await;
            assert_eq!(status, StatusCode::OK, "{}", page.path());
            assert!(body.contains(&format!("value=\"{}\" checked", page.slug())));
        }
        let (status, _) = get("/home").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn navigation_select_redirects_to_page() {
        let resp = app()
            .oneshot(Request::builder().uri("/go?page=map").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], "/map");

        let (status, _) = get("/go?page=gallery").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn hotspot_api_filters_by_state_and_type() {
        let (_, body) = get("/api/hotspots?state=Karnataka").await;
        let hotspots: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
        let names: Vec<&str> = hotspots.iter().map(|h| h["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Hampi", "Channapatna Toys"]);

        let (_, body) = get("/api/hotspots?state=Karnataka&type=Craft").await;
        let hotspots: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
        assert_eq!(hotspots.len(), 1);
        assert_eq!(hotspots[0]["name"], "Channapatna Toys");
    }

    #[tokio::test]
    async fn unknown_page_is_not_found() {
        let (status, body) = get("/gallery").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Back to Home"));
    }

    #[tokio::test]
    async fn art_page_reads_filters_from_query() {
        let (status, body) = get("/art?region=Odisha&type=All").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<td>Pattachitra</td>"));
        assert!(!body.contains("<td>Kathak</td>"));
    }

    #[tokio::test]
    async fn map_page_reads_type_from_query() {
        let (_, body) = get("/map?type=Temple").await;
        assert!(body.contains("data-markers=\"1\""));
        assert!(body.contains("Konark Sun Temple"));
    }

    #[tokio::test]
    async fn pledge_submission_outcomes() {
        let (status, body) = post_pledge("name=Asha&email=&agreed=on").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Thank you, Asha, for taking the pledge!"));

        let (_, body) = post_pledge("name=&email=&agreed=on").await;
        assert!(body.contains("Please enter your name to continue."));

        let (_, body) = post_pledge("name=Asha&email=").await;
        assert!(body.contains("Please agree to the pledge to submit."));

        let (_, body) = post_pledge("name=&email=").await;
        assert!(body.contains("Please agree to the pledge to submit."));
    }

    #[tokio::test]
    async fn hotspot_api_filters_by_type() {
        let (status, body) = get("/api/hotspots?type=Craft").await;
        assert_eq!(status, StatusCode::OK);
        let hotspots: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
        let names: Vec<&str> = hotspots.iter().map(|h| h["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Sankheda Furniture", "Channapatna Toys"]);
        assert_eq!(hotspots[0]["type"], "Craft");
    }

    #[tokio::test]
    async fn art_and_visitor_apis() {
        let (_, body) = get("/api/art?type=Dance").await;
        let art: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
        assert_eq!(art.len(), 3);

        let (_, body) = get("/api/visitors").await;
        let visitors: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
        assert_eq!(visitors.len(), 6);
        assert_eq!(visitors[0]["visitors"], 120_000);
    }
}
