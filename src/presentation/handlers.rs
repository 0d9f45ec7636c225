// HTTP request handlers
use crate::application::panel_service::{
    DashboardLayout, DateRange, PanelUpdate, PointClick, TipsMetric,
};
use crate::infrastructure::flash::FlashBag;
use crate::presentation::app_state::AppState;
use crate::presentation::pages;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct MetricEvent {
    pub metric: TipsMetric,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// Home page
pub async fn home() -> Html<&'static str> {
    Html(pages::index_page())
}

/// About page
pub async fn about() -> Html<&'static str> {
    Html(pages::about_page())
}

/// Contact page
pub async fn contact() -> Html<&'static str> {
    Html(pages::contact_page())
}

/// The canonical dashboard URL carries a trailing slash; the bare form
/// redirects to it.
pub async fn dashboard_redirect() -> Redirect {
    Redirect::permanent("/dashboard/")
}

/// Dashboard shell page; its script renders the panels from the /dash surface
pub async fn dashboard() -> Html<&'static str> {
    Html(pages::dashboard_page())
}

/// Upload form, consuming any flash messages pending from an earlier request
pub async fn upload_form(headers: HeaderMap) -> Response {
    let mut flash = FlashBag::from_headers(&headers);
    let page = pages::upload_page(&flash.take_all(), None);
    with_flash_cookie(Html(page).into_response(), flash)
}

/// Handle a submitted CSV. Success and every recoverable failure re-render
/// the form with a flashed message; only a failed disk write escalates.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let mut flash = FlashBag::from_headers(&headers);

    let (file_name, bytes) = match file_field(&mut multipart).await {
        Ok(Some(submitted)) => submitted,
        Ok(None) => (None, Bytes::new()),
        Err(response) => return response,
    };

    let preview = match state.upload_service.handle(file_name.as_deref(), &bytes) {
        Ok(outcome) => {
            flash.success(format!(
                "Uploaded {} ({} rows)",
                outcome.stored_name, outcome.row_count
            ));
            Some((outcome.preview, outcome.row_count))
        }
        Err(e) if e.is_recoverable() => {
            flash.error(e.to_string());
            None
        }
        Err(e) => {
            eprintln!("Error storing upload: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let page = pages::upload_page(
        &flash.take_all(),
        preview.as_ref().map(|(preview, total)| (preview, *total)),
    );
    with_flash_cookie(Html(page).into_response(), flash)
}

/// Initial state of all three panels
pub async fn panel_layout(State(state): State<Arc<AppState>>) -> Json<DashboardLayout> {
    Json(state.panel_service.dashboard())
}

/// Iris point-click event; the figure never changes, only the summary
pub async fn iris_click(
    State(state): State<Arc<AppState>>,
    Json(click): Json<PointClick>,
) -> Json<SummaryResponse> {
    Json(SummaryResponse {
        summary: state.panel_service.describe_iris_click(&click),
    })
}

/// Tips metric-selector event
pub async fn tips_metric(
    State(state): State<Arc<AppState>>,
    Json(event): Json<MetricEvent>,
) -> Json<PanelUpdate> {
    Json(state.panel_service.update_tips(event.metric))
}

/// Stocks date-range event
pub async fn stocks_range(
    State(state): State<Arc<AppState>>,
    Json(range): Json<DateRange>,
) -> Json<PanelUpdate> {
    Json(state.panel_service.update_stocks(&range))
}

/// Pull the `file` part out of the multipart body, skipping unrelated fields.
/// A stream-level failure short-circuits with a 400 response.
async fn file_field(
    multipart: &mut Multipart,
) -> Result<Option<(Option<String>, Bytes)>, Response> {
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(bad_request)?;
                return Ok(Some((file_name, bytes)));
            }
            Ok(Some(_)) => continue,
            Ok(None) => return Ok(None),
            Err(e) => return Err(bad_request(e)),
        }
    }
}

fn bad_request(e: MultipartError) -> Response {
    (StatusCode::BAD_REQUEST, e.to_string()).into_response()
}

fn with_flash_cookie(mut response: Response, flash: FlashBag) -> Response {
    response
        .headers_mut()
        .insert(header::SET_COOKIE, flash.into_set_cookie());
    response
}
