// Route table and middleware assembly
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    about, contact, dashboard, dashboard_redirect, home, iris_click, panel_layout, stocks_range,
    tips_metric, upload_file, upload_form,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/contact", get(contact))
        .route("/dashboard", get(dashboard_redirect))
        .route("/dashboard/", get(dashboard))
        .route("/upload", get(upload_form).post(upload_file))
        .route("/dash/panels", get(panel_layout))
        .route("/dash/panels/iris/click", post(iris_click))
        .route("/dash/panels/tips/metric", post(tips_metric))
        .route("/dash/panels/stocks/range", post(stocks_range))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
