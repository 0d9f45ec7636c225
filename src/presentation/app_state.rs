// Application state for HTTP handlers
use crate::application::panel_service::PanelService;
use crate::application::upload_service::UploadService;

#[derive(Clone)]
pub struct AppState {
    pub upload_service: UploadService,
    pub panel_service: PanelService,
}
