//! HTTP API module for the leave engine.
//!
//! This module provides the REST endpoints for submitting and deciding
//! leave requests and time entries, querying PTO balances, editing
//! profiles, and reading or writing settings.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{USER_ID_HEADER, create_router};
pub use request::{
    SettingUpdateRequest, StatusUpdateRequest, TimeEntryListParams, TimeEntrySubmitRequest,
    TimeOffCorrectionRequest, TimeOffListParams, TimeOffSubmitRequest,
};
pub use response::{ApiError, ApiErrorResponse, SettingResponse};
pub use state::AppState;
