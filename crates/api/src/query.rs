//! Query parameter types for API handlers.

use rugcat_core::pagination::PageRequest;
use serde::Deserialize;

/// `?page=&pageSize=` kept as raw text so malformed values fall back to
/// defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl ListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_raw(self.page.as_deref(), self.page_size.as_deref())
    }
}
