//! # Models
//!
//! Request and response types for the metric descriptor endpoints of the
//! Cloud Monitoring v3 REST API. Field names follow the API's camelCase JSON.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// A metric descriptor as returned by the monitoring API.
///
/// Only `name` is needed to delete a descriptor. The remaining fields are
/// kept for log context and are absent when the API omits them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDescriptor {
    /// Resource name, e.g. `projects/demo/metricDescriptors/custom.googleapis.com/foo`
    pub name: String,

    /// The metric type, e.g. `custom.googleapis.com/foo`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub metric_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// `GAUGE`, `DELTA` or `CUMULATIVE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_kind: Option<String>,

    /// `BOOL`, `INT64`, `DOUBLE`, `STRING`, `DISTRIBUTION` or `MONEY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
}

/// One page of a `metricDescriptors.list` response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDescriptorPage {
    /// Descriptors on this page. The API omits the field when the page is empty.
    #[serde(default)]
    pub metric_descriptors: Vec<MetricDescriptor>,

    /// Token for the next page. Absent or empty on the last page.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl MetricDescriptorPage {
    /// The token for the following page, if there is one.
    pub fn next_page(&self) -> Option<&str> {
        self.next_page_token
            .as_deref()
            .filter(|token| !token.is_empty())
    }
}

/// Parameters for a `metricDescriptors.list` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListMetricDescriptorsRequest {
    /// Project resource name, `projects/{project}`
    pub name: String,

    /// Monitoring filter expression
    pub filter: Option<String>,

    pub page_size: Option<u32>,

    /// Server-issued cursor from the previous page
    pub page_token: Option<String>,
}

impl ListMetricDescriptorsRequest {
    /// Create a request scoped to the given project.
    ///
    /// # Examples
    ///
    /// ```
    /// use monitoring_client::models::ListMetricDescriptorsRequest;
    ///
    /// let request = ListMetricDescriptorsRequest::for_project("demo");
    /// assert_eq!(request.name, "projects/demo");
    /// ```
    pub fn for_project(project: &str) -> Self {
        Self {
            name: format!("projects/{}", project),
            ..Default::default()
        }
    }

    /// Set the server-side filter expression.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Set the page size hint; `None` leaves it to the server.
    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    /// Query parameters for this request, in API naming.
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(filter) = &self.filter {
            pairs.push(("filter", filter.clone()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("pageSize", page_size.to_string()));
        }
        if let Some(page_token) = &self.page_token {
            pairs.push(("pageToken", page_token.clone()));
        }
        pairs
    }
}

/// Error envelope returned by Google APIs on non-success responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,

    /// Canonical status name, e.g. `NOT_FOUND`
    #[serde(default)]
    pub status: Option<String>,
}
