//! Lazy iteration over paginated metric descriptor listings.

use std::collections::VecDeque;

use tracing::debug;

use crate::{
    models::{ListMetricDescriptorsRequest, MetricDescriptor},
    Error, MetricDescriptorClient,
};

#[cfg(test)]
#[path = "pager_tests.rs"]
mod tests;

/// Yields metric descriptors one at a time, fetching pages on demand.
///
/// A page is requested only when the previously fetched page has been
/// consumed. The server's page token is forwarded unchanged. Once the last
/// page is drained, or after any listing error, `next` returns `Ok(None)`.
///
/// # Examples
///
/// ```rust,ignore
/// let request = ListMetricDescriptorsRequest::for_project("demo");
/// let mut pager = DescriptorPager::new(&client, request);
/// while let Some(descriptor) = pager.next().await? {
///     println!("{}", descriptor.name);
/// }
/// ```
pub struct DescriptorPager<'a, C: MetricDescriptorClient + ?Sized> {
    client: &'a C,
    request: ListMetricDescriptorsRequest,
    buffer: VecDeque<MetricDescriptor>,
    exhausted: bool,
    pages_fetched: u32,
}

impl<'a, C: MetricDescriptorClient + ?Sized> DescriptorPager<'a, C> {
    /// Create a pager that starts at the first page of `request`.
    pub fn new(client: &'a C, request: ListMetricDescriptorsRequest) -> Self {
        Self {
            client,
            request,
            buffer: VecDeque::new(),
            exhausted: false,
            pages_fetched: 0,
        }
    }

    /// Number of list calls issued so far.
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Fetch the next descriptor.
    ///
    /// # Errors
    /// Returns the client error from the page request that failed. The pager
    /// is exhausted afterwards.
    pub async fn next(&mut self) -> Result<Option<MetricDescriptor>, Error> {
        loop {
            if let Some(descriptor) = self.buffer.pop_front() {
                return Ok(Some(descriptor));
            }

            if self.exhausted {
                return Ok(None);
            }

            let page = match self.client.list_metric_descriptors(&self.request).await {
                Ok(page) => page,
                Err(e) => {
                    self.exhausted = true;
                    return Err(e);
                }
            };
            self.pages_fetched += 1;

            debug!(
                resource = %self.request.name,
                page = self.pages_fetched,
                count = page.metric_descriptors.len(),
                "Retrieved page of metric descriptors"
            );

            match page.next_page() {
                Some(token) => self.request.page_token = Some(token.to_string()),
                None => self.exhausted = true,
            }
            self.buffer.extend(page.metric_descriptors);
        }
    }
}
