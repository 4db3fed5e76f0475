//! Animal API methods for [`AnimalClient`].
//!
//! # What this module handles:
//! - Fetching list pages and walking all pages
//! - Fetching detail records
//! - Submitting batches
//!
//! # What this module does NOT handle:
//! - Low-level HTTP calls (in [`crate::endpoints`])

use tracing::{debug, info, warn};

use crate::client::AnimalClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{AnimalDetail, AnimalSummary, PaginatedListPage, TransformedAnimal};

impl AnimalClient {
    /// Fetch one page of the animal list.
    pub async fn fetch_list_page(&self, page: u32, page_size: u32) -> Result<PaginatedListPage> {
        endpoints::fetch_list_page(
            &self.http,
            &self.base_url,
            &self.endpoints.list_path,
            page,
            page_size,
            &self.retry,
            self.metrics.as_ref(),
        )
        .await
    }

    /// Fetch the detail record for one animal.
    pub async fn fetch_detail(&self, id: i64) -> Result<AnimalDetail> {
        endpoints::fetch_detail(
            &self.http,
            &self.base_url,
            &self.endpoints.detail_path_for(id),
            &self.retry,
            self.metrics.as_ref(),
        )
        .await
    }

    /// Submit one batch of at most 100 records.
    pub async fn submit_batch(&self, records: &[TransformedAnimal]) -> Result<()> {
        endpoints::submit_batch(
            &self.http,
            &self.base_url,
            &self.endpoints.home_path,
            records,
            &self.retry,
            self.metrics.as_ref(),
        )
        .await
    }

    /// Walk every list page from the configured start page.
    ///
    /// Pages are requested in order. The walk stops once either the requested
    /// or the echoed page number reaches the reported `total_pages`, so a
    /// server echoing the wrong page number cannot stall it. Any page failure
    /// aborts the walk.
    pub async fn fetch_all_summaries(&self) -> Result<Vec<AnimalSummary>> {
        let mut all = Vec::new();
        let mut current_page = self.start_page;

        info!(start_page = current_page, page_size = self.page_size, "Fetching all animals");

        loop {
            debug!(page = current_page, "Fetching page");
            let page = self.fetch_list_page(current_page, self.page_size).await?;
            if page.page != current_page {
                warn!(
                    requested = current_page,
                    returned = page.page,
                    "Server returned a different page number than requested"
                );
            }
            let received = page.items.len();
            let total_pages = page.total_pages;
            let is_last = page.is_last() || current_page >= total_pages;
            all.extend(page.items);

            info!(
                page = current_page,
                total_pages,
                received,
                total_so_far = all.len(),
                "Fetched page"
            );

            if is_last {
                break;
            }
            current_page += 1;
        }

        info!(total = all.len(), "Finished fetching all animals");
        Ok(all)
    }
}
