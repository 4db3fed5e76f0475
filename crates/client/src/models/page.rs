//! Paginated list response.

use serde::{Deserialize, Serialize};

use super::animal::AnimalSummary;

/// One page of the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedListPage {
    pub page: u32,
    pub total_pages: u32,
    pub items: Vec<AnimalSummary>,
}

impl PaginatedListPage {
    /// Check the page counters. Both must be at least 1.
    pub fn validate(&self) -> Result<(), String> {
        if self.page < 1 {
            return Err(format!("page must be >= 1 (got {})", self.page));
        }
        if self.total_pages < 1 {
            return Err(format!("total_pages must be >= 1 (got {})", self.total_pages));
        }
        Ok(())
    }

    /// Whether no page follows this one.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }
}
