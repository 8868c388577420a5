use crate::movie::Movie;

/// One page of catalog results, in catalog order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoviePage {
    pub page: u32,
    pub results: Vec<Movie>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub total_pages: Option<u32>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub total_results: Option<u64>,
}

impl MoviePage {
    pub fn new(page: u32, results: Vec<Movie>) -> Self {
        Self {
            page,
            results,
            total_pages: None,
            total_results: None,
        }
    }

    pub fn with_total_pages(mut self, total_pages: u32) -> Self {
        self.total_pages = Some(total_pages);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the catalog reported more pages after this one. Pages without a
    /// total are treated as the last page.
    pub fn has_next_page(&self) -> bool {
        self.total_pages
            .is_some_and(|total_pages| self.page < total_pages)
    }

    pub fn into_results(self) -> Vec<Movie> {
        self.results
    }
}
