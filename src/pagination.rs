//! Client-side cursor over the paged exercise catalog.
//!
//! The cursor only moves after a successful fetch. A failed fetch leaves the
//! offset, total and visible items exactly as they were and hands the error
//! back so the caller can retry or surface it.

use crate::catalog::{CatalogError, Exercise, ExerciseSource};

pub const DEFAULT_PAGE_SIZE: u32 = 10;

pub struct PaginationCursor<S> {
  source: S,
  offset: u32,
  page_size: u32,
  /// `None` until the first successful fetch
  total: Option<u32>,
  has_next: bool,
  items: Vec<Exercise>,
}

impl<S: ExerciseSource> PaginationCursor<S> {
  /// A zero page size is treated as 1.
  pub fn new(source: S, page_size: u32) -> Self {
    Self {
      source,
      offset: 0,
      page_size: page_size.max(1),
      total: None,
      has_next: false,
      items: Vec::new(),
    }
  }

  pub fn offset(&self) -> u32 {
    self.offset
  }

  pub fn page_size(&self) -> u32 {
    self.page_size
  }

  pub fn total(&self) -> Option<u32> {
    self.total
  }

  pub fn has_next(&self) -> bool {
    self.has_next
  }

  pub fn has_previous(&self) -> bool {
    self.offset > 0
  }

  /// Items of the last page that loaded successfully.
  pub fn items(&self) -> &[Exercise] {
    &self.items
  }

  pub fn source(&self) -> &S {
    &self.source
  }

  /// Fetch the page containing `offset` and make it current. The offset is
  /// aligned down to a page boundary first.
  ///
  /// Dropping the returned future before it completes leaves the cursor as it was.
  pub async fn load_page(&mut self, offset: u32) -> Result<(), CatalogError> {
    let offset = align_to_page(offset, self.page_size);
    let result = self.source.fetch_page(self.page_size, offset).await;

    match result {
      Ok(page) => {
        self.items = page.exercises;
        self.total = Some(page.total);
        self.offset = offset;
        self.has_next = u64::from(offset) + u64::from(self.page_size) < u64::from(page.total);

        tracing::debug!(
          offset,
          total = page.total,
          items = self.items.len(),
          has_next = self.has_next,
          "Loaded exercise page"
        );
        Ok(())
      }
      Err(e) => {
        tracing::warn!(offset, error = %e, "Exercise page fetch failed, keeping current page");
        Err(e)
      }
    }
  }

  /// Advance one page, clamped to the last page start. At the end this
  /// re-fetches the last page.
  pub async fn load_next_page(&mut self) -> Result<(), CatalogError> {
    let candidate = align_to_page(self.offset.saturating_add(self.page_size), self.page_size);
    let next = match self.total {
      Some(total) => candidate.min(last_page_start(total, self.page_size)),
      None => candidate,
    };
    self.load_page(next).await
  }

  pub async fn load_previous_page(&mut self) -> Result<(), CatalogError> {
    let previous = self.offset.saturating_sub(self.page_size);
    self.load_page(previous).await
  }

  /// Re-fetch the current page.
  pub async fn refresh(&mut self) -> Result<(), CatalogError> {
    self.load_page(self.offset).await
  }
}

fn align_to_page(offset: u32, page_size: u32) -> u32 {
  offset / page_size * page_size
}

/// Largest page-aligned offset strictly below `total`; 0 for an empty catalog.
pub fn last_page_start(total: u32, page_size: u32) -> u32 {
  let page_size = page_size.max(1);
  match total {
    0 => 0,
    n => (n - 1) / page_size * page_size,
  }
}
