// Browse Cursor - record-at-a-time iteration over a whole index

use crate::application::constants::{BROWSE_PAGE_SIZE, HITS_PER_PAGE_PARAM};
use crate::domain::{Record, SearchParams};
use crate::error::{Result, SearchError};
use crate::port::SearchApi;
use futures::stream::{self, Stream};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::debug;

/// Pull-based iterator over every record of an index.
///
/// Pages are fetched lazily. Once the last page is drained, [`next`] returns
/// [`SearchError::NoMoreHits`] on every call.
///
/// [`next`]: BrowseCursor::next
pub struct BrowseCursor {
    api: Arc<dyn SearchApi>,
    index: String,
    params: SearchParams,
    buffer: VecDeque<Record>,
    cursor: Option<String>,
    started: bool,
    exhausted: bool,
}

impl BrowseCursor {
    pub fn new(api: Arc<dyn SearchApi>, index: impl Into<String>, mut params: SearchParams) -> Self {
        params
            .entry(HITS_PER_PAGE_PARAM)
            .or_insert_with(|| BROWSE_PAGE_SIZE.into());
        Self {
            api,
            index: index.into(),
            params,
            buffer: VecDeque::new(),
            cursor: None,
            started: false,
            exhausted: false,
        }
    }

    /// Next record, fetching a page when the buffer is empty
    pub async fn next(&mut self) -> Result<Record> {
        loop {
            if let Some(record) = self.buffer.pop_front() {
                return Ok(record);
            }
            if self.exhausted || (self.started && self.cursor.is_none()) {
                self.exhausted = true;
                return Err(SearchError::NoMoreHits);
            }

            let page = self
                .api
                .browse(&self.index, self.cursor.clone(), &self.params)
                .await?;
            debug!(
                index = %self.index,
                hits = %page.hits.len(),
                has_cursor = %page.cursor.is_some(),
                "Browse page fetched"
            );
            self.started = true;
            self.cursor = page.cursor;
            self.buffer.extend(page.hits);
        }
    }

    /// Adapt into a stream that ends at the end of the index.
    ///
    /// The stream stops after yielding the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Record>> + Send {
        stream::unfold((self, false), |(mut cursor, failed)| async move {
            if failed {
                return None;
            }
            match cursor.next().await {
                Ok(record) => Some((Ok(record), (cursor, false))),
                Err(SearchError::NoMoreHits) => None,
                Err(e) => Some((Err(e), (cursor, true))),
            }
        })
    }
}
