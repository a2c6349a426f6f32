//! Top-items aggregation.
//!
//! The `/me/top/{tracks,artists}` endpoints return at most 50 items per call.
//! [`fetch`] walks the offset until the requested count is reached or the
//! endpoint runs dry, and concatenates the pages in order.

use crate::{
    Res,
    types::{Artist, Page, PageRequest, TimeRange, TopItem, Track},
};

/// Largest `limit` the endpoints accept for a single request.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Remote boundary the aggregator pages through.
///
/// Implemented over HTTP by [`crate::spotify::session::Session`]. Which
/// endpoint is called is decided by `T::KIND`.
#[allow(async_fn_in_trait)]
pub trait TopItemsSource {
    async fn top_page<T: TopItem>(&self, request: &PageRequest) -> Res<Page<T>>;
}

/// Why a fetch produced nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    /// The first page came back without items.
    NoHistory,
    /// A page request failed. Items from earlier pages were discarded.
    Failed(String),
}

/// Result of a top-items fetch.
#[derive(Debug, Clone)]
pub enum TopItems<T> {
    Found(Vec<T>),
    Empty(EmptyReason),
}

impl<T> TopItems<T> {
    pub fn is_empty(&self) -> bool {
        match self {
            TopItems::Found(items) => items.is_empty(),
            TopItems::Empty(_) => true,
        }
    }

    pub fn len(&self) -> usize {
        self.items().map_or(0, <[T]>::len)
    }

    pub fn items(&self) -> Option<&[T]> {
        match self {
            TopItems::Found(items) => Some(items),
            TopItems::Empty(_) => None,
        }
    }

    pub fn into_items(self) -> Option<Vec<T>> {
        match self {
            TopItems::Found(items) => Some(items),
            TopItems::Empty(_) => None,
        }
    }

    pub fn empty_reason(&self) -> Option<&EmptyReason> {
        match self {
            TopItems::Found(_) => None,
            TopItems::Empty(reason) => Some(reason),
        }
    }
}

/// Fetches up to `limit` top items of kind `T` for `time_range`.
///
/// Pages are requested sequentially with `min(50, remaining)` as the page
/// size. Fetching stops when `limit` items were collected, when a page is
/// shorter than requested, or when a page after the first is empty. The
/// returned list may therefore be shorter than `limit`.
///
/// A `limit` of zero is treated as one.
///
/// # Empty results
///
/// - first page without items: `TopItems::Empty(EmptyReason::NoHistory)`
/// - any failing page request: `TopItems::Empty(EmptyReason::Failed(..))`,
///   nothing accumulated so far is returned and nothing is retried
///
/// Nothing is printed here; reporting the outcome is left to the caller.
pub async fn fetch<S, T>(source: &S, limit: u32, time_range: TimeRange) -> TopItems<T>
where
    S: TopItemsSource,
    T: TopItem,
{
    match collect_pages(source, limit.max(1), time_range).await {
        Ok(items) => items,
        Err(e) => TopItems::Empty(EmptyReason::Failed(e.to_string())),
    }
}

/// Top tracks variant of [`fetch`].
pub async fn top_tracks<S: TopItemsSource>(
    source: &S,
    limit: u32,
    time_range: TimeRange,
) -> TopItems<Track> {
    fetch(source, limit, time_range).await
}

/// Top artists variant of [`fetch`].
pub async fn top_artists<S: TopItemsSource>(
    source: &S,
    limit: u32,
    time_range: TimeRange,
) -> TopItems<Artist> {
    fetch(source, limit, time_range).await
}

async fn collect_pages<S, T>(source: &S, limit: u32, time_range: TimeRange) -> Res<TopItems<T>>
where
    S: TopItemsSource,
    T: TopItem,
{
    let mut items: Vec<T> = Vec::new();
    let mut offset: u32 = 0;
    let mut remaining = limit;

    while remaining > 0 {
        let page_size = remaining.min(MAX_PAGE_SIZE);
        let request = PageRequest {
            limit: page_size,
            offset,
            time_range,
        };

        let page: Page<T> = source.top_page(&request).await?;
        if page.items.is_empty() {
            if offset == 0 {
                return Ok(TopItems::Empty(EmptyReason::NoHistory));
            }
            break;
        }

        let received = page.items.len();
        items.extend(page.items);

        if received < page_size as usize {
            break;
        }

        remaining -= page_size;
        offset += page_size;
    }

    Ok(TopItems::Found(items))
}
