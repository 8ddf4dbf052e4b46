use async_trait::async_trait;
use shared::{
    domain::{
        CapsuleRow, CapsuleStatus, FilterState, GridResult, PageSize, SearchField, PLACEHOLDER,
    },
    error::FetchError,
    protocol::{CapsuleListResponse, CapsuleRecord},
};
use tokio::sync::Mutex;
use tracing::{info, warn};

pub mod date;
pub mod rest;

pub use rest::RestCapsuleService;

/// Boundary to the remote capsule listing service. The query string is
/// already fully assembled by the controller; implementations only move
/// it over the wire and decode one page.
#[async_trait]
pub trait CapsuleService: Send + Sync {
    async fn fetch(&self, query: &str) -> Result<CapsuleListResponse, FetchError>;
}

/// Builds the listing query. Field order is fixed (limit/offset, search
/// term, status) for compatibility with the upstream query parser. The
/// search term is only appended when a search field is selected; stray
/// `search_text` without a field is ignored here rather than in the UI.
pub fn build_query(filters: &FilterState, page_index: u32, page_size: PageSize) -> String {
    let limit = page_size.limit();
    let offset = i64::from(page_index) * limit;
    let mut query = format!("limit={limit}&offset={offset}");
    if let Some(field) = filters.search_field {
        query.push_str(&format!("&{}={}", field.as_query_key(), filters.search_text));
    }
    if let Some(status) = filters.status {
        query.push_str(&format!("&status={}", status.as_query_value()));
    }
    query
}

/// Number of blank padding rows so the last page does not visually shrink
/// the table. Zero on the first page and for the unbounded page size.
pub fn empty_row_count(page_index: u32, page_size: PageSize, total_count: u64) -> u64 {
    if page_index == 0 {
        return 0;
    }
    let limit = page_size.limit();
    if limit <= 0 {
        return 0;
    }
    let reachable = (i64::from(page_index) + 1) * limit;
    (reachable - total_count.min(i64::MAX as u64) as i64).max(0) as u64
}

/// Index of the last page holding any results: `ceil(total / size) - 1`,
/// clamped to 0. The unbounded size always fits everything on page 0.
pub fn last_page_index(total_count: u64, page_size: PageSize) -> u32 {
    let limit = page_size.limit();
    if limit <= 0 || total_count == 0 {
        return 0;
    }
    let limit = limit as u64;
    (total_count.div_ceil(limit) - 1).min(u32::MAX as u64) as u32
}

fn text_or_placeholder(value: Option<&str>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), str::to_string)
}

fn number_or_placeholder(value: Option<i64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |n| n.to_string())
}

/// Maps one wire record into a display row: placeholder defaulting for
/// every absent field, launch date through the date formatter (which has
/// its own fallback).
fn to_row(record: &CapsuleRecord) -> CapsuleRow {
    CapsuleRow {
        serial: text_or_placeholder(record.capsule_serial.as_deref()),
        status: text_or_placeholder(record.status.as_deref()),
        launch_date: date::launch_date_display(record.original_launch.as_deref()),
        landings: number_or_placeholder(record.landings),
        kind: text_or_placeholder(record.kind.as_deref()),
        details: text_or_placeholder(record.details.as_deref()),
        reuse_count: number_or_placeholder(record.reuse_count),
    }
}

/// Everything the render layer needs for one frame, cloned out of the
/// controller under its lock.
#[derive(Debug, Clone)]
pub struct GridSnapshot {
    pub rows: Vec<CapsuleRow>,
    pub total_count: u64,
    pub filters: FilterState,
    pub page_index: u32,
    pub page_size: PageSize,
    pub loading: bool,
    pub submit_pending: bool,
    pub clear_pending: bool,
    pub last_error: Option<FetchError>,
    pub empty_row_count: u64,
    pub has_prev: bool,
    pub has_next: bool,
}

struct GridState {
    filters: FilterState,
    page_index: u32,
    page_size: PageSize,
    result: GridResult,
    loading: bool,
    submit_pending: bool,
    clear_pending: bool,
    filters_version: u64,
    issued_seq: u64,
    last_error: Option<FetchError>,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            filters: FilterState::default(),
            page_index: 0,
            page_size: PageSize::default(),
            result: GridResult::default(),
            loading: false,
            submit_pending: false,
            clear_pending: false,
            filters_version: 0,
            issued_seq: 0,
            last_error: None,
        }
    }
}

/// Owns the filter and pagination state of the capsule table, derives the
/// listing query and keeps the current page of display rows.
///
/// All mutating operations refetch explicitly before returning; there is
/// no hidden reactive trigger. The state lock is never held across the
/// service call, so a refetch superseded by a newer one resolves against
/// a stale sequence number and is dropped instead of overwriting fresher
/// rows.
pub struct GridController<S: CapsuleService> {
    service: S,
    inner: Mutex<GridState>,
}

impl<S: CapsuleService> GridController<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            inner: Mutex::new(GridState::default()),
        }
    }

    /// Initial fetch with the default filters and page state.
    pub async fn load(&self) {
        self.refetch().await;
    }

    /// Jumps to `new_page_index` and refetches with the current filters
    /// and page size. No upper bound is enforced; a page past the end is
    /// passed through and the service may answer with an empty page.
    pub async fn set_page(&self, new_page_index: u32) {
        {
            let mut inner = self.inner.lock().await;
            inner.page_index = new_page_index;
        }
        self.refetch().await;
    }

    /// Switches the rows-per-page choice, snapping back to the first
    /// page, and refetches.
    pub async fn set_page_size(&self, new_size: PageSize) {
        {
            let mut inner = self.inner.lock().await;
            inner.page_size = new_size;
            inner.page_index = 0;
        }
        self.refetch().await;
    }

    /// Local filter edit; takes effect on the next submit.
    pub async fn set_search_field(&self, field: Option<SearchField>) {
        self.inner.lock().await.filters.search_field = field;
    }

    /// Local filter edit; takes effect on the next submit.
    pub async fn set_search_text(&self, text: impl Into<String>) {
        self.inner.lock().await.filters.search_text = text.into();
    }

    /// Local filter edit; takes effect on the next submit.
    pub async fn set_status(&self, status: Option<CapsuleStatus>) {
        self.inner.lock().await.filters.status = status;
    }

    /// Applies the edited filters. A submit with nothing filled in is a
    /// no-op: no busy flag, no fetch. Otherwise the page state resets to
    /// the first page at the default size and a refetch runs, forced even
    /// when the filters are identical to the previous submit.
    ///
    /// Returns whether a fetch was triggered.
    pub async fn submit_filters(&self) -> bool {
        {
            let mut inner = self.inner.lock().await;
            if inner.filters.is_empty() {
                return false;
            }
            inner.page_index = 0;
            inner.page_size = PageSize::default();
            inner.submit_pending = true;
            inner.filters_version += 1;
        }
        self.refetch().await;
        true
    }

    /// Unconditionally wipes all filters, resets the page state and
    /// refetches exactly once.
    pub async fn clear_filters(&self) {
        {
            let mut inner = self.inner.lock().await;
            inner.filters = FilterState::default();
            inner.page_index = 0;
            inner.page_size = PageSize::default();
            inner.clear_pending = true;
            inner.filters_version += 1;
        }
        self.refetch().await;
    }

    /// Returns whether a page change happened (false at the boundary).
    pub async fn first_page(&self) -> bool {
        let target = {
            let inner = self.inner.lock().await;
            if inner.page_index == 0 {
                return false;
            }
            0
        };
        self.set_page(target).await;
        true
    }

    /// Returns whether a page change happened (false at the boundary).
    pub async fn prev_page(&self) -> bool {
        let target = {
            let inner = self.inner.lock().await;
            if inner.page_index == 0 {
                return false;
            }
            inner.page_index - 1
        };
        self.set_page(target).await;
        true
    }

    /// Returns whether a page change happened (false at the boundary).
    pub async fn next_page(&self) -> bool {
        let target = {
            let inner = self.inner.lock().await;
            let last = last_page_index(inner.result.total_count, inner.page_size);
            if inner.page_index >= last {
                return false;
            }
            inner.page_index + 1
        };
        self.set_page(target).await;
        true
    }

    /// Returns whether a page change happened (false at the boundary).
    pub async fn last_page(&self) -> bool {
        let target = {
            let inner = self.inner.lock().await;
            let last = last_page_index(inner.result.total_count, inner.page_size);
            if inner.page_index >= last {
                return false;
            }
            last
        };
        self.set_page(target).await;
        true
    }

    pub async fn snapshot(&self) -> GridSnapshot {
        let inner = self.inner.lock().await;
        let last = last_page_index(inner.result.total_count, inner.page_size);
        GridSnapshot {
            rows: inner.result.rows.clone(),
            total_count: inner.result.total_count,
            filters: inner.filters.clone(),
            page_index: inner.page_index,
            page_size: inner.page_size,
            loading: inner.loading,
            submit_pending: inner.submit_pending,
            clear_pending: inner.clear_pending,
            last_error: inner.last_error.clone(),
            empty_row_count: empty_row_count(
                inner.page_index,
                inner.page_size,
                inner.result.total_count,
            ),
            has_prev: inner.page_index > 0,
            has_next: inner.page_index < last,
        }
    }

    /// Issues one fetch for the current query. Rows are cleared up front
    /// so the table renders a loading state instead of stale data. Each
    /// request takes the next sequence number under the lock; by the time
    /// the response lands, a higher sequence means a newer request
    /// superseded this one and the response is dropped.
    ///
    /// On failure the previous `GridResult` is kept (minus the cleared
    /// rows) and the error is surfaced through the snapshot. No retries,
    /// no timeouts.
    async fn refetch(&self) {
        let (seq, query) = {
            let mut inner = self.inner.lock().await;
            inner.loading = true;
            inner.result.rows.clear();
            inner.last_error = None;
            inner.issued_seq += 1;
            (
                inner.issued_seq,
                build_query(&inner.filters, inner.page_index, inner.page_size),
            )
        };

        info!(seq, query = %query, "grid: fetching capsules");
        let outcome = self.service.fetch(&query).await;

        let mut inner = self.inner.lock().await;
        if seq != inner.issued_seq {
            warn!(
                seq,
                latest = inner.issued_seq,
                "grid: dropping superseded fetch response"
            );
            return;
        }

        match outcome {
            Ok(body) => {
                let rows: Vec<CapsuleRow> = body.results.iter().map(to_row).collect();
                info!(seq, total = body.count, rows = rows.len(), "grid: fetch complete");
                inner.result = GridResult {
                    rows,
                    total_count: body.count,
                };
            }
            Err(err) => {
                warn!(seq, error = %err, "grid: fetch failed; keeping previous result");
                inner.last_error = Some(err);
            }
        }
        inner.loading = false;
        inner.submit_pending = false;
        inner.clear_pending = false;
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
