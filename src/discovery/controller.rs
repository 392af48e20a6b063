//! The discovery controller.
//!
//! Owns the intent state, issues browse/search fetches against a
//! [`UserDirectory`], and publishes [`ViewModel`] snapshots through a watch
//! channel. All coordination is cooperative: typing is debounced, and every
//! fetch carries a monotonically increasing token so that a superseded
//! response can never overwrite newer state, regardless of completion order.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::error::Result;
use crate::model::{BrowsePage, SearchResults, SkillStat, UserPreview};
use crate::service::{BrowseRequest, UserDirectory};

use super::intent::{Intent, clamp_page};
use super::mode::Mode;
use super::view::{Pagination, ViewModel};

/// Tunables for one controller instance.
#[derive(Debug, Clone)]
pub struct DiscoverySettings {
    /// Browse page size, already coerced into the service's [1, 50] range.
    pub page_size: u32,
    /// Search result limit, already coerced into [1, 100].
    pub search_limit: u32,
    /// Quiet window after the last query edit before a search fires.
    pub debounce: Duration,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            page_size: crate::service::DEFAULT_PAGE_SIZE,
            search_limit: crate::service::DEFAULT_SEARCH_LIMIT,
            debounce: Duration::from_millis(300),
        }
    }
}

/// Reconciles browse and search retrieval into a single view model.
///
/// Intent methods are cheap and non-blocking: they mutate state under a
/// short-lived lock and hand the actual I/O to spawned tasks. The UI reads
/// state exclusively through [`subscribe`](Self::subscribe) or
/// [`snapshot`](Self::snapshot).
pub struct DiscoveryController {
    inner: Arc<Inner>,
}

struct Inner {
    directory: Arc<dyn UserDirectory>,
    runtime: Handle,
    settings: DiscoverySettings,
    state: Mutex<State>,
    vm_tx: watch::Sender<ViewModel>,
}

struct State {
    intent: Intent,
    /// Bumped on every query edit; a pending debounce timer fires only if
    /// its captured epoch is still current.
    edit_epoch: u64,
    /// Token of the most recently issued fetch. Completions with an older
    /// token are dropped.
    latest_token: u64,
    users: Vec<UserPreview>,
    results_mode: Mode,
    pagination: Pagination,
    popular_skills: Vec<SkillStat>,
    loading: bool,
    search_loading: bool,
    error: Option<String>,
}

impl DiscoveryController {
    /// Create a controller over `directory`.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime; the controller spawns
    /// its fetches onto the ambient runtime.
    #[must_use]
    pub fn new(directory: Arc<dyn UserDirectory>, settings: DiscoverySettings) -> Self {
        let initial = ViewModel::initial(settings.page_size);
        let (vm_tx, _) = watch::channel(initial);

        let state = State {
            intent: Intent::default(),
            edit_epoch: 0,
            latest_token: 0,
            users: Vec::new(),
            results_mode: Mode::Browse,
            pagination: Pagination::empty(settings.page_size),
            popular_skills: Vec::new(),
            loading: false,
            search_loading: false,
            error: None,
        };

        Self {
            inner: Arc::new(Inner {
                directory,
                runtime: Handle::current(),
                settings,
                state: Mutex::new(state),
                vm_tx,
            }),
        }
    }

    /// Subscribe to view-model snapshots. The receiver always holds the
    /// latest accepted state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewModel> {
        self.inner.vm_tx.subscribe()
    }

    /// Current view-model snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ViewModel {
        self.inner.vm_tx.borrow().clone()
    }

    /// Issue the fetch implied by the current intent, immediately. Used for
    /// the initial load and for explicit retry after a failure.
    pub fn refresh(&self) {
        let mut state = self.inner.state.lock();
        match state.intent.mode() {
            Mode::Browse => Inner::issue_browse(&self.inner, &mut state),
            Mode::Search => Inner::issue_search(&self.inner, &mut state),
        }
        self.inner.publish(&state);
    }

    /// Replace the query string.
    ///
    /// A non-blank query schedules a debounced search. Clearing the query
    /// returns to browse at page 1 with the persisted filters, fetching
    /// immediately; that transition is never a no-op.
    pub fn submit_query(&self, text: &str) {
        let mut state = self.inner.state.lock();
        state.intent.query = text.to_string();
        state.edit_epoch += 1;

        if state.intent.mode().is_search() {
            let epoch = state.edit_epoch;
            self.inner.publish(&state);
            drop(state);

            let inner = Arc::clone(&self.inner);
            self.inner.runtime.spawn(async move {
                tokio::time::sleep(inner.settings.debounce).await;
                let mut state = inner.state.lock();
                if state.edit_epoch != epoch {
                    tracing::trace!(epoch, "debounce window superseded");
                    return;
                }
                Inner::issue_search(&inner, &mut state);
                inner.publish(&state);
            });
        } else {
            state.intent.requested_page = 1;
            Inner::issue_browse(&self.inner, &mut state);
            self.inner.publish(&state);
        }
    }

    /// Update one or both filters; `None` leaves a filter unchanged.
    ///
    /// In browse mode this resets to page 1 and fetches immediately. During
    /// a search excursion the filters are only stored; they reapply when the
    /// query is cleared.
    pub fn submit_filters(&self, skill: Option<&str>, location: Option<&str>) {
        let mut state = self.inner.state.lock();
        if let Some(skill) = skill {
            state.intent.skill_filter = skill.to_string();
        }
        if let Some(location) = location {
            state.intent.location_filter = location.to_string();
        }

        match state.intent.mode() {
            Mode::Browse => {
                state.intent.requested_page = 1;
                Inner::issue_browse(&self.inner, &mut state);
            }
            Mode::Search => {
                tracing::debug!("filters stored during search excursion");
            }
        }
        self.inner.publish(&state);
    }

    /// Navigate to a browse page. Values below 1 are clamped; page intents
    /// while searching are ignored (pagination is not displayed there).
    pub fn submit_page(&self, page: u32) {
        let page = clamp_page(page);
        let mut state = self.inner.state.lock();
        if state.intent.mode().is_search() {
            tracing::debug!(page, "ignoring page intent while searching");
            return;
        }
        state.intent.requested_page = page;
        Inner::issue_browse(&self.inner, &mut state);
        self.inner.publish(&state);
    }

    /// Drop both filters. In browse mode this re-fetches page 1 unfiltered.
    pub fn clear_filters(&self) {
        let mut state = self.inner.state.lock();
        state.intent.skill_filter.clear();
        state.intent.location_filter.clear();

        if !state.intent.mode().is_search() {
            state.intent.requested_page = 1;
            Inner::issue_browse(&self.inner, &mut state);
        }
        self.inner.publish(&state);
    }

    /// Apply a popular-skill chip: browse page 1 filtered by that skill.
    /// Any active query is cleared, since chips are a browse affordance.
    pub fn apply_skill_chip(&self, skill: &str) {
        let mut state = self.inner.state.lock();
        state.intent.query.clear();
        state.edit_epoch += 1;
        state.intent.skill_filter = skill.to_string();
        state.intent.requested_page = 1;
        Inner::issue_browse(&self.inner, &mut state);
        self.inner.publish(&state);
    }

    /// Load popular-skill chip data in the background. Failures are logged
    /// and never surface on the view model's error field; chips are a
    /// convenience, not part of the retrieval state machine.
    pub fn load_popular_skills(&self) {
        let inner = Arc::clone(&self.inner);
        self.inner.runtime.spawn(async move {
            match inner.directory.popular_skills().await {
                Ok(skills) => {
                    let mut state = inner.state.lock();
                    state.popular_skills = skills.popular_skills;
                    inner.publish(&state);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "failed to load popular skills");
                }
            }
        });
    }
}

impl Inner {
    /// Mint the next fetch token. The newest token wins all races.
    fn mint_token(state: &mut State) -> u64 {
        state.latest_token += 1;
        state.latest_token
    }

    fn issue_browse(inner: &Arc<Self>, state: &mut State) {
        let token = Self::mint_token(state);
        state.loading = true;
        // Any in-flight search is superseded by this token.
        state.search_loading = false;
        state.error = None;

        let request = BrowseRequest {
            page: clamp_page(state.intent.requested_page),
            page_size: inner.settings.page_size,
            skill_filter: state.intent.skill_filter().map(String::from),
            location_filter: state.intent.location_filter().map(String::from),
        };
        tracing::debug!(token, page = request.page, "issuing browse fetch");

        let runtime = inner.runtime.clone();
        let inner = Arc::clone(inner);
        runtime.spawn(async move {
            let result = inner.directory.browse_users(&request).await;
            Inner::complete_browse(&inner, token, result);
        });
    }

    fn issue_search(inner: &Arc<Self>, state: &mut State) {
        let token = Self::mint_token(state);
        state.search_loading = true;
        // Any in-flight browse fetch is superseded by this token.
        state.loading = false;
        state.error = None;

        let query = state.intent.query.trim().to_string();
        let limit = inner.settings.search_limit;
        tracing::debug!(token, %query, "issuing search fetch");

        let runtime = inner.runtime.clone();
        let inner = Arc::clone(inner);
        runtime.spawn(async move {
            let result = inner.directory.search_users(&query, limit).await;
            Inner::complete_search(&inner, token, result);
        });
    }

    fn complete_browse(inner: &Arc<Self>, token: u64, result: Result<BrowsePage>) {
        let mut state = inner.state.lock();
        if token != state.latest_token {
            tracing::trace!(token, latest = state.latest_token, "dropping stale browse response");
            return;
        }

        state.loading = false;
        match result {
            Ok(page) => {
                state.error = None;
                state.users = page.users;
                state.results_mode = Mode::Browse;
                state.pagination = Pagination {
                    page: page.page,
                    page_size: page.page_size,
                    total_count: page.total_count,
                    total_pages: page.total_pages,
                    has_next: page.has_next,
                    has_previous: page.has_previous,
                };
            }
            Err(err) => {
                // Previous results stay visible; only the notice changes.
                tracing::warn!(error = %err, "browse fetch failed");
                state.error = Some(err.to_string());
            }
        }
        inner.publish(&state);
    }

    fn complete_search(inner: &Arc<Self>, token: u64, result: Result<SearchResults>) {
        let mut state = inner.state.lock();
        if token != state.latest_token {
            tracing::trace!(token, latest = state.latest_token, "dropping stale search response");
            return;
        }

        state.search_loading = false;
        match result {
            Ok(results) => {
                state.error = None;
                state.users = results.users;
                state.results_mode = Mode::Search;
                state.pagination = Pagination::single(results.total_count);
            }
            Err(err) => {
                tracing::warn!(error = %err, "search fetch failed");
                state.error = Some(err.to_string());
            }
        }
        inner.publish(&state);
    }

    /// Rebuild and publish the view model. Always a full rebuild, never an
    /// incremental patch.
    fn publish(&self, state: &State) {
        let vm = ViewModel {
            mode: state.intent.mode(),
            results_mode: state.results_mode,
            users: state.users.clone(),
            pagination: state.pagination.clone(),
            popular_skills: state.popular_skills.clone(),
            skill_filter: state.intent.skill_filter().map(String::from),
            location_filter: state.intent.location_filter().map(String::from),
            loading: state.loading,
            search_loading: state.search_loading,
            error: state.error.clone(),
        };
        self.vm_tx.send_replace(vm);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockDirectory;

    #[tokio::test]
    async fn test_initial_snapshot_is_empty_browse() {
        let directory = Arc::new(MockDirectory::with_users(0));
        let controller = DiscoveryController::new(directory, DiscoverySettings::default());

        let vm = controller.snapshot();
        assert_eq!(vm.mode, Mode::Browse);
        assert!(vm.users.is_empty());
        assert!(!vm.loading);
        assert!(vm.error.is_none());
    }

    #[tokio::test]
    async fn test_submit_page_clamps_below_one() {
        let directory = Arc::new(MockDirectory::with_users(30));
        let controller = DiscoveryController::new(directory.clone(), DiscoverySettings::default());

        controller.submit_page(0);
        tokio::time::sleep(Duration::from_millis(10)).await;

        let calls = directory.browse_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].page, 1);
    }

    #[tokio::test]
    async fn test_mode_follows_query_before_any_fetch_lands() {
        let directory = Arc::new(MockDirectory::with_users(30));
        let controller = DiscoveryController::new(directory, DiscoverySettings::default());

        controller.submit_query("pottery");
        let vm = controller.snapshot();
        // Derived mode flips on the keystroke; results stay browse-tagged.
        assert_eq!(vm.mode, Mode::Search);
        assert_eq!(vm.results_mode, Mode::Browse);
    }
}
