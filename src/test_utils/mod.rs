//! Test helpers shared by unit and integration tests.
//!
//! [`MockDirectory`] is a scripted in-memory [`UserDirectory`]: it records
//! every call, serves deterministic synthetic pages, and lets tests inject
//! per-call latencies and failures to exercise debouncing and the
//! stale-response token discipline without a network.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Result, ScoutError};
use crate::model::{BrowsePage, PopularSkills, SearchResults, SkillStat, UserPreview};
use crate::service::{BrowseRequest, UserDirectory, validate_search_limit};

/// Scripted directory backend for tests.
pub struct MockDirectory {
    total_users: u64,
    state: Mutex<MockState>,
}

#[derive(Default)]
struct MockState {
    browse_calls: Vec<BrowseRequest>,
    search_calls: Vec<(String, u32)>,
    browse_delays: VecDeque<Duration>,
    search_delays: VecDeque<Duration>,
    browse_failures: u32,
    search_failures: u32,
    popular: Option<PopularSkills>,
}

impl MockDirectory {
    /// A directory holding `total_users` synthetic public profiles.
    #[must_use]
    pub fn with_users(total_users: u64) -> Self {
        Self {
            total_users,
            state: Mutex::new(MockState::default()),
        }
    }

    /// Queue a latency for the next browse call; unqueued calls complete
    /// immediately.
    pub fn push_browse_delay(&self, delay: Duration) {
        self.state.lock().browse_delays.push_back(delay);
    }

    /// Queue a latency for the next search call.
    pub fn push_search_delay(&self, delay: Duration) {
        self.state.lock().search_delays.push_back(delay);
    }

    /// Make the next `count` browse calls fail with a service error.
    pub fn fail_browse(&self, count: u32) {
        self.state.lock().browse_failures += count;
    }

    /// Make the next `count` search calls fail with a service error.
    pub fn fail_search(&self, count: u32) {
        self.state.lock().search_failures += count;
    }

    /// Replace the canned popular-skills payload.
    pub fn set_popular(&self, popular: PopularSkills) {
        self.state.lock().popular = Some(popular);
    }

    /// Every browse request seen so far, in call order.
    #[must_use]
    pub fn browse_calls(&self) -> Vec<BrowseRequest> {
        self.state.lock().browse_calls.clone()
    }

    /// Every `(query, limit)` search request seen so far, in call order.
    #[must_use]
    pub fn search_calls(&self) -> Vec<(String, u32)> {
        self.state.lock().search_calls.clone()
    }

    fn synth_user(page: u32, index: u32) -> UserPreview {
        UserPreview {
            id: format!("u-{page}-{index}"),
            name: format!("User p{page}-{index}"),
            location: Some("Testville".to_string()),
            profile_photo_url: None,
            top_offered_skills: Vec::new(),
            top_wanted_skills: Vec::new(),
            availability: None,
            is_public: true,
            member_since: None,
        }
    }
}

#[async_trait]
impl UserDirectory for MockDirectory {
    async fn browse_users(&self, request: &BrowseRequest) -> Result<BrowsePage> {
        request.validate()?;

        let (delay, fail) = {
            let mut state = self.state.lock();
            state.browse_calls.push(request.clone());
            let delay = state.browse_delays.pop_front();
            let fail = if state.browse_failures > 0 {
                state.browse_failures -= 1;
                true
            } else {
                false
            };
            (delay, fail)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if fail {
            return Err(ScoutError::Service("scripted browse failure".to_string()));
        }

        let page_size = request.page_size;
        let total_pages =
            u32::try_from(self.total_users.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX);
        let start = u64::from(request.page - 1) * u64::from(page_size);
        let count = self.total_users.saturating_sub(start).min(u64::from(page_size));
        #[allow(clippy::cast_possible_truncation)]
        let users = (0..count as u32)
            .map(|i| Self::synth_user(request.page, i))
            .collect();

        Ok(BrowsePage {
            users,
            total_count: self.total_users,
            page: request.page,
            page_size,
            total_pages,
            has_next: request.page < total_pages,
            has_previous: request.page > 1,
        })
    }

    async fn search_users(&self, query: &str, limit: u32) -> Result<SearchResults> {
        validate_search_limit(limit)?;

        let (delay, fail) = {
            let mut state = self.state.lock();
            state.search_calls.push((query.to_string(), limit));
            let delay = state.search_delays.pop_front();
            let fail = if state.search_failures > 0 {
                state.search_failures -= 1;
                true
            } else {
                false
            };
            (delay, fail)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if fail {
            return Err(ScoutError::Service("scripted search failure".to_string()));
        }

        let count = limit.min(3);
        let users = (0..count)
            .map(|i| UserPreview {
                id: format!("hit-{query}-{i}"),
                name: format!("Match {i} for {query}"),
                location: None,
                profile_photo_url: None,
                top_offered_skills: Vec::new(),
                top_wanted_skills: Vec::new(),
                availability: None,
                is_public: true,
                member_since: None,
            })
            .collect();

        Ok(SearchResults {
            users,
            total_count: u64::from(count),
            search_query: Some(query.to_string()),
        })
    }

    async fn popular_skills(&self) -> Result<PopularSkills> {
        let canned = self.state.lock().popular.clone();
        Ok(canned.unwrap_or_else(|| PopularSkills {
            popular_skills: vec![
                SkillStat {
                    skill_name: "Design".to_string(),
                    category: Some("Creative".to_string()),
                    offered_count: 12,
                    wanted_count: 8,
                    total_usage: 20,
                },
                SkillStat {
                    skill_name: "Rust".to_string(),
                    category: Some("Programming".to_string()),
                    offered_count: 5,
                    wanted_count: 11,
                    total_usage: 16,
                },
            ],
            trending_skills: Vec::new(),
            total_skills: 2,
        }))
    }
}
