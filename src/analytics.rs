//! Session search analytics.
//!
//! Counters are owned by the session that creates them and passed into the
//! tool context explicitly; nothing here is process-global. They reset with
//! the session and are never persisted.

use crate::boards::Platform;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Injectable metrics collector for job searches.
///
/// `total_searches` counts submitted user prompts and is incremented once
/// per prompt at the session boundary, independent of how many tool calls
/// the agent makes while answering. The remaining counters are updated by
/// the board tool executor.
#[derive(Debug, Default)]
pub struct SearchAnalytics {
    total_searches: AtomicU64,
    successful_searches: AtomicU64,
    failed_searches: AtomicU64,
    linkedin_searches: AtomicU64,
    naukri_searches: AtomicU64,
    indeed_searches: AtomicU64,
}

impl SearchAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one submitted user prompt.
    pub fn record_search(&self) {
        self.total_searches.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a board tool invocation for a platform.
    pub fn record_platform(&self, platform: Platform) {
        self.platform_counter(platform).fetch_add(1, Ordering::Relaxed);
    }

    /// Record a board search that produced at least one listing.
    pub fn record_success(&self) {
        self.successful_searches.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a board search that errored or matched nothing.
    pub fn record_failure(&self) {
        self.failed_searches.fetch_add(1, Ordering::Relaxed);
    }

    fn platform_counter(&self, platform: Platform) -> &AtomicU64 {
        match platform {
            Platform::LinkedIn => &self.linkedin_searches,
            Platform::Naukri => &self.naukri_searches,
            Platform::Indeed => &self.indeed_searches,
        }
    }

    /// Take a point-in-time view of all counters.
    pub fn snapshot(&self) -> AnalyticsSnapshot {
        AnalyticsSnapshot {
            total_searches: self.total_searches.load(Ordering::Relaxed),
            successful_searches: self.successful_searches.load(Ordering::Relaxed),
            failed_searches: self.failed_searches.load(Ordering::Relaxed),
            platform_usage: PlatformUsage {
                linkedin: self.linkedin_searches.load(Ordering::Relaxed),
                naukri: self.naukri_searches.load(Ordering::Relaxed),
                indeed: self.indeed_searches.load(Ordering::Relaxed),
            },
        }
    }
}

/// Serializable view of the analytics counters.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSnapshot {
    pub total_searches: u64,
    pub successful_searches: u64,
    pub failed_searches: u64,
    pub platform_usage: PlatformUsage,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformUsage {
    pub linkedin: u64,
    pub naukri: u64,
    pub indeed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let analytics = SearchAnalytics::new();
        let snap = analytics.snapshot();
        assert_eq!(snap.total_searches, 0);
        assert_eq!(snap.successful_searches, 0);
        assert_eq!(snap.failed_searches, 0);
        assert_eq!(snap.platform_usage.linkedin, 0);
        assert_eq!(snap.platform_usage.naukri, 0);
        assert_eq!(snap.platform_usage.indeed, 0);
    }

    #[test]
    fn test_total_increments_once_per_prompt() {
        let analytics = SearchAnalytics::new();
        analytics.record_search();
        // Several tool invocations while answering the one prompt
        analytics.record_platform(Platform::LinkedIn);
        analytics.record_platform(Platform::Naukri);
        analytics.record_success();
        analytics.record_failure();

        let snap = analytics.snapshot();
        assert_eq!(snap.total_searches, 1);
        assert_eq!(snap.platform_usage.linkedin, 1);
        assert_eq!(snap.platform_usage.naukri, 1);
        assert_eq!(snap.successful_searches, 1);
        assert_eq!(snap.failed_searches, 1);
    }
}
