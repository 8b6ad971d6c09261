//! Content age buckets.

use super::MetricsService;
use crate::domain::{DateRange, Freshness, FreshnessBucket};

impl MetricsService {
    /// Every bucket, in age order, even when empty. Age is measured at the anchor date.
    pub fn get_content_freshness_data(&self, range: DateRange) -> Vec<FreshnessBucket> {
        let anchor = self.anchor();
        Freshness::ALL
            .into_iter()
            .map(|bucket| {
                let pages: Vec<_> = self
                    .dataset()
                    .pages
                    .iter()
                    .filter(|p| Freshness::for_age((anchor - p.publish_date).num_days()) == bucket)
                    .cloned()
                    .collect();
                let total_clicks = pages.iter().map(|p| self.page_totals(p.id, range).0).sum();
                FreshnessBucket {
                    bucket,
                    page_count: pages.len(),
                    total_clicks,
                    pages,
                }
            })
            .collect()
    }
}
