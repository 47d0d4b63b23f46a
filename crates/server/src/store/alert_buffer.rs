use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use warden_common::Alert;

pub const DEFAULT_ALERT_LIMIT: i64 = 50;

/// Alerts received over the webhook, held in memory until restart.
#[derive(Clone, Default)]
pub struct AlertBuffer {
    alerts: Arc<RwLock<Vec<Alert>>>,
}

fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(ts)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

impl AlertBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends unconditionally; the same `alert_id` may be stored twice.
    pub async fn receive(&self, alert: Alert) {
        tracing::info!(alert_id = %alert.alert_id, rule_id = %alert.rule_id, "alert received");
        self.alerts.write().await.push(alert);
    }

    pub async fn len(&self) -> usize {
        self.alerts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Newest first.
    ///
    /// With `since` set, only alerts whose timestamp parses and is strictly
    /// later are kept. Unparseable timestamps sort last. `limit <= 0` means
    /// no limit.
    pub async fn query(&self, limit: i64, since: Option<DateTime<Utc>>) -> Vec<Alert> {
        let snapshot = self.alerts.read().await.clone();

        let mut keyed: Vec<(Option<DateTime<Utc>>, Alert)> = snapshot
            .into_iter()
            .map(|a| (parse_timestamp(&a.timestamp), a))
            .filter(|(ts, _)| match since {
                None => true,
                Some(cutoff) => ts.is_some_and(|t| t > cutoff),
            })
            .collect();

        keyed.sort_by(|(a, _), (b, _)| {
            let a = a.unwrap_or(DateTime::<Utc>::MIN_UTC);
            let b = b.unwrap_or(DateTime::<Utc>::MIN_UTC);
            b.cmp(&a)
        });

        if limit > 0 {
            keyed.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        keyed.into_iter().map(|(_, a)| a).collect()
    }
}
