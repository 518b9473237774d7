//! In-process classification statistics.
//!
//! Events flow through an unbounded channel into a background worker so the
//! classification path never blocks on bookkeeping. The worker tallies counts
//! in shared state and logs a summary line on a fixed interval.

use crate::engine::Classification;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

#[derive(Debug, Clone)]
pub enum StatEvent {
    Classified {
        classification: Classification,
        processing_time_ms: f64,
    },
    Rejected,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StatsSummary {
    pub total_emails: u64,
    pub legitimate: u64,
    pub questionable: u64,
    pub suspicious: u64,
    pub spam: u64,
    pub rejected_requests: u64,
    pub total_processing_time_ms: f64,
}

impl StatsSummary {
    fn apply(&mut self, event: StatEvent) {
        match event {
            StatEvent::Classified {
                classification,
                processing_time_ms,
            } => {
                self.total_emails += 1;
                self.total_processing_time_ms += processing_time_ms;
                match classification {
                    Classification::Legitimate => self.legitimate += 1,
                    Classification::Questionable => self.questionable += 1,
                    Classification::Suspicious => self.suspicious += 1,
                    Classification::Spam => self.spam += 1,
                }
            }
            StatEvent::Rejected => self.rejected_requests += 1,
        }
    }
}

pub struct StatisticsCollector {
    sender: mpsc::UnboundedSender<StatEvent>,
    summary: Arc<Mutex<StatsSummary>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl StatisticsCollector {
    pub fn new(report_interval_seconds: u64) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let summary = Arc::new(Mutex::new(StatsSummary::default()));

        let worker_summary = summary.clone();
        let handle = tokio::spawn(async move {
            Self::stats_worker(receiver, worker_summary, report_interval_seconds).await;
        });

        Self {
            sender,
            summary,
            _handle: handle,
        }
    }

    pub fn record_event(&self, event: StatEvent) {
        if let Err(e) = self.sender.send(event) {
            log::warn!("failed to record statistics event: {e}");
        }
    }

    pub fn summary(&self) -> StatsSummary {
        self.summary.lock().map(|s| s.clone()).unwrap_or_default()
    }

    async fn stats_worker(
        mut receiver: mpsc::UnboundedReceiver<StatEvent>,
        summary: Arc<Mutex<StatsSummary>>,
        report_interval_seconds: u64,
    ) {
        let mut report_timer = interval(Duration::from_secs(report_interval_seconds.max(1)));
        // The first tick fires immediately; consume it so the first report
        // covers a full interval.
        report_timer.tick().await;

        loop {
            tokio::select! {
                event = receiver.recv() => {
                    match event {
                        Some(event) => {
                            if let Ok(mut s) = summary.lock() {
                                s.apply(event);
                            }
                        }
                        None => break,
                    }
                }
                _ = report_timer.tick() => {
                    if let Ok(s) = summary.lock() {
                        if s.total_emails > 0 {
                            log::info!(
                                "processed {} emails: {} legitimate, {} questionable, {} suspicious, {} spam",
                                s.total_emails, s.legitimate, s.questionable, s.suspicious, s.spam
                            );
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_events_are_tallied() {
        let collector = StatisticsCollector::new(60);
        collector.record_event(StatEvent::Classified {
            classification: Classification::Spam,
            processing_time_ms: 3.5,
        });
        collector.record_event(StatEvent::Classified {
            classification: Classification::Legitimate,
            processing_time_ms: 2.5,
        });
        collector.record_event(StatEvent::Rejected);

        // The worker runs on a separate task; give it a moment to drain.
        tokio::time::sleep(Duration::from_millis(50)).await;

        let summary = collector.summary();
        assert_eq!(summary.total_emails, 2);
        assert_eq!(summary.spam, 1);
        assert_eq!(summary.legitimate, 1);
        assert_eq!(summary.rejected_requests, 1);
        assert_eq!(summary.total_processing_time_ms, 6.0);
    }

    #[tokio::test]
    async fn test_fresh_collector_is_empty() {
        let collector = StatisticsCollector::new(60);
        let summary = collector.summary();
        assert_eq!(summary.total_emails, 0);
        assert_eq!(summary.rejected_requests, 0);
    }
}
