//! # 감사 로그 디스패처
//!
//! ```text
//! 핸들러 ──try_send──► [bounded mpsc (64)] ──► 워커 태스크 ──► AuditSink::record
//!                         │ 가득 참                              │ 실패
//!                         ▼                                      ▼
//!                     warn! 후 버림                          warn! 후 다음 항목
//! ```
//!
//! 핸들러는 큐에 넣기만 하고 기다리지 않습니다.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::errors::errors::{AppError, AppResult};

/// 기본 큐 크기
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

const SINK_TIMEOUT: Duration = Duration::from_secs(5);

/// 로그 수집 서비스로 보내는 항목
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    pub name: String,
    pub data: String,
}

/// 감사 로그 저장 대상
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, entry: &AuditEntry) -> AppResult<()>;
}

/// 로그 수집 서비스(`POST {name, data}`)로 보내는 [`AuditSink`]
pub struct HttpAuditSink {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpAuditSink {
    pub fn new(endpoint: impl Into<String>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(SINK_TIMEOUT)
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }
}

#[async_trait]
impl AuditSink for HttpAuditSink {
    async fn record(&self, entry: &AuditEntry) -> AppResult<()> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(entry)
            .send()
            .await
            .map_err(|e| AppError::InternalError(format!("로그 서비스 호출 실패: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::InternalError(format!(
                "로그 서비스 응답 코드: {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// 감사 로그 큐의 송신 측
///
/// `Clone`은 같은 큐를 공유합니다. 모든 송신 측이 사라지면 워커가 종료됩니다.
#[derive(Clone)]
pub struct AuditDispatcher {
    sender: mpsc::Sender<AuditEntry>,
}

impl AuditDispatcher {
    /// 큐와 워커 태스크를 만듭니다. 현재 tokio 런타임 안에서 호출해야 합니다.
    pub fn spawn(sink: Arc<dyn AuditSink>, capacity: usize) -> Self {
        let (sender, mut receiver) = mpsc::channel::<AuditEntry>(capacity.max(1));

        tokio::spawn(async move {
            while let Some(entry) = receiver.recv().await {
                if let Err(e) = sink.record(&entry).await {
                    log::warn!("감사 로그 전달 실패 ({}): {}", entry.name, e);
                }
            }
            log::debug!("감사 로그 워커 종료");
        });

        Self { sender }
    }

    /// 항목을 큐에 넣습니다. 큐가 가득 찼거나 닫혔으면 버리고 `false`를 반환합니다.
    pub fn dispatch(&self, name: &str, data: impl Into<String>) -> bool {
        let entry = AuditEntry {
            name: name.to_string(),
            data: data.into(),
        };

        match self.sender.try_send(entry) {
            Ok(()) => true,
            Err(TrySendError::Full(entry)) => {
                log::warn!("감사 로그 큐가 가득 차 항목을 버립니다: {}", entry.name);
                false
            }
            Err(TrySendError::Closed(entry)) => {
                log::warn!("감사 로그 워커가 종료되어 항목을 버립니다: {}", entry.name);
                false
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 받은 항목을 기록하는 테스트용 저장 대상
    #[derive(Default)]
    pub(crate) struct RecordingSink {
        pub(crate) entries: Mutex<Vec<AuditEntry>>,
        failures_left: AtomicUsize,
    }

    impl RecordingSink {
        fn failing_first(n: usize) -> Self {
            Self {
                entries: Mutex::new(Vec::new()),
                failures_left: AtomicUsize::new(n),
            }
        }

        pub(crate) fn names(&self) -> Vec<String> {
            self.entries
                .lock()
                .unwrap()
                .iter()
                .map(|e| e.name.clone())
                .collect()
        }
    }

    #[async_trait]
    impl AuditSink for RecordingSink {
        async fn record(&self, entry: &AuditEntry) -> AppResult<()> {
            let failed = self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if failed {
                return Err(AppError::InternalError("sink down".to_string()));
            }
            self.entries.lock().unwrap().push(entry.clone());
            Ok(())
        }
    }

    /// 워커가 큐를 비울 때까지 양보합니다.
    pub(crate) async fn drain(sink: &RecordingSink, expected: usize) {
        for _ in 0..100 {
            if sink.entries.lock().unwrap().len() >= expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    #[actix_web::test]
    async fn test_entries_reach_sink_in_order() {
        let sink = Arc::new(RecordingSink::default());
        let dispatcher = AuditDispatcher::spawn(sink.clone(), 8);

        assert!(dispatcher.dispatch("authentication", "a@b.com logged in"));
        assert!(dispatcher.dispatch("registration", "a@b.com registered"));
        drain(&sink, 2).await;

        assert_eq!(sink.names(), vec!["authentication", "registration"]);
    }

    #[actix_web::test]
    async fn test_sink_failure_does_not_stop_worker() {
        let sink = Arc::new(RecordingSink::failing_first(1));
        let dispatcher = AuditDispatcher::spawn(sink.clone(), 8);

        dispatcher.dispatch("first", "lost");
        dispatcher.dispatch("second", "kept");
        drain(&sink, 1).await;

        assert_eq!(sink.names(), vec!["second"]);
    }

    #[actix_web::test]
    async fn test_full_queue_drops_without_blocking() {
        let sink = Arc::new(RecordingSink::default());
        let dispatcher = AuditDispatcher::spawn(sink.clone(), 1);

        // 워커가 아직 실행되지 않았으므로 두 번째 항목은 자리가 없음
        assert!(dispatcher.dispatch("kept", ""));
        assert!(!dispatcher.dispatch("dropped", ""));
        drain(&sink, 1).await;

        assert_eq!(sink.names(), vec!["kept"]);
    }
}
