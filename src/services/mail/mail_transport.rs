//! # 메일 서비스 클라이언트
//!
//! 메일 서비스는 `POST {to, subject, message}`를 받으면 `202 Accepted`로 응답합니다.
//! 그 외의 상태 코드나 네트워크 실패는 모두 전송 거부로 취급합니다.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;

use crate::errors::errors::{AppError, AppResult};

/// 메일 서비스 호출 제한 시간
pub const MAIL_TIMEOUT: Duration = Duration::from_secs(5);

/// 외부 메일 전송 수단
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// 메일 한 통을 전달합니다. 전송이 거부되면 `AppError::DeliveryError`입니다.
    async fn deliver(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}

#[derive(Serialize)]
struct MailPayload<'a> {
    to: &'a str,
    subject: &'a str,
    message: &'a str,
}

/// HTTP로 메일 서비스를 호출하는 [`MailTransport`]
pub struct HttpMailTransport {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpMailTransport {
    pub fn new(endpoint: impl Into<String>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(MAIL_TIMEOUT)
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }
}

#[async_trait]
impl MailTransport for HttpMailTransport {
    async fn deliver(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&MailPayload {
                to,
                subject,
                message: body,
            })
            .send()
            .await
            .map_err(|e| AppError::DeliveryError(format!("메일 서비스 호출 실패: {}", e)))?;

        if response.status() != StatusCode::ACCEPTED {
            return Err(AppError::DeliveryError(format!(
                "메일 서비스 응답 코드: {}",
                response.status()
            )));
        }

        log::info!("메일 발송 요청 완료: {} ({})", to, subject);
        Ok(())
    }
}
