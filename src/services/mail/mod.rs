//! 메일 전송 계층
//!
//! 메일 본문 렌더링과 SMTP 전송은 별도 메일 서비스가 담당하며,
//! 이 서비스는 수신자, 제목, 본문만 넘깁니다.

pub mod mail_transport;

pub use mail_transport::{HttpMailTransport, MAIL_TIMEOUT, MailTransport};
