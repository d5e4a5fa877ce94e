//! 감사 로그 전달 계층
//!
//! 로그인/회원가입 같은 이벤트를 로그 수집 서비스로 보냅니다.
//! 전달은 최선 노력(best-effort)이며 최대 한 번입니다. 실패는 로컬 로그에만 남고
//! 요청 처리 결과에는 영향을 주지 않습니다.

pub mod audit_dispatcher;

pub use audit_dispatcher::{AuditDispatcher, AuditEntry, AuditSink, HttpAuditSink};
