//! # 난수 식별자 생성기
//!
//! 세션 식별자(jti, OAuth state)와 6자리 인증 코드를 OS 난수 소스로 생성합니다.
//! OS 난수 소스가 실패하면 약한 난수로 대체하지 않고 에러를 반환합니다.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use rand::rngs::OsRng;

use crate::errors::errors::{AppError, AppResult};

/// 식별자 하나에 사용하는 난수 바이트 수
pub const IDENTIFIER_BYTES: usize = 32;

const CODE_SPACE: u32 = 1_000_000;
/// `CODE_SPACE`의 배수 중 `u32` 범위에 들어가는 최댓값. 이 이상은 버려서 편향을 없앱니다.
const CODE_ACCEPT_BELOW: u32 = u32::MAX - (u32::MAX % CODE_SPACE);

/// 32바이트 난수를 패딩 없는 URL-safe base64로 인코딩한 불투명 식별자 (43자)
pub fn generate_identifier() -> AppResult<String> {
    let mut bytes = [0u8; IDENTIFIER_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AppError::RandomGenerationError(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// 000000 ~ 999999 범위에서 균등하게 뽑은 6자리 코드
pub fn generate_code() -> AppResult<String> {
    loop {
        let mut bytes = [0u8; 4];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| AppError::RandomGenerationError(e.to_string()))?;

        let candidate = u32::from_le_bytes(bytes);
        if candidate < CODE_ACCEPT_BELOW {
            return Ok(format!("{:06}", candidate % CODE_SPACE));
        }
    }
}
