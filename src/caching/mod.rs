//! 캐싱 계층 모듈
//!
//! Redis 연결을 감싸는 [`redis::RedisClient`]를 제공합니다.
//!
//! # 주요 기능
//!
//! - 자동 재연결되는 멀티플렉싱 연결
//! - JSON 기반 자동 직렬화/역직렬화
//! - 키 단위 TTL (`SET ... EX`)
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
