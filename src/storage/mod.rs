//! 세션 저장 계층 모듈
//!
//! 내구성 있는 클라이언트 측 키-값 저장소와 그 위의 세션 저장소를 제공합니다.
//!
//! # 주요 기능
//!
//! - 동기식 읽기, 배치 단위 원자적 쓰기
//! - 메모리 저장소 (테스트/임베딩) 와 JSON 파일 저장소 (데스크톱)
//! - 세션 키 관리와 기기 신뢰 토큰 보존
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::storage::{FileStorage, SessionStore};
//!
//! let storage = Arc::new(FileStorage::open("session.json")?);
//! let store = SessionStore::new(storage);
//!
//! if let Some(token) = store.token() {
//!     println!("로그인 상태입니다");
//! }
//! ```

pub mod file;
pub mod key_value;
pub mod memory;
pub mod session_store;

pub use file::FileStorage;
pub use key_value::{KeyValueStorage, WriteBatch, WriteOp};
pub use memory::MemoryStorage;
pub use session_store::SessionStore;
