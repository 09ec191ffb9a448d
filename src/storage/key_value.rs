//! 키-값 저장소 추상화
//!
//! 세션 저장소가 사용하는 내구성 있는 클라이언트 측 키-값 저장소 인터페이스입니다.
//! 읽기는 동기식이며, 쓰기는 [`WriteBatch`] 단위로 원자적으로 적용됩니다.

use std::collections::BTreeMap;

use crate::errors::StorageError;

/// 배치 안의 단일 쓰기 연산
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    Set { key: String, value: String },
    Remove { key: String },
}

/// 하나의 임계 구역 안에서 순서대로 적용되는 쓰기 묶음
///
/// 구현체는 배치 전체를 적용하거나 전혀 적용하지 않아야 하며,
/// 동시 읽기가 배치의 일부만 반영된 상태를 관찰해서는 안 됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &str, value: impl Into<String>) -> Self {
        self.ops.push(WriteOp::Set {
            key: key.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn remove(mut self, key: &str) -> Self {
        self.ops.push(WriteOp::Remove { key: key.to_string() });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    /// 배치를 맵에 적용합니다.
    pub fn apply_to(&self, map: &mut BTreeMap<String, String>) {
        for op in &self.ops {
            match op {
                WriteOp::Set { key, value } => {
                    map.insert(key.clone(), value.clone());
                }
                WriteOp::Remove { key } => {
                    map.remove(key);
                }
            }
        }
    }
}

/// 내구성 있는 키-값 저장소
///
/// 프로세스 전역에서 공유되며, 인증된 HTTP 클라이언트가 요청마다 읽습니다.
pub trait KeyValueStorage: Send + Sync {
    /// 키에 해당하는 값을 동기식으로 읽습니다.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// 배치를 원자적으로 적용합니다.
    fn commit(&self, batch: WriteBatch) -> Result<(), StorageError>;

    /// 현재 저장된 모든 키-값의 복사본을 반환합니다.
    fn snapshot(&self) -> Result<BTreeMap<String, String>, StorageError>;
}
