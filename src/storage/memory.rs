//! 프로세스 메모리 기반 키-값 저장소
//!
//! 테스트와 임베딩 환경에서 사용합니다. 배치는 하나의 쓰기 잠금 안에서 적용됩니다.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::errors::StorageError;
use crate::storage::key_value::{KeyValueStorage, WriteBatch};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 초기 값을 가진 저장소를 생성합니다.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn commit(&self, batch: WriteBatch) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        batch.apply_to(&mut entries);
        Ok(())
    }

    fn snapshot(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.clone())
    }
}
