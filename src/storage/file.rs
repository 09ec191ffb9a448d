//! JSON 파일 기반 키-값 저장소
//!
//! 브라우저 localStorage의 데스크톱 대응물입니다. 모든 값은 하나의 JSON 객체 파일에
//! 저장되며, 읽기는 메모리 사본에서 동기식으로 처리됩니다.
//!
//! ## 원자성
//!
//! 배치는 `Mutex` 임계 구역 안에서 적용됩니다. 커밋할 때마다 디스크의 현재 내용을
//! 다시 읽어 그 위에 배치를 적용하므로, 같은 파일을 연 다른 인스턴스(다른 프로세스)가
//! 그 사이에 기록한 값을 되돌려 쓰지 않습니다. 읽기는 마지막 open/commit 시점의
//! 메모리 사본을 반환합니다.
//!
//! 새 내용은 같은 디렉터리의 고유한 임시 파일에 먼저 기록된 뒤 대상 파일 위로
//! rename 되므로 부분적으로 기록된 세션은 보이지 않습니다. 기록이 실패하면 임시 파일은
//! 삭제되고 메모리 사본도 변경되지 않습니다.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use uuid::Uuid;

use crate::errors::StorageError;
use crate::storage::key_value::{KeyValueStorage, WriteBatch};

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// 저장소 파일을 엽니다. 파일이 없으면 빈 저장소로 시작합니다.
    ///
    /// # Errors
    ///
    /// * `StorageError::Io` - 파일을 읽을 수 없음
    /// * `StorageError::Serialization` - 파일 내용이 JSON 객체가 아님
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = read_entries(&path)?;

        log::debug!("📂 세션 저장소 로드: {} ({}개 키)", path.display(), entries.len());

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
    match fs::read_to_string(path) {
        Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(e) => Err(e.into()),
    }
}

/// `.session.json.<uuid>.tmp`에 기록한 뒤 `path`로 rename 합니다.
fn write_atomically(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "storage".to_string());
    let tmp_name = format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple());
    let tmp_path = match parent {
        Some(parent) => parent.join(tmp_name),
        None => PathBuf::from(tmp_name),
    };

    let json = serde_json::to_vec_pretty(entries)?;

    let written = (|| -> std::io::Result<()> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)?;
        file.write_all(&json)?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    if let Err(e) = written {
        if let Err(cleanup) = fs::remove_file(&tmp_path) {
            if cleanup.kind() != std::io::ErrorKind::NotFound {
                log::warn!("⚠️ 임시 파일 삭제 실패 {}: {}", tmp_path.display(), cleanup);
            }
        }
        return Err(e.into());
    }

    Ok(())
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn commit(&self, batch: WriteBatch) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;

        let mut next = read_entries(&self.path)?;
        batch.apply_to(&mut next);
        write_atomically(&self.path, &next)?;

        *entries = next;
        Ok(())
    }

    fn snapshot(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.clone())
    }
}
