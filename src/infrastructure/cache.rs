use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use crate::entities::repo::{CacheFile, FrontendData};

/// Single-file JSON cache with a time-based expiry window, plus the
/// frontend data file consumed by the static templates.
pub struct ProjectCache {
    cache_path: PathBuf,
    frontend_path: PathBuf,
    max_age: Duration,
}

impl ProjectCache {
    pub fn new(cache_path: &Path, frontend_path: &Path, max_age: Duration) -> Self {
        ProjectCache {
            cache_path: cache_path.to_path_buf(),
            frontend_path: frontend_path.to_path_buf(),
            max_age,
        }
    }

    /// A cache older than the window, unreadable, or missing is treated
    /// as absent.
    pub fn load(&self) -> Option<CacheFile> {
        if !self.cache_path.exists() {
            return None;
        }

        let raw = match std::fs::read_to_string(&self.cache_path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Erro ao ler cache: {}", e);
                return None;
            }
        };

        let cache: CacheFile = match serde_json::from_str(&raw) {
            Ok(cache) => cache,
            Err(e) => {
                warn!("Cache inválido: {}", e);
                return None;
            }
        };

        let age = Utc::now().signed_duration_since(cache.timestamp);
        let window = chrono::Duration::from_std(self.max_age).unwrap_or(chrono::Duration::zero());
        if age < window {
            info!("Cache válido encontrado ({})", cache.timestamp);
            Some(cache)
        } else {
            warn!("Cache expirado");
            None
        }
    }

    pub fn save(&self, cache: &CacheFile) -> io::Result<()> {
        write_json(&self.cache_path, cache)?;
        info!("Cache salvo: {} projetos", cache.count);
        Ok(())
    }

    pub fn save_frontend(&self, data: &FrontendData) -> io::Result<()> {
        write_json(&self.frontend_path, data)?;
        info!("Dados salvos para frontend: {}", self.frontend_path.display());
        Ok(())
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    std::fs::write(path, json)
}
