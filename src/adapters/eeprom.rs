//! Persistent storage backends for the configuration record.
//!
//! The config store addresses a small flat byte area ([`AREA_LEN`] bytes).
//! On the target that area is one NVS blob rewritten whole on every write,
//! which gives power-loss atomicity for free. On the host it is a plain
//! in-memory array with a write counter so tests can assert on wear.

use crate::app::ports::StoragePort;
use crate::error::StorageError;

/// Size of the emulated storage area (bytes). Comfortably larger than the
/// config record so layout growth does not force a migration here.
pub const AREA_LEN: usize = 64;

// ───────────────────────────────────────────────────────────────
// Host backend
// ───────────────────────────────────────────────────────────────

/// In-memory storage area. Fresh instances read as all zeroes, which the
/// config store treats as uninitialised (no sentinel).
pub struct MemStorage {
    area: [u8; AREA_LEN],
    write_count: usize,
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            area: [0; AREA_LEN],
            write_count: 0,
        }
    }

    /// Number of `write_block` calls that succeeded.
    pub fn write_count(&self) -> usize {
        self.write_count
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StoragePort for MemStorage {
    fn read_block(&self, offset: usize, buf: &mut [u8]) -> Result<(), StorageError> {
        let end = offset.checked_add(buf.len()).ok_or(StorageError::OutOfBounds)?;
        if end > AREA_LEN {
            return Err(StorageError::OutOfBounds);
        }
        buf.copy_from_slice(&self.area[offset..end]);
        Ok(())
    }

    fn write_block(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError> {
        let end = offset.checked_add(data.len()).ok_or(StorageError::OutOfBounds)?;
        if end > AREA_LEN {
            return Err(StorageError::OutOfBounds);
        }
        self.area[offset..end].copy_from_slice(data);
        self.write_count += 1;
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Target backend (NVS blob)
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
mod nvs {
    use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};
    use log::warn;

    use super::AREA_LEN;
    use crate::app::ports::StoragePort;
    use crate::error::{Error, Result, StorageError};

    const NAMESPACE: &str = "containerfan";
    const BLOB_KEY: &str = "config";

    /// NVS-backed storage area. The whole area is one blob; partial writes
    /// read-modify-write it so offsets behave like EEPROM addresses.
    pub struct NvsStorage {
        nvs: EspNvs<NvsDefault>,
    }

    impl NvsStorage {
        pub fn new(partition: EspDefaultNvsPartition) -> Result<Self> {
            let nvs = EspNvs::new(partition, NAMESPACE, true)
                .map_err(|_| Error::Init("nvs namespace"))?;
            Ok(Self { nvs })
        }

        /// Current area contents; an absent blob reads as all zeroes
        /// (first boot).
        fn load_area(&self) -> core::result::Result<[u8; AREA_LEN], StorageError> {
            let mut area = [0u8; AREA_LEN];
            match self.nvs.get_blob(BLOB_KEY, &mut area) {
                Ok(_) => Ok(area),
                Err(e) => {
                    warn!("nvs: blob read failed: {e}");
                    Err(StorageError::IoError)
                }
            }
        }
    }

    impl StoragePort for NvsStorage {
        fn read_block(
            &self,
            offset: usize,
            buf: &mut [u8],
        ) -> core::result::Result<(), StorageError> {
            let end = offset.checked_add(buf.len()).ok_or(StorageError::OutOfBounds)?;
            if end > AREA_LEN {
                return Err(StorageError::OutOfBounds);
            }
            let area = self.load_area()?;
            buf.copy_from_slice(&area[offset..end]);
            Ok(())
        }

        fn write_block(
            &mut self,
            offset: usize,
            data: &[u8],
        ) -> core::result::Result<(), StorageError> {
            let end = offset.checked_add(data.len()).ok_or(StorageError::OutOfBounds)?;
            if end > AREA_LEN {
                return Err(StorageError::OutOfBounds);
            }
            let mut area = self.load_area()?;
            area[offset..end].copy_from_slice(data);
            self.nvs.set_blob(BLOB_KEY, &area).map_err(|e| {
                warn!("nvs: blob write failed: {e}");
                StorageError::IoError
            })
        }
    }
}

#[cfg(target_os = "espidf")]
pub use nvs::NvsStorage;
