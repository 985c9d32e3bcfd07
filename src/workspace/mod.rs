//! Directory-backed store for point tables and buffer layers.
//!
//! A [`Workspace`] is an explicit handle: every read and write goes through
//! it, there is no process-wide current workspace.

mod points;

pub use points::PointRecord;

use points::POINT_COLUMNS;

use crate::error::BufferError;
use crate::fit::BufferSpec;
use crate::io::BuffersToGeoParquet;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CITY_POINTS_LAYER: &str = "CityPointsLyr";
pub const CITY_BUFFER_LAYER: &str = "CityBuff";
pub const STATE_POINTS_LAYER: &str = "StatePointsLyr";
pub const STATE_BUFFER_LAYER: &str = "StatesBuff";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Opens `parent/name`, creating the directory if it does not exist yet.
    pub fn open_or_create(parent: impl AsRef<Path>, name: &str) -> Result<Self, BufferError> {
        if name.trim().is_empty() {
            return Err(BufferError::ConfigError(
                "Workspace name cannot be empty".to_string(),
            ));
        }

        let root = parent.as_ref().join(name);
        if !root.is_dir() {
            fs::create_dir_all(&root)
                .map_err(|e| BufferError::IoError(format!("{}: {}", root.display(), e)))?;
            tracing::info!("Created workspace {}", root.display());
        }
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Path of an arbitrary file inside the workspace.
    pub fn path_for(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    pub fn points_path(&self, layer: &str) -> PathBuf {
        self.path_for(&format!("{}.csv", layer))
    }

    pub fn buffers_path(&self, layer: &str) -> PathBuf {
        self.path_for(&format!("{}.parquet", layer))
    }

    /// Whether a point table with this name exists.
    pub fn has_layer(&self, layer: &str) -> bool {
        self.points_path(layer).is_file()
    }

    /// Writes (or replaces) a point table. The header is written even when
    /// `specs` is empty.
    pub fn write_points(&self, layer: &str, specs: &[BufferSpec]) -> Result<PathBuf, BufferError> {
        let path = self.points_path(layer);
        let file = File::create(&path).map_err(|e| BufferError::IoError(e.to_string()))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        writer
            .write_record(POINT_COLUMNS)
            .map_err(|e| BufferError::CsvError(e.to_string()))?;

        for spec in specs {
            writer
                .serialize(PointRecord::from(spec))
                .map_err(|e| BufferError::CsvError(e.to_string()))?;
        }
        writer
            .flush()
            .map_err(|e| BufferError::CsvError(e.to_string()))?;

        tracing::debug!("Wrote {} points to {}", specs.len(), path.display());
        Ok(path)
    }

    pub fn read_points(&self, layer: &str) -> Result<Vec<PointRecord>, BufferError> {
        let path = self.points_path(layer);
        if !path.is_file() {
            return Err(BufferError::IoError(format!(
                "Layer '{}' not found in {}",
                layer,
                self.root.display()
            )));
        }

        let mut reader =
            csv::Reader::from_path(&path).map_err(|e| BufferError::CsvError(e.to_string()))?;
        reader
            .deserialize()
            .map(|row| row.map_err(|e| BufferError::CsvError(e.to_string())))
            .collect()
    }

    /// Materializes round buffers around every spec and writes them as GeoParquet.
    pub fn write_buffers(
        &self,
        layer: &str,
        specs: &[BufferSpec],
        segments: usize,
    ) -> Result<PathBuf, BufferError> {
        let path = self.buffers_path(layer);
        specs.to_geoparquet(&path, segments)?;
        tracing::debug!("Wrote {} buffers to {}", specs.len(), path.display());
        Ok(path)
    }
}
