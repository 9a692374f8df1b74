use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::output::PipelineOutput;

/// Destination for the three derived tables.
pub trait TableSink {
    fn write_tables(&self, output: &PipelineOutput) -> Result<()>;
}

/// Writes `users.json`, `edges.json` and `engagement.json` into a directory,
/// creating it if needed.
pub struct JsonDirSink {
    dir: PathBuf,
}

impl JsonDirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write_json<T: Serialize + ?Sized>(&self, name: &str, rows: &T) -> Result<()> {
        let path = self.dir.join(name);
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, rows)
            .with_context(|| format!("writing {}", path.display()))?;
        writer.flush()?;
        Ok(())
    }
}

impl TableSink for JsonDirSink {
    fn write_tables(&self, output: &PipelineOutput) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating output dir {}", self.dir.display()))?;

        self.write_json("users.json", &output.user_rows())?;
        self.write_json("edges.json", &output.edges)?;
        self.write_json("engagement.json", &output.engagement_rows())?;

        info!(
            dir = %self.dir.display(),
            users = output.users.len(),
            edges = output.edges.len(),
            "Wrote tables"
        );
        Ok(())
    }
}
