use crate::error::Result;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Destination for resolved records, one line each.
pub trait RecordSink {
    fn append(&mut self, record: &str) -> Result<()>;
}

/// Writes records to a file, replacing whatever was there before the run.
pub struct FileSink {
    path: PathBuf,
    file: File,
}

impl FileSink {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for FileSink {
    fn append(&mut self, record: &str) -> Result<()> {
        writeln!(self.file, "{record}")?;
        self.file.flush()?;
        Ok(())
    }
}

impl RecordSink for Vec<String> {
    fn append(&mut self, record: &str) -> Result<()> {
        self.push(record.to_string());
        Ok(())
    }
}

impl<W: RecordSink + ?Sized> RecordSink for &mut W {
    fn append(&mut self, record: &str) -> Result<()> {
        (**self).append(record)
    }
}
