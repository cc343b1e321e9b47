use crate::error::{Error, Result};
use crate::results::QaPair;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// One line of a fine-tuning dataset, keyed the way completion-style trainers expect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub prompt: String,
    pub completion: String,
}

impl From<&QaPair> for DatasetRecord {
    fn from(pair: &QaPair) -> Self {
        Self {
            prompt: pair.question.clone(),
            completion: pair.answer.clone(),
        }
    }
}

impl From<DatasetRecord> for QaPair {
    fn from(record: DatasetRecord) -> Self {
        QaPair::new(record.prompt, record.completion)
    }
}

/// Append-only newline-delimited JSON writer.
///
/// Every record is a complete line as soon as it is written; nothing already
/// written is revisited.
pub struct DatasetWriter<W: Write> {
    out: W,
    lines: usize,
}

impl DatasetWriter<BufWriter<File>> {
    /// Create (or truncate) the dataset file at `path`
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path.as_ref())?;
        ::log::debug!("Writing dataset to {}", path.as_ref().display());
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> DatasetWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, lines: 0 }
    }

    pub fn append(&mut self, pair: &QaPair) -> Result<()> {
        let line = serde_json::to_string(&DatasetRecord::from(pair))?;
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    pub fn append_all<'a, I>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a QaPair>,
    {
        for pair in pairs {
            self.append(pair)?;
        }
        Ok(())
    }

    /// Number of records written so far
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flush buffered records and return the number of lines written
    pub fn finish(mut self) -> Result<usize> {
        self.out.flush()?;
        Ok(self.lines)
    }
}

/// Write all pairs to `path` as JSON lines
pub fn write_jsonl<P: AsRef<Path>>(path: P, pairs: &[QaPair]) -> Result<usize> {
    let mut writer = DatasetWriter::create(path)?;
    writer.append_all(pairs)?;
    writer.finish()
}

/// Read a JSON lines dataset back into pairs, skipping blank lines
pub fn read_jsonl<P: AsRef<Path>>(path: P) -> Result<Vec<QaPair>> {
    let reader = BufReader::new(File::open(path)?);
    let mut pairs = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: DatasetRecord = serde_json::from_str(&line)
            .map_err(|e| Error::MalformedInput(format!("line {}: {}", i + 1, e)))?;
        pairs.push(record.into());
    }

    Ok(pairs)
}
