use std::io::Write;

use serde::Serialize;

use crate::error::LoaderError;
use crate::record::{Record, RecordId};

/// Storage seam for converted records. The sink assigns each record a unique
/// internal id; cross-references between records are expressed with these
/// ids.
///
/// `reserve` hands out an id before the record body exists, which the miRBase
/// path needs: a mature transcript carries a back-reference to a primary
/// transcript that is committed only after its mature collection is complete.
/// A committed record is immutable.
pub trait RecordSink {
    fn reserve(&mut self) -> RecordId;

    fn commit(&mut self, id: RecordId, record: Record) -> Result<(), LoaderError>;

    fn store(&mut self, record: Record) -> Result<RecordId, LoaderError> {
        let id = self.reserve();
        self.commit(id, record)?;
        Ok(id)
    }
}

/// Sink writing one JSON object per committed record to any writer.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    next_id: u64,
}

#[derive(Serialize)]
struct StoredRecord<'a> {
    id: RecordId,
    #[serde(flatten)]
    record: &'a Record,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, next_id: 0 }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn reserve(&mut self) -> RecordId {
        self.next_id += 1;
        RecordId(self.next_id)
    }

    fn commit(&mut self, id: RecordId, record: Record) -> Result<(), LoaderError> {
        let line = serde_json::to_string(&StoredRecord { id, record: &record })
            .map_err(|err| LoaderError::Storage(err.to_string()))?;
        self.writer
            .write_all(line.as_bytes())
            .and_then(|_| self.writer.write_all(b"\n"))
            .map_err(|err| LoaderError::Storage(err.to_string()))
    }
}

/// In-memory sink, used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    next_id: u64,
    records: Vec<(RecordId, Record)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[(RecordId, Record)] {
        &self.records
    }

    pub fn by_id(&self, id: RecordId) -> Option<&Record> {
        self.records
            .iter()
            .find(|(record_id, _)| *record_id == id)
            .map(|(_, record)| record)
    }

    pub fn of_kind(&self, kind: &str) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|(_, record)| record.kind() == kind)
            .map(|(_, record)| record)
            .collect()
    }
}

impl RecordSink for MemorySink {
    fn reserve(&mut self) -> RecordId {
        self.next_id += 1;
        RecordId(self.next_id)
    }

    fn commit(&mut self, id: RecordId, record: Record) -> Result<(), LoaderError> {
        self.records.push((id, record));
        Ok(())
    }
}
