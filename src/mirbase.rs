use std::io::BufRead;

use tracing::debug;

use crate::cache::DedupCache;
use crate::error::LoaderError;
use crate::reader::TabRecordReader;
use crate::record::{MatureMirna, PrimaryTranscript, Record, RecordId};
use crate::rows::MirbaseRow;
use crate::sink::RecordSink;

/// Converter for the miRBase transcript export. Each row yields one
/// PrimaryTranscript; its 5′/3′ mature transcripts are resolved through a
/// per-run cache keyed by mature primary identifier, so a mature named by
/// several rows is created once and referenced everywhere else.
pub struct MirbaseConverter {
    matures: DedupCache,
    organism: RecordId,
}

impl MirbaseConverter {
    pub fn new(organism: RecordId) -> Self {
        Self {
            matures: DedupCache::new(),
            organism,
        }
    }

    /// Streams one miRBase export, discarding the header row. Returns the
    /// number of primary transcripts stored.
    pub fn process<R: BufRead, S: RecordSink>(
        &mut self,
        input: R,
        sink: &mut S,
    ) -> Result<usize, LoaderError> {
        let mut rows = TabRecordReader::new(input);
        rows.next().transpose()?;

        let mut stored = 0;
        while let Some(fields) = rows.next() {
            let fields = fields?;
            let row = MirbaseRow::decode(&fields, rows.line())?;
            self.process_row(row, sink)?;
            stored += 1;
        }
        debug!(
            primary_transcripts = stored,
            mature_mirnas = self.matures.len(),
            "miRBase export processed"
        );
        Ok(stored)
    }

    fn process_row<S: RecordSink>(
        &mut self,
        row: MirbaseRow,
        sink: &mut S,
    ) -> Result<(), LoaderError> {
        // The primary's id is reserved up front so newly created matures can
        // reference it; the primary itself is committed only once its mature
        // collection is complete, since the sink forbids mutation after
        // commit.
        let primary = sink.reserve();
        let organism = self.organism;

        let mut matures = Vec::new();
        for strand in [&row.five_prime, &row.three_prime] {
            if !strand.is_present() {
                continue;
            }
            let id = self.matures.get_or_create(&strand.identifier, || {
                sink.store(Record::MatureMirna(MatureMirna {
                    primary_identifier: Some(strand.identifier.clone()),
                    secondary_identifier: strand.accession.clone(),
                    sequence: Some(strand.sequence.clone()),
                    organism,
                    primary_transcript: Some(primary),
                }))
            })?;
            matures.push(id);
        }

        sink.commit(
            primary,
            Record::PrimaryTranscript(PrimaryTranscript {
                primary_identifier: row.primary_identifier,
                secondary_identifier: row.primary_accession,
                sequence: row.primary_sequence,
                organism,
                matures,
            }),
        )
    }
}
