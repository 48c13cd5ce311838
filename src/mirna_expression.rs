use std::io::BufRead;

use tracing::debug;

use crate::cache::DedupCache;
use crate::conditions::ConditionMap;
use crate::error::LoaderError;
use crate::reader::TabRecordReader;
use crate::record::{MatureMirna, MirnaDiffExpression, Record, RecordId};
use crate::rows::MirnaExpressionRow;
use crate::sink::RecordSink;

/// Converter for miRNA differential-expression result files. Each admissible
/// row references a MatureMirna resolved through a per-run cache keyed by
/// accession; the first row naming an accession creates a sparse mature
/// record (accession and organism only) as a join target.
///
/// This accession-keyed cache is deliberately separate from the miRBase
/// converter's identifier-keyed cache: if both converters feed the same
/// storage space, a mature transcript may end up with two differently
/// populated records.
pub struct MirnaDiffExpressionConverter {
    conditions: ConditionMap,
    matures: DedupCache,
    organism: RecordId,
}

impl MirnaDiffExpressionConverter {
    pub fn new(conditions: ConditionMap, organism: RecordId) -> Self {
        Self {
            conditions,
            matures: DedupCache::new(),
            organism,
        }
    }

    /// Streams one result file, discarding the header row. Returns the number
    /// of expression records stored (created matures are not counted).
    pub fn process_file<R: BufRead, S: RecordSink>(
        &mut self,
        file_name: &str,
        input: R,
        sink: &mut S,
    ) -> Result<usize, LoaderError> {
        let condition = self.conditions.get(file_name).map(str::to_string);

        let mut rows = TabRecordReader::new(input);
        rows.next().transpose()?;

        let mut stored = 0;
        while let Some(fields) = rows.next() {
            let fields = fields?;
            let Some(row) = MirnaExpressionRow::decode(&fields) else {
                continue;
            };

            let organism = self.organism;
            let mature = self.matures.get_or_create(&row.accession, || {
                sink.store(Record::MatureMirna(MatureMirna {
                    primary_identifier: None,
                    secondary_identifier: row.accession.clone(),
                    sequence: None,
                    organism,
                    primary_transcript: None,
                }))
            })?;

            sink.store(Record::MirnaDiffExpression(MirnaDiffExpression {
                mature_mirna: mature,
                log2_fc: row.log2_fc,
                p_value: row.p_value,
                adjp_value: row.adjp_value,
                tgw_dispersion: row.tgw_dispersion,
                up_down: row.up_down,
                condition: condition.clone(),
            }))?;
            stored += 1;
        }
        debug!(file = file_name, records = stored, "miRNA expression file processed");
        Ok(stored)
    }
}
