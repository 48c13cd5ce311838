use std::io::BufRead;

use tracing::debug;

use crate::conditions::ConditionMap;
use crate::error::LoaderError;
use crate::reader::TabRecordReader;
use crate::record::{GeneDiffExpression, Record};
use crate::rows::GeneExpressionRow;
use crate::sink::RecordSink;

/// Converter for gene differential-expression result files. Every admissible
/// row yields exactly one record; rows are never deduplicated.
pub struct GeneDiffExpressionConverter {
    conditions: ConditionMap,
}

impl GeneDiffExpressionConverter {
    pub fn new(conditions: ConditionMap) -> Self {
        Self { conditions }
    }

    /// Streams one result file, discarding the header row. `file_name` is the
    /// base name used to look up the condition label. Returns the number of
    /// records stored.
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
            let Some(row) = GeneExpressionRow::decode(&fields, rows.line())? else {
                continue;
            };
            sink.store(Record::GeneDiffExpression(GeneDiffExpression {
                ensembl_id: row.ensembl_id,
                base_mean: row.base_mean,
                log2_fc: row.log2_fc,
                p_value: row.p_value,
                adjp_value: row.adjp_value,
                condition: condition.clone(),
            }))?;
            stored += 1;
        }
        debug!(file = file_name, records = stored, "gene expression file processed");
        Ok(stored)
    }
}
