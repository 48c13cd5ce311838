use std::fs::File;
use std::io::BufReader;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tracing::info;

use crate::conditions::ConditionMap;
use crate::error::LoaderError;
use crate::gene_expression::GeneDiffExpressionConverter;
use crate::mirbase::MirbaseConverter;
use crate::mirna_expression::MirnaDiffExpressionConverter;
use crate::record::{Organism, Record, RecordId};
use crate::sink::RecordSink;

pub const DEFAULT_TAXON_ID: &str = "9606";

#[derive(Debug, Default, Clone, Serialize)]
pub struct RunSummary {
    pub files: usize,
    pub records: usize,
}

/// Converts every gene differential-expression file in `data_dir`. The
/// condition mapping is loaded once; each file is keyed by its base name.
/// A failure in any file aborts the run.
pub fn run_gene_expression<S: RecordSink>(
    data_dir: &Utf8Path,
    mapping_path: &Utf8Path,
    sink: &mut S,
) -> Result<RunSummary, LoaderError> {
    let conditions = load_conditions(mapping_path)?;
    let mut converter = GeneDiffExpressionConverter::new(conditions);

    let mut summary = RunSummary::default();
    for path in data_files(data_dir)? {
        let file_name = path.file_name().unwrap_or_default().to_string();
        info!(file = %path, "processing gene expression file");
        summary.records += converter.process_file(&file_name, open(&path)?, sink)?;
        summary.files += 1;
    }
    Ok(summary)
}

/// Converts every miRNA differential-expression file in `data_dir`. The
/// accession-keyed mature cache lives for the whole run, spanning files.
pub fn run_mirna_expression<S: RecordSink>(
    data_dir: &Utf8Path,
    mapping_path: &Utf8Path,
    taxon_id: &str,
    sink: &mut S,
) -> Result<RunSummary, LoaderError> {
    let conditions = load_conditions(mapping_path)?;
    let organism = store_organism(taxon_id, sink)?;
    let mut converter = MirnaDiffExpressionConverter::new(conditions, organism);

    let mut summary = RunSummary::default();
    for path in data_files(data_dir)? {
        let file_name = path.file_name().unwrap_or_default().to_string();
        info!(file = %path, "processing miRNA expression file");
        summary.records += converter.process_file(&file_name, open(&path)?, sink)?;
        summary.files += 1;
    }
    Ok(summary)
}

/// Converts a single miRBase transcript export.
pub fn run_mirbase<S: RecordSink>(
    path: &Utf8Path,
    taxon_id: &str,
    sink: &mut S,
) -> Result<RunSummary, LoaderError> {
    let organism = store_organism(taxon_id, sink)?;
    let mut converter = MirbaseConverter::new(organism);

    info!(file = %path, "processing miRBase export");
    let records = converter.process(open(path)?, sink)?;
    Ok(RunSummary { files: 1, records })
}

fn load_conditions(mapping_path: &Utf8Path) -> Result<ConditionMap, LoaderError> {
    let conditions = ConditionMap::load(mapping_path.as_std_path())?;
    info!(entries = conditions.len(), "condition mapping loaded");
    Ok(conditions)
}

fn store_organism<S: RecordSink>(taxon_id: &str, sink: &mut S) -> Result<RecordId, LoaderError> {
    sink.store(Record::Organism(Organism {
        taxon_id: taxon_id.to_string(),
    }))
}

fn data_files(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, LoaderError> {
    if !dir.is_dir() {
        return Err(LoaderError::NotADirectory(dir.as_std_path().to_path_buf()));
    }
    let mut files = Vec::new();
    let entries = dir
        .read_dir_utf8()
        .map_err(|err| LoaderError::io(dir.as_std_path(), err))?;
    for entry in entries {
        let entry = entry.map_err(|err| LoaderError::io(dir.as_std_path(), err))?;
        let path = entry.into_path();
        if path.is_file() {
            files.push(path);
        }
    }
    // deterministic processing order
    files.sort();
    Ok(files)
}

fn open(path: &Utf8Path) -> Result<BufReader<File>, LoaderError> {
    let file =
        File::open(path.as_std_path()).map_err(|err| LoaderError::io(path.as_std_path(), err))?;
    Ok(BufReader::new(file))
}
