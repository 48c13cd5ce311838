use std::fmt;

use serde::Serialize;

/// Internal identifier assigned by the storage sink when a record slot is
/// reserved or first written. Cross-references between records use these ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Organism {
    pub taxon_id: String,
}

/// Precursor miRNA entity, one per miRBase row. Always created, even when
/// neither strand is populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimaryTranscript {
    pub primary_identifier: String,
    pub secondary_identifier: String,
    pub sequence: String,
    pub organism: RecordId,
    pub matures: Vec<RecordId>,
}

/// Strand-specific processed miRNA. The miRBase path creates the full form;
/// the differential-expression path creates a sparse form carrying only the
/// accession and organism, to serve as a join target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatureMirna {
    pub primary_identifier: Option<String>,
    pub secondary_identifier: String,
    pub sequence: Option<String>,
    pub organism: RecordId,
    pub primary_transcript: Option<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneDiffExpression {
    pub ensembl_id: String,
    pub base_mean: f64,
    pub log2_fc: f64,
    pub p_value: f64,
    pub adjp_value: f64,
    pub condition: Option<String>,
}

/// Value columns are carried verbatim: the source files mix numerics with
/// markers like `NA`, and this path never re-interprets them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MirnaDiffExpression {
    pub mature_mirna: RecordId,
    pub log2_fc: String,
    pub p_value: String,
    pub adjp_value: String,
    pub tgw_dispersion: String,
    pub up_down: String,
    pub condition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Record {
    Organism(Organism),
    PrimaryTranscript(PrimaryTranscript),
    MatureMirna(MatureMirna),
    GeneDiffExpression(GeneDiffExpression),
    MirnaDiffExpression(MirnaDiffExpression),
}

impl Record {
    pub fn kind(&self) -> &'static str {
        match self {
            Record::Organism(_) => "organism",
            Record::PrimaryTranscript(_) => "primary_transcript",
            Record::MatureMirna(_) => "mature_mirna",
            Record::GeneDiffExpression(_) => "gene_diff_expression",
            Record::MirnaDiffExpression(_) => "mirna_diff_expression",
        }
    }
}
