use crate::error::LoaderError;

/// Differential-expression rows must carry at least this many columns to be
/// considered at all; shorter rows are silently skipped.
pub const MIN_EXPRESSION_FIELDS: usize = 7;

/// Substring marking a mature-miRNA accession (e.g. `MIMAT0000062`).
pub const MATURE_ACCESSION_MARKER: &str = "MIMAT";

/// Typed view of one gene differential-expression row. Decoding applies the
/// admissibility filters: a `None` result means the row was skipped, an error
/// means a required numeric column failed to parse and the file must abort.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneExpressionRow {
    pub ensembl_id: String,
    pub base_mean: f64,
    pub log2_fc: f64,
    pub p_value: f64,
    pub adjp_value: f64,
}

impl GeneExpressionRow {
    pub fn decode(fields: &[String], line: usize) -> Result<Option<Self>, LoaderError> {
        if fields.len() < MIN_EXPRESSION_FIELDS {
            return Ok(None);
        }
        // baseMean decides admissibility before any other column is parsed,
        // so filtered rows never trip the strict-parse policy.
        let base_mean = parse_float(&fields[1], "baseMean", line)?;
        if base_mean <= 0.0 {
            return Ok(None);
        }
        Ok(Some(Self {
            ensembl_id: fields[0].clone(),
            base_mean,
            log2_fc: parse_float(&fields[2], "log2FC", line)?,
            p_value: parse_float(&fields[5], "pValue", line)?,
            adjp_value: parse_float(&fields[6], "adjpValue", line)?,
        }))
    }
}

/// Typed view of one miRNA differential-expression row. Value columns stay
/// verbatim strings; only rows whose accession carries the MIMAT marker are
/// admissible.
#[derive(Debug, Clone, PartialEq)]
pub struct MirnaExpressionRow {
    pub accession: String,
    pub log2_fc: String,
    pub p_value: String,
    pub adjp_value: String,
    pub tgw_dispersion: String,
    pub up_down: String,
}

impl MirnaExpressionRow {
    pub fn decode(fields: &[String]) -> Option<Self> {
        if fields.len() < MIN_EXPRESSION_FIELDS {
            return None;
        }
        if !fields[0].contains(MATURE_ACCESSION_MARKER) {
            return None;
        }
        Some(Self {
            accession: fields[0].clone(),
            log2_fc: fields[1].clone(),
            p_value: fields[2].clone(),
            adjp_value: fields[4].clone(),
            tgw_dispersion: fields[5].clone(),
            up_down: fields[6].clone(),
        })
    }
}

/// Accession/identifier/sequence column triple for one strand of a miRBase
/// row. A strand is present when its identifier column is non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct StrandColumns {
    pub accession: String,
    pub identifier: String,
    pub sequence: String,
}

impl StrandColumns {
    pub fn is_present(&self) -> bool {
        !self.identifier.is_empty()
    }
}

/// Typed view of one miRBase export row. There is no short-row tolerance in
/// this path: fewer than 10 columns is a fatal parse error for the file.
#[derive(Debug, Clone, PartialEq)]
pub struct MirbaseRow {
    pub primary_accession: String,
    pub primary_identifier: String,
    pub primary_sequence: String,
    pub five_prime: StrandColumns,
    pub three_prime: StrandColumns,
}

impl MirbaseRow {
    pub fn decode(fields: &[String], line: usize) -> Result<Self, LoaderError> {
        if fields.len() < 10 {
            return Err(LoaderError::Parse {
                line,
                message: format!("miRBase row has {} columns, expected 10", fields.len()),
            });
        }
        Ok(Self {
            primary_accession: fields[0].clone(),
            primary_identifier: fields[1].clone(),
            primary_sequence: fields[3].clone(),
            five_prime: StrandColumns {
                accession: fields[4].clone(),
                identifier: fields[5].clone(),
                sequence: fields[6].clone(),
            },
            three_prime: StrandColumns {
                accession: fields[7].clone(),
                identifier: fields[8].clone(),
                sequence: fields[9].clone(),
            },
        })
    }
}

fn parse_float(value: &str, column: &'static str, line: usize) -> Result<f64, LoaderError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| LoaderError::NumberFormat {
            line,
            column,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn fields(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn gene_row_decodes() {
        let row = GeneExpressionRow::decode(
            &fields(&["ENSG001", "12.5", "1.3", "x", "x", "0.01", "0.04"]),
            2,
        )
        .unwrap()
        .unwrap();
        assert_eq!(row.ensembl_id, "ENSG001");
        assert_eq!(row.base_mean, 12.5);
        assert_eq!(row.log2_fc, 1.3);
        assert_eq!(row.p_value, 0.01);
        assert_eq!(row.adjp_value, 0.04);
    }

    #[test]
    fn gene_row_short_is_skipped() {
        let decoded =
            GeneExpressionRow::decode(&fields(&["ENSG001", "12.5", "1.3"]), 2).unwrap();
        assert_eq!(decoded, None);
    }

    #[test]
    fn gene_row_nonpositive_base_mean_is_skipped() {
        for base_mean in ["-3.0", "0", "0.0"] {
            let decoded = GeneExpressionRow::decode(
                &fields(&["ENSG002", base_mean, "1.3", "x", "x", "0.01", "0.04"]),
                2,
            )
            .unwrap();
            assert_eq!(decoded, None);
        }
    }

    #[test]
    fn gene_row_bad_numeric_is_fatal() {
        let err = GeneExpressionRow::decode(
            &fields(&["ENSG001", "12.5", "not-a-number", "x", "x", "0.01", "0.04"]),
            4,
        )
        .unwrap_err();
        assert_matches!(
            err,
            LoaderError::NumberFormat {
                line: 4,
                column: "log2FC",
                ..
            }
        );
    }

    #[test]
    fn gene_row_filtered_before_other_columns_parse() {
        // A non-admissible row must not surface errors from columns that are
        // never reached.
        let decoded = GeneExpressionRow::decode(
            &fields(&["ENSG003", "0", "garbage", "x", "x", "garbage", "garbage"]),
            2,
        )
        .unwrap();
        assert_eq!(decoded, None);
    }

    #[test]
    fn mirna_row_requires_mimat_marker() {
        let admitted = MirnaExpressionRow::decode(&fields(&[
            "MIMAT0000062",
            "1.2",
            "0.03",
            "x",
            "0.05",
            "0.8",
            "up",
        ]));
        assert!(admitted.is_some());

        let rejected = MirnaExpressionRow::decode(&fields(&[
            "ENSG0001", "1.2", "0.03", "x", "0.05", "0.8", "up",
        ]));
        assert_eq!(rejected, None);
    }

    #[test]
    fn mirna_row_copies_value_columns_verbatim() {
        let row = MirnaExpressionRow::decode(&fields(&[
            "hsa-MIMAT0000062",
            "1.2",
            "NA",
            "ignored",
            "0.05",
            "0.8",
            "down",
        ]))
        .unwrap();
        assert_eq!(row.log2_fc, "1.2");
        assert_eq!(row.p_value, "NA");
        assert_eq!(row.adjp_value, "0.05");
        assert_eq!(row.tgw_dispersion, "0.8");
        assert_eq!(row.up_down, "down");
    }

    #[test]
    fn mirbase_row_decodes_both_strands() {
        let row = MirbaseRow::decode(
            &fields(&[
                "MI0000060",
                "hsa-mir-1-1",
                "x",
                "UGGAAUGU",
                "MIMAT0000416",
                "hsa-miR-1-5p",
                "ACAUUCCA",
                "MIMAT0031892",
                "hsa-miR-1-3p",
                "UGGAAUGUAAAGAAGUAUGUAU",
            ]),
            2,
        )
        .unwrap();
        assert_eq!(row.primary_identifier, "hsa-mir-1-1");
        assert_eq!(row.primary_sequence, "UGGAAUGU");
        assert!(row.five_prime.is_present());
        assert_eq!(row.five_prime.identifier, "hsa-miR-1-5p");
        assert!(row.three_prime.is_present());
        assert_eq!(row.three_prime.accession, "MIMAT0031892");
    }

    #[test]
    fn mirbase_short_row_is_fatal() {
        let err = MirbaseRow::decode(&fields(&["MI0000060", "hsa-mir-1-1"]), 3).unwrap_err();
        assert_matches!(err, LoaderError::Parse { line: 3, .. });
    }

    #[test]
    fn empty_strand_is_absent() {
        let strand = StrandColumns {
            accession: String::new(),
            identifier: String::new(),
            sequence: String::new(),
        };
        assert!(!strand.is_present());
    }
}
