use camino::Utf8PathBuf;

use diffexpr_loader::record::Record;
use diffexpr_loader::run::run_mirna_expression;
use diffexpr_loader::sink::MemorySink;

fn utf8(path: &std::path::Path) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(path.to_path_buf()).unwrap()
}

const HEADER: &str = "accession\tlog2FC\tpvalue\tstat\tpadj\ttgwDisp\tupDown\n";

#[test]
fn mature_cache_spans_all_files_of_the_run() {
    let temp = tempfile::tempdir().unwrap();
    let data_dir = temp.path().join("data");
    std::fs::create_dir(&data_dir).unwrap();

    std::fs::write(
        data_dir.join("comparison1.txt"),
        format!(
            "{HEADER}MIMAT0000062\t1.2\t0.03\tx\t0.05\t0.8\tup\nENSG0001\t0.1\t0.9\tx\t0.95\t0.2\tdown\n"
        ),
    )
    .unwrap();
    std::fs::write(
        data_dir.join("comparison2.txt"),
        format!("{HEADER}MIMAT0000062\t-0.4\t0.2\tx\t0.3\t0.7\tdown\n"),
    )
    .unwrap();
    let mapping = temp.path().join("conditions.properties");
    std::fs::write(
        &mapping,
        "comparison1.txt=onset vs control\ncomparison2.txt=relapse vs control\n",
    )
    .unwrap();

    let mut sink = MemorySink::new();
    let summary =
        run_mirna_expression(&utf8(&data_dir), &utf8(&mapping), "9606", &mut sink).unwrap();

    assert_eq!(summary.files, 2);
    assert_eq!(summary.records, 2);

    let organisms = sink.of_kind("organism");
    assert_eq!(organisms.len(), 1);

    // one shared mature transcript for the accession seen in both files
    let matures: Vec<_> = sink
        .records()
        .iter()
        .filter_map(|(id, record)| match record {
            Record::MatureMirna(mature) => Some((*id, mature)),
            _ => None,
        })
        .collect();
    assert_eq!(matures.len(), 1);
    let (mature_id, mature) = matures[0];
    assert_eq!(mature.secondary_identifier, "MIMAT0000062");
    assert_eq!(mature.primary_identifier, None);
    assert_eq!(mature.sequence, None);
    assert_eq!(mature.primary_transcript, None);

    let expressions: Vec<_> = sink
        .records()
        .iter()
        .filter_map(|(_, record)| match record {
            Record::MirnaDiffExpression(expression) => Some(expression),
            _ => None,
        })
        .collect();
    assert_eq!(expressions.len(), 2);
    for expression in &expressions {
        assert_eq!(expression.mature_mirna, mature_id);
    }
    assert_eq!(expressions[0].condition.as_deref(), Some("onset vs control"));
    assert_eq!(
        expressions[1].condition.as_deref(),
        Some("relapse vs control")
    );
    assert_eq!(expressions[0].up_down, "up");
    assert_eq!(expressions[1].log2_fc, "-0.4");
}

#[test]
fn non_numeric_value_columns_pass_through() {
    let temp = tempfile::tempdir().unwrap();
    let data_dir = temp.path().join("data");
    std::fs::create_dir(&data_dir).unwrap();
    std::fs::write(
        data_dir.join("comparison.txt"),
        format!("{HEADER}MIMAT0000063\tNA\tNA\tx\tNA\t0.8\tup\n"),
    )
    .unwrap();
    let mapping = temp.path().join("conditions.properties");
    std::fs::write(&mapping, "").unwrap();

    let mut sink = MemorySink::new();
    let summary =
        run_mirna_expression(&utf8(&data_dir), &utf8(&mapping), "9606", &mut sink).unwrap();
    assert_eq!(summary.records, 1);

    let expression = match sink.of_kind("mirna_diff_expression")[0] {
        Record::MirnaDiffExpression(expression) => expression,
        other => panic!("unexpected record {other:?}"),
    };
    assert_eq!(expression.log2_fc, "NA");
    assert_eq!(expression.p_value, "NA");
    assert_eq!(expression.adjp_value, "NA");
}
