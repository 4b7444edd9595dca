// pipeline.rs - End-to-end checks of the features -> scores -> mask pipeline

use alifilter::data::loaders::phylip::parse_phylip;
use alifilter::prelude::*;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

fn sample_alignment() -> Alignment {
    Alignment::from_rows(&[
        "ATG-CCA-TTGA",
        "ATGACC--TTGA",
        "ACG-CCAGTT-A",
        "ATGNCC-GTTGA",
        "A-G-CTAGT-GA",
    ])
    .unwrap()
}

fn gap_model() -> Model {
    Model::new(0.5, [-6.0, 2.0, 0.01, -0.5, -1.0, -1.0], 1.5)
}

#[test]
fn test_single_identical_column() {
    let alignment = Alignment::from_rows(&["A", "A"]).unwrap();
    let model = Model::default();

    let features = extract_features(&alignment).unwrap();
    assert_eq!(features.column(0), &[0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);

    let scores = score(&model, &features).unwrap();
    assert_eq!(scores, vec![0.5]);

    let mask = mask_from_scores(&model, &scores).unwrap();
    assert_eq!(mask.to_string(), "1");
}

#[test]
fn test_all_gap_alignment() {
    let alignment = Alignment::from_rows(&["--", "--"]).unwrap();
    let model = Model::default();

    let features = extract_features(&alignment).unwrap();
    for column in features.columns() {
        assert_eq!(column[Feature::Gaps as usize], 1.0);
        assert_eq!(column[Feature::Identity as usize], 0.0);
        assert_eq!(column[Feature::Entropy as usize], 0.0);
    }

    let mask = mask_from_alignment(&model, &alignment).unwrap();
    assert_eq!(mask.to_string(), "11");
}

#[test]
fn test_compositions_agree() {
    let alignment = sample_alignment();
    let model = gap_model();

    let features = extract_features(&alignment).unwrap();
    let scores = score(&model, &features).unwrap();

    let staged = mask_from_scores(&model, &scores).unwrap();
    let from_features = mask_from_features(&model, &features).unwrap();
    let direct = mask_from_alignment(&model, &alignment).unwrap();

    assert_eq!(staged, from_features);
    assert_eq!(staged, direct);
    assert_eq!(staged.len(), 12);
}

#[test]
fn test_repeated_runs_are_identical() {
    let alignment = sample_alignment();
    let model = gap_model();

    let first = extract_features(&alignment).unwrap();
    let second = extract_features(&alignment).unwrap();
    let first_bits: Vec<u64> = first.as_slice().iter().map(|v| v.to_bits()).collect();
    let second_bits: Vec<u64> = second.as_slice().iter().map(|v| v.to_bits()).collect();
    assert_eq!(first_bits, second_bits);

    let scores_a = score(&model, &first).unwrap();
    let scores_b = score(&model, &second).unwrap();
    assert!(scores_a.iter().zip(&scores_b).all(|(a, b)| a.to_bits() == b.to_bits()));

    assert_eq!(
        mask_from_scores(&model, &scores_a).unwrap(),
        mask_from_scores(&model, &scores_b).unwrap()
    );
    assert_eq!(
        mask_from_features(&model, &first).unwrap(),
        mask_from_features(&model, &second).unwrap()
    );
    assert_eq!(
        mask_from_alignment(&model, &alignment).unwrap(),
        mask_from_alignment(&model, &alignment).unwrap()
    );
}

#[test]
fn test_flat_and_owned_storage_agree() {
    let alignment = sample_alignment();
    let buffer = alignment.to_flat();
    let flat = FlatAlignment::new(&buffer, alignment.len(), 12).unwrap();

    let owned = extract_features(&alignment).unwrap();
    let borrowed = extract_features(&flat).unwrap();
    assert_eq!(owned, borrowed);

    let model = gap_model();
    assert_eq!(
        mask_from_alignment(&model, &alignment).unwrap(),
        mask_from_alignment(&model, &flat).unwrap()
    );
}

#[test]
fn test_window_clipped_at_alignment_start() {
    let alignment = Alignment::from_rows(&["-AAA", "AAAA"]).unwrap();
    let features = extract_features(&alignment).unwrap();

    // Columns 0, 1 and 2 are inside the +-2 window of column 0
    assert!(approx_eq(features.get(0, Feature::GapsWindow2), 0.5 / 3.0));
    assert!(approx_eq(features.get(0, Feature::GapsWindow1), 0.5 / 2.0));
    assert!(approx_eq(features.get(3, Feature::GapsWindow2), 0.0));
}

#[test]
fn test_phylip_to_filtered_alignment() {
    let content = "3 4\nalpha AC-G\nbeta  ACTG\ngamma A--G\n";
    let alignment = parse_phylip(content).unwrap();

    // Heavy gap penalty: only gap-free columns survive
    let model = Model::new(0.5, [-20.0, 0.0, 0.0, 0.0, 0.0, 0.0], 10.0);
    let mask = mask_from_alignment(&model, &alignment).unwrap();
    assert_eq!(mask.to_string(), "1101");

    let filtered = alignment.filter_columns(&mask).unwrap();
    assert_eq!(filtered.names, vec!["alpha", "beta", "gamma"]);
    assert_eq!(
        filtered.sequences,
        vec![b"ACG".to_vec(), b"ACG".to_vec(), b"A-G".to_vec()]
    );
}

#[test]
fn test_threshold_override_changes_only_the_mask() {
    let alignment = sample_alignment();
    let model = gap_model();
    let features = extract_features(&alignment).unwrap();
    let scores = score(&model, &features).unwrap();

    let keep_all = mask_from_scores(&model.with_threshold(0.0), &scores).unwrap();
    assert_eq!(keep_all.kept(), 12);

    let strict = mask_from_scores(&model.with_threshold(1.0), &scores).unwrap();
    assert!(strict.kept() <= mask_from_scores(&model, &scores).unwrap().kept());
    assert_eq!(score(&model.with_threshold(1.0), &features).unwrap(), scores);
}
