use sigfeat::engine::RecordEngine;
use sigfeat::features::{GenericFeature, IpFeature};
use sigfeat::models::Feature;
use std::fs;
use tempfile::tempdir;

fn records() -> Vec<Vec<String>> {
    let features: Vec<Feature> = vec![
        GenericFeature::new("sport", 1, 100, 0, vec![]).into(),
        IpFeature::new("dst", 4, 0).into(),
    ];
    RecordEngine::with_seed(features, 5).records(3)
}

#[test]
fn reporting_exports_create_files() {
    let dir = tempdir().expect("Should create temp dir");
    let records = records();

    let txt_filename = sigfeat::reporting::export_records(dir.path(), &records, "; ")
        .expect("Text export should succeed");
    let md_filename = sigfeat::reporting::export_markdown(dir.path(), &records)
        .expect("Markdown export should succeed");

    assert!(fs::metadata(&txt_filename).is_ok(), "Text file should exist: {}", txt_filename);
    assert!(fs::metadata(&md_filename).is_ok(), "Markdown file should exist: {}", md_filename);

    assert!(txt_filename.contains("sigfeat_records_"));
    assert!(txt_filename.ends_with(".txt"));
    assert!(md_filename.ends_with(".md"));

    let text = fs::read_to_string(&txt_filename).expect("Should read text report");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    for line in lines {
        let tokens: Vec<&str> = line.split("; ").collect();
        assert_eq!(tokens.len(), 2);
        assert!(tokens[0].starts_with("sport="));
        assert!(tokens[1].starts_with("dst="));
    }

    let markdown = fs::read_to_string(&md_filename).expect("Should read markdown report");
    assert!(markdown.starts_with("# sigfeat Records"));
    assert!(markdown.contains("| 3 |"));
}
