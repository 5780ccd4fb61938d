use std::cell::RefCell;
use std::fs;
use std::path::Path;

use speaker_words::plot::{Chart, Publisher, Visibility};
use speaker_words::{plot, preprocess, Config, Error};

const LINES: &str = "\
id,season,episode,scene,line_text,speaker,deleted
1,1,1,1,\"All right Jim. Your quarterlies look very good. How are things at the library?\",Michael,FALSE
2,1,1,1,\"Oh, I told you. I couldn't close it. So...\",Jim,FALSE
3,1,1,2,[on the phone] Yes. (pause) Yes!,Dwight,FALSE
4,2,1,1,,Pam,FALSE
5,2,3,4,I have 3 cats!,Michael,FALSE
6,2,3,4,\"Hello [whispers] world (aside)\",Michael,FALSE
";

fn workspace(lines: &str) -> (tempfile::TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data/the_office_lines.csv"), lines).unwrap();
    let config = Config::from_root(dir.path());
    (dir, config)
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn preprocess_writes_both_aggregates() {
    let (_dir, config) = workspace(LINES);
    let summary = preprocess(&config).unwrap();

    assert_eq!(summary.lines, 6);
    assert_eq!(summary.speakers, 4);
    assert_eq!(summary.speaker_seasons, 5);
    // michael: 14 + 3 + 2, jim: 9, dwight: 2, pam: 0
    assert_eq!(summary.words, 30);

    assert_eq!(
        read(&config.preprocess_output_path),
        "speaker,season,word_count\nDwight,1,2\nJim,1,9\nMichael,1,14\nMichael,2,5\nPam,2,0\n"
    );
    assert_eq!(
        read(&config.speaker_output_path),
        "speaker,word_count\nDwight,2\nJim,9\nMichael,19\nPam,0\n"
    );
}

#[test]
fn preprocess_is_idempotent() {
    let (_dir, config) = workspace(LINES);
    preprocess(&config).unwrap();
    let first = (
        fs::read(&config.preprocess_output_path).unwrap(),
        fs::read(&config.speaker_output_path).unwrap(),
    );
    preprocess(&config).unwrap();
    let second = (
        fs::read(&config.preprocess_output_path).unwrap(),
        fs::read(&config.speaker_output_path).unwrap(),
    );
    assert_eq!(first, second);
}

#[test]
fn plot_reads_persisted_aggregate() {
    let (_dir, config) = workspace(LINES);
    preprocess(&config).unwrap();

    let summary = plot(&config, None).unwrap();
    assert_eq!(summary.series, 24);
    // Michael, Dwight, Jim have rows; Pam has a zero-count row
    assert_eq!(summary.empty_series, 20);
    assert_eq!(summary.published_url, None);

    let html = read(&config.chart_output_path);
    assert!(html.contains("Todd Packer"));
    assert!(!html.contains("<script src="));
}

#[test]
fn plot_runs_alone_from_an_existing_file() {
    let (dir, config) = workspace("");
    fs::create_dir_all(dir.path().join("output")).unwrap();
    fs::write(
        &config.preprocess_output_path,
        "speaker,season,word_count\nAndy,3,40\nAndy,4,60\n",
    )
    .unwrap();

    let publisher = RecordingPublisher::default();
    plot(&config, Some(&publisher)).unwrap();
    assert!(config.chart_output_path.exists());

    let figure: serde_json::Value = serde_json::from_str(&publisher.figure.borrow()).unwrap();
    let andy = &figure["data"][4];
    assert_eq!(andy["name"], "Andy");
    assert_eq!(andy["x"], serde_json::json!(["3", "4"]));
    assert_eq!(andy["y"], serde_json::json!([40, 60]));
    assert_eq!(andy["fill"], "tozeroy");
}

#[test]
fn plot_without_aggregate_fails() {
    let (_dir, config) = workspace(LINES);
    assert!(matches!(plot(&config, None), Err(Error::Csv { .. })));
}

#[test]
fn missing_input_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::from_root(dir.path());
    assert!(preprocess(&config).is_err());
    assert!(!config.preprocess_output_path.exists());
}

#[test]
fn missing_column_fails() {
    let (_dir, config) = workspace("season,speaker\n1,Jim\n");
    match preprocess(&config) {
        Err(Error::MissingColumn { column, .. }) => assert_eq!(column, "line_text"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[derive(Default)]
struct RecordingPublisher {
    seen: RefCell<Vec<Visibility>>,
    figure: RefCell<String>,
}

impl Publisher for RecordingPublisher {
    fn publish(&self, chart: &Chart) -> speaker_words::Result<String> {
        self.seen
            .borrow_mut()
            .extend(chart.data.iter().map(|s| s.visible));
        *self.figure.borrow_mut() = chart.figure_json()?;
        Ok("https://charts.example/office".to_string())
    }
}

#[test]
fn publisher_receives_the_chart() {
    let (_dir, mut config) = workspace(LINES);
    config.default_visible_count = 2;
    preprocess(&config).unwrap();

    let publisher = RecordingPublisher::default();
    let summary = plot(&config, Some(&publisher)).unwrap();

    assert_eq!(
        summary.published_url.as_deref(),
        Some("https://charts.example/office")
    );
    let seen = publisher.seen.borrow();
    assert_eq!(seen.len(), 24);
    assert_eq!(
        seen.iter().filter(|v| **v == Visibility::Visible).count(),
        2
    );
}
