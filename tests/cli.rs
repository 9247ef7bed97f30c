use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Run the built binary with a clean output-dir environment
fn run(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sportswatch"))
        .args(args)
        .current_dir(cwd)
        .env_remove("SPORTSWATCH_OUT_DIR")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute sportswatch")
}

#[test]
fn times_prints_one_line_per_event() {
    let tmp = tempfile::tempdir().unwrap();
    let schedule = fixture("schedule.html");
    let output = run(&["times", schedule.to_str().unwrap()], tmp.path());

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "bar start-10 end-20\n\
         bar t-1130 09:00\n\
         14:00-16:30 BRT\n\
         bar t-2100 \n"
    );
}

#[test]
fn times_with_unmatched_class_prints_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let schedule = fixture("schedule.html");
    let output = run(
        &["times", schedule.to_str().unwrap(), "--time-class", "no-such-class"],
        tmp.path(),
    );

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn times_missing_document_fails_without_output() {
    let tmp = tempfile::tempdir().unwrap();
    let output = run(&["times", "missing.html"], tmp.path());

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read document"));
}

#[test]
fn aggregate_writes_named_results_and_summaries() {
    let tmp = tempfile::tempdir().unwrap();
    let out_dir = tmp.path().join("results");
    let posts = fixture("posts.jsonl");
    let config = fixture("sportswatch.yml");

    let output = run(
        &[
            "aggregate",
            "--records",
            posts.to_str().unwrap(),
            "--out",
            out_dir.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
        ],
        tmp.path(),
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    insta::assert_snapshot!(stdout.trim_end(), @r###"
    tags.all (3 keys, 5 total)
      judo: 2
      rio2016: 2
      tennis: 1
    tags.judo (2 keys, 3 total)
      judo: 2
      rio2016: 1
    tags.tennis (2 keys, 2 total)
      rio2016: 1
      tennis: 1
    "###);

    let mut names: Vec<String> = fs::read_dir(&out_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["tags.all.json", "tags.judo.json", "tags.tennis.json"]);

    let judo = fs::read_to_string(out_dir.join("tags.judo.json")).unwrap();
    assert_eq!(judo, "{\n  \"judo\": 2,\n  \"rio2016\": 1\n}\n");
}

#[test]
fn aggregate_default_keywords_and_env_output_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let posts = fixture("posts.jsonl");

    let output = Command::new(env!("CARGO_BIN_EXE_sportswatch"))
        .args(["aggregate", "--records", posts.to_str().unwrap(), "--kind", "langs"])
        .current_dir(tmp.path())
        .env("SPORTSWATCH_OUT_DIR", tmp.path().join("env-out"))
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(output.status.success());

    for label in ["all", "gymnastics", "tennis", "archery", "judo", "fencing"] {
        let path = tmp.path().join("env-out").join(format!("langs.{}.json", label));
        assert!(path.exists(), "missing {}", path.display());
    }
    assert_eq!(
        fs::read_to_string(tmp.path().join("env-out").join("langs.archery.json")).unwrap(),
        "{}\n"
    );
}

#[test]
fn aggregate_bad_records_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let bad = tmp.path().join("bad.jsonl");
    fs::write(&bad, "{\"text\": \"ok\"}\n{broken\n").unwrap();

    let output = run(
        &["aggregate", "--records", bad.to_str().unwrap()],
        tmp.path(),
    );
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(!tmp.path().join("output").exists());
}
