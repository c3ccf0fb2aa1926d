use assert_cmd::Command;

#[test]
fn outputs_tool_name() {
    let mut cmd = Command::cargo_bin("yolo-viewer").unwrap();
    cmd.arg("-V");
    cmd.assert()
        .success()
        .stdout(concat!("yolo-viewer ", env!("CARGO_PKG_VERSION"), "\n"));
}

#[test]
fn help_mentions_dataset_flag() {
    let mut cmd = Command::cargo_bin("yolo-viewer").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("--dataset-dir"))
        .stdout(predicates::str::contains("DATASET_DIR"));
}

#[test]
fn missing_dataset_is_fatal() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let mut cmd = Command::cargo_bin("yolo-viewer").unwrap();
    cmd.arg("--dataset-dir").arg(temp.path().join("nowhere"));
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("was not found"));
}

#[test]
fn dataset_dir_env_is_honoured() {
    let temp = tempfile::tempdir().expect("create temp dir");
    std::fs::create_dir_all(temp.path().join("labels")).expect("create labels dir");

    let mut cmd = Command::cargo_bin("yolo-viewer").unwrap();
    cmd.env("DATASET_DIR", temp.path());
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Images directory"));
}

#[test]
fn legacy_env_is_used_as_fallback() {
    let temp = tempfile::tempdir().expect("create temp dir");
    std::fs::create_dir_all(temp.path().join("images")).expect("create images dir");

    let mut cmd = Command::cargo_bin("yolo-viewer").unwrap();
    cmd.env_remove("DATASET_DIR");
    cmd.env("YOLO_DATASET_DIR", temp.path());
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Labels directory"));
}
