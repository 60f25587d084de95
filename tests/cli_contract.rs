use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("name_pair_extract"));
    cmd.env_remove("NAME_PAIRS_PROXY")
        .env_remove("NAME_PAIRS_TIMEOUT_SECS")
        .env("NAME_PAIRS_LOG", "warn");
    cmd
}

#[test]
fn extract_stdin_prints_text_export() {
    cli()
        .args(["extract", "-"])
        .write_stdin("“萧漾” = “Tiêu Dạng”")
        .assert()
        .success()
        .stdout("萧漾 = Tiêu Dạng\n");
}

#[test]
fn extract_keeps_overlapping_matches_in_pass_order() {
    cli()
        .args(["extract"])
        .write_stdin("沈宜嘉=Thẩm Nghi Gia")
        .assert()
        .success()
        .stdout("沈宜嘉 = Thẩm Nghi Gia\n沈 = 宜嘉\n");
}

#[test]
fn dedup_is_opt_in() {
    let text = "安康王 An Khang Vương.\n安康王 An Khang Vương.";
    let plain = cli()
        .args(["extract", "-", "--format", "json"])
        .write_stdin(text)
        .output()
        .expect("run extract");
    let deduped = cli()
        .args(["extract", "-", "--format", "json", "--dedup"])
        .write_stdin(text)
        .output()
        .expect("run extract --dedup");
    assert!(plain.status.success() && deduped.status.success());

    let all: serde_json::Value = serde_json::from_slice(&plain.stdout).unwrap();
    let unique: serde_json::Value = serde_json::from_slice(&deduped.stdout).unwrap();
    assert_eq!(all.as_array().unwrap().len(), 2);
    assert_eq!(unique.as_array().unwrap().len(), 1);
    assert_eq!(unique[0]["han"], "安康王");
}

#[test]
fn extract_directory_saves_csv() {
    let dir = tempfile::tempdir().unwrap();
    let pages = dir.path().join("pages");
    fs::create_dir(&pages).unwrap();
    fs::write(
        pages.join("01.html"),
        "<html><head><title>萧漾 Tiêu</title></head><body><p>“萧漾” = “Tiêu Dạng”</p></body></html>",
    )
    .unwrap();
    fs::write(pages.join("02.txt"), "安康王 An Khang, Vương").unwrap();

    cli()
        .current_dir(dir.path())
        .args(["extract", "pages", "--format", "csv", "--save"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Hán,Tên dịch\n萧漾,Tiêu Dạng\n"));

    let saved = fs::read_to_string(dir.path().join("output/ten-nhan-vat.csv")).unwrap();
    // The adjacent rule stops at the comma; no quoting is applied either way.
    assert_eq!(saved, "Hán,Tên dịch\n萧漾,Tiêu Dạng\n安康王,An Khang");
}

#[test]
fn extract_html_flag_strips_stdin_markup() {
    cli()
        .args(["extract", "--html"])
        .write_stdin("<body><i>安康王</i> An Khang Vương<script></script></body>")
        .assert()
        .success()
        .stdout("安康王 = An Khang Vương\n");
}

#[test]
fn zero_matches_is_a_quiet_success() {
    cli()
        .args(["extract"])
        .write_stdin("không có chữ Hán nào ở đây")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn missing_path_fails() {
    cli()
        .args(["extract", "/definitely/not/here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn edit_rewrites_one_name_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("ten-nhan-vat.json");
    fs::write(
        &file,
        r#"[{"han":"沈宜嘉","name":"Thẩm Nghi Gia"},{"han":"沈","name":"宜嘉"}]"#,
    )
    .unwrap();

    cli()
        .arg("edit")
        .arg(&file)
        .args(["1", "Thẩm", "--format", "txt"])
        .assert()
        .success()
        .stdout("沈宜嘉 = Thẩm Nghi Gia\n沈 = Thẩm\n");

    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 2);
    assert_eq!(v[0]["name"], "Thẩm Nghi Gia");
    assert_eq!(v[1]["han"], "沈");
    assert_eq!(v[1]["name"], "Thẩm");
}

#[test]
fn edit_out_of_range_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("pairs.json");
    let original = r#"[{"han":"萧漾","name":"Tiêu Dạng"}]"#;
    fs::write(&file, original).unwrap();

    cli()
        .arg("edit")
        .arg(&file)
        .args(["5", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
    assert_eq!(fs::read_to_string(&file).unwrap(), original);
}

#[test]
fn fetch_rejects_url_without_scheme() {
    cli()
        .args(["fetch", "truyenfull.vn/abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Không thể lấy nội dung từ URL này."));
}

#[test]
fn unknown_format_is_a_usage_error() {
    cli()
        .args(["extract", "--format", "xml"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}
