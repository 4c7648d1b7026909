use assert_cmd::Command;
use predicates::prelude::*;

fn reelx() -> Command {
    let mut cmd = Command::cargo_bin("reelx").unwrap();
    for key in ["REELX_FFMPEG", "REELX_FFPROBE", "REELX_FONT", "REELX_PRESET", "REELX_CRF"] {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn test_help_lists_commands() {
    reelx()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("split"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("probe"));
}

#[test]
fn test_zero_segment_duration_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output_dir = dir.path().join("reels");

    reelx()
        .args(["split", "--input", "movie.mp4", "--title", "Movie"])
        .arg("--output-dir")
        .arg(&output_dir)
        .args(["--segment-duration", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));

    // Rejected before the output directory was created
    assert!(!output_dir.exists());
}

#[test]
fn test_empty_title_is_rejected() {
    let dir = tempfile::tempdir().unwrap();

    reelx()
        .args(["split", "--input", "movie.mp4", "--title", ""])
        .arg("--output-dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("all required"));
}

#[test]
fn test_missing_required_argument() {
    reelx()
        .args(["split", "--input", "movie.mp4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output-dir"));
}

#[test]
fn test_probe_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    reelx()
        .arg("probe")
        .arg("--input")
        .arg(dir.path().join("absent.mp4"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_bad_env_crf_is_rejected() {
    reelx()
        .env("REELX_CRF", "high")
        .args(["probe", "--input", "movie.mp4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("REELX_CRF"));
}
