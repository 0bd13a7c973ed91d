use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_wordshuffle"))
}

fn run_shuffle(mode: &str, input: &Path, output: &Path, extra: &[&str]) -> Output {
    Command::new(get_binary_path())
        .arg(mode)
        .arg(input)
        .arg(output)
        .args(extra)
        .output()
        .expect("Failed to execute wordshuffle")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "Command failed with status: {:?}\nstderr: {}\nstdout: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr),
        String::from_utf8_lossy(&output.stdout)
    );
}

#[test]
fn test_decrypt_roundtrip_apple() {
    let dir = TempDir::new().unwrap();
    let plain = dir.path().join("plain.txt");
    let shuffled = dir.path().join("shuffled.txt");
    let restored = dir.path().join("restored.txt");
    fs::write(&plain, "apple\n").unwrap();

    assert_success(&run_shuffle("encrypt", &plain, &shuffled, &[]));
    assert_success(&run_shuffle("decrypt", &shuffled, &restored, &[]));

    assert_eq!(fs::read_to_string(&restored).unwrap(), "apple\n");
}

#[test]
fn test_decrypt_roundtrip_many_words() {
    let dir = TempDir::new().unwrap();
    let plain = dir.path().join("plain.txt");
    let shuffled = dir.path().join("shuffled.txt");
    let restored = dir.path().join("restored.txt");
    let text = "alpha\n\nbravo\ncharlie\ndélta\nécho\nfoxtrot\ngolf\nhotel\nindia\njuliett\n";
    fs::write(&plain, text).unwrap();

    assert_success(&run_shuffle("encrypt", &plain, &shuffled, &["-j", "3"]));
    assert_success(&run_shuffle("decrypt", &shuffled, &restored, &["-j", "5"]));

    assert_eq!(fs::read_to_string(&restored).unwrap(), text);
}

#[test]
fn test_decrypt_known_record() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("shuffled.txt");
    let output = dir.path().join("restored.txt");
    fs::write(&input, "ealpp\n4 0 3 1 2 \r\nik\n1 0\n").unwrap();

    assert_success(&run_shuffle("decrypt", &input, &output, &[]));

    assert_eq!(fs::read_to_string(&output).unwrap(), "apple\nki\n");
}

#[test]
fn test_decrypt_short_permutation() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("shuffled.txt");
    let output = dir.path().join("restored.txt");
    fs::write(&input, "ik\n1 0\nealpp\n4 0 3\n").unwrap();

    let result = run_shuffle("decrypt", &input, &output, &[]);

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(
        stderr.contains("malformed permutation for record 2"),
        "stderr: {}",
        stderr
    );
    assert!(!output.exists(), "No output file should be created");
}

#[test]
fn test_decrypt_duplicate_index() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("shuffled.txt");
    let output = dir.path().join("restored.txt");
    fs::write(&input, "abc\n0 1 1\n").unwrap();

    let result = run_shuffle("decrypt", &input, &output, &[]);

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("appears more than once"));
    assert!(!output.exists());
}

#[test]
fn test_decrypt_missing_permutation_line() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("shuffled.txt");
    let output = dir.path().join("restored.txt");
    fs::write(&input, "ealpp\n4 0 3 1 2\nik\n").unwrap();

    let result = run_shuffle("decrypt", &input, &output, &[]);

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("missing its permutation line"), "stderr: {}", stderr);
    assert!(!output.exists());
}

#[test]
fn test_decrypt_empty_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.txt");
    let output = dir.path().join("restored.txt");
    fs::write(&input, "").unwrap();

    let result = run_shuffle("decrypt", &input, &output, &[]);

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("no words"));
    assert!(!output.exists());
}

#[test]
fn test_failed_run_keeps_previous_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("shuffled.txt");
    let output = dir.path().join("restored.txt");
    fs::write(&input, "abc\n0 1\n").unwrap();
    fs::write(&output, "previous\n").unwrap();

    let result = run_shuffle("decrypt", &input, &output, &[]);

    assert!(!result.status.success());
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous\n");
}
