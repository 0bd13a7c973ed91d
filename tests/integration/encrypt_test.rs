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

fn sorted_chars(s: &str) -> Vec<char> {
    let mut chars: Vec<char> = s.chars().collect();
    chars.sort_unstable();
    chars
}

fn parse_indices(line: &str) -> Vec<usize> {
    line.split_whitespace()
        .map(|t| t.parse().expect("permutation entry should be an integer"))
        .collect()
}

#[test]
fn test_encrypt_single_word() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("words.txt");
    let output = dir.path().join("shuffled.txt");
    fs::write(&input, "apple\n").unwrap();

    let result = run_shuffle("encrypt", &input, &output, &[]);
    assert_success(&result);

    let text = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2, "Expected word and permutation lines: {:?}", lines);

    assert_eq!(lines[0].chars().count(), 5);
    assert_eq!(sorted_chars(lines[0]), sorted_chars("apple"));

    let mut indices = parse_indices(lines[1]);
    indices.sort_unstable();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    assert!(lines[1].ends_with(' '), "Permutation line keeps its trailing space");
}

#[test]
fn test_encrypt_empty_line() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("words.txt");
    let output = dir.path().join("shuffled.txt");
    fs::write(&input, "ab\n\ncd\n").unwrap();

    let result = run_shuffle("encrypt", &input, &output, &[]);
    assert_success(&result);

    let text = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.split('\n').collect();
    // three records, two lines each, plus the empty string after the final newline
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[2], "");
    assert_eq!(lines[3], "");
}

#[test]
fn test_encrypt_preserves_order() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("words.txt");
    let output = dir.path().join("shuffled.txt");
    let words: Vec<String> = (0..97).map(|i| format!("w{:03}xyz", i)).collect();
    fs::write(&input, words.join("\n")).unwrap();

    let result = run_shuffle("encrypt", &input, &output, &["-j", "6"]);
    assert_success(&result);

    let text = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), words.len() * 2);

    for (record, word) in lines.chunks(2).zip(&words) {
        assert_eq!(sorted_chars(record[0]), sorted_chars(word));
        let indices = parse_indices(record[1]);
        let chars: Vec<char> = word.chars().collect();
        let rebuilt: String = indices.iter().map(|&i| chars[i]).collect();
        assert_eq!(rebuilt, record[0]);
    }
}

#[test]
fn test_encrypt_seed_is_reproducible() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("words.txt");
    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");
    let third = dir.path().join("third.txt");
    fs::write(&input, "reproducible\npermutations\n").unwrap();

    assert_success(&run_shuffle("encrypt", &input, &first, &["--seed", "42"]));
    assert_success(&run_shuffle("encrypt", &input, &second, &["--seed", "42"]));
    assert_success(&run_shuffle("encrypt", &input, &third, &["--seed", "43"]));

    let first = fs::read_to_string(first).unwrap();
    assert_eq!(first, fs::read_to_string(second).unwrap());
    assert_ne!(first, fs::read_to_string(third).unwrap());
}

#[test]
fn test_encrypt_empty_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("empty.txt");
    let output = dir.path().join("shuffled.txt");
    fs::write(&input, "").unwrap();

    let result = run_shuffle("encrypt", &input, &output, &[]);

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("no words"), "stderr: {}", stderr);
    assert!(!output.exists(), "No output file should be created");
}

#[test]
fn test_encrypt_missing_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("absent.txt");
    let output = dir.path().join("shuffled.txt");

    let result = run_shuffle("encrypt", &input, &output, &[]);

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("failed to load"));
    assert!(!output.exists());
}

#[test]
fn test_zero_workers_rejected() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("words.txt");
    let output = dir.path().join("shuffled.txt");
    fs::write(&input, "apple\n").unwrap();

    let result = run_shuffle("encrypt", &input, &output, &["--workers", "0"]);

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("configuration error"));
    assert!(!output.exists());
}

#[test]
fn test_bad_mode_rejected() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("words.txt");
    let output = dir.path().join("shuffled.txt");
    fs::write(&input, "apple\n").unwrap();

    let result = run_shuffle("scramble", &input, &output, &[]);

    assert!(!result.status.success());
    assert!(!output.exists());
}

#[test]
fn test_log_level_is_validated() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("words.txt");
    let output = dir.path().join("shuffled.txt");
    fs::write(&input, "apple\n").unwrap();

    let result = run_shuffle("encrypt", &input, &output, &["--log-level", "loud"]);
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("--log-level"));
    assert!(!output.exists());

    assert_success(&run_shuffle("encrypt", &input, &output, &["--log-level", "debug"]));
    assert!(output.exists());
}

#[test]
fn test_missing_arguments_rejected() {
    let result = Command::new(get_binary_path())
        .arg("encrypt")
        .output()
        .expect("Failed to execute wordshuffle");

    assert!(!result.status.success());
}

#[test]
fn test_verbose_prints_statistics() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("words.txt");
    let output = dir.path().join("shuffled.txt");
    fs::write(&input, "one\ntwo\nthree\n").unwrap();

    let result = run_shuffle("encrypt", &input, &output, &["-v", "--seed", "7"]);
    assert_success(&result);

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Run Statistics:"), "stdout: {}", stdout);
    assert!(stdout.contains("Run seed: 7"));
    assert!(stdout.contains("Slots processed: 3/3"));
}
