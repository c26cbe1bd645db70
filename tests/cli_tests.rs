//! CLI integration tests using assert_cmd.
//!
//! Every test runs the real `primes` binary: informational flags, argument
//! validation, the estimate modes, and the streamed sieve output.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

#[allow(deprecated)]
fn primes() -> Command {
    let mut cmd = Command::cargo_bin("primes").unwrap();
    cmd.env_remove("PRIMES_CONFIG")
        .env_remove("PRIMES_SQRT")
        .env_remove("PRIMES_PROGRESS_SECS")
        .env_remove("LOG_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

// --- Informational flags ---

#[test]
fn help_lists_options() {
    primes().arg("--help").assert().success().stdout(
        predicate::str::contains("--count")
            .and(predicate::str::contains("--memory"))
            .and(predicate::str::contains("--limit"))
            .and(predicate::str::contains("--version"))
            .and(predicate::str::contains("If [START] is not given")),
    );
}

#[test]
fn version_prints_name_and_version() {
    primes()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("primes 1.0.0"));
}

#[test]
fn limit_prints_u64_max() {
    primes()
        .arg("--limit")
        .assert()
        .success()
        .stdout("18446744073709551615\n");
}

// --- Estimates ---

#[test]
fn count_one_million() {
    primes()
        .args(["--count", "1000000"])
        .assert()
        .success()
        .stdout("72382\n");
}

/// With two positionals the estimate uses STOP and ignores START.
#[test]
fn count_uses_stop_of_two_bounds() {
    primes()
        .args(["--count", "5", "1000000"])
        .assert()
        .success()
        .stdout("72382\n");
}

#[test]
fn memory_one_million() {
    primes()
        .args(["--memory", "1000000"])
        .assert()
        .success()
        .stdout("1278     bytes\n1.25     kb\n0.00     mb\n");
}

// --- Sieve output ---

#[test]
fn sieve_up_to_ten() {
    primes().arg("10").assert().success().stdout("2\n3\n5\n7\n");
}

#[test]
fn sieve_ten_to_thirty() {
    primes()
        .args(["10", "30"])
        .assert()
        .success()
        .stdout("11\n13\n17\n19\n23\n29\n");
}

#[test]
fn sieve_two_to_two() {
    primes().args(["2", "2"]).assert().success().stdout("2\n");
}

#[test]
fn sieve_start_below_two_is_clamped() {
    primes().args(["0", "7"]).assert().success().stdout("2\n3\n5\n7\n");
}

#[test]
fn sieve_stop_below_two_prints_nothing() {
    primes().args(["0", "1"]).assert().success().stdout("");
}

#[test]
fn sieve_line_count_up_to_one_hundred_thousand() {
    let output = primes().arg("100000").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let values: Vec<u64> = stdout.lines().map(|l| l.parse().unwrap()).collect();
    assert_eq!(values.len(), 9592);
    assert!(values.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(values.last(), Some(&99991));
}

#[test]
fn float_sqrt_gives_same_output() {
    let exact = primes().args(["1000", "5000"]).output().unwrap();
    let float = primes()
        .args(["--sqrt", "float", "1000", "5000"])
        .output()
        .unwrap();
    assert!(exact.status.success() && float.status.success());
    assert_eq!(exact.stdout, float.stdout);
}

/// Logs go to stderr; stdout carries only primes even at info level.
#[test]
fn logs_do_not_reach_stdout() {
    primes()
        .env("RUST_LOG", "debug")
        .arg("20")
        .assert()
        .success()
        .stdout("2\n3\n5\n7\n11\n13\n17\n19\n")
        .stderr(predicate::str::contains("sieve complete"));
}

#[test]
fn json_logs_on_request() {
    primes()
        .env("RUST_LOG", "info")
        .env("LOG_FORMAT", "json")
        .arg("20")
        .assert()
        .success()
        .stderr(predicate::str::contains("\"sieve complete\""));
}

#[test]
fn progress_reporter_does_not_delay_exit() {
    primes()
        .args(["--progress-secs", "3600", "1000"])
        .timeout(std::time::Duration::from_secs(60))
        .assert()
        .success()
        .stdout(predicate::str::ends_with("997\n"));
}

/// `primes 2 10000000000 | head`: the reader goes away mid-stream and the
/// run ends quietly with status 0.
#[test]
fn closed_stdout_ends_run_successfully() {
    use std::io::Read;
    use std::process::Stdio;

    let mut child = std::process::Command::new(env!("CARGO_BIN_EXE_primes"))
        .args(["2", "10000000000"])
        .env_remove("PRIMES_CONFIG")
        .env_remove("PRIMES_SQRT")
        .env_remove("PRIMES_PROGRESS_SECS")
        .env_remove("LOG_FORMAT")
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    let mut stdout = child.stdout.take().unwrap();
    let mut head = [0u8; 16];
    stdout.read_exact(&mut head).unwrap();
    assert!(head.starts_with(b"2\n3\n5\n7\n"));
    drop(stdout);

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "status = {:?}", output.status);
    assert!(
        output.stderr.is_empty(),
        "stderr = {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

// --- Config file ---

#[test]
fn config_file_is_applied() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "sqrt_mode = \"float\"\nprogress_secs = 0").unwrap();
    primes()
        .arg("--config")
        .arg(file.path())
        .arg("10")
        .assert()
        .success()
        .stdout("2\n3\n5\n7\n");
}

#[test]
fn invalid_config_file_fails() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "sqrt_mode = \"newton\"").unwrap();
    primes()
        .arg("--config")
        .arg(file.path())
        .arg("10")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("failed to parse config file"));
}

#[test]
fn missing_config_file_fails() {
    primes()
        .args(["--config", "/nonexistent/primes.toml", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/primes.toml"));
}

#[test]
fn sqrt_mode_from_env() {
    primes()
        .env("PRIMES_SQRT", "float")
        .arg("10")
        .assert()
        .success()
        .stdout("2\n3\n5\n7\n");
}

// --- Argument validation ---

#[test]
fn inverted_range_fails_without_output() {
    primes()
        .args(["30", "10"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("invalid range"));
}

#[test]
fn missing_stop_is_a_usage_error() {
    primes()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn non_numeric_bound_is_a_usage_error() {
    primes().arg("ten").assert().code(2).stdout("");
}

#[test]
fn negative_bound_is_a_usage_error() {
    primes().args(["-5", "10"]).assert().code(2);
}

#[test]
fn too_many_bounds_is_a_usage_error() {
    primes().args(["1", "2", "3"]).assert().code(2);
}

#[test]
fn bound_above_u64_max_is_a_usage_error() {
    primes().arg("18446744073709551616").assert().code(2);
}

#[test]
fn conflicting_modes_are_a_usage_error() {
    primes().args(["--count", "--memory", "10"]).assert().code(2);
}

#[test]
fn count_requires_stop() {
    primes().arg("--count").assert().code(2);
}

#[test]
fn unknown_sqrt_mode_is_a_usage_error() {
    primes().args(["--sqrt", "newton", "10"]).assert().code(2);
}
