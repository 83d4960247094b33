use predicates::prelude::*;

use crate::common::{Fixtures, partline};

#[test]
fn shows_help() {
    partline()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("partline"))
        .stdout(predicate::str::contains("--chunk-size"))
        .stdout(predicate::str::contains("--max-concurrency"));
}

#[test]
fn counts_positional_file() {
    let fx = Fixtures::new();
    let file = fx.write("abc.txt", b"a\nb\nc\n");

    partline()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("  Line count: 3\n"))
        .stdout(predicate::str::contains("   File name: abc.txt\n"));
}

#[test]
fn counts_with_file_flag_and_tiny_buffer() {
    let fx = Fixtures::new();
    let file = fx.write("abc.txt", b"a\nb\nc");

    partline()
        .args(["-c", "1", "-m", "8", "-f"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("  Line count: 2\n"));
}

#[test]
fn same_count_for_any_concurrency() {
    let fx = Fixtures::new();
    let contents: Vec<u8> = (0..20_000u32)
        .map(|i| if i % 7 == 0 { b'\n' } else { b'z' })
        .collect();
    let file = fx.write("many.txt", &contents);

    for m in ["1", "2", "3", "16", "100000"] {
        partline()
            .args(["-m", m, "-c", "333"])
            .arg(&file)
            .assert()
            .success()
            .stdout(predicate::str::contains("  Line count: 2,858\n"));
    }
}

#[test]
fn empty_file() {
    let fx = Fixtures::new();
    let file = fx.write("empty.txt", b"");

    partline()
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("  Line count: 0\n"))
        .stdout(predicate::str::contains("  Partitions: 0\n"));
}

#[test]
fn missing_file_fails() {
    let fx = Fixtures::new();

    partline()
        .arg(fx.path().join("missing.log"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn directory_is_rejected() {
    let fx = Fixtures::new();

    partline()
        .arg(fx.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a regular file"));
}

#[test]
fn rejects_zero_chunk_size() {
    let fx = Fixtures::new();
    let file = fx.write("x.txt", b"x\n");

    partline()
        .args(["-c", "0"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than 0"));
}

#[test]
fn rejects_zero_concurrency() {
    let fx = Fixtures::new();
    let file = fx.write("x.txt", b"x\n");

    partline()
        .args(["-m", "0"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn concurrency_from_environment() {
    let fx = Fixtures::new();
    let file = fx.write("x.txt", b"1\n2\n3\n4\n");

    partline()
        .env("PARTLINE_MAX_CONCURRENCY", "3")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("  Cores used: 3\n"))
        .stdout(predicate::str::contains("  Line count: 4\n"));
}
