use serde_json::Value;

use crate::common::{Fixtures, partline};

#[test]
fn json_output() {
    let fx = Fixtures::new();
    let file = fx.write("data.log", b"aaa\nbbb\n");

    let output = partline()
        .args(["--format", "json", "-m", "2"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["name"], "data.log");
    assert_eq!(json["lines"], 2);
    assert_eq!(json["size"], 8);
    assert_eq!(json["partitions"], 2);
    assert_eq!(json["parallelism"], 2);
    assert_eq!(json["bytes_scanned"], 8);
    assert_eq!(json["complete"], true);
    assert!(json["failures"].as_array().unwrap().is_empty());
    assert!(json["elapsed_ms"].is_u64());
}

#[test]
fn table_output_layout() {
    let fx = Fixtures::new();
    let file = fx.write("big.txt", &vec![b'\n'; 2048]);

    let output = partline().args(["-m", "4"]).arg(&file).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let labels: Vec<&str> = stdout
        .lines()
        .map(|line| line.split(':').next().unwrap_or(""))
        .collect();
    assert_eq!(
        labels,
        ["   File name", "   File size", "  Line count", "  Partitions", "  Cores used", "Time elapsed"]
    );
    assert!(stdout.contains("   File size: 2.0 KiB\n"));
    assert!(stdout.contains("  Line count: 2,048\n"));
    assert!(stdout.contains("  Partitions: 4\n"));
}

#[test]
fn verbose_logs_go_to_stderr() {
    let fx = Fixtures::new();
    let file = fx.write("v.txt", b"1\n2\n");

    let output = partline().args(["-vv", "-m", "2"]).arg(&file).output().unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("partition 0"));
    assert!(!String::from_utf8(output.stdout).unwrap().contains("partition 0"));
}
