use crate::common::CommandMemleakExt;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::{contains, is_empty, is_match};
use std::process::Command;

#[test]
fn test_help() {
    Command::memleak()
        .arg("-h")
        .assert()
        .failure()
        .code(1)
        .stdout(is_empty())
        .stderr(contains(
            "memleak [-rp] [-bkmg] [-l limit[bkmg]] [-c chunk[bkmg]]",
        ));
}

#[test]
fn test_unknown_flag() {
    Command::memleak()
        .arg("-x")
        .assert()
        .failure()
        .code(1)
        .stdout(is_empty())
        .stderr(contains("-x").and(contains("memleak [-rp] [-bkmg]")));
}

#[test]
fn test_missing_value() {
    Command::memleak()
        .arg("-l")
        .assert()
        .failure()
        .code(1)
        .stdout(is_empty());
}

#[test]
fn test_conflicting_units() {
    for args in [&["-k", "-m"][..], &["-bg"][..], &["-m", "-g", "-l", "1k"][..]] {
        Command::memleak()
            .args(args)
            .assert()
            .failure()
            .code(1)
            .stdout(is_empty())
            .stderr(contains(
                "memleak: Only one of -b, -k, -m, or -g may be specified",
            ));
    }
}

#[test]
fn test_repeated_flags() {
    Command::memleak()
        .args(["-k", "-k", "-l", "1m", "-l", "64k", "-c4k", "-c", "4k"])
        .assert()
        .success()
        .stdout(is_empty());
}

#[test]
fn test_invalid_unit() {
    Command::memleak()
        .args(["-c", "10x"])
        .assert()
        .failure()
        .code(1)
        .stdout(is_empty())
        .stderr(contains("invalid unit 'x' in size '10x'"));
}

#[test]
fn test_zero_chunk() {
    Command::memleak()
        .args(["-c", "0"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("chunk size must be greater than zero"));
}

#[test]
fn test_byte_limit_reached() {
    Command::memleak()
        .args(["-l", "1m", "-c", "4k", "-m"])
        .assert()
        .success()
        .stdout(is_empty())
        .stderr(is_empty());
}

#[test]
fn test_chunk_too_large_for_malloc() {
    // 2^63 bytes can never form a valid allocation layout.
    Command::memleak()
        .args(["-c", "9223372036854775808"])
        .assert()
        .failure()
        .code(1)
        .stdout(is_empty())
        .stderr(contains("memleak: malloc(): "));
}

#[cfg(target_os = "linux")]
#[test]
fn test_exhaustion_under_address_space_cap() {
    Command::memleak()
        .args(["-a", "256m", "-c", "64k", "-k"])
        .assert()
        .failure()
        .code(12)
        .stdout(is_match(r"\ALimit reached at [0-9]+ kB\n\z").unwrap());
}
