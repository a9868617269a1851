//! End-to-end tests against the `ppc` binary.
//!
//! These only exercise the parts of the pipeline that don't require `nasm`
//! or `ld` to be installed: argument validation, early-stage errors, and the
//! `.ppprw`/`.asm` artifacts written before the final assemble-and-link
//! step. A full run that reaches a real executable is exercised manually,
//! not here.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn ppc_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ppc"))
}

#[test]
fn wrong_arg_count_exits_one_with_usage_message() {
    ppc_bin()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Nieprawidłowe użycie"));
}

#[test]
fn too_many_args_is_also_wrong_usage() {
    ppc_bin()
        .arg("a.ppc")
        .arg("b.ppc")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Nieprawidłowe użycie"));
}

#[test]
fn missing_source_file_reports_io_error() {
    ppc_bin()
        .arg("/nonexistent/path/does_not_exist.ppc")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn lexical_error_is_reported_and_aborts() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("unterminated.ppc");
    fs::write(&src, "kończwaść ( \"never closed )").unwrap();

    ppc_bin()
        .arg(&src)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Analiza leksykalna"));
}

#[test]
fn syntax_error_reports_expected_and_found() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("bad_syntax.ppc");
    fs::write(&src, "kończwaść [zero]").unwrap();

    ppc_bin()
        .arg(&src)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Analiza składniowa"));
}

#[test]
fn semantic_error_reports_undeclared_identifier() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("undeclared.ppc");
    fs::write(&src, "kończwaść ( `brak` )").unwrap();

    ppc_bin().arg(&src).assert().failure().code(1);
}

#[test]
fn valid_program_writes_ppprw_and_asm_before_linking() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("exit_code.ppc");
    fs::write(&src, "kończwaść ( [czterdzieści dwa] )").unwrap();

    // Linking may still fail in an environment without nasm/ld, but the
    // generator's own output files must exist regardless.
    let _ = ppc_bin().arg(&src).ok();

    let listing = fs::read_to_string(dir.path().join("exit_code.ppprw")).unwrap();
    assert!(listing.contains("prog_exit 42"));

    let asm = fs::read_to_string(dir.path().join("exit_code.asm")).unwrap();
    assert!(asm.contains("global _start"));
    assert!(asm.contains("mov rdi, 42"));
}

#[test]
fn arithmetic_precedence_multiplies_before_adding() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("precedence.ppc");
    fs::write(&src, "kończwaść ( [dwa] dodać [trzy] razy [cztery] )").unwrap();

    let _ = ppc_bin().arg(&src).ok();

    let listing = fs::read_to_string(dir.path().join("precedence.ppprw")).unwrap();
    assert!(listing.contains("3 mul 4"));
    assert!(listing.contains("2 add t0"));
    assert!(listing.contains("prog_exit t1"));
}

#[test]
fn variable_reassignment_reads_back_the_updated_value() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("reassign.ppc");
    fs::write(
        &src,
        "zmienna całkowita `x` równa [pięć]\n`x` równa `x` dodać [jeden]\nkończwaść ( `x` )",
    )
    .unwrap();

    let _ = ppc_bin().arg(&src).ok();

    let listing = fs::read_to_string(dir.path().join("reassign.ppprw")).unwrap();
    assert!(listing.contains("assign x 5"));
    assert!(listing.contains("x add 1"));
    assert!(listing.contains("assign x t0"));
    assert!(listing.contains("prog_exit x"));
}

#[test]
fn while_countdown_prints_then_decrements_with_a_back_edge() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("countdown.ppc");
    fs::write(
        &src,
        "zmienna całkowita `i` równa [trzy]\npowtarzaj jeśli ( `i` większerówne [zero] ) : {\n    wyświetl_liczbę ( `i` )\n    `i` równa `i` odjąć [jeden]\n}",
    )
    .unwrap();

    let _ = ppc_bin().arg(&src).ok();

    let listing = fs::read_to_string(dir.path().join("countdown.ppprw")).unwrap();
    assert!(listing.contains("assign i 3"));
    assert!(listing.contains("i ge 0"));
    assert!(listing.contains("jump_false"));
    assert!(listing.contains("print_int i"));
    assert!(listing.contains("i sub 1"));
    assert!(listing.contains("bgn_scope"));
    assert!(listing.contains("end_scope"));
}

#[test]
fn if_elif_else_falls_through_to_the_matching_branch() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("branches.ppc");
    fs::write(
        &src,
        "zmienna całkowita `x` równa [dwa]\njeśli ( `x` równe [jeden] ) : {\n    wyświetl_liczbę ( [jeden] )\n} przeciwnie jeśli ( `x` równe [dwa] ) : {\n    wyświetl_liczbę ( [dwa] )\n} przeciwnie : {\n    wyświetl_liczbę ( [trzy] )\n}",
    )
    .unwrap();

    let _ = ppc_bin().arg(&src).ok();

    let listing = fs::read_to_string(dir.path().join("branches.ppprw")).unwrap();
    assert!(listing.contains("assign x 2"));
    assert!(listing.contains("x eq 1"));
    assert!(listing.contains("x eq 2"));
    assert!(listing.contains("print_int 1"));
    assert!(listing.contains("print_int 2"));
    assert!(listing.contains("print_int 3"));
    assert!(listing.contains("prog_exit 0"));
}

#[test]
fn array_sum_allocates_assigns_elements_then_indexes_in_a_loop() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("array_sum.ppc");
    fs::write(
        &src,
        "tablica całkowita `a` równa { [jeden], [dwa], [trzy] }\nzmienna całkowita `suma` równa [zero]\nzmienna całkowita `i` równa [zero]\npowtarzaj jeśli ( `i` mniejsze [trzy] ) : {\n    `suma` równa `suma` dodać `a` element `i`\n    `i` równa `i` dodać [jeden]\n}\nwyświetl_liczbę ( `suma` )",
    )
    .unwrap();

    let _ = ppc_bin().arg(&src).ok();

    let listing = fs::read_to_string(dir.path().join("array_sum.ppprw")).unwrap();
    assert!(listing.contains("array_allocate a 3"));
    assert!(listing.contains("array_assign a 0 1"));
    assert!(listing.contains("array_assign a 1 2"));
    assert!(listing.contains("array_assign a 2 3"));
    assert!(listing.contains("i lt 3"));
    assert!(listing.contains("array_get a i"));
    assert!(listing.contains("print_int suma"));
}
