// src/tests/filepreprocessor_tests.rs

//! tests for `src/readers/filepreprocessor.rs`

#![allow(non_snake_case)]

use crate::common::{FPath, FPaths};
use crate::debug::helpers::{create_file_in_tmpdir, create_temp_dir};
use crate::readers::filepreprocessor::{process_path, process_paths};
use crate::readers::helpers::path_to_fpath;

use std::io::ErrorKind;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn test_process_path_file() {
    let tmpdir = create_temp_dir();
    let fpath = create_file_in_tmpdir(&tmpdir, "a.log", "");
    let fpaths = process_path(&fpath).unwrap();
    assert_eq!(fpaths, vec![fpath]);
}

#[test]
fn test_process_path_not_found() {
    let tmpdir = create_temp_dir();
    let fpath: FPath = path_to_fpath(tmpdir.path().join("nope.log").as_path());
    let err = process_path(&fpath).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("nope.log"), "{}", err);
}

#[test]
fn test_process_path_directory() {
    let tmpdir = create_temp_dir();
    let fpath: FPath = path_to_fpath(tmpdir.path());
    let err = process_path(&fpath).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn test_process_path_wildcard_sorted_files_only() {
    let tmpdir = create_temp_dir();
    let fpath_c = create_file_in_tmpdir(&tmpdir, "c.log", "");
    let fpath_a = create_file_in_tmpdir(&tmpdir, "a.log", "");
    let _fpath_t = create_file_in_tmpdir(&tmpdir, "b.txt", "");
    std::fs::create_dir(tmpdir.path().join("d.log")).unwrap();
    let pattern: FPath = path_to_fpath(tmpdir.path().join("*.log").as_path());
    let fpaths = process_path(&pattern).unwrap();
    assert_eq!(fpaths, vec![fpath_a, fpath_c]);
}

#[test]
fn test_process_path_wildcard_question_mark() {
    let tmpdir = create_temp_dir();
    let fpath_1 = create_file_in_tmpdir(&tmpdir, "a1.log", "");
    let _fpath_10 = create_file_in_tmpdir(&tmpdir, "a10.log", "");
    let pattern: FPath = path_to_fpath(tmpdir.path().join("a?.log").as_path());
    assert_eq!(process_path(&pattern).unwrap(), vec![fpath_1]);
}

#[test]
fn test_process_path_wildcard_no_match() {
    let tmpdir = create_temp_dir();
    let pattern: FPath = path_to_fpath(tmpdir.path().join("*.log").as_path());
    let err = process_path(&pattern).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().starts_with("no files match"), "{}", err);
}

#[test]
fn test_process_paths_order_and_dedupe() {
    let tmpdir = create_temp_dir();
    let fpath_a = create_file_in_tmpdir(&tmpdir, "a.log", "");
    let fpath_b = create_file_in_tmpdir(&tmpdir, "b.log", "");
    let pattern: FPath = path_to_fpath(tmpdir.path().join("*.log").as_path());
    let paths: FPaths = vec![fpath_b.clone(), pattern, fpath_b.clone()];
    let fpaths = process_paths(&paths).unwrap();
    assert_eq!(fpaths, vec![fpath_b, fpath_a]);
}

#[test]
fn test_process_paths_one_bad_path_is_error() {
    let tmpdir = create_temp_dir();
    let fpath_a = create_file_in_tmpdir(&tmpdir, "a.log", "");
    let fpath_x: FPath = path_to_fpath(tmpdir.path().join("x.log").as_path());
    assert!(process_paths(&[fpath_a, fpath_x]).is_err());
}
