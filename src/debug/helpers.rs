// src/debug/helpers.rs

//! Temporary file helpers for tests.

use crate::common::FPath;

use std::fs::File;
use std::io::Write; // for `NamedTempFile.write_all`

#[allow(unused_imports)]
use ::si_trace_print::{defo, defñ};

#[doc(hidden)]
pub use ::tempfile::tempdir;
#[doc(hidden)]
pub use ::tempfile::NamedTempFile;
#[doc(hidden)]
pub use ::tempfile::TempDir;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// temporary file helper functions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Temporary files created by these helpers begin with this prefix.
pub const STR_TEMPFILE_PREFIX: &str = "tmp-imflow-test-";

/// Copy the path of a `NamedTempFile` to a `FPath`.
pub fn ntf_fpath(ntf: &NamedTempFile) -> FPath {
    FPath::from(ntf.path().to_string_lossy())
}

/// Testing helper function to write a `str` to a temporary file.
pub fn create_temp_file(data: &str) -> NamedTempFile {
    let mut ntf = match ::tempfile::Builder::new()
        .prefix(STR_TEMPFILE_PREFIX)
        .suffix(".log")
        .tempfile()
    {
        Ok(val) => val,
        Err(err) => {
            panic!("tempfile::Builder::new()..tempfile() return Err {}", err);
        }
    };
    if let Err(err) = ntf.write_all(data.as_bytes()) {
        panic!("NamedTempFile::write_all() return Err {}", err);
    }
    defñ!("{:?}", ntf.path());

    ntf
}

/// Create a temporary directory
pub fn create_temp_dir() -> TempDir {
    defñ!();
    ::tempfile::tempdir().unwrap()
}

/// Testing helper to write `data` to file `name` within the passed `TempDir`.
/// Returns the path of the new file.
pub fn create_file_in_tmpdir(
    tmpdir: &TempDir,
    name: &str,
    data: &str,
) -> FPath {
    let path_file = tmpdir.path().join(name);
    defo!("File::create({:?})", path_file);
    let mut file_ = match File::create(&path_file) {
        Ok(f) => f,
        Err(err) => panic!("Error {:?}", err),
    };
    file_.write_all(data.as_bytes()).unwrap();

    FPath::from(path_file.to_string_lossy())
}

/// Testing helper to create a `TempDir` with one file per `(name, data)`.
pub fn create_files_and_tmpdir(files: &[(&str, &str)]) -> (TempDir, Vec<FPath>) {
    let tmpdir = create_temp_dir();
    let fpaths: Vec<FPath> = files
        .iter()
        .map(|(name, data)| create_file_in_tmpdir(&tmpdir, name, data))
        .collect();

    (tmpdir, fpaths)
}
