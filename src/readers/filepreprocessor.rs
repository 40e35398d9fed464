// src/readers/filepreprocessor.rs

//! Expand the paths and wildcards passed by the user into an ordered list
//! of readable files.

use crate::common::{FPath, FPaths};
use crate::readers::helpers::{fpath_to_path, has_wildcards, path_to_fpath};

use std::io::{Error, ErrorKind, Result};
use std::path::PathBuf;

use ::glob::glob;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Expand one path.
///
/// A path without wildcards must be an existing file. A path with
/// wildcards (`*`, `?`) is expanded with [`glob`], keeping only files, in
/// sorted order. It is an error if nothing matches.
///
/// [`glob`]: https://docs.rs/glob/0.3/glob/fn.glob.html
pub fn process_path(path: &FPath) -> Result<FPaths> {
    defn!("({:?})", path);

    if !has_wildcards(path) {
        let std_path = fpath_to_path(path);
        if std_path.is_file() {
            defx!("file {:?}", path);
            return Ok(vec![path.clone()]);
        }
        if std_path.exists() {
            defx!("not a file {:?}", path);
            return Err(Error::new(ErrorKind::InvalidInput, format!("not a file: {}", path)));
        }
        defx!("not found {:?}", path);
        return Err(Error::new(ErrorKind::NotFound, format!("file not found: {}", path)));
    }

    let paths = match glob(path) {
        Ok(val) => val,
        Err(err) => {
            defx!("glob error {}", err);
            return Err(Error::new(ErrorKind::InvalidInput, format!("bad wildcard {:?}: {}", path, err)));
        }
    };
    let mut pathbufs: Vec<PathBuf> = paths
        .filter_map(std::result::Result::ok)
        .filter(|p| p.is_file())
        .collect();
    pathbufs.sort();
    if pathbufs.is_empty() {
        defx!("no files match {:?}", path);
        return Err(Error::new(ErrorKind::NotFound, format!("no files match: {}", path)));
    }
    let fpaths: FPaths = pathbufs
        .iter()
        .map(|p| path_to_fpath(p.as_path()))
        .collect();
    defx!("{} files", fpaths.len());

    Ok(fpaths)
}

/// Expand every path in `paths`, in the order given. A file named more than
/// once is kept only at its first position.
pub fn process_paths(paths: &[FPath]) -> Result<FPaths> {
    defn!("({} paths)", paths.len());
    let mut fpaths: FPaths = FPaths::with_capacity(paths.len());
    for path in paths.iter() {
        for fpath in process_path(path)? {
            if !fpaths.contains(&fpath) {
                fpaths.push(fpath);
            }
        }
    }
    defx!("{} files", fpaths.len());

    Ok(fpaths)
}
