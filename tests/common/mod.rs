#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary directory holding netCDF outputs written for one test.
pub struct TestEnv {
    tmp: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            tmp: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.tmp.path().join(name)
    }

    /// Output with attribute `version`, variable `temp` (with units and
    /// description) and, optionally, variable `pressure`.
    pub fn output(&self, name: &str, version: &str, temp: &[f64], pressure: Option<&[f64]>) -> PathBuf {
        let path = self.path(name);
        write_output(&path, version, temp, pressure);
        path
    }

    /// Output with an int64 attribute `stamp` and int64 variable `ids = [1, stamp]`.
    pub fn stamps(&self, name: &str, stamp: i64) -> PathBuf {
        let path = self.path(name);
        let mut file = netcdf::create(&path).expect("create netcdf file");
        file.add_attribute("stamp", stamp).expect("add stamp");
        file.add_dimension("n", 2).expect("add n");
        let mut var = file.add_variable::<i64>("ids", &["n"]).expect("add ids");
        var.put_values(&[1, stamp], ..).expect("write ids");
        path
    }
}

pub fn write_output(path: &Path, version: &str, temp: &[f64], pressure: Option<&[f64]>) {
    let mut file = netcdf::create(path).expect("create netcdf file");
    file.add_attribute("version", version).expect("add version");
    file.add_attribute("step", 3i32).expect("add step");

    file.add_dimension("x", temp.len()).expect("add x");
    {
        let mut var = file.add_variable::<f64>("temp", &["x"]).expect("add temp");
        var.put_values(temp, ..).expect("write temp");
        var.put_attribute("units", "K").expect("add units");
        var.put_attribute("description", "Gas temperature")
            .expect("add description");
    }

    if let Some(pressure) = pressure {
        file.add_dimension("y", pressure.len()).expect("add y");
        let mut var = file
            .add_variable::<f64>("pressure", &["y"])
            .expect("add pressure");
        var.put_values(pressure, ..).expect("write pressure");
    }
}

pub fn bpcmp() -> Command {
    Command::cargo_bin("bpcmp").expect("bpcmp binary")
}

pub fn bpdump() -> Command {
    Command::cargo_bin("bpdump").expect("bpdump binary")
}
