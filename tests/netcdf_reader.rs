mod common;

use bpcmp::compare::{compare_files, Difference, Outcome};
use bpcmp::config::CompareOptions;
use bpcmp::data::{FieldValue, NetcdfReader, Reader, Role};
use common::TestEnv;

#[test]
fn flattens_variable_attributes() {
    let env = TestEnv::new();
    let path = env.output("a.nc", "1.0", &[1.0, 2.0, 3.0], Some(&[101.3]));
    let reader = NetcdfReader::open(&path).expect("open");

    assert_eq!(
        reader.attribute_names().unwrap(),
        vec!["step", "temp/description", "temp/units", "version"]
    );
    assert_eq!(reader.variable_names().unwrap(), vec!["pressure", "temp"]);

    let units = reader.attribute("temp/units").unwrap().expect("units");
    assert!(units.is_string());
    assert_eq!(units.value, FieldValue::from("K"));
}

#[test]
fn numeric_attributes_are_typed() {
    let env = TestEnv::new();
    let path = env.output("a.nc", "1.0", &[1.0], None);
    let reader = NetcdfReader::open(&path).expect("open");

    let step = reader.attribute("step").unwrap().expect("step");
    assert_eq!(step.dtype, "int32");
    assert_eq!(
        reader.read_attribute("step").unwrap(),
        Some(FieldValue::Integer(3))
    );
}

#[test]
fn absent_names_are_none() {
    let env = TestEnv::new();
    let path = env.output("a.nc", "1.0", &[1.0], None);
    let reader = NetcdfReader::open(&path).expect("open");

    assert!(reader.attribute("nope").unwrap().is_none());
    assert!(reader.read_attribute("temp/nope").unwrap().is_none());
    assert!(reader.read_variable("pressure").unwrap().is_none());
}

#[test]
fn reads_variable_shape() {
    let env = TestEnv::new();
    let path = env.output("a.nc", "1.0", &[1.0, 2.0, 3.0], None);
    let reader = NetcdfReader::open(&path).expect("open");

    let temp = reader.read_variable("temp").unwrap().expect("temp");
    assert_eq!(temp.shape(), Some(&[3][..]));
    assert_eq!(temp, FieldValue::vector(vec![1.0, 2.0, 3.0]));
}

#[test]
fn group_members_are_prefixed() {
    let env = TestEnv::new();
    let path = env.path("groups.nc");
    {
        let mut file = netcdf::create(&path).expect("create");
        let mut group = file.add_group("diag").expect("add group");
        group.add_attribute("kind", "energy").expect("add kind");
        group.add_dimension("n", 2).expect("add n");
        let mut var = group
            .add_variable::<i32>("energy", &["n"])
            .expect("add energy");
        var.put_values(&[4, 5], ..).expect("write energy");
        var.put_attribute("units", "J").expect("add units");
    }

    let reader = NetcdfReader::open(&path).expect("open");
    assert_eq!(
        reader.attribute_names().unwrap(),
        vec!["diag/energy/units", "diag/kind"]
    );
    assert_eq!(reader.variable_names().unwrap(), vec!["diag/energy"]);

    let energy = reader.read_variable("diag/energy").unwrap().expect("energy");
    assert_eq!(energy, FieldValue::integers(vec![4, 5]));
    assert_eq!(
        reader.attribute("diag/energy/units").unwrap().map(|a| a.value),
        Some(FieldValue::from("J"))
    );
}

#[test]
fn compares_files_on_disk() {
    let env = TestEnv::new();
    let a = NetcdfReader::open(&env.output("a.nc", "1.0", &[1.0, 2.0], Some(&[1.0])))
        .expect("open a");
    let b = NetcdfReader::open(&env.output("b.nc", "1.0", &[1.0, 2.5], None)).expect("open b");

    let comparison = compare_files(&a, &b, &CompareOptions::default()).expect("compare");
    assert_eq!(comparison.differences, 2);
    assert_eq!(
        comparison.report(Role::Variable, "pressure").unwrap().outcome,
        Outcome::MissingInOther
    );
    assert!(!comparison.report(Role::Variable, "temp").unwrap().outcome.is_match());
}

#[test]
fn wide_integers_keep_full_precision() {
    let env = TestEnv::new();
    let a = NetcdfReader::open(&env.stamps("a.nc", 9_007_199_254_740_993)).expect("open a");
    let b = NetcdfReader::open(&env.stamps("b.nc", 9_007_199_254_740_992)).expect("open b");
    assert_eq!(
        a.read_attribute("stamp").unwrap(),
        Some(FieldValue::Integer(9_007_199_254_740_993))
    );
    assert_eq!(a.attribute("stamp").unwrap().expect("stamp").dtype, "int64");

    let comparison = compare_files(&a, &b, &CompareOptions::default()).expect("compare");
    assert_eq!(comparison.differences, 2);
    for (role, name) in [(Role::Attribute, "stamp"), (Role::Variable, "ids")] {
        assert_eq!(
            comparison.report(role, name).unwrap().outcome,
            Outcome::ValueDifference(Difference::Magnitude(1.0))
        );
    }

    let same = compare_files(&a, &a, &CompareOptions::default()).expect("compare");
    assert!(same.is_identical());
}
