use std::fs;

use pyskel::settings_file::{read, read_sections, replace_value};
use tempfile::TempDir;

const SAMPLE_CFG: &str = "[metadata]
name = skelpy
version = 1.0.0
license = ${license}
classifiers =
    Topic :: Utilities
    Programming Language :: Python :: 3.6

[options]
package_dir =
    = src
install_requires = six; awesome

[options.extras_require]
all = django; mango
";

#[test]
fn test_read_absent_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("setup.cfg");
    assert!(read(&path).unwrap().is_none());
    assert!(read_sections(&path).unwrap().is_none());
}

#[test]
fn test_read_flattens_sections() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("setup.cfg");
    fs::write(&path, SAMPLE_CFG).unwrap();

    let entries = read(&path).unwrap().unwrap();
    assert_eq!(entries["name"], "skelpy");
    assert_eq!(entries["license"], "${license}");
    assert_eq!(entries["classifiers"], "Topic :: Utilities\nProgramming Language :: Python :: 3.6");
    assert_eq!(entries["package_dir"], "= src");
    assert_eq!(entries["all"], "django; mango");

    let sections = read_sections(&path).unwrap().unwrap();
    assert_eq!(sections.len(), 3);
    assert_eq!(sections["options.extras_require"]["all"], "django; mango");
}

#[test]
fn test_later_section_wins() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("info.txt");
    fs::write(&path, "[first]\nkey = one\nother = x\n[second]\nkey = two\n").unwrap();

    let entries = read(&path).unwrap().unwrap();
    assert_eq!(entries["key"], "two");
    assert_eq!(entries["other"], "x");
}

#[test]
fn test_replace_value_in_cfg() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("setup.cfg");
    fs::write(&path, SAMPLE_CFG).unwrap();

    assert!(replace_value(&path, "license", "GPL3").unwrap());
    let updated = fs::read_to_string(&path).unwrap();
    assert_eq!(updated, SAMPLE_CFG.replace("license = ${license}", "license = GPL3"));

    let changed: Vec<_> = SAMPLE_CFG
        .lines()
        .zip(updated.lines())
        .filter(|(before, after)| before != after)
        .collect();
    assert_eq!(changed, vec![("license = ${license}", "license = GPL3")]);
}

#[test]
fn test_replace_value_in_py() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("setup.py");
    let script = "setup(\n    name='demo',\n    license='MIT',\n)\n";
    fs::write(&path, script).unwrap();

    assert!(replace_value(&path, "license", "APACHE").unwrap());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "setup(\n    name='demo',\n    license='APACHE',\n)\n"
    );
    assert!(!replace_value(&path, "author", "Jane").unwrap());
}

#[test]
fn test_replace_value_in_absent_file() {
    let temp_dir = TempDir::new().unwrap();
    assert!(!replace_value(temp_dir.path().join("setup.cfg"), "license", "MIT").unwrap());
}
