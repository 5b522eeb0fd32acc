use std::fs;
use std::path::Path;

use pyskel::generator::license::{canonical_license, is_supported_license, LICENSES};
use pyskel::generator::{Context, Generator, GeneratorOptions, LicenseChangeGenerator, LicenseGenerator};
use pyskel::host::Host;
use tempfile::TempDir;

struct QuietHost;

impl Host for QuietHost {
    fn open(&self, _path: &Path, _block: bool) -> i32 {
        -1
    }

    fn has_command(&self, _name: &str) -> bool {
        false
    }

    fn user_name(&self) -> String {
        "Jane Doe".to_string()
    }

    fn user_email(&self) -> String {
        "jane@example.com".to_string()
    }
}

fn context() -> Context {
    Context::new(Box::new(QuietHost))
}

#[test]
fn test_is_supported_license() {
    assert!(!is_supported_license("Foo"));
    assert!(is_supported_license("mozilla"));
    assert_eq!(canonical_license("mozilla"), Some("MOZILLA"));
    assert_eq!(canonical_license(" Simple-BSD "), Some("SIMPLE-BSD"));
    assert_eq!(LICENSES.len(), 10);
}

#[test]
fn test_invalid_license_falls_back_to_default() {
    let temp_dir = TempDir::new().unwrap();
    let mut options = GeneratorOptions::new(temp_dir.path(), "demo");
    options.license = Some("Foo".to_string());
    let mut ctx = context();

    assert!(LicenseGenerator::new(&options).generate(&mut ctx).unwrap());
    assert_eq!(ctx.settings.get("license"), Some("MIT"));
    let text = fs::read_to_string(temp_dir.path().join("LICENSE")).unwrap();
    assert!(text.starts_with("MIT License"));
    assert!(text.contains("Jane Doe"));
}

#[test]
fn test_license_is_case_normalized() {
    let temp_dir = TempDir::new().unwrap();
    let mut options = GeneratorOptions::new(temp_dir.path(), "demo");
    options.license = Some("mozilla".to_string());
    let mut ctx = context();

    assert!(LicenseGenerator::new(&options).generate(&mut ctx).unwrap());
    assert_eq!(ctx.settings.get("license"), Some("MOZILLA"));
    assert!(temp_dir.path().join("LICENSE").exists());
}

#[test]
fn test_license_from_settings() {
    let temp_dir = TempDir::new().unwrap();
    let options = GeneratorOptions::new(temp_dir.path(), "demo");
    let mut ctx = context();
    ctx.settings.insert("license", "gpl3");

    assert!(LicenseGenerator::new(&options).generate(&mut ctx).unwrap());
    assert_eq!(ctx.settings.get("license"), Some("GPL3"));
}

#[test]
fn test_license_change_rewrites_descriptors() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let cfg = "[metadata]\nname = demo\nlicense = MIT\nurl = \n";
    let script = "setup(\n    name='demo',\n    license='MIT',\n)\n";
    fs::write(root.join("setup.cfg"), cfg).unwrap();
    fs::write(root.join("setup.py"), script).unwrap();
    fs::write(root.join("LICENSE"), "old license").unwrap();

    let mut options = GeneratorOptions::new(root, "demo");
    options.license = Some("new-bsd".to_string());
    let mut ctx = context();
    assert!(ctx.seed_from_settings_file(root.join("setup.cfg")).unwrap());

    assert!(LicenseChangeGenerator::new(&options).generate(&mut ctx).unwrap());
    assert_eq!(
        fs::read_to_string(root.join("setup.cfg")).unwrap(),
        "[metadata]\nname = demo\nlicense = NEW-BSD\nurl = \n"
    );
    assert_eq!(
        fs::read_to_string(root.join("setup.py")).unwrap(),
        "setup(\n    name='demo',\n    license='NEW-BSD',\n)\n"
    );
    let license = fs::read_to_string(root.join("LICENSE")).unwrap();
    assert_ne!(license, "old license");
    assert!(license.contains("Jane Doe"));
}

#[test]
fn test_license_change_refuses_unknown_license() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("setup.cfg"), "[metadata]\nlicense = MIT\n").unwrap();

    let mut options = GeneratorOptions::new(root, "demo");
    options.license = Some("Foo".to_string());
    let mut ctx = context();

    assert!(!LicenseChangeGenerator::new(&options).generate(&mut ctx).unwrap());
    assert_eq!(fs::read_to_string(root.join("setup.cfg")).unwrap(), "[metadata]\nlicense = MIT\n");
    assert!(!root.join("LICENSE").exists());
}
