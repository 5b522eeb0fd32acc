use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::Parser;
use pyskel::cli::{parse_project_dir, Args, Commands};
use pyskel::error::Error;
use pyskel::generator::{Descriptor, Layout, TestFramework};

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("pyskel")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_new_all_flags() {
    let args = make_args(&[
        "new",
        "--format",
        "src",
        "--descriptor",
        "script",
        "--test",
        "unittest",
        "-q",
        "-m",
        "-f",
        "-l",
        "gpl3",
        "-d",
        "A demo",
        "--author",
        "Jane",
        "--author-email",
        "jane@example.com",
        "-v",
        "demo",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();
    assert!(parsed.verbose);

    let Commands::New(new) = &parsed.command else {
        panic!("Expected the new sub-command");
    };
    assert_eq!(new.project_dir, Some(PathBuf::from("demo")));
    assert_eq!(new.layout, Layout::Src);
    assert_eq!(new.descriptor, Descriptor::Script);
    assert_eq!(new.test, TestFramework::Unittest);
    assert!(new.quiet && new.merge && new.force);
    assert_eq!(new.license.as_deref(), Some("gpl3"));
    assert_eq!(new.description.as_deref(), Some("A demo"));

    let options = parsed.command.to_options().unwrap();
    assert_eq!(options.project_name, "demo");
    assert_eq!(options.project_dir, env::current_dir().unwrap().join("demo"));
    assert_eq!(options.author_email.as_deref(), Some("jane@example.com"));
}

#[test]
fn test_license_args() {
    let parsed = Args::try_parse_from(make_args(&["license", "MIT", "-p", "/tmp/demo"])).unwrap();
    assert_eq!(parsed.command.generator_name(), "license_change");

    let options = parsed.command.to_options().unwrap();
    assert_eq!(options.license.as_deref(), Some("MIT"));
    assert_eq!(options.project_dir, PathBuf::from("/tmp/demo"));
    assert!(!options.list);
}

#[test]
fn test_docs_and_tests_args() {
    let parsed = Args::try_parse_from(make_args(&["docs", "-m"])).unwrap();
    assert_eq!(parsed.command.generator_name(), "docs");
    assert!(parsed.command.to_options().unwrap().merge);

    let parsed = Args::try_parse_from(make_args(&["tests", "-t", "unittest", "demo"])).unwrap();
    assert_eq!(parsed.command.generator_name(), "tests");
    assert_eq!(parsed.command.to_options().unwrap().test, TestFramework::Unittest);
}

#[test]
fn test_missing_subcommand() {
    assert!(Args::try_parse_from(make_args(&[])).is_err());
    assert!(Args::try_parse_from(make_args(&["new", "--format", "flat"])).is_err());
}

#[test]
fn test_parse_project_dir() {
    let cwd = env::current_dir().unwrap();
    let expected_name = cwd.file_name().unwrap().to_string_lossy().into_owned();

    let (dir, name) = parse_project_dir(None).unwrap();
    assert_eq!((dir, name), (cwd.clone(), expected_name.clone()));

    let (dir, name) = parse_project_dir(Some(Path::new(""))).unwrap();
    assert_eq!((dir, name), (cwd.clone(), expected_name));

    let (dir, name) = parse_project_dir(Some(Path::new("a/./b/../project/"))).unwrap();
    assert_eq!(dir, cwd.join("a").join("project"));
    assert_eq!(name, "project");

    let (dir, name) = parse_project_dir(Some(Path::new("/tmp/../opt/demo"))).unwrap();
    assert_eq!(dir, PathBuf::from("/opt/demo"));
    assert_eq!(name, "demo");
}

#[cfg(unix)]
#[test]
fn test_root_is_not_a_project() {
    let (dir, name) = parse_project_dir(Some(Path::new("/"))).unwrap();
    assert_eq!(dir, PathBuf::from("/"));
    assert_eq!(name, "");

    let parsed = Args::try_parse_from(make_args(&["new", "/"])).unwrap();
    assert!(matches!(parsed.command.to_options(), Err(Error::ProjectDirError(_))));
}
