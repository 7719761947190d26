use std::path::PathBuf;

use super::*;
use crate::config::FileConfigLoader;
use crate::filter::resolve;

fn program(toml: &str) -> Vec<CheckDefinition> {
    let config = FileConfigLoader::<crate::config::RealFileSystem>::parse(toml).unwrap();
    build_program(&config).unwrap()
}

fn names(program: &[CheckDefinition]) -> Vec<&str> {
    program.iter().map(CheckDefinition::name).collect()
}

#[test]
fn no_checks_gives_builtin_program() {
    let program = build_program(&Config::default()).unwrap();

    assert_eq!(names(&program), ["pragma_once"]);
}

#[test]
fn checks_keep_declaration_order() {
    let program = program(
        r#"
[[check]]
name = "lint"
command = ["cargo", "clippy"]

[[check]]
builtin = "pragma_once"

[[check]]
name = "fmt"
command = ["cargo", "fmt"]
"#,
    );

    assert_eq!(names(&program), ["lint", "pragma_once", "fmt"]);
}

#[test]
fn command_without_endswith_matches_everything() {
    let program = program(
        r#"
[[check]]
name = "lint"
command = ["true"]
"#,
    );

    assert_eq!(program[0].filter(), &PathFilter::default());
}

#[test]
fn builtin_keeps_its_filter_and_adds_excludes() {
    let program = program(
        r#"
[[check]]
builtin = "pragma_once"
exclude = ["third_party/.*"]
"#,
    );

    let universe = vec![
        PathBuf::from("a.h"),
        PathBuf::from("a.cc"),
        PathBuf::from("third_party/b.h"),
    ];
    assert_eq!(program[0].filter().endswith(), [".h"]);
    assert_eq!(
        resolve(program[0].filter(), &universe).unwrap(),
        [PathBuf::from("a.h")]
    );
}

#[test]
fn endswith_overrides_builtin_filter() {
    let program = program(
        r#"
[[check]]
builtin = "pragma_once"
endswith = [".h", ".hpp"]
"#,
    );

    assert_eq!(program[0].filter().endswith(), [".h", ".hpp"]);
}

#[test]
fn builtin_can_be_renamed() {
    let program = program(
        r#"
[[check]]
name = "Header guards"
builtin = "pragma_once"
"#,
    );

    assert_eq!(program[0].name(), "Header guards");
    assert_eq!(program[0].log_directory_name(), "header_guards");
}

#[test]
fn always_run_is_carried_over() {
    let program = program(
        r#"
[[check]]
name = "build"
command = ["make"]
endswith = [".gn"]
always_run = true
"#,
    );

    assert!(program[0].always_run());
}
