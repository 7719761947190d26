use std::path::PathBuf;

use super::*;

#[test]
fn cli_defaults() {
    let cli = Cli::parse_from(["presubmit-guard"]);

    assert!(cli.paths.is_empty());
    assert_eq!(cli.base, None);
    assert!(cli.exclude.is_empty());
    assert_eq!(cli.repository, PathBuf::from("."));
    assert!(!cli.keep_going);
    assert_eq!(cli.output_directory, None);
    assert_eq!(cli.config, None);
    assert!(!cli.no_config);
    assert_eq!(cli.format, OutputFormat::Text);
    assert_eq!(cli.color, ColorChoice::Auto);
    assert_eq!(cli.verbose, 0);
    assert!(!cli.quiet);
}

#[test]
fn cli_with_paths() {
    let cli = Cli::parse_from(["presubmit-guard", "src", "include/a.h"]);

    assert_eq!(
        cli.paths,
        vec![PathBuf::from("src"), PathBuf::from("include/a.h")]
    );
}

#[test]
fn cli_short_flags() {
    let cli = Cli::parse_from([
        "presubmit-guard",
        "-b",
        "origin/main",
        "-e",
        "third_party/.*",
        "-e",
        r"\.pb\.h$",
        "-r",
        "sub",
        "-k",
        "-o",
        "out",
        "-c",
        "ci.toml",
        "-vv",
        "-q",
    ]);

    assert_eq!(cli.base.as_deref(), Some("origin/main"));
    assert_eq!(cli.exclude, ["third_party/.*", r"\.pb\.h$"]);
    assert_eq!(cli.repository, PathBuf::from("sub"));
    assert!(cli.keep_going);
    assert_eq!(cli.output_directory, Some(PathBuf::from("out")));
    assert_eq!(cli.config, Some(PathBuf::from("ci.toml")));
    assert_eq!(cli.verbose, 2);
    assert!(cli.quiet);
}

#[test]
fn cli_format_and_color() {
    let cli = Cli::parse_from(["presubmit-guard", "--format", "json", "--color", "never"]);

    assert_eq!(cli.format, OutputFormat::Json);
    assert_eq!(cli.color, ColorChoice::Never);
}

#[test]
fn cli_rejects_unknown_format() {
    assert!(Cli::try_parse_from(["presubmit-guard", "--format", "sarif"]).is_err());
}

#[test]
fn cli_config_conflicts_with_no_config() {
    assert!(Cli::try_parse_from(["presubmit-guard", "-c", "a.toml", "--no-config"]).is_err());
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
