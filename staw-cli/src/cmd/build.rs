use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::info;

use crate::config::load_build_config;

pub fn add_build_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("template")
                .short('T')
                .long("template")
                .visible_alias("tpl")
                .value_name("FILE")
                .help("Template file every page is rendered with (required)"),
        )
        .arg(
            Arg::new("source")
                .short('s')
                .long("source")
                .visible_alias("in")
                .value_name("DIR")
                .help("Input site directory (required)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .visible_alias("out")
                .value_name("DIR")
                .help("Output site directory (required)"),
        )
        .arg(
            Arg::new("title")
                .short('t')
                .long("title")
                .value_name("TITLE")
                .help("Site title (required)"),
        )
        .arg(
            Arg::new("prefix")
                .short('p')
                .long("prefix")
                .value_name("PREFIX")
                .help("URL prefix for local testing"),
        )
        .arg(
            Arg::new("css")
                .long("css")
                .value_name("FILE")
                .help("Stylesheet copied to the output directory"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file")
                .default_value("./staw.toml"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count),
        )
}

pub fn make_command() -> Command {
    add_build_args(Command::new("staw"))
        .version(clap::crate_version!())
        .about("Build a static site from a tree of markdown files")
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    // Load cascading configuration
    let config = load_build_config(args)?;

    // Missing required values are reported here, before anything is written
    let site = config.site_builder().build()?;
    site.render_all()?;

    info!(output = %site.output_dir().display(), "Site built");

    Ok(())
}
