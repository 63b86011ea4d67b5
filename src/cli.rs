//! Command line front end of the `cidr-algebra` binary.

use crate::codec;
use crate::config;
use crate::models::Network;
use crate::output::{render_details, render_networks, OutputFormat};
use clap::{Arg, ArgAction, ArgMatches, Command};
use itertools::Itertools;
use std::error::Error;
use std::io::{self, BufRead};
use std::path::Path;

/// Build the clap command tree.
pub fn build_command() -> Command {
    let cidr_list = || {
        Arg::new("cidr")
            .help("Networks such as 10.0.0.0/24 or 2001:db8::/32")
            .action(ArgAction::Append)
    };

    Command::new("cidr-algebra")
        .version(env!("CARGO_PKG_VERSION"))
        .about("IPv4/IPv6 network calculator: summarize, split and inspect CIDR blocks")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .global(true)
                .value_parser(["text", "csv", "json"])
                .help("Output format, default from CIDR_OUTPUT_FORMAT or text"),
        )
        .subcommand(
            Command::new("info")
                .about("Show derived values of each network")
                .arg(cidr_list().required(true)),
        )
        .subcommand(
            Command::new("summarize")
                .about("Aggregate networks into the smallest covering set")
                .arg(cidr_list())
                .arg(
                    Arg::new("input")
                        .long("input")
                        .short('i')
                        .help("File with one network per line, or a JSON array if it ends in .json"),
                ),
        )
        .subcommand(
            Command::new("split")
                .about("Split a network into exactly COUNT contiguous subnets")
                .arg(Arg::new("cidr").required(true))
                .arg(
                    Arg::new("count")
                        .required(true)
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("subnets")
                .about("List every subnet of the given prefix length")
                .arg(Arg::new("cidr").required(true))
                .arg(
                    Arg::new("prefix")
                        .required(true)
                        .value_parser(clap::value_parser!(u8)),
                ),
        )
        .subcommand(
            Command::new("compress")
                .about("Canonical compressed form of IPv6 addresses")
                .arg(Arg::new("address").required(true).action(ArgAction::Append)),
        )
        .subcommand(
            Command::new("expand")
                .about("Fully expanded form of IPv6 addresses")
                .arg(Arg::new("address").required(true).action(ArgAction::Append)),
        )
}

/// Output format from `--format`, falling back to the environment.
fn output_format(matches: &ArgMatches) -> Result<OutputFormat, Box<dyn Error>> {
    let name = matches
        .get_one::<String>("format")
        .cloned()
        .unwrap_or_else(config::output_format);
    Ok(name.parse::<OutputFormat>()?)
}

fn parse_all<'a, I>(texts: I) -> Result<Vec<Network>, Box<dyn Error>>
where
    I: IntoIterator<Item = &'a str>,
{
    texts
        .into_iter()
        .map(|t| Network::parse(t).map_err(Box::<dyn Error>::from))
        .collect()
}

/// Parse one network per line; blank lines and `#` comments are skipped.
pub fn parse_lines<R: BufRead>(reader: R) -> Result<Vec<Network>, Box<dyn Error>> {
    let mut networks = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let network =
            Network::parse(line).map_err(|e| format!("Error on line {}: {e}", i + 1))?;
        networks.push(network);
    }
    Ok(networks)
}

/// Parse a JSON array of CIDR strings, reporting the path of a bad element.
pub fn parse_json(text: &str) -> Result<Vec<Network>, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    let networks: Vec<Network> = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing JSON: path={} error={}", e.path(), e))?;
    Ok(networks)
}

/// Read networks from a file, choosing the parser by extension.
pub fn read_input_file(path: &str) -> Result<Vec<Network>, Box<dyn Error>> {
    log::info!("reading networks from {path}");
    let text =
        std::fs::read_to_string(path).map_err(|e| format!("Error reading '{path}': {e}"))?;
    let is_json = Path::new(path)
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        parse_json(&text)
    } else {
        parse_lines(text.as_bytes())
    }
}

fn summarize_inputs(matches: &ArgMatches) -> Result<Vec<Network>, Box<dyn Error>> {
    let mut networks = match matches.get_many::<String>("cidr") {
        Some(values) => parse_all(values.map(String::as_str))?,
        None => Vec::new(),
    };
    if let Some(path) = matches.get_one::<String>("input") {
        networks.extend(read_input_file(path)?);
    }
    if networks.is_empty() && !matches.contains_id("input") {
        log::info!("no networks given, reading stdin");
        networks = parse_lines(io::stdin().lock())?;
    }
    Ok(networks)
}

fn codec_lines<F>(matches: &ArgMatches, convert: F) -> Result<String, Box<dyn Error>>
where
    F: Fn(&str) -> Result<String, crate::CidrError>,
{
    let lines: Vec<String> = matches
        .get_many::<String>("address")
        .into_iter()
        .flatten()
        .map(|a| convert(a))
        .collect::<Result<_, _>>()?;
    Ok(format!("{}\n", lines.iter().join("\n")))
}

/// Run the parsed command and return what should be printed.
pub fn execute(matches: &ArgMatches) -> Result<String, Box<dyn Error>> {
    let format = output_format(matches)?;
    log::debug!("output format {format}");

    match matches.subcommand() {
        Some(("info", sub)) => {
            let texts = sub.get_many::<String>("cidr").into_iter().flatten();
            let networks = parse_all(texts.map(String::as_str))?;
            render_details(&networks, format)
        }
        Some(("summarize", sub)) => {
            let networks = summarize_inputs(sub)?;
            let summary = Network::summarize(&networks)?;
            log::info!(
                "summarized {} network(s) into {}",
                networks.len(),
                summary.len()
            );
            render_networks(&summary, format)
        }
        Some(("split", sub)) => {
            let network = required_network(sub)?;
            let count = sub.get_one::<usize>("count").copied().unwrap_or(1);
            render_networks(&network.split(count)?, format)
        }
        Some(("subnets", sub)) => {
            let network = required_network(sub)?;
            let length = sub
                .get_one::<u8>("prefix")
                .copied()
                .unwrap_or_else(|| network.prefix().length());
            render_networks(&network.subnets(length)?, format)
        }
        Some(("compress", sub)) => codec_lines(sub, codec::compress),
        Some(("expand", sub)) => codec_lines(sub, codec::expand),
        _ => Err("No subcommand given, see --help".into()),
    }
}

fn required_network(matches: &ArgMatches) -> Result<Network, Box<dyn Error>> {
    let text = matches
        .get_one::<String>("cidr")
        .ok_or("Missing network argument")?;
    Ok(Network::parse(text)?)
}

/// Parse `args` (program name first) and run.
pub fn run_from<I, T>(args: I) -> Result<String, Box<dyn Error>>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = build_command().try_get_matches_from(args)?;
    execute(&matches)
}
