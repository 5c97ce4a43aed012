// Main CLI entry point for sigfeat
// Uses clap for argument parsing and env_logger for diagnostics

use clap::{crate_version, Arg, ArgAction, Command};
use log::{error, info, LevelFilter};
use sigfeat::engine::RecordEngine;
use sigfeat::parsers::{FeatureParser, ParserOptions};
use sigfeat::reporting::{export_markdown, export_records, DEFAULT_SEPARATOR};
use std::path::Path;

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn main() {
    let matches = Command::new("sigfeat")
        .version(crate_version!())
        .about("Randomized feature value synthesis for network signature test generation")
        .after_help("EXAMPLES:\n  sigfeat --input rules.feat --count 20\n  sigfeat -i features/ -n 100 --seed 7 --report\n  sigfeat -i rules.feat --describe")
        .arg(Arg::new("input")
            .short('i')
            .long("input")
            .required(true)
            .num_args(1)
            .help("Feature declaration file, or a directory of .feat files"))
        .arg(Arg::new("count")
            .short('n')
            .long("count")
            .num_args(1)
            .value_parser(clap::value_parser!(usize))
            .default_value("10")
            .help("Number of records to render"))
        .arg(Arg::new("seed")
            .short('s')
            .long("seed")
            .num_args(1)
            .value_parser(clap::value_parser!(u64))
            .help("Seed for reproducible output"))
        .arg(Arg::new("separator")
            .long("separator")
            .num_args(1)
            .default_value(DEFAULT_SEPARATOR)
            .help("Separator placed between tokens of a record"))
        .arg(Arg::new("strict")
            .long("strict")
            .action(ArgAction::SetTrue)
            .help("Fail on the first malformed declaration line"))
        .arg(Arg::new("describe")
            .long("describe")
            .action(ArgAction::SetTrue)
            .help("Print the parsed features as JSON instead of rendering"))
        .arg(Arg::new("report")
            .long("report")
            .action(ArgAction::SetTrue)
            .help("Also export records to timestamped .txt and .md files"))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .action(ArgAction::SetTrue)
            .help("Enable debug logging"))
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    let input = matches.get_one::<String>("input").expect("input is required");
    let count = *matches.get_one::<usize>("count").expect("count has a default");
    let separator = matches.get_one::<String>("separator").expect("separator has a default");

    let mut parser = FeatureParser::with_options(ParserOptions {
        strict: matches.get_flag("strict"),
        ..ParserOptions::default()
    });
    let loaded = if Path::new(input).is_dir() {
        parser.parse_dir(input)
    } else {
        parser.parse_file(input)
    };
    if let Err(e) = loaded {
        error!("Failed to load features: {}", e);
        std::process::exit(1);
    }
    if !parser.diagnostics().is_empty() {
        info!("{} declaration lines skipped", parser.diagnostics().len());
    }

    if matches.get_flag("describe") {
        match serde_json::to_string_pretty(parser.features()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize features: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let features = parser.into_features();
    if features.is_empty() {
        error!("No features declared in {}", input);
        std::process::exit(2);
    }

    let mut engine = match matches.get_one::<u64>("seed") {
        Some(seed) => RecordEngine::with_seed(features, *seed),
        None => RecordEngine::new(features),
    };
    let records = engine.records(count);
    for record in &records {
        println!("{}", record.join(separator));
    }

    if matches.get_flag("report") {
        let dir = Path::new(".");
        match export_records(dir, &records, separator) {
            Ok(path) => info!("Wrote {}", path),
            Err(e) => error!("Failed to write text report: {}", e),
        }
        match export_markdown(dir, &records) {
            Ok(path) => info!("Wrote {}", path),
            Err(e) => error!("Failed to write Markdown report: {}", e),
        }
    }
}
