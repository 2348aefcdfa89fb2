use crate::CLAP_STYLING;
use clap::arg;
use topoviz_core::DEFAULT_SOURCE_URL;
use url::Url;

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("topoviz")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("topoviz")
        .about("Fetch a route document and draw it as a directed graph")
        .styles(CLAP_STYLING)
        .arg(
            arg!([URL])
                .required(false)
                .help("Where to fetch the route document from")
                .value_parser(clap::value_parser!(Url))
                .default_value(DEFAULT_SOURCE_URL),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Image file to write")
                .default_value("dag.png"),
        )
        .arg(
            arg!(--"dpi" <DPI>)
                .required(false)
                .help("Image resolution in dots per inch")
                .value_parser(clap::value_parser!(u32).range(50..=1200))
                .default_value("100"),
        )
        .arg(
            arg!(--"width" <INCHES>)
                .required(false)
                .help("Figure width in inches")
                .value_parser(clap::value_parser!(f64))
                .default_value("6.4"),
        )
        .arg(
            arg!(--"height" <INCHES>)
                .required(false)
                .help("Figure height in inches")
                .value_parser(clap::value_parser!(f64))
                .default_value("4.8"),
        )
        .arg(
            arg!(--"layout" <LAYOUT>)
                .required(false)
                .help("Node placement algorithm")
                .value_parser(["spring", "circular"])
                .default_value("spring"),
        )
        .arg(
            arg!(--"scale" <FACTOR>)
                .required(false)
                .help("Spread nodes apart on dense graphs (grows the canvas by the same factor)")
                .value_parser(clap::value_parser!(f64))
                .default_value("1.0"),
        )
        .arg(
            arg!(--"font-size" <POINTS>)
                .required(false)
                .help("Label size in points")
                .value_parser(clap::value_parser!(f64))
                .default_value("12"),
        )
        .arg(
            arg!(--"seed" <SEED>)
                .required(false)
                .help("Seed the spring layout for a reproducible picture")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            arg!(--"expand-unknown")
                .required(false)
                .help("Give each unanswered '*' hop its own node, named after its neighbours")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(--"export-json" <PATH>)
                .required(false)
                .help("Also write the graph's nodes and edges as JSON")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            arg!(--"no-show")
                .required(false)
                .help("Only write the image; do not open a viewer")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(-q --"quiet")
                .required(false)
                .help("Only report errors")
                .action(clap::ArgAction::SetTrue)
                .conflicts_with("verbose"),
        )
        .arg(
            arg!(-v --"verbose")
                .required(false)
                .help("Log progress (-vv for per-route detail)")
                .action(clap::ArgAction::Count),
        )
}
