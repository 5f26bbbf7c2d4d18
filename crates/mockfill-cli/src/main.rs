use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use mockfill_cli::{list_merchants, run_fill, run_pick, FillOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Command::new("mockfill")
        .version(mockfill_core::VERSION)
        .about("Fill design-template placeholders with mock merchant data")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("merchants")
                .about("List the built-in merchants")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("fill")
                .about("Fill the selection of a document JSON file")
                .arg(
                    Arg::new("document")
                        .long("document")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Document JSON file"),
                )
                .arg(
                    Arg::new("merchant")
                        .long("merchant")
                        .required(true)
                        .help("Merchant id, e.g. merchant1"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("TOML configuration file"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducibility"),
                )
                .arg(
                    Arg::new("select")
                        .long("select")
                        .action(ArgAction::Append)
                        .help("Node id to select, replacing the document selection"),
                )
                .arg(
                    Arg::new("traverse-frames")
                        .long("traverse-frames")
                        .action(ArgAction::SetTrue)
                        .help("Look for placeholders inside frames"),
                )
                .arg(
                    Arg::new("image")
                        .long("image")
                        .value_parser(value_parser!(PathBuf))
                        .help("Image file used to answer every download request"),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write the filled document here instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("pick")
                .about("Print a non-repeating random index sequence")
                .arg(
                    Arg::new("size")
                        .long("size")
                        .required(true)
                        .value_parser(value_parser!(usize))
                        .help("Number of candidates"),
                )
                .arg(
                    Arg::new("draws")
                        .long("draws")
                        .default_value("10")
                        .value_parser(value_parser!(usize))
                        .help("Number of draws"),
                )
                .arg(
                    Arg::new("window")
                        .long("window")
                        .value_parser(value_parser!(usize))
                        .help("Recent-use window capacity"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducibility"),
                ),
        );

    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("merchants", args)) => {
            print!("{}", list_merchants(args.get_flag("json"))?);
        }
        Some(("fill", args)) => {
            let options = FillOptions {
                document: args
                    .get_one::<PathBuf>("document")
                    .cloned()
                    .context("missing --document")?,
                merchant: args
                    .get_one::<String>("merchant")
                    .cloned()
                    .context("missing --merchant")?,
                config: args.get_one::<PathBuf>("config").cloned(),
                seed: args.get_one::<u64>("seed").copied(),
                select: args
                    .get_many::<String>("select")
                    .map(|ids| ids.cloned().collect())
                    .unwrap_or_default(),
                traverse_frames: args.get_flag("traverse-frames"),
                image: args.get_one::<PathBuf>("image").cloned(),
            };

            let output = run_fill(&options).await?;
            match args.get_one::<PathBuf>("out") {
                Some(path) => {
                    let document = serde_json::to_string_pretty(&output.document)?;
                    std::fs::write(path, document)
                        .with_context(|| format!("write {}", path.display()))?;
                    let summary = serde_json::json!({
                        "report": &output.report,
                        "messages": &output.messages,
                        "images_applied": output.images_applied,
                    });
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                }
                None => println!("{}", serde_json::to_string_pretty(&output)?),
            }

            if !output.report.skipped.is_empty() {
                tracing::warn!("{} placeholders were skipped", output.report.skipped.len());
            }
        }
        Some(("pick", args)) => {
            let size = *args.get_one::<usize>("size").context("missing --size")?;
            let draws = *args.get_one::<usize>("draws").context("missing --draws")?;
            let window = args.get_one::<usize>("window").copied();
            let seed = args.get_one::<u64>("seed").copied();

            let sequence = run_pick(size, draws, window, seed);
            let line: Vec<String> = sequence.iter().map(ToString::to_string).collect();
            println!("{}", line.join(" "));
        }
        _ => unreachable!("subcommand_required is set"),
    }

    Ok(())
}
