use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use ponytalk::config::Config;
use ponytalk::network::render::{render_network, RenderConfig};
use ponytalk::network::{build_interaction_graph, Adjacency, InteractionGraph};
use ponytalk::output::{read_json, terminal, to_pretty_json, write_json};
use ponytalk::script::read_script;
use ponytalk::stats::compute_top_centralities;
use ponytalk::words::stopwords::{builtin_stopwords, load_stopwords};
use ponytalk::words::{compile_word_counts, top_words, WordCountConfig, WordCounts};

/// Ponytalk: who talks to whom, and how they talk.
///
/// Batch transforms over a line-by-line show transcript. Each step reads
/// one file and writes another; run them in any order their inputs allow.
#[derive(Parser)]
#[command(name = "ponytalk", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the character interaction network from a script CSV
    BuildNetwork {
        /// The path to the input script csv file
        #[arg(short, long)]
        input: PathBuf,

        /// The path to the output network json file
        #[arg(short, long)]
        output: PathBuf,

        /// The path to the output network image (.png, .jpg or .svg)
        #[arg(short = 'n', long)]
        network_output: Option<PathBuf>,

        /// Render a small preview instead of the full-size image
        #[arg(long)]
        preview: bool,
    },

    /// Count the words each main character says
    CompileWordCounts {
        /// The path to the dialog csv file
        #[arg(short, long)]
        dialog: PathBuf,

        /// The path to the output word count json file
        #[arg(short, long)]
        output: PathBuf,

        /// Stopword file, one word per line (default: data/stopwords.txt)
        #[arg(long, conflicts_with = "builtin_stopwords")]
        stopwords: Option<PathBuf>,

        /// Use the built-in English stopword list instead of a file
        #[arg(long)]
        builtin_stopwords: bool,
    },

    /// Print each character's most distinctive words by TF-IDF
    PonyLang {
        /// The path to the json file containing the word frequency for each pony
        #[arg(short = 'c', long)]
        pony_counts: PathBuf,

        /// The number of words by highest TF-IDF score to output for each pony
        #[arg(short = 'n', long)]
        num_words: usize,

        /// Also write the result to this json file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rank characters by degree, weighted degree, closeness and betweenness
    NetworkStats {
        /// The path to the interaction network json file
        #[arg(short, long)]
        input: PathBuf,

        /// The path to the statistics json file
        #[arg(short, long)]
        output: PathBuf,

        /// How many characters to keep per ranking (default: 10)
        #[arg(long)]
        top: Option<usize>,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Structured logging on stderr, so `pony-lang` stdout stays pure JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ponytalk=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::BuildNetwork {
            input,
            output,
            network_output,
            preview,
        } => {
            let rows = read_script(&input)?;
            let graph = build_interaction_graph(&rows, &config.network());

            if let Some(image_path) = network_output {
                let render_config = if preview {
                    RenderConfig {
                        seed: config.layout_seed,
                        ..RenderConfig::preview()
                    }
                } else {
                    config.render()
                };
                println!("Drawing network to {}...", image_path.display());
                render_network(&graph, &image_path, &render_config)?;
            }

            write_json(&output, &graph.to_adjacency())?;
            terminal::display_network_summary(&graph, 10);
            println!("Interaction network saved to {}", output.display());
        }

        Commands::CompileWordCounts {
            dialog,
            output,
            stopwords,
            builtin_stopwords: use_builtin,
        } => {
            let stopwords = if use_builtin {
                info!("Using built-in English stopword list");
                builtin_stopwords()
            } else {
                load_stopwords(stopwords.as_deref().unwrap_or(config.stopwords_path.as_path()))?
            };

            let word_config = WordCountConfig {
                min_frequency: config.min_frequency,
                ..WordCountConfig::new(stopwords)
            };

            let rows = read_script(&dialog)?;
            let counts = compile_word_counts(&rows, &word_config);
            write_json(&output, &counts)?;
            println!(
                "Word counts for {} characters saved to {}",
                counts.len(),
                output.display()
            );
        }

        Commands::PonyLang {
            pony_counts,
            num_words,
            output,
        } => {
            let counts: WordCounts = read_json(&pony_counts)?;
            let top = top_words(&counts, num_words);
            info!(
                characters = top.len(),
                num_words, "Ranked pony-language words"
            );

            println!("{}", to_pretty_json(&top)?);
            if let Some(path) = output {
                write_json(&path, &top)?;
            }
        }

        Commands::NetworkStats { input, output, top } => {
            let adjacency: Adjacency = read_json(&input)?;
            let graph = InteractionGraph::from_adjacency(&adjacency);
            let report = compute_top_centralities(&graph, top.unwrap_or(config.stats_top_n));

            write_json(&output, &report)?;
            terminal::display_centrality(&report);
            println!("Network statistics saved to {}", output.display());
        }
    }

    Ok(())
}
