// Colored terminal output for network summaries and centrality rankings.
//
// Everything here goes to stdout and is purely for the person running the
// pipeline; the JSON files are the real output.

use colored::Colorize;

use super::truncate_chars;
use crate::network::InteractionGraph;
use crate::stats::CentralityReport;

const NAME_WIDTH: usize = 28;

/// Summarize a freshly built interaction graph.
pub fn display_network_summary(graph: &InteractionGraph, strongest: usize) {
    println!(
        "\n{}",
        format!(
            "=== Character Interactions ({} characters, {} pairs) ===",
            graph.order(),
            graph.edge_count()
        )
        .bold()
    );

    if graph.edge_count() == 0 {
        println!("  No interactions found. Check the speaker column and episode titles.");
        return;
    }

    let mut edges = graph.edges();
    edges.sort_by(|a, b| b.2.cmp(&a.2));

    println!();
    println!(
        "  {:>4}  {:<w$} {:<w$} {:>7}",
        "Rank".dimmed(),
        "Character".dimmed(),
        "Character".dimmed(),
        "Lines".dimmed(),
        w = NAME_WIDTH,
    );
    println!("  {}", "-".repeat(2 * NAME_WIDTH + 16).dimmed());

    for (i, (u, v, w)) in edges.iter().take(strongest).enumerate() {
        println!(
            "  {:>4}. {:<w$} {:<w$} {:>7}",
            i + 1,
            truncate_chars(u, NAME_WIDTH - 3),
            truncate_chars(v, NAME_WIDTH - 3),
            w.to_string().cyan(),
            w = NAME_WIDTH,
        );
    }
    println!();
}

/// Display each centrality ranking as a small table.
pub fn display_centrality(report: &CentralityReport) {
    println!("\n{}", "=== Network Statistics ===".bold());

    print_ranking(
        "Degree",
        report.degree.iter().map(|(k, v)| (k.as_str(), format!("{v:.3}"))),
    );
    print_ranking(
        "Weighted degree",
        report
            .weighted_degree
            .iter()
            .map(|(k, v)| (k.as_str(), v.to_string())),
    );
    print_ranking(
        "Closeness",
        report.closeness.iter().map(|(k, v)| (k.as_str(), format!("{v:.3}"))),
    );
    print_ranking(
        "Betweenness",
        report
            .betweenness
            .iter()
            .map(|(k, v)| (k.as_str(), format!("{v:.3}"))),
    );
    println!();
}

fn print_ranking<'a>(title: &str, rows: impl Iterator<Item = (&'a str, String)>) {
    println!("\n  {}", title.bold().underline());
    let mut empty = true;
    for (i, (name, value)) in rows.enumerate() {
        empty = false;
        let name = truncate_chars(name, NAME_WIDTH - 3);
        if i == 0 {
            println!("  {:>4}. {:<w$} {:>10}", 1, name.green().bold(), value, w = NAME_WIDTH);
        } else {
            println!("  {:>4}. {:<w$} {:>10}", i + 1, name, value, w = NAME_WIDTH);
        }
    }
    if empty {
        println!("  {}", "(empty graph)".dimmed());
    }
}
