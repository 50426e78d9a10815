use anyhow::Context;
use clap::{Parser, Subcommand};
use rhymefinder::{load_dictionary, render_json, render_text, FinderConfig, RhymeFinder};
use rhymefinder_core::{CategoryMask, Exclusion, CATEGORY_NAMES};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rhymefinder")]
#[command(about = "Find Japanese rhymes by vowel pattern, ranked by consonant similarity")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Query in kana or the pattern language (a i u e o . k s ... ' ^ -)
    query: Option<String>,

    /// Directory with one <category>.dic file per category
    #[arg(long, global = true)]
    dict_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Drop hits containing any of these morae
    #[arg(long, global = true)]
    exclude: Option<String>,

    /// Mark hits from these categories (names or noun/verb/adjective/adverb/adnominal/user/all)
    #[arg(long, global = true, value_delimiter = ',')]
    highlight: Vec<String>,

    /// Show at most this many hits per list
    #[arg(long, global = true)]
    limit: Option<usize>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive mode: one query per line
    Repl,
    /// List the vocabulary categories with their bits
    Categories,
}

fn resolve_config(cli: &Cli) -> anyhow::Result<FinderConfig> {
    let mut config = match &cli.config {
        Some(path) => FinderConfig::load_toml(path)?,
        None => FinderConfig::default(),
    };
    if let Some(dir) = &cli.dict_dir {
        config.dictionary_dir = dir.clone();
    }
    if let Some(exclude) = &cli.exclude {
        config.base_mut().exclude = exclude.clone();
    }
    if !cli.highlight.is_empty() {
        config.base_mut().highlight = cli.highlight.clone();
    }
    if cli.limit.is_some() {
        config.limit = cli.limit;
    }
    Ok(config)
}

fn print_categories() {
    for (bit, name) in CATEGORY_NAMES.iter().enumerate() {
        let mask = CategoryMask::single(bit).unwrap_or_default();
        println!("{bit:>2}  {mask}  {name}");
    }
}

fn print_findings(finder: &RhymeFinder, config: &FinderConfig, json: bool, query: &str) {
    let separator = config.base().form_separator.as_str();
    match finder.find(query) {
        Ok(findings) if json => println!("{}", render_json(&findings, config.limit, separator)),
        Ok(findings) => print!("{}", render_text(&findings, config.limit, separator)),
        Err(err) => eprintln!("error: {err}"),
    }
}

/// REPL directives change the filters between queries.
fn apply_directive(finder: &mut RhymeFinder, line: &str) -> bool {
    if let Some(pattern) = line.strip_prefix(":exclude") {
        match Exclusion::parse(pattern) {
            Ok(exclusion) => finder.set_exclusion(exclusion),
            Err(err) => eprintln!("error: {err}"),
        }
        return true;
    }
    if let Some(names) = line.strip_prefix(":highlight") {
        match CategoryMask::from_names(names.split(',')) {
            Ok(mask) => finder.set_highlight((!mask.is_empty()).then_some(mask)),
            Err(err) => eprintln!("error: {err}"),
        }
        return true;
    }
    false
}

fn run_repl(mut finder: RhymeFinder, config: &FinderConfig, json: bool) -> anyhow::Result<()> {
    println!("rhymefinder: {} words loaded", finder.lexicon().len());
    println!("Type a query and press Enter; :exclude <pattern> and :highlight <names> set filters.");
    println!("Ctrl-D to exit.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let raw = line.context("read stdin")?;
        let input = raw.trim();
        if input.is_empty() || apply_directive(&mut finder, input) {
            continue;
        }
        print_findings(&finder, config, json, input);
        io::stdout().flush().context("flush stdout")?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Some(Commands::Categories) = cli.command {
        print_categories();
        return Ok(());
    }

    let config = resolve_config(&cli)?;
    let lexicon = load_dictionary(&config.dictionary_dir, &config.extension)?;
    let finder = RhymeFinder::from_config(lexicon, config.base())?;

    match (&cli.command, &cli.query) {
        (None, Some(query)) => {
            print_findings(&finder, &config, cli.json, query);
            Ok(())
        }
        _ => run_repl(finder, &config, cli.json),
    }
}
