mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use config::RuleConfig;
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use tracing::info;
use views::rules::{MultipleOf, NotEqual};
use views::{Cleaner, FilteredCollection, FilteredList, FilteredMap, Rule};

/// ruled - rule-governed collection views
#[derive(Parser)]
#[command(name = "ruled")]
#[command(about = "Explore collections that enforce an acceptance rule", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a view over some values and show what survives
    Filter {
        /// Inline rule, e.g. `even`, `not-equal:1`, `not-equal:0+multiple-of:3`
        #[arg(long, default_value = "accept-all")]
        rule: RuleConfig,

        /// JSON rule file (takes precedence over --rule)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Initial contents of the backing container
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        values: Vec<i64>,

        /// Values to add through the view after construction
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        add: Vec<i64>,

        /// Kind of backing container
        #[arg(long, value_enum, default_value = "list")]
        container: ContainerKind,
    },

    /// Walk through a bypass-and-repair scenario step by step
    Scenario {
        #[arg(value_enum)]
        kind: ScenarioKind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ContainerKind {
    List,
    Set,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScenarioKind {
    List,
    Map,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Filter {
            rule,
            config,
            values,
            add,
            container,
        } => {
            let rule_config = match config {
                Some(path) => RuleConfig::load(&path)?,
                None => rule,
            };
            handle_filter(&rule_config, values, add, container)?
        }
        Commands::Scenario { kind } => match kind {
            ScenarioKind::List => handle_list_scenario(),
            ScenarioKind::Map => handle_map_scenario()?,
        },
    }

    Ok(())
}

/// Handle the 'filter' command
fn handle_filter(
    rule_config: &RuleConfig,
    values: Vec<i64>,
    add: Vec<i64>,
    container: ContainerKind,
) -> Result<()> {
    let rule = rule_config
        .build()
        .context("Failed to build rule from configuration")?;
    info!("Using rule {:?}", rule_config);

    match container {
        ContainerKind::List => {
            let before = values.len();
            let mut view = FilteredList::new(values, rule);
            print_purged(before - view.backing().len());
            for value in add {
                print_add(value, view.add(value));
            }
            print_contents(&view.to_vec());
        }
        ContainerKind::Set => {
            let backing: BTreeSet<i64> = values.into_iter().collect();
            let before = backing.len();
            let mut view = FilteredCollection::new(backing, rule);
            print_purged(before - view.backing().len());
            for value in add {
                print_add(value, view.add(value));
            }
            print_contents(&view.to_vec());
        }
    }
    Ok(())
}

/// Handle 'scenario list'
fn handle_list_scenario() {
    let rule = NotEqual::new(1i64);
    print_step(&format!("Backing list [1], rule {}", rule.name()));
    let mut view = FilteredList::new(vec![1i64], rule);
    print_state("construct view", view.backing());

    let added = view.add(2);
    print_state(&format!("view.add(2) -> {}", added), view.backing());

    view.backing_mut().push(1);
    print_state("bypass: backing.push(1)", view.backing());

    let len = view.len();
    print_state(&format!("view.len() -> {}", len), view.backing());
}

/// Handle 'scenario map'
fn handle_map_scenario() -> Result<()> {
    let rule = MultipleOf::new(2i64)?;
    print_step(&format!("Backing map {{}}, rule {}", rule.name()));
    let mut view = FilteredMap::new(HashMap::new(), rule);

    let previous = view.insert(1, 2);
    print_state(&format!("view.insert(1, 2) -> {:?}", previous), view.backing());

    let previous = view.insert(1, 3);
    print_state(&format!("view.insert(1, 3) -> {:?}", previous), view.backing());

    view.backing_mut().insert(2, 5);
    print_state("bypass: backing.insert(2, 5)", view.backing());

    let len = view.values().len();
    print_state(&format!("view.values().len() -> {}", len), view.backing());

    let purged = view.clean();
    print_state(&format!("view.clean() -> {}", purged), view.backing());
    Ok(())
}

fn print_step(text: &str) {
    println!("{}", text.bold().blue());
}

fn print_state(step: &str, backing: &impl std::fmt::Debug) {
    println!("{}{:<36} backing = {:?}", "• ".green(), step, backing);
}

fn print_purged(count: usize) {
    if count > 0 {
        println!("{} Purged {} element(s) on construction", "✗".red(), count);
    } else {
        println!("{} Nothing to purge on construction", "✓".green());
    }
}

fn print_add(value: i64, accepted: bool) {
    if accepted {
        println!("{} add({}) accepted", "✓".green(), value);
    } else {
        println!("{} add({}) rejected", "✗".red(), value);
    }
}

fn print_contents(contents: &[i64]) {
    let rendered = contents
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    println!("{} [{}]", "View contents:".bold(), rendered);
}
