//! Query commands

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use crate::{AppContext, Cli};
use lineage_core::PersonKey;

#[derive(Args)]
pub struct QueryArgs {
    #[command(subcommand)]
    pub command: QueryCommands,
}

#[derive(Subcommand)]
pub enum QueryCommands {
    /// Search people by substring (case-sensitive, dates included)
    Search {
        /// Search term; empty matches everyone
        #[arg(default_value = "")]
        term: String,
    },
    /// List everyone sharing a parent with the given person
    Siblings {
        /// First name
        first_name: String,
        /// Last name
        last_name: String,
    },
    /// List everyone tied for the most children
    MostChildren,
    /// List everyone strictly older than the given age
    OverAge {
        /// Minimum age in whole years (exclusive)
        min_age: i64,
    },
}

pub async fn run(args: &QueryArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let format = OutputFormat::from(cli.format.as_str());

    match &args.command {
        QueryCommands::Search { term } => {
            let hits = ctx.queries.search(term).await?;

            if hits.is_empty() {
                println!("No matches for '{}'", term);
            } else {
                if format == OutputFormat::Table {
                    println!("Matches ({} found):", hits.len());
                }
                output::print_people(&hits, format);
            }
        }
        QueryCommands::Siblings {
            first_name,
            last_name,
        } => {
            let key = PersonKey::new(first_name, last_name);
            let siblings = ctx.queries.siblings_of(&key).await?;

            match format {
                OutputFormat::Json => println!("{}", output::to_json(&siblings)),
                OutputFormat::Table => {
                    if siblings.is_empty() {
                        println!("{} has no recorded siblings", key);
                    } else {
                        println!("Siblings of {}:", key);
                        for sibling in &siblings {
                            println!("  {}", sibling);
                        }
                    }
                }
            }
        }
        QueryCommands::MostChildren => {
            let winners = ctx.queries.people_with_most_children().await?;

            match format {
                OutputFormat::Json => println!("{}", output::to_json(&winners)),
                OutputFormat::Table => {
                    if winners.is_empty() {
                        println!("Nobody has recorded children");
                    } else {
                        println!("Most children:");
                        for winner in &winners {
                            println!("  {}", winner);
                        }
                    }
                }
            }
        }
        QueryCommands::OverAge { min_age } => {
            let people = ctx.queries.people_over_age(*min_age).await?;

            if people.is_empty() {
                println!("Nobody is over {} years old", min_age);
            } else {
                if format == OutputFormat::Table {
                    println!("Over {} years old ({} found):", min_age, people.len());
                }
                output::print_people(&people, format);
            }
        }
    }

    Ok(())
}
