//! Person commands

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use crate::{AppContext, Cli};
use lineage_core::{NewPerson, PersonKey, PersonUpdate};

#[derive(Args)]
pub struct PersonArgs {
    #[command(subcommand)]
    pub command: PersonCommands,
}

#[derive(Subcommand)]
pub enum PersonCommands {
    /// Add a new person
    Add {
        /// First name
        first_name: String,
        /// Last name
        last_name: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(short, long)]
        birthdate: NaiveDate,
        /// Occupation
        #[arg(short, long)]
        occupation: String,
        /// Date of death (YYYY-MM-DD)
        #[arg(long)]
        deathdate: Option<NaiveDate>,
        /// Free-form description
        #[arg(long)]
        description: Option<String>,
    },
    /// List everyone in the graph
    List,
    /// Get person details
    Get {
        /// First name
        first_name: String,
        /// Last name
        last_name: String,
    },
    /// Update fields of an existing person
    Update {
        /// First name
        first_name: String,
        /// Last name
        last_name: String,
        /// New date of birth (YYYY-MM-DD)
        #[arg(short, long)]
        birthdate: Option<NaiveDate>,
        /// New occupation
        #[arg(short, long)]
        occupation: Option<String>,
        /// Date of death (YYYY-MM-DD)
        #[arg(long)]
        deathdate: Option<NaiveDate>,
        /// New description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a person and detach their relationships
    Delete {
        /// First name
        first_name: String,
        /// Last name
        last_name: String,
        /// Force deletion without confirmation
        #[arg(long)]
        force: bool,
    },
    /// Delete everyone and every relationship
    DeleteAll {
        /// Force deletion without confirmation
        #[arg(long)]
        force: bool,
    },
    /// Count the people in the graph
    Count,
}

pub async fn run(args: &PersonArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let format = OutputFormat::from(cli.format.as_str());

    match &args.command {
        PersonCommands::Add {
            first_name,
            last_name,
            birthdate,
            occupation,
            deathdate,
            description,
        } => {
            let mut new = NewPerson::new(first_name, last_name, *birthdate, occupation);
            if let Some(deathdate) = deathdate {
                new = new.with_deathdate(*deathdate);
            }
            if let Some(description) = description {
                new = new.with_description(description);
            }

            let person = ctx.people.create(new).await?;
            match format {
                OutputFormat::Json => println!("{}", output::to_json(&person)),
                OutputFormat::Table => println!("Created {}", output::person_line(&person)),
            }
        }
        PersonCommands::List => {
            let people = ctx.people.list_all().await?;

            if people.is_empty() {
                println!("No people in the graph");
            } else {
                if format == OutputFormat::Table {
                    println!("People ({} found):", people.len());
                }
                output::print_people(&people, format);
            }
        }
        PersonCommands::Get {
            first_name,
            last_name,
        } => {
            let key = PersonKey::new(first_name, last_name);
            let person = ctx.people.read(&key).await?;

            match format {
                OutputFormat::Json => println!("{}", output::to_json(&person)),
                OutputFormat::Table => {
                    println!("Person: {}", person.key);
                    println!("  Birthdate: {}", person.birthdate);
                    println!("  Occupation: {}", person.occupation);
                    if let Some(deathdate) = person.deathdate {
                        println!("  Deathdate: {}", deathdate);
                    }
                    if let Some(description) = &person.description {
                        println!("  Description: {}", description);
                    }
                    println!("  Created: {}", person.created_at);
                    println!("  Updated: {}", person.updated_at);
                }
            }
        }
        PersonCommands::Update {
            first_name,
            last_name,
            birthdate,
            occupation,
            deathdate,
            description,
        } => {
            let key = PersonKey::new(first_name, last_name);
            let mut update = PersonUpdate::new();
            if let Some(birthdate) = birthdate {
                update = update.with_birthdate(*birthdate);
            }
            if let Some(occupation) = occupation {
                update = update.with_occupation(occupation);
            }
            if let Some(deathdate) = deathdate {
                update = update.with_deathdate(*deathdate);
            }
            if let Some(description) = description {
                update = update.with_description(description);
            }

            let person = ctx.people.update(&key, update).await?;
            match format {
                OutputFormat::Json => println!("{}", output::to_json(&person)),
                OutputFormat::Table => println!("Updated {}", output::person_line(&person)),
            }
        }
        PersonCommands::Delete {
            first_name,
            last_name,
            force,
        } => {
            let key = PersonKey::new(first_name, last_name);

            if !force {
                println!("Use --force to confirm deletion of '{}'", key);
                return Ok(());
            }

            ctx.people.delete(&key).await?;
            println!("Deleted {}", key);
        }
        PersonCommands::DeleteAll { force } => {
            if !force {
                println!("Use --force to confirm deleting everyone");
                return Ok(());
            }

            ctx.people.delete_all().await?;
            println!("Deleted all people and relationships");
        }
        PersonCommands::Count => {
            let count = ctx.people.count().await?;
            match format {
                OutputFormat::Json => println!("{}", output::to_json(&count)),
                OutputFormat::Table => println!("{} people", count),
            }
        }
    }

    Ok(())
}
