//! Relationship commands

use clap::{Args, Subcommand};

use crate::{AppContext, Cli};
use lineage_core::PersonKey;

#[derive(Args)]
pub struct RelationshipArgs {
    #[command(subcommand)]
    pub command: RelationshipCommands,
}

#[derive(Subcommand)]
pub enum RelationshipCommands {
    /// Marry two existing, unmarried people
    Marry {
        /// First name of the first spouse
        first_name1: String,
        /// Last name of the first spouse
        last_name1: String,
        /// First name of the second spouse
        first_name2: String,
        /// Last name of the second spouse
        last_name2: String,
    },
    /// Record a child of two parents
    AddChild {
        /// First name of the child
        child_first: String,
        /// Last name of the child
        child_last: String,
        /// First name of the first parent
        parent1_first: String,
        /// Last name of the first parent
        parent1_last: String,
        /// First name of the second parent
        parent2_first: String,
        /// Last name of the second parent
        parent2_last: String,
    },
}

pub async fn run(args: &RelationshipArgs, _cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    match &args.command {
        RelationshipCommands::Marry {
            first_name1,
            last_name1,
            first_name2,
            last_name2,
        } => {
            let p1 = PersonKey::new(first_name1, last_name1);
            let p2 = PersonKey::new(first_name2, last_name2);

            ctx.relationships.add_marriage(&p1, &p2).await?;
            println!("Married {} and {}", p1, p2);
        }
        RelationshipCommands::AddChild {
            child_first,
            child_last,
            parent1_first,
            parent1_last,
            parent2_first,
            parent2_last,
        } => {
            let child = PersonKey::new(child_first, child_last);
            let parent1 = PersonKey::new(parent1_first, parent1_last);
            let parent2 = PersonKey::new(parent2_first, parent2_last);

            ctx.relationships
                .add_parentage(&child, &parent1, &parent2)
                .await?;
            println!("{} is now a child of {} and {}", child, parent1, parent2);
        }
    }

    Ok(())
}
