//! Family tree export command

use clap::Args;
use std::path::PathBuf;

use crate::output;
use crate::{AppContext, Cli};

#[derive(Args)]
pub struct TreeArgs {
    /// Write the edge list to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn run(args: &TreeArgs, _cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let edges = ctx.queries.family_tree_edges().await?;
    let json = output::to_json(&edges);

    match &args.output {
        Some(path) => {
            std::fs::write(path, &json)?;
            tracing::info!("Wrote {} edges to {:?}", edges.len(), path);
            println!("Wrote {} edges to {}", edges.len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
