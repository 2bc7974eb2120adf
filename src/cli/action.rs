//
//  bitbucket-scaffolder
//  cli/action.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! `bb-scaffold action` commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use super::GlobalOptions;
use crate::actions::ActionSchema;
use crate::output::{TableBuilder, TableOutput};

#[derive(Args, Debug)]
pub struct ActionCommand {
    #[command(subcommand)]
    pub command: ActionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ActionSubcommand {
    /// List the built-in actions
    #[command(visible_alias = "ls")]
    List,

    /// Print the input and output JSON Schema of an action
    Schema {
        /// Action id, e.g. bitbucketCloud:repo:create
        id: String,
    },
}

#[derive(Debug, Serialize)]
struct ActionSummary {
    id: &'static str,
    description: &'static str,
}

impl TableOutput for [ActionSummary] {
    fn print_table(&self, color: bool) {
        TableBuilder::new()
            .color(color)
            .headers(["ID", "Description"])
            .rows(self.iter().map(|a| [a.id, a.description]))
            .print();
    }
}

impl ActionCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let registry = global.action_registry()?;

        match &self.command {
            ActionSubcommand::List => {
                let actions: Vec<ActionSummary> = registry
                    .list()
                    .map(|a| ActionSummary {
                        id: a.id(),
                        description: a.description(),
                    })
                    .collect();
                global.output().write(actions.as_slice())
            }
            ActionSubcommand::Schema { id } => {
                let action = registry
                    .get(id)
                    .ok_or_else(|| anyhow::anyhow!("Unknown action '{id}'"))?;
                let schema: ActionSchema = action.schema();
                println!("{}", serde_json::to_string_pretty(&schema)?);
                Ok(())
            }
        }
    }
}
