//! Element management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use smartspace_core::error::AppError;
use smartspace_entity::element::ElementEntity;

use super::{Context, PageArgs, close_after};

/// Arguments for element commands
#[derive(Debug, Args)]
pub struct ElementArgs {
    /// Element subcommand
    #[command(subcommand)]
    pub command: ElementCommand,
}

/// Element subcommands
#[derive(Debug, Subcommand)]
pub enum ElementCommand {
    /// Register an element in the local smartspace
    Add {
        /// Element name
        name: String,
        /// Element type
        #[arg(short = 't', long = "type")]
        element_type: String,
        /// Creator email
        #[arg(long)]
        creator: String,
        /// Creator smartspace; defaults to the local one
        #[arg(long)]
        creator_smartspace: Option<String>,
        /// Location x coordinate
        #[arg(short, long, default_value_t = 0.0)]
        x: f64,
        /// Location y coordinate
        #[arg(short, long, default_value_t = 0.0)]
        y: f64,
    },
    /// List elements ordered by creation time
    List {
        #[command(flatten)]
        page: PageArgs,
    },
}

/// Element display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ElementRow {
    /// Element key
    key: String,
    /// Name
    name: String,
    /// Type
    #[tabled(rename = "type")]
    element_type: String,
    /// Location
    location: String,
    /// Creator key
    creator: String,
}

impl From<&ElementEntity> for ElementRow {
    fn from(element: &ElementEntity) -> Self {
        Self {
            key: element.key().to_string(),
            name: element.name.clone(),
            element_type: element.element_type.clone(),
            location: format!("({}, {})", element.location.x, element.location.y),
            creator: format!("{}#{}", element.creator_email, element.creator_smartspace),
        }
    }
}

/// Execute element commands
pub async fn execute(
    args: &ElementArgs,
    ctx: &Context<'_>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let state = ctx.connect().await?;

    close_after(&state.stores, async {
        match &args.command {
            ElementCommand::Add {
                name,
                element_type,
                creator,
                creator_smartspace,
                x,
                y,
            } => {
                let local = state.local_smartspace().to_string();
                let mut element = ElementEntity::new(
                    local.as_str(),
                    name.as_str(),
                    element_type.as_str(),
                    creator.as_str(),
                    creator_smartspace.as_deref().unwrap_or(&local),
                );
                element.location.x = *x;
                element.location.y = *y;

                let created = state.element_service.create_element(element).await?;
                output::print_success(&format!("Element '{}' created", created.key()));
                output::print_item(&created, format);
            }
            ElementCommand::List { page } => {
                let elements = state.element_service.list_elements((*page).into()).await?;
                let rows: Vec<ElementRow> = elements.iter().map(ElementRow::from).collect();
                output::print_list(&rows, format);
            }
        }
        Ok::<_, AppError>(())
    })
    .await
}
