//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::PettyResult;
use crate::services::CategoryService;
use crate::storage::RecordStore;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,
}

/// Handle a category command
pub fn handle_category_command(store: &RecordStore, cmd: CategoryCommands) -> PettyResult<()> {
    let service = CategoryService::new(store);

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_list(&service.list()?));
        }
    }

    Ok(())
}
