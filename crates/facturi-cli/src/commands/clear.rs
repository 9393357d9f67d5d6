//! Clear command - password-gated wipe of the product table.

use clap::Args;
use console::{style, Term};

use facturi_core::{FacturiError, ProductStore};

use super::{confirm, load_config};

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Password (prompted for when omitted)
    #[arg(short, long)]
    password: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub async fn run(args: ClearArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = ProductStore::open(&config.paths.database)?;

    let password = match args.password {
        Some(password) => password,
        None => {
            let term = Term::stderr();
            term.write_str("Password: ")?;
            term.read_secure_line()?
        }
    };

    if password != config.security.clear_password {
        anyhow::bail!("Wrong password, nothing deleted");
    }

    let count = store.count()?;
    if !args.yes && !confirm(&format!("Delete all {} imported rows?", count))? {
        println!("{} Nothing deleted", style("ℹ").blue());
        return Ok(());
    }

    match store.delete_all_guarded(&config.security.clear_password, &password) {
        Ok(deleted) => {
            println!("{} Deleted {} rows", style("✓").green(), deleted);
            Ok(())
        }
        Err(FacturiError::AccessDenied) => {
            anyhow::bail!("Wrong password, nothing deleted")
        }
        Err(e) => Err(e.into()),
    }
}
