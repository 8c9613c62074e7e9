use anyhow::Result;
use clap::{Parser, Subcommand};

use pettyflow::auth::{AuthService, SessionService};
use pettyflow::cli::{
    handle_category_command, handle_login, handle_logout, handle_report_command, handle_signup,
    handle_transaction_command, handle_vendor_command, handle_whoami, CategoryCommands,
    ReportArgs, TransactionCommands, VendorCommands,
};
use pettyflow::config::{PettyPaths, Settings};
use pettyflow::display::{format_dashboard, Names};
use pettyflow::models::Money;
use pettyflow::services::Dashboard;
use pettyflow::storage::{seed_demo_data, seed_reference_data, RecordStore};

#[derive(Parser)]
#[command(
    name = "pettyflow",
    version,
    about = "Terminal-based petty cash ledger",
    long_about = "PettyFlow records small cash income and expenses against vendors \
                  and categories, keeps the running cash balance, and produces \
                  filtered reports with optional AI summaries."
)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default categories
    Init {
        /// Also load demo vendors, transactions and the admin account
        #[arg(long)]
        demo: bool,
    },

    /// Show current configuration and paths
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },

    /// Create an account and log in
    Signup {
        name: String,
        email: String,
        /// Password; prompted for when omitted
        #[arg(long, env = "PETTYFLOW_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Log in
    Login {
        email: String,
        /// Password; prompted for when omitted
        #[arg(long, env = "PETTYFLOW_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Log out
    Logout,

    /// Show the logged-in account
    Whoami,

    /// Balance, monthly totals and recent activity
    Dashboard,

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Vendor management commands
    #[command(subcommand)]
    Vendor(VendorCommands),

    /// Category commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Filtered petty cash report
    Report(ReportArgs),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set the cash on hand before the first transaction
    SetBalance { amount: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    pettyflow::logging::init(cli.verbose);

    // Initialize paths and settings
    let paths = PettyPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("PettyFlow - Terminal-based petty cash ledger");
        println!();
        println!("Run 'pettyflow init' to get started.");
        println!("Run 'pettyflow --help' for usage information.");
        return Ok(());
    };

    // Initialize storage
    let store = RecordStore::open_paths(&paths)?;
    let sessions = SessionService::new(&paths, settings.session_ttl_hours);

    match command {
        Commands::Init { demo } => {
            println!("Initializing PettyFlow at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            let seeded = seed_reference_data(&store)?;
            if seeded > 0 {
                println!("Created {} default categories.", seeded);
            }
            if demo {
                seed_demo_data(&store)?;
                println!("Loaded demo data. Log in with:");
                println!(
                    "  pettyflow login {}  (password: {})",
                    pettyflow::storage::init::DEMO_EMAIL,
                    pettyflow::storage::init::DEMO_PASSWORD
                );
            }
            println!("Initialization complete!");
        }
        Commands::Config { action } => match action {
            Some(ConfigCommands::SetBalance { amount }) => {
                let amount = Money::parse(&amount)
                    .map_err(|e| anyhow::anyhow!("Invalid amount '{}': {}", amount, e))?;
                settings.initial_balance = amount;
                settings.save(&paths)?;
                println!("Opening balance set to {}", settings.format_money(amount));
            }
            None => {
                println!("PettyFlow Configuration");
                println!("=======================");
                println!("Base directory: {}", paths.base_dir().display());
                println!("Ledger file:    {}", paths.ledger_file().display());
                println!("Audit log:      {}", paths.audit_log().display());
                println!();
                println!("Settings:");
                println!("  Opening balance: {}", settings.format_money(settings.initial_balance));
                println!("  Currency:        {}", settings.currency_symbol);
                println!("  Session length:  {} hours", settings.session_ttl_hours);
                println!(
                    "  AI assistant:    {} ({})",
                    if settings.ai.enabled { "enabled" } else { "disabled" },
                    settings.ai.model
                );
            }
        },
        Commands::Signup {
            name,
            email,
            password,
        } => handle_signup(&store, &sessions, &name, &email, password)?,
        Commands::Login { email, password } => handle_login(&store, &sessions, &email, password)?,
        Commands::Logout => handle_logout(&store, &sessions)?,
        Commands::Whoami => handle_whoami(&store, &sessions)?,
        Commands::Audit { limit } => {
            require_login(&store, &sessions)?;
            let entries = store
                .audit_logger()
                .map(|logger| logger.read_recent(limit))
                .transpose()?
                .unwrap_or_default();
            if entries.is_empty() {
                println!("No audit entries.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Commands::Dashboard => {
            require_login(&store, &sessions)?;
            let dashboard = Dashboard::build(&store, &settings)?;
            let names = Names::load(&store)?;
            print!("{}", format_dashboard(&dashboard, &names, &settings));
        }
        Commands::Transaction(cmd) => {
            require_login(&store, &sessions)?;
            handle_transaction_command(&store, &settings, cmd)?;
        }
        Commands::Vendor(cmd) => {
            require_login(&store, &sessions)?;
            handle_vendor_command(&store, &settings, cmd)?;
        }
        Commands::Category(cmd) => {
            require_login(&store, &sessions)?;
            handle_category_command(&store, cmd)?;
        }
        Commands::Report(args) => {
            require_login(&store, &sessions)?;
            handle_report_command(&store, &settings, args)?;
        }
    }

    Ok(())
}

/// Ledger commands are only available to a logged-in user
fn require_login(store: &RecordStore, sessions: &SessionService) -> Result<()> {
    AuthService::new(store, sessions).require_user()?;
    Ok(())
}
