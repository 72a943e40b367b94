//! Minibank command line interface

use clap::{Parser, Subcommand};
use minibank_cli::{commands, AppContext};
use minibank_domain::TransactionType;
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "minibank")]
#[command(about = "Minibank - accounts, transactions and admin review", long_about = None)]
struct Cli {
    /// Path to data directory
    #[arg(short, long, default_value = "./data")]
    data: PathBuf,

    /// Base URL of the remote collection service
    #[arg(long)]
    remote_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a registration for admin review
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Authenticate with email and password
    Login { email: String, password: String },
    /// Set or change the transaction PIN
    SetPin {
        account: String,
        /// Current PIN, required once a PIN has been chosen
        #[arg(long)]
        current: Option<String>,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
    /// Submit a deposit for review
    Deposit {
        account: String,
        amount: Decimal,
        #[arg(long, default_value = "Deposit")]
        description: String,
        #[arg(long)]
        method: Option<String>,
        #[arg(long)]
        pin: String,
    },
    /// Submit a transfer for review
    Transfer {
        account: String,
        amount: Decimal,
        #[arg(long, default_value = "Transfer")]
        description: String,
        #[arg(long)]
        method: Option<String>,
        #[arg(long)]
        pin: String,
    },
    /// Submit a bill payment for review
    Billpay {
        account: String,
        amount: Decimal,
        #[arg(long, default_value = "Bill payment")]
        description: String,
        #[arg(long)]
        method: Option<String>,
        #[arg(long)]
        pin: String,
    },
    /// Show the account balance
    Balance { account: String },
    /// Show the account's transaction history
    History { account: String },
    /// Show or clear the account's notifications
    Notifications {
        account: String,
        #[arg(long)]
        clear: bool,
    },
    /// Admin operations
    #[command(subcommand)]
    Admin(AdminCommands),
}

#[derive(Subcommand)]
enum AdminCommands {
    /// List pending registrations and transactions
    Pending,
    /// List every account
    Accounts,
    /// Show queue and account counts
    Stats,
    /// Approve a pending registration
    ApproveUser { account: String },
    /// Reject a pending registration
    RejectUser {
        account: String,
        #[arg(long)]
        reason: String,
    },
    /// Approve a pending transaction
    ApproveTx { id: String },
    /// Decline a pending transaction
    RejectTx {
        id: String,
        #[arg(long)]
        reason: String,
    },
    /// Freeze an account
    Freeze { account: String },
    /// Unfreeze an account
    Unfreeze { account: String },
    /// Delete an account and everything keyed by it
    Delete { account: String },
    /// Delete every non-admin account
    Purge {
        #[arg(long)]
        yes: bool,
    },
    /// Credit an account outside the review flow
    Adjust {
        account: String,
        amount: Decimal,
        #[arg(long, default_value = "Balance adjustment")]
        note: String,
    },
    /// Show or export the audit trail
    Audit {
        #[arg(long)]
        limit: Option<usize>,
        /// Write entries as JSON lines to this file instead of printing
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Toggle maintenance mode
    Maintenance {
        #[arg(long)]
        on: bool,
        #[arg(long)]
        message: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let ctx = AppContext::new(&cli.data, cli.remote_url.as_deref())?;

    match cli.command {
        Commands::Register {
            first_name,
            last_name,
            email,
            phone,
            password,
            confirm_password,
        } => commands::register(
            &ctx,
            first_name,
            last_name,
            email,
            phone,
            password,
            confirm_password,
        ),
        Commands::Login { email, password } => commands::login(&ctx, email, password),
        Commands::SetPin {
            account,
            current,
            new,
            confirm,
        } => commands::set_pin(&ctx, account, current, new, confirm),
        Commands::Deposit {
            account,
            amount,
            description,
            method,
            pin,
        } => commands::submit(
            &ctx,
            TransactionType::Deposit,
            account,
            amount,
            description,
            method,
            pin,
        ),
        Commands::Transfer {
            account,
            amount,
            description,
            method,
            pin,
        } => commands::submit(
            &ctx,
            TransactionType::Transfer,
            account,
            amount,
            description,
            method,
            pin,
        ),
        Commands::Billpay {
            account,
            amount,
            description,
            method,
            pin,
        } => commands::submit(
            &ctx,
            TransactionType::Billpay,
            account,
            amount,
            description,
            method,
            pin,
        ),
        Commands::Balance { account } => commands::balance(&ctx, account),
        Commands::History { account } => commands::history(&ctx, account),
        Commands::Notifications { account, clear } => {
            commands::notifications(&ctx, account, clear)
        }
        Commands::Admin(admin) => match admin {
            AdminCommands::Pending => commands::pending(&ctx),
            AdminCommands::Accounts => commands::accounts(&ctx),
            AdminCommands::Stats => commands::stats(&ctx),
            AdminCommands::ApproveUser { account } => commands::approve_registration(&ctx, account),
            AdminCommands::RejectUser { account, reason } => {
                commands::reject_registration(&ctx, account, reason)
            }
            AdminCommands::ApproveTx { id } => commands::approve_transaction(&ctx, id),
            AdminCommands::RejectTx { id, reason } => commands::reject_transaction(&ctx, id, reason),
            AdminCommands::Freeze { account } => commands::freeze(&ctx, account),
            AdminCommands::Unfreeze { account } => commands::unfreeze(&ctx, account),
            AdminCommands::Delete { account } => commands::delete(&ctx, account),
            AdminCommands::Purge { yes } => commands::purge(&ctx, yes),
            AdminCommands::Adjust {
                account,
                amount,
                note,
            } => commands::adjust(&ctx, account, amount, note),
            AdminCommands::Audit { limit, export } => commands::audit(&ctx, limit, export),
            AdminCommands::Maintenance { on, message } => commands::maintenance(&ctx, on, message),
        },
    }
}
