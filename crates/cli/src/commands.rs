//! Command handlers
//!
//! One function per subcommand. Handlers parse user input into domain
//! types, call into the registry/workflow/console and print the result.

use crate::context::AppContext;
use anyhow::{bail, Context as _};
use minibank_core::{AccountNumber, Amount};
use minibank_domain::{RegistrationRequest, Transaction, TransactionStatus, TransactionType};
use minibank_registry::LoginOutcome;
use minibank_store::{AccountRepository, NotificationRepository, TransactionRepository};
use minibank_workflow::TransactionRequest;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use uuid::Uuid;

fn account_number(raw: &str) -> anyhow::Result<AccountNumber> {
    Ok(AccountNumber::new(raw)?)
}

fn amount(raw: Decimal) -> anyhow::Result<Amount> {
    Ok(Amount::new(raw)?)
}

fn transaction_id(raw: &str) -> anyhow::Result<Uuid> {
    Uuid::parse_str(raw).with_context(|| format!("Invalid transaction id: {raw}"))
}

fn print_transaction(t: &Transaction) {
    let status = match t.status {
        TransactionStatus::Declined => match &t.decline_reason {
            Some(reason) => format!("declined ({reason})"),
            None => "declined".to_string(),
        },
        other => other.to_string(),
    };
    println!(
        "  {}  {:<8}  {:>12}  {:<9}  {}",
        t.created_at.format("%Y-%m-%d %H:%M"),
        t.kind,
        t.amount.to_string(),
        status,
        t.description
    );
}

pub fn register(
    ctx: &AppContext,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    password: String,
    confirm_password: String,
) -> anyhow::Result<()> {
    let registration = ctx.registry.register(&RegistrationRequest {
        first_name,
        last_name,
        email,
        phone,
        password,
        confirm_password,
    })?;
    println!("✅ Registration submitted and awaiting review");
    println!("   Account number: {}", registration.account_number);
    Ok(())
}

/// Authenticate against the remote service when one is configured,
/// falling back to the local registry.
pub fn login(ctx: &AppContext, email: String, password: String) -> anyhow::Result<()> {
    if let Some(remote) = &ctx.remote {
        if let Ok(admin) = remote.admin_login(&email, &password) {
            println!("✅ Logged in as {} (admin)", admin.name);
            return Ok(());
        }
        if let Ok(account) = remote.login(&email, &password) {
            println!("✅ Logged in as {} ({})", account.name, account.email);
            println!("   Account: {}  Status: {}", account.account_number, account.status);
            return Ok(());
        }
    }
    match ctx.registry.login(&email, &password)? {
        LoginOutcome::Admin(admin) => {
            println!("✅ Logged in as {} (admin)", admin.name);
        }
        LoginOutcome::User(account) => {
            println!("✅ Logged in as {} ({})", account.name, account.email);
            println!("   Account: {}  Status: {}", account.account_number, account.status);
        }
    }
    Ok(())
}

pub fn set_pin(
    ctx: &AppContext,
    account: String,
    current: Option<String>,
    new: String,
    confirm: String,
) -> anyhow::Result<()> {
    let number = account_number(&account)?;
    ctx.registry
        .set_pin(&number, current.as_deref(), &new, &confirm)?;
    println!("✅ Transaction PIN updated for account {number}");
    Ok(())
}

pub fn submit(
    ctx: &AppContext,
    kind: TransactionType,
    account: String,
    value: Decimal,
    description: String,
    method: Option<String>,
    pin: String,
) -> anyhow::Result<()> {
    let transaction = ctx.workflow.create(TransactionRequest {
        account_number: account_number(&account)?,
        kind,
        amount: amount(value)?,
        description,
        method,
        details: None,
        entered_pin: pin,
    })?;
    println!("✅ {} of {} submitted for review", kind, transaction.amount);
    println!("   Transaction id: {}", transaction.id);
    Ok(())
}

pub fn balance(ctx: &AppContext, account: String) -> anyhow::Result<()> {
    let number = account_number(&account)?;
    let balance = ctx.store.balance(&number)?;
    println!("✅ Balance for {number}: {balance}");
    Ok(())
}

pub fn history(ctx: &AppContext, account: String) -> anyhow::Result<()> {
    let number = account_number(&account)?;
    let history = ctx.store.history(&number)?;
    if history.is_empty() {
        println!("✅ No transactions for account {number}");
        return Ok(());
    }
    println!("✅ {} transaction(s) for account {number}", history.len());
    for transaction in &history {
        print_transaction(transaction);
    }
    Ok(())
}

pub fn notifications(ctx: &AppContext, account: String, clear: bool) -> anyhow::Result<()> {
    let number = account_number(&account)?;
    if clear {
        ctx.store.clear_notifications(&number)?;
        println!("✅ Notifications cleared for account {number}");
        return Ok(());
    }
    let notifications = ctx.store.notifications(&number)?;
    if notifications.is_empty() {
        println!("✅ No notifications for account {number}");
        return Ok(());
    }
    println!("✅ {} notification(s) for account {number}", notifications.len());
    for n in &notifications {
        let marker = if n.read { " " } else { "*" };
        println!(
            "  {marker} [{}] {} - {}",
            n.severity, n.title, n.message
        );
    }
    Ok(())
}

pub fn pending(ctx: &AppContext) -> anyhow::Result<()> {
    let console = ctx.console()?;
    let registrations = console.pending_registrations()?;
    let transactions = console.pending_transactions()?;

    println!("✅ {} pending registration(s)", registrations.len());
    for r in &registrations {
        println!(
            "  {}  {}  {}  requested {}",
            r.account_number,
            r.name,
            r.email,
            r.requested_at.format("%Y-%m-%d %H:%M")
        );
    }
    println!("✅ {} pending transaction(s)", transactions.len());
    for t in &transactions {
        println!(
            "  {}  {}  {:<8}  {}",
            t.id, t.account_number, t.kind, t.amount
        );
    }
    Ok(())
}

pub fn accounts(ctx: &AppContext) -> anyhow::Result<()> {
    let accounts = ctx.console()?.accounts()?;
    println!("✅ {} account(s)", accounts.len());
    for a in &accounts {
        println!(
            "  {}  {:<8}  {:<6}  {}  {}",
            a.account_number, a.status, a.role, a.name, a.email
        );
    }
    Ok(())
}

pub fn stats(ctx: &AppContext) -> anyhow::Result<()> {
    let stats = ctx.console()?.stats()?;
    println!("✅ Accounts: {}", stats.accounts);
    println!("   Pending registrations: {}", stats.pending_registrations);
    println!("   Pending transactions:  {}", stats.pending_transactions);
    println!("   Approved transactions: {}", stats.approved_transactions);
    Ok(())
}

pub fn approve_registration(ctx: &AppContext, account: String) -> anyhow::Result<()> {
    let number = account_number(&account)?;
    let account = ctx.console()?.approve_registration(&number)?;
    println!("✅ Registration approved: {}", account.account_number);
    if let Some(routing) = &account.routing_number {
        println!("   Routing number: {routing}");
    }
    Ok(())
}

pub fn reject_registration(ctx: &AppContext, account: String, reason: String) -> anyhow::Result<()> {
    let number = account_number(&account)?;
    let registration = ctx.console()?.reject_registration(&number, &reason)?;
    println!("✅ Registration rejected for {}: {reason}", registration.email);
    Ok(())
}

pub fn approve_transaction(ctx: &AppContext, id: String) -> anyhow::Result<()> {
    let transaction = ctx.console()?.approve_transaction(transaction_id(&id)?)?;
    println!(
        "✅ {} of {} approved for account {}",
        transaction.kind, transaction.amount, transaction.account_number
    );
    Ok(())
}

pub fn reject_transaction(ctx: &AppContext, id: String, reason: String) -> anyhow::Result<()> {
    let transaction = ctx
        .console()?
        .reject_transaction(transaction_id(&id)?, &reason)?;
    println!(
        "✅ {} of {} declined: {reason}",
        transaction.kind, transaction.amount
    );
    Ok(())
}

pub fn freeze(ctx: &AppContext, account: String) -> anyhow::Result<()> {
    let number = account_number(&account)?;
    ctx.console()?.freeze_account(&number)?;
    println!("✅ Account {number} frozen");
    Ok(())
}

pub fn unfreeze(ctx: &AppContext, account: String) -> anyhow::Result<()> {
    let number = account_number(&account)?;
    ctx.console()?.unfreeze_account(&number)?;
    println!("✅ Account {number} unfrozen");
    Ok(())
}

pub fn delete(ctx: &AppContext, account: String) -> anyhow::Result<()> {
    let number = account_number(&account)?;
    ctx.console()?.delete_account(&number)?;
    println!("✅ Account {number} deleted");
    Ok(())
}

pub fn purge(ctx: &AppContext, yes: bool) -> anyhow::Result<()> {
    if !yes {
        bail!("Purge removes every non-admin account. Re-run with --yes to confirm.");
    }
    let count = ctx.console()?.purge_non_admin()?;
    println!("✅ Purged {count} non-admin account(s)");
    Ok(())
}

pub fn adjust(ctx: &AppContext, account: String, value: Decimal, note: String) -> anyhow::Result<()> {
    let number = account_number(&account)?;
    let transaction = ctx.console()?.adjust_balance(&number, amount(value)?, &note)?;
    let new_balance = ctx.store.balance(&number)?;
    println!(
        "✅ Credited {} to account {number} (transaction {})",
        transaction.amount, transaction.id
    );
    println!("   New balance: {new_balance}");
    Ok(())
}

pub fn audit(
    ctx: &AppContext,
    limit: Option<usize>,
    export: Option<PathBuf>,
) -> anyhow::Result<()> {
    let console = ctx.console()?;
    if let Some(path) = export {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let written = console.export_audit_jsonl(&mut BufWriter::new(file), limit)?;
        println!("✅ Exported {written} audit entries to {}", path.display());
        return Ok(());
    }
    let events = console.audit(limit)?;
    println!("✅ {} audit entries, newest first", events.len());
    for event in &events {
        let actor = event
            .admin
            .as_ref()
            .map(|a| a.email.as_str())
            .unwrap_or("system");
        let target = event
            .target
            .account_number
            .as_deref()
            .or(event.target.email.as_deref())
            .unwrap_or("-");
        println!(
            "  {}  {:<24}  {:<14}  by {actor}",
            event.at.format("%Y-%m-%d %H:%M"),
            event.kind,
            target
        );
    }
    Ok(())
}

pub fn maintenance(
    ctx: &AppContext,
    enabled: bool,
    message: Option<String>,
) -> anyhow::Result<()> {
    let mut settings = ctx.store.settings()?;
    settings.maintenance_mode = enabled;
    if let Some(message) = message {
        settings.maintenance_message = message;
    }
    ctx.store.save_settings(&settings)?;
    if enabled {
        println!("✅ Maintenance mode on: {}", settings.maintenance_message);
    } else {
        println!("✅ Maintenance mode off");
    }
    Ok(())
}
