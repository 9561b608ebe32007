use std::path::Path;

use chrono::NaiveDate;

use crate::{
    core::{
        aggregate::{AggregationMode, BudgetSummary},
        charts::category_slices,
        services::{ProjectionService, SummaryService},
    },
    ledger::{
        parse_amount, period::parse_month_key, Cadence, ExpenseRecord, IncomeRecord, Transaction,
        TransactionKind, ViewPeriod,
    },
    storage::{load_state_from_path, save_state_to_path, state_warnings},
    utils::build_info,
};

use super::{
    context::{CommandError, CommandResult, ShellContext},
    output::{self, format_amount},
};

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// One shell command: its name, one-line help, usage line and handler.
pub struct Command {
    pub name: &'static str,
    pub summary: &'static str,
    pub usage: &'static str,
    pub run: CommandHandler,
}

/// Every shell command, in the order `help` lists them.
pub static COMMANDS: &[Command] = &[
    Command {
        name: "help",
        summary: "Show available commands",
        usage: "help [command]",
        run: cmd_help,
    },
    Command {
        name: "add-income",
        summary: "Add an income source",
        usage: "add-income <amount> <daily|weekly|monthly> [description]",
        run: cmd_add_income,
    },
    Command {
        name: "add-expense",
        summary: "Add a recurring expense",
        usage: "add-expense <amount> <daily|weekly|monthly> <category> [description]",
        run: cmd_add_expense,
    },
    Command {
        name: "add-transaction",
        summary: "Record a dated income or expense",
        usage: "add-transaction <income|expense> <amount> <category> [YYYY-MM-DD] [cadence]",
        run: cmd_add_transaction,
    },
    Command {
        name: "remove",
        summary: "Remove an entry by its list number",
        usage: "remove <income|expense|transaction> <number>",
        run: cmd_remove,
    },
    Command {
        name: "list",
        summary: "List all entries",
        usage: "list",
        run: cmd_list,
    },
    Command {
        name: "summary",
        summary: "Show income, expenses and balance",
        usage: "summary [recurring|transactions]",
        run: cmd_summary,
    },
    Command {
        name: "dashboard",
        summary: "Show transaction totals and the recent transactions",
        usage: "dashboard [weekly|monthly]",
        run: cmd_dashboard,
    },
    Command {
        name: "categories",
        summary: "Show spending by category",
        usage: "categories [recurring|transactions]",
        run: cmd_categories,
    },
    Command {
        name: "project",
        summary: "Project cumulative savings",
        usage: "project [YYYY-MM] [months]",
        run: cmd_project,
    },
    Command {
        name: "user",
        summary: "Switch to a stored user",
        usage: "user [id]",
        run: cmd_user,
    },
    Command {
        name: "save",
        summary: "Write the budget to a JSON file",
        usage: "save <path>",
        run: cmd_save,
    },
    Command {
        name: "load",
        summary: "Read the budget from a JSON file",
        usage: "load <path>",
        run: cmd_load,
    },
    Command {
        name: "config",
        summary: "Show or change settings",
        usage: "config [key value]",
        run: cmd_config,
    },
    Command {
        name: "version",
        summary: "Show build information",
        usage: "version",
        run: cmd_version,
    },
    Command {
        name: "exit",
        summary: "Leave the shell",
        usage: "exit",
        run: cmd_exit,
    },
];

pub fn find(name: &str) -> Option<&'static Command> {
    COMMANDS.iter().find(|command| command.name == name)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|command| command.name)
}

fn invalid(message: impl Into<String>) -> CommandError {
    CommandError::InvalidArguments(message.into())
}

fn usage(name: &str) -> CommandError {
    let usage = find(name).map_or(name, |command| command.usage);
    invalid(format!("Usage: {usage}"))
}

fn parse_cadence(raw: &str) -> Cadence {
    let cadence = Cadence::parse(raw);
    if !cadence.is_recognized() {
        output::warning(format!(
            "Unrecognized cadence `{raw}`; it will be counted as monthly."
        ));
    }
    cadence
}

fn parse_mode(context: &ShellContext, raw: Option<&str>) -> Result<AggregationMode, CommandError> {
    match raw {
        None => Ok(context.config.aggregation_mode),
        Some(value) => AggregationMode::parse(value)
            .ok_or_else(|| invalid(format!("Unknown mode `{value}`; use recurring or transactions"))),
    }
}

fn cmd_help(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let command = find(&name.to_lowercase())
            .ok_or_else(|| invalid(format!("No such command `{name}`")))?;
        output::info(format!("{}: {}", command.name, command.summary));
        output::info(format!("Usage: {}", command.usage));
        return Ok(());
    }
    output::section("Commands");
    for command in COMMANDS {
        output::info(format!("{:<16} {}", command.name, command.summary));
    }
    Ok(())
}

fn cmd_add_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(usage("add-income"));
    }
    let amount = parse_amount(args[0])?;
    let cadence = parse_cadence(args[1]);
    let record = IncomeRecord::new(amount, cadence).with_description(args[2..].join(" "));
    let monthly = record.monthly_amount();
    context.apply(|state| state.with_income(record))?;
    output::success(format!(
        "Income added ({} per month).",
        format_amount(monthly, &context.config.currency)
    ));
    Ok(())
}

fn cmd_add_expense(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 {
        return Err(usage("add-expense"));
    }
    let amount = parse_amount(args[0])?;
    let cadence = parse_cadence(args[1]);
    let category = args[2].trim();
    if category.is_empty() {
        return Err(invalid("Category must not be empty"));
    }
    let record =
        ExpenseRecord::new(amount, cadence, category).with_description(args[3..].join(" "));
    let monthly = record.monthly_amount();
    context.apply(|state| state.with_expense(record))?;
    output::success(format!(
        "Expense added ({} per month).",
        format_amount(monthly, &context.config.currency)
    ));
    Ok(())
}

fn cmd_add_transaction(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 3 {
        return Err(usage("add-transaction"));
    }
    let kind = TransactionKind::parse(args[0])
        .ok_or_else(|| invalid(format!("Unknown transaction type `{}`", args[0])))?;
    let amount = parse_amount(args[1])?;
    let date = match args.get(3) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| invalid(format!("`{raw}` is not a YYYY-MM-DD date")))?,
        None => context.today(),
    };
    let mut transaction = Transaction::new(kind, amount, args[2].trim(), date);
    if let Some(raw) = args.get(4) {
        transaction = transaction.with_cadence(parse_cadence(raw));
    }
    context.apply(|state| state.with_transaction(transaction))?;
    output::success(format!("Transaction recorded for {date}."));
    Ok(())
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 2 {
        return Err(usage("remove"));
    }
    let number: usize = args[1]
        .parse()
        .map_err(|_| invalid(format!("`{}` is not a list number", args[1])))?;
    let index = number
        .checked_sub(1)
        .ok_or_else(|| invalid("List numbers start at 1"))?;

    let missing = || invalid(format!("No {} numbered {}", args[0], number));
    match args[0].to_lowercase().as_str() {
        "income" => {
            let id = context.state.income.get(index).ok_or_else(missing)?.id;
            context.apply(|state| state.without_income(id))?;
        }
        "expense" => {
            let id = context.state.expenses.get(index).ok_or_else(missing)?.id;
            context.apply(|state| state.without_expense(id))?;
        }
        "transaction" => {
            let id = context.state.transactions.get(index).ok_or_else(missing)?.id;
            context.apply(|state| state.without_transaction(id))?;
        }
        other => return Err(invalid(format!("Unknown entry type `{other}`"))),
    }
    output::success(format!("Removed {} {}.", args[0], number));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let currency = context.config.currency.clone();
    let state = &context.state;

    output::section("Income");
    if state.income.is_empty() {
        output::info("(none)");
    }
    for (idx, record) in state.income.iter().enumerate() {
        output::info(format!(
            "{:>3}. {} {} -> {} / month {}",
            idx + 1,
            format_amount(record.amount, &currency),
            record.cadence.label(),
            format_amount(record.monthly_amount(), &currency),
            record.description
        ));
    }

    output::section("Expenses");
    if state.expenses.is_empty() {
        output::info("(none)");
    }
    for (idx, record) in state.expenses.iter().enumerate() {
        output::info(format!(
            "{:>3}. {} {} [{}] -> {} / month {}",
            idx + 1,
            format_amount(record.amount, &currency),
            record.cadence.label(),
            record.category,
            format_amount(record.monthly_amount(), &currency),
            record.description
        ));
    }

    output::section("Transactions");
    if state.transactions.is_empty() {
        output::info("(none)");
    }
    for (idx, transaction) in state.transactions.iter().enumerate() {
        let cadence = transaction
            .cadence
            .as_ref()
            .map(|cadence| format!(" ({})", cadence))
            .unwrap_or_default();
        output::info(format!(
            "{:>3}. {} {} {} [{}]{}",
            idx + 1,
            transaction.date,
            transaction.kind,
            format_amount(transaction.amount, &currency),
            transaction.category,
            cadence
        ));
    }
    Ok(())
}

fn print_summary(title: &str, summary: &BudgetSummary, currency: &str) {
    output::section(title);
    output::info(format!("Income:   {}", format_amount(summary.total_income, currency)));
    output::info(format!("Expenses: {}", format_amount(summary.total_expenses, currency)));
    output::info(format!("Balance:  {}", format_amount(summary.balance, currency)));
    if summary.balance < 0.0 {
        output::warning("Expenses exceed income.");
    }
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mode = parse_mode(context, args.first().copied())?;
    let summary = SummaryService::current_totals(&context.state, mode);
    let title = match mode {
        AggregationMode::RecurringDefinitions => "Monthly summary",
        AggregationMode::DatedTransactions => "Summary (amounts as entered)",
    };
    print_summary(title, &summary, &context.config.currency);
    Ok(())
}

fn cmd_dashboard(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let view = match args.first() {
        Some(raw) => ViewPeriod::parse(raw)
            .ok_or_else(|| invalid(format!("Unknown view `{raw}`; use weekly or monthly")))?,
        None => context.config.default_view,
    };
    let today = context.today();
    let currency = &context.config.currency;
    let summary = SummaryService::dashboard(&context.state, view);
    print_summary(&format!("Dashboard ({view})"), &summary, currency);
    for entry in summary.by_category.iter() {
        output::info(format!(
            "  {:<14} {} ({:.1}%)",
            entry.label,
            format_amount(entry.amount, currency),
            summary.by_category.share(&entry.category)
        ));
    }

    let window = view.window_ending(today);
    output::section(format!("Transactions {} to {}", window.start, window.end));
    let recent = SummaryService::recent_transactions(&context.state, view, today);
    if recent.is_empty() {
        output::info("(none)");
    }
    for transaction in recent {
        output::info(format!(
            "  {} {} {} [{}]",
            transaction.date,
            transaction.kind,
            format_amount(transaction.amount, currency),
            transaction.category
        ));
    }
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mode = parse_mode(context, args.first().copied())?;
    let summary = SummaryService::current_totals(&context.state, mode);
    output::section("Spending by category");
    if summary.by_category.is_empty() {
        output::info("(no expenses)");
        return Ok(());
    }
    for slice in category_slices(&summary.by_category) {
        output::info(format!(
            "  {:<14} {:>12} {:>6.1}%  {}",
            slice.name,
            format_amount(slice.value, &context.config.currency),
            summary.by_category.share(&slice.name),
            slice.fill
        ));
    }
    Ok(())
}

fn cmd_project(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let start = match args.first() {
        Some(raw) => parse_month_key(raw)
            .ok_or_else(|| invalid(format!("`{raw}` is not a YYYY-MM month")))?,
        None => context.today(),
    };
    let horizon = match args.get(1) {
        Some(raw) => raw
            .parse()
            .map_err(|_| invalid(format!("`{raw}` is not a number of months")))?,
        None => context.config.horizon_months,
    };

    let points = ProjectionService::project(&context.state, horizon, start);
    output::section(format!("Projected savings ({} months)", points.len()));
    for point in &points {
        output::info(format!(
            "{} {} {}",
            point.month_key(),
            point.month_label(),
            format_amount(point.cumulative_amount, &context.config.currency)
        ));
    }

    if let Some(user) = &context.user {
        let records = ProjectionService::records(&context.state, user, horizon, start);
        context.storage.save_projections(user, &records)?;
    }
    Ok(())
}

fn cmd_user(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(user) = args.first().map(|raw| raw.trim().to_string()) else {
        let current = context.user.as_deref().ok_or(CommandError::NoUser)?;
        output::info(format!("Current user: {current}"));
        let known = context.storage.users()?;
        if !known.is_empty() {
            output::info(format!("Stored users: {}", known.join(", ")));
        }
        return Ok(());
    };
    if user.is_empty() {
        return Err(invalid("User id must not be empty"));
    }

    let stored = context.storage.load(&user)?;
    let mut config = context.config.clone();
    config.last_user = Some(user.clone());
    // Switch only once the config is on disk.
    context.config_manager.save(&config)?;

    match &stored {
        Some(_) => output::success(format!("Loaded budget for {user}.")),
        None => output::info(format!("Starting a new budget for {user}.")),
    }
    context.state = stored.unwrap_or_default();
    context.config = config;
    context.user = Some(user);
    Ok(())
}

fn cmd_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = args.first().ok_or_else(|| usage("save"))?;
    save_state_to_path(&context.state, Path::new(path))?;
    output::success(format!("Budget saved to {path}."));
    Ok(())
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = args.first().ok_or_else(|| usage("load"))?;
    let loaded = load_state_from_path(Path::new(path))?;
    for warning in state_warnings(&loaded) {
        output::warning(warning);
    }
    context.apply(|_| loaded)?;
    output::success(format!("Budget loaded from {path}."));
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            let config = &context.config;
            output::section("Configuration");
            output::info(format!("locale           {}", config.locale));
            output::info(format!("currency         {}", config.currency));
            output::info(format!("view             {}", config.default_view));
            output::info(format!("mode             {:?}", config.aggregation_mode));
            output::info(format!("horizon          {}", config.horizon_months));
            output::info(format!("file             {}", context.config_manager.path().display()));
            Ok(())
        }
        [key, value] => {
            context.config.set(key, value)?;
            context.config_manager.save(&context.config)?;
            output::success(format!("Set {key} to {value}."));
            Ok(())
        }
        _ => Err(usage("config")),
    }
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::info(build_info::current().summary());
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cli::context::CliMode,
        config::ConfigManager,
        core::utils::PathResolver,
        ledger::BudgetState,
        storage::{JsonStorage, StateStore},
    };
    use std::fs;
    use tempfile::TempDir;

    fn context_in(base: &Path) -> ShellContext {
        let manager = ConfigManager::with_base_dir(base.to_path_buf()).unwrap();
        let storage = JsonStorage::new(Some(base.to_path_buf())).unwrap();
        ShellContext::with_parts(CliMode::Script, manager, Box::new(storage)).unwrap()
    }

    #[test]
    fn failed_user_switch_keeps_previous_user_and_state() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();
        let store = JsonStorage::new(Some(base.to_path_buf())).unwrap();
        store
            .save(
                "bob",
                &BudgetState::new().with_income(IncomeRecord::new(1.0, Cadence::Monthly)),
            )
            .unwrap();

        let mut context = context_in(base);
        cmd_user(&mut context, &["alice"]).unwrap();
        cmd_add_income(&mut context, &["4000", "monthly"]).unwrap();

        let config_dir = PathResolver::config_dir_in(base);
        fs::remove_dir_all(&config_dir).unwrap();
        fs::write(&config_dir, "not a directory").unwrap();

        assert!(cmd_user(&mut context, &["bob"]).is_err());
        assert_eq!(context.user.as_deref(), Some("alice"));
        assert_eq!(context.config.last_user.as_deref(), Some("alice"));
        assert_eq!(context.state.income[0].amount, 4000.0);

        cmd_add_expense(&mut context, &["5", "monthly", "x"]).unwrap();
        let alice = store.load("alice").unwrap().unwrap();
        assert_eq!(alice.income[0].amount, 4000.0);
        assert_eq!(alice.expenses.len(), 1);
        let bob = store.load("bob").unwrap().unwrap();
        assert_eq!(bob.income[0].amount, 1.0);
        assert!(bob.expenses.is_empty());
    }

    #[test]
    fn every_command_has_a_distinct_name() {
        let mut names: Vec<_> = names().collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(
            find("summary").map(|command| command.usage),
            Some("summary [recurring|transactions]")
        );
        assert!(find("sumary").is_none());
    }
}
