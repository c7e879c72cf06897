//! Command-line reports over a case file.

pub mod format;
pub mod output;
pub mod table;

use std::env;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use crate::case::CaseFile;
use crate::config::{ConfigManager, Settings};
use crate::enforcement::{
    arrearage_totals, compliance_report, reconcile, violations, PaymentLedger, Reconciliation,
};
use crate::errors::CliError;
use crate::schedule::{combined_payment_schedule, CombinedPlan, ScheduleEntry, StepInterval};
use crate::utils::{build_info, parse_flexible_date};

use output::OutputPreferences;

pub const USAGE: &str = "\
Usage: support_enforcement_cli <command> <case.json> [--as-of YYYY-MM-DD] [--json]

Commands:
  stepdown     Child support amount per step-down interval
  schedule     Every amount that has fallen due
  report       Amounts due with payments applied
  violations   Amounts due that are still unpaid
  arrearage    Unpaid totals per obligation
  compliance   Running balance of dues and payments
  version      Build information";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Stepdown,
    Schedule,
    Report,
    Violations,
    Arrearage,
    Compliance,
    Version,
    Help,
}

impl Command {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "stepdown" => Some(Command::Stepdown),
            "schedule" => Some(Command::Schedule),
            "report" => Some(Command::Report),
            "violations" => Some(Command::Violations),
            "arrearage" => Some(Command::Arrearage),
            "compliance" => Some(Command::Compliance),
            "version" | "--version" | "-V" => Some(Command::Version),
            "help" | "--help" | "-h" => Some(Command::Help),
            _ => None,
        }
    }

    fn needs_case(&self) -> bool {
        !matches!(self, Command::Version | Command::Help)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: Command,
    pub case_path: Option<PathBuf>,
    pub as_of: Option<NaiveDate>,
    pub json: bool,
}

impl CliArgs {
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let command = match args.next() {
            Some(name) => Command::parse(&name).ok_or(CliError::UnknownCommand(name))?,
            None => Command::Help,
        };

        let mut parsed = CliArgs {
            command,
            case_path: None,
            as_of: None,
            json: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--json" => parsed.json = true,
                "--as-of" => {
                    let raw = args
                        .next()
                        .ok_or_else(|| CliError::Input("--as-of needs a date".into()))?;
                    let date = parse_flexible_date(&raw)
                        .ok_or_else(|| CliError::Input(format!("`{raw}` is not a valid date")))?;
                    parsed.as_of = Some(date);
                }
                flag if flag.starts_with("--") => {
                    return Err(CliError::Input(format!("unknown option `{flag}`")));
                }
                _ if parsed.case_path.is_none() => parsed.case_path = Some(PathBuf::from(&arg)),
                _ => return Err(CliError::Input(format!("unexpected argument `{arg}`"))),
            }
        }

        if parsed.command.needs_case() && parsed.case_path.is_none() {
            return Err(CliError::Input("missing case file path".into()));
        }
        Ok(parsed)
    }
}

/// Entry point for the binary: reads process arguments and settings.
pub fn run_cli() -> Result<(), CliError> {
    let args = CliArgs::parse(env::args().skip(1))?;
    output::set_preferences(OutputPreferences {
        plain_mode: env::var_os("NO_COLOR").is_some(),
        quiet_mode: args.json,
    });
    let settings = ConfigManager::new()?.load()?;
    let as_of = args
        .as_of
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    run(&args, &settings, as_of)
}

pub fn run(args: &CliArgs, settings: &Settings, as_of: NaiveDate) -> Result<(), CliError> {
    let case_path = match (args.command, args.case_path.as_deref()) {
        (Command::Help, _) => {
            println!("{USAGE}");
            return Ok(());
        }
        (Command::Version, _) => {
            println!("{}", build_info::current().summary());
            return Ok(());
        }
        (_, Some(path)) => path,
        (_, None) => return Err(CliError::Input("missing case file path".into())),
    };

    let evaluation = Evaluation::load(case_path, settings, as_of)?;
    tracing::debug!(
        command = ?args.command,
        %as_of,
        entries = evaluation.schedule.len(),
        payments = evaluation.ledger.payments.len(),
        "evaluating case"
    );
    if !args.json {
        evaluation.report_parse_warnings();
    }

    match args.command {
        Command::Stepdown => emit(args.json, &evaluation.steps, || {
            format::stepdown_table(&evaluation.steps).render()
        }),
        Command::Schedule => emit(args.json, &evaluation.schedule, || {
            format::schedule_table(&evaluation.schedule).render()
        }),
        Command::Report => {
            let reconciliation = evaluation.reconcile();
            emit(args.json, &reconciliation, || {
                format::reconciliation_table(&reconciliation.rows).render()
            })?;
            if !args.json {
                for (description, amount) in &reconciliation.unapplied {
                    output::warning(format!(
                        "{} toward {} could not be applied",
                        format::format_dollars(*amount),
                        description
                    ));
                }
            }
            Ok(())
        }
        Command::Violations => {
            let late = violations(&evaluation.reconcile().rows);
            if late.is_empty() && !args.json {
                output::success(format!("No unpaid obligations as of {as_of}."));
                return Ok(());
            }
            emit(args.json, &late, || format::reconciliation_table(&late).render())
        }
        Command::Arrearage => {
            let summary = arrearage_totals(&evaluation.reconcile().rows);
            emit(args.json, &summary, || format::arrearage_table(&summary).render())
        }
        Command::Compliance => {
            let lines = compliance_report(&evaluation.schedule, &evaluation.ledger.payments);
            emit(args.json, &lines, || format::compliance_table(&lines).render())
        }
        Command::Version | Command::Help => Ok(()),
    }
}

fn emit<T, F>(json: bool, value: &T, render: F) -> Result<(), CliError>
where
    T: Serialize + ?Sized,
    F: FnOnce() -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", render());
    }
    Ok(())
}

/// A case resolved into its step-downs, schedule and payments.
struct Evaluation {
    steps: Vec<StepInterval>,
    schedule: Vec<ScheduleEntry>,
    ledger: PaymentLedger,
}

impl Evaluation {
    fn load(path: &Path, settings: &Settings, as_of: NaiveDate) -> Result<Self, CliError> {
        let case = CaseFile::load(path)?;
        let plan: CombinedPlan = case.plan(settings.default_payment_interval)?;
        let calculator = settings.calculator();
        let steps = calculator.stepdown(
            &plan.children,
            plan.child_support,
            plan.num_children_not_before_court,
        );
        let schedule = combined_payment_schedule(&plan, &calculator, as_of);
        Ok(Self {
            steps,
            schedule,
            ledger: case.payment_ledger(),
        })
    }

    fn reconcile(&self) -> Reconciliation {
        reconcile(&self.schedule, &self.ledger.payments)
    }

    fn report_parse_warnings(&self) {
        for warning in &self.ledger.warnings {
            output::warning(format!(
                "payment line {} skipped ({}): {}",
                warning.line_number, warning.reason, warning.line
            ));
        }
    }
}
