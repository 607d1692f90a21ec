use std::error::Error;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum, error::ErrorKind};

use crate::config::TrackerConfig;
use crate::constants::format::SEGMENT_SEPARATOR;
use crate::data::ResultTable;
use crate::history::CriterionSearchHistory;
use crate::normalize::{format_amount, parse_date};
use crate::pedidos::{parse_pedidos, preview_line};
use crate::report::{combined_total, daily_spend};
use crate::source::sources::JsonWorkbook;
use crate::source::{DataSource, load_snapshot};
use crate::style::Column;
use crate::window::{WindowPolicy, resolve_window, today_in};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Retrasada,
    SemanaAnterior,
}

impl From<PolicyArg> for WindowPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Retrasada => WindowPolicy::Retrasada,
            PolicyArg::SemanaAnterior => WindowPolicy::SemanaAnterior,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "pedidos",
    disable_help_subcommand = true,
    about = "Order tracking over a spreadsheet workbook",
    long_about = "Resolve the backup week, parse pedido lists, look pedidos up across the primary and backup tabs, and check daily spend against per-tab limits.",
    after_help = "Workbooks are JSON objects mapping tab names to rows of cells. Set RUST_LOG to see load diagnostics."
)]
struct PedidosCli {
    #[arg(
        long,
        value_name = "PATH",
        global = true,
        help = "Optional JSON configuration file"
    )]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: PedidosCommand,
}

#[derive(Debug, Subcommand)]
enum PedidosCommand {
    /// Print the backup tab name for a date.
    Window {
        #[arg(long, value_parser = parse_date_arg, help = "Reference date (defaults to today)")]
        date: Option<NaiveDate>,
        #[arg(long, value_enum, help = "Override the configured window policy")]
        policy: Option<PolicyArg>,
    },
    /// Extract pedidos from free text.
    Parse {
        #[arg(required = true, help = "Text containing pedido numbers")]
        text: Vec<String>,
    },
    /// Look pedidos up across the workbook tabs.
    Lookup {
        #[arg(long, value_name = "PATH", help = "JSON workbook to read")]
        workbook: PathBuf,
        #[arg(long, default_value = "BACKLOG", help = "Criterion to file the table under")]
        criterion: String,
        #[arg(long, value_parser = parse_date_arg, help = "Reference date (defaults to today)")]
        date: Option<NaiveDate>,
        #[arg(required = true, help = "Text containing pedido numbers")]
        text: Vec<String>,
    },
    /// Daily spend per primary tab, checked against the configured limits.
    Daily {
        #[arg(long, value_name = "PATH", help = "JSON workbook to read")]
        workbook: PathBuf,
        #[arg(long, value_parser = parse_date_arg, help = "Day to total (defaults to today)")]
        date: Option<NaiveDate>,
    },
}

/// Run the `pedidos` command line over `args_iter` (program name excluded).
pub fn run_cli<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) =
        parse_cli::<PedidosCli, _>(std::iter::once("pedidos".to_string()).chain(args_iter))?
    else {
        return Ok(());
    };

    let config = match &cli.config {
        Some(path) => TrackerConfig::from_path(path)?,
        None => TrackerConfig::default(),
    };
    config.validate()?;
    let reference = |date: Option<NaiveDate>| match date {
        Some(date) => Ok(date),
        None => today_in(config.utc_offset_minutes),
    };

    match cli.command {
        PedidosCommand::Window { date, policy } => {
            let today = reference(date)?;
            let policy = policy.map(Into::into).unwrap_or(config.window_policy);
            let window = resolve_window(today, policy);
            println!("{}", window.label());
        }
        PedidosCommand::Parse { text } => {
            println!("{}", preview_line(&text.join(" ")));
        }
        PedidosCommand::Lookup {
            workbook,
            criterion,
            date,
            text,
        } => {
            let today = reference(date)?;
            let workbook = JsonWorkbook::open(&workbook)?;
            let snapshot = load_snapshot(&workbook, &config, today)?;
            if !snapshot.backup_loaded {
                println!("Backup tab '{}' unavailable", snapshot.backup_label());
            }
            let ordered = snapshot.ordered();
            let mut history = CriterionSearchHistory::new();
            history.search_and_file(&parse_pedidos(&text.join(" ")), &criterion, &ordered)?;
            for table in history.render_all() {
                print_table(&table);
            }
        }
        PedidosCommand::Daily { workbook, date } => {
            let today = reference(date)?;
            let workbook = JsonWorkbook::open(&workbook)?;
            let snapshot = load_snapshot(&workbook, &config, today)?;
            println!("Daily spend on {}", today.format("%d/%m/%Y"));
            let spends: Vec<_> = config
                .primary_tabs
                .iter()
                .filter_map(|tab| {
                    let source = snapshot.get(tab)?;
                    Some(daily_spend(source as &dyn DataSource, today, config.daily_limit(tab)))
                })
                .collect();
            for spend in &spends {
                let marker = if spend.exceeded { "  LIMIT EXCEEDED" } else { "" };
                println!(
                    "  {:<14} {:>16} / {:<16} ({} pedidos){marker}",
                    spend.source,
                    format_amount(Some(spend.total)),
                    format_amount(spend.limit),
                    spend.count,
                );
            }
            let (total, count) = combined_total(&spends);
            println!(
                "  {:<14} {:>16}   {:<16} ({count} pedidos)",
                "TOTAL GERAL DO DIA",
                format_amount(Some(total)),
                ""
            );
        }
    }
    Ok(())
}

fn print_table(table: &ResultTable) {
    println!(
        "=== {} ({} of {} found) ===",
        table.criterion,
        table.found_count(),
        table.rows.len()
    );
    let header: Vec<&str> = Column::ALL.iter().map(|column| column.header()).collect();
    println!("{}", header.join(SEGMENT_SEPARATOR));
    for row in &table.rows {
        let cells: Vec<String> = Column::ALL.iter().map(|column| column.cell(row)).collect();
        println!("{}", cells.join(SEGMENT_SEPARATOR));
    }
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw)
        .ok_or_else(|| format!("could not parse '{raw}' as a date (dd/mm/yyyy or yyyy-mm-dd)"))
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> impl Iterator<Item = String> {
        values
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn policy_arg_maps_to_window_policy() {
        assert_eq!(WindowPolicy::from(PolicyArg::Retrasada), WindowPolicy::Retrasada);
        assert_eq!(
            WindowPolicy::from(PolicyArg::SemanaAnterior),
            WindowPolicy::SemanaAnterior
        );
    }

    #[test]
    fn date_arg_accepts_both_layouts() {
        let expected = NaiveDate::from_ymd_opt(2025, 10, 13).unwrap();
        assert_eq!(parse_date_arg("13/10/2025"), Ok(expected));
        assert_eq!(parse_date_arg("2025-10-13"), Ok(expected));
        assert!(parse_date_arg("amanhã").is_err());
    }

    #[test]
    fn parses_window_subcommand() {
        let cli = PedidosCli::try_parse_from([
            "pedidos",
            "window",
            "--date",
            "2025-10-14",
            "--policy",
            "semana-anterior",
        ])
        .unwrap();
        match cli.command {
            PedidosCommand::Window { date, policy } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 10, 14));
                assert!(matches!(policy, Some(PolicyArg::SemanaAnterior)));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn help_is_not_an_error() {
        assert!(run_cli(args(&["--help"])).is_ok());
    }

    #[test]
    fn runs_window_and_parse() {
        assert!(run_cli(args(&["window", "--date", "13/10/2025"])).is_ok());
        assert!(run_cli(args(&["parse", "Pedido", "123,", "045"])).is_ok());
        assert!(run_cli(args(&["lookup", "--workbook", "/nonexistent/book.json", "1"])).is_err());
    }

    #[test]
    fn runs_daily_over_a_workbook_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("book.json");
        let header = r#"["titulo"], ["PEDIDO", "DATA", "STATUS", "VALOR"]"#;
        std::fs::write(
            &path,
            format!(
                r#"{{"ALTA": [{header}, ["1", "14/10/2025", "PAGO", "R$ 10,00"]],
                   "EMERGENCIAL": [{header}, ["2", "14/10/2025", "PAGO", "R$ 5,00"]]}}"#
            ),
        )
        .unwrap();
        let workbook = path.to_string_lossy().to_string();
        let daily = ["daily", "--workbook", workbook.as_str(), "--date", "14/10/2025"];
        assert!(run_cli(args(&daily)).is_ok());
    }
}
