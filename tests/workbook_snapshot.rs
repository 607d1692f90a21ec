use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde_json::json;

use pedidos::config::TrackerConfig;
use pedidos::report::daily_spend;
use pedidos::session::{Feedback, Session};
use pedidos::source::sources::JsonWorkbook;
use pedidos::source::{DataSource, load_snapshot};
use pedidos::window::WindowPolicy;
use pedidos::{OrderAction, TrackerError};

const HEADERS: [&str; 7] = [
    "PEDIDO",
    "DATA",
    "STATUS",
    "VALOR",
    "UNIDADE",
    "CARRO | UTILIZAÇÃO",
    "FORNECEDOR",
];

/// Tuesday, so the default policy resolves to `29.09 a 03.10`.
fn tuesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 14).unwrap()
}

fn tab(rows: &[[&str; 7]]) -> serde_json::Value {
    let mut grid = vec![json!(["Planilha de pedidos"]), json!(HEADERS)];
    grid.extend(rows.iter().map(|row| json!(row)));
    json!(grid)
}

fn workbook_json() -> serde_json::Value {
    json!({
        "ALTA": tab(&[
            ["100", "14/10/2025", "PAGO", "R$ 100.000,00", "GARAGEM", "24600", "ACME"],
            ["101", "14/10/2025", "PROG. PGTO", "R$ 90.000,50", "OFICINA", "23900", "ACME"],
            ["102", "sem data", "PAGO", "R$ 1,00", "OFICINA", "", ""],
        ]),
        "EMERGENCIAL": tab(&[
            ["100", "14/10/2025", "PENDENTE", "R$ 5.000,00", "GARAGEM", "", ""],
            ["200", "2025-10-14", "ENTREGUE", "R$ 9.000,00", "PATIO", "24600", "BETA"],
        ]),
        "29.09 a 03.10": tab(&[
            ["300", "01/10/2025", "ENTREGUE", "R$ 10,00", "PATIO", "32990", "GAMA"],
        ]),
    })
}

fn write_workbook(dir: &Path, value: &serde_json::Value) -> std::path::PathBuf {
    let path = dir.join("book.json");
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

#[test]
fn loads_primary_and_backup_tabs_in_precedence_order() {
    let temp = tempfile::tempdir().unwrap();
    let path = write_workbook(temp.path(), &workbook_json());
    let workbook = JsonWorkbook::open(&path).unwrap();
    assert_eq!(workbook.origin(), Some(path.as_path()));

    let snapshot = load_snapshot(&workbook, &TrackerConfig::default(), tuesday()).unwrap();
    assert!(snapshot.backup_loaded);
    assert_eq!(snapshot.backup_label(), "29.09 a 03.10");

    let ordered = snapshot.ordered();
    let names: Vec<&str> = ordered.iter().map(|source| source.name()).collect();
    assert_eq!(names, vec!["ALTA", "EMERGENCIAL", "29.09 a 03.10"]);
    assert_eq!(snapshot.get("ALTA").unwrap().records().len(), 2);
}

#[test]
fn session_search_reports_provenance() {
    let temp = tempfile::tempdir().unwrap();
    let path = write_workbook(temp.path(), &workbook_json());
    let workbook = JsonWorkbook::open(&path).unwrap();
    let snapshot = load_snapshot(&workbook, &TrackerConfig::default(), tuesday()).unwrap();
    let ordered = snapshot.ordered();

    let mut session = Session::new();
    let transition = session.search("100, 200 e 300; 999", "24600", &ordered);
    assert_eq!(
        transition.feedback,
        Feedback::Success("Tabela para '24600' adicionada. 4 pedidos processados.".into())
    );

    let tables = session.history().render_all();
    let rows: Vec<(&str, &str, &str)> = tables[0]
        .rows
        .iter()
        .map(|row| (row.identifier.as_str(), row.source.as_str(), row.status.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("100", "ALTA", "PAGO"),
            ("200", "EMERGENCIAL", "ENTREGUE"),
            ("300", "29.09 a 03.10", "ENTREGUE"),
            ("999", "", "Pedido Não Encontrado"),
        ]
    );
    assert_eq!(tables[0].rows[0].date_display(), "14/10/2025");
}

#[test]
fn missing_backup_tab_degrades_to_empty_source() {
    let mut value = workbook_json();
    value.as_object_mut().unwrap().remove("29.09 a 03.10");
    let workbook = JsonWorkbook::from_json_str(&value.to_string()).unwrap();

    let snapshot = load_snapshot(&workbook, &TrackerConfig::default(), tuesday()).unwrap();
    assert!(!snapshot.backup_loaded);
    let backup = snapshot.get("29.09 a 03.10").unwrap();
    assert!(backup.is_empty());
    assert!(!pedidos::find("300", &snapshot.ordered()).is_found());
}

#[test]
fn malformed_backup_tab_degrades_but_primary_tab_fails() {
    let mut value = workbook_json();
    value["29.09 a 03.10"] = json!([["titulo"], ["PEDIDO", "STATUS"], ["1", "PAGO"]]);
    let workbook = JsonWorkbook::from_json_str(&value.to_string()).unwrap();
    let snapshot = load_snapshot(&workbook, &TrackerConfig::default(), tuesday()).unwrap();
    assert!(!snapshot.backup_loaded);

    value["ALTA"] = json!([["titulo"], ["PEDIDO", "VALOR"]]);
    let workbook = JsonWorkbook::from_json_str(&value.to_string()).unwrap();
    match load_snapshot(&workbook, &TrackerConfig::default(), tuesday()) {
        Err(TrackerError::MissingColumns { tab, missing }) => {
            assert_eq!(tab, "ALTA");
            assert_eq!(missing, vec!["DATA", "STATUS"]);
        }
        other => panic!("expected missing columns, got {other:?}"),
    }

    value.as_object_mut().unwrap().remove("EMERGENCIAL");
    let workbook = JsonWorkbook::from_json_str(&value.to_string()).unwrap();
    let config = TrackerConfig {
        primary_tabs: vec!["EMERGENCIAL".into()],
        ..TrackerConfig::default()
    };
    assert!(matches!(
        load_snapshot(&workbook, &config, tuesday()),
        Err(TrackerError::MissingTab { .. })
    ));
}

#[test]
fn config_file_selects_policy_and_limits() {
    let temp = tempfile::tempdir().unwrap();
    let config_path = temp.path().join("tracker.json");
    fs::write(
        &config_path,
        json!({
            "window_policy": "semana_anterior",
            "daily_limits": { "ALTA": 150000.0 }
        })
        .to_string(),
    )
    .unwrap();
    let config = TrackerConfig::from_path(&config_path).unwrap();
    assert_eq!(config.window_policy, WindowPolicy::SemanaAnterior);
    assert_eq!(config.daily_limit("EMERGENCIAL"), None);

    let mut value = workbook_json();
    value["06.10 a 10.10"] = tab(&[["400", "08/10/2025", "PAGO", "", "", "", ""]]);
    let workbook = JsonWorkbook::from_json_str(&value.to_string()).unwrap();
    let snapshot = load_snapshot(&workbook, &config, tuesday()).unwrap();
    assert_eq!(snapshot.backup_label(), "06.10 a 10.10");
    assert!(snapshot.backup_loaded);

    let alta = snapshot.get("ALTA").unwrap();
    let spend = daily_spend(alta as &dyn DataSource, tuesday(), config.daily_limit("ALTA"));
    assert_eq!(spend.count, 2);
    assert!((spend.total - 190_000.5).abs() < 1e-6);
    assert!(spend.exceeded);
}

#[test]
fn annotation_flow_is_independent_of_sources() {
    let mut session = Session::new();
    session.annotate("100 101", OrderAction::ProgPgto, tuesday());
    session.annotate("101", OrderAction::Pago, tuesday());
    assert_eq!(
        session.formatted_output(),
        "100 - PROG. PGTO 14/10 | 101 - PAGO 14/10"
    );
    assert!(session.copy_output().clipboard.is_some());
}
