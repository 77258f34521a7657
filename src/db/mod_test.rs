use super::*;
use serde_json::json;

fn catalog(rows: &[(&str, &str, &str)]) -> Vec<(String, String, String)> {
    rows.iter()
        .map(|(t, c, ty)| ((*t).to_owned(), (*c).to_owned(), (*ty).to_owned()))
        .collect()
}

#[test]
fn select_guard_accepts_select_in_any_case() {
    assert!(is_select_query("SELECT * FROM clienti"));
    assert!(is_select_query("  select nome from clienti"));
    assert!(is_select_query("\nSeLeCt 1"));
}

#[test]
fn select_guard_refuses_other_statements() {
    assert!(!is_select_query("DELETE FROM clienti"));
    assert!(!is_select_query("UPDATE clienti SET nome = 'x'"));
    assert!(!is_select_query("WITH x AS (SELECT 1) SELECT * FROM x"));
    assert!(!is_select_query("SEL"));
    assert!(!is_select_query(""));
}

#[test]
fn group_columns_keeps_catalog_order() {
    let tables = group_columns(catalog(&[
        ("clienti", "id", "int"),
        ("clienti", "nome", "varchar(255)"),
        ("ordini", "id", "int"),
    ]));
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].name, "clienti");
    assert_eq!(tables[0].columns.len(), 2);
    assert_eq!(tables[0].columns[1], ColumnSchema { name: "nome".into(), data_type: "varchar(255)".into() });
    assert_eq!(tables[1].name, "ordini");
}

#[test]
fn group_columns_of_empty_catalog_is_empty() {
    assert!(group_columns(Vec::new()).is_empty());
}

#[test]
fn format_schema_lists_tables_and_columns() {
    let tables = group_columns(catalog(&[("clienti", "id", "int"), ("clienti", "nome", "varchar(255)")]));
    assert_eq!(
        format_schema(&tables),
        "Schema Database:\n\nTabella: clienti\nColonne:\n  - id (int)\n  - nome (varchar(255))\n"
    );
}

#[test]
fn format_row_pairs_columns_with_values() {
    let columns = vec!["id".to_owned(), "nome".to_owned(), "nota".to_owned(), "saldo".to_owned()];
    let row = vec![json!(7), json!("Rossi"), Value::Null, json!(12.5)];
    assert_eq!(format_row(&columns, &row), "id: 7, nome: Rossi, nota: NULL, saldo: 12.5");
}

#[test]
fn sql_errors_carry_driver_message() {
    let err = DbError::Sql(sqlx::Error::Protocol("tabella inesistente".into()));
    let message = err.to_string();
    assert!(message.starts_with("Errore MySQL: "));
    assert!(message.contains("tabella inesistente"));
    assert_eq!(DbError::NotSelect.to_string(), "Permesse solo query SELECT.");
}
