//! Shared helpers for benchmarks

use datagrid::config::GridConfig;
use datagrid::model::row::Row;
use datagrid::model::value::CellValue;
use datagrid::model::GridModel;

const ROLES: &[&str] = &["admin", "developer", "designer", "manager", "analyst"];
const CITIES: &[&str] = &["Oslo", "Bergen", "Lisbon", "Austin", "Kyoto", "Nairobi"];

/// Deterministic row with every baseline field filled
pub fn make_row(i: usize) -> Row {
    Row::new(format!("{}", i + 1))
        .with("name", CellValue::Text(format!("User {:05}", (i * 7919) % 100_000)))
        .with("email", CellValue::Email(format!("user{}@example.com", i)))
        .with("age", CellValue::Number(18.0 + (i * 31 % 60) as f64))
        .with("role", CellValue::Text(ROLES[i % ROLES.len()].to_string()))
        .with("gender", CellValue::Text(if i % 2 == 0 { "F" } else { "M" }.to_string()))
        .with("city", CellValue::Text(CITIES[i % CITIES.len()].to_string()))
}

/// Create a GridModel with the specified number of rows
#[allow(dead_code)]
pub fn make_model(rows: usize) -> GridModel {
    GridModel::with_rows(GridConfig::default(), (0..rows).map(make_row).collect())
}

/// CSV text with a header and the specified number of rows
#[allow(dead_code)]
pub fn make_csv(rows: usize) -> String {
    let mut out = String::from("id,name,email,age,role,gender,city\n");
    for i in 0..rows {
        out.push_str(&format!(
            "{},User {},user{}@example.com,{},{},{},\"{}, NO\"\n",
            i + 1,
            i,
            i,
            18 + i % 60,
            ROLES[i % ROLES.len()],
            if i % 2 == 0 { "F" } else { "M" },
            CITIES[i % CITIES.len()]
        ));
    }
    out
}
