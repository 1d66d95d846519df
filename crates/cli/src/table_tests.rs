// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn empty_table_renders_nothing() {
    let table = Table::plain(vec![Column::left("JOB")]);
    let mut buf = Vec::new();
    table.render(&mut buf);
    assert!(buf.is_empty());
}

#[test]
fn columns_pad_to_widest_cell() {
    let mut table = Table::plain(vec![Column::left("JOB"), Column::right("STATUS")]);
    table.row(vec!["install-dependencies".to_string(), "ok".to_string()]);
    table.row(vec!["x".to_string(), "completed".to_string()]);
    let mut buf = Vec::new();
    table.render(&mut buf);
    let text = String::from_utf8(buf).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("JOB                  "));
}
