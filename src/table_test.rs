use super::Table;

#[test]
fn reads_headers_and_trimmed_rows() {
    let csv = "Date, Miles ,Service\n5022018, 30123 ,  Oil change \n";
    let table = Table::from_reader(csv.as_bytes()).unwrap();

    assert_eq!(table.headers, vec!["Date", "Miles", "Service"]);
    assert_eq!(table.len(), 1);
    assert_eq!(table.cell(0, 1), "30123");
    assert_eq!(table.cell(0, 2), "Oil change");
}

#[test]
fn ragged_rows_are_accepted() {
    let csv = "a,b,c\n1\n1,2,3,4\n";
    let table = Table::from_reader(csv.as_bytes()).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.cell(0, 0), "1");
    assert_eq!(table.cell(0, 2), "");
    assert_eq!(table.cell(1, 3), "4");
}

#[test]
fn out_of_range_cells_are_empty() {
    let table = Table::from_reader("a\n1\n".as_bytes()).unwrap();
    assert_eq!(table.cell(5, 0), "");
    assert_eq!(table.cell(0, 5), "");
}

#[test]
fn column_lookup_is_exact() {
    let table = Table::from_reader("Date,date\n".as_bytes()).unwrap();
    assert_eq!(table.column("date"), Some(1));
    assert_eq!(table.column("Date"), Some(0));
    assert_eq!(table.column("DATE"), None);
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cardata.csv");

    let err = Table::from_path(&path).unwrap_err().to_string();
    assert!(err.contains("CSV not found"), "unexpected error: {}", err);
    assert!(err.contains("cardata.csv"), "unexpected error: {}", err);
}

#[test]
fn write_then_read_preserves_quoted_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let table = Table {
        headers: vec!["date".into(), "service".into()],
        rows: vec![vec!["05/02/2018".into(), "Oil, filter".into()]],
    };

    table.write_to_path(&path).unwrap();
    let back = Table::from_path(&path).unwrap();
    assert_eq!(back, table);
}
