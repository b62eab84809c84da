use crate::table::Table;
use crate::test_helpers::TestDir;

const RAW: &str = "\
date,mileage,service
5022018,30123,Oil change
12052018,35200,Tire rotation
garbage,36000,Wipers
,37000,Coolant
";

#[test]
fn rewrites_tokens_as_us_dates() {
    let test_dir = TestDir::new();
    test_dir.write_file("cardata.csv", RAW);

    super::run(&test_dir.workspace(), "date").unwrap();

    let table = Table::from_path(&test_dir.path().join("cardata.csv")).unwrap();
    let dates: Vec<&str> = (0..table.len()).map(|r| table.cell(r, 0)).collect();
    assert_eq!(dates, vec!["05/02/2018", "12/05/2018", "", ""]);
    assert_eq!(table.cell(2, 2), "Wipers");
}

#[test]
fn second_run_is_a_no_op() {
    let test_dir = TestDir::new();
    test_dir.write_file("cardata.csv", RAW);
    let ws = test_dir.workspace();

    super::run(&ws, "date").unwrap();
    let once = test_dir.read_file("cardata.csv");
    super::run(&ws, "date").unwrap();

    assert_eq!(test_dir.read_file("cardata.csv"), once);
}

#[test]
fn counts_fixed_and_cleared_cells() {
    let mut table = Table::from_reader(RAW.as_bytes()).unwrap();
    assert_eq!(super::normalize_column(&mut table, "date").unwrap(), (2, 1));
}

#[test]
fn short_rows_are_padded() {
    let mut table = Table::from_reader("a,date\n1\n".as_bytes()).unwrap();
    super::normalize_column(&mut table, "date").unwrap();
    assert_eq!(table.rows[0], vec!["1", ""]);
}

#[test]
fn missing_column_is_an_error() {
    let test_dir = TestDir::new();
    test_dir.write_file("cardata.csv", RAW);

    let err = super::run(&test_dir.workspace(), "Date").unwrap_err().to_string();
    assert!(err.contains("Column 'Date' not found"), "unexpected error: {}", err);
    assert_eq!(test_dir.read_file("cardata.csv"), RAW);
}
