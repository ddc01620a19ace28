use labweek::{ColumnSeries, DatasetError, RegressionError, fit, load_table};
use std::io::Write;

fn write_csv(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("create temp csv");
    file.write_all(content.as_bytes()).expect("write csv");
    file.flush().expect("flush csv");
    file
}

#[test]
fn csv_loads_with_headers_and_text_cells() {
    let file = write_csv("tempo,distancia\n1,\"2,1 ± 0,1\"\n2,\"3,9\"\n3,6.2\n4,abc\n");
    let df = load_table(file.path()).expect("load");

    assert_eq!(df.height(), 4);
    let names: Vec<String> = df
        .get_columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    assert_eq!(names, vec!["tempo", "distancia"]);
}

#[test]
fn extraction_parses_pairs_and_marks_missing_cells() {
    let file = write_csv("tempo,distancia\n1,\"2,1 ± 0,1\"\n2,\"3,9\"\n3,6.2\n4,abc\n");
    let df = load_table(file.path()).expect("load");

    let xs = ColumnSeries::extract(&df, "tempo").expect("x column");
    assert_eq!(xs.values, vec![1.0, 2.0, 3.0, 4.0]);
    assert!(!xs.has_errors());

    let ys = ColumnSeries::extract(&df, "distancia").expect("y column");
    assert_eq!(ys.values[0], 2.1);
    assert_eq!(ys.errors[0], Some(0.1));
    assert_eq!(ys.values[1], 3.9);
    assert_eq!(ys.values[2], 6.2);
    assert!(ys.values[3].is_nan());
    assert!(ys.has_errors());
}

#[test]
fn missing_column_is_a_readable_error() {
    let file = write_csv("a,b\n1,2\n");
    let df = load_table(file.path()).expect("load");
    let err = ColumnSeries::extract(&df, "c").unwrap_err();
    assert!(matches!(err, DatasetError::MissingColumn(_)));
    assert!(err.to_string().contains("no column named 'c'"));
}

#[test]
fn unparseable_cells_later_break_the_fit_not_the_load() {
    let file = write_csv("x,y\n1,2\n2,oops\n3,6\n");
    let df = load_table(file.path()).expect("load");
    let xs = ColumnSeries::extract(&df, "x").expect("x");
    let ys = ColumnSeries::extract(&df, "y").expect("y");

    let err = fit(&xs.values, &ys.values).unwrap_err();
    assert_eq!(err, RegressionError::NonFinite { index: 1 });
}

#[test]
fn reciprocal_of_zero_surfaces_at_fit_time() {
    let ys = ColumnSeries {
        name: "y".to_string(),
        values: vec![0.0, 1.0, 2.0],
        errors: vec![None, None, None],
    }
    .reciprocal();
    let err = fit(&[1.0, 2.0, 3.0], &ys.values).unwrap_err();
    assert_eq!(err, RegressionError::NonFinite { index: 0 });
}

#[test]
fn csv_and_loader_preserve_row_order() {
    let file = write_csv("x,y\n9,1\n1,2\n5,3\n");
    let df = load_table(file.path()).expect("load");
    let xs = ColumnSeries::extract(&df, "x").expect("x");
    assert_eq!(xs.values, vec![9.0, 1.0, 5.0]);
}
