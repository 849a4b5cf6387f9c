use chart_data::{ColumnId, Dataset, DataValue, DatasetError, Extent, Locator, Row};
use chrono::{DateTime, NaiveDate};
use std::collections::HashSet;

fn keyed_rows() -> Vec<Row> {
    vec![
        Row::keyed([("a", 1), ("b", 4), ("c", 4)]),
        Row::keyed([("a", 4), ("b", 6), ("c", 4)]),
        Row::keyed([("a", -3), ("b", -1), ("c", 0)]),
    ]
}

fn positional_rows() -> Vec<Row> {
    vec![
        Row::positional([1, 4, 4]),
        Row::positional([4, 6, 4]),
        Row::positional([-3, -1, 0]),
    ]
}

fn headers() -> Vec<String> {
    vec!["a".to_string(), "b".to_string(), "c".to_string()]
}

#[test]
fn test_column_names_for_keyed_rows() {
    let rows = keyed_rows();
    let ds = Dataset::new(&rows);

    // Compare as sets, key order is not part of the contract
    let names: HashSet<ColumnId> = ds.column_names().into_iter().collect();
    let expected: HashSet<ColumnId> = ["a", "b", "c"].into_iter().map(ColumnId::from).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_column_names_for_positional_rows() {
    let rows = positional_rows();
    let headers = headers();

    let with_headers = Dataset::with_headers(&rows, &headers);
    assert_eq!(
        with_headers.column_names(),
        vec![
            ColumnId::from("a"),
            ColumnId::from("b"),
            ColumnId::from("c")
        ]
    );

    let without_headers = Dataset::new(&rows);
    assert_eq!(
        without_headers.column_names(),
        vec![ColumnId::Index(0), ColumnId::Index(1), ColumnId::Index(2)]
    );
}

#[test]
fn test_index_and_name_round_trip() {
    let rows = positional_rows();
    let headers = headers();
    let ds = Dataset::with_headers(&rows, &headers);

    for name in &headers {
        let locator = ds.column_index(name).expect("header should resolve");
        assert_eq!(ds.column_name(locator), ColumnId::from(name));
    }

    let rows = keyed_rows();
    let ds = Dataset::new(&rows);
    for name in ["a", "b", "c"] {
        let locator = ds.column_index(name).expect("key should resolve");
        assert_eq!(locator, Locator::Key(name.to_string()));
        assert_eq!(ds.column_name(locator), ColumnId::from(name));
    }
}

#[test]
fn test_unknown_columns_resolve_to_none() {
    let keyed = keyed_rows();
    assert_eq!(Dataset::new(&keyed).column_index("zzz"), None);

    let positional = positional_rows();
    let headers = headers();
    assert_eq!(
        Dataset::with_headers(&positional, &headers).column_index("zzz"),
        None
    );

    // No label-based lookup without headers, even for a valid-looking name
    assert_eq!(Dataset::new(&positional).column_index("a"), None);
    assert_eq!(Dataset::new(&positional).column_index("0"), None);
}

#[test]
fn test_out_of_range_position_echoes_index() {
    let rows = positional_rows();
    let headers = headers();
    let ds = Dataset::with_headers(&rows, &headers);

    assert_eq!(ds.column_name(7usize), ColumnId::Index(7));
    assert_eq!(ds.column_index(7usize), None);
}

#[test]
fn test_value_fn_matches_direct_access() {
    let keyed = keyed_rows();
    let ds = Dataset::new(&keyed);
    for column in ds.column_names() {
        let accessor = ds.value_fn(&column);
        let ColumnId::Name(key) = &column else {
            panic!("keyed columns are named");
        };
        for row in &keyed {
            let Row::Keyed(map) = row else {
                panic!("expected keyed row");
            };
            assert_eq!(accessor.get(row).unwrap(), &map[key]);
        }
    }

    let positional = positional_rows();
    let headers = headers();
    let ds = Dataset::with_headers(&positional, &headers);
    for (pos, name) in headers.iter().enumerate() {
        let accessor = ds.value_fn(name);
        for row in &positional {
            let Row::Positional(values) = row else {
                panic!("expected positional row");
            };
            assert_eq!(accessor.get(row).unwrap(), &values[pos]);
        }
    }
}

#[test]
fn test_extents_across_row_shapes() {
    let keyed = keyed_rows();
    let positional = positional_rows();
    let headers = headers();

    let datasets = [
        (Dataset::new(&keyed), ColumnId::from("a"), ColumnId::from("b")),
        (
            Dataset::with_headers(&positional, &headers),
            ColumnId::from("a"),
            ColumnId::from("b"),
        ),
        (
            Dataset::new(&positional),
            ColumnId::Index(0),
            ColumnId::Index(1),
        ),
    ];

    for (ds, first, second) in &datasets {
        assert_eq!(ds.column_extents(first).unwrap(), Some(Extent::new(-3, 4)));
        assert_eq!(
            ds.combined_column_extents([first, second]).unwrap(),
            Some(Extent::new(-4, 10))
        );
    }
}

#[test]
fn test_unique_values_first_occurrence_order() {
    let rows = keyed_rows();
    let ds = Dataset::new(&rows);
    assert_eq!(
        ds.unique_values("c").unwrap(),
        vec![DataValue::Integer(4), DataValue::Integer(0)]
    );
}

#[test]
fn test_failures_leave_dataset_usable() {
    let rows = positional_rows();
    let headers = headers();
    let ds = Dataset::with_headers(&rows, &headers);

    assert!(ds.column_extents("missing").is_err());
    assert!(ds.combined_column_extents(["a", "missing"]).is_err());

    // Still fully functional afterwards
    assert_eq!(ds.column_extents("c").unwrap(), Some(Extent::new(0, 4)));
}

#[test]
fn test_concurrent_reads() {
    let rows = positional_rows();
    let headers = headers();
    let ds = Dataset::with_headers(&rows, &headers);

    std::thread::scope(|scope| {
        let handles: Vec<_> = headers
            .iter()
            .map(|name| {
                let ds = &ds;
                scope.spawn(move || ds.unique_values(name).unwrap().len())
            })
            .collect();

        let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(counts, vec![3, 3, 2]);
    });
}

#[test]
fn test_extents_with_integers_beyond_float_precision() {
    // 2^53 is the last integer an f64 holds exactly
    let two_53 = 9_007_199_254_740_992_i64;
    let rows = vec![
        Row::positional([DataValue::Float(two_53 as f64)]),
        Row::positional([DataValue::Integer(two_53 + 1)]),
        Row::positional([DataValue::Integer(two_53 - 1)]),
    ];
    let ds = Dataset::new(&rows);

    let extent = ds.column_extents(0usize).unwrap().unwrap();
    assert_eq!(extent.min, DataValue::Integer(two_53 - 1));
    assert_eq!(extent.max, DataValue::Integer(two_53 + 1));
}

#[test]
fn test_zoned_extents_order_by_instant() {
    let parse = |s: &str| DataValue::DateTime(DateTime::parse_from_rfc3339(s).unwrap());
    let headers = vec!["at".to_string()];
    let rows = vec![
        // 05:00 UTC
        Row::positional([parse("2024-01-15T10:00:00+05:00")]),
        // 08:00 UTC
        Row::positional([parse("2024-01-15T08:00:00+00:00")]),
        // 07:00 UTC
        Row::positional([parse("2024-01-15T06:00:00-01:00")]),
    ];
    let ds = Dataset::with_headers(&rows, &headers);

    let extent = ds.column_extents("at").unwrap().unwrap();
    let (DataValue::DateTime(min), DataValue::DateTime(max)) = (&extent.min, &extent.max) else {
        panic!("expected zoned extent, got {:?}", extent);
    };
    assert_eq!(min.to_rfc3339(), "2024-01-15T10:00:00+05:00");
    assert_eq!(max.to_rfc3339(), "2024-01-15T08:00:00+00:00");
}

#[test]
fn test_local_datetime_and_date_extents() {
    let day = |d: u32| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
    let rows = vec![
        Row::keyed([
            ("local", DataValue::from(day(2).and_hms_opt(9, 0, 0).unwrap())),
            ("date", DataValue::from(day(20))),
        ]),
        Row::keyed([
            ("local", DataValue::from(day(1).and_hms_opt(23, 59, 59).unwrap())),
            ("date", DataValue::from(day(5))),
        ]),
        Row::keyed([
            ("local", DataValue::from(day(2).and_hms_opt(9, 0, 1).unwrap())),
            ("date", DataValue::from(day(11))),
        ]),
    ];
    let ds = Dataset::new(&rows);

    assert_eq!(
        ds.column_extents("local").unwrap(),
        Some(Extent::new(
            day(1).and_hms_opt(23, 59, 59).unwrap(),
            day(2).and_hms_opt(9, 0, 1).unwrap()
        ))
    );
    assert_eq!(
        ds.column_extents("date").unwrap(),
        Some(Extent::new(day(5), day(20)))
    );
}

#[test]
fn test_date_mixed_with_datetime_is_type_mismatch() {
    let rows = vec![
        Row::positional([DataValue::from(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())]),
        Row::positional([DataValue::DateTime(
            DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap(),
        )]),
    ];
    let ds = Dataset::new(&rows);

    assert_eq!(
        ds.column_extents(0usize),
        Err(DatasetError::TypeMismatch {
            expected: "datetime".to_string(),
            found: "date".to_string()
        })
    );
}

#[test]
fn test_unique_values_keeps_signed_zeros_apart() {
    let rows = vec![
        Row::positional([0.0]),
        Row::positional([-0.0]),
        Row::positional([0.0]),
    ];
    let ds = Dataset::new(&rows);

    let unique = ds.unique_values(0usize).unwrap();
    assert_eq!(unique.len(), 2);
    let DataValue::Float(second) = unique[1] else {
        panic!("expected float, got {:?}", unique[1]);
    };
    assert!(second.is_sign_negative());
}

#[test]
fn test_index_past_width_on_headered_dataset_fails_consistently() {
    let rows = positional_rows();
    let headers = headers();
    let ds = Dataset::with_headers(&rows, &headers);

    let unresolved = DatasetError::UnresolvedColumn {
        column: "7".to_string(),
    };
    assert_eq!(ds.column_extents(7usize), Err(unresolved.clone()));
    assert_eq!(ds.combined_column_extents([7usize]), Err(unresolved));

    // In-range indexes address the same column as the label
    assert_eq!(
        ds.column_extents(2usize).unwrap(),
        ds.column_extents("c").unwrap()
    );
}
