//! End-to-end scenarios: classify a raw payload, then render it.

use serde_json::json;

use askviz::render::chart::{replace_chart, ChartModel, ChartStyle};
use askviz::render::table::TableView;
use askviz::render::PALETTE;
use askviz::result::{classify, Classified};

#[test]
fn small_chart_payload_renders_as_proportion_with_palette_colors() {
    let payload = json!({ "labels": ["A", "B", "C"], "values": [1, 2, 3] });
    let data = match classify(&payload).unwrap() {
        Classified::Chart(data) => data,
        other => panic!("expected chart, got {:?}", other),
    };
    let model = ChartModel::build(&data).unwrap();

    assert_eq!(model.style, ChartStyle::Proportion);
    assert_eq!(model.slices.len(), 3);
    assert_eq!(model.slices[0].color, PALETTE[0]);
    assert_eq!(model.slices[1].color, PALETTE[1]);
    assert_eq!(model.slices[2].color, PALETTE[2]);
}

#[test]
fn promoted_two_column_table_renders_as_proportion_chart() {
    let payload = json!({
        "columns": ["cat", "n"],
        "rows": [{"cat": "x", "n": 5}, {"cat": "y", "n": 3}]
    });
    let data = match classify(&payload).unwrap() {
        Classified::Chart(data) => data,
        other => panic!("expected promoted chart, got {:?}", other),
    };
    assert_eq!(data.labels, vec!["x", "y"]);
    assert_eq!(data.values, vec![5.0, 3.0]);

    // two categories is within the proportion threshold
    let model = ChartModel::build(&data).unwrap();
    assert_eq!(model.style, ChartStyle::Proportion);
    assert_eq!(model.slices[0].detail, "x: 5 (63%)");
    assert_eq!(model.slices[1].detail, "y: 3 (38%)");
}

#[test]
fn promoted_table_with_many_rows_renders_as_magnitude_chart() {
    let rows: Vec<_> = (0..8)
        .map(|i| json!({"day": format!("d{}", i), "orders": i}))
        .collect();
    let payload = json!({ "columns": ["day", "orders"], "rows": rows });
    let data = match classify(&payload).unwrap() {
        Classified::Chart(data) => data,
        other => panic!("expected promoted chart, got {:?}", other),
    };
    let model = ChartModel::build(&data).unwrap();
    assert_eq!(model.style, ChartStyle::Magnitude);
    assert!(model.legend.is_none());
    assert!(model.axis.is_some());
    // color wraps after the seventh category
    assert_eq!(model.slices[7].color, PALETTE[0]);
}

#[test]
fn server_error_payload_never_reaches_a_renderer() {
    let payload = json!({ "error": "no such table" });
    assert_eq!(
        classify(&payload).unwrap(),
        Classified::ServerError("no such table".to_string())
    );
}

#[test]
fn array_row_table_renders_positionally() {
    let payload = json!({ "columns": ["a", "b", "c"], "rows": [[1, 2, 3]] });
    let data = match classify(&payload).unwrap() {
        Classified::Table(data) => data,
        other => panic!("expected table, got {:?}", other),
    };
    let view = TableView::build(&data).unwrap();
    assert_eq!(view.header, vec!["a", "b", "c"]);
    assert_eq!(view.body, vec![vec!["1", "2", "3"]]);
}

#[test]
fn identical_payloads_render_identically() {
    let payload = json!({
        "columns": ["producto", "vendidos"],
        "rows": [
            {"producto": "burger", "vendidos": 12},
            {"producto": "fries", "vendidos": 30},
            {"producto": "soda", "vendidos": 18}
        ]
    });

    let build = || -> ChartModel {
        match classify(&payload).unwrap() {
            Classified::Chart(data) => ChartModel::build(&data).unwrap(),
            other => panic!("expected chart, got {:?}", other),
        }
    };
    assert_eq!(build(), build());
}

#[test]
fn replacing_a_chart_with_a_table_question_leaves_one_pane() {
    let chart_payload = json!({ "labels": ["A", "B"], "values": [1, 2] });
    let table_payload = json!({
        "columns": ["name", "price", "stock"],
        "rows": [{"name": "burger", "price": 5.5, "stock": 10}]
    });

    let chart = match classify(&chart_payload).unwrap() {
        Classified::Chart(data) => replace_chart(None, &data).unwrap(),
        other => panic!("expected chart, got {:?}", other),
    };

    // the table cycle takes ownership of (and disposes) the chart
    drop(chart);
    let view = match classify(&table_payload).unwrap() {
        Classified::Table(data) => TableView::build(&data).unwrap(),
        other => panic!("expected table, got {:?}", other),
    };
    assert_eq!(view.header, vec!["name", "price", "stock"]);
    assert_eq!(view.body, vec![vec!["burger", "5.5", "10"]]);
}

#[test]
fn mismatched_lengths_render_the_shorter_side() {
    let payload = json!({ "labels": ["A", "B", "C", "D"], "values": [1, 2] });
    let data = match classify(&payload).unwrap() {
        Classified::Chart(data) => data,
        other => panic!("expected chart, got {:?}", other),
    };
    let model = ChartModel::build(&data).unwrap();
    assert_eq!(model.slices.len(), 2);
}

#[test]
fn unrecognized_payloads_are_reported_not_rendered() {
    for payload in [json!(42), json!("text"), json!({"foo": "bar"}), json!([])] {
        assert_eq!(classify(&payload).unwrap(), Classified::Unrecognized);
    }
}
