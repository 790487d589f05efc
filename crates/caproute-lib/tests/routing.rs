mod common;

use caproute_lib::{
    bundled_graph, find_cheapest_path, CheapestTrip, LogKind, ShortestDistance, TraceRecorder,
    TraversalParameters,
};

use common::{assert_close, toll_trap_graph, triangle_graph, without_tolls};

fn cheapest(price: f64, efficiency: f64) -> CheapestTrip {
    CheapestTrip::new(TraversalParameters::new(price, efficiency))
}

#[test]
fn cheapest_route_through_toll_city() {
    let graph = triangle_graph();
    let mut trace = TraceRecorder::new();
    let result =
        find_cheapest_path(&graph, "A", "C", &cheapest(5.0, 10.0), &mut trace).expect("search");

    assert_eq!(result.path, vec!["A", "B", "C"]);
    assert_close(result.total_distance, 15.0);
    assert_close(result.total_toll, 2.0);
    assert_close(result.total_fuel_cost, 7.5);
    assert_close(result.total_cost, 9.5);
    assert_eq!(result.hop_count(), 2);
}

#[test]
fn isolated_city_is_unreachable() {
    let graph = triangle_graph();
    let mut trace = TraceRecorder::new();
    let result =
        find_cheapest_path(&graph, "A", "D", &cheapest(5.0, 10.0), &mut trace).expect("search");

    assert!(!result.is_reachable());
    assert!(result.path.is_empty());
    assert_eq!(result.total_cost, 0.0);

    let last = trace.drain().last().expect("trace is not empty");
    assert_eq!(last.kind, LogKind::Error);
    assert!(last.message.contains("\"A\"") && last.message.contains("\"D\""));
}

#[test]
fn unknown_endpoint_is_an_error() {
    let graph = triangle_graph();
    let mut trace = TraceRecorder::new();
    let err = find_cheapest_path(&graph, "A", "Z", &cheapest(5.0, 10.0), &mut trace)
        .expect_err("unknown goal");
    assert!(format!("{err}").contains("unknown city name: Z"));
    assert!(trace.is_empty(), "nothing is traced before endpoints resolve");
}

#[test]
fn cost_and_distance_objectives_diverge_on_tolls() {
    let graph = toll_trap_graph();
    let params = TraversalParameters::new(5.0, 10.0);

    let mut trace = TraceRecorder::new();
    let by_cost = find_cheapest_path(&graph, "A", "D", &CheapestTrip::new(params), &mut trace)
        .expect("search");
    assert_eq!(by_cost.path, vec!["A", "C", "D"]);
    assert_close(by_cost.total_cost, 15.0);

    let mut trace = TraceRecorder::new();
    let by_distance =
        find_cheapest_path(&graph, "A", "D", &ShortestDistance::new(params), &mut trace)
            .expect("search");
    assert_eq!(by_distance.path, vec!["A", "B", "D"]);
    assert_close(by_distance.total_distance, 20.0);
    assert_close(by_distance.total_toll, 100.0);
    assert_close(by_distance.total_cost, 110.0);
}

#[test]
fn equal_cost_ties_keep_first_predecessor() {
    let graph = caproute_lib::Graph::from_table(common::table(&[
        ("S", 0.0, &[("Y", 5.0), ("X", 5.0)]),
        ("X", 0.0, &[("S", 5.0), ("T", 5.0)]),
        ("Y", 0.0, &[("S", 5.0), ("T", 5.0)]),
        ("T", 0.0, &[("X", 5.0), ("Y", 5.0)]),
    ]))
    .expect("diamond graph");

    let mut trace = TraceRecorder::new();
    let result =
        find_cheapest_path(&graph, "S", "T", &cheapest(1.0, 1.0), &mut trace).expect("search");
    assert_eq!(result.path, vec!["S", "X", "T"]);

    let analyzed: Vec<_> = trace
        .drain()
        .iter()
        .filter(|entry| entry.kind == LogKind::Highlight)
        .filter_map(|entry| entry.message.strip_prefix("Analyzing: "))
        .collect();
    assert_eq!(analyzed, vec!["S", "X", "Y", "T"]);
}

#[test]
fn trace_records_search_decisions() {
    let graph = triangle_graph();
    let mut trace = TraceRecorder::new();
    find_cheapest_path(&graph, "A", "C", &cheapest(5.0, 10.0), &mut trace).expect("search");

    let messages: Vec<_> = trace.drain().iter().map(|e| e.message.as_str()).collect();
    assert!(messages[0].contains("from \"A\" to \"C\""));
    assert!(messages.contains(&"Fuel price: 5.00/L"));
    assert!(messages.contains(&"Fuel efficiency: 10.00 km/L"));
    assert!(messages.contains(&"Analyzing: A"));
    assert!(messages.contains(&"Exploring: B"));
    assert!(messages.contains(&"Destination \"C\" reached!"));
    assert!(messages.contains(&"Best route found: A → B → C"));
    assert_eq!(messages.last(), Some(&"Total trip cost: 9.50"));
}

#[test]
fn dead_end_records_warning() {
    let graph = triangle_graph();
    let mut trace = TraceRecorder::new();
    find_cheapest_path(&graph, "A", "D", &cheapest(5.0, 10.0), &mut trace).expect("search");

    assert!(trace
        .drain()
        .iter()
        .any(|entry| entry.kind == LogKind::Warning && entry.message.contains("from C")));
}

#[test]
fn bundled_route_recife_to_salvador() {
    let graph = bundled_graph().expect("bundled graph");
    let mut trace = TraceRecorder::new();
    let result = find_cheapest_path(&graph, "Recife", "Salvador", &cheapest(5.0, 10.0), &mut trace)
        .expect("search");

    assert_eq!(result.path, vec!["Recife", "Maceió", "Aracaju", "Salvador"]);
    assert_close(result.total_distance, 935.0);
    assert_close(result.total_toll, 10.0);
    assert_close(result.total_fuel_cost, 467.5);
    assert!((result.total_cost - 477.5).abs() < 1e-6);
}

#[test]
fn macapa_has_no_road_connection() {
    let graph = bundled_graph().expect("bundled graph");
    let mut trace = TraceRecorder::new();
    let result = find_cheapest_path(&graph, "Manaus", "Macapá", &cheapest(5.0, 10.0), &mut trace)
        .expect("search");
    assert!(!result.is_reachable());
}

#[test]
fn total_distance_matches_edge_sum() {
    let graph = bundled_graph().expect("bundled graph");
    let model = cheapest(5.0, 10.0);

    for start in graph.nodes() {
        for goal in graph.nodes().filter(|goal| *goal != start) {
            let mut trace = TraceRecorder::new();
            let result = find_cheapest_path(&graph, start, goal, &model, &mut trace)
                .expect("search");
            if !result.is_reachable() {
                continue;
            }

            let edge_sum: f64 = result
                .path
                .windows(2)
                .map(|pair| graph.distance(&pair[0], &pair[1]).expect("edge exists"))
                .sum();
            assert!(
                (result.total_distance - edge_sum).abs() < 1e-6,
                "{start} -> {goal}: {} != {edge_sum}",
                result.total_distance
            );
        }
    }
}

#[test]
fn toll_free_cost_search_matches_distance_search() {
    let graph = without_tolls(&bundled_graph().expect("bundled graph"));
    let params = TraversalParameters::new(1.0, 1.0);
    let by_cost = CheapestTrip::new(params);
    let by_distance = ShortestDistance::new(params);

    for start in graph.nodes() {
        for goal in graph.nodes().filter(|goal| *goal != start) {
            let mut trace = TraceRecorder::new();
            let cost_result =
                find_cheapest_path(&graph, start, goal, &by_cost, &mut trace).expect("search");
            let mut trace = TraceRecorder::new();
            let distance_result =
                find_cheapest_path(&graph, start, goal, &by_distance, &mut trace).expect("search");

            assert_eq!(cost_result.path, distance_result.path, "{start} -> {goal}");
        }
    }
}

#[test]
fn higher_fuel_price_never_lowers_cost() {
    let graph = bundled_graph().expect("bundled graph");
    let low = cheapest(5.0, 10.0);
    let high = cheapest(6.5, 10.0);

    for goal in graph.nodes().filter(|goal| *goal != "Porto Alegre") {
        let mut trace = TraceRecorder::new();
        let low_result =
            find_cheapest_path(&graph, "Porto Alegre", goal, &low, &mut trace).expect("search");
        let high_result =
            find_cheapest_path(&graph, "Porto Alegre", goal, &high, &mut trace).expect("search");

        assert!(
            high_result.total_cost + 1e-9 >= low_result.total_cost,
            "Porto Alegre -> {goal}"
        );
    }
}

#[test]
fn overflowing_hop_cost_is_an_error() {
    let graph = triangle_graph();
    let mut trace = TraceRecorder::new();
    let err = find_cheapest_path(&graph, "A", "C", &cheapest(1e308, 1e-10), &mut trace)
        .expect_err("fuel cost overflows");

    assert!(matches!(
        err,
        caproute_lib::Error::CostOverflow { ref from, ref to } if from == "A" && to == "B"
    ));
    assert_eq!(trace.drain().last().map(|entry| entry.kind), Some(LogKind::Error));
}
