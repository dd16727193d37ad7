mod common;

use std::thread;

use routefinder_lib::search::SearchContext;
use routefinder_lib::{
    select_strategy, solve, solve_with_options, Problem, SearchOptions, Strategy,
};

use common::{fixture, problem};

const FIXTURES: [&str; 7] = [
    "linear.txt",
    "diamond.txt",
    "cycle.txt",
    "no_solution.txt",
    "multi_destination.txt",
    "misleading.txt",
    "sample.txt",
];

fn discovered(problem: &Problem, strategy: Strategy) -> Vec<Vec<i64>> {
    let context = SearchContext::new(
        &problem.graph,
        &problem.coordinates,
        problem.origin,
        &problem.destinations,
    );
    select_strategy(strategy, &SearchOptions::default())
        .search(&context)
        .expect("search succeeds")
        .solutions
        .into_iter()
        .map(|solution| solution.path)
        .collect()
}

#[test]
fn breadth_first_discovers_a_hop_minimal_path_first() {
    // The direct edge 1->5 is one hop but costs more than the three-hop route.
    let problem = fixture("diamond.txt");
    let paths = discovered(&problem, Strategy::BreadthFirst);
    assert_eq!(paths[0], vec![1, 5]);
    assert!(paths.iter().all(|path| path.len() >= paths[0].len()));
}

#[test]
fn uniform_cost_and_a_star_agree_on_cost() {
    for name in FIXTURES {
        let problem = fixture(name);
        let ucs = solve(&problem, Strategy::UniformCost).expect("ucs succeeds");
        let astar = solve(&problem, Strategy::AStar).expect("a* succeeds");
        assert_eq!(ucs.best_cost, astar.best_cost, "{name}");
        assert_eq!(ucs.best_goal, astar.best_goal, "{name}");
    }
}

#[test]
fn no_strategy_beats_uniform_cost() {
    for name in FIXTURES {
        let problem = fixture(name);
        let optimal = solve(&problem, Strategy::UniformCost)
            .expect("ucs succeeds")
            .best_cost;
        for strategy in Strategy::ALL {
            let cost = solve(&problem, strategy).expect("search succeeds").best_cost;
            match (optimal, cost) {
                (Some(optimal), Some(cost)) => assert!(cost >= optimal, "{name} {strategy}"),
                (None, None) => {}
                other => panic!("{name} {strategy}: solvability differs: {other:?}"),
            }
        }
    }
}

#[test]
fn sample_fixture_prefers_cheapest_destination() {
    let problem = fixture("sample.txt");
    let outcome = solve(&problem, Strategy::UniformCost).expect("search succeeds");
    assert_eq!(outcome.best_goal, Some(5));
    assert_eq!(outcome.best_path, vec![2, 3, 5]);
    assert_eq!(outcome.best_cost, Some(10.0));
    assert_eq!(outcome.second_goal, Some(4));
    assert_eq!(outcome.second_path, vec![2, 1, 4]);
    assert_eq!(outcome.second_cost, Some(11.0));
}

#[test]
fn runs_are_idempotent() {
    for name in FIXTURES {
        let problem = fixture(name);
        for strategy in Strategy::ALL {
            let first = solve(&problem, strategy).expect("search succeeds");
            let second = solve(&problem, strategy).expect("search succeeds");
            assert_eq!(first, second, "{name} {strategy}");
        }
    }
}

#[test]
fn equal_priorities_expand_lower_id_first() {
    // Two symmetric routes 1-2-4 and 1-3-4 with identical cost and heuristic.
    let problem = problem(
        &[(1, 3, 2.0), (1, 2, 2.0), (3, 4, 2.0), (2, 4, 2.0)],
        &[(1, 0.0, 0.0), (2, 1.0, 1.0), (3, 1.0, -1.0), (4, 2.0, 0.0)],
        1,
        &[4],
    );

    for strategy in Strategy::ALL {
        let paths = discovered(&problem, strategy);
        assert_eq!(paths[0], vec![1, 2, 4], "{strategy}");

        let outcome = solve(&problem, strategy).expect("search succeeds");
        assert_eq!(outcome.best_path, vec![1, 2, 4], "{strategy}");
    }
}

#[test]
fn greedy_first_discovery_can_be_suboptimal() {
    let problem = fixture("misleading.txt");
    let paths = discovered(&problem, Strategy::GreedyBestFirst);
    assert_eq!(paths, vec![vec![1, 2, 4], vec![1, 3, 4]]);

    let outcome = solve(&problem, Strategy::GreedyBestFirst).expect("search succeeds");
    assert_eq!(outcome.best_path, vec![1, 3, 4]);
    assert_eq!(outcome.best_cost, Some(10.0));
    assert_eq!(outcome.second_cost, Some(25.0));
}

#[test]
fn uniform_cost_early_stop_keeps_best_cost() {
    let early = SearchOptions {
        ucs_early_stop: true,
        ..SearchOptions::default()
    };
    let zero_cost = problem(
        &[(1, 2, 0.0), (2, 3, 0.0), (1, 3, 0.0), (3, 4, 1.0), (1, 4, 1.0)],
        &[],
        1,
        &[3, 4],
    );

    let mut problems: Vec<Problem> = FIXTURES.iter().map(|name| fixture(name)).collect();
    problems.push(zero_cost);

    for problem in &problems {
        let full = solve(problem, Strategy::UniformCost).expect("search succeeds");
        let stopped =
            solve_with_options(problem, Strategy::UniformCost, &early).expect("search succeeds");
        assert_eq!(full.best_cost, stopped.best_cost);
        assert_eq!(full.best_goal.is_some(), stopped.best_goal.is_some());
        assert!(stopped.nodes_created <= full.nodes_created);
    }
}

#[test]
fn graph_can_be_shared_between_parallel_runs() {
    let problem = fixture("sample.txt");
    let sequential: Vec<_> = Strategy::ALL
        .iter()
        .map(|&strategy| solve(&problem, strategy).expect("search succeeds"))
        .collect();

    let parallel: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = Strategy::ALL
            .iter()
            .map(|&strategy| {
                let problem = &problem;
                scope.spawn(move || solve(problem, strategy).expect("search succeeds"))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread completes"))
            .collect()
    });

    assert_eq!(sequential, parallel);
}
