// Integration tests for filmgraph
use filmgraph_core::{
    make_graph, make_graph_with, Actor, ActorUpdate, Error, FilterCondition, Graph, Movie,
    MovieField,
};
use filmgraph_storage::{load_combined, GraphExport, GraphStore, LoadOptions};
use std::io::Write;

const DATA: &str = r#"[
    {"Robert Redford": {"json_class": "Actor", "name": "Robert Redford", "age": 81, "movies": ["Brubaker"]}},
    {"Morgan Freeman": {"json_class": "Actor", "name": "Morgan Freeman", "age": 80, "movies": ["Brubaker", "Glory"]}},
    {"Denzel Washington": {"json_class": "Actor", "name": "Denzel Washington", "age": 63, "movies": ["Glory"]}},
    {"Brubaker": {"json_class": "Movie", "name": "Brubaker", "year": 1980,
        "box_office": 371217082, "actors": ["Robert Redford", "Morgan Freeman"]}},
    {"Glory": {"json_class": "Movie", "name": "Glory", "year": 1989,
        "box_office": 26828365, "actors": ["Denzel Washington", "Morgan Freeman", "Cary Elwes"]}},
    {"Unreleased": {"json_class": "Movie", "name": "Unreleased", "year": 0,
        "box_office": 0, "actors": []}}
]"#;

fn data_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DATA.as_bytes()).unwrap();
    file
}

fn built_graph() -> Graph {
    let file = data_file();
    let mut graph = load_combined(file.path(), LoadOptions::default())
        .unwrap()
        .into_graph();
    make_graph(&mut graph).unwrap();
    graph
}

#[test]
fn test_billing_order_weights() {
    let mut graph = Graph::from_entities(
        vec![
            Actor::new("Robert Redford", 81, None).with_movies(["Brubaker"]),
            Actor::new("Morgan Freeman", 80, None).with_movies(["Brubaker"]),
        ],
        vec![Movie::new("Brubaker", 1980, 371217082.0)],
    );
    make_graph(&mut graph).unwrap();

    let redford = graph.actor_id("Robert Redford").unwrap();
    let freeman = graph.actor_id("Morgan Freeman").unwrap();
    let brubaker = graph.movie_id("Brubaker").unwrap();
    assert_eq!(graph.edge_weight(redford, brubaker), 371217082.0);
    assert_eq!(graph.edge_weight(freeman, brubaker), 185608541.0);
}

#[test]
fn test_load_and_build() {
    let graph = built_graph();
    assert_eq!(graph.actor_count(), 3);
    assert_eq!(graph.movie_count(), 3);
    assert_eq!(graph.edge_count(), 4);

    // Cary Elwes is claimed but absent
    assert!(graph.actor_id("Cary Elwes").is_none());
    assert_eq!(
        graph.starred_actors("Glory"),
        ["Denzel Washington", "Morgan Freeman", "Cary Elwes"]
    );
}

#[test]
fn test_bipartite_invariant() {
    let graph = built_graph();
    for (actor_id, _) in graph.actors() {
        for (movie_id, weight) in graph.actor_edges(actor_id) {
            let back: Vec<f64> = graph
                .movie_edges(movie_id)
                .filter(|(a, _)| *a == actor_id)
                .map(|(_, w)| w)
                .collect();
            assert_eq!(back, vec![weight]);
        }
    }
}

#[test]
fn test_sentinels_and_empty_results() {
    let graph = built_graph();
    assert_eq!(graph.movie_gross_value("Nonexistent"), -1.0);
    assert!(graph.movies_in_year(1994).is_empty());
    assert!(graph.actors_in_year(1994).is_empty());
    assert!(graph.movies_in_year(0).is_empty());
    assert!(graph.movies_per_year().keys().all(|year| *year > 1500));
}

#[test]
fn test_rankings() {
    let graph = built_graph();
    // Freeman bridges both movies and reaches everyone
    assert_eq!(graph.hub_actors(1), vec!["Morgan Freeman"]);
    assert_eq!(graph.n_oldest_actors(2), vec!["Robert Redford", "Morgan Freeman"]);
    assert_eq!(graph.n_highest_grossing_actors(1), vec!["Robert Redford"]);
    assert_eq!(graph.hub_actors(100).len(), 3);
}

#[test]
fn test_average_gross_value_per_movie() {
    let graph = Graph::from_entities(
        vec![Actor::new("Solo", 40, Some(100.0)).with_movies(["X", "Y"])],
        Vec::<Movie>::new(),
    );
    let avg = graph.average_gross_value_per_movie_all().unwrap();
    assert!((avg - 100.0 / 3.0).abs() < 1e-9);

    assert!(matches!(
        Graph::new().average_gross_value_per_movie_all(),
        Err(Error::EmptyAggregate(_))
    ));
}

#[test]
fn test_rebuild_is_idempotent() {
    let mut graph = built_graph();
    let edges = graph.edge_count();
    let freeman = graph.actor_id("Morgan Freeman").unwrap();
    let before: Vec<_> = graph.actor_edges(freeman).collect();

    make_graph(&mut graph).unwrap();
    assert_eq!(graph.edge_count(), edges);
    assert_eq!(graph.actor_edges(freeman).collect::<Vec<_>>(), before);
}

#[test]
fn test_custom_weighting() {
    let mut graph = built_graph();
    make_graph_with(&mut graph, &|movie: &Movie| vec![1.0; movie.degree()]).unwrap();
    let glory = graph.movie_id("Glory").unwrap();
    assert!(graph.movie_edges(glory).all(|(_, w)| w == 1.0));

    let err = make_graph_with(&mut graph, &|_: &Movie| vec![1.0]).unwrap_err();
    assert!(matches!(err, Error::WeightCountMismatch { .. }));
}

#[test]
fn test_load_limits() {
    let file = data_file();
    let data = load_combined(file.path(), LoadOptions::with_limits(1, 2)).unwrap();
    assert_eq!(data.actors.len(), 1);
    assert_eq!(data.movies.len(), 2);
}

#[test]
fn test_store_crud_and_export() {
    let file = data_file();
    let store = GraphStore::open(file.path(), LoadOptions::default()).unwrap();

    let update = ActorUpdate {
        age: Some(82),
        ..Default::default()
    };
    store.update_actor("Robert Redford", update).unwrap();
    assert_eq!(store.actor_view("Robert Redford").unwrap().age, 82);
    assert!(store.update_actor("Nobody", ActorUpdate::default()).is_err());

    let found = store.find_movies(FilterCondition::<MovieField>::all([("year", "1989")]).unwrap());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Glory");

    assert!(store.delete_movie("Brubaker").unwrap());
    assert!(!store.delete_movie("Brubaker").unwrap());
    assert!(store.actor_view("Robert Redford").unwrap().edges.is_empty());

    // a new claim is linked and weighted straight away
    let update = ActorUpdate {
        movies_starred_in: Some(vec!["Glory".into()]),
        ..Default::default()
    };
    store.upsert_actor("Cary Elwes", update).unwrap();
    let glory = store.movie_view("Glory").unwrap();
    assert_eq!(glory.edges, vec!["Morgan Freeman", "Denzel Washington", "Cary Elwes"]);
    assert!((glory.edge_weights[2] - 26828365.0 / 3.0).abs() < 1e-6);

    let out = tempfile::tempdir().unwrap();
    let path = out.path().join("graph.json");
    store.export(&path).unwrap();
    let exported: GraphExport =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(exported.actors.len(), 4);
    assert_eq!(exported.movies.len(), 2);
}
