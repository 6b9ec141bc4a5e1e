use logpath_studio::graph::{GraphSnapshot, IngestStats};
use logpath_studio::output::validate_path;
use logpath_studio::output::{
    graph_to_string, read_graph, render_dot, write_dot, write_graph, write_node_table,
    GraphDocument,
};
use logpath_studio::parser::ParseStats;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;
use std::path::Path;
use tempfile::NamedTempFile;

fn create_test_document() -> GraphDocument {
    let mut graph = GraphSnapshot {
        root: 1,
        ..Default::default()
    };
    graph
        .nodes
        .insert(1, "begin level control 1 replan".to_string());
    graph.nodes.insert(4, "loading  tiles".to_string());
    graph.nodes.insert(5, "retry, \"slow\" path".to_string());
    graph.edges.insert(1, BTreeMap::from([(4, 3)]));
    graph.edges.insert(4, BTreeMap::from([(4, 2), (5, 1)]));

    let stats = IngestStats {
        lines: 9,
        traces_started: 3,
        resolved: 6,
        ..Default::default()
    };
    let parse = ParseStats {
        total_lines: 10,
        parsed_lines: 9,
        unparsed_lines: 1,
    };

    GraphDocument::new("run.log", stats, Some(parse), graph)
}

#[test]
fn test_write_and_read_graph() {
    let doc = create_test_document();
    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    write_graph(&doc, path).unwrap();
    let loaded = read_graph(path).unwrap();

    assert_eq!(loaded, doc);
    assert_eq!(loaded.graph.edge(4, 5), Some(1));
}

#[test]
fn test_graph_to_string_matches_file() {
    let doc = create_test_document();
    let temp_file = NamedTempFile::new().unwrap();

    write_graph(&doc, temp_file.path()).unwrap();
    let json = graph_to_string(&doc).unwrap();

    assert_eq!(std::fs::read_to_string(temp_file.path()).unwrap(), json);
    assert!(json.contains("\"generated_at\""));
    let parsed: GraphDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, doc);
}

#[test]
fn test_validate_output_path_empty() {
    let result = validate_path(Path::new(""));
    assert!(result.is_err());
}

#[test]
fn test_validate_output_path_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let result = validate_path(temp_dir.path());
    assert!(result.is_err());
}

#[test]
fn test_write_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("nested/dirs/graph.json");

    write_graph(&create_test_document(), &nested_path).unwrap();

    assert!(nested_path.exists());
}

#[test]
fn test_node_table_rows() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("node_to_line.csv");

    write_node_table(&create_test_document().graph, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "id,text",
            "1,begin level control 1 replan",
            "4,loading  tiles",
            "5,\"retry, \"\"slow\"\" path\"",
        ]
    );
}

#[test]
fn test_write_dot_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("out/graph.dot");

    let dot = render_dot(&create_test_document().graph, None);
    write_dot(&dot, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("digraph \"Log Graph\" {"));
    assert!(content.contains("n1 -> n4 [label=\"3\", color=black];"));
    assert!(content.contains("n4 -> n4 [label=\"2\", color=black];"));
    assert!(content.contains("n4 -> n5 [label=\"1\", color=red];"));
}

#[test]
fn test_write_dot_to_directory_fails() {
    let temp_dir = tempfile::tempdir().unwrap();
    assert!(write_dot("digraph {}", temp_dir.path()).is_err());
}
