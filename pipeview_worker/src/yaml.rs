use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use pipeview_error::ErrorLocation;
use pipeview_graph::{NodeDef, PipelineGraph, PipelineGraphBuilder, TypeSpec};
use serde::{Deserialize, Serialize};

use crate::error::WorkerError;
use crate::repository::Repository;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct IoTemplate {
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub loadable: bool,
}

impl IoTemplate {
    fn type_spec(&self) -> TypeSpec {
        TypeSpec {
            name: self.type_name.clone(),
            loadable: self.loadable,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct NodeTemplate {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub inputs: BTreeMap<String, IoTemplate>,

    #[serde(default)]
    pub outputs: BTreeMap<String, IoTemplate>,

    // input name -> "node.output"
    #[serde(default)]
    pub depends_on: BTreeMap<String, String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct PipelineTemplate {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: BTreeMap<String, String>,

    #[serde(default)]
    pub nodes: BTreeMap<String, NodeTemplate>,
}

/// Build a pipeline graph from one YAML definition. `path` only labels
/// errors; parse failures keep the line/column the YAML parser reports.
pub fn parse_pipeline(raw: &str, path: &str) -> Result<PipelineGraph, WorkerError> {
    let template: PipelineTemplate = serde_yaml::from_str(raw).map_err(|source| {
        let location = source.location().map(|l| ErrorLocation {
            file: path.to_string(),
            line: l.line(),
            column: l.column(),
        });
        WorkerError::DefinitionParse {
            path: path.to_string(),
            location,
            source,
        }
    })?;

    let name = if template.name.is_empty() {
        Path::new(path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed")
            .to_string()
    } else {
        template.name.clone()
    };

    let mut builder = PipelineGraphBuilder::new(&name);
    if let Some(description) = &template.description {
        builder = builder.description(description);
    }
    for (key, value) in &template.tags {
        builder = builder.tag(key, value);
    }

    for (node_name, node_template) in &template.nodes {
        let mut node = NodeDef::new(node_name);
        if let Some(description) = &node_template.description {
            node = node.description(description);
        }
        for (input_name, io) in &node_template.inputs {
            node = node.input(input_name, io.type_spec());
        }
        for (output_name, io) in &node_template.outputs {
            node = node.output(output_name, io.type_spec());
        }
        builder = builder.add_node(node);

        for (input_name, upstream) in &node_template.depends_on {
            let (upstream_node, upstream_output) =
                upstream
                    .split_once('.')
                    .ok_or_else(|| WorkerError::DefinitionDependency {
                        path: path.to_string(),
                        node: node_name.clone(),
                        input: input_name.clone(),
                        value: upstream.clone(),
                    })?;
            builder = builder.add_dependency(upstream_node, upstream_output, node_name, input_name);
        }
    }

    builder
        .build()
        .map_err(|source| WorkerError::DefinitionInvalid {
            path: path.to_string(),
            source,
        })
}

pub fn read_pipeline_from_yaml(path: &Path) -> Result<PipelineGraph, WorkerError> {
    let raw = fs::read_to_string(path).map_err(|source| WorkerError::DefinitionRead {
        path: path.display().to_string(),
        source,
    })?;
    parse_pipeline(&raw, &path.display().to_string())
}

/// Load every `.yaml`/`.yml` definition under `dir` into one repository.
/// A missing directory is an empty repository, matching a worker deployed
/// before any pipelines.
pub fn load_repository(name: &str, dir: &Path) -> Result<Repository, WorkerError> {
    let mut paths: Vec<PathBuf> = match fs::read_dir(dir) {
        Err(e) if e.kind() == ErrorKind::NotFound => vec![],
        Err(e) => {
            return Err(WorkerError::DefinitionRead {
                path: dir.display().to_string(),
                source: e,
            })
        }
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                matches!(
                    path.extension().and_then(|e| e.to_str()),
                    Some("yaml") | Some("yml")
                )
            })
            .collect(),
    };
    paths.sort();

    let mut repository = Repository::new(name);
    for path in &paths {
        repository.add_pipeline(read_pipeline_from_yaml(path)?);
    }
    Ok(repository)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOO_YAML: &str = r#"
name: foo
description: example pipeline
tags:
  team: data
nodes:
  do_something:
    outputs:
      result: { type: String }
  do_input:
    inputs:
      x: { type: String, loadable: true }
    depends_on:
      x: do_something.result
"#;

    #[test]
    fn test_parse_full_pipeline() {
        let graph = parse_pipeline(FOO_YAML, "foo.yaml").unwrap();

        assert_eq!(graph.name(), "foo");
        assert_eq!(graph.description(), Some("example pipeline"));
        assert_eq!(graph.tags().get("team").map(String::as_str), Some("data"));
        assert!(graph.has_node("do_something"));
        assert!(graph.producer_for("do_input", "x").is_some());
    }

    #[test]
    fn test_pipeline_name_falls_back_to_file_stem() {
        let graph = parse_pipeline("nodes: {}", "pipelines/ingest.yaml").unwrap();
        assert_eq!(graph.name(), "ingest");
    }

    #[test]
    fn test_parse_failure_keeps_yaml_location() {
        let err = parse_pipeline("nodes: [", "broken.yaml").unwrap_err();
        match err {
            WorkerError::DefinitionParse { path, location, .. } => {
                assert_eq!(path, "broken.yaml");
                let location = location.expect("yaml parser reports a location");
                assert_eq!(location.file, "broken.yaml");
                assert!(location.line >= 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_dependency_is_rejected() {
        let raw = r#"
name: foo
nodes:
  sink:
    inputs:
      x: { type: String }
    depends_on:
      x: not-an-output-ref
"#;
        let err = parse_pipeline(raw, "foo.yaml").unwrap_err();
        assert!(matches!(
            err,
            WorkerError::DefinitionDependency { value, .. } if value == "not-an-output-ref"
        ));
    }

    #[test]
    fn test_invalid_graph_wraps_graph_error() {
        let raw = r#"
name: foo
nodes:
  sink:
    inputs:
      x: { type: Frame }
"#;
        let err = parse_pipeline(raw, "foo.yaml").unwrap_err();
        match err {
            WorkerError::DefinitionInvalid { source, .. } => {
                assert!(source.to_string().contains("\"Frame\""));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_directory_loads_empty_repository() {
        let repository =
            load_repository("default", Path::new("./definitely-not-a-real-dir/")).unwrap();
        assert!(repository.is_empty());
    }
}
