use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::NetworkError;

fn default_source() -> String {
    String::from("Source")
}

fn default_sink() -> String {
    String::from("Sink")
}

/// JSON form of a graph. vertex names appearing in the edge list are
/// interned in first-appearance order when the [`super::Graph`] is built.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphConfig {
    /// number of resources carried on each edge (R >= 1)
    pub n_res: usize,
    /// name of the distinguished origin vertex
    #[serde(default = "default_source")]
    pub source: String,
    /// name of the distinguished destination vertex
    #[serde(default = "default_sink")]
    pub sink: String,
    pub edges: Vec<EdgeConfig>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EdgeConfig {
    pub src: String,
    pub dst: String,
    pub cost: f64,
    pub res_cost: Vec<f64>,
}

impl GraphConfig {
    /// read a graph configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<GraphConfig, NetworkError> {
        let file = File::open(path)?;
        let config: GraphConfig = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// read a graph configuration from an in-memory JSON value
    pub fn from_json(value: &serde_json::Value) -> Result<GraphConfig, NetworkError> {
        let config: GraphConfig = serde_json::from_value(value.clone())?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const DIAMOND_JSON: &str = r#"{
        "n_res": 2,
        "edges": [
            {"src": "Source", "dst": "A", "cost": -1.0, "res_cost": [1.0, 2.0]},
            {"src": "A", "dst": "Sink", "cost": 1.0, "res_cost": [1.0, 10.0]}
        ]
    }"#;

    #[test]
    fn test_endpoint_names_default() {
        let config: GraphConfig = serde_json::from_str(DIAMOND_JSON).unwrap();
        assert_eq!(config.source, "Source");
        assert_eq!(config.sink, "Sink");
        assert_eq!(config.n_res, 2);
        assert_eq!(config.edges.len(), 2);
        assert_eq!(config.edges[1].res_cost, vec![1.0, 10.0]);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DIAMOND_JSON.as_bytes()).unwrap();
        let config = GraphConfig::from_file(file.path()).unwrap();
        assert_eq!(config.edges.len(), 2);
        assert_eq!(config.edges[0].src, "Source");
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let result = GraphConfig::from_json(&serde_json::json!({"edges": []}));
        assert!(matches!(result, Err(NetworkError::JsonError { .. })));
    }
}
