use std::fmt;
use std::io;
use std::str::FromStr;

/// Error types for text file loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    Io { path: String, kind: io::ErrorKind },
    Missing(&'static str),
    InvalidNumber { what: &'static str, token: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, kind } => write!(f, "Cannot read {}: {}", path, kind),
            LoadError::Missing(what) => write!(f, "Unexpected end of input, expected {}", what),
            LoadError::InvalidNumber { what, token } => {
                write!(f, "Invalid {} '{}'", what, token)
            }
        }
    }
}

/// Parsed contents of a graph file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphFile {
    pub nodes: usize,
    /// `(from, to, weight)` records in file order
    pub edges: Vec<(usize, usize, i32)>,
}

/// Parse the whitespace separated graph format
///
/// ```text
/// N M
/// from to [weight]   (M times; weight only when `weighted`)
/// ```
///
/// Unweighted records get weight 1. Trailing tokens are ignored.
pub fn parse_graph(text: &str, weighted: bool) -> Result<GraphFile, LoadError> {
    let mut tokens = text.split_whitespace();

    let nodes: usize = next_number(&mut tokens, "node count")?;
    let edge_count: usize = next_number(&mut tokens, "edge count")?;

    let mut edges = Vec::with_capacity(edge_count.min(1024));
    for _ in 0..edge_count {
        let from = next_number(&mut tokens, "edge source")?;
        let to = next_number(&mut tokens, "edge target")?;
        let weight = if weighted {
            next_number(&mut tokens, "edge weight")?
        } else {
            1
        };
        edges.push((from, to, weight));
    }

    Ok(GraphFile { nodes, edges })
}

/// Parse a value list: a count `n` followed by `n` integers
pub fn parse_list(text: &str) -> Result<Vec<i32>, LoadError> {
    let mut tokens = text.split_whitespace();

    let count: usize = next_number(&mut tokens, "value count")?;
    (0..count)
        .map(|_| next_number(&mut tokens, "list value"))
        .collect()
}

/// Read a whole text file, keeping only the error kind
pub fn read_text(path: &str) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|err| LoadError::Io {
        path: path.to_string(),
        kind: err.kind(),
    })
}

fn next_number<'a, T, I>(tokens: &mut I, what: &'static str) -> Result<T, LoadError>
where
    T: FromStr,
    I: Iterator<Item = &'a str>,
{
    let token = tokens.next().ok_or(LoadError::Missing(what))?;
    token.parse().map_err(|_| LoadError::InvalidNumber {
        what,
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_UNWEIGHTED: &str = "4 3\n0 1\n1 2\n2 3\n";
    const TEST_WEIGHTED: &str = "3 2\n0 1 15\n1 2 40\n";

    #[test]
    fn test_parse_unweighted() {
        let file = parse_graph(TEST_UNWEIGHTED, false).unwrap();

        assert_eq!(file.nodes, 4);
        assert_eq!(file.edges, vec![(0, 1, 1), (1, 2, 1), (2, 3, 1)]);
    }

    #[test]
    fn test_parse_weighted() {
        let file = parse_graph(TEST_WEIGHTED, true).unwrap();

        assert_eq!(file.nodes, 3);
        assert_eq!(file.edges, vec![(0, 1, 15), (1, 2, 40)]);
    }

    #[test]
    fn test_tokens_may_share_lines() {
        let file = parse_graph("2 1 0 1", false).unwrap();
        assert_eq!(file.edges, vec![(0, 1, 1)]);
    }

    #[test]
    fn test_missing_records() {
        assert_eq!(parse_graph("", false), Err(LoadError::Missing("node count")));
        assert_eq!(parse_graph("3 2\n0 1\n", false), Err(LoadError::Missing("edge source")));
        assert_eq!(parse_graph("3 1\n0 1\n", true), Err(LoadError::Missing("edge weight")));
    }

    #[test]
    fn test_invalid_number() {
        let err = parse_graph("3 x", false).unwrap_err();

        assert_eq!(
            err,
            LoadError::InvalidNumber {
                what: "edge count",
                token: "x".to_string()
            }
        );
        assert_eq!(err.to_string(), "Invalid edge count 'x'");
    }

    #[test]
    fn test_negative_node_count_rejected() {
        assert!(matches!(
            parse_graph("-1 0", false),
            Err(LoadError::InvalidNumber { what: "node count", .. })
        ));
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("4\n10 20\n30 40"), Ok(vec![10, 20, 30, 40]));
        assert_eq!(parse_list("0"), Ok(vec![]));
        assert_eq!(parse_list("3 1 2"), Err(LoadError::Missing("list value")));
        assert!(matches!(
            parse_list("2 1 two"),
            Err(LoadError::InvalidNumber { what: "list value", .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = read_text("/nonexistent/graph.txt").unwrap_err();
        assert!(matches!(err, LoadError::Io { kind: io::ErrorKind::NotFound, .. }));
        assert!(err.to_string().starts_with("Cannot read /nonexistent/graph.txt"));
    }
}
