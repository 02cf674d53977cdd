//! Block-structured key/value config document parser
//!
//! Mod descriptors and per-mod runtime configs share one small text format:
//! `key = value` lines plus named child blocks, with the block name on its
//! own line (or directly before the brace) and the body wrapped in braces.
//! `//` starts a comment. The reader is tolerant: lines it cannot classify
//! are skipped; only unreadable files and unbalanced braces are errors.

use std::fs;
use std::path::Path;

/// Error produced when a config document cannot be read or parsed
#[derive(Debug, thiserror::Error)]
pub enum CfgError {
    /// Underlying file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// A block was opened without a preceding name
    #[error("unnamed block opened at line {line}")]
    UnnamedBlock {
        /// 1-based line number of the opening brace
        line: usize,
    },

    /// More blocks were closed than opened
    #[error("unbalanced closing brace at line {line}")]
    UnbalancedClose {
        /// 1-based line number of the stray brace
        line: usize,
    },

    /// The document ended inside an open block
    #[error("document ended inside an open block")]
    UnclosedBlock,
}

/// One node of a parsed config document.
///
/// Holds the node's own `key = value` pairs and its named child blocks, in
/// document order. Lookups return the first match; keys are compared
/// exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CfgNode {
    values: Vec<(String, String)>,
    children: Vec<(String, CfgNode)>,
}

impl CfgNode {
    /// Read and parse a config document from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its braces do not
    /// balance.
    pub fn load(path: &Path) -> Result<Self, CfgError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse a config document from text
    ///
    /// # Errors
    ///
    /// Returns an error if braces do not balance.
    pub fn parse(text: &str) -> Result<Self, CfgError> {
        let mut lines = text.lines().enumerate();
        Self::parse_block(&mut lines, true)
    }

    /// Look up the first value stored under `key`
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up the first child block named `name`
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&CfgNode> {
        self.children
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, child)| child)
    }

    /// Whether the node holds no values and no children
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.children.is_empty()
    }

    fn parse_block<'a, I>(lines: &mut I, root: bool) -> Result<Self, CfgError>
    where
        I: Iterator<Item = (usize, &'a str)>,
    {
        let mut node = Self::default();
        let mut pending_name: Option<String> = None;

        while let Some((idx, raw)) = lines.next() {
            let line = strip_comment(raw).trim();
            if line.is_empty() {
                continue;
            }

            if line == "{" {
                let Some(name) = pending_name.take() else {
                    return Err(CfgError::UnnamedBlock { line: idx + 1 });
                };
                let child = Self::parse_block(lines, false)?;
                node.children.push((name, child));
            } else if line == "}" {
                if root {
                    return Err(CfgError::UnbalancedClose { line: idx + 1 });
                }
                return Ok(node);
            } else if let Some((key, value)) = line.split_once('=') {
                node.values
                    .push((key.trim().to_string(), value.trim().to_string()));
                pending_name = None;
            } else if let Some(name) = line.strip_suffix('{') {
                let child = Self::parse_block(lines, false)?;
                node.children.push((name.trim().to_string(), child));
            } else {
                // Bare token: names the next block. Dropped if no brace follows.
                pending_name = Some(line.to_string());
            }
        }

        if root {
            Ok(node)
        } else {
            Err(CfgError::UnclosedBlock)
        }
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(pos) => &line[..pos],
        None => line,
    }
}
