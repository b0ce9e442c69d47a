//! Declarative table of recognized registration call shapes
//!
//! A declaration is a call `<receiver>.<method>(<args>)` where the receiver is
//! one of [`RECEIVERS`] and the method appears in [`SIGNATURES`]. New call
//! shapes are added by appending a row; the call-head regex is generated from
//! the table.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Identifiers accepted as the registration receiver
pub const RECEIVERS: &[&str] = &["server", "mcpServer"];

/// Kind of capability a declaration registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Tool,
    Resource,
    Prompt,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::Tool => write!(f, "tool"),
            Capability::Resource => write!(f, "resource"),
            Capability::Prompt => write!(f, "prompt"),
        }
    }
}

/// Shape of the arguments following the string-literal name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentShape {
    /// `name, { ...config }`
    NameAndConfig,
    /// `name, 'description'`
    NameAndDescription,
    /// `name, 'uri'`
    NameAndUri,
    /// `name, ...` with the remaining arguments ignored
    NameOnly,
}

/// One recognized call shape
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    pub capability: Capability,
    pub methods: &'static [&'static str],
    pub shape: ArgumentShape,
    /// Lower wins when two tool declarations share a name
    pub precedence: u8,
}

/// Recognized signatures in precedence order
pub const SIGNATURES: &[Signature] = &[
    Signature {
        capability: Capability::Tool,
        methods: &["registerTool"],
        shape: ArgumentShape::NameAndConfig,
        precedence: 0,
    },
    Signature {
        capability: Capability::Tool,
        methods: &["tool"],
        shape: ArgumentShape::NameAndDescription,
        precedence: 1,
    },
    Signature {
        capability: Capability::Resource,
        methods: &["registerResource"],
        shape: ArgumentShape::NameAndUri,
        precedence: 2,
    },
    Signature {
        capability: Capability::Prompt,
        methods: &["registerPrompt", "prompt"],
        shape: ArgumentShape::NameOnly,
        precedence: 3,
    },
];

/// Matches `<receiver> . <method> (` with group 1 holding the method name
pub static CALL_HEAD_RE: Lazy<Regex> = Lazy::new(|| {
    let receivers: Vec<String> = RECEIVERS.iter().map(|r| regex::escape(r)).collect();

    let mut methods: Vec<&str> = SIGNATURES
        .iter()
        .flat_map(|s| s.methods.iter().copied())
        .collect();
    // Longest first so a method never shadows a longer one sharing its prefix
    methods.sort_by(|a, b| b.len().cmp(&a.len()));
    let methods: Vec<String> = methods.iter().map(|m| regex::escape(m)).collect();

    Regex::new(&format!(
        r"\b(?:{})\s*\.\s*({})\s*\(",
        receivers.join("|"),
        methods.join("|")
    ))
    .expect("Invalid call head regex")
});

/// Find the signature for a method name
pub fn lookup(method: &str) -> Option<&'static Signature> {
    SIGNATURES.iter().find(|s| s.methods.contains(&method))
}
