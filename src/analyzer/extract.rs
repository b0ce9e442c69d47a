//! Registration call extraction
//!
//! Finds call heads from the signature table, then reads the arguments with
//! the lexical helpers in [`super::scanner`]. Extraction of one file is a
//! pure function of its text.
//!
//! # Recognized forms
//!
//! ```text
//! server.registerTool('name', { description: '...', inputSchema: { ... } })
//! server.tool('name', 'description')
//! server.registerResource('name', 'uri')
//! server.registerPrompt('name', ...)   server.prompt('name', ...)
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::inventory::{FileExtraction, PromptEntry, ResourceEntry, ToolEntry, ToolMatch};
use super::scanner::{
    advance_chars, matching_close, object_entries, skip_trivia, string_literal,
};
use super::schema::{infer_input_schema, InputSchema};
use super::signature::{self, ArgumentShape, Capability, Signature, CALL_HEAD_RE};
use crate::config::AnalysisConfig;

/// A source file read for extraction
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
    /// Base name, recorded on every entry as provenance
    pub name: String,
}

/// A file left out of the scan, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

impl SourceFile {
    /// Wrap already-loaded text
    pub fn from_text(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        let name = base_name(&path);
        Self {
            path,
            content: content.into(),
            name,
        }
    }

    /// Read a file as UTF-8 text
    ///
    /// Read failures, non-UTF-8 content, and files over `max_size` bytes
    /// come back as a [`SkippedFile`].
    pub fn read(path: &Path, max_size: u64) -> Result<Self, SkippedFile> {
        let skipped = |reason: String| SkippedFile {
            path: path.display().to_string(),
            reason,
        };

        let size = std::fs::metadata(path)
            .map_err(|e| skipped(format!("cannot stat file: {}", e)))?
            .len();
        if size > max_size {
            return Err(skipped(format!(
                "file is {} bytes, larger than the {} byte limit",
                size, max_size
            )));
        }

        let bytes = std::fs::read(path).map_err(|e| skipped(format!("read error: {}", e)))?;
        let content =
            String::from_utf8(bytes).map_err(|e| skipped(format!("not valid UTF-8: {}", e)))?;

        Ok(Self::from_text(path, content))
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Extracts declarations from source text
#[derive(Debug, Clone)]
pub struct Extractor {
    /// Characters after a tool's call head searched for its input schema
    schema_window: usize,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

impl Extractor {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            schema_window: config.schema_window,
        }
    }

    /// Extract all declarations from one file
    pub fn extract(&self, file: &SourceFile) -> FileExtraction {
        self.extract_text(&file.content, &file.name)
    }

    /// Extract all declarations from `text`, attributing them to `file_name`
    pub fn extract_text(&self, text: &str, file_name: &str) -> FileExtraction {
        let mut extraction = FileExtraction::new(file_name);

        for caps in CALL_HEAD_RE.captures_iter(text) {
            let (Some(head), Some(method)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let Some(signature) = signature::lookup(method.as_str()) else {
                continue;
            };

            let call = Call {
                text,
                start: head.start(),
                args: head.end(),
            };
            if !self.apply(signature, &call, file_name, &mut extraction) {
                tracing::trace!(
                    "{}: {}() at byte {} does not match the {} signature",
                    file_name,
                    method.as_str(),
                    head.start(),
                    signature.capability
                );
            }
        }

        tracing::debug!(
            "{}: {} tool(s), {} resource(s), {} prompt(s)",
            file_name,
            extraction.tools.len(),
            extraction.resources.len(),
            extraction.prompts.len()
        );

        extraction
    }

    /// Read the arguments of one call; false if they do not fit the signature
    fn apply(
        &self,
        signature: &Signature,
        call: &Call<'_>,
        file_name: &str,
        extraction: &mut FileExtraction,
    ) -> bool {
        let Some((name, rest)) = call.name() else {
            return false;
        };
        let file = file_name.to_string();

        match (signature.capability, signature.shape) {
            (Capability::Tool, ArgumentShape::NameAndConfig) => {
                let Some(open) = call.next_argument(rest).filter(|&p| call.byte(p) == Some(b'{'))
                else {
                    return false;
                };
                let close = matching_close(call.text, open).unwrap_or(call.text.len());
                let body = &call.text[open + 1..close];

                let description = config_description(body)
                    .unwrap_or_else(|| ToolEntry::placeholder_description(&name));
                let input_schema = self.schema_in_window(call, open + 1, body);

                extraction.tools.push(ToolMatch {
                    precedence: signature.precedence,
                    entry: ToolEntry {
                        name,
                        description,
                        input_schema,
                        file,
                    },
                });
            }
            (Capability::Tool, _) => {
                let Some(description) = call.next_string(rest) else {
                    return false;
                };
                let description = if description.is_empty() {
                    ToolEntry::placeholder_description(&name)
                } else {
                    description
                };

                extraction.tools.push(ToolMatch {
                    precedence: signature.precedence,
                    entry: ToolEntry {
                        name,
                        description,
                        input_schema: InputSchema::new(),
                        file,
                    },
                });
            }
            (Capability::Resource, _) => {
                let Some(uri) = call.next_string(rest).filter(|uri| !uri.is_empty()) else {
                    return false;
                };
                extraction.resources.push(ResourceEntry { name, uri, file });
            }
            (Capability::Prompt, _) => {
                extraction.prompts.push(PromptEntry { name, file });
            }
        }

        true
    }

    /// Infer the schema from the part of the config body inside the window
    fn schema_in_window(&self, call: &Call<'_>, body_start: usize, body: &str) -> InputSchema {
        let window_end = advance_chars(call.text, call.start, self.schema_window);
        let limit = window_end.saturating_sub(body_start).min(body.len());
        infer_input_schema(body, limit)
    }
}

/// The argument list of one matched call head
struct Call<'a> {
    text: &'a str,
    /// Offset of the receiver
    start: usize,
    /// Offset just past the opening parenthesis
    args: usize,
}

impl<'a> Call<'a> {
    fn byte(&self, pos: usize) -> Option<u8> {
        self.text.as_bytes().get(pos).copied()
    }

    /// First argument as a non-empty string literal, plus the offset after it
    fn name(&self) -> Option<(String, usize)> {
        let literal = string_literal(self.text, skip_trivia(self.text, self.args))?;
        if literal.value.is_empty() {
            return None;
        }
        Some((literal.value, literal.end))
    }

    /// Offset of the argument following the one that ended at `after`
    fn next_argument(&self, after: usize) -> Option<usize> {
        let comma = skip_trivia(self.text, after);
        if self.byte(comma) != Some(b',') {
            return None;
        }
        Some(skip_trivia(self.text, comma + 1))
    }

    /// Next argument as a string literal
    fn next_string(&self, after: usize) -> Option<String> {
        string_literal(self.text, self.next_argument(after)?).map(|l| l.value)
    }
}

/// First top-level `description` of a config block given as a non-empty string literal
fn config_description(body: &str) -> Option<String> {
    object_entries(body)
        .into_iter()
        .filter(|entry| entry.key == "description")
        .find_map(|entry| string_literal(entry.value, 0).filter(|l| !l.value.is_empty()))
        .map(|literal| literal.value)
}
