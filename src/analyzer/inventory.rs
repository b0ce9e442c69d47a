//! Inventory types and cross-file aggregation
//!
//! Per-file extraction produces an immutable [`FileExtraction`]; the
//! [`InventoryBuilder`] merges them once, in discovery order, into the
//! [`Inventory`] handed to the project generator.

use std::collections::HashMap;

use serde::Serialize;

use super::schema::InputSchema;

/// A declared tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolEntry {
    pub name: String,
    pub description: String,
    pub input_schema: InputSchema,
    /// Base name of the declaring file
    pub file: String,
}

impl ToolEntry {
    /// Description used when a declaration has none
    pub fn placeholder_description(name: &str) -> String {
        format!("{} tool", name)
    }
}

/// A declared resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceEntry {
    pub name: String,
    pub uri: String,
    pub file: String,
}

/// A declared prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptEntry {
    pub name: String,
    pub file: String,
}

/// A tool candidate together with the precedence of the form that declared it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolMatch {
    /// Lower wins when two declarations share a name
    pub precedence: u8,
    pub entry: ToolEntry,
}

/// Everything extracted from one source file, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileExtraction {
    pub file: String,
    pub tools: Vec<ToolMatch>,
    pub resources: Vec<ResourceEntry>,
    pub prompts: Vec<PromptEntry>,
}

impl FileExtraction {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty() && self.resources.is_empty() && self.prompts.is_empty()
    }
}

/// Entry counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub tool_count: usize,
    pub resource_count: usize,
    pub prompt_count: usize,
}

/// Aggregated result of one scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inventory {
    pub tools: Vec<ToolEntry>,
    pub resources: Vec<ResourceEntry>,
    pub prompts: Vec<PromptEntry>,
    pub summary: Summary,
}

impl Inventory {
    /// An inventory with no entries
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge per-file results in the order given
    pub fn merge(files: impl IntoIterator<Item = FileExtraction>) -> Self {
        let mut builder = InventoryBuilder::new();
        for file in files {
            builder.add_file(file);
        }
        builder.finish()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty() && self.resources.is_empty() && self.prompts.is_empty()
    }

    pub fn tool(&self, name: &str) -> Option<&ToolEntry> {
        self.tools.iter().find(|t| t.name == name)
    }
}

/// Folds per-file results into one [`Inventory`]
///
/// Tool names are unique across the whole scan. A tool keeps the slot of
/// its first declaration; its content comes from the highest-precedence
/// declaration, the earliest one among equals. Resources and prompts are
/// appended as-is.
#[derive(Debug, Default)]
pub struct InventoryBuilder {
    inventory: Inventory,
    /// name -> (slot in `tools`, precedence of the entry in that slot)
    tool_slots: HashMap<String, (usize, u8)>,
}

impl InventoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, file: FileExtraction) {
        for candidate in file.tools {
            self.add_tool(candidate);
        }
        self.inventory.resources.extend(file.resources);
        self.inventory.prompts.extend(file.prompts);
    }

    fn add_tool(&mut self, candidate: ToolMatch) {
        match self.tool_slots.get_mut(&candidate.entry.name) {
            Some((slot, precedence)) => {
                if candidate.precedence < *precedence {
                    tracing::debug!(
                        "Tool '{}' from {} replaces a lower-precedence declaration",
                        candidate.entry.name,
                        candidate.entry.file
                    );
                    *precedence = candidate.precedence;
                    self.inventory.tools[*slot] = candidate.entry;
                } else {
                    tracing::debug!(
                        "Ignoring duplicate tool '{}' in {}",
                        candidate.entry.name,
                        candidate.entry.file
                    );
                }
            }
            None => {
                self.tool_slots.insert(
                    candidate.entry.name.clone(),
                    (self.inventory.tools.len(), candidate.precedence),
                );
                self.inventory.tools.push(candidate.entry);
            }
        }
    }

    pub fn finish(mut self) -> Inventory {
        self.inventory.summary = Summary {
            tool_count: self.inventory.tools.len(),
            resource_count: self.inventory.resources.len(),
            prompt_count: self.inventory.prompts.len(),
        };
        self.inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::schema::FieldType;

    fn tool(name: &str, description: &str, file: &str, precedence: u8) -> ToolMatch {
        ToolMatch {
            precedence,
            entry: ToolEntry {
                name: name.to_string(),
                description: description.to_string(),
                input_schema: InputSchema::new(),
                file: file.to_string(),
            },
        }
    }

    fn file(name: &str, tools: Vec<ToolMatch>) -> FileExtraction {
        FileExtraction {
            tools,
            ..FileExtraction::new(name)
        }
    }

    #[test]
    fn test_merge_empty() {
        let inventory = Inventory::merge(vec![FileExtraction::new("a.ts")]);
        assert!(inventory.is_empty());
        assert_eq!(inventory.summary, Summary::default());
        assert_eq!(inventory, Inventory::empty());
    }

    #[test]
    fn test_merge_preserves_order_across_files() {
        let inventory = Inventory::merge(vec![
            file("a.ts", vec![tool("one", "1", "a.ts", 0), tool("two", "2", "a.ts", 1)]),
            file("b.ts", vec![tool("three", "3", "b.ts", 0)]),
        ]);

        let names: Vec<&str> = inventory.tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["one", "two", "three"]);
        assert_eq!(inventory.summary.tool_count, 3);
    }

    #[test]
    fn test_legacy_never_overwrites_registered() {
        let inventory = Inventory::merge(vec![
            file("a.ts", vec![tool("foo", "registered", "a.ts", 0)]),
            file("b.ts", vec![tool("foo", "legacy", "b.ts", 1)]),
        ]);

        assert_eq!(inventory.tools.len(), 1);
        assert_eq!(inventory.tools[0].description, "registered");
        assert_eq!(inventory.tools[0].file, "a.ts");
    }

    #[test]
    fn test_registered_replaces_earlier_legacy_in_place() {
        let inventory = Inventory::merge(vec![
            file(
                "a.ts",
                vec![tool("foo", "legacy", "a.ts", 1), tool("bar", "b", "a.ts", 0)],
            ),
            file("b.ts", vec![tool("foo", "registered", "b.ts", 0)]),
        ]);

        let names: Vec<&str> = inventory.tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["foo", "bar"]);
        assert_eq!(inventory.tools[0].description, "registered");
        assert_eq!(inventory.tools[0].file, "b.ts");
    }

    #[test]
    fn test_same_precedence_first_wins() {
        let inventory = Inventory::merge(vec![
            file("a.ts", vec![tool("foo", "first", "a.ts", 0)]),
            file("b.ts", vec![tool("foo", "second", "b.ts", 0)]),
        ]);

        assert_eq!(inventory.tools.len(), 1);
        assert_eq!(inventory.tools[0].description, "first");
    }

    #[test]
    fn test_resources_and_prompts_keep_duplicates() {
        let mut a = FileExtraction::new("a.ts");
        a.resources.push(ResourceEntry {
            name: "r".into(),
            uri: "uri-a".into(),
            file: "a.ts".into(),
        });
        a.resources.push(ResourceEntry {
            name: "r".into(),
            uri: "uri-b".into(),
            file: "a.ts".into(),
        });
        a.prompts.push(PromptEntry {
            name: "p".into(),
            file: "a.ts".into(),
        });
        a.prompts.push(PromptEntry {
            name: "p".into(),
            file: "a.ts".into(),
        });

        let inventory = Inventory::merge(vec![a]);
        assert_eq!(inventory.summary.resource_count, 2);
        assert_eq!(inventory.summary.prompt_count, 2);
        assert_eq!(inventory.resources[1].uri, "uri-b");
    }

    #[test]
    fn test_inventory_json_shape() {
        let mut entry = tool("foo", "does foo", "index.ts", 0);
        entry.entry.input_schema.insert("bar", FieldType::String);

        let inventory = Inventory::merge(vec![file("index.ts", vec![entry])]);
        let json = serde_json::to_value(&inventory).unwrap();

        assert_eq!(json["tools"][0]["name"], "foo");
        assert_eq!(json["tools"][0]["inputSchema"]["bar"], "string");
        assert_eq!(json["tools"][0]["file"], "index.ts");
        assert_eq!(json["summary"]["toolCount"], 1);
        assert_eq!(json["summary"]["resourceCount"], 0);
        assert_eq!(json["summary"]["promptCount"], 0);
        assert!(json["resources"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_placeholder_description() {
        assert_eq!(ToolEntry::placeholder_description("search"), "search tool");
    }
}
