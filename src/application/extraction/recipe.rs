use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Bibliographic header of a paper. Every field but `other_information` is
/// required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    pub authors: Vec<String>,
    pub publication_date: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_information: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableEntry {
    pub caption: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureEntry {
    pub caption: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TablesAndFigures {
    pub tables: Vec<TableEntry>,
    pub figures: Vec<FigureEntry>,
}

/// A cited work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reference {
    pub title: String,
    pub authors: Vec<String>,
    pub publication_date: String,
    pub source: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub section_title: String,
    pub section_content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentData {
    pub references: Vec<Reference>,
    pub sections: Vec<Section>,
}

/// Everything extracted from one document.
///
/// Metadata fields sit at the top level; the other passes nest under
/// `content_data` and `tables_and_figures` and stay unset when their pass
/// failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeRecord {
    pub title: String,
    pub authors: Vec<String>,
    pub publication_date: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_data: Option<ContentData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables_and_figures: Option<TablesAndFigures>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_information: Option<String>,
}

impl CompositeRecord {
    pub fn assemble(
        metadata: Metadata,
        tables_and_figures: Option<TablesAndFigures>,
        content_data: Option<ContentData>,
    ) -> Self {
        Self {
            title: metadata.title,
            authors: metadata.authors,
            publication_date: metadata.publication_date,
            abstract_text: metadata.abstract_text,
            content_data,
            tables_and_figures,
            other_information: metadata.other_information,
        }
    }
}

/// Structured-output contract of one extraction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipe {
    Metadata,
    TablesAndFigures,
    Content,
}

impl Recipe {
    /// Order in which the passes run for a document.
    pub const ALL: [Recipe; 3] = [Recipe::Metadata, Recipe::TablesAndFigures, Recipe::Content];

    pub fn name(self) -> &'static str {
        match self {
            Recipe::Metadata => "metadata",
            Recipe::TablesAndFigures => "tables_and_figures",
            Recipe::Content => "content_data",
        }
    }

    /// Schema sent with the request: the model answers with an array of
    /// records of this shape.
    pub fn response_schema(self) -> Value {
        json!({
            "type": "ARRAY",
            "items": self.record_schema(),
        })
    }

    fn record_schema(self) -> Value {
        match self {
            Recipe::Metadata => object(
                json!({
                    "title": string(),
                    "authors": array_of(string()),
                    "publication_date": string(),
                    "abstract": string(),
                    "other_information": string(),
                }),
                &["title", "authors", "publication_date", "abstract"],
            ),
            Recipe::TablesAndFigures => object(
                json!({
                    "tables": array_of(object(
                        json!({"caption": string(), "content": string()}),
                        &["caption", "content"],
                    )),
                    "figures": array_of(object(
                        json!({"caption": string(), "description": string()}),
                        &["caption", "description"],
                    )),
                }),
                &["tables", "figures"],
            ),
            Recipe::Content => object(
                json!({
                    "references": array_of(object(
                        json!({
                            "title": string(),
                            "authors": array_of(string()),
                            "publication_date": string(),
                            "source": string(),
                            "link": string(),
                        }),
                        &["title", "authors", "publication_date", "source", "link"],
                    )),
                    "sections": array_of(object(
                        json!({"section_title": string(), "section_content": string()}),
                        &["section_title", "section_content"],
                    )),
                }),
                &["references", "sections"],
            ),
        }
    }
}

fn string() -> Value {
    json!({"type": "STRING"})
}

fn array_of(items: Value) -> Value {
    json!({"type": "ARRAY", "items": items})
}

fn object(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    })
}
