//! Model comparison rows for the advanced grid.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DataError;
use crate::magnitude;
use crate::table::{Column, ColumnKind, SortKey, TableRow};

/// One model in the comparison grid.
///
/// `id` is the record's position at load time; input files don't carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRecord {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub default_context: String,
    pub max_mode: String,
    #[serde(default)]
    pub recommendation: Vec<String>,
}

impl ModelRecord {
    pub const NAME: usize = 0;
    pub const DEFAULT_CONTEXT: usize = 1;
    pub const MAX_MODE: usize = 2;
    pub const RECOMMENDATION: usize = 3;

    pub fn new(
        id: u64,
        name: &str,
        default_context: &str,
        max_mode: &str,
        recommendation: &[&str],
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            default_context: default_context.to_string(),
            max_mode: max_mode.to_string(),
            recommendation: recommendation.iter().map(|s| s.to_string()).collect(),
        }
    }
}

const COLUMNS: &[Column] = &[
    Column::new("Name", ColumnKind::Text, 24),
    Column::new("Default Context", ColumnKind::Magnitude, 16),
    Column::new("Max Mode", ColumnKind::Magnitude, 10),
    Column::new("Recommendation", ColumnKind::Tags, 30),
];

impl TableRow for ModelRecord {
    fn id(&self) -> u64 {
        self.id
    }

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cell(&self, column: usize) -> String {
        match column {
            Self::NAME => self.name.clone(),
            Self::DEFAULT_CONTEXT => self.default_context.clone(),
            Self::MAX_MODE => self.max_mode.clone(),
            Self::RECOMMENDATION => self.recommendation.join(", "),
            _ => String::new(),
        }
    }

    fn sort_key(&self, column: usize) -> SortKey {
        match column {
            Self::DEFAULT_CONTEXT => SortKey::Rank(magnitude::rank(&self.default_context)),
            Self::MAX_MODE => SortKey::Rank(magnitude::rank(&self.max_mode)),
            _ => SortKey::Text(self.cell(column)),
        }
    }

    fn matches_filter(&self, column: usize, needle: &str) -> bool {
        match column {
            Self::RECOMMENDATION => self
                .recommendation
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle)),
            _ => self.cell(column).to_lowercase().contains(needle),
        }
    }
}

/// The sixteen models shown when no input is supplied.
pub fn default_models() -> Vec<ModelRecord> {
    let rows: [(&str, &str, &str, &[&str]); 16] = [
        ("Claude 3 Opus", "60k", "-", &["Long-form writing", "Reasoning"]),
        ("Claude 3.5 Haiku", "60k", "-", &["Fast response", "Chat"]),
        ("Claude 3.5 Sonnet", "200k", "-", &["Code generation", "Data analysis"]),
        ("Claude 3.7 Sonnet", "200k", "-", &["Enterprise apps", "Long context"]),
        ("Claude 4 Opus", "-", "200k", &["Knowledge Q&A", "Decision support"]),
        ("Claude 4 Sonnet", "200k", "-", &["Technical docs"]),
        ("Claude 4 Sonnet 1M", "-", "1M", &["Ultra-long docs", "Large context"]),
        ("Claude 4.1 Opus", "-", "200k", &["Research", "Legal analysis"]),
        ("Cursor Small", "60k", "-", &["Code completion", "IDE integration"]),
        ("Deepseek R1", "60k", "-", &["Light reasoning", "Education"]),
        ("Deepseek R1 (05/28)", "60k", "-", &["Beta testing"]),
        ("Deepseek V3", "60k", "-", &["Efficient reasoning", "Dialogue"]),
        ("Deepseek V3.1", "60k", "-", &["Research support", "Modeling"]),
        ("Gemini 2.0 Pro (exp)", "60k", "-", &["Developer testing", "Experimental"]),
        ("Gemini 2.5 Flash", "-", "1M", &["Real-time apps", "Low latency"]),
        ("Gemini 2.5 Pro", "200k", "1M", &["Enterprise knowledge", "Multimodal"]),
    ];

    rows.iter()
        .enumerate()
        .map(|(idx, (name, ctx, max, tags))| ModelRecord::new(idx as u64, name, ctx, max, tags))
        .collect()
}

/// Parses a JSON array of model records and numbers them by position.
pub fn parse_models(json: &str) -> Result<Vec<ModelRecord>, serde_json::Error> {
    let mut models: Vec<ModelRecord> = serde_json::from_str(json)?;
    for (idx, model) in models.iter_mut().enumerate() {
        model.id = idx as u64;
    }
    Ok(models)
}

/// Reads model records from a JSON file.
pub fn load_models(path: &Path) -> Result<Vec<ModelRecord>, DataError> {
    let json = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let models = parse_models(&json).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Loaded {} model records from {}", models.len(), path.display());
    Ok(models)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_dataset_has_sixteen_numbered_rows() {
        let models = default_models();
        assert_eq!(models.len(), 16);
        for (idx, m) in models.iter().enumerate() {
            assert_eq!(m.id, idx as u64);
        }
        assert_eq!(models[0].name, "Claude 3 Opus");
        assert_eq!(models[15].max_mode, "1M");
    }

    #[test]
    fn magnitude_columns_sort_by_rank() {
        let models = default_models();
        let opus4 = &models[4]; // "-" / "200k"
        let sonnet1m = &models[6]; // "-" / "1M"
        assert_eq!(opus4.sort_key(ModelRecord::MAX_MODE), SortKey::Rank(200));
        assert_eq!(sonnet1m.sort_key(ModelRecord::MAX_MODE), SortKey::Rank(1000));
        assert_eq!(opus4.sort_key(ModelRecord::DEFAULT_CONTEXT), SortKey::Rank(0));
    }

    #[test]
    fn recommendation_filter_matches_any_tag() {
        let m = ModelRecord::new(0, "x", "-", "-", &["Code generation", "Data analysis"]);
        assert!(m.matches_filter(ModelRecord::RECOMMENDATION, "analysis"));
        // No match across the tag separator.
        assert!(!m.matches_filter(ModelRecord::RECOMMENDATION, "generation, data"));
        assert_eq!(m.cell(ModelRecord::RECOMMENDATION), "Code generation, Data analysis");
    }

    #[test]
    fn parse_models_reads_camel_case_fields() {
        let json = r#"[
            {"name": "Custom Model A", "defaultContext": "128k", "maxMode": "512k",
             "recommendation": ["Custom task", "Testing"]},
            {"name": "Custom Model B", "defaultContext": "64k", "maxMode": "-"}
        ]"#;
        let models = parse_models(json).unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[1].id, 1);
        assert_eq!(models[0].default_context, "128k");
        assert!(models[1].recommendation.is_empty());
    }

    #[test]
    fn load_models_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Only", "defaultContext": "1k", "maxMode": "-"}}]"#
        )
        .unwrap();

        let models = load_models(file.path()).unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].name, "Only");
    }

    #[test]
    fn load_models_reports_parse_and_io_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = load_models(file.path()).unwrap_err();
        assert!(matches!(err, DataError::Parse { .. }));
        assert!(err.to_string().starts_with("Parse error"));

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(load_models(&missing), Err(DataError::Io { .. })));
    }
}
