use serde::{Deserialize, Serialize};

use crate::db::models::WishlistItem;

pub type McqImports = Vec<McqImport>;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McqImport {
    pub chapter_id: i32,
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: i32,
}

/// Verdict returned by the judge service. The judge is an external
/// collaborator, so every field is optional-with-default and unknown
/// fields are ignored.
#[derive(Deserialize, Default)]
pub struct JudgeVerdict {
    #[serde(default)]
    pub passed: bool,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub test_results: Vec<JudgeTestResult>,
}

#[derive(Deserialize, Default)]
pub struct JudgeTestResult {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub passed: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize)]
pub struct WishlistExport {
    pub total: usize,
    pub items: Vec<WishlistItem>,
}
