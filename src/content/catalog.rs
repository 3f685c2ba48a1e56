//! Quiz catalog loaded from category JSON documents on disk.
//!
//! Each quiz lives in its own `category-<slug>.json` file with the video
//! metadata, the questions, and the vocabulary list for the flashcards.
//! A file that fails to parse is skipped with a warning; the catalog
//! never fails as a whole because one document is broken.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One multiple-choice question.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuizItem {
    pub question: String,
    pub choices: Vec<String>,
    pub answer: String,
    #[serde(default)]
    pub explanation: String,
}

/// One vocabulary flashcard entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VocabItem {
    pub word: String,
    pub definition: String,
    #[serde(default)]
    pub example: String,
}

/// Full quiz document as stored on disk.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuizDoc {
    pub slug: String,
    pub movie_title: String,
    #[serde(default)]
    pub introduction: String,
    #[serde(default)]
    pub channel_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub quiz: Vec<QuizItem>,
    #[serde(default)]
    pub vocabulary: Vec<VocabItem>,
}

/// Listing entry: what the quiz cards on the home page show.
#[derive(Debug, Clone, Serialize)]
pub struct QuizSummary {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub channel: String,
    pub published_at: String,
}

impl QuizSummary {
    fn from_doc(doc: QuizDoc) -> Self {
        Self {
            thumbnail: format!("/img/img-{}.webp", doc.slug),
            slug: doc.slug,
            title: doc.movie_title,
            description: doc.introduction,
            channel: doc.channel_name,
            published_at: doc.published_at,
        }
    }
}

/// List the newest `count` quizzes, most recently published first.
pub fn list_quizzes(dir: &Path, count: usize) -> Vec<QuizSummary> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Cannot read quiz catalog {}: {}", dir.display(), e);
            return vec![];
        }
    };

    let mut quizzes: Vec<QuizSummary> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.starts_with("category-") && name.ends_with(".json")
        })
        .filter_map(|entry| read_doc(&entry.path()))
        .map(QuizSummary::from_doc)
        .collect();

    quizzes.sort_by_key(|q| std::cmp::Reverse(published_timestamp(&q.published_at)));
    quizzes.truncate(count);
    quizzes
}

/// Load a single quiz document by slug.
pub fn load_quiz(dir: &Path, slug: &str) -> Option<QuizDoc> {
    // Slugs come from the URL; keep them from escaping the catalog dir
    if slug.is_empty() || !slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return None;
    }
    read_doc(&dir.join(format!("category-{slug}.json")))
}

fn read_doc(path: &Path) -> Option<QuizDoc> {
    let contents = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(doc) => Some(doc),
        Err(e) => {
            tracing::warn!("Skipping malformed quiz document {}: {}", path.display(), e);
            None
        }
    }
}

fn published_timestamp(published_at: &str) -> i64 {
    DateTime::parse_from_rfc3339(published_at)
        .map(|dt| dt.with_timezone(&Utc).timestamp())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_doc(dir: &Path, slug: &str, published_at: &str) {
        let doc = serde_json::json!({
            "slug": slug,
            "movie_title": format!("Quiz {slug}"),
            "introduction": "Watch and answer.",
            "channel_name": "BBC Learning English",
            "category": "News",
            "level": "B1",
            "video_id": "abc",
            "published_at": published_at,
            "quiz": [
                {"question": "Q1?", "choices": ["a", "b", "c"], "answer": "a", "explanation": "because"}
            ],
            "vocabulary": [
                {"word": "serendipity", "definition": "a happy accident", "example": "Pure serendipity."}
            ]
        });
        fs::write(
            dir.join(format!("category-{slug}.json")),
            serde_json::to_string_pretty(&doc).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn test_list_is_newest_first() {
        let temp = TempDir::new().unwrap();
        write_doc(temp.path(), "older", "2022-05-26T22:29:35Z");
        write_doc(temp.path(), "newest", "2024-01-10T08:00:00Z");
        write_doc(temp.path(), "middle", "2023-03-01T12:00:00Z");

        let list = list_quizzes(temp.path(), 10);
        let order: Vec<&str> = list.iter().map(|q| q.slug.as_str()).collect();
        assert_eq!(order, vec!["newest", "middle", "older"]);
        assert_eq!(list[0].thumbnail, "/img/img-newest.webp");
    }

    #[test]
    fn test_list_respects_count() {
        let temp = TempDir::new().unwrap();
        write_doc(temp.path(), "a", "2024-01-01T00:00:00Z");
        write_doc(temp.path(), "b", "2024-01-02T00:00:00Z");
        write_doc(temp.path(), "c", "2024-01-03T00:00:00Z");

        let list = list_quizzes(temp.path(), 2);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].slug, "c");
    }

    #[test]
    fn test_malformed_and_unrelated_files_are_skipped() {
        let temp = TempDir::new().unwrap();
        write_doc(temp.path(), "good", "2024-01-01T00:00:00Z");
        fs::write(temp.path().join("category-broken.json"), "{not json").unwrap();
        fs::write(temp.path().join("notes.txt"), "ignore me").unwrap();

        let list = list_quizzes(temp.path(), 10);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].slug, "good");
    }

    #[test]
    fn test_missing_directory_yields_empty_list() {
        let temp = TempDir::new().unwrap();
        let list = list_quizzes(&temp.path().join("nope"), 10);
        assert!(list.is_empty());
    }

    #[test]
    fn test_load_quiz_roundtrip() {
        let temp = TempDir::new().unwrap();
        write_doc(temp.path(), "00aba3e3", "2022-05-26T22:29:35Z");

        let doc = load_quiz(temp.path(), "00aba3e3").unwrap();
        assert_eq!(doc.movie_title, "Quiz 00aba3e3");
        assert_eq!(doc.quiz.len(), 1);
        assert_eq!(doc.quiz[0].choices.len(), 3);
        assert_eq!(doc.vocabulary[0].word, "serendipity");

        assert!(load_quiz(temp.path(), "missing").is_none());
    }

    #[test]
    fn test_load_quiz_rejects_path_escapes() {
        let temp = TempDir::new().unwrap();
        assert!(load_quiz(temp.path(), "../etc/passwd").is_none());
        assert!(load_quiz(temp.path(), "a/b").is_none());
        assert!(load_quiz(temp.path(), "").is_none());
    }
}
