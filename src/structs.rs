use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct TabPage {
    pub datas: Vec<TabEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabEntry {
    #[serde(rename = "type")]
    pub kind: i64,
    pub class_id: Option<i64>,
    #[serde(default)]
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub course_id: i64,
    pub course_name: String,
    #[serde(default)]
    pub class_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CoursePage {
    pub datas: Vec<Course>,
}

#[derive(Debug, Deserialize)]
pub struct CourseDetail {
    pub course: CourseBody,
}

#[derive(Debug, Deserialize)]
pub struct CourseBody {
    pub catalog: Vec<Lesson>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub lesson_id: i64,
    pub lesson_name: String,
    #[serde(default)]
    pub video_size: Option<f64>,
    #[serde(default)]
    pub length: Option<f64>,
}

impl Lesson {
    /// A lesson is playable only with strictly positive video size and
    /// length; a missing or null field reads as zero.
    pub fn is_playable(&self) -> bool {
        self.video_size.unwrap_or(0.0) > 0.0 && self.length.unwrap_or(0.0) > 0.0
    }
}

#[derive(Debug, Default)]
pub struct CrawlReport {
    pub complete: u64,
    pub incomplete: u64,
    pub broken: Vec<String>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tab_entry_without_class_id_or_courses_parses() {
        let entry: TabEntry = serde_json::from_str(r#"{"type":1,"title":"banner"}"#).unwrap();
        assert_eq!(entry.kind, 1);
        assert!(entry.class_id.is_none());
        assert!(entry.courses.is_empty());
    }

    #[test]
    fn lesson_numeric_fields_tolerate_null_and_absent() {
        let missing: Lesson = serde_json::from_str(r#"{"lessonId":1,"lessonName":"a"}"#).unwrap();
        let null: Lesson = serde_json::from_str(
            r#"{"lessonId":2,"lessonName":"b","videoSize":null,"length":null}"#,
        )
        .unwrap();
        assert!(!missing.is_playable());
        assert!(!null.is_playable());
    }

    #[test]
    fn lesson_playable_needs_both_fields_positive() {
        let size_only: Lesson = serde_json::from_str(
            r#"{"lessonId":3,"lessonName":"c","videoSize":512.5,"length":0}"#,
        )
        .unwrap();
        let both: Lesson = serde_json::from_str(
            r#"{"lessonId":4,"lessonName":"d","videoSize":512,"length":61}"#,
        )
        .unwrap();
        assert!(!size_only.is_playable());
        assert!(both.is_playable());
    }
}
