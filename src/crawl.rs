use crate::config::AppConfig;
use crate::structs::*;

use log::{error, info};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::path::Path;

type Result<T> = std::result::Result<T, Box<dyn Error>>;

pub struct Crawler {
    client: Client,
    base: String,
}

impl Crawler {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .gzip(true)
            .default_headers(config.headers()?)
            .build()?;
        Ok(Crawler {
            client,
            base: format!("https://{}/appserver/phone", config.host),
        })
    }

    /// Walks the whole catalog: tab page, then every class's course listing,
    /// then every accumulated course's detail. One request at a time; the
    /// first failure anywhere aborts the run.
    pub async fn run(&self) -> Result<CrawlReport> {
        let tab = self.fetch::<TabPage>("sch4_TabPage.xhtml", &[]).await?;
        let (class_ids, mut courses) = seed_from_tab(tab)?;
        for &class_id in &class_ids {
            self.list_class(class_id, &mut courses).await?;
        }
        self.validate_courses(&courses).await
    }

    /// Pages through one class's course listing until the first empty page,
    /// stamping each course with the class id. The empty page is the only
    /// termination condition.
    async fn list_class(&self, class_id: i64, courses: &mut Vec<Course>) -> Result<()> {
        let mut page: u32 = 1;
        loop {
            info!("class {class_id} page {page}");
            let listing = self
                .fetch::<CoursePage>(
                    "sch4_CourseForClass.xhtml",
                    &[
                        ("classId", class_id.to_string()),
                        ("page", page.to_string()),
                        ("pushtime", "0".to_string()),
                    ],
                )
                .await?;
            if !absorb_page(courses, listing, class_id) {
                return Ok(());
            }
            page += 1;
        }
    }

    async fn validate_courses(&self, courses: &[Course]) -> Result<CrawlReport> {
        let mut report = CrawlReport::default();
        for course in courses {
            let detail = self
                .fetch::<CourseDetail>(
                    "sch4_CourseDetail.xhtml",
                    &[("courseId", course.course_id.to_string())],
                )
                .await?;
            let broken = broken_lessons(course, &detail.course.catalog);
            if broken.is_empty() {
                info!("complete: {}({})", course.course_name, course.course_id);
                report.complete += 1;
            } else {
                info!("incomplete: {}({})", course.course_name, course.course_id);
                report.incomplete += 1;
                report.broken.extend(broken);
            }
        }
        Ok(report)
    }

    /// Shared GET wrapper. Transport and JSON-shape failures alike are logged
    /// here, once, then propagated.
    async fn fetch<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        match self.try_fetch(path, query).await {
            Ok(value) => Ok(value),
            Err(err) => {
                error!("GET {path} failed: {err}");
                Err(err)
            }
        }
    }

    async fn try_fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let body = self
            .client
            .get(format!("{}/{}", self.base, path))
            .query(query)
            .send()
            .await?
            .text()
            .await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// One pass over the tab page: type-4 entries contribute their class id,
/// type-3 and type-4 entries contribute their embedded courses. Anything
/// else is a banner or promo block and contributes nothing.
pub fn seed_from_tab(tab: TabPage) -> Result<(Vec<i64>, Vec<Course>)> {
    let mut class_ids = Vec::new();
    let mut courses = Vec::new();
    for entry in tab.datas {
        if entry.kind == 4 {
            let class_id = entry.class_id.ok_or("type 4 tab entry without classId")?;
            info!("class {class_id}");
            class_ids.push(class_id);
        }
        if entry.kind == 3 || entry.kind == 4 {
            courses.extend(entry.courses);
        }
    }
    Ok((class_ids, courses))
}

/// Appends a listing page to the accumulator, stamping the owning class id.
/// Returns false on an empty page, which ends that class's pagination.
pub fn absorb_page(courses: &mut Vec<Course>, page: CoursePage, class_id: i64) -> bool {
    if page.datas.is_empty() {
        return false;
    }
    for mut course in page.datas {
        course.class_id = Some(class_id);
        courses.push(course);
    }
    true
}

/// One description line per lesson that fails the completeness check, in
/// catalog order. Empty for a complete course (an empty catalog passes).
pub fn broken_lessons(course: &Course, catalog: &[Lesson]) -> Vec<String> {
    catalog
        .iter()
        .filter(|lesson| !lesson.is_playable())
        .map(|lesson| {
            format!(
                "{}({})\t{}({})",
                course.course_name, course.course_id, lesson.lesson_name, lesson.lesson_id
            )
        })
        .collect()
}

/// Serializes the incomplete-lesson descriptions as a JSON string array,
/// overwriting `path`. Called only after the whole catalog validated.
pub fn write_report(path: &Path, report: &CrawlReport) -> Result<()> {
    std::fs::write(path, serde_json::to_string(&report.broken)?)?;
    Ok(())
}
