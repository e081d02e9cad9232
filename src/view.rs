//! Pure projections from the record list to the view models the renderer and
//! CLI consume. The dataset is always passed in explicitly; nothing here
//! holds state between calls.

use serde::Serialize;

use crate::model::{class_title, Day, Record, DEFAULT_TITLE};

/// Overview card data for one class.
#[derive(Debug, Clone, Serialize)]
pub struct ClassSummary {
    pub class_id: String,
    pub title: String,
    pub performances: usize,
    pub cast_total: usize,
}

/// A class's schedule, partitioned by festival day. Source order is kept
/// within each day.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleView<'a> {
    pub class_id: String,
    pub title: String,
    pub day1: Vec<&'a Record>,
    pub day2: Vec<&'a Record>,
}

/// One summary per distinct class, in first-occurrence order.
pub fn class_summaries(records: &[Record]) -> Vec<ClassSummary> {
    let mut summaries: Vec<ClassSummary> = Vec::new();

    for record in records {
        if !summaries.iter().any(|s| s.class_id == record.class_id) {
            let class: Vec<&Record> = records
                .iter()
                .filter(|r| r.class_id == record.class_id)
                .collect();
            summaries.push(ClassSummary {
                class_id: record.class_id.clone(),
                title: display_title(&record.class_id, &class),
                performances: class.len(),
                cast_total: class.iter().map(|r| r.cast().len()).sum(),
            });
        }
    }

    summaries
}

/// Day-partitioned schedule for one class, or `None` when the class has no
/// records at all.
pub fn schedule_view<'a>(records: &'a [Record], class_id: &str) -> Option<ScheduleView<'a>> {
    let class: Vec<&Record> = records.iter().filter(|r| r.class_id == class_id).collect();
    if class.is_empty() {
        return None;
    }

    let title = display_title(class_id, &class);
    let (day1, day2) = class.into_iter().partition(|r| r.day == Day::Day1);
    Some(ScheduleView {
        class_id: class_id.to_owned(),
        title,
        day1,
        day2,
    })
}

/// Title shown for a class: the static table first, then any `play_title`
/// the schedule file carries, then the generic fallback.
fn display_title(class_id: &str, class_records: &[&Record]) -> String {
    class_title(class_id)
        .map(str::to_owned)
        .or_else(|| {
            class_records
                .iter()
                .find_map(|r| r.play_title.clone())
        })
        .unwrap_or_else(|| DEFAULT_TITLE.to_owned())
}
