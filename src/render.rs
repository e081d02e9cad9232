//! Deterministic HTML rendering of the view models. String building only, no
//! I/O and no external assets; the same view model always produces identical
//! bytes.

use crate::model::{class_label, class_page, Day, Record};
use crate::view::{ClassSummary, ScheduleView};

const STYLE: &str = "\
body{font-family:sans-serif;margin:2rem auto;max-width:60rem;padding:0 1rem}\
table.schedule{border-collapse:collapse;width:100%;margin-bottom:2rem}\
table.schedule th,table.schedule td{border:1px solid #ccc;padding:.5rem .75rem;text-align:left}\
.class-card{border:1px solid #ccc;border-radius:.5rem;padding:1rem;margin-bottom:1rem}\
.class-card h2{margin:0 0 .25rem}\
.modal{display:none}\
.cast-number,.staff-number{font-weight:bold;margin-right:.5rem}";

// Deterministic push-order writer.
struct Html {
    buf: String,
}

impl Html {
    fn new() -> Self {
        Self {
            buf: String::with_capacity(8 * 1024),
        }
    }

    fn push<S: AsRef<str>>(&mut self, s: S) {
        self.buf.push_str(s.as_ref());
    }

    fn finish(self) -> String {
        self.buf
    }
}

fn esc(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn head(w: &mut Html, title: &str) {
    w.push("<!DOCTYPE html><html lang=\"ja\"><head><meta charset=\"utf-8\">");
    w.push("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    w.push("<title>");
    w.push(esc(title));
    w.push("</title><style>");
    w.push(STYLE);
    w.push("</style></head><body>");
}

/// Overview page: one card per class linking to its schedule page.
pub fn render_overview(summaries: &[ClassSummary]) -> String {
    let mut w = Html::new();
    head(&mut w, "上演スケジュール");
    w.push("<h1>上演スケジュール</h1>");

    for summary in summaries {
        w.push("<div class=\"class-card\"><h2><a href=\"");
        w.push(esc(&class_page(&summary.class_id)));
        w.push("\">");
        w.push(esc(&class_label(&summary.class_id)));
        w.push("</a></h2><p class=\"play-title\">");
        w.push(esc(&summary.title));
        w.push("</p><p class=\"counts\">公演 ");
        w.push(summary.performances.to_string());
        w.push("回 ・ キャスト延べ ");
        w.push(summary.cast_total.to_string());
        w.push("名</p></div>");
    }

    w.push("</body></html>");
    w.finish()
}

/// A class's schedule page: one table per non-empty day plus hidden detail
/// modals, one per performance.
pub fn render_schedule(view: &ScheduleView<'_>) -> String {
    let mut w = Html::new();
    let heading = format!("{} 上演スケジュール", class_label(&view.class_id));
    head(&mut w, &heading);
    w.push("<h1 id=\"schedule-title\">");
    w.push(esc(&heading));
    w.push("</h1><p id=\"schedule-description\">");
    w.push(esc(&view.title));
    w.push("</p>");

    if !view.day1.is_empty() {
        day_table(&mut w, Day::Day1, &view.day1);
    }
    if !view.day2.is_empty() {
        day_table(&mut w, Day::Day2, &view.day2);
    }
    for (day, rows) in [(Day::Day1, &view.day1), (Day::Day2, &view.day2)] {
        for (idx, record) in rows.iter().enumerate() {
            modal(&mut w, &modal_id(day, idx), record);
        }
    }

    w.push("</body></html>");
    w.finish()
}

/// Modal ids are the day label plus the 1-based position within that day's
/// table, so they stay stable under reordering of the other day.
pub fn modal_id(day: Day, index: usize) -> String {
    format!("modal-{}-{}", day.label(), index + 1)
}

fn day_table(w: &mut Html, day: Day, rows: &[&Record]) {
    w.push("<div class=\"schedule-day\"><h2>");
    w.push(day.label());
    w.push("</h2><table class=\"schedule\"><thead><tr>");
    w.push("<th>時間</th><th>演目</th><th>役者数</th><th>詳細</th>");
    w.push("</tr></thead><tbody>");

    for (idx, record) in rows.iter().enumerate() {
        w.push("<tr><td class=\"time-cell\">");
        w.push(esc(&record.time));
        w.push("</td><td class=\"title-cell\">");
        w.push(esc(&record.title));
        w.push("</td><td class=\"cast-count-cell\"><span class=\"cast-number\">");
        w.push(record.cast().len().to_string());
        w.push("名</span><span class=\"staff-number\">+");
        w.push(record.staff().len().to_string());
        w.push("名</span></td><td><button class=\"cast-btn\" data-modal=\"");
        w.push(modal_id(day, idx));
        w.push("\">詳細を見る</button></td></tr>");
    }

    w.push("</tbody></table></div>");
}

fn modal(w: &mut Html, id: &str, record: &Record) {
    let cast = record.cast();
    let staff = record.staff();

    w.push("<div id=\"");
    w.push(id);
    w.push("\" class=\"modal\"><div class=\"modal-content\">");
    w.push("<button class=\"close\" data-modal=\"");
    w.push(id);
    w.push("\">×</button><h2>");
    w.push(esc(&record.title));
    w.push(" 役者一覧</h2><div class=\"cast-section\"><h3>キャスト (");
    w.push(cast.len().to_string());
    w.push("名)</h3><ul>");
    for (n, name) in cast.iter().enumerate() {
        w.push("<li>");
        w.push((n + 1).to_string());
        w.push(". ");
        w.push(esc(name));
        w.push("</li>");
    }
    w.push("</ul></div><div class=\"staff-section\"><h3>スタッフ (");
    w.push(staff.len().to_string());
    w.push("名)</h3><ul>");
    for name in &staff {
        w.push("<li>");
        w.push(esc(name));
        w.push("</li>");
    }
    w.push("</ul></div></div></div>");
}
