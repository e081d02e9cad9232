use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::{debug, warn};

use crate::csv::Table;
use crate::ScheduleError;

pub type Records = Vec<Record>;

const REQUIRED_COLUMNS: [&str; 6] = ["class", "day", "time", "title", "cast", "staff"];

/// Fallback production titles, keyed by bare class id.
static CLASS_TITLES: Lazy<HashMap<&str, &str>> = Lazy::new(|| {
    HashMap::from([
        ("1", "話が違う！"),
        ("2", "ある脱出ゲーム"),
        ("3", "ポプコーンの降る街"),
        (
            "4",
            "庭園の何処かに潜伏していると仮定される盗賊の行方に関する一考察 ～羽柴邸に於ける旧ロマノフ家のダイヤ盗難事件を基に～",
        ),
        ("5", "チェンジ・ザ・ワールド"),
        ("6", "七人の部長"),
        ("7", "サマータイムマシンブルース"),
        ("8", "Memento ～忘却の夏"),
    ])
});

pub const DEFAULT_TITLE: &str = "演劇公演";

/// Festival day of a performance slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Day {
    Day1,
    Day2,
}

impl Day {
    /// Recognizes the two day labels used by the schedule file. Anything else
    /// is a data error the caller is expected to surface.
    pub fn parse(value: &str) -> Option<Day> {
        match value {
            "1日目" => Some(Day::Day1),
            "2日目" => Some(Day::Day2),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Day::Day1 => "1日目",
            Day::Day2 => "2日目",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One performance slot, immutable once built from the parsed table.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub class_id: String,
    pub day: Day,
    pub time: String,
    pub title: String,
    pub cast_raw: String,
    pub staff_raw: String,
    pub play_title: Option<String>,
}

impl Record {
    /// Cast names, recomputed from the raw field on every call.
    pub fn cast(&self) -> Vec<&str> {
        split_names(&self.cast_raw)
    }

    /// Staff names, recomputed from the raw field on every call.
    pub fn staff(&self) -> Vec<&str> {
        split_names(&self.staff_raw)
    }
}

/// Split a comma-joined name list, trimming each piece and dropping empty
/// ones. Order is preserved.
pub fn split_names(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Build typed records from a parsed table.
///
/// The header must carry the six required columns. Blank rows are dropped
/// quietly, rows with an unrecognized day label are dropped with a warning
/// since they would otherwise vanish from every day group.
pub fn records_from_table(table: &Table) -> Result<Records, ScheduleError> {
    for column in REQUIRED_COLUMNS {
        if table.column(column).is_none() {
            return Err(ScheduleError::MissingColumn(column));
        }
    }

    let mut records = Vec::with_capacity(table.len());
    for row in table.rows() {
        let class = row.field("class");
        let time = row.field("time");
        let title = row.field("title");
        if class.is_empty() && time.is_empty() && title.is_empty() {
            debug!("skipping blank schedule row");
            continue;
        }

        let day_value = row.field("day");
        let Some(day) = Day::parse(day_value) else {
            warn!(class, day = day_value, "unrecognized day label, row excluded");
            continue;
        };

        let play_title = row.field("play_title");
        records.push(Record {
            class_id: class_id(class).to_owned(),
            day,
            time: time.to_owned(),
            title: title.to_owned(),
            cast_raw: row.field("cast").to_owned(),
            staff_raw: row.field("staff").to_owned(),
            play_title: (!play_title.is_empty()).then(|| play_title.to_owned()),
        });
    }

    Ok(records)
}

/// Bare class id from the source column, which holds either `3` or `3組`.
fn class_id(value: &str) -> &str {
    value.strip_suffix('組').unwrap_or(value)
}

/// Display label for a class: bare id plus the class suffix.
pub fn class_label(id: &str) -> String {
    format!("{id}組")
}

/// Page name a class's schedule is published under.
pub fn class_page(id: &str) -> String {
    format!("{id}.html")
}

/// Static fallback title for a class, when the schedule file carries none.
pub fn class_title(id: &str) -> Option<&'static str> {
    CLASS_TITLES.get(id).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv;

    #[test]
    fn split_names_trims_and_drops_empties() {
        assert_eq!(split_names("A, B ,,C"), ["A", "B", "C"]);
        assert_eq!(split_names(""), Vec::<&str>::new());
        assert_eq!(split_names(" , ,"), Vec::<&str>::new());
    }

    #[test]
    fn day_labels_round_trip() {
        assert_eq!(Day::parse("1日目"), Some(Day::Day1));
        assert_eq!(Day::parse("2日目"), Some(Day::Day2));
        assert_eq!(Day::parse("3日目"), None);
        assert_eq!(Day::Day2.label(), "2日目");
    }

    #[test]
    fn records_require_the_schedule_columns() {
        let table = csv::parse("class,day,time\n3,1日目,10:00").unwrap();
        assert!(matches!(
            records_from_table(&table),
            Err(ScheduleError::MissingColumn("title"))
        ));
    }

    #[test]
    fn quoted_cast_survives_into_the_record() {
        let table =
            csv::parse("class,day,time,title,cast,staff\n3,1日目,10:00,Show,\"A,B\",C").unwrap();
        let records = records_from_table(&table).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].class_id, "3");
        assert_eq!(records[0].cast_raw, "A,B");
        assert_eq!(records[0].cast(), ["A", "B"]);
        assert_eq!(records[0].staff(), ["C"]);
    }

    #[test]
    fn class_suffix_is_stripped() {
        let table =
            csv::parse("class,day,time,title,cast,staff\n3組,1日目,10:00,Show,A,B").unwrap();
        let records = records_from_table(&table).unwrap();
        assert_eq!(records[0].class_id, "3");
    }

    #[test]
    fn blank_and_unknown_day_rows_are_dropped() {
        let text = "class,day,time,title,cast,staff\n\
                    3,1日目,10:00,Show,A,B\n\
                    \n\
                    4,someday,11:00,Other,C,D\n";
        let table = csv::parse(text).unwrap();
        assert_eq!(table.len(), 3);
        let records = records_from_table(&table).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].class_id, "3");
    }

    #[test]
    fn play_title_is_optional() {
        let text = "class,day,time,title,cast,staff,play_title\n\
                    3,1日目,10:00,Show,A,B,ポプコーンの降る街\n\
                    3,2日目,10:00,Show,A,B,\n";
        let records = records_from_table(&csv::parse(text).unwrap()).unwrap();
        assert_eq!(records[0].play_title.as_deref(), Some("ポプコーンの降る街"));
        assert_eq!(records[1].play_title, None);
    }

    #[test]
    fn display_conventions() {
        assert_eq!(class_label("3"), "3組");
        assert_eq!(class_page("3"), "3.html");
        assert_eq!(class_title("6"), Some("七人の部長"));
        assert_eq!(class_title("9"), None);
    }
}
