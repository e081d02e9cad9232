use crate::ScheduleError;

/// Parsed table: header names in source order plus one value row per data line.
///
/// The parser is deliberately small and forgiving. Quoting only groups commas
/// into a single field; quote characters themselves are stripped and there is
/// no doubled-quote escape. Rows shorter than the header are padded with empty
/// strings, longer rows lose their trailing extras.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |values| Row {
            headers: &self.headers,
            values,
        })
    }
}

/// One data row, addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    headers: &'a [String],
    values: &'a [String],
}

impl<'a> Row<'a> {
    /// Value under `name`, or the empty string when the column is absent.
    pub fn field(&self, name: &str) -> &'a str {
        self.headers
            .iter()
            .position(|h| h == name)
            .and_then(|idx| self.values.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn values(&self) -> &'a [String] {
        self.values
    }
}

/// Parse CSV text: first line is the header, every following line is a data
/// row. Blank data lines are kept as all-empty rows; callers that build typed
/// records discard them there, where the drop can be logged.
pub fn parse(text: &str) -> Result<Table, ScheduleError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ScheduleError::EmptyData);
    }

    let mut lines = text.split('\n');
    let headers: Vec<String> = parse_line(lines.next().unwrap_or(""))
        .into_iter()
        .map(|h| h.trim().to_owned())
        .collect();

    let rows = lines
        .map(|line| {
            let mut values = parse_line(line);
            values.resize(headers.len(), String::new());
            values.iter_mut().for_each(|v| *v = v.trim().to_owned());
            values
        })
        .collect();

    Ok(Table { headers, rows })
}

/// Split one line into fields with a quote toggle, so commas inside quoted
/// fields (a cast list, say) are not separators.
fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_count_matches_data_lines() {
        let table = parse("class,day,time\n3,1日目,10:00\n4,2日目,11:00\n5,1日目,12:00").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.headers(), ["class", "day", "time"]);
    }

    #[test]
    fn quoted_comma_stays_one_field() {
        let table = parse("class,day,time,title,cast,staff\n3,1日目,10:00,Show,\"A,B\",C").unwrap();
        let row = table.rows().next().unwrap();
        assert_eq!(row.field("class"), "3");
        assert_eq!(row.field("cast"), "A,B");
        assert_eq!(row.field("staff"), "C");
    }

    #[test]
    fn quotes_are_stripped_not_escaped() {
        let table = parse("a,b\n\"x\",\"y\"").unwrap();
        let row = table.rows().next().unwrap();
        assert_eq!(row.field("a"), "x");
        assert_eq!(row.field("b"), "y");
    }

    #[test]
    fn short_rows_pad_with_empty_strings() {
        let table = parse("a,b,c\n1,2").unwrap();
        let row = table.rows().next().unwrap();
        assert_eq!(row.field("b"), "2");
        assert_eq!(row.field("c"), "");
    }

    #[test]
    fn long_rows_drop_trailing_extras() {
        let table = parse("a,b\n1,2,3,4").unwrap();
        let row = table.rows().next().unwrap();
        assert_eq!(row.values(), ["1", "2"]);
    }

    #[test]
    fn blank_lines_become_empty_rows() {
        let table = parse("a,b\n1,2\n\n3,4").unwrap();
        assert_eq!(table.len(), 3);
        let middle = table.rows().nth(1).unwrap();
        assert_eq!(middle.values(), ["", ""]);
    }

    #[test]
    fn missing_column_reads_empty() {
        let table = parse("a,b\n1,2").unwrap();
        let row = table.rows().next().unwrap();
        assert_eq!(row.field("nope"), "");
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(parse(""), Err(ScheduleError::EmptyData)));
        assert!(matches!(parse("  \n \n"), Err(ScheduleError::EmptyData)));
    }

    #[test]
    fn values_are_trimmed() {
        let table = parse(" a , b \n 1 , 2 ").unwrap();
        assert_eq!(table.headers(), ["a", "b"]);
        let row = table.rows().next().unwrap();
        assert_eq!(row.field("a"), "1");
        assert_eq!(row.field("b"), "2");
    }
}
