//! Formatting helpers for the read commands: column-aligned tables and
//! human-readable ages.

use chrono::{DateTime, Utc};

/// Format a timestamp as an age like `2d`, `5h`, `30m` or `15s`.
pub fn format_age(timestamp: &DateTime<Utc>) -> String {
    let elapsed = Utc::now().signed_duration_since(*timestamp);
    if elapsed.num_seconds() < 0 {
        return "0s".to_string();
    }

    if elapsed.num_days() > 0 {
        format!("{}d", elapsed.num_days())
    } else if elapsed.num_hours() > 0 {
        format!("{}h", elapsed.num_hours())
    } else if elapsed.num_minutes() > 0 {
        format!("{}m", elapsed.num_minutes())
    } else {
        format!("{}s", elapsed.num_seconds())
    }
}

/// Render rows as a column-aligned table under the given headers.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    let header_cells: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{h:<w$}"))
        .collect();
    lines.push(header_cells.join("  ").trim_end().to_string());

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:<w$}"))
            .collect();
        lines.push(cells.join("  ").trim_end().to_string());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn format_age_picks_the_largest_unit() {
        assert_eq!(format_age(&(Utc::now() - Duration::seconds(45))), "45s");
        assert_eq!(format_age(&(Utc::now() - Duration::minutes(12))), "12m");
        assert_eq!(format_age(&(Utc::now() - Duration::hours(3))), "3h");
        assert_eq!(format_age(&(Utc::now() - Duration::days(7))), "7d");
    }

    #[test]
    fn format_age_clamps_future_timestamps() {
        assert_eq!(format_age(&(Utc::now() + Duration::hours(1))), "0s");
    }

    #[test]
    fn render_table_aligns_columns() {
        let table = render_table(
            &["NAME", "AGE"],
            &[
                vec!["alice".to_string(), "2d".to_string()],
                vec!["a-much-longer-name".to_string(), "5h".to_string()],
            ],
        );

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        let age_column = lines[0].find("AGE").unwrap();
        assert_eq!(lines[1].find("2d").unwrap(), age_column);
        assert_eq!(lines[2].find("5h").unwrap(), age_column);
    }

    #[test]
    fn render_table_with_no_rows_prints_headers_only() {
        assert_eq!(render_table(&["NAME", "AGE"], &[]), "NAME  AGE");
    }
}
