use super::theme::Ward;
use chrono::NaiveDateTime;
use termimad::{MadSkin, crossterm::style::Stylize};

#[derive(Clone)]
pub struct RenderOptions {
    pub datetime_format: String,
    pub use_color: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: Ward::skin(),
            opts: match config {
                Some(config) => config,
                None => RenderOptions {
                    datetime_format: "%Y-%m-%d %H:%M".to_string(),
                    use_color: true,
                },
            },
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            println!("{}", md.trim_end());
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            println!("{}", message.to_string().with(Ward::MUTED));
        } else {
            println!("{message}");
        }
    }

    /// Flash-style confirmation after a change.
    pub fn print_success(&self, message: &str) {
        if self.opts.use_color {
            println!("{}", message.to_string().with(Ward::GREEN));
        } else {
            println!("{message}");
        }
    }

    /// Input the user has to correct. Goes to stderr.
    pub fn print_rejection(&self, message: &str) {
        if self.opts.use_color {
            eprintln!("{}", message.to_string().with(Ward::RED));
        } else {
            eprintln!("{message}");
        }
    }

    pub fn date_time(&self, value: Option<NaiveDateTime>) -> String {
        value
            .map(|v| v.format(&self.opts.datetime_format).to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    /// Prints `rows` under `headers`: a markdown table with colors, tab-separated
    /// lines without.
    pub fn print_table(&self, headers: &[&str], rows: &[Vec<String>]) {
        if rows.is_empty() {
            self.print_info("Nothing found.");
            return;
        }
        if !self.opts.use_color {
            println!("{}", headers.join("\t"));
            for row in rows {
                println!("{}", row.join("\t"));
            }
            return;
        }

        let mut md = String::new();
        md.push_str(&markdown_row(headers.iter().copied()));
        md.push_str(&format!("|{}\n", ":-|".repeat(headers.len())));
        for row in rows {
            md.push_str(&markdown_row(row.iter().map(String::as_str)));
        }
        md.push_str(&format!("|{}\n", "-|".repeat(headers.len())));
        self.skin.print_text(&md);
    }
}

fn markdown_row<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    let cells: Vec<String> = cells.map(|c| c.replace('|', "/")).collect();
    format!("|{}|\n", cells.join("|"))
}

/// `value` or a dash.
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

pub fn id_or_dash(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn markdown_row_escapes_pipes() {
        assert_eq!(markdown_row(["a", "b|c"].into_iter()), "|a|b/c|\n");
    }

    #[test]
    fn dashes_for_missing_values() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("  ")), "-");
        assert_eq!(or_dash(Some("x")), "x");
        assert_eq!(id_or_dash(Some(4)), "4");
        assert_eq!(id_or_dash(None), "-");
    }

    #[test]
    fn date_time_uses_configured_format() {
        let renderer = Renderer::new(Some(RenderOptions {
            datetime_format: "%d/%m/%Y %H:%M".to_string(),
            use_color: false,
        }));
        let value = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(14, 30, 0);
        assert_eq!(renderer.date_time(value), "15/03/2024 14:30");
        assert_eq!(renderer.date_time(None), "-");
    }
}
