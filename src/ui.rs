use console::{strip_ansi_codes, Term};
use indicatif::{ProgressBar, ProgressStyle};
use marvel_protocol::{parse_timestamp, Character, ResourceList};
use owo_colors::OwoColorize;
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

/// Characters of a description shown in list rows
pub const DESCRIPTION_PREVIEW_CHARS: usize = 200;
/// Related items listed per section in the detail view
pub const FEATURED_ITEMS_LIMIT: usize = 10;

/// Terminal UI utilities
pub struct UI {
    term: Term,
}

impl UI {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    /// Helper method to conditionally apply color based on terminal support
    fn colorize<F>(&self, text: &str, color_fn: F) -> String
    where
        F: FnOnce(&str) -> String,
    {
        if self.supports_color() {
            color_fn(text)
        } else {
            text.to_string()
        }
    }

    /// Print a success message (color only if supported)
    pub fn success(&self, message: &str) {
        let output = self.colorize(message, |m| m.green().bold().to_string());
        println!("{}", output);
    }

    /// Print an error message (color only if supported)
    pub fn error(&self, message: &str) {
        let output = self.colorize(message, |m| m.red().bold().to_string());
        eprintln!("{}", output);
    }

    /// Print a warning message (color only if supported)
    pub fn warning(&self, message: &str) {
        let output = self.colorize(message, |m| m.yellow().bold().to_string());
        println!("{}", output);
    }

    /// Print an info message (color only if supported)
    pub fn info(&self, message: &str) {
        let output = self.colorize(message, |m| m.blue().bold().to_string());
        println!("{}", output);
    }

    pub fn dimmed(&self, message: &str) {
        let output = self.colorize(message, |m| m.dimmed().to_string());
        println!("{}", output);
    }

    pub fn format_credentials_status(&self, configured: bool) -> String {
        if configured {
            self.colorize("Configured", |t| t.green().to_string())
        } else {
            self.colorize("Not configured", |t| t.red().to_string())
        }
    }

    pub fn format_server_status(&self, connected: bool) -> String {
        if connected {
            self.colorize("Connected", |t| t.green().to_string())
        } else {
            self.colorize("Connection failed", |t| t.red().to_string())
        }
    }

    /// Print a blank line for spacing
    pub fn blank_line(&self) {
        println!();
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        let term_width = self.width();
        let title_len = title.width() + 4; // 2 spaces on each side
        let line_len = if term_width > title_len {
            ((term_width - title_len) / 2).min(30)
        } else {
            0
        };

        let line = "═".repeat(line_len);

        println!();
        if self.supports_color() {
            println!("{} {} {}", line.cyan(), title.cyan().bold(), line.cyan());
        } else {
            println!("{} {} {}", line, title, line);
        }
        println!();
    }

    /// Print a sub-section title
    pub fn section(&self, title: &str) {
        println!();
        println!("{}", self.colorize(title, |t| t.bold().underline().to_string()));
    }

    /// Create a card-style display for information
    pub fn card(&self, title: &str, content: Vec<(&str, String)>) {
        let term_width = self.width();
        let card_width = term_width
            .saturating_sub(4) // Leave more space for terminal margins
            .clamp(50, 80); // Minimum and maximum width

        let supports_color = self.supports_color();

        // Card header
        println!("╭{}╮", "─".repeat(card_width - 2));
        let title_width = title.width();
        let title_spaces = card_width.saturating_sub(title_width + 4);
        if supports_color {
            println!("│ {} {}│", title.cyan().bold(), " ".repeat(title_spaces));
        } else {
            println!("│ {} {}│", title, " ".repeat(title_spaces));
        }
        println!("├{}┤", "─".repeat(card_width - 2));

        // Card content
        for (label, value) in content {
            // Strip ANSI codes for width calculations
            let label_plain = strip_ansi_codes(label);
            let value_plain = strip_ansi_codes(&value);

            let content_width = label_plain.width() + value_plain.width() + 4; // ": " + 2 spaces padding

            let spaces = if content_width < card_width - 1 {
                card_width - content_width - 1
            } else {
                1 // At least one space
            };

            if supports_color {
                println!("│ {}: {}{}│", label.dimmed(), value, " ".repeat(spaces));
            } else {
                println!("│ {}: {}{}│", label, value, " ".repeat(spaces));
            }
        }

        // Card footer
        println!("╰{}╯", "─".repeat(card_width - 2));
        println!();
    }

    /// One numbered row of the list view
    pub fn character_row(&self, number: usize, character: &Character) {
        let prefix = format!("{:>4}. ", number);
        let date = format_short_date(&character.modified);
        let used = prefix.width() + character.name.width() + date.width();
        let padding = self.width().min(80).saturating_sub(used).max(2);

        println!(
            "{}{}{}{}",
            prefix,
            self.colorize(&character.name, |n| n.bold().to_string()),
            " ".repeat(padding),
            self.colorize(&date, |d| d.dimmed().to_string())
        );

        if !character.description.is_empty() {
            println!(
                "      {}",
                truncate_description(&character.description, DESCRIPTION_PREVIEW_CHARS)
            );
        }
        println!(
            "      {}",
            self.colorize(&count_summary(character), |s| s.cyan().to_string())
        );
    }

    /// One card of the gallery view
    pub fn gallery_card(&self, character: &Character, image_url: &str) {
        println!("{}", self.colorize(&character.name, |n| n.bold().to_string()));
        println!("  {}", self.colorize(image_url, |u| u.dimmed().to_string()));

        let badges = badges(character);
        if !badges.is_empty() {
            let rendered: Vec<String> = badges
                .iter()
                .map(|b| self.colorize(&format!("[{}]", b), |t| t.magenta().to_string()))
                .collect();
            println!("  {}", rendered.join(" "));
        }
        println!();
    }

    /// Full record for the detail view
    pub fn character_detail(&self, character: &Character, image_url: &str) {
        self.header(&character.name);
        println!("Image: {}", image_url);

        if !character.description.is_empty() {
            self.section("Description");
            println!("{}", character.description);
        }

        self.section("Appearances");
        for (label, count) in [
            ("Comics", character.comics.available),
            ("Series", character.series.available),
            ("Stories", character.stories.available),
            ("Events", character.events.available),
        ] {
            println!(
                "  {:<8} {}",
                label,
                self.colorize(&count.to_string(), |c| c.cyan().bold().to_string())
            );
        }

        self.item_section("Featured Comics", &character.comics);
        self.item_section("Featured Series", &character.series);

        if !character.urls.is_empty() {
            self.section("Links");
            for (label, url) in link_labels(character) {
                println!("  {}: {}", label, url);
            }
        }

        println!();
        self.dimmed(&format!(
            "Last Modified: {}",
            format_long_date(&character.modified)
        ));
    }

    fn item_section(&self, title: &str, list: &ResourceList) {
        let items = featured_items(list, FEATURED_ITEMS_LIMIT);
        if items.is_empty() {
            return;
        }
        self.section(title);
        for name in items {
            println!("  • {}", name);
        }
    }

    /// Get terminal width for responsive layout
    pub fn width(&self) -> usize {
        self.term.size().1 as usize
    }

    /// Check if terminal supports color
    pub fn supports_color(&self) -> bool {
        self.term.features().colors_supported()
    }
}

impl Default for UI {
    fn default() -> Self {
        Self::new()
    }
}

/// Spinner shown on stderr while a request is in flight
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// First `max_chars` characters, with `...` appended when anything was cut
pub fn truncate_description(description: &str, max_chars: usize) -> String {
    match description.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &description[..byte_index]),
        None => description.to_string(),
    }
}

/// `Apr 29, 2014`
pub fn format_short_date(modified: &str) -> String {
    format_date(modified, "%b %-d, %Y")
}

/// `April 29, 2014`
pub fn format_long_date(modified: &str) -> String {
    format_date(modified, "%B %-d, %Y")
}

fn format_date(modified: &str, pattern: &str) -> String {
    parse_timestamp(modified)
        .map(|ts| ts.format(pattern).to_string())
        .unwrap_or_else(|| "Unknown date".to_string())
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn count_summary(character: &Character) -> String {
    format!(
        "Comics: {}  Series: {}  Stories: {}",
        character.comics.available, character.series.available, character.stories.available
    )
}

/// Gallery badges; only non-zero counts get one
pub fn badges(character: &Character) -> Vec<String> {
    let mut badges = Vec::new();
    if character.comics.available > 0 {
        badges.push(format!("{} Comics", character.comics.available));
    }
    if character.series.available > 0 {
        badges.push(format!("{} Series", character.series.available));
    }
    badges
}

pub fn featured_items(list: &ResourceList, limit: usize) -> Vec<&str> {
    list.items.iter().take(limit).map(|i| i.name.as_str()).collect()
}

/// Link labels with the first letter upper-cased, paired with their URLs
pub fn link_labels(character: &Character) -> Vec<(String, &str)> {
    character
        .urls
        .iter()
        .map(|u| (capitalize(&u.kind), u.url.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::{character, character_with_counts};
    use marvel_protocol::{ExternalUrl, ResourceSummary};

    #[test]
    fn test_truncate_description() {
        let long = "x".repeat(250);
        let truncated = truncate_description(&long, DESCRIPTION_PREVIEW_CHARS);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));

        let exact = "y".repeat(200);
        assert_eq!(truncate_description(&exact, 200), exact);
        assert_eq!(truncate_description("short", 200), "short");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "é".repeat(5);
        assert_eq!(truncate_description(&text, 3), "ééé...");
    }

    #[test]
    fn test_date_formats() {
        assert_eq!(format_short_date("2014-04-29T14:18:17-0400"), "Apr 29, 2014");
        assert_eq!(format_long_date("2013-09-18T15:54:04-0400"), "September 18, 2013");
        assert_eq!(format_long_date("not a date"), "Unknown date");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("detail"), "Detail");
        assert_eq!(capitalize("comiclink"), "Comiclink");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_badges_only_for_non_zero_counts() {
        assert!(badges(&character_with_counts(1, "A", 0, 0, 9)).is_empty());
        assert_eq!(
            badges(&character_with_counts(1, "A", 12, 3, 0)),
            vec!["12 Comics", "3 Series"]
        );
        assert_eq!(badges(&character_with_counts(1, "A", 0, 3, 0)), vec!["3 Series"]);
    }

    #[test]
    fn test_featured_items_capped() {
        let mut hero = character(1, "Hero");
        hero.comics.items = (0..15)
            .map(|i| ResourceSummary {
                name: format!("Comic #{}", i),
                resource_uri: String::new(),
                kind: None,
            })
            .collect();
        let items = featured_items(&hero.comics, FEATURED_ITEMS_LIMIT);
        assert_eq!(items.len(), 10);
        assert_eq!(items[0], "Comic #0");
        assert!(featured_items(&hero.series, FEATURED_ITEMS_LIMIT).is_empty());
    }

    #[test]
    fn test_link_labels() {
        let mut hero = character(1, "Hero");
        hero.urls = vec![
            ExternalUrl {
                kind: "detail".to_string(),
                url: "http://marvel.com/characters/1".to_string(),
            },
            ExternalUrl {
                kind: "wiki".to_string(),
                url: "http://marvel.com/universe/Hero".to_string(),
            },
        ];
        let labels = link_labels(&hero);
        assert_eq!(labels[0], ("Detail".to_string(), "http://marvel.com/characters/1"));
        assert_eq!(labels[1].0, "Wiki");
    }

    #[test]
    fn test_count_summary() {
        assert_eq!(
            count_summary(&character_with_counts(1, "A", 1, 2, 3)),
            "Comics: 1  Series: 2  Stories: 3"
        );
    }
}
