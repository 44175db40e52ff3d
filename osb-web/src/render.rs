//! Server-side HTML rendering
//!
//! Pages are built with `format!`. All text taken from score records or the
//! request is passed through [`escape`]; player names in links go through
//! [`encode_path_segment`].

use std::fmt::Write;

use osb_common::Translator;
use osb_engine::{CategoryView, HomeView, PlayerView, Record, ScoreEntry};
use serde_json::Value;

/// Record attributes tried, in order, as the beatmap's display name
const BEATMAP_TITLE_FIELDS: [&str; 3] = ["beatmap_title", "title", "beatmap"];

/// Escape text for HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode one URL path segment
pub fn encode_path_segment(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(byte as char);
        } else {
            let _ = write!(out, "%{:02X}", byte);
        }
    }
    out
}

fn format_pp(record: &Record) -> String {
    format!("{:.2}", record.pp_value())
}

fn beatmap_label(record: &Record) -> String {
    BEATMAP_TITLE_FIELDS
        .iter()
        .find_map(|field| record.extra.get(*field).and_then(Value::as_str))
        .map(str::to_string)
        .or_else(|| record.beatmap_id.as_ref().map(ToString::to_string))
        .unwrap_or_else(|| "-".to_string())
}

fn player_cell(record: &Record) -> String {
    match record.player_name() {
        Some(name) => format!(
            r#"<a href="/player/{}">{}</a>"#,
            encode_path_segment(name),
            escape(name)
        ),
        None => "-".to_string(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Shared page frame with navigation and language switcher
pub fn layout(t: &Translator<'_>, title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - osu! Specialist Bank</title>
    <style>
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: #1a1a1a;
            color: #e0e0e0;
            line-height: 1.6;
            max-width: 1100px;
            margin: 0 auto;
            padding: 20px;
        }}
        nav a {{
            color: #ff66aa;
            margin-right: 16px;
            text-decoration: none;
        }}
        h1, h2 {{
            color: #ff66aa;
        }}
        table {{
            width: 100%;
            border-collapse: collapse;
        }}
        th, td {{
            padding: 6px 10px;
            border-bottom: 1px solid #3a3a3a;
            text-align: left;
        }}
        td a {{
            color: #4a9eff;
        }}
        .summary span {{
            margin-right: 24px;
        }}
    </style>
</head>
<body>
    <header>
        <nav>
            <a href="/">{home}</a>
            <a href="/leaderboard/OVERALL">{leaderboard}</a>
            <a href="/process">{process}</a>
            <a href="/set_lang/da">DA</a>
            <a href="/set_lang/en">EN</a>
        </nav>
    </header>
    <main>
        <h1>{title}</h1>
{body}
    </main>
</body>
</html>"#,
        lang = escape(t.lang()),
        title = escape(title),
        home = escape(t.t("Forside")),
        leaderboard = escape(t.t("Leaderboard")),
        process = escape(t.t("Vores Proces")),
        body = body,
    )
}

/// Table of annotated scores; `show_rank` adds the category position column
fn entry_table(t: &Translator<'_>, entries: &[ScoreEntry], show_rank: bool) -> String {
    if entries.is_empty() {
        return format!("<p>{}</p>", escape(t.t("Ingen scores fundet")));
    }

    let mut rows = String::new();
    for (index, entry) in entries.iter().enumerate() {
        let rank_cell = if show_rank {
            format!(
                "<td>#{}</td>",
                entry.global_rank.map_or_else(|| "-".to_string(), |r| r.to_string())
            )
        } else {
            String::new()
        };
        let _ = write!(
            rows,
            r#"
            <tr><td>{}</td>{}<td>{}</td><td>{}</td><td><a href="/leaderboard/{}">{}</a></td><td>{}</td></tr>"#,
            index + 1,
            rank_cell,
            player_cell(&entry.record),
            escape(&beatmap_label(&entry.record)),
            encode_path_segment(&entry.category),
            escape(&entry.category),
            format_pp(&entry.record),
        );
    }

    let rank_header = if show_rank {
        format!("<th>{}</th>", escape(t.t("Placering")))
    } else {
        String::new()
    };

    format!(
        r#"        <table>
            <tr><th>#</th>{}<th>{}</th><th>{}</th><th>{}</th><th>PP</th></tr>{}
        </table>"#,
        rank_header,
        escape(t.t("Spiller")),
        escape(t.t("Beatmap")),
        escape(t.t("Kategori")),
        rows
    )
}

/// Table of one category's records
fn record_table(t: &Translator<'_>, records: &[Record]) -> String {
    if records.is_empty() {
        return format!("<p>{}</p>", escape(t.t("Ingen scores fundet")));
    }

    let mut rows = String::new();
    for (index, record) in records.iter().enumerate() {
        let _ = write!(
            rows,
            "
            <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            index + 1,
            player_cell(record),
            escape(&beatmap_label(record)),
            format_pp(record),
        );
    }

    format!(
        r#"        <table>
            <tr><th>#</th><th>{}</th><th>{}</th><th>PP</th></tr>{}
        </table>"#,
        escape(t.t("Spiller")),
        escape(t.t("Beatmap")),
        rows
    )
}

fn stats_block(t: &Translator<'_>, stats: &Value) -> String {
    let items = match stats {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| {
                format!(
                    "<li>{}: {}</li>",
                    escape(key),
                    escape(&value_text(value))
                )
            })
            .collect::<Vec<_>>()
            .join(""),
        other => format!("<li>{}</li>", escape(&value_text(other))),
    };
    format!(
        "        <h2>{}</h2>\n        <ul>{}</ul>",
        escape(t.t("Statistik")),
        items
    )
}

/// Home page
pub fn home_page(t: &Translator<'_>, view: &HomeView) -> String {
    let body = format!(
        r#"        <p class="summary"><span>{}: {}</span><span>{}: {}</span></p>
        <h2>{}</h2>
{}
        <h2>{}</h2>
{}"#,
        escape(t.t("Spillere")),
        view.player_count,
        escape(t.t("Scores")),
        view.score_count,
        escape(t.t("Top scores")),
        entry_table(t, &view.top_scores, false),
        escape(t.t("Seneste aktivitet")),
        entry_table(t, &view.recent_scores, false),
    );
    layout(t, t.t("Forside"), &body)
}

/// Category page with search form and category switcher
pub fn category_page(t: &Translator<'_>, view: &CategoryView, categories: &[&str]) -> String {
    let mut tabs = String::new();
    for category in categories {
        let _ = write!(
            tabs,
            r#"<a href="/leaderboard/{}">{}</a> "#,
            encode_path_segment(category),
            escape(category)
        );
    }

    let mut player_options = String::new();
    for player in &view.all_players {
        let _ = write!(player_options, r#"<option value="{}">"#, escape(player));
    }

    let stats = view
        .stats
        .as_ref()
        .map(|stats| stats_block(t, stats))
        .unwrap_or_default();

    let body = format!(
        r#"        <nav>{}</nav>
        <form method="get" action="/leaderboard/{}">
            <input type="search" name="q" list="players" value="{}" placeholder="{}">
            <datalist id="players">{}</datalist>
            <button type="submit">{}</button>
        </form>
{}
{}"#,
        tabs,
        encode_path_segment(&view.category),
        escape(view.search_query.as_deref().unwrap_or_default()),
        escape(t.t("Søg spiller")),
        player_options,
        escape(t.t("Søg")),
        stats,
        record_table(t, &view.scores),
    );
    layout(t, &view.category, &body)
}

/// Player profile page
pub fn player_page(t: &Translator<'_>, view: &PlayerView) -> String {
    let body = format!(
        "        <p class=\"summary\"><span>{}: {}</span></p>\n{}",
        escape(t.t("Scores")),
        view.scores.len(),
        entry_table(t, &view.scores, true),
    );
    layout(t, &view.username, &body)
}

/// Static description of how the leaderboards are assembled
pub fn process_page(t: &Translator<'_>) -> String {
    let body = format!(
        "        <p>{}</p>\n        <p>{}</p>",
        escape(t.t("Scores hentes fra flere kilder og samles pr. kategori.")),
        escape(t.t("Dubletter fjernes, og hver kategori sorteres efter PP.")),
    );
    layout(t, t.t("Vores Proces"), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use osb_common::Translations;
    use serde_json::json;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_encode_path_segment() {
        assert_eq!(encode_path_segment("Mr Bean/2"), "Mr%20Bean%2F2");
        assert_eq!(encode_path_segment("ø"), "%C3%B8");
        assert_eq!(encode_path_segment("abc-_.~"), "abc-_.~");
    }

    #[test]
    fn test_beatmap_label_fallbacks() {
        let titled: Record = serde_json::from_value(json!({"title": "Blue Zenith", "beatmap_id": 1})).unwrap();
        assert_eq!(beatmap_label(&titled), "Blue Zenith");

        let bare: Record = serde_json::from_value(json!({"beatmap_id": 658127})).unwrap();
        assert_eq!(beatmap_label(&bare), "658127");

        assert_eq!(beatmap_label(&Record::default()), "-");
    }

    #[test]
    fn test_player_page_escapes_record_text() {
        let catalog = Translations::builtin("da");
        let record: Record =
            serde_json::from_value(json!({"user": "<b>x</b>", "pp": 12.5})).unwrap();
        let view = PlayerView {
            username: "<b>x</b>".to_string(),
            scores: vec![ScoreEntry::new(record, "HD").with_rank(1)],
        };

        let html = player_page(&catalog.translator("en"), &view);
        assert!(!html.contains("<b>x</b>"));
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(html.contains("12.50"));
        assert!(html.contains("Our Process"));
    }
}
