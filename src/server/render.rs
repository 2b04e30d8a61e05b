//! HTML page for the schedule

use chrono::SecondsFormat;

use crate::schedule::ScheduleSnapshot;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html>
	<head>
		<title>Match på TV:n</title>
		<meta charset="utf-8" />
		<meta name="viewport" content="width=device-width, initial-scale=1" />
		<link href="https://fonts.googleapis.com/css?family=Open+Sans" rel="stylesheet" type="text/css">
		<style type="text/css">
			body {
				background: #efefef;
				color: #333333;
				font-family: 'Open Sans', arial;
			}

			ul {
				list-style: none;
				margin: 0;
				padding: 0;
			}

			h2 {
				margin: 5px 0;
			}

			li {
				font-size: 14px;
				padding: 3px 0;
			}

			em {
				font-size: 10px;
			}

			.time {
				color: #c5752a;
			}

			.league-channel {
				color: #575e5b;
			}

			.refresh-error {
				color: #a33a2a;
				font-size: 12px;
			}

			@media all and (max-width: 500px) {
				.league-channel {
					display: block;
				}
			}
		</style>
	</head>
	<body>
		Fotboll på TV:n.
"#;

const PAGE_FOOT: &str = "\t</body>\n</html>\n";

/// Escapes text for use inside HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Refresh time as RFC 3339 with whole seconds, or `-` if never refreshed.
pub fn format_refreshed_at(snapshot: &ScheduleSnapshot) -> String {
    snapshot
        .refreshed_at
        .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| "-".to_string())
}

/// Renders the full schedule page: one heading per day, one list item per match.
pub fn render_schedule_page(snapshot: &ScheduleSnapshot) -> String {
    let mut html = String::from(PAGE_HEAD);

    for (day, matches) in snapshot.schedule.iter() {
        html.push_str(&format!("\t\t<h2>{}</h2>\n\t\t<ul>\n", escape_html(day)));
        for game in matches {
            html.push_str(&format!(
                "\t\t\t<li>\n\t\t\t\t<span class=\"time\">{}</span>\n\t\t\t\t<span class=\"name\">{}</span>\n\t\t\t\t<span class=\"league-channel\">({}, {})</span>\n\t\t\t</li>\n",
                escape_html(&game.time),
                escape_html(&game.name),
                escape_html(&game.league),
                escape_html(&game.channel),
            ));
        }
        html.push_str("\t\t</ul>\n");
    }

    if let Some(error) = &snapshot.refresh_error {
        html.push_str(&format!(
            "\t\t<p class=\"refresh-error\">Kunde inte uppdatera: {}</p>\n",
            escape_html(error)
        ));
    }

    html.push_str(&format!(
        "\t\t<em>Uppdaterad {}</em>\n",
        format_refreshed_at(snapshot)
    ));
    html.push_str(PAGE_FOOT);
    html
}
