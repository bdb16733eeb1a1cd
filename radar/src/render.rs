//! Turn a `Report` into the message handed to the delivery side.
//!

use crate::{escape_markdown, Report};

/// Render the whole message, `None` means "do not send anything".
///
pub fn render_message(report: &Report, area: &str, diagnostic: bool) -> Option<String> {
    let area = escape_markdown(&area.to_uppercase());

    match report {
        Report::NoTraffic if diagnostic => Some(format!(
            "🧪 *PLANE-BOT TEST*\nNo special flights in the {area} area."
        )),
        Report::NoTraffic => None,
        Report::Alerts { entries, dropped } => {
            let header = if diagnostic {
                "🧪 *PLANE-BOT TEST*".to_string()
            } else {
                format!("✈️ *{area} RADAR*")
            };

            let mut parts = vec![header];
            parts.extend(entries.iter().map(|e| e.text.clone()));
            if *dropped > 0 {
                parts.push(format!("(+{dropped} more)"));
            }
            Some(parts.join("\n\n"))
        }
    }
}
