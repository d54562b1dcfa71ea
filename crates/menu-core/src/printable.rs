//! # printable
//!
//! why: give the kitchen a menu sheet that prints cleanly without the app
//! relations: renders builder.rs previews, stamped via clock.rs
//! what: self-contained rtl html document, download file name

use chrono::DateTime;
use chrono_tz::Tz;

use crate::builder::Preview;
use crate::clock::format_timestamp;

const STYLE: &str = r#"
html, body { direction: rtl; text-align: right; }
body { background: #fffdf8; font-family: "Arial Hebrew", Arial, sans-serif; }
h2 { font-weight: 800; }
.print-table { border-collapse: collapse; width: 100%; background: #ffffff; }
.print-table th, .print-table td { border: 1px solid #e0e0e0; padding: 8px 10px; }
.print-table th { background: #e8f5e9; }
"#;

/// column titles of the printed table
pub const COLUMNS: [&str; 3] = ["#", "שם המנה", "הערות"];

/// Render the preview as a standalone html page
pub fn render(preview: &Preview, generated_at: &DateTime<Tz>) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"he\" dir=\"rtl\">\n<head>\n");
    html.push_str("  <meta charset=\"utf-8\"/>\n");
    html.push_str(&format!("  <style>{STYLE}</style>\n"));
    html.push_str("  <title>תפריט להדפסה</title>\n</head>\n<body>\n");
    html.push_str("  <h2>🧾 תפריט</h2>\n");
    html.push_str("  <table class=\"print-table\">\n    <thead><tr>");
    for column in COLUMNS {
        html.push_str(&format!("<th>{}</th>", escape(column)));
    }
    html.push_str("</tr></thead>\n    <tbody>\n");
    for row in &preview.rows {
        html.push_str(&format!(
            "      <tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            row.number,
            escape(&row.dish_name),
            escape(&row.notes)
        ));
    }
    html.push_str("    </tbody>\n  </table>\n");
    html.push_str(&format!(
        "  <p style=\"margin-top:10px;\">נבנה בתאריך: {}</p>\n",
        format_timestamp(generated_at)
    ));
    html.push_str("</body>\n</html>\n");
    html
}

/// suggested download name, minute resolution
pub fn file_name(at: &DateTime<Tz>) -> String {
    format!("menu_{}.html", at.format("%Y%m%d_%H%M"))
}

fn escape(text: &str) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::PreviewRow;
    use crate::category::Category;
    use crate::clock::DEFAULT_TIMEZONE;
    use chrono::TimeZone;

    fn at() -> DateTime<Tz> {
        DEFAULT_TIMEZONE.with_ymd_and_hms(2024, 3, 5, 9, 7, 30).unwrap()
    }

    #[test]
    fn file_name_uses_minute_stamp() {
        assert_eq!(file_name(&at()), "menu_20240305_0907.html");
    }

    #[test]
    fn document_embeds_rows_and_timestamp() {
        let preview = Preview {
            rows: vec![PreviewRow {
                number: 1,
                category: Category::Soups,
                dish_name: "מרק עדשים".into(),
                notes: "חריף".into(),
            }],
        };
        let html = render(&preview, &at());

        assert!(html.contains("<td>1</td><td>מרק עדשים</td><td>חריף</td>"));
        assert!(html.contains("נבנה בתאריך: 2024-03-05 09:07:30"));
        assert!(html.contains("<meta charset=\"utf-8\"/>"));
    }

    #[test]
    fn cell_text_is_escaped() {
        let preview = Preview {
            rows: vec![PreviewRow {
                number: 1,
                category: Category::Soups,
                dish_name: "<b>soup</b> & bread".into(),
                notes: String::new(),
            }],
        };
        let html = render(&preview, &at());
        assert!(html.contains("&lt;b&gt;soup&lt;/b&gt; &amp; bread"));
        assert!(!html.contains("<b>soup</b>"));
    }
}
