//! HTML pages for the prediction form.

const STYLE: &str = "body { font-family: sans-serif; max-width: 32em; margin: 2em auto; } \
                     label { display: block; margin-top: 0.75em; } \
                     .error { color: #b00020; }";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>{STYLE}</style>\n\
         </head>\n\
         <body>\n\
         <h1>{title}</h1>\n\
         {body}\n\
         </body>\n\
         </html>\n"
    )
}

/// Escapes text for inclusion in element content or quoted attributes.
pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Form field names and their labels, in display order.
pub(crate) const FIELDS: [(&str, &str); 5] = [
    ("cycles", "Number of cycles"),
    ("temperature", "Current temperature (&deg;C)"),
    ("soc", "Current state of charge (%)"),
    ("kms", "Average kilometers driven per day"),
    ("months_old", "Battery age (months)"),
];

pub(crate) fn index() -> String {
    let inputs: String = FIELDS
        .iter()
        .map(|(name, label)| {
            format!(
                "<label for=\"{name}\">{label}</label>\n\
                 <input type=\"number\" id=\"{name}\" name=\"{name}\" required>\n"
            )
        })
        .collect();

    page(
        "Battery Health Prediction",
        &format!(
            "<form action=\"/process_input\" method=\"post\">\n\
             {inputs}\
             <p><button type=\"submit\">Predict</button></p>\n\
             </form>"
        ),
    )
}

pub(crate) fn result(predicted_health: i64, battery_status: &str) -> String {
    page(
        "Prediction Result",
        &format!(
            "<p>Predicted Battery Health: {predicted_health}%</p>\n\
             <p>{}</p>\n\
             <p><a href=\"/\">Back</a></p>",
            escape(battery_status)
        ),
    )
}

pub(crate) fn error(message: &str) -> String {
    page(
        "Error",
        &format!(
            "<p class=\"error\">{}</p>\n\
             <p><a href=\"/\">Back</a></p>",
            escape(message)
        ),
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn escape_markup() {
        assert_eq!(
            escape(r#"<b class="x">Tom & 'Jerry'</b>"#),
            "&lt;b class=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn index_has_every_field() {
        let html = index();
        for (name, _) in FIELDS {
            assert!(html.contains(&format!("name=\"{name}\"")), "{name}");
        }
    }

    #[test]
    fn error_is_escaped() {
        let html = error("<script>");
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
