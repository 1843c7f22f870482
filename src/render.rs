use crate::asr::AudioFormat;

/// Produces the HTML page shown for both GET and POST.
pub trait PageRenderer: Send + Sync {
    /// Render the full document. The result block is present only when `transcription` is `Some`.
    fn render(&self, transcription: Option<&str>) -> String;
}

const PAGE_HEAD: &str = r#"<!doctype html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Speech Recognition</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            background: linear-gradient(135deg, #74ebd5 0%, #9face6 100%);
            display: flex;
            justify-content: center;
            align-items: center;
            min-height: 100vh;
            margin: 0;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 15px;
            box-shadow: 0px 4px 20px rgba(0,0,0,0.2);
            width: 400px;
            text-align: center;
        }
        h2 {
            color: #333;
            margin-bottom: 20px;
        }
        form {
            margin-top: 20px;
        }
        input[type="file"] {
            margin: 15px 0;
            padding: 8px;
            border: 1px solid #ccc;
            border-radius: 8px;
        }
        input[type="submit"] {
            background: linear-gradient(to right, #2575fc, #6a11cb);
            color: white;
            border: none;
            padding: 10px 20px;
            border-radius: 8px;
            cursor: pointer;
            font-size: 16px;
            transition: transform 0.2s, background 0.3s;
        }
        input[type="submit"]:hover {
            transform: scale(1.05);
            background: linear-gradient(to right, #6a11cb, #2575fc);
        }
        .result {
            margin-top: 25px;
            padding: 15px;
            border-radius: 10px;
            background: #f9f9f9;
            box-shadow: inset 0px 2px 5px rgba(0,0,0,0.1);
            font-size: 16px;
            color: #444;
            text-align: left;
        }
    </style>
</head>
"#;

/// The built-in upload page.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    field_name: String,
}

impl HtmlPage {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
        }
    }

    fn accept_attr() -> String {
        AudioFormat::ALL
            .iter()
            .map(|f| format!(".{}", f.extension()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl PageRenderer for HtmlPage {
    fn render(&self, transcription: Option<&str>) -> String {
        let mut html = String::with_capacity(PAGE_HEAD.len() + 1024);
        html.push_str(PAGE_HEAD);
        html.push_str("<body>\n    <div class=\"container\">\n");
        html.push_str("        <h2>Upload Audio File</h2>\n");
        html.push_str("        <form method=\"post\" enctype=\"multipart/form-data\">\n");
        html.push_str(&format!(
            "            <input type=\"file\" name=\"{}\" accept=\"{}\" required>\n",
            escape_html(&self.field_name),
            Self::accept_attr()
        ));
        html.push_str("            <br>\n");
        html.push_str("            <input type=\"submit\" value=\"Upload &amp; Transcribe\">\n");
        html.push_str("        </form>\n");

        if let Some(text) = transcription {
            html.push_str("        <div class=\"result\">\n");
            html.push_str("            <h3>Transcription:</h3>\n");
            html.push_str(&format!("            <p>{}</p>\n", escape_html(text)));
            html.push_str("        </div>\n");
        }

        html.push_str("    </div>\n</body>\n</html>\n");
        html
    }
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_page_has_form_and_no_result() {
        let html = HtmlPage::new("audio_file").render(None);
        assert!(html.contains("name=\"audio_file\""));
        assert!(html.contains("accept=\".wav,.aiff,.aifc,.flac\""));
        assert!(!html.contains("class=\"result\""));
    }

    #[test]
    fn result_block_contains_text() {
        let html = HtmlPage::new("audio_file").render(Some("hello world"));
        assert!(html.contains("<div class=\"result\">"));
        assert!(html.contains("<p>hello world</p>"));
    }

    #[test]
    fn result_text_is_escaped() {
        let html = HtmlPage::new("audio_file").render(Some("<script>alert('x')</script> & co"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co"));
    }

    #[test]
    fn page_keeps_form_styling() {
        let html = HtmlPage::new("audio_file").render(None);
        assert!(html.contains("input[type=\"submit\"]:hover"));
        assert!(html.contains("h2 {"));
    }

    #[test]
    fn escape_handles_ampersand_first() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }
}
