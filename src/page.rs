//! The static "congratulations" page each QR code points to.

const STYLE: &str = r#"        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            min-height: 100vh;
            display: flex;
            justify-content: center;
            align-items: center;
            padding: 20px;
        }

        .container {
            background: white;
            border-radius: 20px;
            padding: 60px 40px;
            box-shadow: 0 20px 60px rgba(0, 0, 0, 0.3);
            text-align: center;
            max-width: 500px;
            width: 100%;
            animation: fadeIn 0.6s ease-in;
        }

        @keyframes fadeIn {
            from { opacity: 0; transform: translateY(-20px); }
            to { opacity: 1; transform: translateY(0); }
        }

        .emoji {
            font-size: 80px;
            margin-bottom: 20px;
            animation: bounce 1s ease infinite;
        }

        @keyframes bounce {
            0%, 100% { transform: translateY(0); }
            50% { transform: translateY(-10px); }
        }

        h1 {
            color: #333;
            font-size: 32px;
            margin-bottom: 30px;
            line-height: 1.4;
        }

        .points {
            font-size: 120px;
            font-weight: bold;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            -webkit-background-clip: text;
            -webkit-text-fill-color: transparent;
            background-clip: text;
            margin: 30px 0;
            animation: pulse 2s ease infinite;
        }

        @keyframes pulse {
            0%, 100% { transform: scale(1); }
            50% { transform: scale(1.05); }
        }

        .label {
            font-size: 24px;
            color: #666;
            margin-bottom: 20px;
        }

        .footer {
            margin-top: 30px;
            color: #999;
            font-size: 14px;
        }
"#;

/// Full HTML document announcing `label` points.
pub fn render_page(label: &str) -> String {
    let points = escape_html(label);
    format!(
        r#"<!DOCTYPE html>
<html lang="tl">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Congratulations - {points} Points!</title>
    <style>
{STYLE}    </style>
</head>
<body>
    <div class="container">
        <div class="emoji">🎉</div>
        <h1>Congratulations!</h1>
        <div class="points">{points}</div>
        <div class="label">points!</div>
        <div class="footer">You got {points} points!</div>
    </div>
</body>
</html>
"#
    )
}

fn escape_html(text: &str) -> String {
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

    #[test]
    fn page_shows_points_everywhere() {
        let html = render_page("7");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Congratulations - 7 Points!</title>"));
        assert!(html.contains(r#"<div class="points">7</div>"#));
        assert!(html.contains("You got 7 points!"));
        assert!(html.contains("linear-gradient(135deg, #667eea 0%, #764ba2 100%)"));
    }

    #[test]
    fn label_is_escaped() {
        let html = render_page("<b>&");
        assert!(html.contains("&lt;b&gt;&amp;"));
        assert!(!html.contains("<b>&"));
    }
}
