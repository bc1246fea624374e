use crate::anchors::bind_anchor_links;
use crate::templates::result::escape_html;
use crate::view::PageView;

/// What the upload page shows besides the static form.
pub struct PageState<'a> {
    pub result: &'a PageView,
    pub alerts: &'a [String],
}

impl PageState<'static> {
    pub fn empty() -> Self {
        static EMPTY: PageView = PageView {
            content: String::new(),
            visible: false,
            scrolled: false,
        };
        Self {
            result: &EMPTY,
            alerts: &[],
        }
    }
}

pub fn render(state: &PageState<'_>) -> String {
    let result_display = if state.result.visible { "block" } else { "none" };

    let alerts: String = state
        .alerts
        .iter()
        .map(|message| {
            format!(
                r#"<div class="notice notice-warning" role="alert">{}</div>"#,
                escape_html(message)
            )
        })
        .collect();

    let scroll_script = if state.result.visible && state.result.scrolled {
        r#"<script>document.getElementById('result').scrollIntoView({ behavior: 'smooth' });</script>"#
    } else {
        ""
    };

    let html = format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Fruit Freshness Check - freshcheck</title>
    <style>
        *, *::before, *::after {{ margin: 0; padding: 0; box-sizing: border-box; }}

        html {{ scroll-behavior: smooth; }}

        :root {{
            --bg: #ffffff;
            --bg-secondary: #f7f8fa;
            --border: #d8dce3;
            --border-light: #e8ebf0;
            --text-primary: #111827;
            --text-secondary: #4b5563;
            --text-tertiary: #9ca3af;
            --green: #16a34a;
            --green-bg: #f0fdf4;
            --green-border: #bbf7d0;
            --amber: #d97706;
            --amber-bg: #fffbeb;
            --amber-border: #fde68a;
            --red: #dc2626;
            --red-bg: #fef2f2;
            --red-border: #fecaca;
        }}

        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Inter', system-ui, sans-serif;
            background: var(--bg); color: var(--text-primary); min-height: 100vh;
            -webkit-font-smoothing: antialiased;
        }}

        .page {{ max-width: 880px; margin: 0 auto; padding: 2rem 1.25rem 4rem; }}

        .page-header {{
            display: flex; align-items: center; justify-content: space-between;
            margin-bottom: 2rem;
        }}
        .wordmark {{ font-size: 1rem; font-weight: 600; color: var(--text-primary); text-decoration: none; }}
        .wordmark span {{ color: var(--text-tertiary); font-weight: 400; }}
        .nav a {{ margin-left: 1rem; font-size: 0.8125rem; color: var(--text-secondary); text-decoration: none; }}

        .card {{
            border: 1px solid var(--border); border-radius: 8px; margin-bottom: 1rem; padding: 1.25rem;
        }}
        .card h2 {{ font-size: 1.125rem; font-weight: 600; margin-bottom: 0.75rem; }}
        .card p {{ color: var(--text-secondary); font-size: 0.875rem; }}

        .upload-row {{ display: flex; gap: 0.75rem; align-items: center; margin-top: 0.75rem; }}
        .btn {{
            padding: 0.5rem 1rem; font-size: 0.875rem; font-weight: 500; color: #fff;
            background: var(--text-primary); border: none; border-radius: 6px; cursor: pointer;
        }}

        .notice {{ padding: 0.75rem 1rem; border-radius: 6px; margin-bottom: 1rem; font-size: 0.875rem; }}
        .notice-warning {{ background: var(--amber-bg); color: var(--amber); border: 1px solid var(--amber-border); }}
        .alert-danger {{
            padding: 0.875rem 1rem; border-radius: 6px;
            background: var(--red-bg); color: var(--red); border: 1px solid var(--red-border);
        }}

        .row {{ display: flex; flex-wrap: wrap; gap: 1.5rem; }}
        .col-md-6 {{ flex: 1 1 320px; min-width: 0; }}
        .img-fluid {{ max-width: 100%; height: auto; }}
        .rounded {{ border-radius: 8px; }}
        .shadow {{ box-shadow: 0 4px 12px rgba(17, 24, 39, 0.12); }}
        .text-center {{ text-align: center; }}
        .mt-2 {{ margin-top: 0.5rem; }}
        .mt-3 {{ margin-top: 0.75rem; }}
        .mb-3 {{ margin-bottom: 0.75rem; }}
        .display-4 {{ font-size: 2.5rem; }}
        .visually-hidden {{ position: absolute; width: 1px; height: 1px; overflow: hidden; clip: rect(0 0 0 0); }}

        .spinner-border {{
            display: inline-block; width: 2rem; height: 2rem; border: 3px solid var(--border);
            border-top-color: var(--amber); border-radius: 50%; animation: spin 0.8s linear infinite;
        }}
        @keyframes spin {{ to {{ transform: rotate(360deg); }} }}

        .prediction-result {{ padding: 1.25rem; border-radius: 8px; text-align: center; }}
        .prediction-fresh {{ background: var(--green-bg); border: 1px solid var(--green-border); color: var(--green); }}
        .prediction-rotten {{ background: var(--red-bg); border: 1px solid var(--red-border); color: var(--red); }}
        .confidence-bar {{
            height: 10px; border-radius: 9999px; background: var(--border-light);
            overflow: hidden; margin-top: 0.75rem;
        }}
        .confidence-fill {{ height: 100%; transition: width 0.6s ease; }}
        .bg-success {{ background: var(--green); }}
        .bg-danger {{ background: var(--red); }}

        .footer {{
            text-align: center; margin-top: 2.5rem; padding-top: 1.25rem;
            border-top: 1px solid var(--border-light); color: var(--text-tertiary); font-size: 0.75rem;
        }}
    </style>
</head>
<body>
    <div class="page">
        <div class="page-header">
            <a class="wordmark" href="/">freshcheck <span>/ fruit freshness</span></a>
            <nav class="nav">
                <a href="#upload">Upload</a>
                <a href="#result">Result</a>
                <a href="#how-it-works">How it works</a>
            </nav>
        </div>

        {alerts}

        <section class="card" id="upload">
            <h2>Check a piece of fruit</h2>
            <p>Upload a photo (JPEG, PNG or GIF, up to 16MB) and the classifier will tell you whether it looks fresh.</p>
            <form id="uploadForm" method="post" action="/upload" enctype="multipart/form-data">
                <div class="upload-row">
                    <input type="file" id="file" name="file" accept="image/*">
                    <button type="submit" class="btn">Analyze</button>
                </div>
            </form>
        </section>

        <section class="card" id="result" style="display: {result_display}">
            <div id="resultContent">{result_content}</div>
        </section>

        <section class="card" id="how-it-works">
            <h2>How it works</h2>
            <p>Your photo is sent to the prediction service, which labels it Fresh/Healthy or Rotten together with its confidence.</p>
        </section>

        <div class="footer">
            <a href="#upload">Back to top</a>
        </div>
    </div>
    {scroll_script}
</body>
</html>"##,
        alerts = alerts,
        result_display = result_display,
        result_content = state.result.content,
        scroll_script = scroll_script,
    );

    bind_anchor_links(&html)
}
