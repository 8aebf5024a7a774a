//! HTML rendering for the task form

use crate::llm::ModelId;

pub const PAGE_TITLE: &str = "SupaBrowser - Browser Automation";
pub const PAGE_SUBTITLE: &str = "Powered by browser-use with Anthropic Claude";
pub const TASK_PLACEHOLDER: &str = "E.g., Find flights from New York to London for next week";

/// Values shown in the form inputs
#[derive(Debug, Clone)]
pub struct FormValues {
    pub api_key: String,
    pub task: String,
    pub model: String,
    pub headless: bool,
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
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

fn model_options(selected: &str) -> String {
    ModelId::ALL
        .iter()
        .map(|m| {
            let name = m.as_str();
            let sel = if name == selected { " selected" } else { "" };
            format!(
                "<option value=\"{}\"{}>{}</option>",
                name,
                sel,
                escape_html(m.preset().display_name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n          ")
}

/// Render the whole page, with the output box filled when `output` is set
pub fn render_page(values: &FormValues, output: Option<&str>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>SupaBrowser - Browser Use Integration</title>
  <style>
    body {{ font-family: system-ui, sans-serif; max-width: 1100px; margin: 2rem auto; padding: 0 1rem; }}
    .row {{ display: flex; gap: 2rem; flex-wrap: wrap; }}
    .col {{ flex: 1; min-width: 320px; display: flex; flex-direction: column; gap: .75rem; }}
    label {{ font-weight: 600; display: flex; flex-direction: column; gap: .25rem; }}
    label.inline {{ flex-direction: row; align-items: center; }}
    input[type=password], textarea, select {{ font: inherit; padding: .4rem; }}
    button {{ font: inherit; padding: .6rem; cursor: pointer; }}
  </style>
</head>
<body>
  <h1>{title}</h1>
  <p>{subtitle}</p>
  <form method="post" action="/run">
    <div class="row">
      <div class="col">
        <label>Anthropic API Key
          <input type="password" name="api_key" placeholder="sk-ant-..." value="{api_key}">
        </label>
        <label>Task Description
          <textarea name="task" rows="3" placeholder="{placeholder}">{task}</textarea>
        </label>
        <label>Model
          <select name="model">
          {options}
          </select>
        </label>
        <label class="inline">
          <input type="checkbox" name="headless" value="on"{checked}> Run Headless
        </label>
        <button type="submit">Run Task</button>
      </div>
      <div class="col">
        <label>Output
          <textarea id="output" rows="10" readonly>{output}</textarea>
        </label>
      </div>
    </div>
  </form>
</body>
</html>
"#,
        title = PAGE_TITLE,
        subtitle = PAGE_SUBTITLE,
        api_key = escape_html(&values.api_key),
        placeholder = TASK_PLACEHOLDER,
        task = escape_html(&values.task),
        options = model_options(&values.model),
        checked = if values.headless { " checked" } else { "" },
        output = escape_html(output.unwrap_or_default()),
    )
}
