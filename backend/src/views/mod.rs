//! Server-rendered HTML for the forecast page

use shared::{FormSchema, Language, PredictionOutcome, WeatherRecord};
use std::fmt::Write;

use crate::error::ErrorDetail;
use crate::services::Submission;

struct Texts {
    title: &'static str,
    intro: &'static str,
    inputs_header: &'static str,
    submit: &'static str,
}

fn texts(language: Language) -> Texts {
    match language {
        Language::Thai => Texts {
            title: "พยากรณ์สภาพอากาศ",
            intro: "ใช้ฟอร์มด้านล่างเพื่อป้อนข้อมูลสภาพอากาศและคาดการณ์ว่าพรุ่งนี้จะมีฝนหรือไม่ \
                    โปรดระบุข้อมูลที่เป็นไปตามช่วงที่กำหนด",
            inputs_header: "ข้อมูลที่ใช้ในการพยากรณ์",
            submit: "ทำการพยากรณ์",
        },
        Language::English => Texts {
            title: "Weather Forecast",
            intro: "Use the form below to enter weather measurements and predict whether it \
                    will rain tomorrow. Please keep values within the given ranges.",
            inputs_header: "Forecast inputs",
            submit: "Predict",
        },
    }
}

/// Escape text for HTML element and attribute content
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

fn page(language: Language, body: &str) -> String {
    let t = texts(language);
    format!(
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>\n\
         body {{ font-family: sans-serif; max-width: 960px; margin: 2rem auto; }}\n\
         .columns {{ display: flex; gap: 2rem; }}\n.columns > div {{ flex: 1; }}\n\
         label {{ display: block; margin-top: .75rem; }}\n\
         .success {{ background: #e6f4ea; padding: 1rem; }}\n\
         .warning {{ background: #fff4e5; padding: 1rem; }}\n\
         .error {{ background: #fdecea; padding: 1rem; }}\n\
         img {{ max-width: 100%; }}\n</style>\n</head>\n<body>\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n",
        lang = language.code(),
        title = t.title,
        body = body,
    )
}

/// The input form, pre-filled with `record`, followed by the submission result
pub fn form_page(
    schema: &FormSchema,
    record: &WeatherRecord,
    language: Language,
    submission: Option<&Submission>,
) -> String {
    let t = texts(language);
    let mut body = String::new();

    let _ = writeln!(body, "<p>{}</p>", t.intro);
    let _ = write!(
        body,
        "<form method=\"post\" action=\"/predict?lang={}\">\n<h2>{}</h2>\n<div class=\"columns\">\n<div>\n",
        language.code(),
        t.inputs_header
    );

    for spec in &schema.numeric {
        let value = record.numeric(spec.field);
        let _ = write!(
            body,
            "<label>{label} <output id=\"{name}-value\">{value:.1}</output>\n\
             <input type=\"range\" name=\"{name}\" min=\"{min}\" max=\"{max}\" step=\"{step}\" \
             value=\"{value:.1}\" oninput=\"document.getElementById('{name}-value').value = \
             Number(this.value).toFixed(1)\"></label>\n",
            label = escape(&spec.label),
            name = spec.name,
            min = spec.min,
            max = spec.max,
            step = spec.step,
            value = value,
        );
    }

    body.push_str("</div>\n<div>\n");

    for spec in &schema.categorical {
        let current = record.categorical(spec.field);
        let _ = write!(
            body,
            "<label>{name}\n<select name=\"{name}\">\n",
            name = spec.name
        );
        for option in &spec.options {
            let selected = if option == current { " selected" } else { "" };
            let _ = write!(
                body,
                "<option value=\"{value}\"{selected}>{value}</option>\n",
                value = escape(option),
                selected = selected
            );
        }
        body.push_str("</select></label>\n");
    }

    let _ = write!(
        body,
        "</div>\n</div>\n<p><button type=\"submit\">{}</button></p>\n</form>\n",
        t.submit
    );

    if let Some(submission) = submission {
        body.push_str("<section id=\"result\">\n");
        match &submission.result {
            Ok(outcome) => body.push_str(&outcome_html(outcome)),
            Err(error) => {
                let (_, detail) = error.detail();
                body.push_str(&error_html(&detail, language));
            }
        }
        body.push_str("</section>\n");
    }

    page(language, &body)
}

fn outcome_html(outcome: &PredictionOutcome) -> String {
    let mut html = String::new();

    for warning in &outcome.warnings {
        let _ = writeln!(
            html,
            "<div class=\"warning\">{}</div>",
            escape(&warning.message)
        );
    }

    let presentation = &outcome.presentation;
    let _ = writeln!(
        html,
        "<div class=\"success\">{}</div>",
        escape(&presentation.message)
    );

    if let Some(image) = &presentation.image {
        let _ = write!(
            html,
            "<figure><img src=\"{url}\" alt=\"{caption}\"><figcaption>{caption}</figcaption></figure>\n",
            url = escape(&image.url),
            caption = escape(&image.caption)
        );
    } else if let Some(missing) = &presentation.missing_resource {
        let _ = writeln!(html, "<div class=\"warning\">{}</div>", escape(missing));
    }

    html
}

fn error_html(detail: &ErrorDetail, language: Language) -> String {
    format!(
        "<div class=\"error\">{}</div>\n",
        escape(detail.message(language))
    )
}

/// Shown in place of the form when artifacts could not be loaded
pub fn halted_page(detail: &ErrorDetail, language: Language) -> String {
    page(language, &error_html(detail, language))
}
