use std::fmt::Write as _;

use super::request::{ContactNotification, FilingNotification, NotificationRequest};
use crate::catalog::{income_label_for_code, visa_label_for_code, IncomeType};

const FOOTER_STYLE: &str = "color: #666; font-size: 12px;";

/// Subject line and HTML body ready for the email provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

pub fn render(request: &NotificationRequest) -> RenderedEmail {
    match request {
        NotificationRequest::Contact(contact) => render_contact(contact),
        NotificationRequest::Filing(filing) => render_filing(filing),
    }
}

fn render_contact(contact: &ContactNotification) -> RenderedEmail {
    let topic = present(contact.subject.as_deref());
    let subject = format!(
        "New Contact Form: {}",
        single_line(topic.unwrap_or("General Inquiry"))
    );

    let mut html = String::new();
    html.push_str("<h1>New Contact Form Submission</h1>\n");
    field_line(&mut html, "Name", &contact.name);
    field_line(&mut html, "Email", &contact.email);
    field_line(&mut html, "Subject", topic.unwrap_or("N/A"));
    html.push_str("<h2>Message:</h2>\n");
    writeln!(html, "<p>{}</p>", multiline(&contact.message)).expect("message paragraph");
    footer(&mut html, "Submitted via MyTaxPlanners Contact Form");

    RenderedEmail { subject, html }
}

fn render_filing(filing: &FilingNotification) -> RenderedEmail {
    let full_name = format!("{} {}", filing.first_name.trim(), filing.last_name.trim());
    let subject = format!("New Tax Filing Request: {}", single_line(&full_name));

    let mut html = String::new();
    html.push_str("<h1>New Tax Filing Submission</h1>\n");

    html.push_str("<h2>Personal Information</h2>\n");
    field_line(&mut html, "Name", &full_name);
    field_line(&mut html, "Email", &filing.email);
    field_line(
        &mut html,
        "Phone",
        present(filing.phone.as_deref()).unwrap_or("Not provided"),
    );

    html.push_str("<h2>Tax Information</h2>\n");
    let visa = match present(Some(filing.visa_type.as_str())) {
        Some(code) => visa_label_for_code(code),
        None => "Not specified".to_string(),
    };
    field_line(&mut html, "Visa Type", &visa);
    if let Some(arrival) = present(filing.arrival_date.as_deref()) {
        field_line(&mut html, "Arrival Date", arrival);
    }
    field_line(
        &mut html,
        "University",
        present(filing.university.as_deref()).unwrap_or("N/A"),
    );
    let incomes = catalog_order(&filing.income_types)
        .into_iter()
        .map(income_label_for_code)
        .collect::<Vec<_>>();
    let incomes = if incomes.is_empty() {
        "None selected".to_string()
    } else {
        incomes.join(", ")
    };
    field_line(&mut html, "Income Types", &incomes);
    field_line(
        &mut html,
        "Has Scholarship",
        if filing.has_scholarship { "Yes" } else { "No" },
    );

    if let Some(notes) = present(filing.additional_notes.as_deref()) {
        writeln!(
            html,
            "<h2>Additional Notes</h2>\n<p>{}</p>",
            multiline(notes)
        )
        .expect("notes section");
    }

    footer(&mut html, "Submitted via MyTaxPlanners Filing Form");

    RenderedEmail { subject, html }
}

fn field_line(html: &mut String, label: &str, value: &str) {
    writeln!(
        html,
        "<p><strong>{}:</strong> {}</p>",
        label,
        escape_html(value)
    )
    .expect("field line");
}

fn footer(html: &mut String, text: &str) {
    writeln!(html, "<hr>\n<p style=\"{FOOTER_STYLE}\">{text}</p>").expect("footer");
}

/// Known income codes in catalog order, then unknown ones as received.
fn catalog_order(codes: &[String]) -> Vec<&str> {
    let mut ordered = codes.iter().map(String::as_str).collect::<Vec<_>>();
    ordered.sort_by_key(|code| {
        let known = code.parse::<IncomeType>().ok();
        (known.is_none(), known)
    });
    ordered
}

/// Blank optional values render the same as absent ones.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn multiline(raw: &str) -> String {
    escape_html(raw.trim_end())
        .replace("\r\n", "\n")
        .replace('\n', "<br>")
}

fn single_line(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
