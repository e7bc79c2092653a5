use crate::entry::Contact;

/// Substituted for `{{company}}` when the contact has no company.
pub const DEFAULT_COMPANY: &str = "your team";

const KNOWN_PLACEHOLDERS: [&str; 3] = ["{{name}}", "{{company}}", "{{phone}}"];

/// Render a script body for one contact.
///
/// Every `{{name}}`, `{{company}}` and `{{phone}}` is replaced with the
/// contact's field. Other text, including unrecognized `{{...}}` tokens,
/// is kept verbatim.
pub fn render(body: &str, contact: &Contact) -> String {
    let company = if contact.has_company() {
        contact.company.as_str()
    } else {
        DEFAULT_COMPANY
    };

    body.replace("{{name}}", &contact.name)
        .replace("{{company}}", company)
        .replace("{{phone}}", &contact.phone)
}

/// List the `{{...}}` tokens in `body` that [`render`] leaves untouched.
///
/// Tokens are returned in order of first appearance, without duplicates.
pub fn unknown_placeholders(body: &str) -> Vec<&str> {
    let mut found: Vec<&str> = Vec::new();
    let mut rest = body;

    while let Some(end) = rest.find("}}") {
        // Pair each `}}` with the closest `{{` before it.
        if let Some(start) = rest[..end].rfind("{{") {
            let token = &rest[start..end + 2];
            if !KNOWN_PLACEHOLDERS.contains(&token) && !found.contains(&token) {
                found.push(token);
            }
        }
        rest = &rest[end + 2..];
    }

    found
}
