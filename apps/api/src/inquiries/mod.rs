// Contact inquiry intake: honeypot check, sanitization, required-field
// validation, one parameterized insert.

pub mod handlers;

use serde::Deserialize;

use crate::sanitize::sanitize;

/// JSON body of POST /api/inquiries. `company` is the honeypot field: hidden
/// on the rendered form, so humans never fill it.
#[derive(Debug, Deserialize)]
pub struct InquiryRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub purpose: Option<String>,
    pub message: Option<String>,
    pub company: Option<String>,
}

/// Sanitized inquiry fields, ready for validation and insertion.
#[derive(Debug, PartialEq, Eq)]
pub struct CleanInquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub purpose: String,
    pub message: String,
}

/// A non-empty honeypot value marks the submission as bot traffic.
pub fn is_bot(request: &InquiryRequest) -> bool {
    request.company.as_deref().is_some_and(|value| !value.is_empty())
}

pub fn clean(request: &InquiryRequest) -> CleanInquiry {
    CleanInquiry {
        name: sanitize(request.name.as_deref()),
        email: sanitize(request.email.as_deref()),
        phone: sanitize(request.phone.as_deref()),
        purpose: sanitize(request.purpose.as_deref()),
        message: sanitize(request.message.as_deref()),
    }
}

/// Names of required fields still empty after sanitization.
pub fn missing_fields(inquiry: &CleanInquiry) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if inquiry.name.is_empty() {
        missing.push("name");
    }
    if inquiry.email.is_empty() {
        missing.push("email");
    }
    if inquiry.purpose.is_empty() {
        missing.push("purpose");
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(company: Option<&str>) -> InquiryRequest {
        InquiryRequest {
            name: Some("Jo".to_string()),
            email: Some("jo@x.com".to_string()),
            phone: None,
            purpose: Some("demo".to_string()),
            message: None,
            company: company.map(str::to_string),
        }
    }

    #[test]
    fn honeypot_detects_non_empty_company() {
        assert!(is_bot(&request(Some("spam"))));
        assert!(!is_bot(&request(Some(""))));
        assert!(!is_bot(&request(None)));
    }

    #[test]
    fn clean_sanitizes_every_field() {
        let mut req = request(None);
        req.name = Some("  <b>Jo</b>  ".to_string());
        req.message = Some("<script>x()</script>hello".to_string());

        let inquiry = clean(&req);
        assert_eq!(inquiry.name, "Jo");
        assert_eq!(inquiry.message, "hello");
        assert_eq!(inquiry.phone, "");
    }

    #[test]
    fn missing_fields_names_each_offender() {
        let inquiry = clean(&request(None));
        assert!(missing_fields(&inquiry).is_empty());

        let mut req = request(None);
        req.purpose = Some("   ".to_string());
        req.email = None;
        let inquiry = clean(&req);
        assert_eq!(missing_fields(&inquiry), vec!["email", "purpose"]);
    }
}
