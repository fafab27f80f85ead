// Job application intake: multipart field collection, CV handling through
// the upload policy, one parameterized insert.

pub mod handlers;

use crate::sanitize::sanitize;

/// Text fields of a job application, collected from the multipart stream.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ApplicationFields {
    pub position: String,
    pub fullname: String,
    pub email: String,
}

impl ApplicationFields {
    /// Stores a sanitized field value. Unknown field names are ignored.
    pub fn set(&mut self, name: &str, value: &str) {
        match name {
            "position" => self.position = sanitize(Some(value)),
            "fullname" => self.fullname = sanitize(Some(value)),
            "email" => self.email = sanitize(Some(value)),
            _ => {}
        }
    }

    /// All three required fields are non-empty after sanitization.
    pub fn complete(&self) -> bool {
        !self.position.is_empty() && !self.fullname.is_empty() && !self.email.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_sanitizes_known_fields_and_ignores_others() {
        let mut fields = ApplicationFields::default();
        fields.set("position", "  <b>Engineer</b> ");
        fields.set("fullname", "Jo Smith");
        fields.set("email", "jo@x.com");
        fields.set("resume_text", "ignored");

        assert_eq!(fields.position, "Engineer");
        assert!(fields.complete());
    }

    #[test]
    fn complete_requires_every_field() {
        let mut fields = ApplicationFields::default();
        assert!(!fields.complete());

        fields.set("position", "Engineer");
        fields.set("email", "jo@x.com");
        assert!(!fields.complete());

        fields.set("fullname", "   "); // whitespace sanitizes to empty
        assert!(!fields.complete());

        fields.set("fullname", "Jo");
        assert!(fields.complete());
    }
}
