//! Attribute lookup in assertions.
//!
//! BundID deployments are inconsistent about whether they declare the
//! technical name or the friendly name of an attribute, and about its
//! casing. Lookups therefore match either name, ignoring case.

use bundid_saml::{Assertion, Attribute};

use crate::trust_level::{AuthnLevel, trust_level_qname};

/// How attribute names are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameMatching {
    /// Case-insensitive equality over Unicode lowercase mappings.
    #[default]
    IgnoreCase,
    /// Exact equality.
    Exact,
}

impl NameMatching {
    fn matches(self, candidate: &str, wanted: &str) -> bool {
        match self {
            Self::IgnoreCase => eq_ignore_case(candidate, wanted),
            Self::Exact => candidate == wanted,
        }
    }
}

/// Compares two strings ignoring case, including non-ASCII letters like `Ä`.
pub(crate) fn eq_ignore_case(left: &str, right: &str) -> bool {
    left.chars()
        .flat_map(char::to_lowercase)
        .eq(right.chars().flat_map(char::to_lowercase))
}

/// The first value found for an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstValue {
    /// The first value in document order.
    pub value: String,
    /// Number of values found in total.
    pub total: usize,
}

impl FirstValue {
    /// Checks if more than one value was found.
    #[must_use]
    pub const fn is_ambiguous(&self) -> bool {
        self.total > 1
    }
}

/// Finds attributes of an assertion by name or friendly name.
#[derive(Debug, Clone, Copy)]
pub struct AttributeLocator<'a> {
    assertion: &'a Assertion,
    matching: NameMatching,
}

impl<'a> AttributeLocator<'a> {
    /// Creates a case-insensitive locator.
    #[must_use]
    pub const fn new(assertion: &'a Assertion) -> Self {
        Self {
            assertion,
            matching: NameMatching::IgnoreCase,
        }
    }

    /// Sets the name comparison.
    #[must_use]
    pub const fn with_matching(mut self, matching: NameMatching) -> Self {
        self.matching = matching;
        self
    }

    /// Iterates over the attributes whose name or friendly name matches.
    pub fn matching<'n>(self, name: &'n str) -> impl Iterator<Item = &'a Attribute> + 'n
    where
        'a: 'n,
    {
        let matching = self.matching;
        self.assertion.attributes().filter(move |attribute| {
            matching.matches(&attribute.name, name)
                || attribute
                    .friendly_name
                    .as_deref()
                    .is_some_and(|friendly| matching.matches(friendly, name))
        })
    }

    /// Collects the values of all matching attributes in document order.
    ///
    /// Nil values are skipped.
    #[must_use]
    pub fn find_values(&self, name: &str) -> Vec<&'a str> {
        self.matching(name)
            .flat_map(|attribute| attribute.values.iter())
            .filter_map(|value| value.as_text())
            .collect()
    }

    /// Returns the first value of the matching attributes and how many
    /// values there were.
    #[must_use]
    pub fn first_value(&self, name: &str) -> Option<FirstValue> {
        let values = self.find_values(name);
        let first = values.first()?;
        Some(FirstValue {
            value: (*first).to_string(),
            total: values.len(),
        })
    }

    /// Returns the trust level annotated on the first matching attribute
    /// that carries a recognized `akdb:TrustLevel`.
    #[must_use]
    pub fn find_trust_annotation(&self, name: &str) -> Option<AuthnLevel> {
        let qname = trust_level_qname();
        self.matching(name)
            .filter_map(|attribute| attribute.other_attribute(&qname))
            .find_map(AuthnLevel::from_vendor_code)
    }
}

#[cfg(test)]
mod tests {
    use bundid_saml::{AttributeStatement, AttributeValue};

    use super::*;

    fn assertion(attributes: Vec<Attribute>) -> Assertion {
        let statement = attributes
            .into_iter()
            .fold(AttributeStatement::new(), AttributeStatement::with_attribute);
        Assertion::new("https://id.bund.de").with_attribute_statement(statement)
    }

    #[test]
    fn matches_name_ignoring_case() {
        let assertion = assertion(vec![Attribute::single("attrName", "testValue")]);
        let locator = AttributeLocator::new(&assertion);

        assert_eq!(locator.find_values("ATTRNAME"), vec!["testValue"]);
        assert!(locator.find_values("attr").is_empty());
    }

    #[test]
    fn matches_friendly_name() {
        let assertion = assertion(vec![
            Attribute::single("urn:oid:0.9.2342.19200300.100.1.3", "a@example.com")
                .with_friendly_name("mail"),
        ]);
        let locator = AttributeLocator::new(&assertion);

        assert_eq!(locator.find_values("Mail"), vec!["a@example.com"]);
    }

    #[test]
    fn matches_umlauts_ignoring_case() {
        let assertion = assertion(vec![
            Attribute::single("urn:oid:1.2.3", "v").with_friendly_name("Ärztekammer"),
        ]);
        let locator = AttributeLocator::new(&assertion);

        assert_eq!(locator.find_values("ärztekammer"), vec!["v"]);
        assert_eq!(locator.find_values("ÄRZTEKAMMER"), vec!["v"]);
        assert!(locator.find_values("arztekammer").is_empty());
    }

    #[test]
    fn exact_matching() {
        let assertion = assertion(vec![Attribute::single("attrName", "testValue")]);
        let locator = AttributeLocator::new(&assertion).with_matching(NameMatching::Exact);

        assert!(locator.find_values("ATTRNAME").is_empty());
        assert_eq!(locator.find_values("attrName"), vec!["testValue"]);
    }

    #[test]
    fn collects_values_across_statements_and_skips_nil() {
        let assertion = assertion(vec![
            Attribute::single("name", "first").with_value(AttributeValue::Nil),
            Attribute::single("other", "ignored"),
        ])
        .with_attribute_statement(
            AttributeStatement::new().with_attribute(Attribute::single("NAME", "second")),
        );
        let locator = AttributeLocator::new(&assertion);

        assert_eq!(locator.find_values("name"), vec!["first", "second"]);
        let first = locator.first_value("name").unwrap();
        assert_eq!(first.value, "first");
        assert!(first.is_ambiguous());
        assert_eq!(locator.first_value("missing"), None);
    }

    #[test]
    fn trust_annotation() {
        let assertion = assertion(vec![
            Attribute::single("attrName", "v1").with_other_attribute(trust_level_qname(), "BOGUS"),
            Attribute::single("attrName", "v2")
                .with_other_attribute(trust_level_qname(), "SUBSTANTIELL"),
            Attribute::single("plain", "v3"),
        ]);
        let locator = AttributeLocator::new(&assertion);

        assert_eq!(locator.find_trust_annotation("attrname"), Some(AuthnLevel::Stork3));
        assert_eq!(locator.find_trust_annotation("plain"), None);
        assert_eq!(locator.find_trust_annotation("missing"), None);
    }
}
