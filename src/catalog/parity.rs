//! Key parity between each language table and the default table.

use std::fmt;

use super::{
    Catalog,
    LeafShape,
};
use crate::types::LanguageCode;

/// How a table diverges from the default table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParityIssueKind {
    /// Present in the default table, absent here.
    Missing,
    /// Present here, absent from the default table.
    Extra,
    ShapeMismatch { expected: LeafShape, found: LeafShape },
    /// The entry name contains the key separator; lookups never reach it.
    Unaddressable,
}

/// One divergence of one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParityIssue {
    pub language: LanguageCode,
    pub key: String,
    pub kind: ParityIssueKind,
}

impl fmt::Display for ParityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParityIssueKind::Missing => {
                write!(f, "[{}] {} - missing (present in default language)", self.language, self.key)
            }
            ParityIssueKind::Extra => {
                write!(f, "[{}] {} - not present in default language", self.language, self.key)
            }
            ParityIssueKind::ShapeMismatch { expected, found } => {
                write!(f, "[{}] {} - expected {expected}, found {found}", self.language, self.key)
            }
            ParityIssueKind::Unaddressable => {
                write!(f, "[{}] {} - key name contains the separator", self.language, self.key)
            }
        }
    }
}

/// Result of [`check_parity`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParityReport {
    pub issues: Vec<ParityIssue>,
}

impl ParityReport {
    /// True when every table matches the default table.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues found in one language's table.
    pub fn for_language<'a>(&'a self, language: &'a str) -> impl Iterator<Item = &'a ParityIssue> {
        self.issues.iter().filter(move |issue| issue.language == language)
    }
}

impl fmt::Display for ParityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = self
            .issues
            .iter()
            .enumerate()
            .map(|(i, issue)| format!("  {}. {issue}", i + 1))
            .collect::<Vec<_>>();
        f.write_str(&lines.join("\n"))
    }
}

/// Compare every non-default table against the default table.
///
/// Entries no key path can reach are reported for every table, the default
/// one included.
#[must_use]
pub fn check_parity(catalog: &Catalog, separator: &str) -> ParityReport {
    let expected = catalog.default_table().leaves(separator);
    let mut issues = Vec::new();

    for table in catalog.tables() {
        issues.extend(table.unaddressable_keys(separator).into_iter().map(|key| ParityIssue {
            language: table.language().clone(),
            key,
            kind: ParityIssueKind::Unaddressable,
        }));
    }

    for table in catalog.tables().filter(|t| t.language() != catalog.default_language()) {
        let language = table.language();
        let found = table.leaves(separator);

        for (key, expected_shape) in &expected {
            match found.get(key) {
                None => issues.push(ParityIssue {
                    language: language.clone(),
                    key: key.clone(),
                    kind: ParityIssueKind::Missing,
                }),
                Some(found_shape) if found_shape != expected_shape => issues.push(ParityIssue {
                    language: language.clone(),
                    key: key.clone(),
                    kind: ParityIssueKind::ShapeMismatch {
                        expected: *expected_shape,
                        found: *found_shape,
                    },
                }),
                Some(_) => {}
            }
        }

        for key in found.keys().filter(|key| !expected.contains_key(*key)) {
            issues.push(ParityIssue {
                language: language.clone(),
                key: key.clone(),
                kind: ParityIssueKind::Extra,
            });
        }
    }

    tracing::debug!("Parity check finished with {} issue(s)", issues.len());
    ParityReport { issues }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::test_utils::catalog_from_json;

    #[rstest]
    fn bundled_tables_have_full_parity() {
        let catalog = Catalog::bundled().unwrap();

        let report = check_parity(&catalog, ".");

        assert!(report.is_clean(), "bundled tables diverge:\n{report}");
    }

    #[rstest]
    fn flattened_key_is_not_a_match_for_nested_key() {
        let catalog = catalog_from_json(&[
            ("en", json!({ "nav": { "services": "Services" } })),
            ("de", json!({ "nav.services": "Leistungen" })),
        ]);

        let report = check_parity(&catalog, ".");

        assert_eq!(
            report.issues,
            vec![
                ParityIssue {
                    language: LanguageCode::new("de"),
                    key: "nav.services".to_string(),
                    kind: ParityIssueKind::Unaddressable,
                },
                ParityIssue {
                    language: LanguageCode::new("de"),
                    key: "nav.services".to_string(),
                    kind: ParityIssueKind::Missing,
                },
            ]
        );
    }

    #[googletest::test]
    fn detects_missing_extra_and_shape_issues() {
        let catalog = catalog_from_json(&[
            (
                "en",
                json!({
                    "nav": { "services": "Services", "contact": "Contact" },
                    "topics": ["SAP", "AI", "Security"],
                    "title": "Title"
                }),
            ),
            (
                "de",
                json!({
                    "nav": { "services": "Leistungen", "blog": "Blog" },
                    "topics": ["SAP", "KI"],
                    "title": ["Titel"]
                }),
            ),
        ]);

        let report = check_parity(&catalog, ".");

        expect_that!(
            report.issues,
            unordered_elements_are![
                all![
                    field!(ParityIssue.key, eq("nav.contact")),
                    field!(ParityIssue.kind, eq(&ParityIssueKind::Missing))
                ],
                all![
                    field!(ParityIssue.key, eq("nav.blog")),
                    field!(ParityIssue.kind, eq(&ParityIssueKind::Extra))
                ],
                all![
                    field!(ParityIssue.key, eq("topics")),
                    field!(
                        ParityIssue.kind,
                        eq(&ParityIssueKind::ShapeMismatch {
                            expected: LeafShape::List(3),
                            found: LeafShape::List(2)
                        })
                    )
                ],
                all![
                    field!(ParityIssue.key, eq("title")),
                    field!(
                        ParityIssue.kind,
                        eq(&ParityIssueKind::ShapeMismatch {
                            expected: LeafShape::Text,
                            found: LeafShape::List(1)
                        })
                    )
                ]
            ]
        );
        expect_that!(report.for_language("de").count(), eq(4));
        expect_that!(report.for_language("en").count(), eq(0));
    }

    #[rstest]
    fn report_display_lists_issues() {
        let catalog = catalog_from_json(&[
            ("en", json!({ "nav": { "services": "Services" } })),
            ("fr", json!({})),
        ]);

        let report = check_parity(&catalog, ".");

        assert_eq!(
            report.to_string(),
            "  1. [fr] nav.services - missing (present in default language)"
        );
    }
}
