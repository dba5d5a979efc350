use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::JobField;

/// A structural rule that picks elements out of a listing page.
///
/// Rules are plain data so a layout can be stored as JSON and swapped
/// when the board changes its markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectorRule {
    /// Element with this tag carrying every listed class.
    ClassSet { tag: String, classes: Vec<String> },
    /// Element with this tag whose attribute equals `value` exactly.
    AttributeValue {
        tag: String,
        attribute: String,
        value: String,
    },
    /// Descendant path: each step is matched inside the previous step's matches.
    Path { steps: Vec<SelectorRule> },
}

impl SelectorRule {
    pub fn class_set(tag: &str, classes: &[&str]) -> Self {
        SelectorRule::ClassSet {
            tag: tag.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn attribute(tag: &str, attribute: &str, value: &str) -> Self {
        SelectorRule::AttributeValue {
            tag: tag.to_string(),
            attribute: attribute.to_string(),
            value: value.to_string(),
        }
    }

    pub fn path(steps: Vec<SelectorRule>) -> Self {
        SelectorRule::Path { steps }
    }

    /// CSS selector text for this rule, e.g. `div.md\:px-10` or
    /// `div[title="Location"]`. Path steps are joined with descendant
    /// combinators.
    pub fn to_css(&self) -> String {
        match self {
            SelectorRule::ClassSet { tag, classes } => {
                let mut css = css_ident(tag);
                for class in classes {
                    css.push('.');
                    css.push_str(&css_ident(class));
                }
                css
            }
            SelectorRule::AttributeValue {
                tag,
                attribute,
                value,
            } => format!(
                "{}[{}={}]",
                css_ident(tag),
                css_ident(attribute),
                css_string(value)
            ),
            SelectorRule::Path { steps } => steps
                .iter()
                .map(SelectorRule::to_css)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            SelectorRule::ClassSet { tag, classes } => {
                if tag.is_empty() {
                    return Err("class_set rule has an empty tag".into());
                }
                if classes.is_empty() || classes.iter().any(|c| c.is_empty()) {
                    return Err(format!("class_set rule for <{tag}> needs non-empty classes"));
                }
                Ok(())
            }
            SelectorRule::AttributeValue { tag, attribute, .. } => {
                if tag.is_empty() || attribute.is_empty() {
                    return Err("attribute_value rule needs a tag and an attribute".into());
                }
                Ok(())
            }
            SelectorRule::Path { steps } => {
                if steps.is_empty() {
                    return Err("path rule has no steps".into());
                }
                steps.iter().try_for_each(SelectorRule::validate)
            }
        }
    }
}

/// Escape `raw` as a CSS identifier.
fn css_ident(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let starts_with_dash = raw.starts_with('-');
    for (i, c) in raw.chars().enumerate() {
        let leading_digit = c.is_ascii_digit() && (i == 0 || (i == 1 && starts_with_dash));
        if leading_digit {
            out.push_str(&format!("\\{:x} ", c as u32));
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii() {
            out.push(c);
        } else {
            out.push('\\');
            out.push(c);
        }
    }
    if raw == "-" {
        out.insert(0, '\\');
    }
    out
}

/// Quote `raw` as a CSS string.
fn css_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for c in raw.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\a "),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Binds one [`JobField`] to the rule that fills it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub field: JobField,
    pub rule: SelectorRule,
}

/// The full rule table for one listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingLayout {
    /// Element wrapping the listing grid.
    pub container: SelectorRule,
    /// One element per job listing inside the container.
    pub listing: SelectorRule,
    /// Per-field rules, evaluated inside each listing. Fields without a rule stay empty.
    pub fields: Vec<FieldRule>,
}

impl ListingLayout {
    /// Layout of the hahu.jobs listing page.
    ///
    /// Salary, requirements and category are not exposed by the listing
    /// cards and have no rule.
    pub fn hahu() -> Self {
        let field = |field: JobField, rule: SelectorRule| FieldRule { field, rule };
        Self {
            container: SelectorRule::class_set("div", &["grid", "grid-cols-1", "gap-y-10", "mt-5"]),
            listing: SelectorRule::class_set("div", &["w-full", "pt-3", "px-4", "md:px-10", "xl:px-5"]),
            fields: vec![
                field(
                    JobField::Title,
                    SelectorRule::class_set("h3", &["font-black", "text-lg", "text-secondary"]),
                ),
                field(
                    JobField::Company,
                    SelectorRule::class_set(
                        "p",
                        &[
                            "text-left",
                            "font-normal",
                            "text-base",
                            "md:text-lg",
                            "text-secondary",
                            "dark:text-secondary-4",
                            "line-clamp-2",
                        ],
                    ),
                ),
                field(
                    JobField::Sector,
                    SelectorRule::class_set(
                        "div",
                        &["flex", "items-center", "gap-2", "dark:text-secondary-4"],
                    ),
                ),
                field(
                    JobField::Location,
                    SelectorRule::attribute("div", "title", "Location"),
                ),
                field(
                    JobField::Experience,
                    SelectorRule::attribute("div", "title", "Years of Experience"),
                ),
                field(
                    JobField::Position,
                    SelectorRule::attribute("div", "title", "Number of Positions"),
                ),
                field(
                    JobField::JobType,
                    SelectorRule::attribute("div", "title", "Job Type"),
                ),
                field(
                    JobField::Description,
                    SelectorRule::class_set(
                        "p",
                        &[
                            "mt-3",
                            "font-normal",
                            "text-sm",
                            "md:text-lg",
                            "leading-6",
                            "md:leading-9",
                            "text-secondary",
                            "dark:text-secondary-4",
                            "description",
                        ],
                    ),
                ),
                field(
                    JobField::TimeLeft,
                    SelectorRule::class_set(
                        "span",
                        &[
                            "flex",
                            "font-body",
                            "text-sm",
                            "md:text-md",
                            "leading-9",
                            "font-light",
                            "capitalize",
                        ],
                    ),
                ),
            ],
        }
    }

    /// Load a layout from a JSON file and validate it.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::FileError(format!("Failed to read layout file {}: {e}", path.display()))
        })?;
        let layout: ListingLayout = serde_json::from_str(&raw)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Reject empty rules and fields bound more than once.
    pub fn validate(&self) -> Result<(), AppError> {
        self.container
            .validate()
            .map_err(|e| AppError::ConfigError(format!("container: {e}")))?;
        self.listing
            .validate()
            .map_err(|e| AppError::ConfigError(format!("listing: {e}")))?;

        let mut seen = HashSet::new();
        for FieldRule { field, rule } in &self.fields {
            if !seen.insert(*field) {
                return Err(AppError::ConfigError(format!(
                    "field {field} has more than one rule"
                )));
            }
            rule.validate()
                .map_err(|e| AppError::ConfigError(format!("{field}: {e}")))?;
        }
        Ok(())
    }

    /// Fields no rule will ever fill.
    pub fn uncovered_fields(&self) -> Vec<JobField> {
        JobField::ALL
            .into_iter()
            .filter(|f| !self.fields.iter().any(|r| r.field == *f))
            .collect()
    }
}

impl Default for ListingLayout {
    fn default() -> Self {
        Self::hahu()
    }
}
