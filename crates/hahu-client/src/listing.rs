use std::sync::Arc;

use hahu_core::error::AppError;
use hahu_core::layout::{FieldRule, ListingLayout, SelectorRule};
use hahu_core::models::{Job, JobField};
use hahu_core::traits::ListingParser;
use scraper::{ElementRef, Html, Selector};

/// Listing parser driven by a [`ListingLayout`] rule table, built on `scraper`.
///
/// Finds every container, then every listing inside it, and fills each
/// field from the text of the nodes its rule matches. A rule that matches
/// nothing leaves the field empty.
#[derive(Debug, Clone)]
pub struct HtmlListingParser {
    selectors: Arc<CompiledLayout>,
}

/// A layout with every rule parsed into a [`Selector`] scoped to the
/// element it is evaluated from.
#[derive(Debug)]
struct CompiledLayout {
    container: Selector,
    listing: Selector,
    fields: Vec<(JobField, Selector)>,
}

impl HtmlListingParser {
    /// Parser for the built-in hahu.jobs layout.
    pub fn new() -> Result<Self, AppError> {
        Self::with_layout(ListingLayout::hahu())
    }

    pub fn with_layout(layout: ListingLayout) -> Result<Self, AppError> {
        layout.validate()?;

        let uncovered = layout.uncovered_fields();
        if !uncovered.is_empty() {
            tracing::debug!(fields = ?uncovered, "Fields without a rule stay empty");
        }

        let fields = layout
            .fields
            .iter()
            .map(|FieldRule { field, rule }| Ok((*field, compile(rule)?)))
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Self {
            selectors: Arc::new(CompiledLayout {
                container: compile(&layout.container)?,
                listing: compile(&layout.listing)?,
                fields,
            }),
        })
    }

    /// Extract one [`Job`] per listing element, in document order.
    pub fn extract(&self, document: &Html) -> Vec<Job> {
        let root = document.root_element();
        let containers: Vec<ElementRef<'_>> = root.select(&self.selectors.container).collect();
        if containers.is_empty() {
            tracing::warn!("No listing container found in document");
        }

        containers
            .into_iter()
            .flat_map(|container| container.select(&self.selectors.listing))
            .map(|listing| self.extract_job(listing))
            .collect()
    }

    fn extract_job(&self, listing: ElementRef<'_>) -> Job {
        let mut job = Job::default();
        for (field, selector) in &self.selectors.fields {
            let matched: Vec<ElementRef<'_>> = listing.select(selector).collect();
            job.set_field(*field, text_of(&matched));
        }
        job
    }
}

impl ListingParser for HtmlListingParser {
    fn parse(&self, html: &str) -> Result<Vec<Job>, AppError> {
        let document = Html::parse_document(html);
        let jobs = self.extract(&document);
        tracing::debug!(count = jobs.len(), "Extracted listings");
        Ok(jobs)
    }
}

/// Parse `rule` into a selector that only matches inside the element it is
/// run from, so path steps cannot anchor on ancestors of the listing.
fn compile(rule: &SelectorRule) -> Result<Selector, AppError> {
    let css = format!(":scope {}", rule.to_css());
    Selector::parse(&css)
        .map_err(|e| AppError::ParseError(format!("Invalid selector `{css}`: {e}")))
}

/// Visible text of the matched nodes with whitespace collapsed.
///
/// Matches nested inside an earlier match are skipped so their text is
/// not counted twice.
fn text_of(matched: &[ElementRef<'_>]) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (i, el) in matched.iter().enumerate() {
        let nested = matched[..i]
            .iter()
            .any(|outer| el.ancestors().any(|a| a.id() == outer.id()));
        if nested {
            continue;
        }
        let text = el.text().collect::<String>();
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !text.is_empty() {
            parts.push(text);
        }
    }
    parts.join(" ")
}
