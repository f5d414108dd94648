use std::fmt;

use tracing::debug;

use crate::catalog::{title_case, ClassifiedRecord, Role, CARD_CLASS};
use crate::parser::markup::{Document, Node};

const QUIZ_NAV_ID: &str = "quiz-nav";
const ROLE_FILTER_ID: &str = "role-filter";
const REPO_GRID_ID: &str = "repo-grid";
const SCRIPT_ID: &str = "role-filter-script";
/// Text node placed after every injected block; removed together with it.
const SEPARATOR: &str = "\n";

const ROLE_FILTER_SCRIPT: &str = r#"
(function () {
    var buttons = document.querySelectorAll('#role-filter .role-filter-btn');
    buttons.forEach(function (button) {
        button.addEventListener('click', function () {
            var role = button.getAttribute('data-role');
            buttons.forEach(function (b) { b.classList.toggle('active', b === button); });
            document.querySelectorAll('#repo-grid .repo-card').forEach(function (card) {
                var roles = (card.getAttribute('data-roles') || '').split(' ');
                card.style.display = role === 'all' || roles.indexOf(role) !== -1 ? '' : 'none';
            });
        });
    });
})();
"#;

/// Structural insertion point that was missing from the markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    RepoGrid,
    BodyClose,
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anchor::RepoGrid => write!(f, "element id=\"{REPO_GRID_ID}\""),
            Anchor::BodyClose => write!(f, "</body>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub markup: String,
    /// Record names with no matching card element.
    pub unmatched: Vec<String>,
    pub missing_anchors: Vec<Anchor>,
    pub nav_removed: bool,
    /// Card elements whose role attributes changed.
    pub cards_updated: usize,
}

/// Write role labels into the catalog markup and (re)install the role filter.
/// Applying the result a second time returns it unchanged.
pub fn apply(markup: &str, records: &[ClassifiedRecord]) -> PatchOutcome {
    let mut doc = Document::parse(markup);
    let mut missing_anchors = Vec::new();

    let nav_removed = match doc.find_by_id(QUIZ_NAV_ID) {
        Some(start) => {
            doc.remove_element(start, None);
            true
        }
        None => false,
    };

    // A previous filter is only replaced when there is somewhere to put the new one
    if doc.find_by_id(REPO_GRID_ID).is_some() {
        if let Some(start) = doc.find_by_id(ROLE_FILTER_ID) {
            doc.remove_element(start, Some(SEPARATOR));
        }
        if let Some(at) = doc.find_by_id(REPO_GRID_ID) {
            doc.insert(at, fragment(&role_filter_html()));
        }
    } else {
        missing_anchors.push(Anchor::RepoGrid);
    }

    let mut unmatched = Vec::new();
    let mut cards_updated = 0;
    for record in records {
        let roles = record
            .roles
            .iter()
            .map(|r| r.role.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let confidence = record
            .roles
            .iter()
            .map(|r| format!("{}:{}", r.role, r.confidence))
            .collect::<Vec<_>>()
            .join(" ");

        let mut matched = false;
        for tag in doc
            .start_tags_mut()
            .filter(|t| t.has_class(CARD_CLASS) && t.attr("data-name") == Some(record.slug.as_str()))
        {
            matched = true;
            let mut changed = tag.set_attr("data-roles", &roles);
            changed |= tag.set_attr("data-primary-role", record.primary_role().as_str());
            changed |= tag.set_attr("data-role-confidence", &confidence);
            if changed {
                cards_updated += 1;
            }
        }
        if !matched {
            debug!(name = %record.slug, "no card element for record");
            unmatched.push(record.slug.clone());
        }
    }

    if doc.find_end_tag("body").is_some() {
        if let Some(start) = doc.find_by_id(SCRIPT_ID) {
            doc.remove_element(start, Some(SEPARATOR));
        }
        if let Some(at) = doc.find_end_tag("body") {
            doc.insert(at, fragment(&format!("<script id=\"{SCRIPT_ID}\">{ROLE_FILTER_SCRIPT}</script>")));
        }
    } else {
        missing_anchors.push(Anchor::BodyClose);
    }

    PatchOutcome {
        markup: doc.to_html(),
        unmatched,
        missing_anchors,
        nav_removed,
        cards_updated,
    }
}

fn role_filter_html() -> String {
    let mut html = format!(
        "<div id=\"{ROLE_FILTER_ID}\" class=\"flex flex-wrap items-center gap-2 mb-6\">\n            \
         <span class=\"font-semibold text-gray-700 mr-2\">I am a:</span>\n            \
         <button class=\"role-filter-btn active\" data-role=\"all\">Everyone</button>"
    );
    for role in Role::ALL {
        html.push_str(&format!(
            "\n            <button class=\"role-filter-btn\" data-role=\"{}\">{}</button>",
            role,
            title_case(role.as_str())
        ));
    }
    html.push_str("\n        </div>");
    html
}

/// Parsed block followed by its separator.
fn fragment(html: &str) -> Vec<Node> {
    let mut nodes = Document::parse(html).nodes;
    nodes.push(Node::Text(SEPARATOR.to_string()));
    nodes
}
