use std::collections::BTreeMap;
use std::fmt::Write;

use crate::catalog::{title_case, ClassifiedRecord, Priority};

/// Label counts over one classification run. Keys are label strings so the
/// report lists them alphabetically.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Distribution {
    pub total: usize,
    pub categories: BTreeMap<&'static str, usize>,
    pub tech_levels: BTreeMap<&'static str, usize>,
    pub priorities: BTreeMap<&'static str, usize>,
    pub primary_roles: BTreeMap<&'static str, usize>,
    /// Every assigned role counts, so this may sum past `total`.
    pub role_assignments: BTreeMap<&'static str, usize>,
    pub high_priority: Vec<String>,
}

impl Distribution {
    pub fn from_records(records: &[ClassifiedRecord]) -> Self {
        let mut dist = Distribution {
            total: records.len(),
            ..Default::default()
        };
        for record in records {
            *dist.categories.entry(record.category.as_str()).or_default() += 1;
            *dist.tech_levels.entry(record.tech_level.as_str()).or_default() += 1;
            *dist.priorities.entry(record.priority.as_str()).or_default() += 1;
            *dist.primary_roles.entry(record.primary_role().as_str()).or_default() += 1;
            for assignment in &record.roles {
                *dist.role_assignments.entry(assignment.role.as_str()).or_default() += 1;
            }
            if record.priority == Priority::High {
                dist.high_priority.push(record.display_name.clone());
            }
        }
        dist
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== QUIZ TOOL UPDATE REPORT ===");
        let _ = writeln!(out, "Updated: {} tools", self.total);

        section(&mut out, "CATEGORY DISTRIBUTION", &self.categories);
        section(&mut out, "TECHNICAL LEVEL DISTRIBUTION", &self.tech_levels);
        section(&mut out, "PRIORITY DISTRIBUTION", &self.priorities);
        section(&mut out, "PRIMARY ROLE DISTRIBUTION", &self.primary_roles);
        section(&mut out, "ROLE ASSIGNMENTS", &self.role_assignments);

        let _ = writeln!(out, "\nHIGH PRIORITY TOOLS:");
        for name in &self.high_priority {
            let _ = writeln!(out, "  - {name}");
        }
        out.truncate(out.trim_end().len());
        out
    }
}

fn section(out: &mut String, heading: &str, counts: &BTreeMap<&'static str, usize>) {
    let _ = writeln!(out, "\n{heading}:");
    for (label, count) in counts {
        let _ = writeln!(out, "  {}: {count} tools", title_case(&label.replace('_', " ")));
    }
}
