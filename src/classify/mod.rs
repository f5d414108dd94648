pub mod rules;

use crate::catalog::{
    display_name, normalize_description, pascal_name, Category, ClassifiedRecord, Confidence,
    Priority, RawRecord, Role, RoleAssignment, Subject, TeachingContext, TechLevel,
};
use rules::{CategoryStrategy, RuleSet, RuleTable};

/// Keyword classifier over one rule set. Holds no state besides the rules, so
/// a record's labels depend only on its own fields.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'r> {
    rules: &'r RuleSet,
}

impl<'r> Classifier<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Classifier { rules }
    }

    pub fn classify(&self, raw: &RawRecord) -> ClassifiedRecord {
        let text = format!(
            "{} {} {}",
            raw.name.to_lowercase(),
            raw.description.to_lowercase(),
            raw.topics.to_lowercase()
        );

        let category = self.category(&text);
        let tech_level = first_hit(self.rules.tech_levels, &text).unwrap_or(TechLevel::Intermediate);
        let context = first_hit(self.rules.contexts, &text).unwrap_or(TeachingContext::General);
        let subject = first_hit(self.rules.subjects, &text).unwrap_or(Subject::General);
        let priority = self.priority(&raw.name, category);

        ClassifiedRecord {
            slug: raw.name.clone(),
            name: pascal_name(&raw.name),
            display_name: display_name(&raw.name),
            category,
            description: normalize_description(&raw.description),
            priority,
            tech_level,
            contexts: vec![context],
            subjects: vec![subject],
            roles: self.roles(raw),
            original_category: raw.original_category.clone(),
        }
    }

    pub fn category(&self, text: &str) -> Category {
        match self.rules.category_strategy {
            CategoryStrategy::FirstHit => first_hit(self.rules.categories, text),
            CategoryStrategy::MostHits => {
                let mut best = None;
                let mut max_score = 0;
                for (label, keywords) in self.rules.categories {
                    let score = hits(text, keywords);
                    // Strictly greater: an equal later score never wins
                    if score > max_score {
                        max_score = score;
                        best = Some(*label);
                    }
                }
                best
            }
        }
        .unwrap_or(Category::ContentCreation)
    }

    /// Scored roles, best first. Never empty.
    pub fn roles(&self, raw: &RawRecord) -> Vec<RoleAssignment> {
        let text = format!("{} {}", raw.description.to_lowercase(), raw.topics.to_lowercase());
        let scores: Vec<(Role, usize)> = self
            .rules
            .roles
            .iter()
            .map(|(role, keywords)| (*role, hits(&text, keywords)))
            .collect();
        let max_score = scores.iter().map(|(_, s)| *s).max().unwrap_or(0);

        let mut roles: Vec<RoleAssignment> = scores
            .into_iter()
            .filter(|(_, score)| *score > 0)
            .map(|(role, score)| RoleAssignment {
                role,
                confidence: confidence(score, max_score),
                score,
            })
            .collect();
        // Stable: equal scores keep table order
        roles.sort_by(|a, b| b.score.cmp(&a.score));

        if roles.is_empty() {
            roles.push(RoleAssignment {
                role: fallback_role(&raw.original_category),
                confidence: Confidence::Low,
                score: 0,
            });
        }
        roles
    }

    pub fn priority(&self, name: &str, category: Category) -> Priority {
        if self.rules.high_priority.contains(&name) {
            Priority::High
        } else if matches!(category, Category::Utility | Category::Infrastructure) {
            Priority::Low
        } else {
            Priority::Medium
        }
    }
}

/// Strength of a role relative to the best role of the same record.
/// Boundaries are inclusive: 3/4 of the best is high, 1/2 is medium.
pub fn confidence(score: usize, max_score: usize) -> Confidence {
    if max_score == 0 {
        return Confidence::Low;
    }
    if 4 * score >= 3 * max_score {
        Confidence::High
    } else if 2 * score >= max_score {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

fn fallback_role(original_category: &str) -> Role {
    let category = original_category.to_lowercase();
    if category.contains("desktop") || category.contains("infrastructure") {
        Role::Lecturer
    } else if category.contains("package") || category.contains("learning") {
        Role::Student
    } else {
        Role::Lecturer
    }
}

fn hits(text: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| text.contains(*k)).count()
}

fn first_hit<L: Copy>(table: RuleTable<L>, text: &str) -> Option<L> {
    table
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(label, _)| *label)
}
