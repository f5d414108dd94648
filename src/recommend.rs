//! Quiz-side view of the generated table: turns eight quiz answers into
//! category weights and picks tools from the classified catalog the same way
//! the browser quiz does.

use crate::catalog::{Category, ClassifiedRecord, Priority, TechLevel};
use crate::table::keyed_entries;

const MAX_RECOMMENDATIONS: usize = 12;
const MIN_RECOMMENDATIONS: usize = 10;

/// Raw quiz answers, one per question. Unknown or missing answers add no weight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    /// Teaching level (`k12`, `university`, `corporate`, `self_directed`).
    pub q1: Option<String>,
    /// Subject area.
    pub q2: Option<String>,
    /// Technical level.
    pub q3: Option<String>,
    /// Content focus.
    pub q4: Option<String>,
    /// Engagement style.
    pub q5: Option<String>,
    /// Assessment approach.
    pub q6: Option<String>,
    /// Time investment.
    pub q7: Option<String>,
    /// Educational goal.
    pub q8: Option<String>,
}

impl Answers {
    fn all(&self) -> [Option<&str>; 8] {
        [
            self.q1.as_deref(),
            self.q2.as_deref(),
            self.q3.as_deref(),
            self.q4.as_deref(),
            self.q5.as_deref(),
            self.q6.as_deref(),
            self.q7.as_deref(),
            self.q8.as_deref(),
        ]
    }
}

type AnswerWeights = &'static [(&'static str, &'static [(Category, u32)])];

use Category::{
    AiTutoring as AI, AssessmentFeedback as AF, ContentCreation as CC, ProjectManagement as PM,
    StudentInteraction as SI, TechnicalEducation as TE, Utility as UT,
};

const TEACHING_LEVEL: AnswerWeights = &[
    ("k12", &[(SI, 3), (CC, 2), (AI, 1)]),
    ("university", &[(CC, 3), (AF, 2), (PM, 2)]),
    ("corporate", &[(PM, 3), (TE, 2), (CC, 1)]),
    ("self_directed", &[(AI, 3), (TE, 2), (CC, 1)]),
];

const SUBJECT_AREA: AnswerWeights = &[
    ("technology", &[(TE, 3), (CC, 1)]),
    ("business", &[(PM, 3), (AF, 1)]),
    ("communication", &[(AI, 2), (SI, 2), (AF, 1)]),
    ("general", &[(CC, 2), (SI, 1), (AI, 1)]),
];

const TECHNICAL_LEVEL: AnswerWeights = &[
    ("beginner", &[(AI, 2), (SI, 2), (CC, 1)]),
    ("intermediate", &[(CC, 2), (AF, 2), (TE, 1)]),
    ("advanced", &[(TE, 3), (PM, 1)]),
    ("expert", &[(TE, 3), (PM, 2)]),
];

const CONTENT_FOCUS: AnswerWeights = &[
    ("interactive", &[(CC, 3), (SI, 2)]),
    ("analysis", &[(CC, 2), (AF, 3)]),
    ("technical", &[(TE, 3), (CC, 1)]),
    ("ai_powered", &[(AI, 3), (CC, 2)]),
];

const ENGAGEMENT_STYLE: AnswerWeights = &[
    ("realtime", &[(SI, 3), (AF, 1)]),
    ("project_based", &[(PM, 3), (TE, 2)]),
    ("tutoring", &[(AI, 3), (AF, 1)]),
    ("self_paced", &[(CC, 2), (TE, 2)]),
];

const ASSESSMENT_APPROACH: AnswerWeights = &[
    ("data_analysis", &[(AF, 3), (TE, 1)]),
    ("ai_insights", &[(AI, 2), (AF, 3)]),
    ("realtime_feedback", &[(SI, 2), (AI, 1)]),
    ("project_outcomes", &[(PM, 3), (TE, 1)]),
];

const TIME_INVESTMENT: AnswerWeights = &[
    ("minimal", &[(AI, 2), (SI, 2), (UT, 1)]),
    ("moderate", &[(CC, 2), (AF, 1)]),
    ("significant", &[(TE, 2), (PM, 1)]),
    ("ongoing", &[(TE, 1), (CC, 1), (PM, 1)]),
];

const EDUCATIONAL_GOAL: AnswerWeights = &[
    ("engaging", &[(CC, 3), (SI, 2)]),
    ("technical_skills", &[(TE, 3), (PM, 1)]),
    ("real_world", &[(PM, 3), (TE, 1)]),
    ("personalized", &[(AI, 3), (AF, 2)]),
];

const QUESTIONS: [AnswerWeights; 8] = [
    TEACHING_LEVEL,
    SUBJECT_AREA,
    TECHNICAL_LEVEL,
    CONTENT_FOCUS,
    ENGAGEMENT_STYLE,
    ASSESSMENT_APPROACH,
    TIME_INVESTMENT,
    EDUCATIONAL_GOAL,
];

/// Categories the quiz weighs, in its tie-break order.
pub const WEIGHTED_CATEGORIES: [Category; 7] = [CC, TE, PM, AF, AI, SI, UT];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryWeight {
    pub category: Category,
    pub weight: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation<'a> {
    /// Table key and record, best first.
    pub tools: Vec<(String, &'a ClassifiedRecord)>,
    pub top_categories: Vec<CategoryWeight>,
    pub profile: Profile,
}

/// Quiz label for a weighted category.
pub fn category_label(category: Category) -> &'static str {
    match category {
        Category::ContentCreation => "Content Creation",
        Category::TechnicalEducation => "Technical Education",
        Category::ProjectManagement => "Project Management",
        Category::AssessmentFeedback => "Assessment & Feedback",
        Category::AiTutoring => "AI Tutoring",
        Category::StudentInteraction => "Student Interaction",
        Category::Utility => "Utility Tools",
        Category::LanguageCommunication => "Language & Communication",
        Category::Infrastructure => "Infrastructure",
    }
}

/// Weighted categories, heaviest first. Equal weights keep quiz order.
pub fn category_weights(answers: &Answers) -> Vec<CategoryWeight> {
    let mut weights: Vec<CategoryWeight> = WEIGHTED_CATEGORIES
        .iter()
        .map(|&category| CategoryWeight { category, weight: 0 })
        .collect();

    for (table, answer) in QUESTIONS.iter().zip(answers.all()) {
        let Some(answer) = answer else { continue };
        let Some((_, adds)) = table.iter().find(|(a, _)| *a == answer) else {
            continue;
        };
        for (category, add) in adds.iter() {
            if let Some(w) = weights.iter_mut().find(|w| w.category == *category) {
                w.weight += add;
            }
        }
    }

    weights.sort_by(|a, b| b.weight.cmp(&a.weight));
    weights
}

pub fn is_suitable(tool: &ClassifiedRecord, answers: &Answers) -> bool {
    let level = answers.q1.as_deref();
    let context_fits = tool
        .contexts
        .iter()
        .any(|c| Some(c.as_str()) == level || c.as_str() == "general");
    if !context_fits {
        return false;
    }
    !(answers.q3.as_deref() == Some("beginner") && tool.tech_level == TechLevel::Advanced)
}

pub fn tool_score(tool: &ClassifiedRecord, answers: &Answers) -> u32 {
    let mut score = match tool.priority {
        Priority::High => 3,
        Priority::Medium => 2,
        Priority::Low => 1,
    };
    if tool.contexts.iter().any(|c| Some(c.as_str()) == answers.q1.as_deref()) {
        score += 2;
    }
    if tool.subjects.iter().any(|s| Some(s.as_str()) == answers.q2.as_deref()) {
        score += 2;
    }
    if Some(tool.tech_level.as_str()) == answers.q3.as_deref() {
        score += 1;
    }
    score
}

pub fn profile(category: Category) -> Profile {
    match category {
        Category::TechnicalEducation => Profile {
            title: "The Technical Educator",
            description: "You specialize in teaching technical skills and programming concepts. Your approach combines hands-on learning with systematic skill development.",
        },
        Category::ProjectManagement => Profile {
            title: "The Project Connector",
            description: "You believe in learning through real-world application. Your strength lies in connecting students with practical, industry-relevant experiences.",
        },
        Category::AssessmentFeedback => Profile {
            title: "The Insight Analyst",
            description: "You value data-driven insights and meaningful feedback. Your teaching approach focuses on understanding student progress through analysis.",
        },
        Category::AiTutoring => Profile {
            title: "The AI Learning Guide",
            description: "You embrace AI-powered personalization in education. Your approach leverages technology to provide individualized learning support.",
        },
        Category::StudentInteraction => Profile {
            title: "The Engagement Specialist",
            description: "You thrive on real-time interaction and student engagement. Your teaching style emphasizes active participation and immediate feedback.",
        },
        _ => Profile {
            title: "The Content Creator",
            description: "You excel at creating engaging educational materials and presentations. Your focus is on building comprehensive learning experiences that captivate and educate.",
        },
    }
}

/// Suitable entries passing `pred`, best score first.
fn ranked<'a>(
    entries: &[(String, &'a ClassifiedRecord)],
    answers: &Answers,
    pred: impl Fn(&str, &ClassifiedRecord) -> bool,
) -> Vec<(String, &'a ClassifiedRecord)> {
    let mut tools: Vec<(String, &'a ClassifiedRecord)> = entries
        .iter()
        .filter(|(key, tool)| pred(key.as_str(), *tool) && is_suitable(*tool, answers))
        .map(|(key, tool)| (key.clone(), *tool))
        .collect();
    tools.sort_by(|a, b| tool_score(b.1, answers).cmp(&tool_score(a.1, answers)));
    tools
}

/// Pick up to twelve tools for a set of answers.
pub fn recommend<'a>(records: &'a [ClassifiedRecord], answers: &Answers) -> Recommendation<'a> {
    let sorted = category_weights(answers);
    let entries = keyed_entries(records);

    let mut picked: Vec<(String, &'a ClassifiedRecord)> = Vec::new();
    for cw in &sorted {
        if picked.len() >= MAX_RECOMMENDATIONS {
            break;
        }
        let take = match cw.weight {
            w if w > 5 => 3,
            w if w > 2 => 2,
            _ => 1,
        };
        let in_category = ranked(&entries, answers, |_, tool| tool.category == cw.category);
        picked.extend(in_category.into_iter().take(take));
    }

    if picked.len() < MIN_RECOMMENDATIONS {
        let room = MAX_RECOMMENDATIONS - picked.len();
        let rest = ranked(&entries, answers, |key, _| !picked.iter().any(|(k, _)| k == key));
        picked.extend(rest.into_iter().take(room));
    }
    picked.truncate(MAX_RECOMMENDATIONS);

    let profile = profile(sorted[0].category);
    Recommendation {
        tools: picked,
        top_categories: sorted.into_iter().take(3).collect(),
        profile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Confidence, Role, RoleAssignment, Subject, TeachingContext};

    fn answers(a: [&str; 8]) -> Answers {
        let [q1, q2, q3, q4, q5, q6, q7, q8] = a.map(|s| Some(s.to_string()));
        Answers { q1, q2, q3, q4, q5, q6, q7, q8 }
    }

    fn tool(slug: &str, category: Category, priority: Priority, tech: TechLevel, context: TeachingContext) -> ClassifiedRecord {
        ClassifiedRecord {
            slug: slug.to_string(),
            name: crate::catalog::pascal_name(slug),
            display_name: crate::catalog::display_name(slug),
            category,
            description: String::new(),
            priority,
            tech_level: tech,
            contexts: vec![context],
            subjects: vec![Subject::General],
            roles: vec![RoleAssignment {
                role: Role::Lecturer,
                confidence: Confidence::Low,
                score: 0,
            }],
            original_category: "web-application".to_string(),
        }
    }

    fn top_three(a: &Answers) -> Vec<Category> {
        category_weights(a).iter().take(3).map(|w| w.category).collect()
    }

    fn hits(top: &[Category], expected: &[Category]) -> usize {
        expected.iter().filter(|c| top.contains(c)).count()
    }

    #[test]
    fn university_technical_educator() {
        let a = answers([
            "university", "technology", "advanced", "technical", "project_based", "data_analysis",
            "significant", "technical_skills",
        ]);
        let weights = category_weights(&a);
        assert_eq!(weights[0], CategoryWeight { category: TE, weight: 17 });
        assert_eq!(weights[1], CategoryWeight { category: PM, weight: 8 });
        // CC and AF tie at 5; CC comes first in quiz order
        assert_eq!(weights[2], CategoryWeight { category: CC, weight: 5 });
        assert_eq!(weights[3], CategoryWeight { category: AF, weight: 5 });
        assert!(hits(&top_three(&a), &[TE, PM, CC]) >= 2);
    }

    #[test]
    fn k12_general_educator() {
        let a = answers([
            "k12", "general", "beginner", "interactive", "realtime", "realtime_feedback", "minimal",
            "engaging",
        ]);
        assert_eq!(top_three(&a), vec![SI, CC, AI]);
        assert_eq!(category_weights(&a)[0].weight, 17);
    }

    #[test]
    fn corporate_business_trainer() {
        let a = answers([
            "corporate", "business", "intermediate", "analysis", "project_based", "project_outcomes",
            "moderate", "real_world",
        ]);
        let top = top_three(&a);
        assert_eq!(top[0], PM);
        assert!(hits(&top, &[PM, AF, CC]) >= 2);
    }

    #[test]
    fn unknown_answers_add_nothing() {
        let a = Answers {
            q1: Some("mars".to_string()),
            ..Default::default()
        };
        let weights = category_weights(&a);
        assert!(weights.iter().all(|w| w.weight == 0));
        assert_eq!(weights.iter().map(|w| w.category).collect::<Vec<_>>(), WEIGHTED_CATEGORIES.to_vec());
        assert_eq!(profile(weights[0].category).title, "The Content Creator");
    }

    #[test]
    fn suitability_rules() {
        let a = answers(["k12", "general", "beginner", "", "", "", "", ""]);
        let general = tool("a", CC, Priority::Medium, TechLevel::Intermediate, TeachingContext::General);
        let k12 = tool("b", CC, Priority::Medium, TechLevel::Intermediate, TeachingContext::K12);
        let uni = tool("c", CC, Priority::Medium, TechLevel::Intermediate, TeachingContext::University);
        let hard = tool("d", CC, Priority::Medium, TechLevel::Advanced, TeachingContext::General);
        assert!(is_suitable(&general, &a));
        assert!(is_suitable(&k12, &a));
        assert!(!is_suitable(&uni, &a));
        assert!(!is_suitable(&hard, &a));

        let expert = answers(["k12", "general", "advanced", "", "", "", "", ""]);
        assert!(is_suitable(&hard, &expert));
    }

    #[test]
    fn scores_add_bonuses() {
        let a = answers(["k12", "general", "beginner", "", "", "", "", ""]);
        // high 3 + context 2 + subject 2 + level 1
        let best = tool("a", CC, Priority::High, TechLevel::Beginner, TeachingContext::K12);
        assert_eq!(tool_score(&best, &a), 8);
        let plain = tool("b", CC, Priority::Low, TechLevel::Intermediate, TeachingContext::University);
        assert_eq!(tool_score(&plain, &a), 3);
    }

    #[test]
    fn picks_more_from_heavier_categories() {
        let a = answers([
            "university", "technology", "advanced", "technical", "project_based", "data_analysis",
            "significant", "technical_skills",
        ]);
        let mut records = Vec::new();
        for i in 0..5 {
            records.push(tool(&format!("te-{i}"), TE, Priority::Medium, TechLevel::Advanced, TeachingContext::General));
            records.push(tool(&format!("pm-{i}"), PM, Priority::Medium, TechLevel::Intermediate, TeachingContext::General));
            records.push(tool(&format!("ai-{i}"), AI, Priority::Medium, TechLevel::Intermediate, TeachingContext::General));
        }
        records.push(tool("te-best", TE, Priority::High, TechLevel::Advanced, TeachingContext::University));

        let rec = recommend(&records, &a);
        let keys: Vec<&str> = rec.tools.iter().map(|(k, _)| k.as_str()).collect();
        // TE weight 17 -> 3 tools, best scored first; PM weight 8 -> 3 tools
        assert_eq!(&keys[..6], &["tebest", "te0", "te1", "pm0", "pm1", "pm2"]);
        // AI weighs 0 -> 1 tool, then top-up fills to 12 since 7 < 10
        assert_eq!(keys.len(), 12);
        assert_eq!(keys[6], "ai0");
        assert_eq!(rec.profile.title, "The Technical Educator");
        assert_eq!(rec.top_categories.len(), 3);
    }

    #[test]
    fn small_catalog_returns_every_suitable_tool_once() {
        let a = answers(["k12", "general", "beginner", "", "", "", "", ""]);
        let records = vec![
            tool("only-one", SI, Priority::High, TechLevel::Beginner, TeachingContext::K12),
            tool("lang", Category::LanguageCommunication, Priority::Low, TechLevel::Beginner, TeachingContext::General),
            tool("too-hard", SI, Priority::High, TechLevel::Advanced, TeachingContext::General),
        ];
        let rec = recommend(&records, &a);
        let keys: Vec<&str> = rec.tools.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["onlyone", "lang"]);
    }
}
