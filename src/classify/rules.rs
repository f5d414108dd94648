use crate::catalog::{Category, Role, Subject, TeachingContext, TechLevel};

/// Ordered label -> keywords table. Order is significant: it decides ties and
/// first-hit precedence.
pub type RuleTable<L> = &'static [(L, &'static [&'static str])];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryStrategy {
    /// Label with the most keyword hits; ties go to the earlier label.
    MostHits,
    /// First label with any hit.
    FirstHit,
}

/// Immutable rule configuration for one classifier instance.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub name: &'static str,
    pub category_strategy: CategoryStrategy,
    pub categories: RuleTable<Category>,
    pub tech_levels: RuleTable<TechLevel>,
    pub contexts: RuleTable<TeachingContext>,
    pub subjects: RuleTable<Subject>,
    pub roles: RuleTable<Role>,
    pub high_priority: &'static [&'static str],
}

const HIGH_PRIORITY_TOOLS: &[&str] = &[
    "critique-quest",
    "curriculum-curator",
    "deep-brief",
    "python-jumpstart",
    "hands-on-ai",
    "insight-lens",
    "feed-forward",
    "capstone-connect",
    "venture-lab",
    "study-buddy",
    "talk-buddy",
    "class-pulse",
];

const TECH_LEVEL_RULES: RuleTable<TechLevel> = &[
    (
        TechLevel::Beginner,
        &[
            "beginner", "jumpstart", "learn", "tutorial", "guide", "minimum", "buddy", "simple",
            "easy", "basic", "intro",
        ],
    ),
    (
        TechLevel::Advanced,
        &[
            "docker", "api", "framework", "infrastructure", "electron", "cms", "ollama",
            "advanced", "expert", "complex", "professional",
        ],
    ),
];

const CONTEXT_RULES: RuleTable<TeachingContext> = &[
    (
        TeachingContext::University,
        &["university", "lecturer", "college", "academic", "higher education"],
    ),
    (
        TeachingContext::K12,
        &["k12", "school", "classroom", "student", "primary", "secondary"],
    ),
    (
        TeachingContext::Corporate,
        &["corporate", "business", "professional", "workplace", "enterprise"],
    ),
    (
        TeachingContext::SelfDirected,
        &["self", "independent", "personal", "individual"],
    ),
];

const SUBJECT_RULES: RuleTable<Subject> = &[
    (
        Subject::Technology,
        &["python", "programming", "code", "tech", "software", "development"],
    ),
    (
        Subject::Business,
        &["business", "venture", "enterprise", "management", "entrepreneurship"],
    ),
    (
        Subject::Communication,
        &["communication", "language", "speech", "conversation", "presentation"],
    ),
    (Subject::General, &["general", "multi", "broad", "diverse", "various"]),
];

const ROLE_RULES: RuleTable<Role> = &[
    (
        Role::Lecturer,
        &[
            "lecturer", "teacher", "educator", "instructor", "presenter", "teaching",
            "curriculum", "course", "classroom", "case studies", "slide", "grading", "feedback",
            "assessment", "poll",
        ],
    ),
    (
        Role::Student,
        &[
            "student", "learn", "beginner", "practice", "tutor", "study", "jumpstart",
            "exercise", "interview", "skills", "assignment", "self-paced",
        ],
    ),
    (
        Role::Researcher,
        &[
            "research", "analysis", "analyse", "analyze", "data", "survey", "insight",
            "transcription", "visualise", "trends", "rag", "llm", "simulat",
        ],
    ),
];

const STANDARD_CATEGORIES: RuleTable<Category> = &[
    (
        Category::ContentCreation,
        &[
            "curriculum", "content", "presentation", "case studies", "brief", "slide",
            "docs", "docslanding", "curator", "creative", "material",
        ],
    ),
    (
        Category::StudentInteraction,
        &[
            "interaction", "poll", "audience", "pulse", "engage", "clone", "real-time",
            "interactive", "live", "participation",
        ],
    ),
    (
        Category::AssessmentFeedback,
        &[
            "feedback", "forward", "insight", "analysis", "survey", "lens",
            "assessment", "evaluation", "analytics", "performance", "grade",
        ],
    ),
    (
        Category::LanguageCommunication,
        &[
            "talk", "conversation", "english", "communication", "voice",
            "transcription", "language", "speech", "pronunciation", "chat",
        ],
    ),
    (
        Category::TechnicalEducation,
        &[
            "python", "programming", "code", "dev", "calculator", "weather",
            "paradigms", "technical", "tutorial", "coding", "algorithm", "software",
        ],
    ),
    (
        Category::ProjectManagement,
        &[
            "project", "management", "capstone", "connect", "venture", "business",
            "industry", "enterprise", "collaboration", "workflow",
        ],
    ),
    (
        Category::AiTutoring,
        &[
            "ai", "tutor", "buddy", "intelligent", "personalized", "adaptive", "smart",
            "chatbot", "assistant", "guide",
        ],
    ),
    (
        Category::Utility,
        &["toolkit", "utils", "helper", "tool", "utility", "link", "url", "general"],
    ),
];

const AUDIT_CATEGORIES: RuleTable<Category> = &[
    (
        Category::ContentCreation,
        &["curriculum", "docs", "brief", "slide", "case studies", "content"],
    ),
    (
        Category::StudentInteraction,
        &["pulse", "poll", "interaction", "audience", "engage", "clone"],
    ),
    (
        Category::AssessmentFeedback,
        &["feedback", "forward", "insight", "lens", "analysis", "survey"],
    ),
    (
        Category::LanguageCommunication,
        &["talk", "conversation", "english", "voice", "transcription", "deep-talk"],
    ),
    (
        Category::TechnicalEducation,
        &["python", "programming", "code", "dev", "calculator", "weather", "paradigms"],
    ),
    (
        Category::ProjectManagement,
        &["capstone", "connect", "project", "venture", "business", "industry"],
    ),
    (
        Category::AiTutoring,
        &["buddy", "tutor", "ai", "chatbot", "quest", "hands-on-ai"],
    ),
    (
        Category::Infrastructure,
        &["template", "kit", "scaffold", "cms", "utils", "toolkit", "infrastructure"],
    ),
];

impl RuleSet {
    /// Rules behind the generated recommendation table.
    pub fn standard() -> Self {
        RuleSet {
            name: "standard",
            category_strategy: CategoryStrategy::MostHits,
            categories: STANDARD_CATEGORIES,
            tech_levels: TECH_LEVEL_RULES,
            contexts: CONTEXT_RULES,
            subjects: SUBJECT_RULES,
            roles: ROLE_RULES,
            high_priority: HIGH_PRIORITY_TOOLS,
        }
    }

    /// Coarser first-hit rules used when auditing the catalog by hand; adds
    /// an infrastructure bucket for scaffolds and templates.
    pub fn audit() -> Self {
        RuleSet {
            name: "audit",
            category_strategy: CategoryStrategy::FirstHit,
            categories: AUDIT_CATEGORIES,
            tech_levels: TECH_LEVEL_RULES,
            contexts: CONTEXT_RULES,
            subjects: SUBJECT_RULES,
            roles: ROLE_RULES,
            high_priority: HIGH_PRIORITY_TOOLS,
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "standard" => Some(Self::standard()),
            "audit" => Some(Self::audit()),
            _ => None,
        }
    }
}
