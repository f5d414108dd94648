use std::fmt;

use serde::Serialize;

/// Names used by the category filter buttons. They carry the same data
/// attributes as real cards and must never be treated as tools.
pub const RESERVED_NAMES: &[&str] = &[
    "all",
    "desktop-application",
    "web-application",
    "python-package",
    "learning-resource",
    "infrastructure-tool",
    "command-line-tool",
];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

/// Class token that marks a catalog card. Matched as a whole token, so
/// `repo-card-featured` is not a card.
pub const CARD_CLASS: &str = "repo-card";

pub fn is_card_class(class: &str) -> bool {
    class.split_whitespace().any(|t| t == CARD_CLASS)
}

/// One tool card as read from the catalog markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawRecord {
    pub name: String,
    pub original_category: String,
    pub description: String,
    pub topics: String,
}

macro_rules! label_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        #[allow(dead_code)]
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

label_enum!(
    /// Teaching category, the main axis of the recommendation table.
    Category {
        ContentCreation => "content_creation",
        StudentInteraction => "student_interaction",
        AssessmentFeedback => "assessment_feedback",
        LanguageCommunication => "language_communication",
        TechnicalEducation => "technical_education",
        ProjectManagement => "project_management",
        AiTutoring => "ai_tutoring",
        Utility => "utility",
        Infrastructure => "infrastructure",
    }
);

label_enum!(TechLevel {
    Beginner => "beginner",
    Intermediate => "intermediate",
    Advanced => "advanced",
});

label_enum!(TeachingContext {
    University => "university",
    K12 => "k12",
    Corporate => "corporate",
    SelfDirected => "self_directed",
    General => "general",
});

label_enum!(Subject {
    Technology => "technology",
    Business => "business",
    Communication => "communication",
    General => "general",
});

label_enum!(Role {
    Lecturer => "lecturer",
    Student => "student",
    Researcher => "researcher",
});

label_enum!(Confidence {
    High => "high",
    Medium => "medium",
    Low => "low",
});

label_enum!(Priority {
    High => "high",
    Medium => "medium",
    Low => "low",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleAssignment {
    pub role: Role,
    pub confidence: Confidence,
    pub score: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedRecord {
    /// Hyphenated source name, e.g. "study-buddy".
    pub slug: String,
    /// "StudyBuddy"
    pub name: String,
    /// "Study Buddy"
    pub display_name: String,
    pub category: Category,
    pub description: String,
    pub priority: Priority,
    #[serde(rename = "techLevel")]
    pub tech_level: TechLevel,
    pub contexts: Vec<TeachingContext>,
    pub subjects: Vec<Subject>,
    pub roles: Vec<RoleAssignment>,
    pub original_category: String,
}

impl ClassifiedRecord {
    /// Key used in the generated table ("studybuddy").
    pub fn table_key(&self) -> String {
        self.name.to_lowercase().replace(' ', "")
    }

    pub fn primary_role(&self) -> Role {
        self.roles.first().map(|r| r.role).unwrap_or(Role::Lecturer)
    }
}

/// "hands-on-ai" -> "Hands On Ai"
pub fn display_name(slug: &str) -> String {
    title_case(&slug.replace('-', " "))
}

/// "hands-on-ai" -> "HandsOnAi"
pub fn pascal_name(slug: &str) -> String {
    display_name(slug).replace(' ', "")
}

/// Title-cases every run of letters: the first letter after any non-letter
/// is upper-cased, the rest lower-cased ("3d-print" -> "3D-Print").
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// Capitalize the first character and terminate with a period.
/// Empty input passes through.
pub fn normalize_description(description: &str) -> String {
    let desc = description.trim();
    let mut chars = desc.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out: String = first.to_uppercase().collect();
    out.push_str(chars.as_str());
    if !out.ends_with('.') {
        out.push('.');
    }
    out
}
