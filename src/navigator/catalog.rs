//! Learning path catalog
//!
//! The fixed, ordered set of templates recommendations are drawn from.
//! Order is significant: the recommender always returns a prefix of it.

use super::types::{Difficulty, LearningPathTemplate};

/// Number of templates in the default catalog
pub const CATALOG_SIZE: usize = 4;

/// Default learning path templates, in selection order
pub fn default_catalog() -> Vec<LearningPathTemplate> {
    vec![
        LearningPathTemplate::new(
            "Frontend Development Mastery",
            "Complete guide to modern frontend development",
            Difficulty::Intermediate,
        )
        .with_weeks(12)
        .with_modules(8)
        .with_skills(&["React", "TypeScript", "CSS", "JavaScript"])
        .with_color("bg-learning-primary"),
        LearningPathTemplate::new(
            "AI & Machine Learning Fundamentals",
            "Introduction to AI concepts and practical applications",
            Difficulty::Beginner,
        )
        .with_weeks(10)
        .with_modules(6)
        .with_skills(&["Python", "TensorFlow", "Data Science", "ML"])
        .with_color("bg-learning-secondary"),
        LearningPathTemplate::new(
            "Full Stack Development",
            "End-to-end web development with modern technologies",
            Difficulty::Advanced,
        )
        .with_weeks(16)
        .with_modules(12)
        .with_skills(&["Node.js", "Database", "API", "DevOps"])
        .with_color("bg-learning-accent"),
        LearningPathTemplate::new(
            "Data Analysis & Visualization",
            "Transform data into meaningful insights",
            Difficulty::Intermediate,
        )
        .with_weeks(8)
        .with_modules(5)
        .with_skills(&["Python", "Pandas", "Matplotlib", "SQL"])
        .with_color("bg-learning-success"),
    ]
}
