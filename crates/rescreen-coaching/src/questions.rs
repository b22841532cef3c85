//! Deterministic interview-question bank.

/// Default role when the caller supplies none.
pub const DEFAULT_TARGET_ROLE: &str = "Software Engineer";

/// Interview questions templated with the target role.
///
/// Deterministic: the same role always yields the same questions, so the
/// coaching dashboard stays stable across reloads.
pub fn interview_questions(target_role: &str) -> Vec<String> {
    let role = match target_role.trim() {
        "" => DEFAULT_TARGET_ROLE,
        trimmed => trimmed,
    };

    vec![
        format!(
            "Walk me through your background and what draws you to the {} role.",
            role
        ),
        format!(
            "Which project best demonstrates that you are ready to work as a {}?",
            role
        ),
        format!(
            "Describe a hard technical problem you solved recently. What would a {} have done differently?",
            role
        ),
        "Tell me about a time you received critical feedback. How did you respond?".to_string(),
        format!(
            "What skills do you think separate a good {} from a great one?",
            role
        ),
        "Describe a situation where you had to deliver under a tight deadline.".to_string(),
        format!(
            "How do you keep your skills current in areas relevant to a {}?",
            role
        ),
        format!("Where do you see your career three years after starting as a {}?", role),
    ]
}
