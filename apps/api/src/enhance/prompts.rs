// Prompt templates for field enhancement and full-draft generation.
// Placeholders are replaced with `str::replace` before sending.

use crate::enhance::models::{DraftRequest, Field, ProfileContext};

/// Shared preamble. Replace: {full_name}, {current_position}, {industry}
const CONTEXT_PREAMBLE: &str = "Given this context about a professional named {full_name} \
    who works as a {current_position} in the {industry} industry,";

/// Replace: {content}
const SUMMARY_TEMPLATE: &str = " please enhance this professional summary while keeping the \
    core message: \"{content}\". Generate a polished, confident professional summary \
    (2-3 sentences) that highlights their expertise and value proposition. \
    Respond with the summary text only.";

/// Replace: {content}
const EXPERIENCE_TEMPLATE: &str = " please enhance this job description while keeping the \
    core information: \"{content}\". Generate a compelling, achievement-focused description \
    (2-3 sentences) that highlights accomplishments and responsibilities. \
    Respond with the description text only.";

/// Replace: {content}
const SKILLS_TEMPLATE: &str = " and based on these current skills: \"{content}\", \
    return exactly 5 related skills as a single comma-separated list of short terms. \
    Respond with the list only, no numbering and no explanations.";

/// Replace: {full_name}, {current_position}, {years_of_experience}, {industry}, {skills}
const DRAFT_TEMPLATE: &str = r#"Create a professional summary, job description, and skill list for a CV. The person's name is {full_name}, they work as a {current_position} with {years_of_experience} years of experience in the {industry} industry. Their current skills include: {skills}.

Return a JSON object with this EXACT schema (no extra fields):
{
  "summary": "a professional summary paragraph",
  "description": "a compelling job description focused on achievements",
  "skills": "a comma-separated list of 8-10 relevant skills"
}

Do NOT use markdown code fences. Do NOT include any text outside the JSON object."#;

/// Builds the instruction string for a single-field enhancement.
///
/// Never fails: absent context values become `N/A` and empty content is
/// embedded as-is.
pub fn build_enhance_prompt(
    field: Field,
    content: &str,
    context: &ProfileContext,
    additional_instructions: Option<&str>,
) -> String {
    let body = match field {
        Field::Summary => SUMMARY_TEMPLATE,
        Field::Experience => EXPERIENCE_TEMPLATE,
        Field::Skills => SKILLS_TEMPLATE,
    };

    let mut prompt = CONTEXT_PREAMBLE
        .replace("{full_name}", context.full_name())
        .replace("{current_position}", context.current_position())
        .replace("{industry}", context.industry());
    // Content goes in last so user text containing `{...}` is never re-expanded.
    prompt.push_str(&body.replace("{content}", content));

    if let Some(extra) = additional_instructions.filter(|s| !s.trim().is_empty()) {
        prompt.push(' ');
        prompt.push_str(extra);
    }

    prompt
}

/// Builds the instruction string for a full first draft.
pub fn build_draft_prompt(request: &DraftRequest) -> String {
    DRAFT_TEMPLATE
        .replace("{full_name}", request.full_name.trim())
        .replace("{current_position}", request.current_position.trim())
        .replace("{years_of_experience}", or_unknown(&request.years_of_experience))
        .replace("{industry}", or_unknown(&request.industry))
        .replace("{skills}", or_unknown(&request.skills))
}

fn or_unknown(value: &str) -> &str {
    let value = value.trim();
    if value.is_empty() {
        "unspecified"
    } else {
        value
    }
}
