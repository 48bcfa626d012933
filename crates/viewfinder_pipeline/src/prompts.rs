//! Prompt assembly for the generation stages.

use serde::Serialize;
use viewfinder_core::{LocationCandidate, OutputSchema, PlanningContext, TranscriptText};

/// Role statement shared by every stage prompt.
pub const PLANNER_ROLE: &str =
    "You are an experienced photographer planning a photo shoot with a client.";

/// Universal JSON formatting requirements appended to every stage prompt.
pub const JSON_FORMAT_REQUIREMENTS: &str = r#"**CRITICAL OUTPUT REQUIREMENTS:**
- Output ONLY valid JSON with no additional text, explanations, or markdown
- Do not use markdown code blocks (no ```json)
- Start your response with { and end with }
- Ensure all required fields are present
- Use appropriate data types (numbers as numbers, not strings)
"#;

/// Prompt for extracting the planning context from a transcript.
pub fn context_prompt(transcript: &TranscriptText, schema: &OutputSchema) -> String {
    let focus = "Read the conversation below between a photographer's assistant and a \
                 client. Extract what the client wants from the shoot. Use only what the \
                 conversation states or clearly implies; leave optional fields out when \
                 they were never discussed. Give two or three mood words.";

    assemble(
        focus,
        &[("Conversation", transcript.as_str().to_string())],
        schema,
    )
}

/// Prompt for proposing locations that fit a planning context.
pub fn locations_prompt(context: &PlanningContext, schema: &OutputSchema) -> String {
    let focus = format!(
        "Propose four or five real, specific shooting locations for this shoot. \
         Respect the location preference ({}) and the time of day ({}). For each \
         location describe why it suits the shoot, when the light is best, and any \
         accessibility or permit concerns.",
        context.location_preference(),
        context.time_of_day()
    );

    assemble(&focus, &[("Planning context", to_json(context))], schema)
}

/// Prompt for planning shots across a list of locations.
pub fn shots_prompt(
    context: &PlanningContext,
    locations: &[LocationCandidate],
    schema: &OutputSchema,
) -> String {
    let focus = format!(
        "Plan a shot list for this shoot across the numbered locations below. \
         `locationIndex` is the zero-based position of the location in the list and \
         must be between 0 and {}. Number shots from 1 without repeating a number. \
         Give composition, camera settings suited to a {} photographer, and posing \
         direction for every shot.",
        locations.len().saturating_sub(1),
        context.experience_level()
    );

    let numbered = locations
        .iter()
        .enumerate()
        .map(|(i, location)| format!("{}. {}: {}", i, location.name, location.description))
        .collect::<Vec<_>>()
        .join("\n");

    assemble(
        &focus,
        &[
            ("Planning context", to_json(context)),
            ("Locations", numbered),
        ],
        schema,
    )
}

fn assemble(focus: &str, sections: &[(&str, String)], schema: &OutputSchema) -> String {
    let mut prompt = String::new();

    prompt.push_str(PLANNER_ROLE);
    prompt.push_str("\n\n");
    prompt.push_str(focus);
    prompt.push_str("\n\n");

    for (title, body) in sections {
        prompt.push_str(&format!("**{}:**\n{}\n\n", title, body));
    }

    prompt.push_str(&format!(
        "Create a JSON object named `{}` ({}) with the following fields:\n",
        schema.name(),
        schema.description()
    ));
    prompt.push_str(&schema.describe());
    prompt.push_str("\n\n");
    prompt.push_str(JSON_FORMAT_REQUIREMENTS);

    prompt
}

fn to_json<T: Serialize + std::fmt::Debug>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| format!("{:?}", value))
}
