//! Instructions and prompt builders for the three analysis stages.

use crate::llm::client::GenerationParams;

pub const SUMMARY_INSTRUCTION: &str = "\
Your role is to generate a concise, outcome-focused summary of a meeting transcript.
Respond with valid JSON only, using exactly this structure:
{
    \"meeting_outcomes\": \"key points, decisions and conclusions reached during the meeting\",
    \"discuss_steps\": \"the main topics and steps discussed\",
    \"action_items\": [\"clear, measurable action with its responsible party, if mentioned\"]
}";

pub const COUNTERPOINTS_INSTRUCTION: &str = "\
Identify counterpoints and alternative ideas following this JSON structure:
{
    \"counterpoints\": [\"point1\", \"point2\"],
    \"proposed_ideas\": [\"idea1\", \"idea2\"]
}
Focus on objections and ideas not pursued, including rationale when available.";

pub const ACTIONS_INSTRUCTION: &str = "\
You must return a valid JSON array of action items. Each action item must follow this exact structure:
[
    {
        \"description\": \"action description\",
        \"DRI\": \"responsible person\",
        \"C\": [\"consulted person1\", \"consulted person2\"],
        \"I\": [\"informed person1\", \"informed person2\"],
        \"Importance\": \"H\",
        \"Deadline\": \"DD/MM/YYYY\"
    }
]
Do not include any additional text or explanations in the response, only the JSON array.";

pub const SUMMARY_PARAMS: GenerationParams = GenerationParams::json();
pub const COUNTERPOINTS_PARAMS: GenerationParams = GenerationParams::json().with_sampling(0.3, 0.8);
pub const ACTIONS_PARAMS: GenerationParams = GenerationParams::json().with_sampling(0.2, 0.8);

/// Stage 1: summarize the flattened transcript.
pub fn build_summary_prompt(transcript: &str) -> String {
    format!(
        "Transcript: \"{transcript}\"\n\
\n\
Given a transcript of a meeting with multiple participants, generate a short summary \
in valid JSON format using the structure from your instructions."
    )
}

/// Stage 2: counterpoints and ideas, with the stage 1 output as context.
pub fn build_counterpoints_prompt(transcript: &str, conclusions: &str) -> String {
    format!(
        "Extract counterpoints and alternative ideas from this transcript:\n\
\n\
{transcript}\n\
\n\
Related conclusions: {conclusions}\n\
\n\
Provide:\n\
1. Counterpoints discussed leading to the conclusions\n\
2. Proposed ideas that weren't pursued (with rationale if mentioned)"
    )
}

/// Stage 3: assign owners to the action items found in stage 1.
pub fn build_actions_prompt(transcript: &str, action_items: &[String]) -> String {
    // A Vec<String> always serializes.
    let items = serde_json::to_string(action_items).unwrap_or_else(|_| "[]".to_string());

    format!(
        "Based on this transcript and action items, create detailed action assignments:\n\
\n\
TRANSCRIPT:\n\
{transcript}\n\
\n\
ACTION ITEMS:\n\
{items}\n\
\n\
Return ONLY a JSON array where each action item has:\n\
- description: The action item text\n\
- DRI: Single person directly responsible\n\
- C: Array of consulted persons\n\
- I: Array of informed persons\n\
- Importance: \"H\", \"M\", or \"L\"\n\
- Deadline: Date in DD/MM/YYYY format or empty string if no deadline"
    )
}
