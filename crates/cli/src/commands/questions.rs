use pifloor_core::Questionnaire;
use serde_json::json;

use super::CommandResult;

pub fn run(json_output: bool) -> CommandResult {
    let questionnaire = Questionnaire::floor_picker();

    if json_output {
        return CommandResult::success_with(
            "questions",
            format!("{} questions", questionnaire.len()),
            Some(json!(questionnaire.questions())),
        );
    }

    let mut lines = Vec::new();
    for (position, question) in questionnaire.questions().iter().enumerate() {
        let suffix = if question.multiple { " (multi-select)" } else { "" };
        lines.push(format!("{}. [id {}] {}{suffix}", position + 1, question.id, question.prompt));
        for option in &question.options {
            lines.push(format!("   - {option}"));
        }
    }
    CommandResult::text(lines.join("\n"))
}
