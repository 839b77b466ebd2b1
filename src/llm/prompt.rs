// src/llm/prompt.rs
// Static triage prompt embedding the category taxonomy and the user message

/// Build the classification prompt for a validated customer message.
///
/// The template is static per call: task statement, all five categories with
/// one-line criteria and examples, the literal message, and the request for a
/// justification plus a 0.0-1.0 confidence.
pub fn build_triage_prompt(message: &str) -> String {
    format!(
        r#"**Task**: Triage a customer inquiry.

**Instructions**:
Your goal is to accurately classify a user's message into one of the predefined categories.
Analyze the following user message and provide the most likely category, a concise 1-2 sentence justification for your choice, and a confidence score from 0.0 to 1.0.

**Available Categories and their criteria**:
- **TECHNICAL_SUPPORT**: Problems using the product, errors, bugs, performance issues (e.g., "can't log in", "feature not working").
- **BILLING_INQUIRY**: Questions about invoices, payments, subscriptions, refunds, pricing (e.g., "double charged", "how to get a refund").
- **SALES**: Pre-purchase inquiries about features, pricing plans, demonstrations (e.g., "do you have feature X?", "what is the enterprise price?").
- **ACCOUNT_MANAGEMENT**: Requests to update personal information, change plans, cancel accounts (e.g., "change my email", "cancel subscription").
- **GENERAL_FEEDBACK**: Suggestions, compliments, or general comments not requiring immediate action (e.g., "I love your product", "you should add...").

**User Message to Analyze**:
"{message}"
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Category;

    #[test]
    fn test_prompt_contains_all_categories() {
        let prompt = build_triage_prompt("I was double charged this month");
        for category in Category::ALL {
            assert!(
                prompt.contains(category.as_str()),
                "prompt is missing {}",
                category.as_str()
            );
        }
    }

    #[test]
    fn test_prompt_embeds_message_verbatim() {
        let message = "My dashboard shows a 500 error every time I export.";
        let prompt = build_triage_prompt(message);
        assert!(prompt.contains(message));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = build_triage_prompt("same message, same prompt");
        let b = build_triage_prompt("same message, same prompt");
        assert_eq!(a, b);
    }
}
