//! MCP Prompts for AI-assisted database provisioning.
//!
//! One prompt is exposed: `database_creation_prompt`. It maps an expected
//! load/size pair to a suggested edition and service objective via a fixed
//! lookup table, then renders step-by-step creation guidance.

use crate::constants::{DATABASE_CREATION_PROMPT, FALLBACK_EDITION, FALLBACK_SERVICE_OBJECTIVE};
use rmcp::model::{
    GetPromptResult, Prompt, PromptArgument, PromptMessage, PromptMessageContent,
    PromptMessageRole,
};
use std::collections::HashMap;

/// Create a prompt argument helper.
fn prompt_arg(name: &str, description: &str, required: bool) -> PromptArgument {
    PromptArgument {
        name: name.to_string(),
        title: None,
        description: Some(description.to_string()),
        required: Some(required),
    }
}

/// Build the list of available prompts.
pub fn build_prompt_list() -> Vec<Prompt> {
    vec![Prompt {
        name: DATABASE_CREATION_PROMPT.to_string(),
        title: None,
        description: Some("Generate a database creation guidance prompt".to_string()),
        arguments: Some(vec![
            prompt_arg(
                "purpose",
                "Purpose of the database (e.g., \"web application\", \"analytics\", \"testing\")",
                true,
            ),
            prompt_arg("expected_load", "Expected load (low, medium, high)", false),
            prompt_arg("data_size", "Expected data size (small, medium, large)", false),
        ]),
        icons: None,
        meta: None,
    }]
}

/// Get a specific prompt with arguments filled in.
pub fn get_prompt(
    name: &str,
    arguments: Option<&HashMap<String, String>>,
) -> Result<GetPromptResult, String> {
    let args = arguments.cloned().unwrap_or_default();

    match name {
        DATABASE_CREATION_PROMPT => get_database_creation_prompt(&args),
        _ => Err(format!("Unknown prompt: {}", name)),
    }
}

/// Map an expected load/size pair to a suggested (edition, service objective).
///
/// The table is fixed; any combination not listed falls back to
/// Standard / S1. Matching is case-insensitive.
pub fn recommend_tier(expected_load: &str, data_size: &str) -> (&'static str, &'static str) {
    match (
        expected_load.to_lowercase().as_str(),
        data_size.to_lowercase().as_str(),
    ) {
        ("low", "small") => ("Basic", "Basic"),
        ("low", "medium") => ("Standard", "S1"),
        ("medium", "medium") => ("Standard", "S2"),
        ("high", "large") => ("Premium", "P1"),
        _ => (FALLBACK_EDITION, FALLBACK_SERVICE_OBJECTIVE),
    }
}

fn get_database_creation_prompt(
    args: &HashMap<String, String>,
) -> Result<GetPromptResult, String> {
    let purpose = args
        .get("purpose")
        .ok_or("Missing required argument: purpose")?;
    let expected_load = args.get("expected_load").map(|s| s.as_str()).unwrap_or("low");
    let data_size = args.get("data_size").map(|s| s.as_str()).unwrap_or("small");

    let (edition, service_objective) = recommend_tier(expected_load, data_size);

    let prompt_text = format!(
        r#"I need to create an Azure SQL database for: {purpose}

Based on your requirements:
- Expected load: {expected_load}
- Data size: {data_size}

Recommended configuration:
- Edition: {edition}
- Service Objective: {service_objective}

Steps to create:
1. Ensure you have a resource group
2. Create or use an existing SQL server
3. Create the database with recommended settings
4. Configure firewall rules for access
5. Set up connection strings
"#
    );

    Ok(GetPromptResult {
        description: Some(format!("Database creation guidance for: {}", purpose)),
        messages: vec![PromptMessage {
            role: PromptMessageRole::User,
            content: PromptMessageContent::text(prompt_text),
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_tier_table() {
        assert_eq!(recommend_tier("low", "small"), ("Basic", "Basic"));
        assert_eq!(recommend_tier("low", "medium"), ("Standard", "S1"));
        assert_eq!(recommend_tier("medium", "medium"), ("Standard", "S2"));
        assert_eq!(recommend_tier("high", "large"), ("Premium", "P1"));
    }

    #[test]
    fn test_recommend_tier_fallback() {
        assert_eq!(recommend_tier("high", "small"), ("Standard", "S1"));
        assert_eq!(recommend_tier("medium", "large"), ("Standard", "S1"));
        assert_eq!(recommend_tier("", ""), ("Standard", "S1"));
    }

    #[test]
    fn test_recommend_tier_case_insensitive() {
        assert_eq!(recommend_tier("LOW", "Small"), ("Basic", "Basic"));
        assert_eq!(recommend_tier("High", "LARGE"), ("Premium", "P1"));
    }

    #[test]
    fn test_prompt_requires_purpose() {
        let err = get_prompt(DATABASE_CREATION_PROMPT, None).unwrap_err();
        assert!(err.contains("purpose"));
    }

    #[test]
    fn test_prompt_renders_recommendation() {
        let mut args = HashMap::new();
        args.insert("purpose".to_string(), "analytics".to_string());
        args.insert("expected_load".to_string(), "high".to_string());
        args.insert("data_size".to_string(), "large".to_string());

        let result = get_prompt(DATABASE_CREATION_PROMPT, Some(&args)).unwrap();
        let PromptMessageContent::Text { text } = &result.messages[0].content else {
            panic!("expected text content");
        };
        assert!(text.contains("analytics"));
        assert!(text.contains("- Edition: Premium"));
        assert!(text.contains("- Service Objective: P1"));
    }

    #[test]
    fn test_prompt_defaults_to_low_small() {
        let mut args = HashMap::new();
        args.insert("purpose".to_string(), "testing".to_string());

        let result = get_prompt(DATABASE_CREATION_PROMPT, Some(&args)).unwrap();
        let PromptMessageContent::Text { text } = &result.messages[0].content else {
            panic!("expected text content");
        };
        assert!(text.contains("- Edition: Basic"));
        assert!(text.contains("- Service Objective: Basic"));
    }

    #[test]
    fn test_unknown_prompt_is_an_error() {
        assert!(get_prompt("nonexistent", None).is_err());
    }

    #[test]
    fn test_prompt_list_names() {
        let prompts = build_prompt_list();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].name, "database_creation_prompt");
    }
}
