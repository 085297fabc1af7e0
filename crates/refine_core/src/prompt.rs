//! System and user instructions sent to the generator.

use shared::domain::{ContentType, Platform};

/// System and user halves of one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

fn length_hint(platform: Platform) -> String {
    match platform.prompt_limit_hint() {
        Some(limit) => format!("up to {limit} characters"),
        None => "short paragraphs, length flexible".to_string(),
    }
}

fn refinement_guideline(platform: Platform) -> String {
    let style = match platform {
        Platform::Linkedin => "Professional tone, 2-3 hashtags",
        Platform::Twitter => "Conversational tone, 1-2 hashtags",
        Platform::Bluesky => "Community-focused, 1-2 hashtags",
        Platform::Threads => "Casual tone, engaging format",
    };
    format!(
        "{} - {style}, {}",
        platform.display_name(),
        length_hint(platform)
    )
}

fn creation_guideline(platform: Platform) -> &'static str {
    match platform {
        Platform::Linkedin => {
            "Write in a professional tone suitable for LinkedIn. Content should be insightful, detailed (up to 1300 characters), and include 2-3 relevant hashtags. Format with clear paragraphs and bullet points when applicable."
        }
        Platform::Twitter => {
            "Create concise content for Twitter/X under 280 characters. Use engaging language, 1-2 relevant hashtags, and a conversational tone. Consider adding a question or call to action when appropriate."
        }
        Platform::Bluesky => {
            "Write for Bluesky with a community-focused approach under 300 characters. Use a slightly more casual tone than Twitter while maintaining professionalism. Include 1-2 relevant hashtags."
        }
        Platform::Threads => {
            "Create content for Threads with a visual-first mindset. Write in a casual, conversational tone. Content should be engaging and easy to read, with short paragraphs and an authentic voice."
        }
    }
}

fn content_guideline(content_type: &ContentType) -> String {
    let known = match content_type {
        ContentType::NewsSummary => "Summarize recent developments with factual accuracy. Include key points, implications, and proper citations.",
        ContentType::TrendAnalysis => "Analyze current trends, providing insights into patterns, potential future developments, and implications for professionals or consumers.",
        ContentType::DeepDive => "Provide comprehensive, in-depth analysis with multiple perspectives, detailed explanations, and actionable insights. Include background context and expert viewpoints.",
        ContentType::Tip => "Provide actionable, practical advice that readers can implement. Be specific and include examples where helpful.",
        ContentType::Opinion => "Offer an informed perspective on current developments, backed by facts and analysis.",
        ContentType::Analysis => "Provide thoughtful analysis and insights on the topic.",
        ContentType::Guide => "Create a helpful guide with step-by-step information.",
        ContentType::Comparison => "Compare different aspects, options, or approaches related to the topic.",
        ContentType::CaseStudy => "Present a detailed case study with analysis and lessons learned.",
        ContentType::Tutorial => "Create educational content that teaches something specific.",
        ContentType::Review => "Provide a comprehensive review with pros, cons, and recommendations.",
        ContentType::Custom(label) => {
            return format!("Create informative, engaging {label} content.");
        }
    };
    known.to_string()
}

/// Request that rewrites `content` according to `instruction`.
pub fn refinement_prompt(content: &str, instruction: &str, platform: Platform) -> PromptPair {
    let system = format!(
        "You are an expert social media content optimizer for {name}. Your task is to improve existing social media content based on specific user requests.

PLATFORM: {guideline}

CRITICAL INSTRUCTIONS:
- Refine the content according to the user's specific request
- Preserve the original intent, core message and key information
- Respect the platform length limit ({hint}) and formatting conventions
- Enhance engagement for the platform's audience
- Respond ONLY with the refined social media post content
- Do not include explanations, reasoning, or meta-commentary",
        name = platform.display_name(),
        guideline = refinement_guideline(platform),
        hint = length_hint(platform),
    );

    let user = format!(
        "ORIGINAL CONTENT:
{content}

REFINEMENT REQUEST:
{instruction}

PLATFORM: {platform}

Please refine the original content according to the refinement request. Provide ONLY the improved social media post content - nothing else."
    );

    PromptPair { system, user }
}

/// Request that writes a first version of a post about `topic`.
pub fn draft_prompt(topic: &str, content_type: &ContentType, platform: Platform) -> PromptPair {
    let system = format!(
        "You are an expert social media content creator. Your task is to create ready-to-post content for social media platforms.

CONTENT TYPE: {content}

PLATFORM GUIDELINES: {platform_guideline}

CRITICAL: Respond ONLY with the final social media post content. Do not include your thinking process, explanations of your approach, meta-commentary or step-by-step reasoning.

Your response should be ready to copy and paste, well-researched with accurate and up-to-date information, engaging for the target audience and formatted for the platform. Include citations only if they fit naturally in the post.",
        content = content_guideline(content_type),
        platform_guideline = creation_guideline(platform),
    );

    let user = format!(
        "Create a {content_type} post about \"{topic}\" for {platform}.

Requirements:
- Research current information about {topic}
- Include practical insights valuable to the audience
- Use platform-appropriate formatting and tone
- Make it engaging to encourage interaction

IMPORTANT: Provide ONLY the final social media post text - no explanations, no reasoning process, just the post content that's ready to publish."
    );

    PromptPair { system, user }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refinement_system_prompt_names_platform_limit() {
        let prompt = refinement_prompt("post", "shorter", Platform::Twitter);
        assert!(prompt.system.contains("Twitter/X"));
        assert!(prompt.system.contains("280 characters"));

        let prompt = refinement_prompt("post", "shorter", Platform::Threads);
        assert!(prompt.system.contains("Threads"));
        assert!(!prompt.system.contains("up to"));
    }

    #[test]
    fn refinement_user_prompt_keeps_content_verbatim() {
        let content = "Line one\n\n  indented #tag 100%";
        let prompt = refinement_prompt(content, "Add a CTA {now}", Platform::Linkedin);
        assert!(prompt.user.contains(content));
        assert!(prompt.user.contains("Add a CTA {now}"));
        assert!(prompt.user.contains("PLATFORM: linkedin"));
    }

    #[test]
    fn draft_prompt_uses_custom_label_guideline() {
        let prompt = draft_prompt("Rust", &ContentType::parse("hot take"), Platform::Bluesky);
        assert!(prompt
            .system
            .contains("Create informative, engaging hot take content."));
        assert!(prompt.user.contains("\"Rust\""));
        assert!(prompt.user.contains("for bluesky"));
    }
}
