//! Prompt builders for the three generation requests.
//!
//! Each prompt embeds the answers as a pretty-printed JSON object.

use supplement_advisor_core::schema::{FOLLOW_UP_COUNT, MIN_HIGH_PRIORITY, MIN_RECOMMENDATIONS};
use supplement_advisor_core::AnswerRecord;

/// Build the prompt asking for personalized follow-up questions.
pub fn build_follow_up_prompt(answers: &AnswerRecord) -> String {
    format!(
        r#"You are a health assessment AI that generates personalized follow-up questions based on user health data.

Based on these answers from a health assessment:
{answers}

Generate exactly {count} relevant follow-up questions that would help understand this person's health needs better.

For each question, provide:
1. A unique string id
2. A clear question text
3. The appropriate question type (one of: "text", "select", "checkbox", "scale")
4. If the type is "select" or "checkbox", a list of options. Omit options for "text" and "scale"; scale questions are always answered from 1 to 10.

Format your response as valid JSON that matches this TypeScript type:
type FollowUpQuestion = {{
  id: string;
  question: string;
  type: "text" | "select" | "checkbox" | "scale";
  options?: string[];
}}[];

Return ONLY the JSON array with no additional text or explanation."#,
        answers = answers.to_pretty_json(),
        count = FOLLOW_UP_COUNT,
    )
}

/// Build the prompt asking for a narrative health analysis.
pub fn build_health_analysis_prompt(answers: &AnswerRecord) -> String {
    format!(
        r#"You are a health analysis AI that identifies potential root causes of health issues.

Based on this health assessment data:
{answers}

Provide a comprehensive health analysis that identifies patterns and potential root causes of health issues.
Format the response in markdown with a bold section header for each health aspect (Energy & Metabolic Health, Nutritional Gaps, Sleep & Recovery, Digestive Health, Stress Response).
Be specific and insightful, connecting the user's symptoms and lifestyle factors with potential underlying issues.

Return the analysis as markdown text with no additional wrapper text."#,
        answers = answers.to_pretty_json(),
    )
}

/// Build the prompt asking for supplement recommendations.
pub fn build_recommendations_prompt(answers: &AnswerRecord) -> String {
    format!(
        r#"You are a health supplement recommendation AI that provides evidence-based supplement suggestions.

Based on this health assessment data:
{answers}

Generate personalized supplement recommendations with the following information for each:
- id: A unique integer
- name: The name of the supplement (e.g., "Vitamin D3")
- dosage: Recommended dosage (e.g., "2000 IU daily")
- priority: Priority level ("high", "medium", or "low")
- category: Category (e.g., "Basic Essentials" or "Advanced Support")
- reason: A detailed explanation of why this supplement is recommended based on their assessment data
- benefits: An array of 3 key benefits (e.g., ["Energy support", "Immune function", "Mood regulation"])
- timing: Best time to take the supplement (e.g., "Take with breakfast for better absorption")

Provide at least {min_total} recommendations, with at least {min_high} high priority ones.

Format your response as valid JSON that matches this TypeScript type:
type Recommendation = {{
  id: number;
  name: string;
  dosage: string;
  priority: "high" | "medium" | "low";
  category: string;
  reason: string;
  benefits: string[];
  timing: string;
}}[];

Return ONLY the JSON array with no additional text or explanation."#,
        answers = answers.to_pretty_json(),
        min_total = MIN_RECOMMENDATIONS,
        min_high = MIN_HIGH_PRIORITY,
    )
}
