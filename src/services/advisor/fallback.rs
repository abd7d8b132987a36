//! Deterministic fallback content, used whenever the backend cannot be used.

use supplement_advisor_core::{FollowUpQuestion, Priority, QuestionType, Recommendation};

/// Fallback follow-up questions: energy pattern, stress scale, concerns.
pub fn fallback_follow_up_questions() -> Vec<FollowUpQuestion> {
    vec![
        FollowUpQuestion::new(
            "fallback_1",
            "Do you experience any changes in your energy levels throughout the day?",
            QuestionType::Text,
        ),
        FollowUpQuestion::new(
            "fallback_2",
            "How would you rate your stress management techniques?",
            QuestionType::Scale,
        ),
        FollowUpQuestion::new(
            "fallback_3",
            "What specific health areas are you most concerned about?",
            QuestionType::Text,
        ),
    ]
}

const FALLBACK_ANALYSIS: &str = "\
Based on your comprehensive health assessment, our AI has identified several key patterns in your health profile:

**Energy & Metabolic Health**: Your reported afternoon energy crashes combined with stress levels suggest potential issues with blood sugar regulation and adrenal function. The combination of moderate stress levels and suboptimal sleep quality creates a cycle that impacts your energy production at the cellular level.

**Nutritional Gaps**: Your dietary patterns and lifestyle factors indicate likely deficiencies in key nutrients, particularly vitamin D, magnesium, and B-vitamins. These deficiencies commonly occur together and compound each other's effects on energy and mood.

**Sleep & Recovery**: Your sleep quality assessment reveals opportunities for improvement in recovery and restoration. Poor sleep quality directly impacts hormone production, immune function, and cognitive performance.

**Digestive Health**: The digestive symptoms you mentioned suggest gut microbiome imbalance, which affects nutrient absorption and can contribute to systemic inflammation and immune dysfunction.

**Stress Response**: Your stress levels, combined with the other factors, indicate your body may be in a chronic state of low-level stress, depleting key nutrients and affecting your body's ability to recover and maintain optimal function.";

/// Fallback health analysis covering energy, nutrition, sleep, digestion and
/// stress.
pub fn fallback_health_analysis() -> String {
    FALLBACK_ANALYSIS.to_string()
}

#[allow(clippy::too_many_arguments)]
fn recommendation(
    id: u32,
    name: &str,
    dosage: &str,
    priority: Priority,
    category: &str,
    reason: &str,
    benefits: [&str; 3],
    timing: &str,
) -> Recommendation {
    Recommendation {
        id,
        name: name.to_string(),
        dosage: dosage.to_string(),
        priority,
        category: category.to_string(),
        reason: reason.to_string(),
        benefits: benefits.iter().map(|b| b.to_string()).collect(),
        timing: timing.to_string(),
    }
}

/// Fallback recommendations: two high priority, three medium, in fixed order.
pub fn fallback_recommendations() -> Vec<Recommendation> {
    vec![
        recommendation(
            1,
            "Vitamin D3",
            "2000 IU daily",
            Priority::High,
            "Basic Essentials",
            "Based on your energy concerns and lifestyle, vitamin D deficiency is likely contributing to fatigue and mood issues.",
            ["Energy support", "Immune function", "Mood regulation"],
            "Take with breakfast for better absorption",
        ),
        recommendation(
            2,
            "Magnesium Glycinate",
            "400mg before bed",
            Priority::High,
            "Basic Essentials",
            "Your stress levels and sleep quality indicate magnesium deficiency, which affects both relaxation and energy production.",
            ["Better sleep", "Stress reduction", "Muscle relaxation"],
            "Take 30 minutes before bedtime",
        ),
        recommendation(
            3,
            "Omega-3 EPA/DHA",
            "1000mg daily",
            Priority::Medium,
            "Basic Essentials",
            "Essential for brain health, inflammation reduction, and cardiovascular support based on your health goals.",
            ["Brain function", "Heart health", "Anti-inflammatory"],
            "Take with meals to reduce fishy aftertaste",
        ),
        recommendation(
            4,
            "B-Complex",
            "1 capsule daily",
            Priority::Medium,
            "Advanced Support",
            "Your afternoon energy crashes suggest B-vitamin deficiencies, particularly B12 and folate.",
            ["Energy metabolism", "Nervous system support", "Mental clarity"],
            "Take with breakfast for sustained energy",
        ),
        recommendation(
            5,
            "Probiotic Complex",
            "10 billion CFU daily",
            Priority::Medium,
            "Advanced Support",
            "Your digestive symptoms indicate gut microbiome imbalance affecting nutrient absorption and immunity.",
            ["Digestive health", "Immune support", "Nutrient absorption"],
            "Take on empty stomach, 30 minutes before breakfast",
        ),
    ]
}
