//! Assessment Command
//!
//! Runs the wizard on the terminal and prints the results report.

use std::fmt::Write as _;
use std::io::Write as _;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::debug;

use supplement_advisor_core::{
    AnswerValue, FieldKind, FollowUpQuestion, QuestionType, RecommendationPlan, StepField,
};

use crate::services::advisor::{AdvisorIssue, AssessmentReport};
use crate::services::assessment::{Advance, AssessmentWizard};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

/// What the user typed at a prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Go back one step
    Back,
    /// Leave the question unanswered
    Skip,
    Answer(AnswerValue),
}

/// Line-oriented prompt over any async reader.
pub struct Prompter<R> {
    lines: Lines<R>,
}

impl Prompter<BufReader<tokio::io::Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> Prompter<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Print `prompt` and read one line. Errors on end of input.
    pub async fn ask(&mut self, prompt: &str) -> AppResult<String> {
        print!("{}", prompt);
        std::io::stdout().flush()?;
        match self.lines.next_line().await? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(AppError::invalid_state("input closed before the assessment finished")),
        }
    }
}

/// Resolve a picker entry: a 1-based number or the option text itself.
fn pick<'a>(options: &[&'a str], entry: &str) -> Result<&'a str, String> {
    if let Ok(n) = entry.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| options.get(i).copied())
            .ok_or_else(|| format!("choose a number from 1 to {}", options.len()));
    }
    options
        .iter()
        .copied()
        .find(|o| o.eq_ignore_ascii_case(entry))
        .ok_or_else(|| format!("'{}' is not one of the options", entry))
}

fn pick_many(options: &[&str], input: &str) -> Result<Vec<String>, String> {
    let mut chosen: Vec<String> = Vec::new();
    for entry in input.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let option = pick(options, entry)?.to_string();
        if !chosen.contains(&option) {
            chosen.push(option);
        }
    }
    Ok(chosen)
}

fn parse_common(input: &str) -> Option<Reply> {
    if input.eq_ignore_ascii_case("b") {
        Some(Reply::Back)
    } else if input.is_empty() {
        Some(Reply::Skip)
    } else {
        None
    }
}

/// Interpret a line typed for a static field.
pub fn parse_field_reply(field: &StepField, input: &str) -> Result<Reply, String> {
    if let Some(reply) = parse_common(input) {
        return Ok(reply);
    }
    let value = match field.kind {
        FieldKind::Select { options } => AnswerValue::text(pick(options, input)?),
        FieldKind::MultiSelect { options } => AnswerValue::selection(pick_many(options, input)?),
        FieldKind::Number { .. } | FieldKind::Scale | FieldKind::Text => AnswerValue::text(input),
    };
    Ok(Reply::Answer(value))
}

/// Interpret a line typed for a follow-up question.
pub fn parse_question_reply(question: &FollowUpQuestion, input: &str) -> Result<Reply, String> {
    if let Some(reply) = parse_common(input) {
        return Ok(reply);
    }
    let options: Vec<&str> = question.options().iter().map(String::as_str).collect();
    let value = match question.question_type {
        QuestionType::Select => AnswerValue::text(pick(&options, input)?),
        QuestionType::Checkbox => AnswerValue::selection(pick_many(&options, input)?),
        QuestionType::Scale | QuestionType::Text => AnswerValue::text(input),
    };
    Ok(Reply::Answer(value))
}

fn option_list(options: &[&str]) -> String {
    options
        .iter()
        .enumerate()
        .map(|(i, o)| format!("    {}. {}\n", i + 1, o))
        .collect()
}

fn field_prompt(field: &StepField) -> String {
    match field.kind {
        FieldKind::Number { unit, .. } => match unit {
            Some(unit) => format!("  {} ({}): ", field.label, unit),
            None => format!("  {}: ", field.label),
        },
        FieldKind::Select { options } => {
            format!("  {}\n{}  choice: ", field.label, option_list(options))
        }
        FieldKind::MultiSelect { options } => format!(
            "  {}\n{}  choices (comma separated): ",
            field.label,
            option_list(options)
        ),
        FieldKind::Scale => format!("  {} (1-10): ", field.label),
        FieldKind::Text => format!("  {}: ", field.label),
    }
}

fn question_prompt(question: &FollowUpQuestion) -> String {
    let options: Vec<&str> = question.options().iter().map(String::as_str).collect();
    match question.question_type {
        QuestionType::Select => format!("  {}\n{}  choice: ", question.question, option_list(&options)),
        QuestionType::Checkbox => format!(
            "  {}\n{}  choices (comma separated): ",
            question.question,
            option_list(&options)
        ),
        QuestionType::Scale => format!("  {} (1-10): ", question.question),
        QuestionType::Text => format!("  {}: ", question.question),
    }
}

fn print_issue(issue: &AdvisorIssue) {
    eprintln!("warning: {}", issue);
    if issue.needs_configuration() {
        eprintln!("hint: run `supplement-advisor config set-key <KEY>` or set GEMINI_API_KEY");
    }
}

/// Ask one question until the reply is accepted. Returns false on "back".
async fn ask_until_accepted<R, P>(
    prompter: &mut Prompter<R>,
    wizard: &mut AssessmentWizard,
    key: &str,
    prompt: &str,
    parse: P,
) -> AppResult<bool>
where
    R: AsyncBufRead + Unpin,
    P: Fn(&str) -> Result<Reply, String>,
{
    loop {
        let line = prompter.ask(prompt).await?;
        let value = match parse(&line) {
            Ok(Reply::Back) => return Ok(false),
            Ok(Reply::Skip) => return Ok(true),
            Ok(Reply::Answer(value)) => value,
            Err(message) => {
                eprintln!("  {}", message);
                continue;
            }
        };
        match wizard.set_answer(key, value) {
            Ok(()) => return Ok(true),
            Err(AppError::Validation(message)) => eprintln!("  {}", message),
            Err(e) => return Err(e),
        }
    }
}

/// Collect answers for the current step. Returns false when the user asked
/// to go back.
async fn collect_step<R: AsyncBufRead + Unpin>(
    prompter: &mut Prompter<R>,
    wizard: &mut AssessmentWizard,
) -> AppResult<bool> {
    let step = wizard.current_step();
    println!(
        "\nStep {} of {} ({:.0}%): {}\n{}",
        wizard.current_step_index() + 1,
        wizard.step_count(),
        wizard.progress_percent(),
        step.title,
        step.description
    );
    println!("(Enter skips a question, 'b' goes back)");

    if step.is_ai_step {
        if wizard.is_loading() {
            println!("Generating personalized questions...");
        }
        let follow_ups = wizard.wait_for_follow_ups().await;
        if let Some(issue) = &follow_ups.issue {
            print_issue(issue);
        }
        for question in &follow_ups.questions {
            let prompt = question_prompt(question);
            let accepted = ask_until_accepted(prompter, wizard, &question.id, &prompt, |line| {
                parse_question_reply(question, line)
            })
            .await?;
            if !accepted {
                return Ok(false);
            }
        }
        return Ok(true);
    }

    for field in step.fields {
        let prompt = field_prompt(field);
        let accepted =
            ask_until_accepted(prompter, wizard, field.key, &prompt, |line| {
                parse_field_reply(field, line)
            })
            .await?;
        if !accepted {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Run the interactive assessment and print the report.
pub async fn run_assessment(state: &AppState, json: bool) -> AppResult<()> {
    let advisor = state.build_advisor().await?;
    let mut wizard = AssessmentWizard::new(advisor.clone());
    let mut prompter = Prompter::stdin();

    let answers = loop {
        if !collect_step(&mut prompter, &mut wizard).await? {
            wizard.retreat();
            continue;
        }
        match wizard.advance()? {
            Advance::Moved(index) => debug!(step = index, "advanced"),
            Advance::Submitted(record) => break record,
        }
    };

    println!("\nAnalyzing your health profile...");
    let report = advisor.generate_report(answers).await?;
    for advisory in &report.advisories {
        print_issue(&advisory.issue);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

fn render_section(out: &mut String, heading: &str, plan: &RecommendationPlan, high: bool) {
    let items = if high {
        &plan.high_priority
    } else {
        &plan.medium_priority
    };
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}", heading);
    for item in items {
        let rec = &item.recommendation;
        let _ = writeln!(
            out,
            "  [{}] {} - {} ({})",
            item.tag.icon(),
            rec.name,
            rec.dosage,
            rec.priority.label()
        );
        let _ = writeln!(out, "      Category: {}", rec.category);
        let _ = writeln!(out, "      Why: {}", rec.reason);
        if !rec.benefits.is_empty() {
            let _ = writeln!(out, "      Benefits: {}", rec.benefits.join(", "));
        }
        let _ = writeln!(out, "      Timing: {}", rec.timing);
    }
}

/// Plain-text rendering of a report.
pub fn render_report(report: &AssessmentReport) -> String {
    let plan = &report.plan;
    let mut out = String::new();

    let _ = writeln!(out, "\n== Your Health Analysis ==\n{}", report.analysis.trim());
    let _ = writeln!(
        out,
        "\n== Recommended Supplements ==\n{} total, {} high priority, {} medium priority",
        plan.total(),
        plan.high_count(),
        plan.medium_count()
    );
    render_section(&mut out, "High Priority", plan, true);
    render_section(&mut out, "Medium Priority", plan, false);

    let _ = writeln!(out, "\n== Next Steps ==");
    for (i, step) in report.next_steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, step);
    }
    out
}
