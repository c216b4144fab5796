//! Thread command handlers and the interview loop
//!
//! `thread new` creates a thread and drops straight into its interview;
//! `thread run` resumes an existing one. The loop drives the explicit
//! state machine from [`crate::interview`]: one step request per turn,
//! one validated answer per presented question, and a `stop` control that
//! ends the session after the server acknowledges.

use crate::api::types::{Answer, Question, QuestionType, ThreadCreate};
use crate::api::ApiClient;
use crate::commands::read_line;
use crate::config::Config;
use crate::error::Result;
use crate::interview::{validate_answer, AnswerDraft, InterviewState};
use crate::session::Session;

use colored::Colorize;
use rustyline::DefaultEditor;

/// Interactive command entered instead of an answer to end the session
const STOP_COMMAND: &str = "/stop";

/// List the user's interview threads
pub async fn run_list(config: &Config) -> Result<()> {
    let session = Session::load()?;
    let token = session.require_token()?;
    let api = ApiClient::new(&config.api)?.with_token(Some(token.to_string()));

    let threads = api.list_threads().await?;
    if threads.is_empty() {
        println!("No threads yet. Run `lifeharness thread new` to start one.");
    } else {
        super::dashboard::thread_table(&threads).printstd();
    }
    Ok(())
}

/// Create a thread and start its interview
pub async fn run_new(
    config: &Config,
    title: String,
    root_prompt: String,
    persona: Option<String>,
    time_focus: Vec<String>,
    topic_focus: Vec<String>,
) -> Result<()> {
    let session = Session::load()?;
    let token = session.require_token()?;
    let api = ApiClient::new(&config.api)?.with_token(Some(token.to_string()));

    let create = ThreadCreate {
        title,
        root_prompt,
        persona,
        time_focus: if time_focus.is_empty() {
            None
        } else {
            Some(time_focus)
        },
        topic_focus: if topic_focus.is_empty() {
            None
        } else {
            Some(topic_focus)
        },
    };

    let thread = api.create_thread(&create).await?;
    println!("Created thread {}", thread.id);

    run_interview(&api, &thread.id, &thread.title, &thread.root_prompt, thread.questions_asked)
        .await
}

/// Resume the interview for an existing thread
pub async fn run_resume(config: &Config, id: String) -> Result<()> {
    let session = Session::load()?;
    let token = session.require_token()?;
    let api = ApiClient::new(&config.api)?.with_token(Some(token.to_string()));

    let thread = api.get_thread(&id).await?;
    run_interview(&api, &thread.id, &thread.title, &thread.root_prompt, thread.questions_asked)
        .await
}

/// Drive one interview session to a stop or completion
///
/// Network failures end the loop in its last stable state after being
/// logged; there is no automatic retry.
async fn run_interview(
    api: &ApiClient,
    thread_id: &str,
    title: &str,
    root_prompt: &str,
    questions_asked: u32,
) -> Result<()> {
    println!("\n{}", title.bold());
    println!("{}", root_prompt.dimmed());
    println!("Questions answered: {}", questions_asked);
    println!("Type {} at any prompt to stop for today.\n", STOP_COMMAND.cyan());

    let mut rl = DefaultEditor::new()?;
    let mut pending: Option<Answer> = None;
    let mut state = InterviewState::AwaitingQuestion;

    loop {
        state = match state {
            InterviewState::AwaitingQuestion => {
                match api.continue_thread(thread_id, pending.take()).await {
                    Ok(response) => InterviewState::from_step(response)?,
                    Err(e) => {
                        tracing::error!("Failed to get next question: {}", e);
                        eprintln!("{}", format!("Failed to get next question: {}", e).red());
                        break;
                    }
                }
            }
            InterviewState::QuestionPresented(question) => {
                match prompt_answer(&mut rl, &question)? {
                    PromptOutcome::Answer(answer) => {
                        pending = Some(answer);
                        InterviewState::Submitting
                    }
                    PromptOutcome::Stop => {
                        if let Err(e) = api.stop_thread(thread_id).await {
                            tracing::warn!("Stop request failed: {}", e);
                        }
                        println!("\nStopped for today. You can continue this thread anytime!");
                        break;
                    }
                }
            }
            InterviewState::Submitting => {
                println!("{}", "Generating next question...".dimmed());
                InterviewState::AwaitingQuestion
            }
            InterviewState::Done => {
                println!("\n{}", "Session complete.".green());
                println!("You can continue this thread anytime!");
                break;
            }
        };
    }

    Ok(())
}

enum PromptOutcome {
    Answer(Answer),
    Stop,
}

/// Collect a validated answer for one question
///
/// Re-prompts until validation passes; nothing is sent over the network
/// while input is invalid. Ctrl-C and Ctrl-D map to a stop request, as
/// does typing `/stop`.
fn prompt_answer(rl: &mut DefaultEditor, question: &Question) -> Result<PromptOutcome> {
    println!("{}", question.text.bold());

    if question.question_type == QuestionType::MultipleChoice {
        if let Some(options) = &question.options {
            for (index, option) in options.iter().enumerate() {
                println!("  {}) {}", index + 1, option.text);
            }
        }
    }

    loop {
        let mut draft = AnswerDraft::for_question(question);

        match question.question_type {
            QuestionType::MultipleChoice => {
                let choice = match read_line(
                    rl,
                    "Choice (number, blank to answer in your own words): ",
                )? {
                    None => return Ok(PromptOutcome::Stop),
                    Some(line) if line == STOP_COMMAND => return Ok(PromptOutcome::Stop),
                    Some(line) => line,
                };

                if !choice.is_empty() {
                    match resolve_choice(question, &choice) {
                        Some(choice_id) => draft.select_choice(choice_id),
                        None => {
                            println!("{}", "Not one of the options, try again.".yellow());
                            continue;
                        }
                    }
                }

                let text_prompt = if draft.requires_explanation() {
                    "Please explain: "
                } else if draft.choice_id().is_some() {
                    "Want to elaborate? (optional): "
                } else {
                    "Your answer: "
                };

                match read_line(rl, text_prompt)? {
                    None => return Ok(PromptOutcome::Stop),
                    Some(line) if line == STOP_COMMAND => return Ok(PromptOutcome::Stop),
                    Some(line) => draft.set_free_text(&line),
                }
            }
            QuestionType::ShortAnswer => match read_line(rl, "Your answer: ")? {
                None => return Ok(PromptOutcome::Stop),
                Some(line) if line == STOP_COMMAND => return Ok(PromptOutcome::Stop),
                Some(line) => draft.set_free_text(&line),
            },
        }

        match validate_answer(question, &draft) {
            Ok(()) => return Ok(PromptOutcome::Answer(draft.into_answer())),
            Err(e) => println!("{}", e.to_string().yellow()),
        }
    }
}

/// Map user input to an option id: a 1-based index or a literal option id
fn resolve_choice(question: &Question, input: &str) -> Option<String> {
    let options = question.options.as_deref()?;

    if let Ok(index) = input.parse::<usize>() {
        if index >= 1 && index <= options.len() {
            return Some(options[index - 1].id.clone());
        }
        return None;
    }

    options
        .iter()
        .find(|option| option.id == input)
        .map(|option| option.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{ChoiceOption, OTHER_CHOICE_ID};

    fn question_with_options() -> Question {
        Question {
            id: "q1".to_string(),
            question_type: QuestionType::MultipleChoice,
            text: "Pick one".to_string(),
            options: Some(vec![
                ChoiceOption {
                    id: "a".to_string(),
                    text: "First".to_string(),
                },
                ChoiceOption {
                    id: OTHER_CHOICE_ID.to_string(),
                    text: "Something else".to_string(),
                },
            ]),
        }
    }

    #[test]
    fn test_resolve_choice_by_index() {
        let question = question_with_options();
        assert_eq!(resolve_choice(&question, "1").as_deref(), Some("a"));
        assert_eq!(
            resolve_choice(&question, "2").as_deref(),
            Some(OTHER_CHOICE_ID)
        );
    }

    #[test]
    fn test_resolve_choice_by_id() {
        let question = question_with_options();
        assert_eq!(resolve_choice(&question, "a").as_deref(), Some("a"));
        assert_eq!(
            resolve_choice(&question, OTHER_CHOICE_ID).as_deref(),
            Some(OTHER_CHOICE_ID)
        );
    }

    #[test]
    fn test_resolve_choice_out_of_range() {
        let question = question_with_options();
        assert!(resolve_choice(&question, "0").is_none());
        assert!(resolve_choice(&question, "3").is_none());
        assert!(resolve_choice(&question, "zebra").is_none());
    }

    #[test]
    fn test_resolve_choice_without_options() {
        let question = Question {
            id: "q2".to_string(),
            question_type: QuestionType::ShortAnswer,
            text: "Say more".to_string(),
            options: None,
        };
        assert!(resolve_choice(&question, "1").is_none());
    }
}
