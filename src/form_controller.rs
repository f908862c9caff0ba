use std::fmt;

use thiserror::Error;

use crate::conversation_state::{ConversationState, Field, Step};


/// Mifflin-St Jeor constant for the female body.
pub const FEMALE_OFFSET: f64 = 161.0;


pub fn greeting(start_command: &str) -> String {
    format!(
        "Hi! I'm a bot that will help you calculate your daily calorie requirement. \
        \nUse the {} command to start.",
        start_command
    )
}


#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutboundMessage {
    Greeting,
    AskAge,
    AskHeight,
    AskWeight,
    InvalidNumber,
    Calories(f64),
}


impl fmt::Display for OutboundMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutboundMessage::Greeting => f.write_str(&greeting("/calories")),
            OutboundMessage::AskAge => f.write_str("Enter your age:"),
            OutboundMessage::AskHeight => f.write_str("Enter your height:"),
            OutboundMessage::AskWeight => f.write_str("Enter your weight:"),
            OutboundMessage::InvalidNumber => f.write_str("Please enter a valid number."),
            OutboundMessage::Calories(calories) => {
                write!(f, "Your daily calorie requirement: {:.2} kcal per day.", calories)
            }
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid numeric input: {input:?}")]
pub struct InvalidNumericInput {
    pub input: String,
}


/// Parses a trimmed, optionally signed, base-10 integer. Anything else is rejected,
/// including decimals and values that overflow `i64`.
pub fn parse_numeric(text: &str) -> Result<i64, InvalidNumericInput> {
    text.trim().parse::<i64>().map_err(|_| InvalidNumericInput {
        input: text.to_string(),
    })
}


pub fn calculate_calories(age: i64, height: i64, weight: i64) -> f64 {
    10.0 * weight as f64 + 6.25 * height as f64 - 5.0 * age as f64 - FEMALE_OFFSET
}


/// Advances the form by one inbound message.
///
/// # Arguments
///
/// * `state` - The user's current snapshot.
/// * `text` - The raw message text.
/// * `is_start_command` - Whether the transport recognised the message as the form-start command.
///
/// # Returns
///
/// The next snapshot and the reply to send. A start command restarts the form from any step;
/// invalid numbers leave the snapshot untouched so the user can retry as often as they like.
pub fn handle(state: ConversationState, text: &str, is_start_command: bool) -> (ConversationState, OutboundMessage) {
    if is_start_command {
        return (state.reset().with_step(Step::Idle.next()), OutboundMessage::AskAge);
    }

    let Some(field) = state.step.expected_field() else {
        return (state, OutboundMessage::Greeting);
    };

    let value = match parse_numeric(text) {
        Ok(value) => value,
        Err(_) => return (state, OutboundMessage::InvalidNumber),
    };

    let state = state.with_field(field, value);
    match (state.step, state.collected.age, state.collected.height, state.collected.weight) {
        (Step::AwaitingAge, ..) => (state.with_step(state.step.next()), OutboundMessage::AskHeight),
        (Step::AwaitingHeight, ..) => (state.with_step(state.step.next()), OutboundMessage::AskWeight),
        (Step::AwaitingWeight, Some(age), Some(height), Some(weight)) => {
            let calories = calculate_calories(age, height, weight);
            (state.reset(), OutboundMessage::Calories(calories))
        }
        // A weight step without age and height can only come from a damaged snapshot.
        _ => (state.reset().with_step(Step::AwaitingAge), OutboundMessage::AskAge),
    }
}
