use serde::{Deserialize, Serialize};


/// Position of a user in the calorie form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Step {
    #[default]
    Idle,
    AwaitingAge,
    AwaitingHeight,
    AwaitingWeight,
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Age,
    Height,
    Weight,
}


impl Step {
    /// The field the user is being asked for, if any.
    pub fn expected_field(self) -> Option<Field> {
        match self {
            Step::Idle => None,
            Step::AwaitingAge => Some(Field::Age),
            Step::AwaitingHeight => Some(Field::Height),
            Step::AwaitingWeight => Some(Field::Weight),
        }
    }

    pub fn next(self) -> Step {
        match self {
            Step::Idle => Step::AwaitingAge,
            Step::AwaitingAge => Step::AwaitingHeight,
            Step::AwaitingHeight => Step::AwaitingWeight,
            Step::AwaitingWeight => Step::Idle,
        }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Collected {
    pub age: Option<i64>,
    pub height: Option<i64>,
    pub weight: Option<i64>,
}


/// Per-user snapshot of the form: where the user is and what they already answered.
///
/// Only the step transitions in `form_controller` mutate this; the keys present in
/// `collected` always match the steps already completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConversationState {
    pub step: Step,
    pub collected: Collected,
}


impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `field`. No validation; the caller picks the field from the step.
    pub fn with_field(mut self, field: Field, value: i64) -> Self {
        match field {
            Field::Age => self.collected.age = Some(value),
            Field::Height => self.collected.height = Some(value),
            Field::Weight => self.collected.weight = Some(value),
        }
        self
    }

    pub fn with_step(mut self, step: Step) -> Self {
        self.step = step;
        self
    }

    pub fn reset(self) -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.step == Step::Idle
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_idle_and_empty() {
        let state = ConversationState::new();
        assert!(state.is_idle());
        assert_eq!(state.collected, Collected::default());
    }

    #[test]
    fn with_field_sets_only_the_named_field() {
        let state = ConversationState::new()
            .with_step(Step::AwaitingHeight)
            .with_field(Field::Age, 30);

        assert_eq!(state.collected.age, Some(30));
        assert_eq!(state.collected.height, None);
        assert_eq!(state.collected.weight, None);
        assert_eq!(state.step, Step::AwaitingHeight);
    }

    #[test]
    fn reset_discards_partial_data() {
        let state = ConversationState::new()
            .with_step(Step::AwaitingWeight)
            .with_field(Field::Age, 30)
            .with_field(Field::Height, 170)
            .reset();

        assert_eq!(state, ConversationState::new());
    }

    #[test]
    fn steps_cycle_back_to_idle() {
        let mut step = Step::Idle;
        let mut fields = vec![];
        for _ in 0..4 {
            step = step.next();
            fields.extend(step.expected_field());
        }
        assert_eq!(step, Step::Idle);
        assert_eq!(fields, vec![Field::Age, Field::Height, Field::Weight]);
    }

    #[test]
    fn persisted_layout_has_two_fields() {
        let state = ConversationState::new()
            .with_step(Step::AwaitingHeight)
            .with_field(Field::Age, 41);

        let json = serde_json::to_value(state).unwrap();
        assert_eq!(json["step"], "AwaitingHeight");
        assert_eq!(json["collected"]["age"], 41);
        assert!(json["collected"]["height"].is_null());
        assert_eq!(json.as_object().unwrap().len(), 2);

        let restored: ConversationState = serde_json::from_value(json).unwrap();
        assert_eq!(restored, state);
    }
}
