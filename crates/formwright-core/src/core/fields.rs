// crates/formwright-core/src/core/fields.rs
// ============================================================================
// Module: Field Variants
// Description: Typed answer definitions for every question kind a form can
//              ask.
// Purpose: Validate field configurations at construction and answers at
//          answer time.
// Dependencies: bigdecimal, regex, serde, serde_json,
//               crate::core::{choices, errors, identifiers, widgets}
// ============================================================================

//! ## Overview
//! A [`FormField`] is the leaf of the schema tree: common metadata shared by
//! every question plus a [`FieldKind`] payload with the variant-specific
//! constraints. Construction validation rejects impossible configurations;
//! [`FormField::validate_value`] rejects bad answers at answer time. Both are
//! deterministic and never touch storage or rendering.

use std::sync::LazyLock;

use bigdecimal::BigDecimal;
use bigdecimal::Zero;
use regex::Regex;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::choices::Choice;
use crate::core::choices::ChoiceOrder;
use crate::core::choices::ChoiceType;
use crate::core::errors::FieldDefinitionError;
use crate::core::errors::FieldValueError;
use crate::core::identifiers::FieldLabel;
use crate::core::identifiers::TranslationId;
use crate::core::widgets::Widget;

// ============================================================================
// SECTION: Answer Patterns
// ============================================================================

/// Charset for answers that disallow special characters.
#[allow(clippy::expect_used, reason = "The pattern is a compile-time constant.")]
static NO_SPECIAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("charset pattern must compile"));

/// Email answer shape.
#[allow(clippy::expect_used, reason = "The pattern is a compile-time constant.")]
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[_a-z0-9-]+(\.[_a-z0-9-]+)*@[a-z0-9-]+(\.[a-z0-9-]+)*(\.[a-z]{2,4})$")
        .expect("email pattern must compile")
});

// ============================================================================
// SECTION: Serde Defaults
// ============================================================================

/// Default maximum length for single-line text.
const fn default_text_max_length() -> u32 {
    128
}

/// Default maximum length for email addresses.
const fn default_email_max_length() -> u32 {
    254
}

/// Default maximum length for multi-line text.
const fn default_textarea_max_length() -> u32 {
    1000
}

/// Default maximum input length for integer answers.
const fn default_number_max_length() -> u32 {
    5
}

/// Default integer-part length for decimal answers.
const fn default_integer_length() -> u32 {
    5
}

/// Default fraction-part length for decimal answers.
const fn default_decimal_length() -> u32 {
    2
}

/// Default maximum score for rating fields.
const fn default_max_score() -> u32 {
    5
}

/// Default `true` for boolean toggles that start enabled.
const fn default_true() -> bool {
    true
}

/// Default value/text for the affirmative binary option.
fn default_yes() -> String {
    String::from("Yes")
}

/// Default value/text for the negative binary option.
fn default_no() -> String {
    String::from("No")
}

/// Default value/text for the "other" option.
fn default_other() -> Option<String> {
    Some(String::from("Other"))
}

/// Default follow-up question when "other" is selected.
fn default_other_question() -> Option<String> {
    Some(String::from("Please enter your choice"))
}

// ============================================================================
// SECTION: Field Metadata
// ============================================================================

/// Metadata shared by every field variant.
///
/// # Invariants
/// - `label` is the field's identity; global uniqueness is enforced by the
///   form validator, the grammar by construction validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMeta {
    /// Unique label of the field within the form.
    pub label: FieldLabel,
    /// Translation reference for the question text.
    pub text_translation_id: TranslationId,
    /// Whether this field must be answered before submitting the form.
    #[serde(default)]
    pub required: bool,
    /// Whether the user is actively requested to answer this field.
    #[serde(default)]
    pub request_response: bool,
    /// Optional translation reference for the field description.
    #[serde(default)]
    pub description: Option<TranslationId>,
    /// Optional translation reference overriding the required-answer message.
    #[serde(default)]
    pub default_error_message: Option<TranslationId>,
    /// Author notes; never shown to respondents.
    #[serde(default)]
    pub user_notes: Option<String>,
    /// Widget selector; the variant default applies when absent.
    #[serde(default)]
    pub widget: Option<Widget>,
}

// ============================================================================
// SECTION: Variant Payloads
// ============================================================================

/// Single-line text constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextField {
    /// Minimum number of characters.
    #[serde(default)]
    pub min_length: u32,
    /// Maximum number of characters.
    #[serde(default = "default_text_max_length")]
    pub max_length: u32,
    /// Whether characters outside `a-zA-Z0-9` are accepted.
    #[serde(default = "default_true")]
    pub allow_special_chars: bool,
}

/// Email constraints. Shape validation happens at answer time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailField {
    /// Maximum number of characters.
    #[serde(default = "default_email_max_length")]
    pub max_length: u32,
}

/// Password charset configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordField {
    /// Whether alphabetic characters are accepted.
    #[serde(default = "default_true")]
    pub allow_alphabets: bool,
    /// Whether digits are accepted.
    #[serde(default = "default_true")]
    pub allow_numbers: bool,
    /// Whether special characters are accepted.
    #[serde(default = "default_true")]
    pub allow_special_chars: bool,
}

impl PasswordField {
    /// Builds the JS-style charset pattern renderers enforce while typing.
    #[must_use]
    pub fn pattern(&self) -> String {
        let mut charset = String::new();
        if self.allow_alphabets {
            charset.push_str("a-zA-Z");
        }
        if self.allow_numbers {
            charset.push_str("\\d");
        }
        if self.allow_special_chars {
            charset.push_str("\\W");
        }
        format!("/^[{charset}]+$/")
    }

    /// Builds the human-readable counterpart of [`PasswordField::pattern`].
    #[must_use]
    pub fn pattern_error(&self) -> String {
        let mut names = Vec::new();
        if self.allow_alphabets {
            names.push("alphabets");
        }
        if self.allow_numbers {
            names.push("numbers");
        }
        if self.allow_special_chars {
            names.push("special characters");
        }
        format!("Please use {} only.", names.join(", "))
    }
}

/// Multi-line text constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAreaField {
    /// Minimum number of characters.
    #[serde(default)]
    pub min_length: u32,
    /// Maximum number of characters.
    #[serde(default = "default_textarea_max_length")]
    pub max_length: u32,
}

/// Integer answer constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberField {
    /// Minimum number of digits typed.
    #[serde(default)]
    pub min_length: u32,
    /// Maximum number of digits typed.
    #[serde(default = "default_number_max_length")]
    pub max_length: u32,
    /// Whether negative values are accepted.
    #[serde(default = "default_true")]
    pub allow_negative: bool,
    /// Smallest accepted value.
    #[serde(default)]
    pub min_value: Option<i64>,
    /// Largest accepted value.
    #[serde(default)]
    pub max_value: Option<i64>,
}

impl NumberField {
    /// Resolves the effective minimum from `min_value` and `allow_negative`.
    #[must_use]
    pub fn effective_min_value(&self) -> Option<i64> {
        match (self.min_value, self.allow_negative) {
            (None, true) => None,
            (None, false) => Some(0),
            (Some(min), true) => Some(min),
            (Some(min), false) => Some(min.max(0)),
        }
    }
}

/// Decimal answer constraints. Integer answers are widened to decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecimalField {
    /// Maximum length of the integer part.
    #[serde(default = "default_integer_length")]
    pub max_integer_length: u32,
    /// Maximum precision of the fraction part.
    #[serde(default = "default_decimal_length")]
    pub max_decimal_length: u32,
    /// Whether negative values are accepted.
    #[serde(default = "default_true")]
    pub allow_negative: bool,
    /// Smallest accepted value.
    #[serde(default)]
    pub min_value: Option<BigDecimal>,
    /// Largest accepted value.
    #[serde(default)]
    pub max_value: Option<BigDecimal>,
}

impl DecimalField {
    /// Returns the renderer input step for the configured precision.
    #[must_use]
    pub fn step(&self) -> f64 {
        let exponent = i32::try_from(self.max_decimal_length).unwrap_or(i32::MAX);
        10f64.powi(-exponent)
    }

    /// Returns the maximum typed length: integer part, separator, fraction
    /// part.
    #[must_use]
    pub const fn max_input_length(&self) -> u32 {
        self.max_integer_length + 1 + self.max_decimal_length
    }

    /// Resolves the effective minimum from `min_value` and `allow_negative`.
    #[must_use]
    pub fn effective_min_value(&self) -> Option<BigDecimal> {
        match (&self.min_value, self.allow_negative) {
            (None, true) => None,
            (None, false) => Some(BigDecimal::zero()),
            (Some(min), true) => Some(min.clone()),
            (Some(min), false) => Some(min.clone().max(BigDecimal::zero())),
        }
    }
}

/// Calendar date answer (stored as `YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateField {}

/// Clock time answer (stored as `HH:MM:SS`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeField {}

/// Combined date-time answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateTimeField {}

/// Two-option choice: one value for true, one for false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryField {
    /// Value recorded for the affirmative option.
    #[serde(default = "default_yes")]
    pub true_value: String,
    /// Text displayed for the affirmative option.
    #[serde(default = "default_yes")]
    pub true_text: String,
    /// Value recorded for the negative option.
    #[serde(default = "default_no")]
    pub false_value: String,
    /// Text displayed for the negative option.
    #[serde(default = "default_no")]
    pub false_text: String,
}

impl BinaryField {
    /// Returns both options in display order.
    #[must_use]
    pub fn choices(&self) -> Vec<Choice> {
        vec![
            Choice {
                value: Value::String(self.true_value.clone()),
                text: self.true_text.clone(),
            },
            Choice {
                value: Value::String(self.false_value.clone()),
                text: self.false_text.clone(),
            },
        ]
    }
}

/// Multiple choice, single select.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleSelectField {
    /// Declared value type of the choice list.
    #[serde(default)]
    pub choice_type: ChoiceType,
    /// Declared choices.
    pub list_choices: Vec<Choice>,
    /// Presentation order of the choices.
    #[serde(default)]
    pub choice_ordering: ChoiceOrder,
    /// Whether an "other" free-text option is offered.
    #[serde(default)]
    pub allow_other: bool,
    /// Value recorded when "other" is selected.
    #[serde(default = "default_other")]
    pub other_value: Option<String>,
    /// Text displayed for the "other" option.
    #[serde(default = "default_other")]
    pub other_text: Option<String>,
    /// Follow-up question asked when "other" is selected.
    #[serde(default = "default_other_question")]
    pub other_question: Option<String>,
}

/// Multiple choice, multiple select.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiSelectField {
    /// Declared value type of the choice list.
    #[serde(default)]
    pub choice_type: ChoiceType,
    /// Declared choices.
    pub list_choices: Vec<Choice>,
    /// Presentation order of the choices.
    #[serde(default)]
    pub choice_ordering: ChoiceOrder,
    /// Minimum number of choices that must be selected.
    #[serde(default)]
    pub min_selection: Option<u32>,
    /// Maximum number of choices that can be selected.
    #[serde(default)]
    pub max_selection: Option<u32>,
    /// Whether an "other" free-text option is offered.
    #[serde(default)]
    pub allow_other: bool,
    /// Value recorded when "other" is selected.
    #[serde(default = "default_other")]
    pub other_value: Option<String>,
    /// Text displayed for the "other" option.
    #[serde(default = "default_other")]
    pub other_text: Option<String>,
    /// Follow-up question asked when "other" is selected.
    #[serde(default = "default_other_question")]
    pub other_question: Option<String>,
}

/// Integer rating on a 1-to-`max_score` scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingField {
    /// Maximum score; must lie in `3..=12`.
    #[serde(default = "default_max_score")]
    pub max_score: u32,
}

impl RatingField {
    /// Returns the rating scale as a choice list.
    #[must_use]
    pub fn choices(&self) -> Vec<Choice> {
        (1..=self.max_score)
            .map(|score| Choice {
                value: Value::from(score),
                text: score.to_string(),
            })
            .collect()
    }
}

// ============================================================================
// SECTION: Field Kind
// ============================================================================

/// Variant payload of a field, discriminated by the `_cls` wire tag.
///
/// # Invariants
/// - Wire tags are stable; renaming one invalidates every stored schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_cls")]
pub enum FieldKind {
    /// Single-line text.
    #[serde(rename = "TextFormField")]
    Text(TextField),
    /// Email address.
    #[serde(rename = "EmailFormField")]
    Email(EmailField),
    /// Password entry.
    #[serde(rename = "PasswordFormField")]
    Password(PasswordField),
    /// Multi-line text.
    #[serde(rename = "TextAreaFormField")]
    TextArea(TextAreaField),
    /// Integer answer.
    #[serde(rename = "NumberFormField")]
    Number(NumberField),
    /// Decimal answer.
    #[serde(rename = "DecimalFormField")]
    Decimal(DecimalField),
    /// Calendar date.
    #[serde(rename = "DateFormField")]
    Date(DateField),
    /// Clock time.
    #[serde(rename = "TimeFormField")]
    Time(TimeField),
    /// Combined date-time.
    #[serde(rename = "DateTimeFormField")]
    DateTime(DateTimeField),
    /// Two-option choice.
    #[serde(rename = "BinaryFormField")]
    Binary(BinaryField),
    /// Multiple choice, single select.
    #[serde(rename = "MCSSFormField")]
    SingleSelect(SingleSelectField),
    /// Multiple choice, multiple select.
    #[serde(rename = "MCMSFormField")]
    MultiSelect(MultiSelectField),
    /// Integer rating scale.
    #[serde(rename = "RatingFormField")]
    Rating(RatingField),
}

impl FieldKind {
    /// Returns the stable `_cls` wire tag of this variant.
    #[must_use]
    pub const fn wire_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "TextFormField",
            Self::Email(_) => "EmailFormField",
            Self::Password(_) => "PasswordFormField",
            Self::TextArea(_) => "TextAreaFormField",
            Self::Number(_) => "NumberFormField",
            Self::Decimal(_) => "DecimalFormField",
            Self::Date(_) => "DateFormField",
            Self::Time(_) => "TimeFormField",
            Self::DateTime(_) => "DateTimeFormField",
            Self::Binary(_) => "BinaryFormField",
            Self::SingleSelect(_) => "MCSSFormField",
            Self::MultiSelect(_) => "MCMSFormField",
            Self::Rating(_) => "RatingFormField",
        }
    }

    /// Returns the widgets this variant can be rendered with.
    #[must_use]
    pub const fn allowed_widgets(&self) -> &'static [Widget] {
        match self {
            Self::Text(_) => &[Widget::HtmlText],
            Self::Email(_) => &[Widget::HtmlEmail],
            Self::Password(_) => &[Widget::HtmlPassword],
            Self::TextArea(_) => &[Widget::HtmlTextarea],
            Self::Number(_) => &[Widget::HtmlNumber],
            Self::Decimal(_) => &[Widget::HtmlNumberDecimal],
            Self::Date(_) => &[Widget::HtmlDate, Widget::DatepickerDate],
            Self::Time(_) => &[Widget::HtmlTime, Widget::DatepickerTime],
            Self::DateTime(_) => &[Widget::HtmlDatetimeLocal, Widget::DatepickerDatetime],
            Self::Binary(_) => &[Widget::RadioButtonGroupHorizontal, Widget::HtmlRadio],
            Self::SingleSelect(_) => &[
                Widget::HtmlRadio,
                Widget::HtmlSelect,
                Widget::Select2Single,
                Widget::RadioButtonGroupHorizontal,
            ],
            Self::MultiSelect(_) => &[Widget::HtmlCheckbox, Widget::Select2Multi],
            Self::Rating(_) => &[
                Widget::RatingStars,
                Widget::RadioButtonGroupHorizontal,
                Widget::HtmlSelect,
            ],
        }
    }

    /// Returns the widget used when a stored field does not name one.
    #[must_use]
    pub const fn default_widget(&self) -> Widget {
        match self {
            Self::Text(_) => Widget::HtmlText,
            Self::Email(_) => Widget::HtmlEmail,
            Self::Password(_) => Widget::HtmlPassword,
            Self::TextArea(_) => Widget::HtmlTextarea,
            Self::Number(_) => Widget::HtmlNumber,
            Self::Decimal(_) => Widget::HtmlNumberDecimal,
            Self::Date(_) => Widget::HtmlDate,
            Self::Time(_) => Widget::HtmlTime,
            Self::DateTime(_) => Widget::HtmlDatetimeLocal,
            Self::Binary(_) => Widget::RadioButtonGroupHorizontal,
            Self::SingleSelect(_) => Widget::HtmlRadio,
            Self::MultiSelect(_) => Widget::HtmlCheckbox,
            Self::Rating(_) => Widget::RatingStars,
        }
    }
}

// ============================================================================
// SECTION: Form Field
// ============================================================================

/// A single typed question/answer slot in a form.
///
/// # Invariants
/// - `meta` and `kind` flatten into one wire object; `_cls` comes from the
///   kind, `_cls_base` from the node envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    /// Metadata shared by every variant.
    #[serde(flatten)]
    pub meta: FieldMeta,
    /// Variant payload.
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FormField {
    /// Returns the stable `_cls` wire tag of this field.
    #[must_use]
    pub const fn class_name(&self) -> &'static str {
        self.kind.wire_name()
    }

    /// Returns the configured widget, falling back to the variant default.
    #[must_use]
    pub fn widget(&self) -> Widget {
        self.meta.widget.unwrap_or_else(|| self.kind.default_widget())
    }

    /// Returns every translation reference carried by this field.
    #[must_use]
    pub fn translation_ids(&self) -> Vec<TranslationId> {
        let mut ids = vec![self.meta.text_translation_id.clone()];
        if let Some(description) = &self.meta.description {
            ids.push(description.clone());
        }
        if let Some(message) = &self.meta.default_error_message {
            ids.push(message.clone());
        }
        ids
    }

    /// Returns every value an answer may legally take, including the "other"
    /// value, for choice-backed variants. Non-choice variants return `None`.
    #[must_use]
    pub fn all_choice_values(&self) -> Option<Vec<Value>> {
        match &self.kind {
            FieldKind::Binary(binary) => {
                Some(binary.choices().into_iter().map(|choice| choice.value).collect())
            }
            FieldKind::Rating(rating) => {
                Some(rating.choices().into_iter().map(|choice| choice.value).collect())
            }
            FieldKind::SingleSelect(select) => Some(select_values(
                &select.list_choices,
                select.allow_other,
                select.other_value.as_deref(),
            )),
            FieldKind::MultiSelect(select) => Some(select_values(
                &select.list_choices,
                select.allow_other,
                select.other_value.as_deref(),
            )),
            _ => None,
        }
    }

    /// Returns the declared choices in presentation order for select-backed
    /// variants.
    #[must_use]
    pub fn ordered_choices(&self) -> Option<Vec<&Choice>> {
        match &self.kind {
            FieldKind::SingleSelect(select) => {
                Some(select.choice_ordering.apply(&select.list_choices))
            }
            FieldKind::MultiSelect(select) => {
                Some(select.choice_ordering.apply(&select.list_choices))
            }
            _ => None,
        }
    }

    /// Checks this field's configuration for impossible combinations.
    ///
    /// # Errors
    ///
    /// Returns [`FieldDefinitionError`] on the first violated constraint.
    pub fn validate_definition(&self) -> Result<(), FieldDefinitionError> {
        self.meta.label.validate()?;

        if let Some(widget) = self.meta.widget
            && !self.kind.allowed_widgets().contains(&widget)
        {
            return Err(FieldDefinitionError::WidgetNotAllowed {
                widget,
                class: self.kind.wire_name(),
            });
        }

        match &self.kind {
            FieldKind::Text(text) => check_length_bounds(text.min_length, text.max_length),
            FieldKind::TextArea(area) => check_length_bounds(area.min_length, area.max_length),
            FieldKind::Email(_)
            | FieldKind::Password(_)
            | FieldKind::Date(_)
            | FieldKind::Time(_)
            | FieldKind::DateTime(_)
            | FieldKind::Binary(_) => Ok(()),
            FieldKind::Number(number) => {
                check_length_bounds(number.min_length, number.max_length)?;
                if let (Some(min), Some(max)) = (number.min_value, number.max_value)
                    && min > max
                {
                    return Err(FieldDefinitionError::ValueBounds {
                        min_value: min.to_string(),
                        max_value: max.to_string(),
                    });
                }
                if let Some(min) = number.min_value
                    && !number.allow_negative
                    && min < 0
                {
                    return Err(FieldDefinitionError::NegativeMinimum {
                        min_value: min.to_string(),
                    });
                }
                Ok(())
            }
            FieldKind::Decimal(decimal) => {
                if let (Some(min), Some(max)) = (&decimal.min_value, &decimal.max_value)
                    && min > max
                {
                    return Err(FieldDefinitionError::ValueBounds {
                        min_value: min.to_string(),
                        max_value: max.to_string(),
                    });
                }
                if let Some(min) = &decimal.min_value
                    && !decimal.allow_negative
                    && min < &BigDecimal::zero()
                {
                    return Err(FieldDefinitionError::NegativeMinimum {
                        min_value: min.to_string(),
                    });
                }
                Ok(())
            }
            FieldKind::SingleSelect(select) => {
                select.choice_type.check_choices(&select.list_choices)?;
                check_other_option(
                    &select.list_choices,
                    select.allow_other,
                    select.other_value.as_deref(),
                    select.other_text.as_deref(),
                    select.other_question.as_deref(),
                )
            }
            FieldKind::MultiSelect(select) => {
                select.choice_type.check_choices(&select.list_choices)?;
                if let Some(min) = select.min_selection {
                    if min as usize > select.list_choices.len() {
                        return Err(FieldDefinitionError::SelectionExceedsChoices {
                            min_selection: min,
                            choices: select.list_choices.len(),
                        });
                    }
                    if let Some(max) = select.max_selection
                        && min > max
                    {
                        return Err(FieldDefinitionError::SelectionBounds {
                            min_selection: min,
                            max_selection: max,
                        });
                    }
                }
                check_other_option(
                    &select.list_choices,
                    select.allow_other,
                    select.other_value.as_deref(),
                    select.other_text.as_deref(),
                    select.other_question.as_deref(),
                )
            }
            FieldKind::Rating(rating) => {
                if (3..=12).contains(&rating.max_score) {
                    Ok(())
                } else {
                    Err(FieldDefinitionError::RatingScoreRange {
                        max_score: rating.max_score,
                    })
                }
            }
        }
    }

    /// Checks an answer against this field's constraints.
    ///
    /// This stays intentionally shallow: required-empty, charset, email
    /// shape, and numeric/length bounds. Choice membership and richer checks
    /// live in the rendering clients.
    ///
    /// # Errors
    ///
    /// Returns [`FieldValueError`] on the first violated constraint.
    pub fn validate_value(&self, value: &Value) -> Result<(), FieldValueError> {
        if is_empty_answer(value) {
            if self.meta.required {
                return Err(FieldValueError::Empty);
            }
            return Ok(());
        }

        match &self.kind {
            FieldKind::Text(text) => {
                let answer = value.as_str().ok_or(FieldValueError::WrongType)?;
                check_answer_length(answer, text.min_length, text.max_length)?;
                if !text.allow_special_chars && !NO_SPECIAL_CHARS.is_match(answer) {
                    return Err(FieldValueError::SpecialCharacters);
                }
                Ok(())
            }
            FieldKind::Email(email) => {
                let answer = value.as_str().ok_or(FieldValueError::WrongType)?;
                check_answer_length(answer, 0, email.max_length)?;
                if EMAIL_PATTERN.is_match(answer) {
                    Ok(())
                } else {
                    Err(FieldValueError::InvalidEmail {
                        value: answer.to_string(),
                    })
                }
            }
            FieldKind::TextArea(area) => {
                let answer = value.as_str().ok_or(FieldValueError::WrongType)?;
                check_answer_length(answer, area.min_length, area.max_length)
            }
            FieldKind::Number(number) => {
                let answer = value.as_i64().ok_or(FieldValueError::WrongType)?;
                if let Some(min) = number.effective_min_value()
                    && answer < min
                {
                    return Err(FieldValueError::BelowMinimum {
                        value: answer.to_string(),
                        minimum: min.to_string(),
                    });
                }
                if let Some(max) = number.max_value
                    && answer > max
                {
                    return Err(FieldValueError::AboveMaximum {
                        value: answer.to_string(),
                        maximum: max.to_string(),
                    });
                }
                Ok(())
            }
            FieldKind::Decimal(decimal) => {
                let answer = decimal_answer(value)?;
                if let Some(min) = decimal.effective_min_value()
                    && answer < min
                {
                    return Err(FieldValueError::BelowMinimum {
                        value: answer.to_string(),
                        minimum: min.to_string(),
                    });
                }
                if let Some(max) = &decimal.max_value
                    && &answer > max
                {
                    return Err(FieldValueError::AboveMaximum {
                        value: answer.to_string(),
                        maximum: max.to_string(),
                    });
                }
                Ok(())
            }
            FieldKind::Rating(rating) => {
                let answer = value.as_u64().ok_or(FieldValueError::WrongType)?;
                if answer < 1 {
                    return Err(FieldValueError::BelowMinimum {
                        value: answer.to_string(),
                        minimum: String::from("1"),
                    });
                }
                if answer > u64::from(rating.max_score) {
                    return Err(FieldValueError::AboveMaximum {
                        value: answer.to_string(),
                        maximum: rating.max_score.to_string(),
                    });
                }
                Ok(())
            }
            FieldKind::Password(_)
            | FieldKind::Date(_)
            | FieldKind::Time(_)
            | FieldKind::DateTime(_)
            | FieldKind::Binary(_)
            | FieldKind::SingleSelect(_)
            | FieldKind::MultiSelect(_) => Ok(()),
        }
    }
}

// ============================================================================
// SECTION: Validation Helpers
// ============================================================================

/// Reports whether an answer counts as unanswered.
fn is_empty_answer(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}

/// Checks a configured `min <= max` length pair.
fn check_length_bounds(min_length: u32, max_length: u32) -> Result<(), FieldDefinitionError> {
    if min_length > max_length {
        Err(FieldDefinitionError::LengthBounds {
            min_length,
            max_length,
        })
    } else {
        Ok(())
    }
}

/// Checks an answer's character count against configured bounds.
fn check_answer_length(
    answer: &str,
    min_length: u32,
    max_length: u32,
) -> Result<(), FieldValueError> {
    let length = answer.chars().count();
    if length < min_length as usize || length > max_length as usize {
        return Err(FieldValueError::LengthOutOfBounds {
            length,
            min_length,
            max_length,
        });
    }
    Ok(())
}

/// Checks the "other" option configuration against the declared choices.
fn check_other_option(
    choices: &[Choice],
    allow_other: bool,
    other_value: Option<&str>,
    other_text: Option<&str>,
    other_question: Option<&str>,
) -> Result<(), FieldDefinitionError> {
    if !allow_other {
        return Ok(());
    }
    let (Some(value), Some(_), Some(_)) = (other_value, other_text, other_question) else {
        return Err(FieldDefinitionError::MissingOtherTexts);
    };
    if choices.iter().any(|choice| choice.value.as_str() == Some(value)) {
        return Err(FieldDefinitionError::OtherValueCollision {
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Collects declared select values plus the "other" value when enabled.
fn select_values(choices: &[Choice], allow_other: bool, other_value: Option<&str>) -> Vec<Value> {
    let mut values: Vec<Value> = choices.iter().map(|choice| choice.value.clone()).collect();
    if allow_other && let Some(other) = other_value {
        values.push(Value::String(other.to_string()));
    }
    values
}

/// Widens a JSON number or numeric string into a decimal answer.
fn decimal_answer(value: &Value) -> Result<BigDecimal, FieldValueError> {
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        _ => return Err(FieldValueError::WrongType),
    };
    text.parse::<BigDecimal>().map_err(|_| FieldValueError::WrongType)
}
