// crates/formwright-core/src/core/widgets.rs
// ============================================================================
// Module: Field Widgets
// Description: Renderer widget selectors for form fields.
// Purpose: Give every field a stable widget tag the rendering clients map to
//          their own controls.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Widgets name *how* a field is rendered, not what it collects. Each field
//! variant accepts a subset of these (see `FieldKind::allowed_widgets`);
//! anything else is rejected at construction. The engine never renders, so a
//! widget is just a validated, stable tag on the wire.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Widget Selector
// ============================================================================

/// Renderer widget selectors with stable snake_case wire forms.
///
/// # Invariants
/// - Variants are stable for serialization and renderer dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
    /// Plain single-line text input.
    HtmlText,
    /// Plain email input.
    HtmlEmail,
    /// Plain password input.
    HtmlPassword,
    /// Plain multi-line text area.
    HtmlTextarea,
    /// Plain integer input.
    HtmlNumber,
    /// Plain decimal input.
    HtmlNumberDecimal,
    /// Plain date input.
    HtmlDate,
    /// Calendar date picker.
    DatepickerDate,
    /// Plain time input.
    HtmlTime,
    /// Clock time picker.
    DatepickerTime,
    /// Plain combined date-time input.
    HtmlDatetimeLocal,
    /// Combined date-time picker.
    DatepickerDatetime,
    /// Plain radio buttons.
    HtmlRadio,
    /// Horizontal radio button group.
    #[serde(rename = "radio_btngrp_horiz")]
    RadioButtonGroupHorizontal,
    /// Plain select dropdown.
    HtmlSelect,
    /// Autocomplete single select.
    Select2Single,
    /// Plain checkboxes.
    HtmlCheckbox,
    /// Autocomplete multi select.
    Select2Multi,
    /// Star rating control.
    RatingStars,
}

impl Widget {
    /// Returns the stable wire form of the widget.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HtmlText => "html_text",
            Self::HtmlEmail => "html_email",
            Self::HtmlPassword => "html_password",
            Self::HtmlTextarea => "html_textarea",
            Self::HtmlNumber => "html_number",
            Self::HtmlNumberDecimal => "html_number_decimal",
            Self::HtmlDate => "html_date",
            Self::DatepickerDate => "datepicker_date",
            Self::HtmlTime => "html_time",
            Self::DatepickerTime => "datepicker_time",
            Self::HtmlDatetimeLocal => "html_datetime_local",
            Self::DatepickerDatetime => "datepicker_datetime",
            Self::HtmlRadio => "html_radio",
            Self::RadioButtonGroupHorizontal => "radio_btngrp_horiz",
            Self::HtmlSelect => "html_select",
            Self::Select2Single => "select2_single",
            Self::HtmlCheckbox => "html_checkbox",
            Self::Select2Multi => "select2_multi",
            Self::RatingStars => "rating_stars",
        }
    }
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
