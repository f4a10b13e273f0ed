// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lead-form decisions.
//!
//! The page's form is outside the motion engine but is wired by the same
//! bootstrap. Everything here is the decision half; the DOM half lives in the
//! landing crate.
//!
//! The form posts into a hidden iframe. Its `load` event fires once on page
//! load and again after each submission, so the redirect is gated on a
//! [`SubmissionContext`] that the click handler sets immediately before
//! submitting. The context is cloned into the load handler at registration
//! instead of living in a global.

use alloc::rc::Rc;
use core::cell::Cell;

/// Element ids and the post-submit destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormConfig {
    /// The `<form>`.
    pub form_id: &'static str,
    /// Terms-of-service checkbox.
    pub terms_checkbox_id: &'static str,
    /// Inline error shown while the terms are not accepted.
    pub terms_error_id: &'static str,
    /// Desktop submit button.
    pub submit_id: &'static str,
    /// Mobile submit button.
    pub submit_mobile_id: &'static str,
    /// Hidden input carrying the request id.
    pub request_id_input_id: &'static str,
    /// Job `<select>`.
    pub job_select_id: &'static str,
    /// Wrapper of the free-text job field.
    pub other_job_container_id: &'static str,
    /// Free-text job field.
    pub other_job_input_id: &'static str,
    /// `name` of the iframe the form targets.
    pub result_frame_name: &'static str,
    /// Where to go once the submission has landed.
    pub redirect_url: &'static str,
}

impl FormConfig {
    /// The production form.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            form_id: "myForm",
            terms_checkbox_id: "termsCheckbox",
            terms_error_id: "termsError",
            submit_id: "submitBtn",
            submit_mobile_id: "submitBtnSp",
            request_id_input_id: "uuidInput",
            job_select_id: "job",
            other_job_container_id: "otherJobContainer",
            other_job_input_id: "otherJob",
            result_frame_name: "resultFrame",
            redirect_url: "https://monoriba.com/lp/lth1234/",
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// What a submit click does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubmitDecision {
    /// Cancel and show the terms error.
    RequireTerms,
    /// Cancel and let the browser report invalid fields.
    ReportInvalid,
    /// Hide the terms error, begin the submission and submit.
    Submit,
}

/// Decides a submit click.
#[must_use]
pub const fn decide_submit(terms_accepted: bool, form_valid: bool) -> SubmitDecision {
    if !terms_accepted {
        SubmitDecision::RequireTerms
    } else if form_valid {
        SubmitDecision::Submit
    } else {
        SubmitDecision::ReportInvalid
    }
}

/// Button and error state for a terms checkbox change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TermsGate {
    /// Both submit buttons are enabled.
    pub buttons_enabled: bool,
    /// The terms error is displayed.
    pub error_visible: bool,
}

impl TermsGate {
    /// State after the checkbox changes to `checked`.
    #[must_use]
    pub const fn on_change(checked: bool) -> Self {
        Self {
            buttons_enabled: checked,
            error_visible: !checked,
        }
    }

    /// State at page load: the error stays hidden until the user interacts.
    #[must_use]
    pub const fn initial(checked: bool) -> Self {
        Self {
            buttons_enabled: checked,
            error_visible: false,
        }
    }
}

/// `<option>` value that asks for a free-text job.
pub const OTHER_OPTION: &str = "__other_option__";

/// Whether the free-text job field is shown and required for `select_value`.
///
/// When this is `false` the field is also cleared.
#[must_use]
pub fn other_job_required(select_value: &str) -> bool {
    select_value == OTHER_OPTION
}

/// Shared "a submission was started" flag plus the redirect target.
///
/// Cloning shares the flag. Once [`begin`](Self::begin) is called it is
/// never reset.
#[derive(Clone, Debug)]
pub struct SubmissionContext {
    initiated: Rc<Cell<bool>>,
    redirect_url: &'static str,
}

impl SubmissionContext {
    /// Creates a context that has not submitted.
    #[must_use]
    pub fn new(redirect_url: &'static str) -> Self {
        Self {
            initiated: Rc::new(Cell::new(false)),
            redirect_url,
        }
    }

    /// Marks the submission as started.
    pub fn begin(&self) {
        self.initiated.set(true);
    }

    /// Whether a submission was started.
    #[must_use]
    pub fn is_initiated(&self) -> bool {
        self.initiated.get()
    }

    /// Handles the result iframe's `load` event; returns where to navigate.
    #[must_use]
    pub fn on_frame_loaded(&self) -> Option<&'static str> {
        self.is_initiated().then_some(self.redirect_url)
    }
}
