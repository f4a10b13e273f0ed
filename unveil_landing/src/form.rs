// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lead form: request id, terms gate, validation, and the redirect after the
//! result iframe has loaded.
//!
//! Each part is wired only when its elements exist.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::ToString as _;

use web_sys::{Document, Event, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement};

use unveil_backend_web::dom;
use unveil_core::form::{
    self, FormConfig, SubmissionContext, SubmitDecision, TermsGate, decide_submit,
};

use crate::page::{self, Page};

/// Submit buttons and the terms checkbox.
struct Controls {
    form: HtmlFormElement,
    checkbox: HtmlInputElement,
    error: Option<HtmlElement>,
    buttons: [Option<HtmlElement>; 2],
}

impl Controls {
    fn show(&self, gate: TermsGate) {
        for button in self.buttons.iter().flatten() {
            let _ = button.toggle_attribute_with_force("disabled", !gate.buttons_enabled);
        }
        self.show_error(gate.error_visible);
    }

    fn show_error(&self, visible: bool) {
        if let Some(error) = &self.error {
            dom::set_style(error, "display", if visible { "block" } else { "none" });
        }
    }
}

pub(crate) fn install(page: &Rc<Page>) {
    let config = FormConfig::standard();
    let doc = &page.document;

    if let Some(input) = dom::by_id::<HtmlInputElement>(doc, config.request_id_input_id) {
        input.set_value(&uuid::Uuid::new_v4().to_string());
    }
    install_job_toggle(doc, &config);

    let context = SubmissionContext::new(config.redirect_url);
    install_controls(doc, &config, &context);
    install_result_frame(page, &config, context);
}

fn install_controls(doc: &Document, config: &FormConfig, context: &SubmissionContext) {
    let (Some(form), Some(checkbox)) = (
        dom::by_id::<HtmlFormElement>(doc, config.form_id),
        dom::by_id::<HtmlInputElement>(doc, config.terms_checkbox_id),
    ) else {
        return;
    };
    let controls = Rc::new(Controls {
        form,
        checkbox,
        error: dom::by_id(doc, config.terms_error_id),
        buttons: [
            dom::by_id(doc, config.submit_id),
            dom::by_id(doc, config.submit_mobile_id),
        ],
    });
    controls.show(TermsGate::initial(controls.checkbox.checked()));

    let on_change = Rc::clone(&controls);
    page::listen(&controls.checkbox, "change", move |_event: Event| {
        on_change.show(TermsGate::on_change(on_change.checkbox.checked()));
    });

    for button in controls.buttons.iter().flatten() {
        let controls = Rc::clone(&controls);
        let context = context.clone();
        page::listen(button, "click", move |event: Event| {
            // The form is submitted explicitly below, never by the button.
            event.prevent_default();
            match decide_submit(controls.checkbox.checked(), controls.form.check_validity()) {
                SubmitDecision::RequireTerms => controls.show_error(true),
                SubmitDecision::ReportInvalid => {
                    let _ = controls.form.report_validity();
                }
                SubmitDecision::Submit => {
                    controls.show_error(false);
                    context.begin();
                    let _ = controls.form.submit();
                }
            }
        });
    }
}

fn install_job_toggle(doc: &Document, config: &FormConfig) {
    let (Some(select), Some(container), Some(input)) = (
        dom::by_id::<HtmlSelectElement>(doc, config.job_select_id),
        dom::by_id::<HtmlElement>(doc, config.other_job_container_id),
        dom::by_id::<HtmlInputElement>(doc, config.other_job_input_id),
    ) else {
        return;
    };
    let sync = move |value: &str| {
        let required = form::other_job_required(value);
        dom::set_style(&container, "display", if required { "block" } else { "none" });
        input.set_required(required);
        if !required {
            input.set_value("");
        }
    };
    sync(&select.value());

    let target = select.clone();
    page::listen(&target, "change", move |_event: Event| sync(&select.value()));
}

fn install_result_frame(page: &Page, config: &FormConfig, context: SubmissionContext) {
    let selector = format!("iframe[name=\"{}\"]", config.result_frame_name);
    let Some(frame) = dom::query(&page.document, &selector) else {
        return;
    };
    let location = page.window.location();
    page::listen(&frame, "load", move |_event: Event| {
        if let Some(url) = context.on_frame_loaded() {
            let _ = location.set_href(url);
        }
    });
}
