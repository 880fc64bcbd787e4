// ============================================================================
// FORM VIEWMODEL - Validación accesible y envío del formulario de cadastro
// ============================================================================
// `submit` es la lógica pura (validar → construir registro → guardar).
// `FormController` la conecta al DOM: errores por campo enlazados con
// aria-describedby, resumen, anuncios, confeti y reinicio diferido.
// ============================================================================

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlFormElement, KeyboardEvent};

use crate::config::CONFIG;
use crate::dom::{
    add_class, body, control_value, focus_element, get_element_by_id,
    query_selector_all_in, remove_attribute, remove_class, set_attribute, ElementBuilder,
};
use crate::models::RegistrationRecord;
use crate::services::RegistrationService;
use crate::state::AppState;
use crate::utils::constants::{FORM_FIELD_SELECTOR, FORM_ID, FORM_MESSAGE_ID};
use crate::utils::i18n::t;
use crate::utils::sanitize::escape_html;
use crate::utils::storage::StorageError;
use crate::utils::validator::{FieldInput, FormValues, ValidationReport, Validator};

const CONFETTI_COLORS: [&str; 6] = ["#FF77A9", "#FFC1E3", "#FFD1F0", "#FFA3DD", "#FFB7D9", "#FFD8E9"];
const CONFETTI_PIECES: usize = 18;
const CONFETTI_LIFETIME_MS: u32 = 1200;

#[derive(Debug)]
pub enum SubmitOutcome {
    Saved { record: RegistrationRecord, total: usize },
    Invalid(ValidationReport),
    Failed(StorageError),
}

/// Validar y, si todo es correcto, añadir el registro a la lista persistida
pub fn submit(values: &FormValues, validator: &Validator, registrations: &RegistrationService) -> SubmitOutcome {
    let report = validator.validate_form(values);
    if !report.is_valid() {
        return SubmitOutcome::Invalid(report);
    }
    let record = RegistrationRecord::from_form(values);
    match registrations.append(record.clone()) {
        Ok(total) => SubmitOutcome::Saved { record, total },
        Err(e) => SubmitOutcome::Failed(e),
    }
}

/// Primer error de un campo al perder el foco (None = campo correcto)
pub fn blur_error(validator: &Validator, name: &str, values: &FormValues) -> Option<String> {
    validator
        .validate_field(name, values)
        .first()
        .map(|error| error.message())
}

/// Dónde queda el foco tras un envío
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitFocus {
    /// Primer campo inválido
    Field(String),
    /// Mensaje de resultado (tras el retardo de foco)
    Message,
}

/// Todo lo que el formulario muestra tras un envío
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitFeedback {
    pub message_class: &'static str,
    pub role: &'static str,
    pub live: &'static str,
    pub icon: &'static str,
    pub message: String,
    pub announcement: String,
    pub assertive: bool,
    /// (campo, mensaje) con el primer error de cada campo, en orden del formulario
    pub field_errors: Vec<(String, String)>,
    pub focus: Option<SubmitFocus>,
    pub saved: bool,
    /// Reiniciar y enfocar el primer campo tras estos ms
    pub reset_after_ms: Option<u32>,
}

impl SubmitFeedback {
    pub fn for_outcome(outcome: &SubmitOutcome, reset_delay_ms: u32) -> Self {
        match outcome {
            SubmitOutcome::Saved { .. } => Self {
                message_class: "success",
                role: "status",
                live: "polite",
                icon: "✅",
                message: t("form_sucesso"),
                announcement: t("form_sucesso_anuncio"),
                assertive: false,
                field_errors: Vec::new(),
                focus: Some(SubmitFocus::Message),
                saved: true,
                reset_after_ms: Some(reset_delay_ms),
            },
            SubmitOutcome::Invalid(report) => Self {
                message_class: "validation-error",
                role: "alert",
                live: "assertive",
                icon: "⚠️",
                message: t("form_corrija"),
                announcement: t("form_erros"),
                assertive: true,
                field_errors: report
                    .invalid_fields()
                    .into_iter()
                    .filter_map(|name| {
                        let error = report.errors_for(name).into_iter().next()?;
                        Some((name.to_string(), error.message()))
                    })
                    .collect(),
                focus: report.first_invalid().map(|name| SubmitFocus::Field(name.to_string())),
                saved: false,
                reset_after_ms: None,
            },
            SubmitOutcome::Failed(_) => Self {
                message_class: "error",
                role: "alert",
                live: "assertive",
                icon: "❌",
                message: t("form_erro_salvar"),
                announcement: t("form_erro_anuncio"),
                assertive: true,
                field_errors: Vec::new(),
                focus: None,
                saved: false,
                reset_after_ms: None,
            },
        }
    }
}

/// Añadir un id a una lista aria-describedby sin duplicarlo
pub fn add_described_by(existing: Option<&str>, id: &str) -> String {
    let mut ids: Vec<&str> = existing.unwrap_or("").split_whitespace().collect();
    if !ids.contains(&id) {
        ids.push(id);
    }
    ids.join(" ")
}

/// Quitar un id; None si la lista queda vacía
pub fn remove_described_by(existing: Option<&str>, id: &str) -> Option<String> {
    let ids: Vec<&str> = existing
        .unwrap_or("")
        .split_whitespace()
        .filter(|token| *token != id)
        .collect();
    if ids.is_empty() {
        None
    } else {
        Some(ids.join(" "))
    }
}

pub struct FormController {
    form: HtmlFormElement,
    message: Option<Element>,
    state: AppState,
    on_saved: Rc<dyn Fn()>,
}

impl FormController {
    /// Enganchar el formulario de la página recién renderizada
    pub fn mount(root: &Element, state: &AppState, on_saved: Rc<dyn Fn()>) -> Result<(), JsValue> {
        let form = root
            .query_selector(&format!("#{}", FORM_ID))?
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok());
        let Some(form) = form else {
            log::warn!("⚠️ [FORM] Formulario de cadastro no encontrado");
            return Ok(());
        };

        form.set_attribute("novalidate", "true")?;
        form.set_attribute("aria-label", &t("form_label"))?;

        let controller = Rc::new(Self {
            form,
            message: get_element_by_id(FORM_MESSAGE_ID),
            state: state.clone(),
            on_saved,
        });
        controller.wire_fields()?;
        controller.wire_shortcuts()?;

        let on_submit = controller.clone();
        controller.state.page_listeners.on_event(&controller.form, "submit", move |event: Event| {
            event.prevent_default();
            on_submit.handle_submit();
        })?;

        log::info!("✅ [FORM] Formulario accesible inicializado");
        Ok(())
    }

    fn fields(&self) -> Vec<Element> {
        query_selector_all_in(&self.form, FORM_FIELD_SELECTOR).unwrap_or_default()
    }

    fn field_by_name(&self, name: &str) -> Option<Element> {
        self.fields()
            .into_iter()
            .find(|field| field.get_attribute("name").as_deref() == Some(name))
    }

    /// Valores en orden del documento (como FormData)
    fn collect_values(&self) -> FormValues {
        let mut values = FormValues::new();
        for field in self.fields() {
            let Some(name) = field.get_attribute("name").filter(|n| !n.is_empty()) else {
                continue;
            };
            let value = control_value(&field).unwrap_or_default();
            values.push(FieldInput::new(&name, &value, field.has_attribute("required")));
        }
        values
    }

    fn wire_fields(self: &Rc<Self>) -> Result<(), JsValue> {
        let listeners = &self.state.page_listeners;
        for field in self.fields() {
            if field.id().is_empty() {
                if let Some(name) = field.get_attribute("name") {
                    field.set_id(&format!("field-{}", name));
                }
            }
            set_attribute(&field, "aria-invalid", "false")?;

            let controller = self.clone();
            let blurred = field.clone();
            listeners.on_event(&field, "blur", move |_| {
                controller.validate_field(&blurred);
            })?;

            let controller = self.clone();
            let typed = field.clone();
            listeners.on_event(&field, "input", move |_| {
                if typed.get_attribute("aria-invalid").as_deref() == Some("true") {
                    controller.clear_field_error(&typed);
                }
            })?;

            let escaped = field.clone();
            listeners.on_keydown(&field, move |event: KeyboardEvent| {
                if event.key() == "Escape" && !event.ctrl_key() {
                    if let Some(html) = escaped.dyn_ref::<web_sys::HtmlElement>() {
                        let _ = html.blur();
                    }
                }
            })?;
        }
        Ok(())
    }

    /// Ctrl+Escape limpia, Ctrl+Enter envía
    fn wire_shortcuts(self: &Rc<Self>) -> Result<(), JsValue> {
        let controller = self.clone();
        self.state.page_listeners.on_keydown(&self.form, move |event: KeyboardEvent| {
            if !event.ctrl_key() {
                return;
            }
            match event.key().as_str() {
                "Escape" => {
                    event.prevent_default();
                    controller.reset();
                    controller.state.announcer.announce(&t("form_limpo"));
                }
                "Enter" => {
                    event.prevent_default();
                    controller.handle_submit();
                }
                _ => {}
            }
        })
    }

    /// Validación de un campo (blur); true si no tiene errores
    fn validate_field(&self, field: &Element) -> bool {
        let Some(name) = field.get_attribute("name") else {
            return true;
        };
        match blur_error(&self.state.validator, &name, &self.collect_values()) {
            Some(message) => {
                self.show_field_error(field, &message);
                false
            }
            None => {
                self.clear_field_error(field);
                true
            }
        }
    }

    fn show_field_error(&self, field: &Element, message: &str) {
        self.clear_field_error(field);
        let error_id = format!("error-{}", field.id());

        let _ = set_attribute(field, "aria-invalid", "true");
        let described = add_described_by(field.get_attribute("aria-describedby").as_deref(), &error_id);
        let _ = set_attribute(field, "aria-describedby", &described);
        let _ = add_class(field, "error");

        let error = ElementBuilder::new("div").and_then(|builder| {
            builder
                .id(&error_id)
                .class("field-error")
                .text(message)
                .attr("role", "alert")?
                .attr("aria-live", "polite")
        });
        match (error, field.parent_element()) {
            (Ok(error), Some(parent)) => {
                let _ = parent.append_child(&error.build());
            }
            (Err(e), _) => log::warn!("⚠️ [FORM] No se pudo crear el mensaje de error: {:?}", e),
            (_, None) => log::warn!("⚠️ [FORM] Campo '{}' sin contenedor", field.id()),
        }
    }

    fn clear_field_error(&self, field: &Element) {
        let error_id = format!("error-{}", field.id());
        let _ = set_attribute(field, "aria-invalid", "false");
        let _ = match remove_described_by(field.get_attribute("aria-describedby").as_deref(), &error_id) {
            Some(rest) => set_attribute(field, "aria-describedby", &rest),
            None => remove_attribute(field, "aria-describedby"),
        };
        let _ = remove_class(field, "error");
        if let Some(existing) = get_element_by_id(&error_id) {
            existing.remove();
        }
    }

    fn clear_all_errors(&self) {
        for field in self.fields() {
            self.clear_field_error(&field);
        }
    }

    fn reset(&self) {
        self.form.reset();
        self.clear_all_errors();
    }

    /// Mensaje bajo el formulario (texto escapado)
    fn set_message(&self, class: &str, role: &str, icon: &str, text: &str, live: &str) -> Option<Element> {
        let message = self.message.as_ref()?;
        message.set_inner_html(&format!(
            r#"<div class="{}" role="{}" tabindex="-1"><span class="{}-icon" aria-hidden="true">{}</span> {}</div>"#,
            class,
            role,
            if class == "success" { "success" } else { "error" },
            icon,
            escape_html(text)
        ));
        let _ = set_attribute(message, "aria-live", live);
        message.first_element_child()
    }

    fn handle_submit(self: &Rc<Self>) {
        if let Some(message) = &self.message {
            message.set_inner_html("");
        }

        let values = self.collect_values();
        let outcome = submit(&values, &self.state.validator, &self.state.registrations);
        match &outcome {
            SubmitOutcome::Saved { total, .. } => {
                log::info!("✅ [FORM] Cadastro guardado ({} registros)", total)
            }
            SubmitOutcome::Invalid(report) => {
                log::debug!("🔍 [FORM] {} campos inválidos", report.invalid_fields().len())
            }
            SubmitOutcome::Failed(e) => log::error!("❌ [FORM] Error al guardar formulario: {}", e),
        }
        self.apply_feedback(&SubmitFeedback::for_outcome(
            &outcome,
            CONFIG.form_config.reset_delay_ms,
        ));
    }

    fn apply_feedback(self: &Rc<Self>, feedback: &SubmitFeedback) {
        self.clear_all_errors();
        for (name, message) in &feedback.field_errors {
            if let Some(field) = self.field_by_name(name) {
                self.show_field_error(&field, message);
            }
        }

        let shown = self.set_message(
            feedback.message_class,
            feedback.role,
            feedback.icon,
            &feedback.message,
            feedback.live,
        );
        match &feedback.focus {
            Some(SubmitFocus::Field(name)) => {
                if let Some(field) = self.field_by_name(name) {
                    focus_element(&field);
                }
            }
            Some(SubmitFocus::Message) => {
                if let Some(shown) = shown {
                    Timeout::new(CONFIG.timing.focus_delay_ms, move || {
                        focus_element(&shown);
                    })
                    .forget();
                }
            }
            None => {}
        }

        if feedback.assertive {
            self.state.announcer.announce_assertive(&feedback.announcement);
        } else {
            self.state.announcer.announce(&feedback.announcement);
        }

        if feedback.saved {
            (self.on_saved)();
            if let Err(e) = create_confetti(CONFETTI_PIECES) {
                log::debug!("🔍 [FORM] Confeti no disponible: {:?}", e);
            }
        }

        if let Some(delay) = feedback.reset_after_ms {
            let controller = self.clone();
            Timeout::new(delay, move || {
                controller.reset();
                if let Some(first) = controller.fields().first() {
                    focus_element(first);
                }
            })
            .forget();
        }
    }
}

/// Pequeña celebración con piezas de confeti que se eliminan solas
fn create_confetti(count: usize) -> Result<(), JsValue> {
    let body = body().ok_or_else(|| JsValue::from_str("No body"))?;
    for _ in 0..count {
        let left = 50.0 + (js_sys::Math::random() - 0.5) * 40.0;
        let top = -10.0 - js_sys::Math::random() * 10.0;
        let color = CONFETTI_COLORS[(js_sys::Math::random() * CONFETTI_COLORS.len() as f64) as usize % CONFETTI_COLORS.len()];
        let rotation = js_sys::Math::random() * 360.0;

        let piece = ElementBuilder::new("div")?
            .class("confetti-piece")
            .attr("aria-hidden", "true")?
            .attr(
                "style",
                &format!(
                    "left:{:.1}vw;top:{:.1}vh;background:{};transform:translateY(-10vh) rotate({:.0}deg)",
                    left, top, color, rotation
                ),
            )?
            .build();
        body.append_child(&piece)?;
        Timeout::new(CONFETTI_LIFETIME_MS, move || piece.remove()).forget();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStore;
    use crate::utils::validator::FieldError;

    fn filled_form() -> FormValues {
        FormValues::new()
            .with_field("nome", "  Maria Silva  ", true)
            .with_field("email", "maria@exemplo.com", true)
            .with_field("telefone", "+5521999999999", true)
            .with_field("cpf", "123.456.789-09", true)
            .with_field("endereco", " Rua A, 10 ", false)
            .with_field("cidade", "Niterói", true)
            .with_field("disponibilidade", "noite", false)
            .with_field("observacoes", "", false)
            .with_field("senha", "abcdef", true)
            .with_field("senha_confirm", "abcdef", true)
    }

    #[test]
    fn test_valid_submission_appends_trimmed_record() {
        let service = RegistrationService::new(Rc::new(MemoryStore::new()));
        let outcome = submit(&filled_form(), &Validator::default(), &service);
        assert!(matches!(outcome, SubmitOutcome::Saved { total: 1, .. }));

        let stored = service.list().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].nome, "Maria Silva");
        assert_eq!(stored[0].endereco, "Rua A, 10");
        assert_eq!(stored[0].cidade, "Niterói");
        assert_eq!(stored[0].disponibilidade, "noite");
        assert_eq!(stored[0].senha, "abcdef");
    }

    #[test]
    fn test_invalid_submission_stores_nothing() {
        let service = RegistrationService::new(Rc::new(MemoryStore::new()));
        let mut values = filled_form();
        values.push(FieldInput::new("cpf", "123", true));
        match submit(&values, &Validator::default(), &service) {
            SubmitOutcome::Invalid(report) => assert_eq!(report.first_invalid(), Some("cpf")),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_described_by_tokens() {
        assert_eq!(add_described_by(Some("help-nome"), "error-nome"), "help-nome error-nome");
        assert_eq!(add_described_by(Some("help-nome error-nome"), "error-nome"), "help-nome error-nome");
        assert_eq!(add_described_by(None, "error-cidade"), "error-cidade");
        assert_eq!(
            remove_described_by(Some("help-nome error-nome"), "error-nome").as_deref(),
            Some("help-nome")
        );
        assert_eq!(remove_described_by(Some("error-cidade"), "error-cidade"), None);
    }

    #[test]
    fn test_success_feedback_schedules_reset_and_focuses_message() {
        let service = RegistrationService::new(Rc::new(MemoryStore::new()));
        let outcome = submit(&filled_form(), &Validator::default(), &service);
        let feedback = SubmitFeedback::for_outcome(&outcome, 1500);

        assert!(feedback.saved);
        assert_eq!(feedback.reset_after_ms, Some(1500));
        assert_eq!(feedback.focus, Some(SubmitFocus::Message));
        assert_eq!(feedback.role, "status");
        assert!(!feedback.assertive);
        assert!(feedback.field_errors.is_empty());
    }

    #[test]
    fn test_invalid_feedback_focuses_first_invalid_field() {
        let service = RegistrationService::new(Rc::new(MemoryStore::new()));
        let mut values = filled_form();
        values.push(FieldInput::new("telefone", "(21) 9999", true));
        values.push(FieldInput::new("cpf", "", true));
        let outcome = submit(&values, &Validator::default(), &service);
        let feedback = SubmitFeedback::for_outcome(&outcome, 1500);

        assert_eq!(feedback.focus, Some(SubmitFocus::Field("telefone".to_string())));
        assert_eq!(
            feedback.field_errors,
            vec![
                ("telefone".to_string(), FieldError::InvalidPhone.message()),
                ("cpf".to_string(), FieldError::Required.message()),
            ]
        );
        assert!(feedback.assertive);
        assert_eq!(feedback.reset_after_ms, None);
        assert!(!feedback.saved);
    }

    #[test]
    fn test_storage_failure_feedback_keeps_form() {
        let outcome = SubmitOutcome::Failed(StorageError::Write("QuotaExceededError".into()));
        let feedback = SubmitFeedback::for_outcome(&outcome, 1500);
        assert_eq!(feedback.message, t("form_erro_salvar"));
        assert!(feedback.assertive);
        assert_eq!(feedback.focus, None);
        assert_eq!(feedback.reset_after_ms, None);
    }

    #[test]
    fn test_blur_error_reports_first_rule_only() {
        let validator = Validator::default();
        let values = FormValues::new()
            .with_field("telefone", "", true)
            .with_field("senha", "abcdef", true)
            .with_field("senha_confirm", "", true);
        assert_eq!(
            blur_error(&validator, "telefone", &values),
            Some(FieldError::Required.message())
        );
        assert_eq!(blur_error(&validator, "senha", &values), None);
    }
}
