// ============================================================================
// VALIDATOR - Reglas puras de validación del formulario de cadastro
// ============================================================================
// Sin efectos secundarios: recibe los valores del formulario y devuelve un
// informe con los campos marcados. Quien llama decide cómo presentar errores.
// ============================================================================

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::CONFIG;

pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PHONE: &str = "telefone";
pub const FIELD_CPF: &str = "cpf";
pub const FIELD_PASSWORD: &str = "senha";
pub const FIELD_PASSWORD_CONFIRM: &str = "senha_confirm";

lazy_static! {
    static ref PHONE_RE: Regex = Regex::new(r"^\+?\d{8,15}$").expect("phone pattern");
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern");
    static ref CPF_RE: Regex = Regex::new(r"^\d{3}\.\d{3}\.\d{3}-\d{2}$").expect("cpf pattern");
}

/// Teléfono internacional: `+` opcional y 8-15 dígitos, sin puntuación
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value.trim())
}

/// Forma local@dominio.tld
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// CPF agrupado: 000.000.000-00
pub fn is_valid_cpf(value: &str) -> bool {
    CPF_RE.is_match(value.trim())
}

/// Un campo con nombre tal como lo expone el formulario
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInput {
    pub name: String,
    pub value: String,
    pub required: bool,
}

impl FieldInput {
    pub fn new(name: &str, value: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            required,
        }
    }
}

/// Valores del formulario en el orden del documento
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    fields: Vec<FieldInput>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder usado por tests y por la recolección desde el DOM
    pub fn with_field(mut self, name: &str, value: &str, required: bool) -> Self {
        self.push(FieldInput::new(name, value, required));
        self
    }

    /// Un nombre repetido reemplaza el valor anterior (como FormData → objeto)
    pub fn push(&mut self, field: FieldInput) {
        if let Some(existing) = self.fields.iter_mut().find(|f| f.name == field.name) {
            *existing = field;
        } else {
            self.fields.push(field);
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldInput> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(|f| f.value.as_str())
    }

    pub fn fields(&self) -> &[FieldInput] {
        &self.fields
    }

    fn position(&self, name: &str) -> usize {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .unwrap_or(usize::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidPhone,
    InvalidEmail,
    InvalidCpf,
    PasswordMismatch,
    PasswordTooShort(usize),
}

impl FieldError {
    /// Mensaje mostrado junto al campo
    pub fn message(&self) -> String {
        match self {
            FieldError::Required => "Este campo é obrigatório".to_string(),
            FieldError::InvalidPhone => {
                "Telefone inválido: use apenas dígitos (8 a 15), com + opcional".to_string()
            }
            FieldError::InvalidEmail => "Formato de email inválido".to_string(),
            FieldError::InvalidCpf => "Formato inválido. Use 000.000.000-00".to_string(),
            FieldError::PasswordMismatch => "As senhas não coincidem".to_string(),
            FieldError::PasswordTooShort(min) => format!("Mínimo {} caracteres", min),
        }
    }
}

/// Resultado de validar: lista de (campo, error) en orden del formulario
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<(String, FieldError)>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[(String, FieldError)] {
        &self.errors
    }

    pub fn errors_for(&self, name: &str) -> Vec<FieldError> {
        self.errors
            .iter()
            .filter(|(field, _)| field == name)
            .map(|(_, error)| *error)
            .collect()
    }

    /// Campos marcados, sin repetir, en orden del formulario
    pub fn invalid_fields(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for (field, _) in &self.errors {
            if !names.contains(&field.as_str()) {
                names.push(field);
            }
        }
        names
    }

    pub fn first_invalid(&self) -> Option<&str> {
        self.errors.first().map(|(field, _)| field.as_str())
    }

    fn flag(&mut self, field: &str, error: FieldError) {
        self.errors.push((field.to_string(), error));
    }
}

/// Conjunto fijo de reglas; cada una se evalúa de forma independiente
#[derive(Debug, Clone)]
pub struct Validator {
    password_min_len: usize,
}

impl Validator {
    pub fn new(password_min_len: usize) -> Self {
        Self { password_min_len }
    }

    pub fn from_config() -> Self {
        Self::new(CONFIG.form_config.password_min_len)
    }

    /// Validar el formulario completo
    pub fn validate_form(&self, values: &FormValues) -> ValidationReport {
        let mut report = ValidationReport::default();

        for field in values.fields() {
            if field.required && field.value.trim().is_empty() {
                report.flag(&field.name, FieldError::Required);
            }
        }

        if let Some(phone) = values.value(FIELD_PHONE) {
            if !is_valid_phone(phone) {
                report.flag(FIELD_PHONE, FieldError::InvalidPhone);
            }
        }

        if let Some(email) = values.value(FIELD_EMAIL) {
            if !email.trim().is_empty() && !is_valid_email(email) {
                report.flag(FIELD_EMAIL, FieldError::InvalidEmail);
            }
        }

        if let Some(cpf) = values.value(FIELD_CPF) {
            if !is_valid_cpf(cpf) {
                report.flag(FIELD_CPF, FieldError::InvalidCpf);
            }
        }

        let password = values.value(FIELD_PASSWORD);
        if let (Some(password), Some(confirm)) = (password, values.value(FIELD_PASSWORD_CONFIRM)) {
            // Comparación exacta, sin trim
            if password != confirm {
                report.flag(FIELD_PASSWORD, FieldError::PasswordMismatch);
                report.flag(FIELD_PASSWORD_CONFIRM, FieldError::PasswordMismatch);
            }
        }

        if let Some(password) = password {
            if !password.is_empty() && password.chars().count() < self.password_min_len {
                report.flag(
                    FIELD_PASSWORD,
                    FieldError::PasswordTooShort(self.password_min_len),
                );
            }
        }

        report
            .errors
            .sort_by_key(|(field, _)| values.position(field));
        report
    }

    /// Errores de un solo campo (validación en blur)
    ///
    /// La coincidencia de contraseñas no se marca en `senha` mientras la
    /// confirmación siga vacía: el usuario aún no ha llegado a ese campo.
    pub fn validate_field(&self, name: &str, values: &FormValues) -> Vec<FieldError> {
        let confirmation_pending = name == FIELD_PASSWORD
            && values
                .value(FIELD_PASSWORD_CONFIRM)
                .map_or(true, |confirm| confirm.is_empty());
        self.validate_form(values)
            .errors_for(name)
            .into_iter()
            .filter(|error| !(confirmation_pending && *error == FieldError::PasswordMismatch))
            .collect()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> FormValues {
        FormValues::new()
            .with_field("nome", "Maria Silva", true)
            .with_field("email", "maria@exemplo.com", true)
            .with_field("telefone", "+5521999999999", true)
            .with_field("cpf", "123.456.789-09", true)
            .with_field("endereco", "", false)
            .with_field("cidade", "Rio de Janeiro", true)
            .with_field("disponibilidade", "manha", false)
            .with_field("observacoes", "", false)
            .with_field("senha", "abcdef", true)
            .with_field("senha_confirm", "abcdef", true)
    }

    #[test]
    fn test_complete_form_is_valid() {
        let report = Validator::default().validate_form(&valid_form());
        assert!(report.is_valid(), "{:?}", report);
    }

    #[test]
    fn test_empty_required_field_invalidates_form() {
        let mut values = valid_form();
        values.push(FieldInput::new("nome", "   ", true));
        let report = Validator::default().validate_form(&values);
        assert!(!report.is_valid());
        assert_eq!(report.errors_for("nome"), vec![FieldError::Required]);

        values.push(FieldInput::new("nome", "Maria", true));
        assert!(Validator::default().validate_form(&values).is_valid());
    }

    #[test]
    fn test_email_rule() {
        assert!(is_valid_email("a@b.com"));
        assert!(!is_valid_email("a@b"));

        let optional = FormValues::new().with_field("email", "", false);
        assert!(Validator::default().validate_form(&optional).is_valid());

        let bad = FormValues::new().with_field("email", "a@b", false);
        assert_eq!(
            Validator::default().validate_form(&bad).errors_for("email"),
            vec![FieldError::InvalidEmail]
        );
    }

    #[test]
    fn test_phone_rule_rejects_punctuation() {
        assert!(is_valid_phone("21999999999"));
        assert!(is_valid_phone("+5521999999999"));
        assert!(!is_valid_phone("(21) 99999-9999"));
        assert!(!is_valid_phone("1234567"));
        assert!(!is_valid_phone("1234567890123456"));
    }

    #[test]
    fn test_cpf_rule() {
        assert!(is_valid_cpf("123.456.789-09"));
        assert!(!is_valid_cpf("12345678909"));
        assert!(!is_valid_cpf("123.456.789.09"));
    }

    #[test]
    fn test_password_rules() {
        let validator = Validator::default();

        let short = FormValues::new()
            .with_field("senha", "abcde", true)
            .with_field("senha_confirm", "abcde", true);
        assert_eq!(
            validator.validate_form(&short).errors_for("senha"),
            vec![FieldError::PasswordTooShort(6)]
        );

        let ok = FormValues::new()
            .with_field("senha", "abcdef", true)
            .with_field("senha_confirm", "abcdef", true);
        assert!(validator.validate_form(&ok).is_valid());

        let mismatch = FormValues::new()
            .with_field("senha", "abcdefgh", true)
            .with_field("senha_confirm", "abcdefgx", true);
        let report = validator.validate_form(&mismatch);
        assert!(!report.is_valid());
        assert_eq!(report.errors_for("senha_confirm"), vec![FieldError::PasswordMismatch]);
    }

    #[test]
    fn test_field_can_fail_multiple_rules() {
        let values = FormValues::new().with_field("telefone", "", true);
        let errors = Validator::default().validate_field("telefone", &values);
        assert_eq!(errors, vec![FieldError::Required, FieldError::InvalidPhone]);
    }

    #[test]
    fn test_blur_on_password_waits_for_confirmation() {
        let validator = Validator::default();
        let pending = FormValues::new()
            .with_field("senha", "abcdef", true)
            .with_field("senha_confirm", "", true);
        assert!(validator.validate_field("senha", &pending).is_empty());

        let typed = FormValues::new()
            .with_field("senha", "abcdef", true)
            .with_field("senha_confirm", "abcdex", true);
        assert_eq!(validator.validate_field("senha", &typed), vec![FieldError::PasswordMismatch]);
        assert_eq!(
            validator.validate_field("senha_confirm", &typed),
            vec![FieldError::PasswordMismatch]
        );

        // Otras reglas de la contraseña siguen aplicándose en blur
        let short = FormValues::new()
            .with_field("senha", "abc", true)
            .with_field("senha_confirm", "", true);
        assert_eq!(validator.validate_field("senha", &short), vec![FieldError::PasswordTooShort(6)]);
    }

    #[test]
    fn test_invalid_fields_follow_form_order() {
        let values = FormValues::new()
            .with_field("nome", "", true)
            .with_field("email", "x", true)
            .with_field("senha", "abc", true)
            .with_field("senha_confirm", "abd", true);
        let report = Validator::default().validate_form(&values);
        assert_eq!(
            report.invalid_fields(),
            vec!["nome", "email", "senha", "senha_confirm"]
        );
        assert_eq!(report.first_invalid(), Some("nome"));
    }
}
