use serde::{Deserialize, Serialize};

use crate::utils::validator::{FormValues, FIELD_PASSWORD};

/// Registro de voluntario persistido en `nexus_registros`
/// Campos planos, sin unicidad: duplicados permitidos
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationRecord {
    pub nome: String,
    pub email: String,
    pub telefone: String,
    pub cpf: String,
    pub endereco: String,
    pub cidade: String,
    pub disponibilidade: String,
    pub observacoes: String,
    pub senha: String,
}

impl RegistrationRecord {
    /// Construir desde los valores del formulario
    /// Todo se guarda con trim salvo la contraseña; `senha_confirm` no se guarda
    pub fn from_form(values: &FormValues) -> Self {
        let field = |name: &str| -> String {
            values
                .value(name)
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };
        Self {
            nome: field("nome"),
            email: field("email"),
            telefone: field("telefone"),
            cpf: field("cpf"),
            endereco: field("endereco"),
            cidade: field("cidade"),
            disponibilidade: field("disponibilidade"),
            observacoes: field("observacoes"),
            senha: values.value(FIELD_PASSWORD).unwrap_or_default().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_form_trims_values_and_skips_confirmation() {
        let values = FormValues::new()
            .with_field("nome", "  Ana Souza ", true)
            .with_field("email", "ana@exemplo.com ", true)
            .with_field("senha", " segredo1", true)
            .with_field("senha_confirm", " segredo1", true);
        let record = RegistrationRecord::from_form(&values);
        assert_eq!(record.nome, "Ana Souza");
        assert_eq!(record.email, "ana@exemplo.com");
        assert_eq!(record.senha, " segredo1");
        assert_eq!(record.cidade, "");

        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("senha_confirm"));
    }

    #[test]
    fn test_partial_legacy_record_deserializes() {
        let record: RegistrationRecord =
            serde_json::from_str(r#"{"nome":"Leo","email":"leo@x.com","extra":"ignored"}"#).unwrap();
        assert_eq!(record.nome, "Leo");
        assert_eq!(record.telefone, "");
    }
}
