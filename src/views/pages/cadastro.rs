// ============================================================================
// CADASTRO - Formulario de voluntario + registros guardados
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};

use crate::dom::event_target_element;
use crate::models::RegistrationRecord;
use crate::state::AppState;
use crate::utils::constants::REGISTRATIONS_LIST_ID;
use crate::utils::i18n::{t, t_with};
use crate::utils::sanitize::escape_html;
use crate::viewmodels::FormController;

pub const MARKUP: &str = r##"<section aria-labelledby="cadastro-title">
    <h2 id="cadastro-title" class="section-title">Cadastro de Voluntário</h2>
    <form id="form-cadastro" class="accessible-form" novalidate>
        <div class="form-group">
            <label class="form-label" for="nome">Nome completo</label>
            <input class="form-input" id="nome" name="nome" type="text" required aria-required="true" aria-describedby="help-nome">
            <div id="help-nome" class="form-help">Digite seu nome completo como aparece em documentos.</div>
        </div>
        <div class="form-group">
            <label class="form-label" for="email">Email</label>
            <input class="form-input" id="email" name="email" type="email" required aria-required="true" aria-describedby="help-email">
            <div id="help-email" class="form-help">Usaremos para contato; endereço válido é necessário.</div>
        </div>
        <div class="form-group">
            <label class="form-label" for="telefone">Telefone</label>
            <input class="form-input" id="telefone" name="telefone" type="tel" required aria-required="true" aria-describedby="help-telefone">
            <div id="help-telefone" class="form-help">Apenas dígitos com código do país e área, + opcional. Ex: +5521999999999.</div>
        </div>
        <div class="form-group">
            <label class="form-label" for="cpf">CPF</label>
            <input class="form-input" id="cpf" name="cpf" type="text" placeholder="000.000.000-00" required aria-required="true" aria-describedby="help-cpf">
            <div id="help-cpf" class="form-help">Formato: 000.000.000-00.</div>
        </div>
        <div class="form-group full">
            <label class="form-label" for="endereco">Endereço</label>
            <input class="form-input" id="endereco" name="endereco" type="text" placeholder="Rua, número, complemento" aria-describedby="help-endereco">
            <div id="help-endereco" class="form-help">Opcional, mas útil para ações locais.</div>
        </div>
        <div class="form-group">
            <label class="form-label" for="cidade">Cidade</label>
            <input class="form-input" id="cidade" name="cidade" type="text" placeholder="Cidade" required aria-required="true">
        </div>
        <div class="form-group">
            <label class="form-label" for="disponibilidade">Disponibilidade</label>
            <select class="form-select" id="disponibilidade" name="disponibilidade" aria-describedby="help-disponibilidade">
                <option value="manha">Manhã</option>
                <option value="tarde">Tarde</option>
                <option value="noite">Noite</option>
                <option value="fimsemana">Fins de semana</option>
            </select>
            <div id="help-disponibilidade" class="form-help">Quando você costuma poder participar?</div>
        </div>
        <div class="form-group full">
            <label class="form-label" for="observacoes">Habilidades / Observações</label>
            <textarea class="form-textarea" id="observacoes" name="observacoes" rows="4" placeholder="Como você quer ajudar (ex: alfabetização, eventos, cozinha)"></textarea>
        </div>
        <div class="form-group">
            <label class="form-label" for="senha">Senha</label>
            <input class="form-input" id="senha" name="senha" type="password" required aria-required="true" minlength="6" aria-describedby="help-senha">
            <div id="help-senha" class="form-help">Escolha uma senha segura (mínimo 6 caracteres).</div>
        </div>
        <div class="form-group">
            <label class="form-label" for="senha_confirm">Confirmar Senha</label>
            <input class="form-input" id="senha_confirm" name="senha_confirm" type="password" required aria-required="true" minlength="6">
        </div>
        <div class="form-group full">
            <button type="submit" class="button primary">Enviar</button>
        </div>
    </form>
    <div id="form-mensagem" aria-live="polite"></div>

    <h3 class="section-title">Registros salvos</h3>
    <div id="registros-list" class="reg-list">Carregando...</div>
</section>"##;

pub fn on_mount(root: &Element, state: &AppState) -> Result<(), JsValue> {
    let list = root.query_selector(&format!("#{}", REGISTRATIONS_LIST_ID))?;

    let refresh: Rc<dyn Fn()> = {
        let state = state.clone();
        let list = list.clone();
        Rc::new(move || {
            if let Some(list) = &list {
                render_registrations(list, &state);
            }
        })
    };
    refresh();

    if let Some(list) = &list {
        let listeners = state.page_listeners.clone();
        let state = state.clone();
        let refresh = refresh.clone();
        listeners.on_click(list, move |event: MouseEvent| {
            let Some(button) = event_target_element(&event)
                .and_then(|target| target.closest("[data-action=\"delete\"]").ok().flatten())
            else {
                return;
            };
            let Some(index) = button
                .get_attribute("data-idx")
                .and_then(|idx| idx.parse::<usize>().ok())
            else {
                return;
            };
            match state.registrations.remove(index) {
                Ok(true) => {
                    state.announcer.announce(&t("registro_excluido"));
                    refresh();
                }
                Ok(false) => refresh(),
                Err(e) => {
                    log::error!("❌ [REGISTROS] Error eliminando registro: {}", e);
                    state.announcer.announce_assertive(&t("erro_inesperado"));
                }
            }
        })?;
    }

    FormController::mount(root, state, refresh)?;
    Ok(())
}

fn render_registrations(list: &Element, state: &AppState) {
    match state.registrations.list() {
        Ok(records) => list.set_inner_html(&registrations_markup(&records)),
        Err(e) => {
            log::error!("❌ [REGISTROS] Error leyendo registros: {}", e);
            list.set_inner_html(&format!("<p>{}</p>", escape_html(&t("registros_erro"))));
        }
    }
}

/// Lista de registros guardados con botón de borrado por índice
pub fn registrations_markup(records: &[RegistrationRecord]) -> String {
    if records.is_empty() {
        return format!("<p>{}</p>", escape_html(&t("registros_vazio")));
    }
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let nome = escape_html(&record.nome);
            format!(
                r#"<div class="reg-item" data-idx="{idx}">
    <div class="meta">
        <strong>{nome}</strong><br>
        <small>{email} • {telefone}</small>
    </div>
    <div class="actions">
        <button class="button secondary" data-action="delete" data-idx="{idx}" aria-label="{label}">Excluir</button>
    </div>
</div>"#,
                email = escape_html(&record.email),
                telefone = escape_html(&record.telefone),
                label = escape_html(&t_with("excluir_registro", &[&record.nome])),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_message() {
        assert_eq!(registrations_markup(&[]), "<p>Nenhum registro encontrado.</p>");
    }

    #[test]
    fn test_records_are_escaped_and_indexed() {
        let records = vec![
            RegistrationRecord {
                nome: "Ana".into(),
                email: "ana@x.com".into(),
                ..RegistrationRecord::default()
            },
            RegistrationRecord {
                nome: "<img src=x>".into(),
                ..RegistrationRecord::default()
            },
        ];
        let html = registrations_markup(&records);
        assert!(html.contains(r#"data-idx="0""#));
        assert!(html.contains(r#"data-idx="1""#));
        assert!(html.contains("ana@x.com"));
        assert!(html.contains("&lt;img src=x&gt;"));
        assert!(!html.contains("<img"));
        assert!(html.contains("Excluir registro Ana"));
    }
}
