// ============================================================================
// PROJECT MODALS - Detalle y apoio (role=dialog, foco atrapado)
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent};

use crate::a11y::FocusTrap;
use crate::dom::{body, set_text_content, ElementBuilder, EventListener};
use crate::state::AppState;
use crate::utils::i18n::{t, t_with};
use crate::utils::sanitize::escape_html;

const DETAIL_CLOSE_DELAY_MS: u32 = 1000;
const SUPPORT_CLOSE_DELAY_MS: u32 = 900;

pub fn detail_modal_markup(title: &str, desc: &str, img: &str) -> String {
    format!(
        r#"<div class="modal" role="dialog" aria-modal="true" aria-label="Detalhes do projeto">
    <button class="close" aria-label="Fechar">Fechar</button>
    <div class="modal-body-flex">
        <img src="{img}" alt="Imagem do projeto {title}" loading="lazy">
        <div>
            <h3 class="modal-title">{title}</h3>
            <p>{desc}</p>
            <div class="modal-actions"><button class="botao" id="modal-support">Quero Ajudar</button></div>
        </div>
    </div>
</div>"#,
        img = escape_html(img),
        title = escape_html(title),
        desc = escape_html(desc),
    )
}

pub fn support_modal_markup(title: &str) -> String {
    format!(
        r#"<div class="modal" role="dialog" aria-modal="true" aria-label="Apoiar projeto">
    <button class="close" aria-label="Fechar">Fechar</button>
    <div>
        <h3 class="modal-title">Apoiar: {title}</h3>
        <p>Obrigado por considerar apoiar este projeto. Clique em "Quero Ajudar" para registrar seu interesse e receber instruções.</p>
        <div class="modal-actions">
            <button class="botao" id="btn-apoio">Quero Ajudar</button>
            <button class="btn-danger" data-close-modal>Cancelar</button>
        </div>
    </div>
</div>"#,
        title = escape_html(title),
    )
}

/// Insertar overlay + modal en body y abrir la trampa de foco
fn open_modal(state: &AppState, markup: &str) -> Result<(Element, FocusTrap), JsValue> {
    let overlay = ElementBuilder::new("div")?
        .class("modal-overlay")
        .html(markup)
        .build();
    body()
        .ok_or_else(|| JsValue::from_str("No body"))?
        .append_child(&overlay)?;

    let modal = overlay
        .query_selector(".modal")?
        .ok_or_else(|| JsValue::from_str("Modal container missing"))?;
    let trap = FocusTrap::modal(&overlay, &modal, &state.announcer);
    state.open_modal(trap.clone())?;
    Ok((overlay, trap))
}

/// "Quero Ajudar": registra el apoio y cierra el modal tras `delay_ms`
fn wire_support_action(
    state: &AppState,
    overlay: &Element,
    trap: &FocusTrap,
    selector: &str,
    project: &str,
    thanks: &'static str,
    delay_ms: u32,
) -> Result<(), JsValue> {
    let Some(button) = overlay.query_selector(selector)? else {
        return Ok(());
    };
    let state = state.clone();
    let trap = trap.clone();
    let project = project.to_string();
    let button_el = button.clone();
    let owner = trap.clone();
    let listener = EventListener::typed(&button, "click", move |_: MouseEvent| {
        match state.supports.record(&project) {
            Ok(_) => {
                set_text_content(&button_el, thanks);
                state.announcer.announce(&t("apoio_registrado"));
                let trap = trap.clone();
                Timeout::new(delay_ms, move || trap.close()).forget();
            }
            Err(e) => {
                log::error!("❌ [APOIO] Error guardando apoio: {}", e);
                state.announcer.announce_assertive(&t("erro_inesperado"));
            }
        }
    })?;
    owner.keep_until_close(listener);
    Ok(())
}

pub fn open_detail_modal(state: &AppState, title: &str, desc: &str, img: &str) -> Result<(), JsValue> {
    let (overlay, trap) = open_modal(state, &detail_modal_markup(title, desc, img))?;
    state.announcer.announce(&t_with("detalhe_aberto", &[title]));
    wire_support_action(
        state,
        &overlay,
        &trap,
        "#modal-support",
        title,
        "Obrigada!",
        DETAIL_CLOSE_DELAY_MS,
    )
}

pub fn open_support_modal(state: &AppState, title: &str) -> Result<(), JsValue> {
    let (overlay, trap) = open_modal(state, &support_modal_markup(title))?;
    state.announcer.announce(&t_with("apoio_aberto", &[title]));
    wire_support_action(
        state,
        &overlay,
        &trap,
        "#btn-apoio",
        title,
        "Obrigado!",
        SUPPORT_CLOSE_DELAY_MS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_markup_is_escaped_dialog() {
        let markup = detail_modal_markup("<b>x</b>", "a & b", "img/p.webp");
        assert!(markup.contains(r#"role="dialog""#));
        assert!(markup.contains(r#"aria-modal="true""#));
        assert!(markup.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(markup.contains("a &amp; b"));
        assert!(!markup.contains("<b>"));

        let support = support_modal_markup("\"quoted\"");
        assert!(support.contains("Apoiar: &quot;quoted&quot;"));
        assert!(support.contains("data-close-modal"));
    }
}
