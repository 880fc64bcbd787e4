// ============================================================================
// INICIO - Hero, estadísticas y newsletter
// ============================================================================

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, KeyboardEvent};

use crate::dom::{is_connected, set_text_content};
use crate::services::SubscribeOutcome;
use crate::state::AppState;
use crate::utils::i18n::t;

const EMOJI: [&str; 4] = ["💖", "🌸", "✨", "🤝"];
const EMOJI_INTERVAL_MS: u32 = 900;

pub const MARKUP: &str = r##"<section class="hero" aria-labelledby="hero-title">
    <div class="hero-text">
        <h1 id="hero-title">Bem-vindo à Nexus ONG!</h1>
        <p class="hero-sub">Transformando vidas <span id="typed" aria-hidden="true">💖</span></p>
        <p class="hero-lead">Comunidade de voluntários criando grandes mudanças através de pequenas ações.</p>
        <div class="botoes">
            <a class="botao" href="#projetos" data-link aria-label="Ver projetos">Ver Projetos</a>
            <a class="botao botao-secundario" href="#cadastro" data-link aria-label="Cadastrar como voluntário">Quero Ajudar</a>
        </div>
        <div class="hero-stats" aria-label="Estatísticas">
            <div class="stat"><strong>+120</strong><span>Voluntários</span></div>
            <div class="stat"><strong>+45</strong><span>Projetos</span></div>
            <div class="stat"><strong>+5K</strong><span>Beneficiados</span></div>
        </div>
    </div>
    <img src="img/meuprojeto1.webp" alt="Voluntários em ação" loading="lazy">
</section>
<section class="cute-callout" aria-labelledby="newsletter-title">
    <h3 id="newsletter-title">Participe</h3>
    <p>Receba novidades sobre nossos eventos e campanhas.</p>
    <div class="newsletter">
        <input id="newsletter-email" type="email" placeholder="Seu email" aria-label="Email para newsletter" required>
        <button class="botao" id="newsletter-btn" aria-label="Assinar">Quero receber</button>
    </div>
    <div id="newsletter-msg" aria-live="polite"></div>
</section>"##;

pub fn on_mount(root: &Element, state: &AppState) -> Result<(), JsValue> {
    if let Some(typed) = root.query_selector("#typed")? {
        rotate_emoji(typed, 0);
    }
    init_newsletter(root, state)
}

/// Rotación del emoji del hero; se detiene cuando el nodo sale del documento
fn rotate_emoji(element: Element, index: usize) {
    Timeout::new(EMOJI_INTERVAL_MS, move || {
        if !is_connected(&element) {
            return;
        }
        set_text_content(&element, EMOJI[index % EMOJI.len()]);
        rotate_emoji(element, index + 1);
    })
    .forget();
}

fn init_newsletter(root: &Element, state: &AppState) -> Result<(), JsValue> {
    let email = root
        .query_selector("#newsletter-email")?
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
    let button = root.query_selector("#newsletter-btn")?;
    let message = root.query_selector("#newsletter-msg")?;

    let (Some(email), Some(button)) = (email, button) else {
        log::warn!("⚠️ [NEWSLETTER] Elementos de newsletter no encontrados");
        return Ok(());
    };

    let submit: Rc<dyn Fn()> = {
        let state = state.clone();
        let email = email.clone();
        Rc::new(move || {
            let outcome = state.newsletter.subscribe(&email.value());
            match outcome {
                Ok(SubscribeOutcome::InvalidEmail) => {
                    state.announcer.announce_assertive(&t("email_invalido"));
                }
                Ok(SubscribeOutcome::Subscribed) => {
                    if let Some(message) = &message {
                        set_text_content(message, &t("newsletter_obrigada"));
                    }
                    email.set_value("");
                    state.announcer.announce(&t("newsletter_ok"));
                }
                Ok(SubscribeOutcome::AlreadySubscribed) => {
                    if let Some(message) = &message {
                        set_text_content(message, &t("newsletter_repetido"));
                    }
                    state.announcer.announce(&t("newsletter_repetido"));
                }
                Err(e) => {
                    log::error!("❌ [NEWSLETTER] Error guardando email: {}", e);
                    state.announcer.announce_assertive(&t("erro_inesperado"));
                }
            }
        })
    };

    let listeners = &state.page_listeners;
    let on_button = submit.clone();
    listeners.on_click(&button, move |_| on_button())?;
    listeners.on_keydown(&email, move |event: KeyboardEvent| {
        if event.key() == "Enter" {
            event.prevent_default();
            submit();
        }
    })
}
